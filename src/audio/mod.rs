use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;

mod engine;
mod env;
mod filter;
mod frame;
mod limiter;
pub mod noise;
mod osc;
pub mod recipes;
mod voice;

pub use frame::StereoFrame;

use engine::Engine;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    /// Kick a stream the platform may have put to sleep (app backgrounded,
    /// power policy). Redundant play() calls are harmless.
    pub fn resume(&self) {
        let _ = self.output_stream.play();
    }
}

/// The engine context: owns the one device connection, created lazily on the
/// first interaction that needs sound. Every public call is safe to repeat;
/// after the first success nothing is re-allocated, and after a failure the
/// whole audio side degrades to a logged no-op (the sequencer and UI keep
/// running without sound).
pub struct AudioSystem {
    handle: Option<AudioHandle>,
    failed: bool,
}

impl AudioSystem {
    pub fn new() -> Self {
        Self { handle: None, failed: false }
    }

    pub fn ensure_ready(&mut self) -> bool {
        if let Some(h) = &self.handle {
            h.resume();
            return true;
        }
        if self.failed {
            // don't re-probe the device on every keypress
            return false;
        }
        match start_audio() {
            Ok(h) => {
                self.handle = Some(h);
                true
            }
            Err(e) => {
                log::warn!("audio unavailable, running silent: {e:#}");
                self.failed = true;
                false
            }
        }
    }

    pub fn send(&mut self, cmd: AudioCommand) {
        self.ensure_ready();
        if let Some(h) = &self.handle {
            h.send(cmd);
        }
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let config = device
        .default_output_config()
        .context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;
    anyhow::ensure!(channels == 2, "only stereo output supported right now");

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            // one shared noise buffer for every noise voice of the session,
            // generated here so the callback never has to
            let noise = noise::make_noise_buffer(sample_rate);
            let mut engine = Engine::new(sample_rate, noise);
            engine.prime(); // the one-time silent unlock hit

            let output_stream =
                build_output_stream_f32(&device, &config.into(), rx, channels, engine)?;
            output_stream.play().context("failed to play output stream")?;

            log::info!("audio up: {sample_rate} Hz, {channels} ch");
            Ok(AudioHandle { tx, output_stream })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
    mut engine: Engine,
) -> anyhow::Result<cpal::Stream> {
    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels;
            // stereo f32 interleaved, same layout as StereoFrame
            let frames: &mut [StereoFrame] = unsafe {
                std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut StereoFrame, n_frames)
            };
            engine.render_block(frames);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
