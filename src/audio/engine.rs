use std::sync::Arc;

use super::env::Envelope;
use super::frame::StereoFrame;
use super::limiter::Compressor;
use super::recipes;
use super::voice::{Layer, Source, Voice};
use crate::audio_api::{AudioCommand, TriggerParams};

// Pool cap so we never grow the Vec inside the audio callback.
const MAX_VOICES: usize = 32;

const DEFAULT_MASTER_GAIN: f32 = 0.8;

/// Runs entirely on the audio thread. Commands drain at the top of each
/// render block, so a trigger lands on the very next block boundary; there
/// is no way (and no need) to touch a voice after it starts.
pub struct Engine {
    sample_rate: f32,
    noise: Arc<Vec<f32>>, // shared, immutable after creation
    voices: Vec<Voice>,
    master_gain: f32,
    compressor: Compressor,
}

impl Engine {
    pub fn new(sample_rate: u32, noise: Arc<Vec<f32>>) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            noise,
            voices: Vec::with_capacity(MAX_VOICES),
            master_gain: DEFAULT_MASTER_GAIN,
            compressor: Compressor::new(sample_rate as f32),
        }
    }

    /// Play one near-zero-length silent voice. Some platforms won't unmute a
    /// fresh output until something has actually been rendered through it;
    /// called exactly once when the stream comes up, never per trigger.
    pub fn prime(&mut self) {
        let silent = Voice::new([Layer::new(
            Source::Noise { pos: 0 },
            None,
            Envelope::exp(self.sample_rate, 0.0, 0.001),
            0.0,
        )]);
        self.voices.push(silent);
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Trigger(t) => self.trigger_voice(t),
            AudioCommand::SetMasterVolume(v) => self.master_gain = v.clamp(0.0, 1.0),
        }
    }

    fn trigger_voice(&mut self, t: TriggerParams) {
        let voice = recipes::build(&t, self.sample_rate, self.noise.len());
        if self.voices.len() == MAX_VOICES {
            // steal the oldest slot rather than grow the pool
            self.voices.remove(0);
        }
        self.voices.push(voice);
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        for f in out.iter_mut() {
            *f = StereoFrame::zero();
        }
        for v in self.voices.iter_mut() {
            v.render_into(out, &self.noise);
        }
        self.voices.retain(|v| v.active);

        for f in out.iter_mut() {
            f.scale(self.master_gain);
        }
        self.compressor.process(out);
    }

    #[cfg(test)]
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }
}
