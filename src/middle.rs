// The middle layer owns everything the TUI renders and the audio engine is
// told about: the kit, the pattern grid, the sequencer, the master volume.
// Input comes in as semantic InputEvents, state changes happen here, and
// anything audible leaves as AudioCommands for the caller to forward.

use crate::audio_api::AudioCommand;
use crate::kit::pad::Pad;
use crate::kit::presets::{self, KIT_PRESETS};
use crate::sequencer::{Grid, Sequencer, empty_grid};
use crate::shared::{
    DisplayState, InputEvent, LedState, NUM_PADS, PAD_PULSE_SECS, STEPS_PER_PATTERN,
};

const DEFAULT_VOLUME: f32 = 0.8;

// edit knob bounds, matching what the original UI sliders allowed
const PITCH_RANGE: (f32, f32) = (0.1, 2.0);
const DECAY_RANGE: (f32, f32) = (0.05, 2.0);

pub struct Middle {
    pub pads: [Pad; NUM_PADS],
    pub grid: Grid,
    pub sequencer: Sequencer,
    volume: f32,
    selected_pad: usize,
    write_mode: bool,
    pulses: [f64; NUM_PADS], // seconds left on each pad's trigger light
    status: String,
}

impl Middle {
    pub fn with_kit(pads: [Pad; NUM_PADS]) -> Self {
        Self {
            pads,
            grid: empty_grid(),
            sequencer: Sequencer::new(),
            volume: DEFAULT_VOLUME,
            selected_pad: 0,
            write_mode: false,
            pulses: [0.0; NUM_PADS],
            status: String::new(),
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<AudioCommand> {
        match event {
            InputEvent::TriggerPad(n) => self.trigger(n as usize),
            InputEvent::ToggleStep(step) => {
                self.toggle_step(self.selected_pad, step as usize);
                vec![]
            }
            InputEvent::SelectPad(n) => {
                self.selected_pad = (n as usize).min(NUM_PADS - 1);
                vec![]
            }
            InputEvent::PlayPress => {
                self.sequencer.toggle();
                vec![]
            }
            InputEvent::WritePress => {
                self.write_mode = !self.write_mode;
                vec![]
            }
            InputEvent::ClearGrid => {
                self.clear();
                vec![]
            }
            InputEvent::LoadBeatPreset(i) => {
                self.load_beat_preset(i as usize);
                vec![]
            }
            InputEvent::LoadKitPreset(i) => {
                self.load_kit_preset(i as usize);
                vec![]
            }
            InputEvent::AdjustPitch(d) => {
                let pad = &mut self.pads[self.selected_pad];
                pad.pitch = (pad.pitch + d).clamp(PITCH_RANGE.0, PITCH_RANGE.1);
                vec![]
            }
            InputEvent::AdjustDecay(d) => {
                let pad = &mut self.pads[self.selected_pad];
                pad.decay = (pad.decay + d).clamp(DECAY_RANGE.0, DECAY_RANGE.1);
                vec![]
            }
            InputEvent::AdjustBpm(d) => {
                let bpm = (self.sequencer.bpm() as f32 + d).round().max(1.0) as u32;
                self.sequencer.set_bpm(bpm);
                vec![]
            }
            InputEvent::AdjustVolume(d) => {
                self.volume = (self.volume + d).clamp(0.0, 1.0);
                vec![AudioCommand::SetMasterVolume(self.volume)]
            }
            InputEvent::Quit => vec![],
        }
    }

    /// Fire one pad: light it for ~80ms and hand back the trigger command.
    fn trigger(&mut self, n: usize) -> Vec<AudioCommand> {
        if n >= NUM_PADS {
            return vec![];
        }
        self.pulses[n] = PAD_PULSE_SECS;
        vec![AudioCommand::Trigger(self.pads[n].trigger_params())]
    }

    pub fn toggle_step(&mut self, pad: usize, step: usize) {
        if pad < NUM_PADS && step < STEPS_PER_PATTERN {
            self.grid[pad][step] = !self.grid[pad][step];
        }
    }

    /// Blank the whole grid in one go. Transport state is untouched: the
    /// cursor keeps running (silently) if we're playing.
    pub fn clear(&mut self) {
        self.grid = empty_grid();
        self.status = "CLEARED".into();
    }

    /// Swap in a whole new grid + tempo at once, and start the transport if
    /// it isn't running. There is no intermediate state where only part of
    /// the grid has changed.
    pub fn load_pattern(&mut self, grid: Grid, bpm: u32) {
        self.grid = grid;
        self.sequencer.set_bpm(bpm);
        if !self.sequencer.is_playing() {
            self.sequencer.play();
        }
    }

    pub fn load_beat_preset(&mut self, i: usize) {
        let presets = presets::beat_presets();
        let Some(preset) = presets.get(i) else { return };
        self.load_pattern(preset.grid, preset.bpm);
        self.status = preset.label.to_uppercase();
        log::info!("loaded beat preset: {}", preset.label);
    }

    pub fn load_kit_preset(&mut self, i: usize) {
        let Some(preset) = KIT_PRESETS.get(i) else { return };
        self.pads = presets::tuned_kit(preset);
        self.status = preset.label.to_uppercase();
        log::info!("loaded kit preset: {}", preset.label);
    }

    /// Advance the clock by `elapsed` wall seconds and return the triggers
    /// due. Commands are returned even when audio is down; the caller's send
    /// degrades to a no-op there while the cursor keeps moving.
    pub fn tick(&mut self, elapsed: f64) -> Vec<AudioCommand> {
        for p in self.pulses.iter_mut() {
            *p = (*p - elapsed).max(0.0);
        }

        let fired = self.sequencer.tick(elapsed, &self.grid);
        let mut cmds = Vec::with_capacity(fired.len());
        for pad in fired {
            self.pulses[pad] = PAD_PULSE_SECS;
            cmds.push(AudioCommand::Trigger(self.pads[pad].trigger_params()));
        }
        cmds
    }

    pub fn display_state(&self) -> DisplayState {
        let mut step_leds = [LedState::Off; STEPS_PER_PATTERN];
        for (i, led) in step_leds.iter_mut().enumerate() {
            if self.grid[self.selected_pad][i] {
                *led = LedState::OnMedium;
            }
        }
        if self.sequencer.is_playing() {
            step_leds[self.sequencer.current_step()] = LedState::OnHigh;
        }

        let mut pads_lit = [false; NUM_PADS];
        for (i, p) in self.pulses.iter().enumerate() {
            pads_lit[i] = *p > 0.0;
        }

        let pad = &self.pads[self.selected_pad];
        DisplayState {
            step_leds,
            pads_lit,
            playing: self.sequencer.is_playing(),
            write_mode: self.write_mode,
            current_step: self.sequencer.current_step() as u8,
            bpm: self.sequencer.bpm(),
            volume: self.volume,
            selected_pad: self.selected_pad as u8,
            pad_label: pad.label.clone(),
            pad_kind: pad.kind.label(),
            pitch: pad.pitch,
            decay: pad.decay,
            status_text: self.status.clone(),
        }
    }
}
