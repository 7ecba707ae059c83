use crate::shared::{NUM_PADS, STEPS_PER_PATTERN};

/// The pattern: one row of 16 step flags per pad, indexed [pad][step].
/// Always replaced whole (preset load, clear), never resized.
pub type Grid = [[bool; STEPS_PER_PATTERN]; NUM_PADS];

pub fn empty_grid() -> Grid {
    [[false; STEPS_PER_PATTERN]; NUM_PADS]
}

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 300;
pub const DEFAULT_BPM: u32 = 120;

/// Two-state step clock: Stopped or Running. Driven by the frame loop with
/// wall-clock elapsed time; the accumulator keeps the fractional remainder so
/// the long-run rate is exact no matter how coarse or jittery the frames are.
/// Stopping freezes the cursor in place; Play resumes from there.
#[derive(Clone, Debug)]
pub struct Sequencer {
    playing: bool,
    bpm: u32,
    current_step: usize,
    acc: f64, // seconds accumulated toward the next tick
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            playing: false,
            bpm: DEFAULT_BPM,
            current_step: 0,
            acc: 0.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.acc = 0.0; // first tick lands one full interval from now
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing { self.stop() } else { self.play() }
    }

    /// Sixteenth-note interval at the current tempo: a quarter note is
    /// 60/bpm seconds, split into 4 steps.
    pub fn step_interval(&self) -> f64 {
        (60.0 / self.bpm as f64) / 4.0
    }

    /// Advance by `elapsed` wall seconds. Returns the pad indices due to
    /// fire, in step order (a slow frame can cover several steps). The
    /// interval is re-read from the live bpm at every firing, so a tempo
    /// edit mid-run applies to the very next tick and never retroactively.
    pub fn tick(&mut self, elapsed: f64, grid: &Grid) -> Vec<usize> {
        let mut fired = Vec::new();
        if !self.playing {
            return fired;
        }
        self.acc += elapsed;
        loop {
            let interval = self.step_interval();
            if self.acc < interval {
                break;
            }
            self.acc -= interval;
            self.current_step = (self.current_step + 1) % STEPS_PER_PATTERN;
            for (pad, row) in grid.iter().enumerate() {
                if row[self.current_step] {
                    fired.push(pad);
                }
            }
        }
        fired
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
