// Static configuration: the stock kit, the beat presets, and the kit tuning
// presets. All tables, no logic worth speaking of.

use crate::audio_api::InstrumentKind;
use crate::sequencer::{Grid, empty_grid};
use crate::shared::{NUM_PADS, STEPS_PER_PATTERN};

use super::pad::Pad;

fn pad(
    id: u8,
    key: char,
    label: &str,
    kind: InstrumentKind,
    pitch: f32,
    decay: f32,
    tone: Option<f32>,
    color: &str,
) -> Pad {
    Pad {
        id,
        key,
        label: label.to_string(),
        kind,
        pitch,
        decay,
        tone,
        color: color.to_string(),
    }
}

/// The compiled-in default kit; also the fallback when the saved blob is
/// unreadable.
pub fn default_kit() -> [Pad; NUM_PADS] {
    use InstrumentKind::*;
    [
        // row 1
        pad(1, '1', "Crash", Crash, 1.0, 0.5, None, "yellow"),
        pad(2, '2', "Ride", HatOpen, 0.8, 0.4, None, "yellow"),
        pad(3, '3', "Open Hat", HatOpen, 1.0, 0.3, None, "amber"),
        pad(4, '4', "Hi-Hat", HatClosed, 1.0, 0.1, None, "amber"),
        // row 2
        pad(5, 'q', "High Tom", Tom, 1.2, 0.3, None, "cyan"),
        pad(6, 'w', "Mid Tom", Tom, 1.0, 0.3, None, "cyan"),
        pad(7, 'e', "Low Tom", Tom, 0.8, 0.4, None, "blue"),
        pad(8, 'r', "Clap", Clap, 1.0, 0.2, None, "pink"),
        // row 3
        pad(9, 'a', "Snare 1", Snare, 1.0, 0.2, None, "fuchsia"),
        pad(10, 's', "Snare 2", Snare, 1.2, 0.15, None, "fuchsia"),
        pad(11, 'd', "Cowbell", Cowbell, 1.0, 0.3, None, "purple"),
        pad(12, 'f', "Zap", Laser, 1.0, 0.3, None, "emerald"),
        // row 4
        pad(13, 'z', "Kick Hard", Kick, 1.0, 0.5, None, "red"),
        pad(14, 'x', "Kick Soft", Kick, 1.2, 0.4, None, "red"),
        pad(15, 'c', "Sub 808", Bass808, 1.0, 0.8, Some(55.0), "rose"),
        pad(16, 'v', "Laser", Laser, 1.5, 0.5, None, "green"),
    ]
}

pub struct BeatPreset {
    pub label: &'static str,
    pub bpm: u32,
    pub grid: Grid,
}

fn steps(active: &[usize]) -> [bool; STEPS_PER_PATTERN] {
    let mut row = [false; STEPS_PER_PATTERN];
    for &s in active {
        row[s] = true;
    }
    row
}

/// Six canned grooves. Rows are 0-based pad indices into the default kit.
pub fn beat_presets() -> Vec<BeatPreset> {
    let mut house = empty_grid();
    house[12] = steps(&[0, 4, 8, 12]); // kick
    house[2] = steps(&[2, 6, 10, 14]); // open hat
    house[7] = steps(&[4, 12]); // clap
    house[3] = steps(&[0, 2, 4, 6, 8, 10, 12, 14]); // hi-hat

    let mut hiphop = empty_grid();
    hiphop[12] = steps(&[0, 3, 6, 10, 13]);
    hiphop[8] = steps(&[4, 12]); // snare
    hiphop[3] = steps(&[0, 2, 4, 6, 8, 10, 12, 14, 15]);

    let mut trap = empty_grid();
    trap[14] = steps(&[0, 6, 12]); // sub bass
    trap[9] = steps(&[4, 12]); // snare 2
    trap[3] = steps(&[0, 1, 2, 4, 5, 6, 8, 9, 10, 11, 12, 14, 15]); // fast hats
    trap[10] = steps(&[2, 6, 10, 14]); // cowbell tick

    let mut reggaeton = empty_grid();
    reggaeton[12] = steps(&[0, 4, 8, 12]);
    reggaeton[8] = steps(&[3, 6, 11, 14]); // dem bow snare
    reggaeton[3] = steps(&(0..16).collect::<Vec<_>>()); // shaker

    let mut dnb = empty_grid();
    dnb[12] = steps(&[0, 10]);
    dnb[8] = steps(&[4, 12]);
    dnb[1] = steps(&[0, 2, 3, 5, 6, 8, 10, 11, 13, 14]); // ride

    let mut lofi = empty_grid();
    lofi[13] = steps(&[0, 7, 10]); // soft kick
    lofi[10] = steps(&[4, 12, 15]); // cowbell in place of a rim
    lofi[3] = steps(&[1, 3, 5, 7, 9, 11, 13, 15]);

    vec![
        BeatPreset { label: "House / Techno", bpm: 128, grid: house },
        BeatPreset { label: "Classic Hip Hop", bpm: 90, grid: hiphop },
        BeatPreset { label: "Trap / Drill", bpm: 140, grid: trap },
        BeatPreset { label: "Reggaeton", bpm: 96, grid: reggaeton },
        BeatPreset { label: "Drum & Bass", bpm: 174, grid: dnb },
        BeatPreset { label: "Lo-Fi Chill", bpm: 80, grid: lofi },
    ]
}

pub struct KitPreset {
    pub label: &'static str,
    pub pitch_mul: f32,
    pub decay_mul: f32,
}

/// Relative tunings applied over the default kit's values.
pub const KIT_PRESETS: [KitPreset; 5] = [
    KitPreset { label: "Default Kit", pitch_mul: 1.0, decay_mul: 1.0 },
    KitPreset { label: "Tight / Funk", pitch_mul: 1.3, decay_mul: 0.2 },
    KitPreset { label: "Deep / Dark", pitch_mul: 0.7, decay_mul: 0.8 },
    KitPreset { label: "8-Bit / Chip", pitch_mul: 1.8, decay_mul: 0.1 },
    KitPreset { label: "Industrial", pitch_mul: 0.5, decay_mul: 0.2 },
];

/// A tuned copy of the default kit. Always derived from the defaults, not the
/// current pads, so repeated loads don't drift.
pub fn tuned_kit(preset: &KitPreset) -> [Pad; NUM_PADS] {
    let mut pads = default_kit();
    for p in pads.iter_mut() {
        p.pitch *= preset.pitch_mul;
        p.decay *= preset.decay_mul;
        p.normalize();
    }
    pads
}
