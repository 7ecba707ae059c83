// Input plan for the 4x4 pad build:
//
// Grid buttons (the 16 pads):
//   1 2 3 4       //  pads 0..4
//   q w e r       //  pads 4..8
//   a s d f       //  pads 8..12
//   z x c v       //  pads 12..16
//
// Modifier buttons:
//   g (hold)      //  + grid = select pad for editing / step writing
//   b (hold)      //  + grid 1-6 = load a beat preset
//   k (hold)      //  + grid 1-5 = load a kit tuning preset
//   n (hold)      //  + knobs = bpm / master volume
//   t             //  toggle write mode (grid toggles steps instead of playing)
//   Space         //  play / stop
//   0             //  clear the whole pattern
//
// Knobs:
//   [ / ]         //  knob A (pitch of selected pad; bpm while n held)
//   - / =         //  knob B (decay of selected pad; volume while n held)
//
// Quit:
//   Esc
//
// Rendering: the middle layer owns all sequencer and kit state; the TUI just
// renders a DisplayState snapshot every frame (step LEDs, lit pads, bpm text,
// selected pad params) and resolves raw keys into the semantic InputEvents
// below.

pub const NUM_PADS: usize = 16;
pub const STEPS_PER_PATTERN: usize = 16;

/// How long a triggered pad stays lit in the UI, seconds.
pub const PAD_PULSE_SECS: f64 = 0.08;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // resolved grid events
    TriggerPad(u8),     // default: play the pad live
    ToggleStep(u8),     // write mode: flip a step of the selected pad
    SelectPad(u8),      // held g + grid
    LoadBeatPreset(u8), // held b + grid (0-5)
    LoadKitPreset(u8),  // held k + grid (0-4)

    // transport / pattern
    PlayPress,
    WritePress,
    ClearGrid,

    // resolved knob events
    AdjustPitch(f32),
    AdjustDecay(f32),
    AdjustBpm(f32),
    AdjustVolume(f32),

    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedState {
    Off,
    OnMedium, // step is armed
    OnHigh,   // step cursor is here
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub step_leds: [LedState; STEPS_PER_PATTERN], // selected pad's row
    pub pads_lit: [bool; NUM_PADS],               // ~80ms trigger pulses
    pub playing: bool,
    pub write_mode: bool,
    pub current_step: u8,
    pub bpm: u32,
    pub volume: f32,
    pub selected_pad: u8,
    pub pad_label: String,
    pub pad_kind: &'static str,
    pub pitch: f32,
    pub decay: f32,
    pub status_text: String, // last preset/kit loaded, audio warnings
}
