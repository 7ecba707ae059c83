// State local to the TUI: which modifier keys are held, mirrored flags from
// the display state. This is what turns raw keys into semantic InputEvents.
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    // held modifiers, lowercase = down and shifted = up
    pub pad_select_held: bool, // g
    pub beat_held: bool,       // b
    pub kit_held: bool,        // k
    pub bpm_held: bool,        // n
    // synced from DisplayState each frame
    pub write_mode: bool,
    pub playing: bool,
}
