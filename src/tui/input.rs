use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::shared::InputEvent;

use super::mode::TuiState;

// Poll for input, track held modifiers in TuiState, and resolve key combos
// into semantic events for the middle layer. Lowercase = modifier down,
// shifted = modifier up (works even without press/release reporting).
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code, ts));
    }
    Ok(vec![])
}

fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::PlayPress],
        KeyCode::Char('t') => vec![InputEvent::WritePress],
        KeyCode::Char('0') => vec![InputEvent::ClearGrid],

        // any keys on the 4x4 grid pad
        KeyCode::Char(
            c @ ('1' | '2' | '3' | '4'
            | 'q' | 'w' | 'e' | 'r'
            | 'a' | 's' | 'd' | 'f'
            | 'z' | 'x' | 'c' | 'v'),
        ) => match char_to_pad(c) {
            Some(n) => resolve_grid(n, ts),
            None => vec![],
        },

        // held modifiers
        KeyCode::Char('g') => { ts.pad_select_held = true; vec![] }
        KeyCode::Char('G') => { ts.pad_select_held = false; vec![] }
        KeyCode::Char('b') => { ts.beat_held = true; vec![] }
        KeyCode::Char('B') => { ts.beat_held = false; vec![] }
        KeyCode::Char('k') => { ts.kit_held = true; vec![] }
        KeyCode::Char('K') => { ts.kit_held = false; vec![] }
        KeyCode::Char('n') => { ts.bpm_held = true; vec![] }
        KeyCode::Char('N') => { ts.bpm_held = false; vec![] }

        // knobs
        KeyCode::Char('[') => resolve_knob_a(-1.0, ts),
        KeyCode::Char(']') => resolve_knob_a(1.0, ts),
        KeyCode::Char('-') => resolve_knob_b(-1.0, ts),
        KeyCode::Char('=') => resolve_knob_b(1.0, ts),

        _ => vec![],
    }
}

// resolve grid keypresses based on held state
fn resolve_grid(n: u8, ts: &TuiState) -> Vec<InputEvent> {
    if ts.pad_select_held {
        return vec![InputEvent::SelectPad(n)];
    }
    if ts.beat_held {
        return vec![InputEvent::LoadBeatPreset(n)]; // only 0-5 exist; extras ignored downstream
    }
    if ts.kit_held {
        return vec![InputEvent::LoadKitPreset(n)];
    }
    if ts.write_mode && !ts.playing {
        // write mode: the grid edits the selected pad's row
        return vec![InputEvent::ToggleStep(n)];
    }
    vec![InputEvent::TriggerPad(n)]
}

// knob a: bpm while n is held, otherwise pitch of the selected pad
fn resolve_knob_a(dir: f32, ts: &TuiState) -> Vec<InputEvent> {
    if ts.bpm_held {
        return vec![InputEvent::AdjustBpm(dir * 5.0)];
    }
    vec![InputEvent::AdjustPitch(dir * 0.1)]
}

// knob b: master volume while n is held, otherwise decay of the selected pad
fn resolve_knob_b(dir: f32, ts: &TuiState) -> Vec<InputEvent> {
    if ts.bpm_held {
        return vec![InputEvent::AdjustVolume(dir * 0.05)];
    }
    vec![InputEvent::AdjustDecay(dir * 0.05)]
}

// convert char to pad index
fn char_to_pad(c: char) -> Option<u8> {
    let idx = match c {
        '1' => 0, '2' => 1, '3' => 2, '4' => 3,
        'q' => 4, 'w' => 5, 'e' => 6, 'r' => 7,
        'a' => 8, 's' => 9, 'd' => 10, 'f' => 11,
        'z' => 12, 'x' => 13, 'c' => 14, 'v' => 15,
        _ => return None,
    };
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_key_triggers_pad_by_default() {
        let mut ts = TuiState::default();
        assert_eq!(handle_key(KeyCode::Char('z'), &mut ts), vec![InputEvent::TriggerPad(12)]);
    }

    #[test]
    fn held_g_selects_instead_of_triggering() {
        let mut ts = TuiState::default();
        handle_key(KeyCode::Char('g'), &mut ts);
        assert_eq!(handle_key(KeyCode::Char('1'), &mut ts), vec![InputEvent::SelectPad(0)]);
        handle_key(KeyCode::Char('G'), &mut ts);
        assert_eq!(handle_key(KeyCode::Char('1'), &mut ts), vec![InputEvent::TriggerPad(0)]);
    }

    #[test]
    fn write_mode_stopped_resolves_to_step_toggle() {
        let mut ts = TuiState { write_mode: true, playing: false, ..Default::default() };
        assert_eq!(handle_key(KeyCode::Char('q'), &mut ts), vec![InputEvent::ToggleStep(4)]);
        // while playing the grid goes back to live triggering
        ts.playing = true;
        assert_eq!(handle_key(KeyCode::Char('q'), &mut ts), vec![InputEvent::TriggerPad(4)]);
    }

    #[test]
    fn bpm_hold_reroutes_both_knobs() {
        let mut ts = TuiState::default();
        handle_key(KeyCode::Char('n'), &mut ts);
        assert_eq!(handle_key(KeyCode::Char(']'), &mut ts), vec![InputEvent::AdjustBpm(5.0)]);
        assert_eq!(
            handle_key(KeyCode::Char('-'), &mut ts),
            vec![InputEvent::AdjustVolume(-0.05)]
        );
    }
}
