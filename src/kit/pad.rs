use serde::{Deserialize, Serialize};

use crate::audio_api::{InstrumentKind, MIN_DECAY, MIN_PITCH, TriggerParams};

/// One pad slot of the kit. The UI owns these; the synth only ever sees the
/// TriggerParams extracted at trigger time. `key` and `color` are advisory
/// (keyboard binding, pad tint) and carried through the blob untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub id: u8, // 1..=16
    pub key: char,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    pub pitch: f32,
    pub decay: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<f32>,
    pub color: String,
}

impl Pad {
    /// Synthesis parameters, already clamped to the positive floors.
    pub fn trigger_params(&self) -> TriggerParams {
        TriggerParams {
            kind: self.kind,
            pitch: self.pitch,
            decay: self.decay,
            tone: self.tone,
        }
        .normalized()
    }

    /// Fix up a descriptor that came in from the blob or the edit UI.
    pub fn normalize(&mut self) {
        if !(self.pitch > 0.0) {
            self.pitch = MIN_PITCH;
        }
        if !(self.decay > 0.0) {
            self.decay = MIN_DECAY;
        }
        if let Some(t) = self.tone {
            if !(t > 0.0) {
                self.tone = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> Pad {
        Pad {
            id: 1,
            key: 'z',
            label: "Kick Hard".into(),
            kind: InstrumentKind::Kick,
            pitch: 1.0,
            decay: 0.5,
            tone: None,
            color: "red".into(),
        }
    }

    #[test]
    fn normalize_floors_bad_values() {
        let mut p = pad();
        p.pitch = 0.0;
        p.decay = -1.0;
        p.tone = Some(f32::NAN);
        p.normalize();
        assert!(p.pitch > 0.0);
        assert!(p.decay > 0.0);
        assert_eq!(p.tone, None);
    }

    #[test]
    fn nan_pitch_is_also_floored() {
        let mut p = pad();
        p.pitch = f32::NAN;
        p.normalize();
        assert!(p.pitch > 0.0);
    }

    #[test]
    fn trigger_params_are_normalized() {
        let mut p = pad();
        p.decay = 0.0;
        let t = p.trigger_params();
        assert!(t.decay > 0.0);
        assert_eq!(t.kind, InstrumentKind::Kick);
    }

    #[test]
    fn serde_round_trip_is_field_for_field() {
        let mut p = pad();
        p.tone = Some(60.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: Pad = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn blob_uses_type_key_and_omits_unset_tone() {
        let json = serde_json::to_string(&pad()).unwrap();
        assert!(json.contains("\"type\":\"kick\""));
        assert!(!json.contains("tone"));
    }
}
