pub use crate::audio::recipes::InstrumentKind;

/// Smallest pitch multiplier / decay we'll synthesize with. Zero or negative
/// values are meaningless to the exponential ramps, so everything crossing
/// into the synth gets clamped to these.
pub const MIN_PITCH: f32 = 0.01;
pub const MIN_DECAY: f32 = 0.01;

/// Everything a recipe needs to build one hit, pulled out of a pad
/// descriptor at trigger time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerParams {
    pub kind: InstrumentKind,
    pub pitch: f32,
    pub decay: f32,
    /// Recipe-dependent base frequency override; None = the recipe default.
    pub tone: Option<f32>,
}

impl TriggerParams {
    pub fn normalized(&self) -> Self {
        Self {
            kind: self.kind,
            pitch: if self.pitch > 0.0 { self.pitch } else { MIN_PITCH },
            decay: if self.decay > 0.0 { self.decay } else { MIN_DECAY },
            tone: self.tone.filter(|t| *t > 0.0),
        }
    }
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    /// Fire one voice now (next render block).
    Trigger(TriggerParams),
    /// Master gain scalar, 0..=1. Read live by in-flight voices since it sits
    /// on the bus, not in the voice.
    SetMasterVolume(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_floors_nonpositive_values() {
        let p = TriggerParams {
            kind: InstrumentKind::Kick,
            pitch: -2.0,
            decay: 0.0,
            tone: Some(-10.0),
        };
        let n = p.normalized();
        assert!(n.pitch > 0.0);
        assert!(n.decay > 0.0);
        assert_eq!(n.tone, None);
    }

    #[test]
    fn normalization_leaves_valid_values_alone() {
        let p = TriggerParams {
            kind: InstrumentKind::Tom,
            pitch: 1.2,
            decay: 0.3,
            tone: Some(220.0),
        };
        assert_eq!(p.normalized(), p);
    }
}
