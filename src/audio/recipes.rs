// One recipe per instrument family. Constants follow the classic analog-box
// conventions: kicks and toms are pitch sweeps, snares are noise over a tonal
// body, hats and crashes are filtered noise, claps are retriggered bursts.

use serde::{Deserialize, Serialize};

use super::env::Envelope;
use super::filter::{Biquad, FilterMode};
use super::noise::random_offset;
use super::osc::{FREQ_FLOOR, Oscillator, Waveform};
use super::voice::{Layer, Source, Voice};
use crate::audio_api::TriggerParams;

/// Closed tag replacing the original's free-form type strings. A kit blob
/// referencing a type we don't know lands on `Unknown`, which still renders
/// (a generic tone sweep) so a misconfigured pad is audible, not silent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Kick,
    #[serde(rename = "808")]
    Bass808,
    Snare,
    #[serde(rename = "hihat")]
    HatClosed,
    #[serde(rename = "openhat")]
    HatOpen,
    Tom,
    Clap,
    Crash,
    #[serde(rename = "fx")]
    Laser,
    Cowbell,
    #[serde(other)]
    Unknown,
}

impl InstrumentKind {
    pub fn label(self) -> &'static str {
        match self {
            InstrumentKind::Kick => "KICK",
            InstrumentKind::Bass808 => "808",
            InstrumentKind::Snare => "SNARE",
            InstrumentKind::HatClosed => "HIHAT",
            InstrumentKind::HatOpen => "OPENHAT",
            InstrumentKind::Tom => "TOM",
            InstrumentKind::Clap => "CLAP",
            InstrumentKind::Crash => "CRASH",
            InstrumentKind::Laser => "FX",
            InstrumentKind::Cowbell => "COWBELL",
            InstrumentKind::Unknown => "???",
        }
    }
}

// Closed hats ignore the stored decay entirely.
const CLOSED_HAT_DECAY: f32 = 0.08;
// Snare's tonal body rings for a fixed beat regardless of the noise tail.
const SNARE_BODY_DECAY: f32 = 0.15;

/// Build the one-shot voice for a trigger. Parameters are re-clamped here so
/// an exponential ramp can never be asked to hit zero, whatever the caller
/// sends.
pub fn build(params: &TriggerParams, sample_rate: f32, noise_len: usize) -> Voice {
    let p = params.normalized();
    let pitch = p.pitch;
    let decay = p.decay;
    let sr = sample_rate;

    let noise_layer = |filter: Biquad, env: Envelope, gain: f32| {
        Layer::new(
            Source::Noise { pos: random_offset(noise_len) },
            Some(filter),
            env,
            gain,
        )
    };

    match p.kind {
        InstrumentKind::Kick => {
            let body = Layer::new(
                Source::Osc(
                    Oscillator::new(Waveform::Sine, sr, 150.0 * pitch)
                        .with_sweep(FREQ_FLOOR, decay),
                ),
                None,
                Envelope::exp(sr, 1.0, decay),
                1.0,
            );
            // short transient on top for attack punch
            let click = Layer::new(
                Source::Osc(
                    Oscillator::new(Waveform::Sine, sr, 600.0 * pitch).with_sweep(100.0, 0.02),
                ),
                None,
                Envelope::exp(sr, 0.4, 0.02),
                1.0,
            );
            Voice::new([body, click])
        }
        InstrumentKind::Bass808 => {
            let base = p.tone.unwrap_or(55.0);
            Voice::new([Layer::new(
                Source::Osc(
                    Oscillator::new(Waveform::Sine, sr, base * pitch)
                        .with_sweep(FREQ_FLOOR, decay),
                ),
                None,
                Envelope::exp(sr, 1.0, decay),
                1.0,
            )])
        }
        InstrumentKind::Snare => {
            let rattle = noise_layer(
                Biquad::new(FilterMode::Highpass, sr, 1000.0 * pitch, 0.707),
                Envelope::exp(sr, 1.0, decay),
                1.0,
            );
            let body_freq = p.tone.unwrap_or(100.0);
            let body = Layer::new(
                Source::Osc(Oscillator::new(Waveform::Triangle, sr, body_freq * pitch)),
                None,
                Envelope::exp(sr, 0.7, SNARE_BODY_DECAY),
                1.0,
            );
            Voice::new([rattle, body])
        }
        InstrumentKind::HatClosed => Voice::new([noise_layer(
            Biquad::new(FilterMode::Bandpass, sr, 10_000.0 * pitch, 1.0),
            Envelope::exp(sr, 0.8, CLOSED_HAT_DECAY),
            1.0,
        )]),
        InstrumentKind::HatOpen => Voice::new([noise_layer(
            Biquad::new(FilterMode::Bandpass, sr, 10_000.0 * pitch, 1.0),
            Envelope::exp(sr, 0.6, decay),
            1.0,
        )]),
        InstrumentKind::Crash => Voice::new([noise_layer(
            Biquad::new(FilterMode::Highpass, sr, 7_000.0 * pitch, 0.707),
            Envelope::exp(sr, 0.5, decay),
            1.0,
        )]),
        InstrumentKind::Tom => {
            let start = p.tone.unwrap_or(200.0) * pitch;
            Voice::new([Layer::new(
                Source::Osc(
                    Oscillator::new(Waveform::Sine, sr, start).with_sweep(start.min(100.0), decay),
                ),
                None,
                Envelope::exp(sr, 1.0, decay),
                1.0,
            )])
        }
        InstrumentKind::Clap => {
            // three bursts ~30ms apart; each gated with a short attack so the
            // retriggers don't start on a nonzero sample and click
            let burst = |delay_secs: f32| {
                noise_layer(
                    Biquad::new(FilterMode::Bandpass, sr, 1500.0 * pitch, 1.0),
                    Envelope::exp(sr, 0.5, 0.05).with_attack(sr, 0.01),
                    1.0,
                )
                .delayed((delay_secs * sr) as u32)
            };
            Voice::new([burst(0.0), burst(0.03), burst(0.06)])
        }
        InstrumentKind::Laser => Voice::new([Layer::new(
            Source::Osc(
                Oscillator::new(Waveform::Saw, sr, 800.0 * pitch).with_sweep(100.0, decay),
            ),
            None,
            Envelope::exp(sr, 0.5, decay),
            1.0,
        )]),
        InstrumentKind::Cowbell => {
            let base = p.tone.unwrap_or(540.0) * pitch;
            // the 1.0/1.5 pair beating against each other is the metal
            let partial = |ratio: f32| {
                Layer::new(
                    Source::Osc(Oscillator::new(Waveform::Square, sr, base * ratio)),
                    Some(Biquad::new(FilterMode::Bandpass, sr, base * 1.2, 3.0)),
                    Envelope::exp(sr, 0.4, decay),
                    1.0,
                )
            };
            Voice::new([partial(1.0), partial(1.5)])
        }
        InstrumentKind::Unknown => Voice::new([Layer::new(
            Source::Osc(
                Oscillator::new(Waveform::Sine, sr, 400.0 * pitch).with_sweep(100.0, decay),
            ),
            None,
            Envelope::exp(sr, 0.5, decay),
            1.0,
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    fn params(kind: InstrumentKind, decay: f32) -> TriggerParams {
        TriggerParams { kind, pitch: 1.0, decay, tone: None }
    }

    #[test]
    fn layer_counts_are_fixed_per_recipe() {
        let cases = [
            (InstrumentKind::Kick, 2),
            (InstrumentKind::Bass808, 1),
            (InstrumentKind::Snare, 2),
            (InstrumentKind::HatClosed, 1),
            (InstrumentKind::HatOpen, 1),
            (InstrumentKind::Tom, 1),
            (InstrumentKind::Clap, 3),
            (InstrumentKind::Crash, 1),
            (InstrumentKind::Laser, 1),
            (InstrumentKind::Cowbell, 2),
            (InstrumentKind::Unknown, 1),
        ];
        for (kind, expected) in cases {
            let v = build(&params(kind, 0.5), SR, 1024);
            assert_eq!(v.layer_count(), expected, "{kind:?}");
        }
    }

    #[test]
    fn every_voice_stops_within_decay_plus_epsilon() {
        // fixed-length side layers (snare body, clap spread) fit inside this
        let epsilon = 0.21;
        let decay = 0.5;
        for kind in [
            InstrumentKind::Kick,
            InstrumentKind::Bass808,
            InstrumentKind::Snare,
            InstrumentKind::HatClosed,
            InstrumentKind::HatOpen,
            InstrumentKind::Tom,
            InstrumentKind::Clap,
            InstrumentKind::Crash,
            InstrumentKind::Laser,
            InstrumentKind::Cowbell,
            InstrumentKind::Unknown,
        ] {
            let v = build(&params(kind, decay), SR, 1024);
            assert!(
                v.lifetime_samples() <= (decay + epsilon) * SR,
                "{kind:?} outlives its hit"
            );
        }
    }

    #[test]
    fn closed_hat_ignores_stored_decay() {
        let long = build(&params(InstrumentKind::HatClosed, 2.0), SR, 1024);
        assert!(long.lifetime_samples() <= 0.1 * SR);
    }

    #[test]
    fn nonpositive_params_still_build_a_live_voice() {
        let p = TriggerParams {
            kind: InstrumentKind::Kick,
            pitch: -1.0,
            decay: 0.0,
            tone: None,
        };
        let v = build(&p, SR, 1024);
        assert!(v.active);
        assert!(v.lifetime_samples() > 0.0);
    }

    #[test]
    fn snare_tone_defaults_when_unset() {
        // must not degenerate to a zero/undefined body frequency
        let v = build(&params(InstrumentKind::Snare, 0.2), SR, 1024);
        assert_eq!(v.layer_count(), 2);
        assert!(v.active);
    }

    #[test]
    fn unknown_type_string_falls_back() {
        let kind: InstrumentKind = serde_json::from_str("\"wobble\"").unwrap();
        assert_eq!(kind, InstrumentKind::Unknown);
        let v = build(&params(kind, 0.3), SR, 1024);
        assert_eq!(v.layer_count(), 1);
    }

    #[test]
    fn kind_round_trips_through_serde() {
        for kind in [
            InstrumentKind::Kick,
            InstrumentKind::Bass808,
            InstrumentKind::HatClosed,
            InstrumentKind::Laser,
            InstrumentKind::Cowbell,
        ] {
            let s = serde_json::to_string(&kind).unwrap();
            let back: InstrumentKind = serde_json::from_str(&s).unwrap();
            assert_eq!(kind, back);
        }
    }
}
