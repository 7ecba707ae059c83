/// Exponential envelopes decay toward this floor, never toward exact zero.
/// Hard contract shared with the oscillator sweeps.
pub const AMP_FLOOR: f32 = 0.01;

/// One-shot amplitude envelope: optional linear attack from 0 to `peak`,
/// then exponential decay from `peak` down to AMP_FLOOR. Reports `done`
/// once the decay has run its course so the voice pool can reclaim us.
#[derive(Clone, Debug)]
pub struct Envelope {
    peak: f32,
    attack_len: f32, // samples, 0 = start at peak
    decay_len: f32,  // samples
    t: f32,
}

impl Envelope {
    pub fn exp(sample_rate: f32, peak: f32, decay_secs: f32) -> Self {
        Self {
            peak: peak.max(0.0),
            attack_len: 0.0,
            decay_len: (decay_secs.max(0.001) * sample_rate).max(1.0),
            t: 0.0,
        }
    }

    /// Gate the onset with a short linear ramp so a burst doesn't start at a
    /// nonzero sample and click (the clap recipe needs this).
    pub fn with_attack(mut self, sample_rate: f32, attack_secs: f32) -> Self {
        self.attack_len = (attack_secs.max(0.0) * sample_rate).floor();
        self
    }

    pub fn done(&self) -> bool {
        self.t >= self.attack_len + self.decay_len
    }

    /// Total lifetime in samples.
    pub fn len(&self) -> f32 {
        self.attack_len + self.decay_len
    }

    pub fn next(&mut self) -> f32 {
        let gain = if self.t < self.attack_len {
            self.peak * (self.t / self.attack_len)
        } else if self.peak <= AMP_FLOOR {
            self.peak
        } else {
            let frac = ((self.t - self.attack_len) / self.decay_len).min(1.0);
            self.peak * (AMP_FLOOR / self.peak).powf(frac)
        };
        self.t += 1.0;
        gain
    }
}
