use super::frame::StereoFrame;

// Glue on the master bus so sixteen stacked voices don't clip the output.
// Fixed parameters, matching a bus limiter more than a musical compressor.
const THRESHOLD_DB: f32 = -24.0;
const RATIO: f32 = 12.0;
const ATTACK_SECS: f32 = 0.003;
const RELEASE_SECS: f32 = 0.25;

pub struct Compressor {
    attack_coef: f32,
    release_coef: f32,
    envelope: f32, // tracked peak level, linear
}

impl Compressor {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            attack_coef: 1.0 - (-1.0 / (ATTACK_SECS * sample_rate)).exp(),
            release_coef: 1.0 - (-1.0 / (RELEASE_SECS * sample_rate)).exp(),
            envelope: 0.0,
        }
    }

    fn gain_for(&mut self, level: f32) -> f32 {
        let coef = if level > self.envelope {
            self.attack_coef
        } else {
            self.release_coef
        };
        self.envelope += (level - self.envelope) * coef;

        if self.envelope <= 1e-6 {
            return 1.0;
        }
        let env_db = 20.0 * self.envelope.log10();
        if env_db <= THRESHOLD_DB {
            return 1.0;
        }
        let over_db = env_db - THRESHOLD_DB;
        let reduction_db = over_db * (1.0 - 1.0 / RATIO);
        10.0f32.powf(-reduction_db / 20.0)
    }

    pub fn process(&mut self, buf: &mut [StereoFrame]) {
        for f in buf.iter_mut() {
            let level = f.left.abs().max(f.right.abs());
            let g = self.gain_for(level);
            f.scale(g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    #[test]
    fn quiet_signal_passes_unity() {
        let mut comp = Compressor::new(SR);
        // -40 dB, well under threshold
        let mut buf = vec![StereoFrame { left: 0.01, right: 0.01 }; 4096];
        comp.process(&mut buf);
        let last = buf.last().unwrap();
        assert!((last.left - 0.01).abs() < 1e-4);
    }

    #[test]
    fn loud_signal_is_squashed() {
        let mut comp = Compressor::new(SR);
        let mut buf = vec![StereoFrame { left: 0.9, right: 0.9 }; 44100];
        comp.process(&mut buf);
        // after the attack settles, 0.9 (~-0.9 dB) should be pulled most of
        // the way back toward the -24 dB threshold
        let last = buf.last().unwrap();
        assert!(last.left < 0.2, "got {}", last.left);
        assert!(last.left > 0.0);
    }

    #[test]
    fn output_stays_finite_under_abuse() {
        let mut comp = Compressor::new(SR);
        let mut buf = vec![StereoFrame { left: 100.0, right: -100.0 }; 1024];
        comp.process(&mut buf);
        assert!(buf.iter().all(|f| f.left.is_finite() && f.right.is_finite()));
    }
}
