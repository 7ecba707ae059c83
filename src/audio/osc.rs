/// Exponential ramps toward zero are undefined, so every sweep target gets
/// floored here. Same floor the amplitude envelopes use.
pub const FREQ_FLOOR: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Saw,
}

/// Single-use periodic generator. Frequency either stays fixed or follows an
/// exponential sweep from `start_hz` to `end_hz` over `sweep_len` samples,
/// holding the end value afterwards.
#[derive(Clone, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    sample_rate: f32,
    phase: f32, // 0..1
    start_hz: f32,
    ratio: f32,     // end_hz / start_hz
    sweep_len: f32, // samples
    t: f32,         // samples elapsed
}

impl Oscillator {
    pub fn new(waveform: Waveform, sample_rate: f32, freq_hz: f32) -> Self {
        let start_hz = freq_hz.max(FREQ_FLOOR);
        Self {
            waveform,
            sample_rate,
            phase: 0.0,
            start_hz,
            ratio: 1.0,
            sweep_len: 1.0,
            t: 0.0,
        }
    }

    pub fn with_sweep(mut self, end_hz: f32, secs: f32) -> Self {
        let end = end_hz.max(FREQ_FLOOR);
        let len = (secs.max(0.001) * self.sample_rate).max(1.0);
        self.ratio = end / self.start_hz;
        self.sweep_len = len;
        self
    }

    fn current_freq(&self) -> f32 {
        if self.ratio == 1.0 {
            return self.start_hz;
        }
        let frac = (self.t / self.sweep_len).min(1.0);
        self.start_hz * self.ratio.powf(frac)
    }

    pub fn next(&mut self) -> f32 {
        let sample = match self.waveform {
            Waveform::Sine => (self.phase * std::f32::consts::TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(), // -1 at 0, +1 at 0.5
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * self.phase - 1.0,
        };

        self.phase += self.current_freq() / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.t += 1.0;

        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_target_is_floored() {
        // a ramp "to zero" must land on the epsilon, not 0
        let mut osc = Oscillator::new(Waveform::Sine, 44100.0, 150.0).with_sweep(0.0, 0.5);
        for _ in 0..44100 {
            osc.next();
        }
        assert!((osc.current_freq() - FREQ_FLOOR).abs() < 1e-3);
    }

    #[test]
    fn fixed_freq_sine_period() {
        // 441 Hz at 44100 -> exactly 100 samples per cycle
        let mut osc = Oscillator::new(Waveform::Sine, 44100.0, 441.0);
        let first = osc.next();
        for _ in 0..99 {
            osc.next();
        }
        let wrapped = osc.next();
        assert!((first - wrapped).abs() < 1e-3);
    }

    #[test]
    fn nonpositive_start_is_floored() {
        let osc = Oscillator::new(Waveform::Saw, 44100.0, -5.0);
        assert_eq!(osc.current_freq(), FREQ_FLOOR);
    }
}
