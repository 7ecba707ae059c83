// RBJ cookbook biquads, direct form 1. Only the three responses the drum
// recipes actually use.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Lowpass,
    Highpass,
    Bandpass,
}

#[derive(Clone, Debug)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    pub fn new(mode: FilterMode, sample_rate: f32, freq_hz: f32, q: f32) -> Self {
        // corners above nyquist blow up the coefficients
        let freq = freq_hz.clamp(10.0, sample_rate * 0.45);
        let q = q.max(0.1);

        let w0 = std::f32::consts::TAU * freq / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q);

        let (b0, b1, b2) = match mode {
            FilterMode::Lowpass => {
                let b1 = 1.0 - cos_w0;
                (b1 / 2.0, b1, b1 / 2.0)
            }
            FilterMode::Highpass => {
                let b1 = -(1.0 + cos_w0);
                (-b1 / 2.0, b1, -b1 / 2.0)
            }
            FilterMode::Bandpass => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    fn rms_through(mut f: Biquad, freq: f32) -> f32 {
        let mut acc = 0.0;
        let n = 4096;
        for i in 0..n {
            let x = (std::f32::consts::TAU * freq * i as f32 / SR).sin();
            let y = f.process(x);
            if i >= n / 2 {
                acc += y * y; // skip the transient
            }
        }
        (acc / (n / 2) as f32).sqrt()
    }

    #[test]
    fn highpass_rejects_low_passes_high() {
        let low = rms_through(Biquad::new(FilterMode::Highpass, SR, 1000.0, 0.707), 100.0);
        let high = rms_through(Biquad::new(FilterMode::Highpass, SR, 1000.0, 0.707), 8000.0);
        assert!(low < 0.1);
        assert!(high > 0.5);
    }

    #[test]
    fn bandpass_peaks_at_center() {
        let center = rms_through(Biquad::new(FilterMode::Bandpass, SR, 2000.0, 1.0), 2000.0);
        let off = rms_through(Biquad::new(FilterMode::Bandpass, SR, 2000.0, 1.0), 200.0);
        assert!(center > off * 3.0);
    }

    #[test]
    fn silly_corner_values_stay_stable() {
        let mut f = Biquad::new(FilterMode::Lowpass, SR, 1_000_000.0, 0.0);
        for _ in 0..1000 {
            let y = f.process(1.0);
            assert!(y.is_finite());
        }
    }
}
