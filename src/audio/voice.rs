use super::env::Envelope;
use super::filter::Biquad;
use super::frame::StereoFrame;
use super::osc::Oscillator;

/// Widest recipe is the clap's three noise bursts.
pub const MAX_LAYERS: usize = 3;

#[derive(Clone, Debug)]
pub enum Source {
    Osc(Oscillator),
    /// Read cursor into the engine's shared noise buffer.
    Noise { pos: usize },
}

/// One generator -> optional filter -> envelope strand of a voice.
#[derive(Clone, Debug)]
pub struct Layer {
    pub delay: u32, // samples until this layer starts (clap retriggers)
    pub source: Source,
    pub filter: Option<Biquad>,
    pub env: Envelope,
    pub gain: f32,
}

impl Layer {
    pub fn new(source: Source, filter: Option<Biquad>, env: Envelope, gain: f32) -> Self {
        Self { delay: 0, source, filter, env, gain }
    }

    pub fn delayed(mut self, samples: u32) -> Self {
        self.delay = samples;
        self
    }
}

/// A single fire-and-forget hit: a fixed handful of layers mixed additively.
/// Once every layer's envelope has run out the voice flags itself inactive
/// and the engine pool reclaims the slot. There is no way to cancel one
/// mid-flight; the longest possible voice is a couple of seconds.
#[derive(Clone, Debug)]
pub struct Voice {
    layers: [Option<Layer>; MAX_LAYERS],
    pub active: bool,
}

impl Voice {
    pub fn new(layers: impl IntoIterator<Item = Layer>) -> Self {
        let mut slots: [Option<Layer>; MAX_LAYERS] = [None, None, None];
        let mut n = 0;
        for layer in layers.into_iter().take(MAX_LAYERS) {
            slots[n] = Some(layer);
            n += 1;
        }
        Self { layers: slots, active: n > 0 }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.iter().flatten().count()
    }

    /// Scheduled stop time relative to the trigger, in samples.
    pub fn lifetime_samples(&self) -> f32 {
        self.layers
            .iter()
            .flatten()
            .map(|l| l.delay as f32 + l.env.len())
            .fold(0.0, f32::max)
    }

    pub fn render_into(&mut self, out: &mut [StereoFrame], noise: &[f32]) {
        if !self.active {
            return;
        }

        for frame in out.iter_mut() {
            let mut sum = 0.0f32;
            for layer in self.layers.iter_mut().flatten() {
                if layer.delay > 0 {
                    layer.delay -= 1;
                    continue;
                }
                if layer.env.done() {
                    continue;
                }
                let mut s = match &mut layer.source {
                    Source::Osc(osc) => osc.next(),
                    Source::Noise { pos } => {
                        let s = noise
                            .get(*pos % noise.len().max(1))
                            .copied()
                            .unwrap_or(0.0);
                        *pos += 1;
                        s
                    }
                };
                if let Some(f) = &mut layer.filter {
                    s = f.process(s);
                }
                sum += s * layer.env.next() * layer.gain;
            }
            frame.add_mono(sum);
        }

        self.active = self
            .layers
            .iter()
            .flatten()
            .any(|l| l.delay > 0 || !l.env.done());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::osc::Waveform;

    const SR: f32 = 44100.0;

    #[test]
    fn voice_self_terminates_at_lifetime() {
        let osc = Oscillator::new(Waveform::Sine, SR, 150.0);
        let mut voice = Voice::new([Layer::new(
            Source::Osc(osc),
            None,
            Envelope::exp(SR, 1.0, 0.05),
            1.0,
        )]);
        let lifetime = voice.lifetime_samples() as usize;
        let noise = vec![0.0f32; 16];

        let mut rendered = 0usize;
        let mut block = vec![StereoFrame::zero(); 256];
        while voice.active {
            for f in block.iter_mut() {
                *f = StereoFrame::zero();
            }
            voice.render_into(&mut block, &noise);
            rendered += block.len();
            assert!(rendered <= lifetime + block.len(), "voice outlived its stop");
        }
    }

    #[test]
    fn delayed_layer_is_silent_until_delay_elapses() {
        let mut voice = Voice::new([Layer::new(
            Source::Noise { pos: 0 },
            None,
            Envelope::exp(SR, 1.0, 0.1),
            1.0,
        )
        .delayed(100)]);
        let noise = vec![0.5f32; 1024];

        let mut block = vec![StereoFrame::zero(); 100];
        voice.render_into(&mut block, &noise);
        assert!(block.iter().all(|f| f.left == 0.0));

        let mut block2 = vec![StereoFrame::zero(); 100];
        voice.render_into(&mut block2, &noise);
        assert!(block2.iter().any(|f| f.left != 0.0));
    }

    #[test]
    fn lifetime_covers_longest_layer() {
        let v = Voice::new([
            Layer::new(Source::Noise { pos: 0 }, None, Envelope::exp(SR, 1.0, 0.05), 1.0),
            Layer::new(Source::Noise { pos: 0 }, None, Envelope::exp(SR, 1.0, 0.2), 1.0),
        ]);
        assert!(v.lifetime_samples() >= 0.2 * SR);
        assert_eq!(v.layer_count(), 2);
    }
}
