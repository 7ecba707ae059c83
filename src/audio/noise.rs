use std::sync::Arc;

use rand::Rng;

/// Seconds of shared white noise. Every noise-based voice reads from the same
/// buffer (at a random start offset) instead of generating its own samples,
/// which is what the voices would otherwise burn time on per trigger.
pub const NOISE_SECS: usize = 2;

/// Generate the shared buffer once, off the audio thread, at engine startup.
/// Immutable afterwards, so voices can read it concurrently without locking.
pub fn make_noise_buffer(sample_rate: u32) -> Arc<Vec<f32>> {
    let mut rng = rand::thread_rng();
    let len = sample_rate as usize * NOISE_SECS;
    let mut buf = Vec::with_capacity(len);
    for _ in 0..len {
        buf.push(rng.gen_range(-1.0f32..1.0));
    }
    Arc::new(buf)
}

/// Random start offset for a voice, leaving headroom so short reads never
/// need to wrap.
pub fn random_offset(buf_len: usize) -> usize {
    if buf_len == 0 {
        return 0;
    }
    rand::thread_rng().gen_range(0..buf_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_two_seconds_in_range() {
        let buf = make_noise_buffer(8000);
        assert_eq!(buf.len(), 16000);
        assert!(buf.iter().all(|s| (-1.0..1.0).contains(s)));
    }

    #[test]
    fn offset_is_in_bounds() {
        for _ in 0..100 {
            assert!(random_offset(100) < 100);
        }
        assert_eq!(random_offset(0), 0);
    }
}
