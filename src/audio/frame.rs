// The smallest unit of audio; one stereo frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn zero() -> Self {
        Self::default()
    }

    // The synth voices are mono; they land centered on the stereo bus.
    #[inline]
    pub fn add_mono(&mut self, s: f32) {
        self.left += s;
        self.right += s;
    }

    #[inline]
    pub fn scale(&mut self, g: f32) {
        self.left *= g;
        self.right *= g;
    }
}
