/// A frame-based spinner animation.
///
/// The animation scheduler calls [`Spinner::tick`] once per interval and the
/// renderer reads [`Spinner::frame`] for the current glyph. The index always
/// stays within the frame sequence.
///
/// ```rust,ignore
/// let mut spinner = Spinner::dots(); // ⠋ ⠙ ⠹ ...
/// spinner.tick();
/// write!(f, "{} working...", spinner.frame())?;
/// ```
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    index: usize,
}

impl Spinner {
    /// Braille dot spinner (the most common choice).
    pub fn dots() -> Self {
        Self {
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            index: 0,
        }
    }

    /// Classic line spinner.
    pub fn line() -> Self {
        Self {
            frames: &["|", "/", "-", "\\"],
            index: 0,
        }
    }

    /// Arrow spinner.
    pub fn arrow() -> Self {
        Self {
            frames: &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
            index: 0,
        }
    }

    /// Custom frames. An empty sequence falls back to [`Spinner::dots`].
    pub fn custom(frames: &'static [&'static str]) -> Self {
        if frames.is_empty() {
            return Self::dots();
        }
        Self { frames, index: 0 }
    }

    /// Advance to the next frame.
    pub fn tick(&mut self) {
        self.index = (self.index + 1) % self.frames.len();
    }

    /// Current frame string.
    pub fn frame(&self) -> &'static str {
        self.frames[self.index]
    }

    /// The full frame sequence.
    pub fn frames(&self) -> &'static [&'static str] {
        self.frames
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::dots()
    }
}

impl std::fmt::Display for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.frame())
    }
}
