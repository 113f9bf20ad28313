/// A configurable progress bar renderer.
///
/// ```rust,ignore
/// let bar = ProgressBar::new(45.0, 100.0).width(30);
/// writeln!(f, "{bar} {:>3}%", bar.percentage().round())?;
/// // => ██████████████░░░░░░░░░░░░░░░░  45%
/// ```
pub struct ProgressBar {
    current: f64,
    total: f64,
    width: usize,
    filled: char,
    empty: char,
}

impl ProgressBar {
    pub fn new(current: f64, total: f64) -> Self {
        Self {
            current,
            total,
            width: 40,
            filled: '█',
            empty: '░',
        }
    }

    pub fn width(mut self, w: usize) -> Self {
        self.width = w;
        self
    }

    pub fn chars(mut self, filled: char, empty: char) -> Self {
        self.filled = filled;
        self.empty = empty;
        self
    }

    /// Completion ratio clamped to `[0, 1]`. A non-positive total yields `0`.
    pub fn ratio(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.current / self.total).clamp(0.0, 1.0)
    }

    /// Completion percentage clamped to `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Splits the width into `(completed, remaining)` segment counts.
    /// The two always sum to the configured width.
    pub fn segments(&self) -> (usize, usize) {
        // Round half away from zero, matching how percentages are displayed.
        let completed = ((self.percentage() / 100.0) * self.width as f64).round() as usize;
        let completed = completed.min(self.width);
        (completed, self.width - completed)
    }

    /// The filled and empty glyph runs as separate strings, so callers can
    /// style the two halves independently.
    pub fn glyphs(&self) -> (String, String) {
        let (completed, remaining) = self.segments();
        (
            std::iter::repeat_n(self.filled, completed).collect(),
            std::iter::repeat_n(self.empty, remaining).collect(),
        )
    }
}

impl std::fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (filled, empty) = self.glyphs();
        write!(f, "{filled}{empty}")
    }
}
