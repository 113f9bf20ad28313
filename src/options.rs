use std::time::Duration;

use crate::scheduler::DEFAULT_TICK_INTERVAL;
use crate::theme::Theme;
use crate::widgets::Spinner;

/// Construction configuration for a [`ProgressIndicator`].
///
/// ```rust,ignore
/// let opts = ProgressOptions::new("Building project")
///     .total(5.0)
///     .show_value(true)
///     .chars('#', '.');
/// ```
///
/// [`ProgressIndicator`]: crate::ProgressIndicator
#[derive(Debug, Clone)]
pub struct ProgressOptions {
    pub(crate) message: String,
    pub(crate) total: Option<f64>,
    pub(crate) initial: f64,
    pub(crate) bar_length: usize,
    pub(crate) show_percentage: bool,
    pub(crate) show_value: bool,
    pub(crate) show_eta: bool,
    pub(crate) complete_char: char,
    pub(crate) incomplete_char: char,
    pub(crate) spinner: Spinner,
    pub(crate) animate: bool,
    pub(crate) status: String,
    pub(crate) header: Option<String>,
    pub(crate) footer: Option<String>,
    pub(crate) tick_interval: Duration,
    pub(crate) theme: Theme,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self::new("")
    }
}

impl ProgressOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            total: None,
            initial: 0.0,
            bar_length: 40,
            show_percentage: true,
            show_value: false,
            show_eta: true,
            complete_char: '█',
            incomplete_char: '░',
            spinner: Spinner::dots(),
            animate: false,
            status: String::new(),
            header: None,
            footer: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            theme: Theme::colored(),
        }
    }

    /// Progress target. Selects determinate mode when positive; omitting it
    /// (or passing a non-positive value) selects the indeterminate spinner.
    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    /// Starting progress value (default 0).
    pub fn initial(mut self, initial: f64) -> Self {
        self.initial = initial;
        self
    }

    /// Bar width in glyphs (default 40).
    pub fn bar_length(mut self, glyphs: usize) -> Self {
        self.bar_length = glyphs;
        self
    }

    /// Toggles the percentage segment (default on).
    pub fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    /// Toggles the `current/total` fraction segment (default off).
    pub fn show_value(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    /// Toggles the ETA segment (default on).
    pub fn show_eta(mut self, show: bool) -> Self {
        self.show_eta = show;
        self
    }

    /// Glyphs for the filled and empty bar segments.
    pub fn chars(mut self, complete: char, incomplete: char) -> Self {
        self.complete_char = complete;
        self.incomplete_char = incomplete;
        self
    }

    /// Spinner frame sequence for indeterminate mode.
    pub fn spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    /// Forces the animation scheduler on even in determinate mode.
    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Initial status text.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Static line drawn above the prompt.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Static line drawn below the bar.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Animation period (default 80 ms).
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
