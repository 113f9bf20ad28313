#![doc = include_str!("../README.md")]

pub(crate) mod eta;
pub(crate) mod frame;
pub(crate) mod indicator;
pub(crate) mod options;
pub(crate) mod render;
pub(crate) mod scheduler;
pub(crate) mod shell;
pub(crate) mod state;
pub(crate) mod theme;
pub mod widgets;

#[cfg(test)]
mod test;

/// Re-exports of all public types and traits.
pub mod prelude {
    pub use crate::PromptShell;
    pub use crate::ProgressUpdate;
    pub use crate::eta::format_duration;
    pub use crate::indicator::{ProgressIndicator, RunError};
    pub use crate::options::ProgressOptions;
    pub use crate::shell::TermShell;
    pub use crate::state::Mode;
    pub use crate::theme::Theme;
    pub use crate::widgets::{ProgressBar, Spinner};
}

pub use crate::prelude::*;

/// Terminal-facing capabilities the indicator needs from its host prompt
/// framework.
///
/// The indicator composes with a shell rather than subclassing a prompt base
/// class: it formats each frame as a string and hands it over, and the shell
/// owns cursor control and in-place redrawing. [`TermShell`] is the stock
/// implementation for any [`std::io::Write`] target; a host framework with
/// its own terminal handling can inject a custom shell instead.
pub trait PromptShell: Send {
    /// Replaces the previously drawn frame with `frame`.
    ///
    /// `frame` is a block of one or more `\n`-terminated lines. The shell
    /// must clear whatever it drew on the last call before writing, so no
    /// stale partial frames remain visible.
    fn draw(&mut self, frame: &str) -> Result<(), std::io::Error>;

    /// Releases the terminal after the final frame: restore the cursor and
    /// leave the last drawn block in place.
    fn close(&mut self) -> Result<(), std::io::Error>;
}

/// A structured progress update.
///
/// Every field is optional; present fields overwrite the corresponding state,
/// absent fields are untouched. Bare numbers convert into a value-only
/// update, so `indicator.update(25.0)` and
/// `indicator.update(ProgressUpdate::new().value(25.0))` are equivalent.
///
/// ```rust,ignore
/// indicator.update(ProgressUpdate::new().value(3.0).status("Compile"));
/// indicator.update(ProgressUpdate::new().message("Linking").total(12.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdate {
    pub(crate) value: Option<f64>,
    pub(crate) message: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) total: Option<f64>,
}

impl ProgressUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the progress value.
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Replaces the prompt message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replaces the status text shown after the bar.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the total (the denominator) in determinate mode.
    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }
}

impl From<f64> for ProgressUpdate {
    fn from(value: f64) -> Self {
        Self::new().value(value)
    }
}

impl From<u64> for ProgressUpdate {
    fn from(value: u64) -> Self {
        Self::new().value(value as f64)
    }
}

impl From<u32> for ProgressUpdate {
    fn from(value: u32) -> Self {
        Self::new().value(f64::from(value))
    }
}
