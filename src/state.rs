use tokio::time::Instant;

use crate::ProgressUpdate;
use crate::options::ProgressOptions;
use crate::widgets::Spinner;

/// Rendering mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Progress tracked against a known positive total, rendered as a
    /// percentage bar.
    Determinate,
    /// Progress of unknown extent, rendered as an animated spinner.
    Indeterminate,
}

impl Mode {
    pub fn is_indeterminate(self) -> bool {
        matches!(self, Mode::Indeterminate)
    }
}

/// The indicator's mutable state. Owned exclusively by the indicator and
/// mutated by caller updates plus the animation scheduler (spinner only).
pub(crate) struct ProgressState {
    pub(crate) mode: Mode,
    pub(crate) current: f64,
    pub(crate) total: f64,
    pub(crate) message: String,
    pub(crate) status: String,
    pub(crate) start_time: Option<Instant>,
    pub(crate) last_update: Option<Instant>,
    pub(crate) spinner: Spinner,
    pub(crate) submitted: bool,
}

impl ProgressState {
    /// Builds initial state, deciding the mode from the configured total:
    /// absent or non-positive selects the spinner; a determinate bar always
    /// ends up with a positive total (100 when the configured value is
    /// unusable).
    pub(crate) fn new(opts: &ProgressOptions) -> Self {
        let (mode, total) = match opts.total {
            Some(total) if total > 0.0 => (Mode::Determinate, total),
            Some(_) | None => (Mode::Indeterminate, 100.0),
        };
        Self {
            mode,
            total,
            current: opts.initial,
            message: opts.message.clone(),
            status: opts.status.clone(),
            start_time: None,
            last_update: None,
            spinner: opts.spinner.clone(),
            submitted: false,
        }
    }

    /// Applies an update payload: present fields overwrite, absent fields
    /// are untouched. Records the first-update and last-update timestamps
    /// used by the rate estimator.
    pub(crate) fn apply(&mut self, update: ProgressUpdate, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        if let Some(value) = update.value {
            self.current = value;
        }
        if let Some(message) = update.message {
            self.message = message;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        // The denominator may change mid-run, but never to a value that
        // would break the determinate-total invariant.
        if let Some(total) = update.total
            && total > 0.0
        {
            self.total = total;
        }
        self.last_update = Some(now);
    }
}
