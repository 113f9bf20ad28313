use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::options::ProgressOptions;
use crate::render;
use crate::scheduler::Scheduler;
use crate::shell::TermShell;
use crate::state::{Mode, ProgressState};
use crate::{ProgressUpdate, PromptShell};

/// Why a [`ProgressIndicator::run`] future failed.
#[derive(Debug)]
pub enum RunError {
    /// The host's cancel path fired before completion.
    Cancelled,
    /// `run()` was called more than once on the same indicator.
    AlreadyStarted,
    /// The initial render could not be written.
    Io(std::io::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Cancelled => write!(f, "progress prompt cancelled"),
            RunError::AlreadyStarted => write!(f, "progress prompt already started"),
            RunError::Io(err) => write!(f, "progress prompt render failed: {err}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RunError {
    fn from(err: std::io::Error) -> Self {
        RunError::Io(err)
    }
}

/// Lifecycle phase of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Running,
    Submitted,
    Cancelled,
}

impl Phase {
    pub(crate) fn is_terminal(self) -> bool {
        matches!(self, Phase::Submitted | Phase::Cancelled)
    }
}

/// Result delivered to the `run()` future. Completion and cancellation are
/// the only two writers, and the channel fires at most once.
enum Outcome {
    Submitted(f64),
    Cancelled,
}

pub(crate) struct Inner {
    pub(crate) state: ProgressState,
    pub(crate) phase: Phase,
    opts: ProgressOptions,
    shell: Box<dyn PromptShell>,
    scheduler: Scheduler,
    outcome_tx: Option<oneshot::Sender<Outcome>>,
    outcome_rx: Option<oneshot::Receiver<Outcome>>,
}

impl Inner {
    /// Composes and draws one frame. Callers gate on the phase; this does
    /// not check it, because `complete` draws its final frame after the
    /// phase has already turned terminal.
    pub(crate) fn render(&mut self) -> Result<(), std::io::Error> {
        let frame = render::compose(&self.state, &self.opts);
        self.shell.draw(&frame)
    }
}

/// Serializes all state access and rendering behind one lock, recovering
/// from poisoning rather than cascading the panic into the render path.
pub(crate) fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An animated terminal progress indicator.
///
/// Renders a determinate percentage bar when constructed with a positive
/// total, or an indeterminate spinner otherwise. The handle is cheap to
/// clone; all clones share one state and one render lock, so updates from
/// worker tasks and animation ticks never interleave mid-frame.
///
/// Lifecycle: [`run`](Self::run) starts rendering and resolves once
/// [`complete`](Self::complete) (success) or [`cancel`](Self::cancel)
/// (rejection) fires. After either, the indicator is inert: further updates
/// neither mutate state nor repaint.
#[derive(Clone)]
pub struct ProgressIndicator {
    inner: Arc<Mutex<Inner>>,
}

impl ProgressIndicator {
    /// An indicator drawing to stderr.
    pub fn new(opts: ProgressOptions) -> Self {
        Self::with_shell(opts, TermShell::stderr())
    }

    /// An indicator drawing through a custom [`PromptShell`] — a host prompt
    /// framework's terminal layer, or a capture shell in tests.
    pub fn with_shell(opts: ProgressOptions, shell: impl PromptShell + 'static) -> Self {
        let (tx, rx) = oneshot::channel();
        let inner = Inner {
            state: ProgressState::new(&opts),
            phase: Phase::Idle,
            opts,
            shell: Box::new(shell),
            scheduler: Scheduler::idle(),
            outcome_tx: Some(tx),
            outcome_rx: Some(rx),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Begins the interactive lifecycle: draws the initial frame, starts the
    /// animation scheduler when the mode (or the `animate` option) calls for
    /// it, and resolves with the final progress value on completion.
    ///
    /// Must be called at most once, from within a tokio runtime.
    pub async fn run(&self) -> Result<f64, RunError> {
        let rx = {
            let mut inner = lock(&self.inner);
            if inner.phase != Phase::Idle {
                return Err(RunError::AlreadyStarted);
            }
            inner.phase = Phase::Running;
            inner.render()?;

            let rx = inner.outcome_rx.take().ok_or(RunError::AlreadyStarted)?;
            if inner.state.mode.is_indeterminate() || inner.opts.animate {
                let weak = Arc::downgrade(&self.inner);
                let period = inner.opts.tick_interval;
                inner.scheduler.start(weak, period);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(mode = ?inner.state.mode, "progress prompt running");
            rx
        };

        match rx.await {
            Ok(Outcome::Submitted(value)) => Ok(value),
            // A dropped sender means every handle went away mid-run; treat
            // it like the cancel path.
            Ok(Outcome::Cancelled) | Err(_) => Err(RunError::Cancelled),
        }
    }

    /// Applies an update and repaints. Accepts a bare number or a
    /// [`ProgressUpdate`] payload. Silently ignored once the indicator has
    /// submitted or been cancelled.
    pub fn update(&self, update: impl Into<ProgressUpdate>) {
        let mut inner = lock(&self.inner);
        if inner.phase.is_terminal() {
            return;
        }
        inner.state.apply(update.into(), Instant::now());
        // Repaint errors are dropped here for the same reason as in the
        // animation task: an update is fire-and-forget for the caller.
        let _ = inner.render();
    }

    /// Completes the run: snaps `current` to the total (determinate mode),
    /// stops the animation, draws the final summary frame and resolves the
    /// [`run`](Self::run) future with the final value. A no-op if the
    /// indicator is already terminal.
    pub fn complete(&self) {
        self.finish(None);
    }

    /// [`complete`](Self::complete) with a final message override.
    pub fn complete_with(&self, message: impl Into<String>) {
        self.finish(Some(message.into()));
    }

    fn finish(&self, message: Option<String>) {
        let mut inner = lock(&self.inner);
        if inner.phase.is_terminal() {
            return;
        }
        if inner.state.mode == Mode::Determinate {
            inner.state.current = inner.state.total;
        }
        if let Some(message) = message {
            inner.state.message = message;
        }
        inner.state.submitted = true;
        inner.phase = Phase::Submitted;
        inner.scheduler.stop();

        // The one final render permitted after the terminal transition.
        let _ = inner.render();
        let _ = inner.shell.close();

        #[cfg(feature = "tracing")]
        tracing::debug!(value = inner.state.current, "progress prompt submitted");

        if let Some(tx) = inner.outcome_tx.take() {
            let _ = tx.send(Outcome::Submitted(inner.state.current));
        }
    }

    /// The host framework's cancel path: stops the animation, suppresses all
    /// further rendering, restores the terminal and rejects the
    /// [`run`](Self::run) future. A no-op if already terminal.
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        if inner.phase.is_terminal() {
            return;
        }
        inner.phase = Phase::Cancelled;
        inner.scheduler.stop();
        let _ = inner.shell.close();

        #[cfg(feature = "tracing")]
        tracing::debug!("progress prompt cancelled");

        if let Some(tx) = inner.outcome_tx.take() {
            let _ = tx.send(Outcome::Cancelled);
        }
    }

    /// Estimated time remaining. `None` in indeterminate mode, before the
    /// first update, or while `current` is zero.
    ///
    /// The estimate extrapolates linearly from the first update, so it can
    /// be volatile early in a run; it stabilizes as updates accumulate.
    pub fn get_eta(&self) -> Option<Duration> {
        let inner = lock(&self.inner);
        crate::eta::estimate(&inner.state)
    }

    /// Current progress value.
    pub fn current(&self) -> f64 {
        lock(&self.inner).state.current
    }

    /// The mode fixed at construction.
    pub fn mode(&self) -> Mode {
        lock(&self.inner).state.mode
    }

    /// Whether the indicator has reached a terminal state (submitted or
    /// cancelled).
    pub fn is_finished(&self) -> bool {
        lock(&self.inner).phase.is_terminal()
    }
}
