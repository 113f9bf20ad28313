use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{self, MissedTickBehavior};

use crate::indicator::{Inner, lock};

/// Default animation period. Tunable per indicator via
/// [`ProgressOptions::tick_interval`](crate::ProgressOptions::tick_interval).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(80);

/// The animation timer, owned by the indicator's lifecycle.
///
/// Started by `run()` and stopped on completion or cancellation; stopping
/// twice is a no-op. The spawned task holds only a [`Weak`] reference to the
/// indicator state, so dropping the last handle also ends the animation.
pub(crate) struct Scheduler {
    stop: Option<oneshot::Sender<()>>,
}

impl Scheduler {
    pub(crate) fn idle() -> Self {
        Self { stop: None }
    }

    /// Spawns the tick loop: advance the spinner frame and repaint on each
    /// interval until stopped or the indicator reaches a terminal phase.
    pub(crate) fn start(&mut self, inner: Weak<Mutex<Inner>>, period: Duration) {
        if self.stop.is_some() {
            return;
        }
        let (tx, mut rx) = oneshot::channel();
        self.stop = Some(tx);

        tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let Some(inner) = inner.upgrade() else { break };
                        let mut inner = lock(&inner);
                        if inner.phase.is_terminal() {
                            break;
                        }
                        inner.state.spinner.tick();
                        // Ignore repaint errors — stderr can't really fail in
                        // practice, and panicking in the animation task is
                        // worse than a dropped frame.
                        let _ = inner.render();
                    }
                    _ = &mut rx => break,
                }
            }
        });
    }

    /// Idempotent: the stop signal is sent at most once.
    pub(crate) fn stop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
    }
}
