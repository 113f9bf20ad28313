use std::time::Duration;

use crate::state::{Mode, ProgressState};

/// Estimated time remaining, by linear extrapolation of the observed rate.
///
/// Returns `None` when the mode is indeterminate, no update has happened
/// yet, or `current` is still zero. The window runs from the *first* update
/// to the most recent one (no moving average), so the estimate can swing on
/// bursty update patterns early in a run and settles as updates accumulate.
pub(crate) fn estimate(state: &ProgressState) -> Option<Duration> {
    if state.mode == Mode::Indeterminate || state.current <= 0.0 {
        return None;
    }
    let start = state.start_time?;
    let last = state.last_update?;

    let elapsed_ms = last.duration_since(start).as_secs_f64() * 1000.0;
    let rate = state.current / elapsed_ms; // units per ms; zero elapsed => inf
    let remaining = state.total - state.current;
    let eta_ms = remaining / rate;

    if !eta_ms.is_finite() || eta_ms < 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(eta_ms / 1000.0))
}

/// Formats a duration for display: `"<1s"` under a second, whole seconds
/// (rounded up) under a minute, then `"Xm Ys"` with the seconds component
/// omitted when zero.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        return "<1s".to_string();
    }
    let seconds = ms.div_ceil(1000);
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    let secs = seconds % 60;
    if secs > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{minutes}m")
    }
}
