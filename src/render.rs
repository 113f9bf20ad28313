//! Frame composition: pure functions from state + options to the text block
//! the shell draws. No I/O happens here.

use crate::eta;
use crate::options::ProgressOptions;
use crate::state::{Mode, ProgressState};
use crate::widgets::ProgressBar;

/// Composes the full frame block: optional header, prompt line, bar line
/// (suppressed once submitted), optional footer. Every line is
/// `\n`-terminated.
pub(crate) fn compose(state: &ProgressState, opts: &ProgressOptions) -> String {
    let t = &opts.theme;
    let mut lines = Vec::with_capacity(4);

    if let Some(header) = &opts.header {
        lines.push(header.clone());
    }

    if state.submitted {
        // Terminal frame: completion marker plus the final message, no live
        // bar or ETA.
        lines.push(join_parts([t.check(), state.message.clone()]));
    } else {
        lines.push(join_parts([
            t.prefix(),
            state.message.clone(),
            t.separator(),
        ]));
        let mut line = bar_line(state, opts);
        if !state.status.is_empty() {
            line.push(' ');
            line.push_str(&t.muted(&state.status));
        }
        lines.push(line);
    }

    if let Some(footer) = &opts.footer {
        lines.push(footer.clone());
    }

    let mut frame = lines.join("\n");
    frame.push('\n');
    frame
}

/// Renders the bar itself: a spinner plus label in indeterminate mode, or
/// the glyph bar followed by the enabled segments (percentage, value
/// fraction, ETA) in fixed order.
pub(crate) fn bar_line(state: &ProgressState, opts: &ProgressOptions) -> String {
    let t = &opts.theme;

    if state.mode == Mode::Indeterminate {
        return format!(
            "{} {}",
            t.primary(state.spinner.frame()),
            t.muted("Processing...")
        );
    }

    let bar = ProgressBar::new(state.current, state.total)
        .width(opts.bar_length)
        .chars(opts.complete_char, opts.incomplete_char);
    let (filled, empty) = bar.glyphs();

    let mut parts = vec![format!("{}{}", t.primary(&filled), t.muted(&empty))];

    if opts.show_percentage {
        // Round half away from zero; right-align in three columns.
        let pct = bar.percentage().round() as i64;
        parts.push(t.primary(&format!("{pct:>3}%")));
    }

    if opts.show_value {
        parts.push(t.muted(&format!(
            "{}/{}",
            fmt_num(state.current),
            fmt_num(state.total)
        )));
    }

    if opts.show_eta
        && let Some(remaining) = eta::estimate(state)
        && !remaining.is_zero()
    {
        parts.push(t.muted(&format!("ETA {}", eta::format_duration(remaining))));
    }

    parts.join(" ")
}

/// Joins non-empty parts with single spaces, so an empty message doesn't
/// leave doubled separators.
fn join_parts<const N: usize>(parts: [String; N]) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Displays whole-valued floats without a trailing `.0`, so a five-unit bar
/// reads `3/5` rather than `3.0/5.0`.
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
