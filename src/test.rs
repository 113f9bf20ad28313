use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::state::ProgressState;
use crate::widgets::{ProgressBar, Spinner};
use crate::{
    Mode, ProgressIndicator, ProgressOptions, ProgressUpdate, PromptShell, TermShell, Theme,
    eta, render,
};

// -- Harnesses ---------------------------------------------------------------

/// Replays ANSI cursor movement into a line buffer, so tests can assert on
/// what a terminal would actually show.
pub struct VirtualTerm {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    buf: Vec<u8>,
}

impl VirtualTerm {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            buf: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    fn ensure_row(&mut self, row: usize) {
        while self.lines.len() <= row {
            self.lines.push(String::new());
        }
    }

    fn process(&mut self, s: &str) {
        if s.contains("\x1b[") {
            if let Some(pos) = s.find('A') {
                let num_str = &s[s.find('[').unwrap() + 1..pos];
                if let Ok(n) = num_str.parse::<usize>() {
                    self.cursor_row = self.cursor_row.saturating_sub(n);
                }
            }
            if s.contains("\x1b[2K") {
                self.ensure_row(self.cursor_row);
                self.lines[self.cursor_row].clear();
            }
            if s.contains("\x1b[J") {
                self.lines.truncate(self.cursor_row + 1);
            }
        } else {
            for c in s.chars() {
                match c {
                    '\n' => {
                        self.cursor_row += 1;
                        self.ensure_row(self.cursor_row);
                    }
                    _ => {
                        self.ensure_row(self.cursor_row);
                        self.lines[self.cursor_row].push(c);
                    }
                }
            }
        }
    }
}

impl Write for VirtualTerm {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buf.is_empty() {
            let s = String::from_utf8(std::mem::take(&mut self.buf)).unwrap();
            self.process(&s);
        }
        Ok(())
    }
}

/// Shell that records every drawn frame verbatim, for lifecycle assertions.
#[derive(Clone, Default)]
struct CaptureShell {
    frames: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl CaptureShell {
    fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    fn last_frame(&self) -> String {
        self.frames.lock().unwrap().last().cloned().unwrap_or_default()
    }

    fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl PromptShell for CaptureShell {
    fn draw(&mut self, frame: &str) -> Result<(), std::io::Error> {
        self.frames.lock().unwrap().push(frame.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<(), std::io::Error> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn plain(message: &str) -> ProgressOptions {
    ProgressOptions::new(message).theme(Theme::plain())
}

// -- Duration formatting -----------------------------------------------------

#[test]
fn format_duration_sub_second() {
    assert_eq!(eta::format_duration(Duration::from_millis(500)), "<1s");
    assert_eq!(eta::format_duration(Duration::from_millis(999)), "<1s");
}

#[test]
fn format_duration_rounds_seconds_up() {
    assert_eq!(eta::format_duration(Duration::from_millis(1000)), "1s");
    assert_eq!(eta::format_duration(Duration::from_millis(1500)), "2s");
    assert_eq!(eta::format_duration(Duration::from_millis(59_000)), "59s");
}

#[test]
fn format_duration_minutes() {
    assert_eq!(eta::format_duration(Duration::from_millis(60_000)), "1m");
    assert_eq!(eta::format_duration(Duration::from_millis(61_000)), "1m 1s");
    assert_eq!(eta::format_duration(Duration::from_millis(150_000)), "2m 30s");
}

// -- Progress bar widget -----------------------------------------------------

#[test]
fn bar_segments_always_sum_to_width() {
    for current in [-5.0, 0.0, 0.3, 12.0, 20.0, 33.3, 40.0, 75.0] {
        let (done, rest) = ProgressBar::new(current, 40.0).width(23).segments();
        assert_eq!(done + rest, 23, "current={current}");
    }
}

#[test]
fn bar_ratio_clamps() {
    assert_eq!(ProgressBar::new(-1.0, 10.0).ratio(), 0.0);
    assert_eq!(ProgressBar::new(15.0, 10.0).ratio(), 1.0);
    assert_eq!(ProgressBar::new(5.0, 0.0).ratio(), 0.0);
}

#[test]
fn bar_glyphs_use_configured_chars() {
    let bar = ProgressBar::new(3.0, 10.0).width(10).chars('#', '.');
    let (filled, empty) = bar.glyphs();
    assert_eq!(filled, "###");
    assert_eq!(empty, ".......");
    assert_eq!(bar.to_string(), "###.......");
}

#[test]
fn spinner_cycles_through_frames() {
    let mut s = Spinner::line();
    let first = s.frame();
    for _ in 0..s.frames().len() {
        s.tick();
    }
    assert_eq!(s.frame(), first);
}

#[test]
fn spinner_custom_empty_falls_back_to_dots() {
    assert_eq!(Spinner::custom(&[]).frames(), Spinner::dots().frames());
}

// -- Frame composition -------------------------------------------------------

#[test]
fn rendered_percentage_matches_rounded_ratio() {
    let opts = plain("files").total(7.0);
    for current in 0..=7 {
        let mut state = ProgressState::new(&opts);
        state.current = f64::from(current);
        let expected = (100.0 * f64::from(current) / 7.0).round() as i64;
        let line = render::bar_line(&state, &opts);
        assert!(
            line.contains(&format!("{expected:>3}%")),
            "current={current} line={line:?}"
        );
    }
}

#[test]
fn half_progress_reads_fifty_percent() {
    let opts = plain("files").total(50.0);
    let mut state = ProgressState::new(&opts);
    state.current = 25.0;
    assert!(render::bar_line(&state, &opts).contains(" 50%"));
}

#[test]
fn value_fraction_and_status_render() {
    let opts = plain("build").total(5.0).show_value(true);
    let mut state = ProgressState::new(&opts);
    state.current = 3.0;
    state.status = "Compile".to_string();
    let frame = render::compose(&state, &opts);
    assert!(frame.contains("3/5"), "frame={frame:?}");
    assert!(frame.contains("Compile"), "frame={frame:?}");
}

#[test]
fn indeterminate_renders_spinner_never_percentage() {
    let opts = plain("thinking");
    let state = ProgressState::new(&opts);
    let line = render::bar_line(&state, &opts);
    let glyph = state.spinner.frame();
    assert!(line.contains(glyph), "line={line:?}");
    assert!(!line.contains('%'), "line={line:?}");
    assert!(line.contains("Processing..."));
}

#[test]
fn submitted_frame_is_summary_only() {
    let opts = plain("deploy").total(10.0);
    let mut state = ProgressState::new(&opts);
    state.current = 10.0;
    state.submitted = true;
    let frame = render::compose(&state, &opts);
    assert!(frame.contains("✔ deploy"), "frame={frame:?}");
    assert!(!frame.contains('█'), "frame={frame:?}");
    assert!(!frame.contains("ETA"), "frame={frame:?}");
}

#[test]
fn header_and_footer_wrap_the_block() {
    let opts = plain("step").total(4.0).header("== setup ==").footer("press ctrl-c to abort");
    let state = ProgressState::new(&opts);
    let frame = render::compose(&state, &opts);
    let lines: Vec<&str> = frame.lines().collect();
    assert_eq!(lines.first(), Some(&"== setup =="));
    assert_eq!(lines.last(), Some(&"press ctrl-c to abort"));
}

// -- Terminal shell ----------------------------------------------------------

#[test]
fn term_shell_repaints_in_place() {
    let mut shell = TermShell::new(VirtualTerm::new());
    shell.draw("? build ›\n#####.....  50%\n").unwrap();
    shell.draw("? build ›\n##########  100%\n").unwrap();
    shell.close().unwrap();
    let term = shell.into_inner();
    let visible = term.render();
    assert!(visible.contains("100%"), "visible={visible:?}");
    assert!(!visible.contains("50%"), "visible={visible:?}");
}

// -- Lifecycle ---------------------------------------------------------------

#[tokio::test]
async fn determinate_run_resolves_with_final_value() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("Processing files").total(50.0), shell.clone());

    let (result, ()) = tokio::join!(ind.run(), async {
        ind.update(25.0);
        assert!(shell.last_frame().contains(" 50%"));
        ind.update(50.0);
        ind.complete();
    });

    assert_eq!(result.unwrap(), 50.0);
    assert!(ind.is_finished());
    assert!(shell.closed());
}

#[tokio::test]
async fn no_total_selects_indeterminate_mode() {
    let ind = ProgressIndicator::with_shell(plain("waiting"), CaptureShell::default());
    assert_eq!(ind.mode(), Mode::Indeterminate);
}

#[tokio::test]
async fn non_positive_total_selects_indeterminate_mode() {
    let ind = ProgressIndicator::with_shell(plain("waiting").total(0.0), CaptureShell::default());
    assert_eq!(ind.mode(), Mode::Indeterminate);
}

#[tokio::test]
async fn updates_after_complete_are_ignored() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("job").total(10.0), shell.clone());

    let (result, ()) = tokio::join!(ind.run(), async {
        ind.update(4.0);
        ind.complete();
    });
    assert_eq!(result.unwrap(), 10.0);

    let drawn = shell.frames().len();
    ind.update(99.0);
    ind.update(ProgressUpdate::new().status("late"));
    assert_eq!(ind.current(), 10.0);
    assert_eq!(shell.frames().len(), drawn);
}

#[tokio::test]
async fn complete_is_idempotent() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("job").total(10.0), shell.clone());
    let (result, ()) = tokio::join!(ind.run(), async {
        ind.complete();
        ind.complete();
        ind.cancel();
    });
    assert_eq!(result.unwrap(), 10.0);
}

#[tokio::test]
async fn cancel_rejects_the_run_future() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("doomed").total(10.0), shell.clone());

    let (result, ()) = tokio::join!(ind.run(), async {
        ind.update(3.0);
        ind.cancel();
    });

    assert!(matches!(result, Err(crate::RunError::Cancelled)));
    assert!(ind.is_finished());
    assert!(shell.closed());

    // Cancellation suppresses rendering: no frame was drawn for it.
    let drawn = shell.frames().len();
    ind.update(5.0);
    assert_eq!(shell.frames().len(), drawn);
}

#[tokio::test]
async fn run_twice_is_an_error() {
    let ind = ProgressIndicator::with_shell(plain("once").total(2.0), CaptureShell::default());
    let (first, ()) = tokio::join!(ind.run(), async { ind.complete() });
    assert!(first.is_ok());
    assert!(matches!(ind.run().await, Err(crate::RunError::AlreadyStarted)));
}

#[tokio::test]
async fn complete_overrides_the_message() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("Processing data"), shell.clone());
    let (result, ()) = tokio::join!(ind.run(), async {
        ind.complete_with("Done!");
    });
    assert!(result.is_ok());
    let last = shell.last_frame();
    assert!(last.contains("✔ Done!"), "last={last:?}");
}

// -- Animation scheduler -----------------------------------------------------

#[tokio::test(start_paused = true)]
async fn spinner_animates_on_the_tick_interval() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("Processing data"), shell.clone());

    let run = tokio::spawn({
        let ind = ind.clone();
        async move { ind.run().await }
    });
    tokio::task::yield_now().await;

    // Step the paused clock one period at a time so every tick lands.
    for _ in 0..8 {
        tokio::time::advance(Duration::from_millis(80)).await;
        tokio::task::yield_now().await;
    }

    let frames = shell.frames();
    assert!(frames.len() >= 4, "only {} frames drawn", frames.len());
    // Frames advance through the glyph cycle, so consecutive repaints differ.
    assert!(frames.windows(2).any(|w| w[0] != w[1]));

    ind.complete_with("Done!");
    let drawn = shell.frames().len();

    tokio::time::advance(Duration::from_millis(800)).await;
    tokio::task::yield_now().await;
    assert_eq!(shell.frames().len(), drawn, "tick fired after terminal state");

    assert_eq!(run.await.unwrap().unwrap(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn determinate_bar_animates_only_when_asked() {
    let still = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("quiet").total(10.0), still.clone());
    let run = tokio::spawn({
        let ind = ind.clone();
        async move { ind.run().await }
    });
    tokio::task::yield_now().await;
    let after_initial = still.frames().len();

    tokio::time::advance(Duration::from_millis(400)).await;
    tokio::task::yield_now().await;
    assert_eq!(still.frames().len(), after_initial);

    ind.complete();
    run.await.unwrap().unwrap();

    let animated = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(
        plain("busy").total(10.0).animate(true),
        animated.clone(),
    );
    let run = tokio::spawn({
        let ind = ind.clone();
        async move { ind.run().await }
    });
    tokio::task::yield_now().await;
    let after_initial = animated.frames().len();

    for _ in 0..5 {
        tokio::time::advance(Duration::from_millis(80)).await;
        tokio::task::yield_now().await;
    }
    assert!(animated.frames().len() > after_initial);

    ind.complete();
    run.await.unwrap().unwrap();
}

// -- Rate estimation ---------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn eta_follows_the_observed_rate() {
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(plain("crunching").total(100.0), shell.clone());

    // No update yet: no estimate.
    assert_eq!(ind.get_eta(), None);

    ind.update(10.0);
    // First update: elapsed window is empty, the estimate collapses to zero
    // and is therefore never displayed.
    assert_eq!(ind.get_eta(), Some(Duration::ZERO));

    tokio::time::advance(Duration::from_secs(1)).await;
    ind.update(20.0);

    // 20 units over 1s leaves 80 units at 20 units/s: about 4s remaining.
    let eta = ind.get_eta().expect("estimate available");
    assert!((3999..=4001).contains(&eta.as_millis()), "eta={eta:?}");
    assert!(shell.last_frame().contains("ETA 4s"), "frame={:?}", shell.last_frame());
}

#[tokio::test(start_paused = true)]
async fn eta_unavailable_when_guards_fail() {
    // Indeterminate mode never estimates.
    let ind = ProgressIndicator::with_shell(plain("spin"), CaptureShell::default());
    ind.update(10.0);
    tokio::time::advance(Duration::from_secs(1)).await;
    ind.update(20.0);
    assert_eq!(ind.get_eta(), None);

    // Zero progress never estimates.
    let ind = ProgressIndicator::with_shell(plain("stuck").total(10.0), CaptureShell::default());
    ind.update(0.0);
    tokio::time::advance(Duration::from_secs(1)).await;
    ind.update(0.0);
    assert_eq!(ind.get_eta(), None);

    // Overshooting the total yields no (negative) estimate.
    let ind = ProgressIndicator::with_shell(plain("over").total(10.0), CaptureShell::default());
    ind.update(5.0);
    tokio::time::advance(Duration::from_secs(1)).await;
    ind.update(15.0);
    assert_eq!(ind.get_eta(), None);
}

#[tokio::test(start_paused = true)]
async fn update_can_move_the_total() {
    let opts = plain("resize").total(10.0).show_value(true);
    let shell = CaptureShell::default();
    let ind = ProgressIndicator::with_shell(opts, shell.clone());

    ind.update(ProgressUpdate::new().value(5.0).total(20.0));
    assert!(shell.last_frame().contains("5/20"));
    assert_eq!(ind.mode(), Mode::Determinate);

    // Non-positive totals are ignored: the denominator stays valid.
    ind.update(ProgressUpdate::new().total(-3.0));
    assert!(shell.last_frame().contains("5/20"));
}
