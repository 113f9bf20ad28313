use std::io::Write;

use crate::PromptShell;
use crate::frame::FrameWriter;

/// The stock [`PromptShell`]: draws frames onto any [`Write`] target using
/// ANSI cursor movement to repaint in place.
///
/// The cursor is hidden on the first draw and restored by [`close`], so a
/// cancelled or completed run always hands the terminal back intact.
///
/// [`close`]: PromptShell::close
pub struct TermShell<W: Write + Send> {
    target: W,
    frame_lines: usize,
    cursor_hidden: bool,
}

impl TermShell<std::io::Stderr> {
    /// A shell over stderr, the conventional stream for interactive frames.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> TermShell<W> {
    pub fn new(target: W) -> Self {
        Self {
            target,
            frame_lines: 0,
            cursor_hidden: false,
        }
    }

    /// Consumes the shell, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.target
    }
}

impl<W: Write + Send> PromptShell for TermShell<W> {
    fn draw(&mut self, frame: &str) -> Result<(), std::io::Error> {
        let mut f = FrameWriter::new(&mut self.target, self.frame_lines);
        if !self.cursor_hidden {
            f.hide_cursor()?;
            self.cursor_hidden = true;
        }
        f.clear_frame()?;
        write!(f, "{frame}")?;
        f.flush()?;
        self.frame_lines = f.frame_lines();
        Ok(())
    }

    fn close(&mut self) -> Result<(), std::io::Error> {
        if self.cursor_hidden {
            let mut f = FrameWriter::new(&mut self.target, self.frame_lines);
            f.show_cursor()?;
            self.cursor_hidden = false;
        }
        self.target.flush()
    }
}
