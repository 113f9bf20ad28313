use std::io::Write;

/// Write target with ANSI cursor control for in-place frame redrawing.
///
/// Wraps an [`std::io::Write`] target and counts the newlines it emits, so
/// the next frame knows how many lines to move up and clear. Construct one
/// per redraw with the line count of the previous frame.
pub struct FrameWriter<'a> {
    target: &'a mut dyn Write,
    frame_lines: usize,
}

impl<'a> FrameWriter<'a> {
    pub(crate) fn new(target: &'a mut dyn Write, frame_lines: usize) -> Self {
        Self {
            target,
            frame_lines,
        }
    }

    /// Moves the cursor to the top of the previous frame and erases it.
    pub(crate) fn clear_frame(&mut self) -> Result<(), std::io::Error> {
        let lines_drawn = self.frame_lines;
        if lines_drawn > 0 {
            write!(self.target, "\r\x1b[{}A\x1b[2K\x1b[J", lines_drawn)?;
            self.target.flush()?;
        }
        self.frame_lines = 0;
        Ok(())
    }

    pub(crate) fn hide_cursor(&mut self) -> Result<(), std::io::Error> {
        write!(self.target, "\x1b[?25l")?;
        self.target.flush()
    }

    pub(crate) fn show_cursor(&mut self) -> Result<(), std::io::Error> {
        write!(self.target, "\x1b[?25h")?;
        self.target.flush()
    }

    /// Number of lines written since the last [`clear_frame`](Self::clear_frame).
    pub(crate) fn frame_lines(&self) -> usize {
        self.frame_lines
    }
}

impl<'a> Write for FrameWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let newlines = buf.iter().filter(|&&b| b == b'\n').count();
        self.frame_lines += newlines;
        self.target.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.target.flush()
    }
}
