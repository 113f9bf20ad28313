use owo_colors::OwoColorize;

/// Style table for prompt frames.
///
/// [`Theme::colored`] is the default; [`Theme::plain`] disables all escape
/// sequences for dumb terminals, piped output and tests.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Highlight style, used for the prompt prefix, the filled bar and the
    /// active spinner glyph.
    pub(crate) fn primary(&self, s: &str) -> String {
        if self.color {
            s.cyan().to_string()
        } else {
            s.to_string()
        }
    }

    /// De-emphasis style for the empty bar, separators, ETA and status text.
    pub(crate) fn muted(&self, s: &str) -> String {
        if self.color {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }

    /// Style for the completion marker.
    pub(crate) fn success(&self, s: &str) -> String {
        if self.color {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    /// Prefix symbol on the live prompt line.
    pub(crate) fn prefix(&self) -> String {
        self.primary("?")
    }

    /// Separator between the message and the bar line's content.
    pub(crate) fn separator(&self) -> String {
        self.muted("›")
    }

    /// Marker shown once the prompt has submitted.
    pub(crate) fn check(&self) -> String {
        self.success("✔")
    }
}
