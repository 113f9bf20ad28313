//! Rendering widgets used by the frame composer.
//!
//! # Progress bar
//!
//! [`ProgressBar`] renders a configurable glyph bar:
//!
//! ```rust,ignore
//! let bar = ProgressBar::new(45.0, 100.0).width(30);
//! // => ██████████████░░░░░░░░░░░░░░░░
//!
//! // Custom fill characters:
//! let bar = ProgressBar::new(3.0, 10.0).chars('#', '.');
//! // => ######..............
//! ```
//!
//! # Spinner
//!
//! [`Spinner`] cycles through animation frames on each [`tick`](Spinner::tick):
//!
//! ```rust,ignore
//! let mut spinner = Spinner::dots(); // ⠋ ⠙ ⠹ ...
//! spinner.tick();
//! write!(f, "{} working...", spinner.frame())?;
//!
//! // Other presets:
//! let s = Spinner::line();  // | / - \
//! let s = Spinner::arrow(); // ← ↖ ↑ ↗ → ↘ ↓ ↙
//!
//! // Custom frames:
//! let s = Spinner::custom(&["🌑", "🌒", "🌓", "🌔", "🌕"]);
//! ```

mod progress_bar;
mod spinner;

pub use progress_bar::*;
pub use spinner::*;
