//! Diagnostic handler for solver failure reporting.
//!
//! The solver does not stop at the first problem it finds. Overconstrained
//! rows and unsolved symbols are reported one line at a time into a
//! [`Handler`], and the caller decides what to do with the collected text.
//! Output is line-oriented and human-readable only; there is no structured
//! format.
//!
//! # Example
//!
//! ```
//! use layc_util::Handler;
//!
//! let mut handler = Handler::new();
//! handler.error("Unsolved symbol 'x1'");
//! handler.error("Unsolved symbol 'w1'");
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.render(), "Unsolved symbol 'x1'\nUnsolved symbol 'w1'");
//! ```

use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A failure line, one per affected symbol.
    Error,
    /// Supporting detail, such as a matrix dump.
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// One collected diagnostic line.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity of this line.
    pub level: Level,
    /// The message text, without a trailing newline.
    pub message: String,
}

/// Collects diagnostics in insertion order.
///
/// The handler is append-only. Whether the overall operation failed is
/// tracked separately by the caller (the linear system keeps its own
/// success flag); the handler only answers whether any error line was
/// recorded.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    /// Create an empty handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error line.
    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic { level: Level::Error, message: message.into() });
    }

    /// Record a note line.
    pub fn note(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic { level: Level::Note, message: message.into() });
    }

    /// True when at least one error line was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    /// Number of error lines recorded.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.level == Level::Error).count()
    }

    /// All collected diagnostics in insertion order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over the error messages only, in insertion order.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
            .map(|d| d.message.as_str())
    }

    /// Render every collected line, joined with newlines.
    pub fn render(&self) -> String {
        let lines: Vec<&str> = self.diagnostics.iter().map(|d| d.message.as_str()).collect();
        lines.join("\n")
    }
}
