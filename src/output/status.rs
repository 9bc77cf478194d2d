//! Outcome markers printed when an operation ends.

use owo_colors::{AnsiColors, OwoColorize};
use std::fmt;

/// A one-character glyph and the color it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOperationStatus {
    glyph: char,
    color: AnsiColors,
}

impl EndOperationStatus {
    pub const fn new(glyph: char, color: AnsiColors) -> Self {
        Self { glyph, color }
    }

    /// Green check mark.
    pub const fn success() -> Self {
        Self::new('✓', AnsiColors::Green)
    }

    /// Red cross.
    pub const fn failure() -> Self {
        Self::new('✗', AnsiColors::Red)
    }

    /// Yellow empty set, for steps that were neither done nor failed.
    pub const fn skipped() -> Self {
        Self::new('∅', AnsiColors::Yellow)
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn color(&self) -> AnsiColors {
        self.color
    }

    /// The final line of an operation: ` <colored glyph> <status>`.
    pub fn colored_line(&self, status: &str) -> String {
        format!(" {} {status}", self.glyph.color(self.color))
    }

    /// Same as [`colored_line`](Self::colored_line) without escape codes.
    pub fn plain_line(&self, status: &str) -> String {
        format!(" {} {status}", self.glyph)
    }
}

impl From<bool> for EndOperationStatus {
    fn from(success: bool) -> Self {
        if success {
            Self::success()
        } else {
            Self::failure()
        }
    }
}

impl fmt::Display for EndOperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_lines() {
        assert_eq!(
            EndOperationStatus::success().colored_line("working"),
            " \x1b[32m✓\x1b[39m working"
        );
        assert_eq!(
            EndOperationStatus::failure().colored_line("working"),
            " \x1b[31m✗\x1b[39m working"
        );
        assert_eq!(
            EndOperationStatus::skipped().colored_line("skipped"),
            " \x1b[33m∅\x1b[39m skipped"
        );
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(EndOperationStatus::failure().plain_line("x"), " ✗ x");
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(EndOperationStatus::from(true), EndOperationStatus::success());
        assert_eq!(EndOperationStatus::from(false), EndOperationStatus::failure());
    }
}
