//! Terminal color support detection and formatting.
//!
//! Respects the NO_COLOR environment variable and falls back to plain text
//! when stdout/stderr are not terminals.

use std::env;
use std::io::{self, IsTerminal};

/// Color support detection and formatting
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        Self {
            enabled: Self::should_use_colors(),
        }
    }

    /// Force enable colors
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Force disable colors
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors should be used
    fn should_use_colors() -> bool {
        if env::var("NO_COLOR").is_ok() {
            return false;
        }

        io::stderr().is_terminal() && io::stdout().is_terminal()
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    /// Format text in green
    pub fn green(&self, text: &str) -> String {
        self.wrap("32", text)
    }

    /// Format text in yellow
    pub fn yellow(&self, text: &str) -> String {
        self.wrap("33", text)
    }

    /// Format text in red
    pub fn red(&self, text: &str) -> String {
        self.wrap("31", text)
    }

    /// Format text as dim/gray
    pub fn dim(&self, text: &str) -> String {
        self.wrap("2", text)
    }

    /// Format text as bold
    pub fn bold(&self, text: &str) -> String {
        self.wrap("1", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_passes_through() {
        let colors = ColorSupport::disabled();
        assert_eq!(colors.green("ok"), "ok");
        assert_eq!(colors.bold("ok"), "ok");
    }

    #[test]
    fn test_enabled_wraps_with_ansi() {
        let colors = ColorSupport::enabled();
        assert_eq!(colors.red("bad"), "\x1b[31mbad\x1b[0m");
    }
}
