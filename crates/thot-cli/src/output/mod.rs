//! Terminal output formatting.
//!
//! Provides consistent output formatting across all commands, including
//! color handling and labeled metadata fields.

pub mod colors;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colors.red("✗"), message);
    }

    /// Print a step message
    pub fn step(&self, message: &str) {
        println!("{} {}", self.colors.bold("→"), message);
    }

    /// Print a labeled metadata field
    pub fn field(&self, label: &str, value: &str) {
        println!("{:<26} {}", self.colors.bold(label), value);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
