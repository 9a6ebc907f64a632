//! Console entry-point references.
//!
//! An entry point maps an installed command name to the object that runs
//! when the command is invoked: `thot = thot.cli:main`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Console-script entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Installed command name
    pub command: String,
    /// Dotted module path
    pub module: String,
    /// Callable within the module
    pub callable: String,
}

/// Entry-point parsing errors
#[derive(Error, Debug)]
pub enum EntryPointError {
    #[error("Invalid entry point '{input}': expected 'command = module.path:callable'")]
    InvalidFormat { input: String },

    #[error("Invalid entry-point command name: {command}")]
    InvalidCommand { command: String },

    #[error("Invalid entry-point object reference: {reference}")]
    InvalidReference { reference: String },
}

impl EntryPoint {
    /// Build an entry point from a command name and object reference
    pub fn parse_reference(command: &str, reference: &str) -> Result<Self, EntryPointError> {
        if !Self::is_valid_command(command) {
            return Err(EntryPointError::InvalidCommand {
                command: command.to_string(),
            });
        }

        let (module, callable) =
            reference
                .split_once(':')
                .ok_or_else(|| EntryPointError::InvalidReference {
                    reference: reference.to_string(),
                })?;

        let module = module.trim();
        let callable = callable.trim();

        if !is_dotted_path(module) || !is_identifier(callable) {
            return Err(EntryPointError::InvalidReference {
                reference: reference.to_string(),
            });
        }

        Ok(Self {
            command: command.to_string(),
            module: module.to_string(),
            callable: callable.to_string(),
        })
    }

    /// Check if a string is usable as an installed command name
    pub fn is_valid_command(command: &str) -> bool {
        !command.is_empty()
            && command
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && command.chars().next().map_or(false, |c| c.is_ascii_alphanumeric())
    }

    /// The object reference half (`module.path:callable`)
    pub fn reference(&self) -> String {
        format!("{}:{}", self.module, self.callable)
    }
}

/// Check a dotted module path: identifiers joined by dots
fn is_dotted_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_identifier)
}

/// Check a single identifier segment
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for EntryPoint {
    type Err = EntryPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (command, reference) =
            s.split_once('=')
                .ok_or_else(|| EntryPointError::InvalidFormat {
                    input: s.to_string(),
                })?;

        Self::parse_reference(command.trim(), reference.trim())
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}:{}", self.command, self.module, self.callable)
    }
}
