//! Author identity parsing.
//!
//! Manifests carry authors in the conventional `Name <email>` form; this
//! module parses and re-renders that form.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Package author identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
}

/// Author parsing errors
#[derive(Error, Debug)]
pub enum AuthorError {
    #[error("Author entry is empty")]
    Empty,

    #[error("Invalid author email: {email}")]
    InvalidEmail { email: String },

    #[error("Unclosed email bracket in author entry: {input}")]
    UnclosedBracket { input: String },
}

impl Author {
    /// Create an author with name only
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    /// Create an author with name and email
    pub fn with_email(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
        }
    }
}

/// Minimal email shape check: one '@', non-empty local part, dotted domain
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains(char::is_whitespace)
                && !local.contains(char::is_whitespace)
        },
        None => false,
    }
}

impl FromStr for Author {
    type Err = AuthorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(AuthorError::Empty);
        }

        match input.split_once('<') {
            Some((name, rest)) => {
                let email = rest.strip_suffix('>').ok_or_else(|| {
                    AuthorError::UnclosedBracket {
                        input: input.to_string(),
                    }
                })?;
                let email = email.trim();
                let name = name.trim();

                if !is_plausible_email(email) {
                    return Err(AuthorError::InvalidEmail {
                        email: email.to_string(),
                    });
                }
                if name.is_empty() {
                    return Err(AuthorError::Empty);
                }

                Ok(Author::with_email(name, email))
            },
            None => Ok(Author::new(input)),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Serialize for Author {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Author {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}
