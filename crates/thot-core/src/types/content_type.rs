//! Long-description content types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Content-type tag for the long description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "text/markdown")]
    Markdown,
    #[serde(rename = "text/x-rst")]
    Rst,
    #[serde(rename = "text/plain")]
    Plain,
}

/// Content-type parsing errors
#[derive(Error, Debug)]
pub enum ContentTypeError {
    #[error("Unknown content type '{input}': expected text/markdown, text/x-rst, or text/plain")]
    Unknown { input: String },
}

impl ContentType {
    /// Infer the content type from a readme file name
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            ContentType::Markdown
        } else if lower.ends_with(".rst") {
            ContentType::Rst
        } else {
            ContentType::Plain
        }
    }

    /// MIME tag as written in emitted metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Markdown => "text/markdown",
            ContentType::Rst => "text/x-rst",
            ContentType::Plain => "text/plain",
        }
    }
}

impl FromStr for ContentType {
    type Err = ContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text/markdown" => Ok(ContentType::Markdown),
            "text/x-rst" => Ok(ContentType::Rst),
            "text/plain" => Ok(ContentType::Plain),
            other => Err(ContentTypeError::Unknown {
                input: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
