//! # thot-core
//!
//! Core types shared across the Thot manifest toolkit.
//!
//! This crate provides:
//! - Version type for three-part distribution versions
//! - Author, Requirement, and EntryPoint manifest field types
//! - ContentType for long-description tagging
//! - ThotError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Manifest field types (Version, Author, Requirement, ...)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ThotError, ThotResult};
pub use types::{Author, ContentType, EntryPoint, Requirement, Version};
