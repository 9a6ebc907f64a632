//! Manifest field types.
//!
//! This module provides the typed building blocks of a packaging manifest:
//! - Version for three-part distribution versions
//! - Author identity parsing (`Name <email>`)
//! - Requirement dependency specifiers
//! - EntryPoint console-script references
//! - ContentType tags for long descriptions

pub mod author;
pub mod content_type;
pub mod entry_point;
pub mod requirement;
pub mod version;

// Re-export all public types
pub use author::Author;
pub use content_type::ContentType;
pub use entry_point::EntryPoint;
pub use requirement::{Constraint, ConstraintOp, Requirement};
pub use version::{Version, VersionError};
