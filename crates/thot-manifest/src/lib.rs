//! Manifest handling for the Thot toolkit
//!
//! This crate handles parsing and validation of thot.toml manifests and
//! legacy metadata.json records, resolution into the normalized metadata
//! record consumed by build tooling, and manifest discovery with layering.

pub mod emit;
pub mod json;
pub mod loader;
pub mod toml;

// Re-export main types
pub use emit::{CoreMetadata, EmitFormat};
pub use json::DistMetadata;
pub use loader::{ManifestLoader, ManifestSource};
pub use toml::{EntryPointsSection, PackageSection, ThotToml};

use thot_core::error::ThotError;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ThotError>;
