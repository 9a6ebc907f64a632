//! Normalized metadata resolution and emission
//!
//! A manifest becomes a `CoreMetadata` record by inlining the long
//! description from the readme file, resolving the content type, and putting
//! list fields into canonical order. The resolved record serializes
//! deterministically: emit, re-parse, emit again yields identical bytes.

use crate::toml::{validate_manifest, ThotToml};
use crate::ManifestResult;
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thot_core::error::ThotError;
use thot_core::types::{Author, ContentType, Requirement, Version};

/// Fully-resolved metadata record consumed by build/index tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMetadata {
    pub name: String,
    pub version: Version,
    pub summary: String,
    pub authors: Vec<Author>,
    pub homepage: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Long-description text, inlined from the readme file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_content_type: Option<ContentType>,

    /// Classifiers, sorted and deduplicated
    pub classifiers: Vec<String>,

    pub keywords: Vec<String>,

    /// Requirements, sorted by distribution name
    pub requires: Vec<Requirement>,

    /// Project links, manifest order preserved
    pub project_urls: IndexMap<String, String>,

    /// Data-file globs per package, manifest order preserved
    pub package_data: IndexMap<String, Vec<String>>,

    /// Console scripts (command -> object reference), sorted by command
    pub console_scripts: IndexMap<String, String>,
}

/// Output format for emitted metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitFormat {
    Json,
    Toml,
}

impl FromStr for EmitFormat {
    type Err = ThotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(EmitFormat::Json),
            "toml" => Ok(EmitFormat::Toml),
            other => Err(ThotError::validation(
                "format",
                format!("unknown format '{}': expected 'json' or 'toml'", other),
            )),
        }
    }
}

/// Resolve a manifest into its normalized metadata record
///
/// `root` is the directory holding the manifest; the readme path is resolved
/// against it.
pub async fn resolve_metadata(
    manifest: &ThotToml,
    root: &Utf8Path,
) -> ManifestResult<CoreMetadata> {
    validate_manifest(manifest)?;

    let package = &manifest.package;

    let (description, description_content_type) = match &package.readme {
        Some(readme) => {
            let path = root.join(readme);
            let text = read_readme(&path).await?;
            let content_type = package
                .readme_content_type
                .unwrap_or_else(|| ContentType::from_file_name(readme));
            (Some(text), Some(content_type))
        },
        None => (None, None),
    };

    let mut classifiers = package.classifiers.clone();
    classifiers.sort();
    classifiers.dedup();

    let mut requires = manifest.requirements()?;
    requires.sort_by(|a, b| a.name.cmp(&b.name));

    let mut console_scripts: Vec<(String, String)> = manifest
        .console_entry_points()?
        .into_iter()
        .map(|ep| (ep.command.clone(), ep.reference()))
        .collect();
    console_scripts.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(CoreMetadata {
        name: package.name.clone(),
        version: package.version.clone(),
        summary: package.description.clone().unwrap_or_default(),
        authors: package.authors.clone(),
        homepage: package.homepage.clone().unwrap_or_default(),
        license: package.license.clone(),
        description,
        description_content_type,
        classifiers,
        keywords: package.keywords.clone(),
        requires,
        project_urls: manifest.project_urls.clone(),
        package_data: manifest.package_data.clone(),
        console_scripts: console_scripts.into_iter().collect(),
    })
}

/// Read the readme file, mapping a missing file to ReadmeNotFound
async fn read_readme(path: &Utf8Path) -> ManifestResult<String> {
    tracing::debug!("Inlining long description from {}", path);

    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ThotError::ReadmeNotFound {
            path: path.to_string(),
        }),
        Err(e) => Err(ThotError::io(format!("Failed to read {}", path), e)),
    }
}

/// Emit the record as pretty-printed JSON (newline-terminated)
pub fn emit_json(metadata: &CoreMetadata) -> ManifestResult<String> {
    let mut out = serde_json::to_string_pretty(metadata).map_err(|e| ThotError::Serialize {
        message: format!("JSON serialization error: {}", e),
    })?;
    out.push('\n');
    Ok(out)
}

/// Emit the record as TOML
pub fn emit_toml(metadata: &CoreMetadata) -> ManifestResult<String> {
    toml::to_string_pretty(metadata).map_err(|e| ThotError::Serialize {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Parse previously emitted JSON metadata
pub fn parse_emitted_json(content: &str) -> ManifestResult<CoreMetadata> {
    serde_json::from_str(content).map_err(|e| ThotError::JsonParse {
        message: format!("JSON parsing error: {}", e),
    })
}
