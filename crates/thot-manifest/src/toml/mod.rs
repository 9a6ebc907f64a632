//! thot.toml manifest parsing and serialization

use crate::ManifestResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thot_core::error::ThotError;
use thot_core::types::{Author, ContentType, EntryPoint, Requirement, Version};
use url::Url;

/// Complete thot.toml manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ThotToml {
    /// Package metadata section
    pub package: PackageSection,

    /// Named project links (label -> URL)
    #[serde(default, rename = "project-urls")]
    pub project_urls: IndexMap<String, String>,

    /// Runtime dependencies (name -> constraint string or "*")
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    /// Non-code data files to include (package -> glob patterns)
    #[serde(default, rename = "package-data")]
    pub package_data: IndexMap<String, Vec<String>>,

    /// Generated command-line entry points
    #[serde(default, rename = "entry-points")]
    pub entry_points: EntryPointsSection,
}

/// Package metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Distribution name (required)
    pub name: String,

    /// Distribution version (required)
    pub version: Version,

    /// One-line description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Authors in `Name <email>` form
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Path to the long-description file, relative to the manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,

    /// Content-type override for the long description
    #[serde(skip_serializing_if = "Option::is_none", rename = "readme-content-type")]
    pub readme_content_type: Option<ContentType>,

    /// Homepage URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// License identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Classifier strings for index filtering
    #[serde(default)]
    pub classifiers: Vec<String>,

    /// Keywords for discovery
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Entry-points section (only console scripts are recognized)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EntryPointsSection {
    /// Command name -> `module.path:callable`
    #[serde(default, rename = "console-scripts")]
    pub console_scripts: IndexMap<String, String>,
}

impl ThotToml {
    /// Typed runtime requirements in manifest order
    pub fn requirements(&self) -> ManifestResult<Vec<Requirement>> {
        self.dependencies
            .iter()
            .map(|(name, spec)| requirement_from_entry(name, spec))
            .collect()
    }

    /// Typed console entry points in manifest order
    pub fn console_entry_points(&self) -> ManifestResult<Vec<EntryPoint>> {
        self.entry_points
            .console_scripts
            .iter()
            .map(|(command, reference)| {
                EntryPoint::parse_reference(command, reference).map_err(|e| {
                    ThotError::validation(
                        format!("entry-points.console-scripts.{}", command),
                        e.to_string(),
                    )
                })
            })
            .collect()
    }
}

/// Combine a dependency table entry into a requirement specifier
fn requirement_from_entry(name: &str, spec: &str) -> ManifestResult<Requirement> {
    let spec = spec.trim();
    let combined = if spec == "*" || spec.is_empty() {
        name.to_string()
    } else if spec.starts_with(['=', '>', '<', '~']) {
        format!("{}{}", name, spec)
    } else {
        // A bare version like "3.11.0" would otherwise concatenate into a
        // different package name
        return Err(ThotError::validation(
            format!("dependencies.{}", name),
            format!(
                "'{}' is not a valid constraint: expected '*' or an operator-prefixed \
                 version such as '=={}'",
                spec, spec
            ),
        ));
    };

    combined.parse().map_err(|e| {
        ThotError::validation(format!("dependencies.{}", name), format!("{}", e))
    })
}

/// Parse TOML string to a ThotToml manifest
pub fn parse_thot_toml(content: &str) -> ManifestResult<ThotToml> {
    // First pass with toml_edit for located syntax errors (a manifest with
    // missing separators fails here with line/column context)
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| ThotError::TomlParse {
            message: format!("TOML syntax error: {}", e),
        })?;

    // Then parse with serde for type safety
    let manifest: ThotToml = toml::from_str(content).map_err(|e| ThotError::TomlParse {
        message: format!("TOML parsing error: {}", e),
    })?;

    // Validate required fields
    validate_manifest(&manifest)?;

    Ok(manifest)
}

/// Serialize a ThotToml manifest to TOML string
pub fn serialize_thot_toml(manifest: &ThotToml) -> ManifestResult<String> {
    toml::to_string_pretty(manifest).map_err(|e| ThotError::Serialize {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Validate manifest completeness and field shapes
pub fn validate_manifest(manifest: &ThotToml) -> ManifestResult<()> {
    let package = &manifest.package;

    if package.name.is_empty() {
        return Err(ThotError::validation(
            "package.name",
            "name is required in the [package] section",
        ));
    }

    if !Requirement::is_valid_name(&package.name) {
        return Err(ThotError::validation(
            "package.name",
            format!(
                "'{}' is not a valid distribution name (alphanumeric with '-', '_', '.' separators)",
                package.name
            ),
        ));
    }

    match &package.description {
        Some(description) if !description.trim().is_empty() => {},
        _ => {
            return Err(ThotError::validation(
                "package.description",
                "a non-empty description is required",
            ));
        },
    }

    if package.authors.is_empty() {
        return Err(ThotError::validation(
            "package.authors",
            "at least one author is required",
        ));
    }

    match &package.homepage {
        Some(homepage) => validate_url("package.homepage", homepage)?,
        None => {
            return Err(ThotError::validation(
                "package.homepage",
                "a homepage URL is required",
            ));
        },
    }

    for classifier in &package.classifiers {
        validate_classifier(classifier)?;
    }

    for (label, url) in &manifest.project_urls {
        if label.trim().is_empty() {
            return Err(ThotError::validation(
                "project-urls",
                "URL labels must not be empty",
            ));
        }
        validate_url(&format!("project-urls.{}", label), url)?;
    }

    // Parse every dependency entry into a requirement
    manifest.requirements()?;

    // Parse every console script into an entry point
    manifest.console_entry_points()?;

    for package_name in manifest.package_data.keys() {
        if !Requirement::is_valid_name(package_name) {
            return Err(ThotError::validation(
                format!("package-data.{}", package_name),
                "package-data keys must be valid package names",
            ));
        }
    }

    Ok(())
}

/// Validate an absolute http(s) URL
fn validate_url(field: &str, value: &str) -> ManifestResult<()> {
    let parsed = Url::parse(value).map_err(|e| {
        ThotError::validation(field, format!("'{}' is not a valid URL: {}", value, e))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ThotError::validation(
            field,
            format!("'{}' must use http or https", value),
        ));
    }

    Ok(())
}

/// Validate a classifier string (`Topic :: Sub :: Leaf`)
fn validate_classifier(classifier: &str) -> ManifestResult<()> {
    let segments: Vec<&str> = classifier.split("::").map(str::trim).collect();

    if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
        return Err(ThotError::validation(
            "package.classifiers",
            format!(
                "'{}' is not a valid classifier (expected 'Segment :: Segment' form)",
                classifier
            ),
        ));
    }

    Ok(())
}

/// Load and parse thot.toml from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ManifestResult<ThotToml> {
    tracing::debug!("Reading manifest from {}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ThotError::io(format!("Failed to read {}", path), e))?;

    parse_thot_toml(&content).map_err(|e| match e {
        ThotError::TomlParse { message } => ThotError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        ThotError::Validation { field, reason } => ThotError::Validation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })
}
