//! Legacy metadata.json import and serialization
//!
//! Older packaging tools emit a flat JSON metadata record; this module
//! parses that record and converts it into a thot.toml manifest.

use crate::toml::{PackageSection, ThotToml};
use crate::ManifestResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thot_core::error::ThotError;
use thot_core::types::{Author, Requirement};

/// Flat distribution metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistMetadata {
    /// Distribution name (required)
    pub name: String,

    /// Version string (required)
    pub version: String,

    /// One-line description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Author display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Author email
    #[serde(skip_serializing_if = "Option::is_none", rename = "author_email")]
    pub author_email: Option<String>,

    /// Homepage URL
    #[serde(skip_serializing_if = "Option::is_none", rename = "home_page")]
    pub home_page: Option<String>,

    /// License identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Classifier strings
    #[serde(default)]
    pub classifiers: Vec<String>,

    /// Keywords for discovery
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Requirement specifier strings (`pymongo>=3.11.0`)
    #[serde(default)]
    pub requires: Vec<String>,

    /// Named project links
    #[serde(default, rename = "project_urls")]
    pub project_urls: IndexMap<String, String>,

    /// Console-script lines (`thot = thot.cli:main`)
    #[serde(default, rename = "console_scripts")]
    pub console_scripts: Vec<String>,
}

/// Parse JSON string to a DistMetadata record
pub fn parse_dist_metadata(content: &str) -> ManifestResult<DistMetadata> {
    serde_json::from_str(content).map_err(|e| ThotError::JsonParse {
        message: format!("JSON parsing error: {}", e),
    })
}

/// Serialize a DistMetadata record to JSON string
pub fn serialize_dist_metadata(metadata: &DistMetadata) -> ManifestResult<String> {
    serde_json::to_string_pretty(metadata).map_err(|e| ThotError::JsonParse {
        message: format!("JSON serialization error: {}", e),
    })
}

/// Convert a legacy metadata record into a thot.toml manifest
pub fn import_to_thot_toml(metadata: &DistMetadata) -> ManifestResult<ThotToml> {
    let version = metadata.version.parse().map_err(|e| {
        ThotError::validation(
            "version",
            format!("Invalid version '{}': {}", metadata.version, e),
        )
    })?;

    let package = PackageSection {
        name: metadata.name.clone(),
        version,
        description: metadata.summary.clone(),
        authors: extract_authors(metadata)?,
        readme: None,
        readme_content_type: None,
        homepage: metadata.home_page.clone(),
        license: metadata.license.clone(),
        classifiers: metadata.classifiers.clone(),
        keywords: metadata.keywords.clone(),
    };

    let mut manifest = ThotToml {
        package,
        project_urls: metadata.project_urls.clone(),
        ..Default::default()
    };

    for specifier in &metadata.requires {
        let requirement: Requirement = specifier.parse().map_err(|e| {
            ThotError::validation("requires", format!("'{}': {}", specifier, e))
        })?;
        let (key, spec) = dependency_entry(&requirement);
        manifest.dependencies.insert(key, spec);
    }

    for line in &metadata.console_scripts {
        let entry_point: thot_core::types::EntryPoint = line.parse().map_err(|e| {
            ThotError::validation("console_scripts", format!("'{}': {}", line, e))
        })?;
        manifest
            .entry_points
            .console_scripts
            .insert(entry_point.command.clone(), entry_point.reference());
    }

    Ok(manifest)
}

/// Split a requirement into a dependency-table key and constraint value
fn dependency_entry(requirement: &Requirement) -> (String, String) {
    let key = if requirement.extras.is_empty() {
        requirement.name.clone()
    } else {
        format!("{}[{}]", requirement.name, requirement.extras.join(","))
    };

    let spec = match &requirement.constraint {
        Some(constraint) => constraint.to_string(),
        None => "*".to_string(),
    };

    (key, spec)
}

/// Normalize author name/email into the manifest's `Name <email>` form
fn extract_authors(metadata: &DistMetadata) -> ManifestResult<Vec<Author>> {
    let author = match (&metadata.author, &metadata.author_email) {
        (Some(name), Some(email)) => Some(Author::with_email(name.trim(), email.trim())),
        (Some(name), None) => Some(Author::new(name.trim())),
        (None, Some(email)) => Some(Author::new(email.trim())),
        (None, None) => None,
    };

    Ok(author.into_iter().collect())
}

/// Load and parse metadata.json from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ManifestResult<DistMetadata> {
    tracing::debug!("Reading legacy metadata from {}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ThotError::io(format!("Failed to read {}", path), e))?;

    parse_dist_metadata(&content).map_err(|e| match e {
        ThotError::JsonParse { message } => ThotError::JsonParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_METADATA: &str = r#"
{
  "name": "thot-data",
  "version": "0.0.4",
  "summary": "Thot data analysis and management.",
  "author": "Brian Carlsen",
  "author_email": "carlsen.bri@gmail.com",
  "home_page": "https://www.thot-data.com",
  "classifiers": [
    "Programming Language :: Python :: 3",
    "License :: OSI Approved :: MIT License",
    "Operating System :: OS Independent"
  ],
  "requires": ["pymongo"],
  "project_urls": {
    "Documentation": "https://thot-data-docs.readthedocs.io/",
    "Source Code": "https://github.com/bicarlsen/thot-data",
    "Bug Tracker": "https://github.com/bicarlsen/thot-data/issues"
  }
}
"#;

    #[test]
    fn test_parse_legacy_metadata() {
        let metadata = parse_dist_metadata(LEGACY_METADATA).unwrap();
        assert_eq!(metadata.name, "thot-data");
        assert_eq!(metadata.version, "0.0.4");
        assert_eq!(metadata.requires, vec!["pymongo".to_string()]);
        assert_eq!(metadata.project_urls.len(), 3);
    }

    #[test]
    fn test_import_to_thot_toml() {
        let metadata = parse_dist_metadata(LEGACY_METADATA).unwrap();
        let manifest = import_to_thot_toml(&metadata).unwrap();

        assert_eq!(manifest.package.name, "thot-data");
        assert_eq!(manifest.package.version.to_string(), "0.0.4");
        assert_eq!(
            manifest.package.description,
            Some("Thot data analysis and management.".to_string())
        );
        assert_eq!(
            manifest.package.authors[0].to_string(),
            "Brian Carlsen <carlsen.bri@gmail.com>"
        );
        assert_eq!(manifest.dependencies.get("pymongo").unwrap(), "*");
        assert_eq!(manifest.project_urls.len(), 3);

        // Imported manifest passes full validation
        crate::toml::validate_manifest(&manifest).unwrap();
    }

    #[test]
    fn test_import_constrained_requirement() {
        let metadata = DistMetadata {
            requires: vec!["pymongo[srv]>=3.11.0".to_string()],
            ..minimal_metadata()
        };

        let manifest = import_to_thot_toml(&metadata).unwrap();
        assert_eq!(
            manifest.dependencies.get("pymongo[srv]").unwrap(),
            ">=3.11.0"
        );

        let requirements = manifest.requirements().unwrap();
        assert_eq!(requirements[0].name, "pymongo");
        assert_eq!(requirements[0].extras, vec!["srv".to_string()]);
    }

    #[test]
    fn test_import_console_scripts() {
        let metadata = DistMetadata {
            console_scripts: vec!["thot = thot.cli:main".to_string()],
            ..minimal_metadata()
        };

        let manifest = import_to_thot_toml(&metadata).unwrap();
        assert_eq!(
            manifest.entry_points.console_scripts.get("thot").unwrap(),
            "thot.cli:main"
        );
    }

    #[test]
    fn test_import_invalid_version() {
        let metadata = DistMetadata {
            version: "0.0".to_string(),
            ..minimal_metadata()
        };

        assert!(import_to_thot_toml(&metadata).is_err());
    }

    #[test]
    fn test_import_invalid_requirement() {
        let metadata = DistMetadata {
            requires: vec![">=nonsense".to_string()],
            ..minimal_metadata()
        };

        assert!(import_to_thot_toml(&metadata).is_err());
    }

    #[test]
    fn test_round_trip_serialization() {
        let metadata = parse_dist_metadata(LEGACY_METADATA).unwrap();
        let serialized = serialize_dist_metadata(&metadata).unwrap();
        let reparsed = parse_dist_metadata(&serialized).unwrap();

        assert_eq!(metadata, reparsed);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        tokio::fs::write(&path, LEGACY_METADATA).await.unwrap();

        let utf8_path = camino::Utf8Path::from_path(&path).unwrap();
        let metadata = load_from_file(utf8_path).await.unwrap();
        assert_eq!(metadata.name, "thot-data");
    }

    fn minimal_metadata() -> DistMetadata {
        DistMetadata {
            name: "thot-data".to_string(),
            version: "0.0.4".to_string(),
            summary: Some("Thot data analysis and management.".to_string()),
            author: Some("Brian Carlsen".to_string()),
            author_email: Some("carlsen.bri@gmail.com".to_string()),
            home_page: Some("https://www.thot-data.com".to_string()),
            license: None,
            classifiers: Vec::new(),
            keywords: Vec::new(),
            requires: Vec::new(),
            project_urls: IndexMap::new(),
            console_scripts: Vec::new(),
        }
    }
}
