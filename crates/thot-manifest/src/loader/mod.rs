//! Manifest discovery, user-level defaults, and environment overrides

use crate::toml::ThotToml;
use crate::ManifestResult;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thot_core::error::ThotError;
use thot_core::types::Author;

/// Main manifest loading interface
pub struct ManifestLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Where a loaded manifest came from
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestSource {
    /// Project thot.toml file
    ProjectToml(Utf8PathBuf),
    /// Project metadata.json file (legacy fallback)
    ProjectJson(Utf8PathBuf),
}

/// User-level defaults from ~/.thot/manifest.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserDefaults {
    /// Default authors for new manifests
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Default homepage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Default license identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl ManifestLoader {
    /// Create a new manifest loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the project manifest with legacy fallback
    pub async fn load_project_manifest(&self) -> ManifestResult<(ThotToml, ManifestSource)> {
        // First, try to find thot.toml
        let thot_toml_path = self.resolve_manifest_path("thot.toml");
        if thot_toml_path.exists() {
            let manifest = crate::toml::load_from_file(&thot_toml_path).await?;
            return Ok((manifest, ManifestSource::ProjectToml(thot_toml_path)));
        }

        // Fall back to metadata.json if no thot.toml
        let metadata_path = self.resolve_manifest_path("metadata.json");
        if metadata_path.exists() {
            let metadata = crate::json::load_from_file(&metadata_path).await?;
            let manifest = crate::json::import_to_thot_toml(&metadata)?;
            return Ok((manifest, ManifestSource::ProjectJson(metadata_path)));
        }

        Err(ThotError::ManifestNotFound {
            searched: self.cwd.to_string(),
        })
    }

    /// Find a manifest file in the project (walks up the directory tree)
    pub fn resolve_manifest_path(&self, filename: &str) -> Utf8PathBuf {
        let mut current = self.cwd.as_path();

        loop {
            let candidate = current.join(filename);
            if candidate.exists() {
                return candidate;
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // Path in cwd even if it does not exist
        self.cwd.join(filename)
    }

    /// Load user-level defaults from ~/.thot/manifest.toml
    pub async fn load_user_defaults(&self) -> ManifestResult<Option<UserDefaults>> {
        let home_dir = match dirs::home_dir() {
            Some(dir) => dir,
            None => return Ok(None),
        };

        let defaults_path = Utf8PathBuf::from_path_buf(home_dir)
            .map_err(|path| {
                ThotError::validation(
                    "home_dir",
                    format!("Home directory is not valid UTF-8: {}", path.display()),
                )
            })?
            .join(".thot")
            .join("manifest.toml");

        if !defaults_path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&defaults_path)
            .await
            .map_err(|e| ThotError::io(format!("Failed to read {}", defaults_path), e))?;

        let defaults = toml::from_str(&content).map_err(|e| ThotError::TomlParse {
            message: format!("In file {}: {}", defaults_path, e),
        })?;

        Ok(Some(defaults))
    }
}

/// Fill manifest gaps from user-level defaults
pub fn merge_defaults(manifest: &mut ThotToml, defaults: &UserDefaults) {
    if manifest.package.authors.is_empty() {
        manifest.package.authors = defaults.authors.clone();
    }

    if manifest.package.homepage.is_none() {
        manifest.package.homepage = defaults.homepage.clone();
    }

    if manifest.package.license.is_none() {
        manifest.package.license = defaults.license.clone();
    }
}

/// Apply THOT_* environment overrides to a loaded manifest
pub fn apply_env_overrides(
    manifest: &mut ThotToml,
    overrides: &HashMap<String, String>,
) -> ManifestResult<()> {
    for (key, value) in overrides {
        match key.as_str() {
            "THOT_PACKAGE_NAME" => {
                manifest.package.name = value.clone();
            },
            "THOT_PACKAGE_VERSION" => {
                manifest.package.version = value.parse().map_err(|e| {
                    ThotError::validation(
                        "THOT_PACKAGE_VERSION",
                        format!("Invalid version in THOT_PACKAGE_VERSION: {}", e),
                    )
                })?;
            },
            "THOT_PACKAGE_DESCRIPTION" => {
                manifest.package.description = Some(value.clone());
            },
            _ => {
                // Unknown environment variable, ignore
            },
        }
    }

    Ok(())
}

/// Collect THOT_* environment variables
pub fn collect_env_overrides() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("THOT_"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml::PackageSection;
    use thot_core::types::Version;

    const MANIFEST: &str = r#"
[package]
name = "thot-data"
version = "0.0.4"
description = "Thot data analysis and management."
authors = ["Brian Carlsen <carlsen.bri@gmail.com>"]
homepage = "https://www.thot-data.com"
"#;

    fn test_manifest() -> ThotToml {
        ThotToml {
            package: PackageSection {
                name: "thot-data".to_string(),
                version: Version::new(0, 0, 4),
                description: Some("Thot data analysis and management.".to_string()),
                authors: Vec::new(),
                readme: None,
                readme_content_type: None,
                homepage: None,
                license: None,
                classifiers: Vec::new(),
                keywords: Vec::new(),
            },
            ..Default::default()
        }
    }

    fn temp_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[tokio::test]
    async fn test_load_project_manifest_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = temp_root(&dir);
        tokio::fs::write(root.join("thot.toml"), MANIFEST).await.unwrap();

        let loader = ManifestLoader::new(root);
        let (manifest, source) = loader.load_project_manifest().await.unwrap();

        assert_eq!(manifest.package.name, "thot-data");
        assert!(matches!(source, ManifestSource::ProjectToml(_)));
    }

    #[tokio::test]
    async fn test_load_project_manifest_json_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = temp_root(&dir);

        let metadata = r#"
{
  "name": "thot-data",
  "version": "0.0.4",
  "summary": "Thot data analysis and management.",
  "author": "Brian Carlsen",
  "home_page": "https://www.thot-data.com"
}
"#;
        tokio::fs::write(root.join("metadata.json"), metadata).await.unwrap();

        let loader = ManifestLoader::new(root);
        let (manifest, source) = loader.load_project_manifest().await.unwrap();

        assert_eq!(manifest.package.name, "thot-data");
        assert!(matches!(source, ManifestSource::ProjectJson(_)));
    }

    #[tokio::test]
    async fn test_walks_up_to_parent_manifest() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = temp_root(&dir);
        tokio::fs::write(root.join("thot.toml"), MANIFEST).await.unwrap();

        let nested = root.join("analysis").join("scripts");
        tokio::fs::create_dir_all(&nested).await.unwrap();

        let loader = ManifestLoader::new(nested);
        let (manifest, source) = loader.load_project_manifest().await.unwrap();

        assert_eq!(manifest.package.name, "thot-data");
        assert_eq!(
            source,
            ManifestSource::ProjectToml(root.join("thot.toml"))
        );
    }

    #[tokio::test]
    async fn test_missing_manifest_reports_search_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = temp_root(&dir);

        let loader = ManifestLoader::new(root.clone());
        let err = loader.load_project_manifest().await.unwrap_err();

        match err {
            ThotError::ManifestNotFound { searched } => {
                assert_eq!(searched, root.to_string());
            },
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_merge_defaults() {
        let mut manifest = test_manifest();
        let defaults = UserDefaults {
            authors: vec!["Brian Carlsen <carlsen.bri@gmail.com>".parse().unwrap()],
            homepage: Some("https://www.thot-data.com".to_string()),
            license: Some("MIT".to_string()),
        };

        merge_defaults(&mut manifest, &defaults);

        assert_eq!(manifest.package.authors.len(), 1);
        assert_eq!(
            manifest.package.homepage,
            Some("https://www.thot-data.com".to_string())
        );
        assert_eq!(manifest.package.license, Some("MIT".to_string()));

        // Existing values are not overwritten
        manifest.package.license = Some("Apache-2.0".to_string());
        merge_defaults(&mut manifest, &defaults);
        assert_eq!(manifest.package.license, Some("Apache-2.0".to_string()));
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut manifest = test_manifest();
        let overrides = HashMap::from([
            ("THOT_PACKAGE_DESCRIPTION".to_string(), "Overridden".to_string()),
            ("THOT_PACKAGE_VERSION".to_string(), "0.1.0".to_string()),
            ("UNRELATED_VAR".to_string(), "ignored".to_string()),
        ]);

        apply_env_overrides(&mut manifest, &overrides).unwrap();

        assert_eq!(manifest.package.description, Some("Overridden".to_string()));
        assert_eq!(manifest.package.version.to_string(), "0.1.0");
        assert_eq!(manifest.package.name, "thot-data");
    }

    #[test]
    fn test_apply_env_overrides_invalid_version() {
        let mut manifest = test_manifest();
        let overrides = HashMap::from([
            ("THOT_PACKAGE_VERSION".to_string(), "not-a-version".to_string()),
        ]);

        assert!(apply_env_overrides(&mut manifest, &overrides).is_err());
    }
}
