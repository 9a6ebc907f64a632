//! `thot init` command implementation.
//!
//! Creates a thot.toml in the current directory, importing from an existing
//! metadata.json when one is present.

use super::CommandContext;
use camino::Utf8Path;
use thot_core::error::{ThotError, ThotResult};
use thot_core::types::{Author, Version};
use thot_manifest::loader::{merge_defaults, ManifestLoader};
use thot_manifest::toml::{serialize_thot_toml, PackageSection, ThotToml};

/// Execute the `thot init` command
pub async fn execute(ctx: &CommandContext) -> ThotResult<()> {
    let thot_toml_path = ctx.cwd.join("thot.toml");
    let metadata_path = ctx.cwd.join("metadata.json");

    // Repeated init is a no-op
    if thot_toml_path.exists() {
        ctx.output.info("thot.toml already exists, skipping initialization");
        return Ok(());
    }

    ctx.output.step("Initializing manifest in current directory");

    let loader = ManifestLoader::new(ctx.cwd.clone());
    let defaults = loader.load_user_defaults().await?.unwrap_or_default();

    let mut manifest = if metadata_path.exists() {
        ctx.output.info("Found metadata.json, importing configuration...");
        import_from_metadata(&metadata_path).await?
    } else {
        default_manifest(&ctx.cwd)
    };

    merge_defaults(&mut manifest, &defaults);
    fill_placeholders(&mut manifest);

    let content = serialize_thot_toml(&manifest)?;
    tokio::fs::write(&thot_toml_path, content)
        .await
        .map_err(|e| ThotError::io(format!("Failed to create {}", thot_toml_path), e))?;

    ctx.output.success("Created thot.toml");

    // Scaffold a readme when the manifest points at one that is missing
    if let Some(readme) = manifest.package.readme.clone() {
        let readme_path = ctx.cwd.join(&readme);
        if !readme_path.exists() {
            create_readme(&readme_path, &manifest).await?;
            ctx.output.success(&format!("Created {}", readme));
        }
    }

    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output.info("  review the authors and homepage fields in thot.toml");
    ctx.output.info("  thot check");

    Ok(())
}

/// Import a manifest from a legacy metadata.json record
async fn import_from_metadata(metadata_path: &Utf8Path) -> ThotResult<ThotToml> {
    let metadata = thot_manifest::json::load_from_file(metadata_path).await?;
    thot_manifest::json::import_to_thot_toml(&metadata)
}

/// Build a default manifest seeded from the directory name
fn default_manifest(cwd: &Utf8Path) -> ThotToml {
    let name = cwd
        .file_name()
        .filter(|name| thot_core::types::Requirement::is_valid_name(name))
        .unwrap_or("my-thot-project")
        .to_string();

    ThotToml {
        package: PackageSection {
            name,
            version: Version::new(0, 1, 0),
            description: Some("Thot data analysis and management.".to_string()),
            authors: Vec::new(),
            readme: Some("README.md".to_string()),
            readme_content_type: None,
            homepage: None,
            license: Some("MIT".to_string()),
            classifiers: vec![
                "License :: OSI Approved :: MIT License".to_string(),
                "Operating System :: OS Independent".to_string(),
            ],
            keywords: Vec::new(),
        },
        ..Default::default()
    }
}

/// Fill required fields the user still has to edit, so the scaffold passes
/// `thot check` out of the box
fn fill_placeholders(manifest: &mut ThotToml) {
    if manifest.package.authors.is_empty() {
        manifest
            .package
            .authors
            .push(Author::with_email("Your Name", "you@example.com"));
    }

    if manifest.package.homepage.is_none() {
        manifest.package.homepage = Some("https://example.com".to_string());
    }

    if manifest.package.description.is_none() {
        manifest.package.description = Some("Describe this package.".to_string());
    }
}

/// Write a starter readme matching the manifest
async fn create_readme(path: &Utf8Path, manifest: &ThotToml) -> ThotResult<()> {
    let description = manifest.package.description.as_deref().unwrap_or("");
    let content = format!("# {}\n\n{}\n", manifest.package.name, description);

    tokio::fs::write(path, content)
        .await
        .map_err(|e| ThotError::io(format!("Failed to create {}", path), e))
}
