//! `thot check` command implementation.
//!
//! Loads the project manifest, applies environment overrides, and runs full
//! validation plus metadata resolution (so a missing readme is caught too).

use super::CommandContext;
use thot_core::error::ThotResult;
use thot_manifest::emit::resolve_metadata;
use thot_manifest::loader::{apply_env_overrides, collect_env_overrides, ManifestLoader, ManifestSource};
use thot_manifest::toml::validate_manifest;

/// Execute the `thot check` command
pub async fn execute(ctx: &CommandContext) -> ThotResult<()> {
    ctx.output.step("Checking project manifest");

    let loader = ManifestLoader::new(ctx.cwd.clone());
    let (mut manifest, source) = loader.load_project_manifest().await?;

    let (source_label, manifest_path) = match &source {
        ManifestSource::ProjectToml(path) => ("thot.toml", path.clone()),
        ManifestSource::ProjectJson(path) => ("metadata.json (imported)", path.clone()),
    };
    ctx.output.info(&format!("Using {} at {}", source_label, manifest_path));

    apply_env_overrides(&mut manifest, &collect_env_overrides())?;

    // The TOML load path validates on parse; the JSON import path and env
    // overrides have not been validated yet
    validate_manifest(&manifest)?;

    let root = manifest_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ctx.cwd.clone());
    let metadata = resolve_metadata(&manifest, &root).await?;

    ctx.output.success(&format!(
        "{} v{} is valid",
        metadata.name, metadata.version
    ));
    ctx.output.info(&format!(
        "  {} dependency(ies), {} classifier(s), {} project URL(s), {} console script(s)",
        metadata.requires.len(),
        metadata.classifiers.len(),
        metadata.project_urls.len(),
        metadata.console_scripts.len(),
    ));

    Ok(())
}
