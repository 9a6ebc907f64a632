//! `thot emit` command implementation.
//!
//! Resolves the manifest and writes the normalized metadata record for
//! external build tooling.

use super::CommandContext;
use camino::Utf8PathBuf;
use thot_core::error::{ThotError, ThotResult};
use thot_manifest::emit::{emit_json, emit_toml, resolve_metadata, EmitFormat};
use thot_manifest::loader::{ManifestLoader, ManifestSource};

/// Execute the `thot emit` command
pub async fn execute(
    format: String,
    out: Option<Utf8PathBuf>,
    ctx: &CommandContext,
) -> ThotResult<()> {
    let format: EmitFormat = format.parse()?;

    let loader = ManifestLoader::new(ctx.cwd.clone());
    let (manifest, source) = loader.load_project_manifest().await?;

    let manifest_path = match &source {
        ManifestSource::ProjectToml(path) | ManifestSource::ProjectJson(path) => path.clone(),
    };
    let root = manifest_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ctx.cwd.clone());

    let metadata = resolve_metadata(&manifest, &root).await?;

    let rendered = match format {
        EmitFormat::Json => emit_json(&metadata)?,
        EmitFormat::Toml => emit_toml(&metadata)?,
    };

    match out {
        Some(path) => {
            tokio::fs::write(&path, rendered)
                .await
                .map_err(|e| ThotError::io(format!("Failed to write {}", path), e))?;
            ctx.output.success(&format!("Wrote metadata to {}", path));
        },
        None => {
            print!("{}", rendered);
        },
    }

    Ok(())
}
