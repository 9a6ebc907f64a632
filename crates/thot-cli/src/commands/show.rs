//! `thot show` command implementation.
//!
//! Prints the resolved metadata record, either human-readable or as the
//! emitted JSON form.

use super::CommandContext;
use thot_core::error::ThotResult;
use thot_manifest::emit::{emit_json, resolve_metadata, CoreMetadata};
use thot_manifest::loader::{ManifestLoader, ManifestSource};

/// Execute the `thot show` command
pub async fn execute(json: bool, ctx: &CommandContext) -> ThotResult<()> {
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

    if json {
        print!("{}", emit_json(&metadata)?);
    } else {
        print_human(&metadata, ctx);
    }

    Ok(())
}

fn print_human(metadata: &CoreMetadata, ctx: &CommandContext) {
    ctx.output.field("name", &metadata.name);
    ctx.output.field("version", &metadata.version.to_string());
    ctx.output.field("summary", &metadata.summary);

    for author in &metadata.authors {
        ctx.output.field("author", &author.to_string());
    }

    ctx.output.field("homepage", &metadata.homepage);

    if let Some(license) = &metadata.license {
        ctx.output.field("license", license);
    }

    if let Some(content_type) = &metadata.description_content_type {
        ctx.output.field("description-content-type", content_type.as_str());
    }

    for classifier in &metadata.classifiers {
        ctx.output.field("classifier", classifier);
    }

    for (label, url) in &metadata.project_urls {
        ctx.output.field("project-url", &format!("{}: {}", label, url));
    }

    for requirement in &metadata.requires {
        ctx.output.field("requires", &requirement.to_string());
    }

    for (command, reference) in &metadata.console_scripts {
        ctx.output.field("console-script", &format!("{} = {}", command, reference));
    }
}
