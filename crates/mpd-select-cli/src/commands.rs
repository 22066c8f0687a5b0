//! CLI command implementations

use crate::output::{render, OutputFormat};
use anyhow::Context;
use mpd_select_core::{ManifestDocument, SelectionConfig, SelectionSession};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;
use tracing::{debug, warn};

#[derive(Serialize, Tabled)]
struct CategoryRow {
    identity: String,
    role: String,
    #[tabled(rename = "mime type")]
    mime_type: String,
}

#[derive(Serialize, Tabled)]
struct BandwidthRow {
    bandwidth: u64,
}

#[derive(Serialize, Tabled)]
struct KeyRow {
    position: u64,
    #[tabled(rename = "mime type")]
    mime_type: String,
    role: String,
    bandwidth: u64,
}

/// Load the selection config, or defaults when no path is given
pub async fn load_config(path: Option<&Path>) -> anyhow::Result<SelectionConfig> {
    let Some(path) = path else {
        return Ok(SelectionConfig::default());
    };
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = SelectionConfig::from_json_str(&content)?;
    debug!(?config, "Loaded selection config");
    Ok(config)
}

/// Role given on the command line, or the configured default role
fn role_or_default<'a>(role: Option<&'a str>, config: &'a SelectionConfig) -> &'a str {
    role.unwrap_or(config.default_role.as_str())
}

async fn load_manifest(path: &Path) -> anyhow::Result<ManifestDocument> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let doc = ManifestDocument::parse(&content)
        .with_context(|| format!("failed to parse manifest {}", path.display()))?;
    Ok(doc)
}

/// List content categories
pub async fn categories(manifest: &Path, config: &SelectionConfig, format: &str) -> anyhow::Result<()> {
    let doc = load_manifest(manifest).await?;
    let session = SelectionSession::with_config(&doc, config.clone())?;

    let rows: Vec<CategoryRow> = session
        .categories()
        .into_iter()
        .map(|c| CategoryRow {
            identity: c.identity().to_string(),
            role: c.role().to_string(),
            mime_type: c.mime_type().to_string(),
        })
        .collect();

    if rows.is_empty() {
        warn!(manifest = %manifest.display(), "No categories found");
    }

    println!("{}", render(&rows, OutputFormat::from(format), |r| r.identity.clone())?);
    Ok(())
}

/// List bandwidths of one category
pub async fn bandwidths(
    manifest: &Path,
    role: Option<&str>,
    mime_type: &str,
    config: &SelectionConfig,
    format: &str,
) -> anyhow::Result<()> {
    let role = role_or_default(role, config);
    let doc = load_manifest(manifest).await?;
    let session = SelectionSession::with_config(&doc, config.clone())?;

    let rows: Vec<BandwidthRow> = session
        .bandwidths_for(role, mime_type)
        .into_iter()
        .map(|bandwidth| BandwidthRow { bandwidth })
        .collect();

    if rows.is_empty() {
        warn!(role, mime_type, "Category has no usable bandwidths");
    }

    println!("{}", render(&rows, OutputFormat::from(format), |r| r.bandwidth.to_string())?);
    Ok(())
}

/// Build and validate a selection key
pub async fn key(
    manifest: &Path,
    position: u64,
    role: Option<&str>,
    mime_type: &str,
    bandwidth: u64,
    config: &SelectionConfig,
    format: &str,
) -> anyhow::Result<()> {
    let role = role_or_default(role, config);
    let doc = load_manifest(manifest).await?;
    let session = SelectionSession::with_config(&doc, config.clone())?;
    let key = session.key(position, role, mime_type, bandwidth)?;

    let row = KeyRow {
        position: key.position,
        mime_type: key.mime_type,
        role: key.role,
        bandwidth: key.bandwidth,
    };

    let out = match OutputFormat::from(format) {
        // A single key prints as an object rather than a one-element array
        OutputFormat::Json => serde_json::to_string_pretty(&row)?,
        fmt => render(std::slice::from_ref(&row), fmt, |r| {
            format!(
                "position={} mime_type={} role={} bandwidth={}",
                r.position, r.mime_type, r.role, r.bandwidth
            )
        })?,
    };
    println!("{}", out);
    Ok(())
}
