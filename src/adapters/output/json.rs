//! JSON file sinks
//!
//! [`JsonFileSink`] writes one pretty-printed document per unit;
//! [`JsonLinesFileSink`] flattens the document into one line per asset, or
//! one line per domain when assets were not exported. Files are named after
//! the unit and overwritten on every run.

use super::traits::{OutputLocation, OutputSink};
use crate::core::export::{CommunitySection, DomainSection, ExportDocument};
use crate::domain::{OutputFormat, Result, StewardError};
use async_trait::async_trait;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Hex-encoded SHA-256 of `bytes`
pub(crate) fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// File name for a unit, safe on every platform
///
/// Characters outside `[A-Za-z0-9._-]` become `_`; a name with nothing
/// left becomes `unnamed`.
pub(crate) fn file_name(unit_name: &str, format: OutputFormat) -> String {
    let stem: String = unit_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.');
    let stem = if stem.is_empty() { "unnamed" } else { stem };

    format!("{stem}.{}", format.extension())
}

/// Render a document in the given format
pub(crate) fn render(document: &ExportDocument, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(document)?),
        OutputFormat::Jsonl => render_lines(document),
    }
}

fn render_lines(document: &ExportDocument) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for section in &document.communities {
        for domain in &section.domains {
            match &domain.assets {
                Some(assets) => {
                    for asset in assets {
                        let line = json!({
                            "unit": document.unit,
                            "community": community_context(section),
                            "domain": domain_context(domain),
                            "asset": asset,
                        });
                        serde_json::to_writer(&mut out, &line)?;
                        out.push(b'\n');
                    }
                }
                None => {
                    let line = json!({
                        "unit": document.unit,
                        "community": community_context(section),
                        "domain": domain_context(domain),
                    });
                    serde_json::to_writer(&mut out, &line)?;
                    out.push(b'\n');
                }
            }
        }
    }

    Ok(out)
}

fn community_context(section: &CommunitySection) -> serde_json::Value {
    json!({
        "id": section.community.id,
        "name": section.community.name,
        "depth": section.depth,
    })
}

fn domain_context(section: &DomainSection) -> serde_json::Value {
    json!({
        "id": section.domain.id,
        "name": section.domain.name,
        "type": section.domain.domain_type,
    })
}

async fn write_file(directory: &Path, name: &str, bytes: Vec<u8>) -> Result<OutputLocation> {
    tokio::fs::create_dir_all(directory).await.map_err(|e| {
        StewardError::Output(format!(
            "Failed to create output directory {}: {e}",
            directory.display()
        ))
    })?;

    let path = directory.join(name);
    let location = OutputLocation {
        checksum: checksum(&bytes),
        bytes: bytes.len(),
        path,
        written: true,
    };

    tokio::fs::write(&location.path, bytes).await.map_err(|e| {
        StewardError::Output(format!("Failed to write {}: {e}", location.path.display()))
    })?;

    tracing::info!(
        path = %location.path.display(),
        bytes = location.bytes,
        checksum = %location.checksum,
        "Wrote export file"
    );

    Ok(location)
}

/// Writes `<directory>/<unit>.json`
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl OutputSink for JsonFileSink {
    async fn write(&self, unit_name: &str, document: &ExportDocument) -> Result<OutputLocation> {
        let bytes = render(document, OutputFormat::Json)?;
        write_file(&self.directory, &file_name(unit_name, OutputFormat::Json), bytes).await
    }

    fn describe(&self) -> String {
        format!("json files in {}", self.directory.display())
    }
}

/// Writes `<directory>/<unit>.jsonl`
#[derive(Debug, Clone)]
pub struct JsonLinesFileSink {
    directory: PathBuf,
}

impl JsonLinesFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl OutputSink for JsonLinesFileSink {
    async fn write(&self, unit_name: &str, document: &ExportDocument) -> Result<OutputLocation> {
        let bytes = render(document, OutputFormat::Jsonl)?;
        write_file(&self.directory, &file_name(unit_name, OutputFormat::Jsonl), bytes).await
    }

    fn describe(&self) -> String {
        format!("json lines files in {}", self.directory.display())
    }
}
