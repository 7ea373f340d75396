//! Export options
//!
//! [`ExportOptions`] is the capability-flags record threaded explicitly
//! through the export pipeline. Nothing in the engine reads these flags from
//! global state.

use crate::domain::{Result, StewardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// On-disk format produced by the file sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON document per unit
    #[default]
    Json,
    /// One JSON object per asset (or per domain when assets are skipped)
    Jsonl,
}

impl OutputFormat {
    /// File extension used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            other => Err(StewardError::Configuration(format!(
                "Invalid output format '{other}'. Must be one of: json, jsonl"
            ))),
        }
    }
}

/// Where exported files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDestination {
    /// Target directory, created on first write
    pub directory: PathBuf,

    /// File format
    pub format: OutputFormat,
}

impl Default for OutputDestination {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("export"),
            format: OutputFormat::Json,
        }
    }
}

/// Which parts of the hierarchy an export run fetches
///
/// The attribute, relation and responsibility flags only take effect when
/// `include_assets` is set; use the `fetch_*` accessors rather than reading
/// the fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Fetch assets for every domain
    pub include_assets: bool,

    /// Fetch asset attributes
    pub include_attributes: bool,

    /// Fetch incoming and outgoing asset relations
    pub include_relations: bool,

    /// Fetch asset responsibility assignments
    pub include_responsibilities: bool,

    /// Output destination
    pub destination: OutputDestination,
}

impl ExportOptions {
    /// Options that export communities and domains only
    pub fn structure_only() -> Self {
        Self {
            include_assets: false,
            include_attributes: false,
            include_relations: false,
            include_responsibilities: false,
            destination: OutputDestination::default(),
        }
    }

    /// Set the output destination
    pub fn with_destination(mut self, destination: OutputDestination) -> Self {
        self.destination = destination;
        self
    }

    /// Whether assets are listed at all
    pub fn fetch_assets(&self) -> bool {
        self.include_assets
    }

    /// Whether attributes are fetched per asset
    pub fn fetch_attributes(&self) -> bool {
        self.include_assets && self.include_attributes
    }

    /// Whether relations are fetched per asset
    pub fn fetch_relations(&self) -> bool {
        self.include_assets && self.include_relations
    }

    /// Whether responsibilities are fetched per asset
    pub fn fetch_responsibilities(&self) -> bool {
        self.include_assets && self.include_responsibilities
    }
}

impl Default for ExportOptions {
    /// Everything on
    fn default() -> Self {
        Self {
            include_assets: true,
            include_attributes: true,
            include_relations: true,
            include_responsibilities: true,
            destination: OutputDestination::default(),
        }
    }
}
