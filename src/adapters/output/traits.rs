//! Output sink abstraction
//!
//! This module defines the trait every export destination implements.

use crate::core::export::ExportDocument;
use crate::domain::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Where a sink put (or would have put) a unit's document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLocation {
    /// Target file
    pub path: PathBuf,

    /// Hex-encoded SHA-256 of the rendered bytes
    pub checksum: String,

    /// Size of the rendered output
    pub bytes: usize,

    /// False when nothing was written (dry run)
    pub written: bool,
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if !self.written {
            write!(f, " (dry run)")?;
        }
        Ok(())
    }
}

/// Destination for exported documents
///
/// Implementations render one [`ExportDocument`] per unit. A sink is shared
/// by every unit of a run and must not carry per-unit state.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Persist the document exported for `unit_name`
    ///
    /// # Errors
    ///
    /// Returns an output or serialization error if the document cannot be
    /// rendered or stored.
    async fn write(&self, unit_name: &str, document: &ExportDocument) -> Result<OutputLocation>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}
