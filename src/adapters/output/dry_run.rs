//! Dry-run sink
//!
//! Renders documents exactly like the file sinks so that size and checksum
//! are reported, but never touches the filesystem.

use super::json::{checksum, file_name, render};
use super::traits::{OutputLocation, OutputSink};
use crate::core::export::ExportDocument;
use crate::domain::{OutputDestination, Result};
use async_trait::async_trait;

/// Sink that reports where it would write without writing
#[derive(Debug, Clone)]
pub struct DryRunSink {
    destination: OutputDestination,
}

impl DryRunSink {
    pub fn new(destination: OutputDestination) -> Self {
        Self { destination }
    }
}

#[async_trait]
impl OutputSink for DryRunSink {
    async fn write(&self, unit_name: &str, document: &ExportDocument) -> Result<OutputLocation> {
        let format = self.destination.format;
        let bytes = render(document, format)?;
        let location = OutputLocation {
            path: self.destination.directory.join(file_name(unit_name, format)),
            checksum: checksum(&bytes),
            bytes: bytes.len(),
            written: false,
        };

        tracing::info!(
            path = %location.path.display(),
            bytes = location.bytes,
            "Dry run: skipping write"
        );

        Ok(location)
    }

    fn describe(&self) -> String {
        format!(
            "dry run ({} files in {})",
            self.destination.format,
            self.destination.directory.display()
        )
    }
}
