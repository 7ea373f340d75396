//! Output sink factory
//!
//! Picks the sink implementation for a destination.

use super::dry_run::DryRunSink;
use super::json::{JsonFileSink, JsonLinesFileSink};
use super::traits::OutputSink;
use crate::domain::{OutputDestination, OutputFormat};
use std::sync::Arc;

/// Create the sink for `destination`
///
/// # Arguments
///
/// * `destination` - Target directory and file format
/// * `dry_run` - When true, nothing is written regardless of format
pub fn create_sink(destination: &OutputDestination, dry_run: bool) -> Arc<dyn OutputSink> {
    let sink: Arc<dyn OutputSink> = if dry_run {
        Arc::new(DryRunSink::new(destination.clone()))
    } else {
        match destination.format {
            OutputFormat::Json => Arc::new(JsonFileSink::new(destination.directory.clone())),
            OutputFormat::Jsonl => Arc::new(JsonLinesFileSink::new(destination.directory.clone())),
        }
    };

    tracing::info!(sink = %sink.describe(), "Created output sink");
    sink
}
