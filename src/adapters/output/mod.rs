//! Export output
//!
//! This module provides the [`OutputSink`] abstraction and its file-based
//! implementations:
//!
//! - [`JsonFileSink`] - one pretty-printed JSON document per unit
//! - [`JsonLinesFileSink`] - one JSON line per asset
//! - [`DryRunSink`] - renders without writing

pub mod dry_run;
pub mod factory;
pub mod json;
pub mod traits;

pub use dry_run::DryRunSink;
pub use factory::create_sink;
pub use json::{JsonFileSink, JsonLinesFileSink};
pub use traits::{OutputLocation, OutputSink};
