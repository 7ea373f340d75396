//! Export orchestration
//!
//! This module provides the core export logic for Steward, including:
//! - Asset enrichment with attributes, relations and responsibilities
//! - Export units and the documents produced for them
//! - Export coordination across units with per-unit failure isolation
//! - Results and run summary

pub mod aggregator;
pub mod coordinator;
pub mod document;
pub mod summary;

pub use aggregator::AssetAggregator;
pub use coordinator::ExportCoordinator;
pub use document::{
    CommunitySection, DomainSection, ExportDocument, ExportUnit, ScopeEntry, ScopePreview,
    UnitKind, UnitRef,
};
pub use summary::{ExportOutcome, ExportResult, ExportSummary};
