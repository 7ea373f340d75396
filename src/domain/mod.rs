//! Domain models and types for Steward.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CommunityId`], [`DomainId`], [`AssetId`])
//! - **Catalog snapshots** ([`Community`], [`Domain`], [`Asset`], [`EnrichedAsset`])
//! - **Export options** ([`ExportOptions`])
//! - **Error types** ([`StewardError`], [`CatalogError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a domain ID can never be passed
//! where a community ID is expected:
//!
//! ```rust
//! use steward::domain::{CommunityId, DomainId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let community_id = CommunityId::new("c-123")?;
//! let domain_id = DomainId::new("d-456")?;
//!
//! // let wrong: CommunityId = domain_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! All entities are immutable value snapshots; the engine never writes back
//! to the catalog.

pub mod asset;
pub mod catalog;
pub mod errors;
pub mod ids;
pub mod options;
pub mod result;

// Re-export commonly used types for convenience
pub use asset::{
    Asset, AssetRef, Attribute, EnrichedAsset, Relation, RelationDirection, Responsibility,
};
pub use catalog::{Community, Domain};
pub use errors::{CatalogError, StewardError};
pub use ids::{AssetId, CommunityId, DomainId};
pub use options::{ExportOptions, OutputDestination, OutputFormat};
pub use result::Result;
