//! Catalog traversal
//!
//! - [`pagination`] - walks offset pages of a single catalog query
//! - [`hierarchy`] - resolves community descendants from a flat listing

pub mod hierarchy;
pub mod pagination;

pub use hierarchy::{domain_by_name, resolve_descendants, CommunityHierarchy, HierarchyNode};
pub use pagination::fetch_all;
