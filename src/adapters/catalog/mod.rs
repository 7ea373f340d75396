//! Catalog adapter
//!
//! This module provides the integration with the remote governance catalog:
//! the [`CatalogSource`] abstraction, the REST client that implements it,
//! API payload models, and an in-memory source for tests (built with
//! `cfg(test)` or the `test-util` feature).

pub mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;
pub mod source;

pub use client::HttpCatalogClient;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockCatalogSource;
pub use models::PagedResponse;
pub use source::{CatalogQuery, CatalogSource, Endpoint};
