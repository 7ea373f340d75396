//! External system integrations for Steward.
//!
//! This module provides adapters at both ends of an export:
//!
//! - [`catalog`] - the remote governance catalog (REST client and test double)
//! - [`output`] - where exported documents are written
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The export engine only sees
//! the [`catalog::CatalogSource`] and [`output::OutputSink`] traits.
//!
//! # Catalog Adapter
//!
//! ```rust,no_run
//! use steward::adapters::catalog::{CatalogQuery, CatalogSource, HttpCatalogClient};
//! use steward::config::{secret_string, CatalogConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig {
//!     base_url: "https://catalog.example.com".to_string(),
//!     username: Some("svc_export".to_string()),
//!     password: Some(secret_string("pass".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = HttpCatalogClient::new(config)?;
//! let communities = client.query(&CatalogQuery::communities().page(0, 100)).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod output;
