//! # Steward - governance catalog export
//!
//! Steward exports the community hierarchy of a data-governance catalog,
//! together with each community's domains and their assets, to local JSON
//! files. One file is written per selected community or domain.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** every page of a catalog listing
//! - **Resolving** all sub-communities of a community, at any depth
//! - **Enriching** assets with attributes, relations and responsibilities
//! - **Exporting** many units in one run, isolating each unit's failure
//!
//! ## Architecture
//!
//! Steward follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (traversal, export)
//! - [`adapters`] - External integrations (catalog REST API, output files)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use steward::config::load_config;
//! use steward::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("steward.toml")?;
//!
//!     // Loads the community hierarchy once
//!     let coordinator = ExportCoordinator::from_config(&config).await?;
//!
//!     let units = coordinator
//!         .resolve_units(&["Finance".to_string()], &[], false)
//!         .await?;
//!     let summary = coordinator.run(&units, &config.export_options()).await?;
//!
//!     println!("Exported {} of {} units", summary.successful_exports(), summary.total_units());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Steward uses [`domain::StewardError`] for all errors. Catalog transport
//! failures are wrapped as [`domain::CatalogError`]:
//!
//! ```rust,no_run
//! use steward::domain::StewardError;
//!
//! fn example() -> Result<(), StewardError> {
//!     let config = steward::config::load_config("steward.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
