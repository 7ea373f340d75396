//! Core business logic for Steward.
//!
//! # Modules
//!
//! - [`traversal`] - Offset pagination and community hierarchy resolution
//! - [`export`] - Asset aggregation, export coordination, and reporting
//!
//! # Export Workflow
//!
//! 1. **Load hierarchy**: Fetch every community once and index parent links
//! 2. **Select units**: Resolve community/domain names to export units
//! 3. **Walk**: For each unit, visit its root and descendants in pre-order
//! 4. **Fetch**: Page through the domains of each community and the assets
//!    of each domain
//! 5. **Aggregate**: Attach the asset facets requested by the export options
//! 6. **Write**: Hand one document per unit to the output sink
//! 7. **Report**: Summarize per-unit results
//!
//! # Example
//!
//! ```rust,no_run
//! use steward::config::load_config;
//! use steward::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("steward.toml")?;
//!
//! let coordinator = ExportCoordinator::from_config(&config).await?;
//! let units = coordinator
//!     .resolve_units(&config.export.communities, &config.export.domains, config.export.all_roots)
//!     .await?;
//!
//! let summary = coordinator.run(&units, &config.export_options()).await?;
//!
//! println!("Successful: {}", summary.successful_exports());
//! println!("Failed: {}", summary.failed_exports());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod traversal;
