//! Export coordinator - main orchestrator for the export process
//!
//! This module drives an export across one or many units. It owns the
//! community snapshot for the run, walks each unit's hierarchy, fetches
//! domains and assets page by page, enriches assets and hands one document
//! per unit to the output sink. Units are processed strictly in input order
//! and a failing unit never stops the ones after it.

use crate::adapters::catalog::models::{AssetPayload, DomainPayload};
use crate::adapters::catalog::{CatalogQuery, CatalogSource, Endpoint, HttpCatalogClient};
use crate::adapters::output::{create_sink, OutputSink};
use crate::config::schema::MAX_PAGE_SIZE;
use crate::config::StewardConfig;
use crate::core::export::aggregator::AssetAggregator;
use crate::core::export::document::{
    CommunitySection, DomainSection, ExportDocument, ExportUnit, ScopeEntry, ScopePreview,
};
use crate::core::export::summary::{ExportOutcome, ExportResult, ExportSummary};
use crate::core::traversal::{domain_by_name, fetch_all, CommunityHierarchy};
use crate::domain::{Community, CommunityId, Domain, ExportOptions, Result, StewardError};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Export coordinator
pub struct ExportCoordinator {
    source: Arc<dyn CatalogSource>,
    sink: Arc<dyn OutputSink>,
    hierarchy: CommunityHierarchy,
    aggregator: AssetAggregator,
    page_size: usize,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// Loads the community snapshot used for every unit of the run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a page size outside `1..=1000` and
    /// propagates failures while loading communities.
    pub async fn new(
        source: Arc<dyn CatalogSource>,
        sink: Arc<dyn OutputSink>,
        page_size: usize,
    ) -> Result<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(StewardError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let hierarchy = CommunityHierarchy::load(source.as_ref(), page_size).await?;
        let aggregator = AssetAggregator::new(source.clone(), page_size);

        Ok(Self {
            source,
            sink,
            hierarchy,
            aggregator,
            page_size,
        })
    }

    /// Create a coordinator wired to the HTTP catalog and the configured sink
    ///
    /// # Errors
    ///
    /// Returns configuration errors from the client and propagates failures
    /// while loading communities.
    pub async fn from_config(config: &StewardConfig) -> Result<Self> {
        let client = HttpCatalogClient::new(config.catalog.clone())?;
        let sink = create_sink(
            &config.export_options().destination,
            config.application.dry_run,
        );

        Self::new(Arc::new(client), sink, config.catalog.page_size).await
    }

    /// The community snapshot of this run
    pub fn hierarchy(&self) -> &CommunityHierarchy {
        &self.hierarchy
    }

    /// Unit for the first community named exactly `name`
    ///
    /// # Errors
    ///
    /// Returns [`StewardError::NotFound`] when no community has that name.
    pub fn community_unit(&self, name: &str) -> Result<ExportUnit> {
        self.hierarchy
            .community_by_name(name)
            .map(|c| ExportUnit::Community(c.clone()))
    }

    /// Units for every top-level community, in listing order
    pub fn root_units(&self) -> Vec<ExportUnit> {
        self.hierarchy
            .roots()
            .into_iter()
            .map(|c| ExportUnit::Community(c.clone()))
            .collect()
    }

    /// Unit for the first domain named exactly `name`
    ///
    /// # Errors
    ///
    /// Returns [`StewardError::NotFound`] when no domain has that name, or
    /// the failure of the domain listing.
    pub async fn domain_unit(&self, name: &str) -> Result<ExportUnit> {
        let domains = self.list_domains(CatalogQuery::new(Endpoint::Domains)).await?;
        domain_by_name(&domains, name).map(|d| ExportUnit::Domain(d.clone()))
    }

    /// Resolve a unit selection, preserving the given order
    ///
    /// Communities come first, then domains. With `all_roots` every
    /// top-level community not already selected is appended.
    ///
    /// # Errors
    ///
    /// Returns [`StewardError::NotFound`] for the first name that matches
    /// nothing.
    pub async fn resolve_units(
        &self,
        communities: &[String],
        domains: &[String],
        all_roots: bool,
    ) -> Result<Vec<ExportUnit>> {
        let mut units = communities
            .iter()
            .map(|name| self.community_unit(name))
            .collect::<Result<Vec<_>>>()?;

        if !domains.is_empty() {
            let listing = self.list_domains(CatalogQuery::new(Endpoint::Domains)).await?;
            for name in domains {
                units.push(ExportUnit::Domain(domain_by_name(&listing, name)?.clone()));
            }
        }

        if all_roots {
            for unit in self.root_units() {
                if !units.contains(&unit) {
                    units.push(unit);
                }
            }
        }

        Ok(units)
    }

    /// Run an export and report a summary
    ///
    /// A single unit goes through [`export_one`](Self::export_one), so its
    /// failure is returned as an error. Several units go through
    /// [`export_all`](Self::export_all) and failures are recorded in the
    /// summary instead.
    ///
    /// # Errors
    ///
    /// Only on the single-unit path, with that unit's failure.
    pub async fn run(&self, units: &[ExportUnit], options: &ExportOptions) -> Result<ExportSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("export_run", run_id = %run_id, units = units.len());

        async move {
            let start_time = Instant::now();
            tracing::info!(sink = %self.sink.describe(), "Starting export run");

            let results = match units {
                [unit] => vec![self.export_one(unit, options).await?.into()],
                _ => self.export_all(units, options).await,
            };

            let summary = ExportSummary::new(run_id)
                .with_results(results)
                .with_duration(start_time.elapsed());
            summary.log_summary();
            Ok::<_, StewardError>(summary)
        }
        .instrument(span)
        .await
    }

    /// Export every unit, isolating failures per unit
    ///
    /// Results are returned in input order, one per unit.
    pub async fn export_all(
        &self,
        units: &[ExportUnit],
        options: &ExportOptions,
    ) -> Vec<ExportResult> {
        let mut results = Vec::with_capacity(units.len());

        for (i, unit) in units.iter().enumerate() {
            tracing::debug!(current = i + 1, total = units.len(), "Processing unit");

            let result = match self.export_one(unit, options).await {
                Ok(outcome) => outcome.into(),
                Err(error) => {
                    crate::log_error_with_context!(&error, format!("Export of {unit} failed"));
                    ExportResult::Failure {
                        unit_name: unit.name().to_string(),
                        error,
                    }
                }
            };
            results.push(result);
        }

        results
    }

    /// Export a single unit
    ///
    /// # Errors
    ///
    /// Propagates the first failure of hierarchy resolution, any catalog
    /// fetch, or the sink.
    pub async fn export_one(
        &self,
        unit: &ExportUnit,
        options: &ExportOptions,
    ) -> Result<ExportOutcome> {
        let start_time = Instant::now();
        crate::log_unit_start!(unit.kind(), unit.name());

        let mut document = ExportDocument::new(unit);
        document.communities = match unit {
            ExportUnit::Community(community) => self.community_sections(community, options).await?,
            ExportUnit::Domain(domain) => vec![self.domain_only_section(domain, options).await?],
        };

        let location = self.sink.write(unit.name(), &document).await?;

        let outcome = ExportOutcome {
            unit_name: unit.name().to_string(),
            location,
            communities: document.community_count(),
            domains: document.domain_count(),
            assets: document.asset_count(),
        };

        crate::log_unit_complete!(
            &outcome.unit_name,
            outcome.domains,
            outcome.assets,
            start_time.elapsed()
        );

        Ok(outcome)
    }

    /// Communities an export of `unit` would cover
    ///
    /// Pure hierarchy resolution against the loaded snapshot; no domain or
    /// asset is fetched.
    ///
    /// # Errors
    ///
    /// Returns not-found or malformed-hierarchy errors from the resolver.
    pub fn preview(&self, unit: &ExportUnit) -> Result<ScopePreview> {
        let communities = match unit {
            ExportUnit::Community(community) => self
                .hierarchy
                .walk(&community.id)?
                .into_iter()
                .map(|node| ScopeEntry {
                    depth: node.depth,
                    id: node.community.id.to_string(),
                    name: node.community.name.clone(),
                })
                .collect(),
            ExportUnit::Domain(domain) => {
                let owner = self.owning_community(domain)?;
                vec![ScopeEntry {
                    depth: 0,
                    id: owner.id.to_string(),
                    name: owner.name.clone(),
                }]
            }
        };

        Ok(ScopePreview {
            unit: unit.to_ref(),
            communities,
        })
    }

    /// Root community section followed by one per descendant
    async fn community_sections(
        &self,
        community: &Community,
        options: &ExportOptions,
    ) -> Result<Vec<CommunitySection>> {
        let nodes = self.hierarchy.walk(&community.id)?;
        tracing::debug!(
            community = %community.name,
            descendants = nodes.len() - 1,
            "Resolved community hierarchy"
        );

        let mut sections = Vec::with_capacity(nodes.len());
        for node in nodes {
            let domains = self.domains_of(&node.community.id).await?;

            let mut domain_sections = Vec::with_capacity(domains.len());
            for domain in domains {
                domain_sections.push(self.domain_section(domain, options).await?);
            }

            sections.push(CommunitySection {
                community: node.community.clone(),
                depth: node.depth,
                domains: domain_sections,
            });
        }

        Ok(sections)
    }

    async fn domain_only_section(
        &self,
        domain: &Domain,
        options: &ExportOptions,
    ) -> Result<CommunitySection> {
        let community = self.owning_community(domain)?.clone();
        Ok(CommunitySection {
            community,
            depth: 0,
            domains: vec![self.domain_section(domain.clone(), options).await?],
        })
    }

    /// A domain with its aggregated assets, when assets are requested
    async fn domain_section(&self, domain: Domain, options: &ExportOptions) -> Result<DomainSection> {
        if !options.fetch_assets() {
            return Ok(DomainSection {
                domain,
                assets: None,
            });
        }

        let payloads: Vec<AssetPayload> = fetch_all(
            self.source.as_ref(),
            &CatalogQuery::assets_in(&domain.id),
            self.page_size,
        )
        .await?;

        let mut assets = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let asset = payload.into_domain()?;
            assets.push(self.aggregator.aggregate(asset, options).await?);
        }

        tracing::debug!(domain = %domain.name, assets = assets.len(), "Exported domain");

        Ok(DomainSection {
            domain,
            assets: Some(assets),
        })
    }

    async fn domains_of(&self, community_id: &CommunityId) -> Result<Vec<Domain>> {
        self.list_domains(CatalogQuery::domains_in(community_id))
            .await
    }

    async fn list_domains(&self, query: CatalogQuery) -> Result<Vec<Domain>> {
        let payloads: Vec<DomainPayload> =
            fetch_all(self.source.as_ref(), &query, self.page_size).await?;
        payloads
            .into_iter()
            .map(DomainPayload::into_domain)
            .collect()
    }

    fn owning_community(&self, domain: &Domain) -> Result<&Community> {
        self.hierarchy.get(&domain.community_id).ok_or_else(|| {
            StewardError::MalformedHierarchy(format!(
                "Domain '{}' belongs to unknown community {}",
                domain.name, domain.community_id
            ))
        })
    }
}
