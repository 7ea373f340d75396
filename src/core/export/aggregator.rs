//! Asset enrichment
//!
//! [`AssetAggregator`] attaches the facets requested by [`ExportOptions`] to
//! a base asset record. Each facet needs its own round trip; they are issued
//! one after another and the first failure aborts the asset.

use crate::adapters::catalog::models::{AttributePayload, RelationPayload, ResponsibilityPayload};
use crate::adapters::catalog::{CatalogQuery, CatalogSource};
use crate::core::traversal::fetch_all;
use crate::domain::{
    Asset, Attribute, CatalogError, EnrichedAsset, ExportOptions, Relation, RelationDirection,
    Responsibility, Result, StewardError,
};
use std::sync::Arc;

/// Combines an asset with its attributes, relations and responsibilities
#[derive(Clone)]
pub struct AssetAggregator {
    source: Arc<dyn CatalogSource>,
    page_size: usize,
}

impl AssetAggregator {
    /// Create an aggregator reading from `source`
    pub fn new(source: Arc<dyn CatalogSource>, page_size: usize) -> Self {
        Self { source, page_size }
    }

    /// Enrich one asset according to `options`
    ///
    /// Facets that are not requested stay `None` and cost no request;
    /// requested facets are always `Some`, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns the first sub-fetch failure unchanged.
    pub async fn aggregate(&self, asset: Asset, options: &ExportOptions) -> Result<EnrichedAsset> {
        let mut enriched = EnrichedAsset::bare(asset);
        if !options.fetch_assets() {
            return Ok(enriched);
        }

        if options.fetch_attributes() {
            enriched.attributes = Some(self.attributes(&enriched.asset).await?);
        }
        if options.fetch_relations() {
            enriched.relations = Some(self.relations(&enriched.asset).await?);
        }
        if options.fetch_responsibilities() {
            enriched.responsibilities = Some(self.responsibilities(&enriched.asset).await?);
        }

        tracing::debug!(
            asset_id = %enriched.asset.id,
            attributes = enriched.attributes.as_ref().map_or(0, Vec::len),
            relations = enriched.relations.as_ref().map_or(0, Vec::len),
            responsibilities = enriched.responsibilities.as_ref().map_or(0, Vec::len),
            "Aggregated asset"
        );

        Ok(enriched)
    }

    /// Attributes come back in a single request
    async fn attributes(&self, asset: &Asset) -> Result<Vec<Attribute>> {
        let query = CatalogQuery::attributes_of(&asset.id);
        self.source
            .query(&query)
            .await?
            .into_iter()
            .map(|value| {
                serde_json::from_value::<AttributePayload>(value)
                    .map(AttributePayload::into_domain)
                    .map_err(|e| {
                        StewardError::from(CatalogError::InvalidResponse(format!(
                            "Unexpected attribute for asset {}: {e}",
                            asset.id
                        )))
                    })
            })
            .collect()
    }

    /// Outgoing relations first, then incoming
    async fn relations(&self, asset: &Asset) -> Result<Vec<Relation>> {
        let outgoing: Vec<RelationPayload> = fetch_all(
            self.source.as_ref(),
            &CatalogQuery::relations_from(&asset.id),
            self.page_size,
        )
        .await?;
        let incoming: Vec<RelationPayload> = fetch_all(
            self.source.as_ref(),
            &CatalogQuery::relations_to(&asset.id),
            self.page_size,
        )
        .await?;

        outgoing
            .into_iter()
            .map(|r| r.into_domain(RelationDirection::Outgoing))
            .chain(
                incoming
                    .into_iter()
                    .map(|r| r.into_domain(RelationDirection::Incoming)),
            )
            .collect()
    }

    async fn responsibilities(&self, asset: &Asset) -> Result<Vec<Responsibility>> {
        let payloads: Vec<ResponsibilityPayload> = fetch_all(
            self.source.as_ref(),
            &CatalogQuery::responsibilities_of(&asset.id),
            self.page_size,
        )
        .await?;

        Ok(payloads
            .into_iter()
            .map(ResponsibilityPayload::into_domain)
            .collect())
    }
}
