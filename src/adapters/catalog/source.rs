//! Catalog source trait definition
//!
//! [`CatalogSource`] abstracts the remote query service so the traversal
//! engine can run against the HTTP client in production and an in-memory
//! source in tests.

use crate::domain::ids::{AssetId, CommunityId, DomainId};
use crate::domain::Result;
use async_trait::async_trait;
use std::fmt;

/// Query parameter carrying the page offset
pub const OFFSET_PARAM: &str = "offset";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// Catalog resource collections the engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Communities,
    Domains,
    Assets,
    Attributes,
    Relations,
    Responsibilities,
}

impl Endpoint {
    /// Path segment under the REST root
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Communities => "communities",
            Endpoint::Domains => "domains",
            Endpoint::Assets => "assets",
            Endpoint::Attributes => "attributes",
            Endpoint::Relations => "relations",
            Endpoint::Responsibilities => "responsibilities",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One logical query: an endpoint plus filter parameters
///
/// Parameters keep insertion order so request URLs are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl CatalogQuery {
    /// Unfiltered query against an endpoint
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    /// Add or replace a filter parameter
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.params.retain(|(k, _)| *k != key);
        self.params.push((key, value.into()));
        self
    }

    /// Look up a parameter value
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// This query restricted to one page
    ///
    /// Pagination keys override any `offset`/`limit` the caller supplied.
    pub fn page(&self, offset: usize, limit: usize) -> Self {
        self.clone()
            .filter(OFFSET_PARAM, offset.to_string())
            .filter(LIMIT_PARAM, limit.to_string())
    }

    /// All communities
    pub fn communities() -> Self {
        Self::new(Endpoint::Communities)
    }

    /// Domains directly owned by a community
    pub fn domains_in(community_id: &CommunityId) -> Self {
        Self::new(Endpoint::Domains).filter("communityId", community_id.as_str())
    }

    /// Assets in a domain
    pub fn assets_in(domain_id: &DomainId) -> Self {
        Self::new(Endpoint::Assets).filter("domainId", domain_id.as_str())
    }

    /// Attributes of an asset
    pub fn attributes_of(asset_id: &AssetId) -> Self {
        Self::new(Endpoint::Attributes).filter("assetId", asset_id.as_str())
    }

    /// Relations where the asset is the source
    pub fn relations_from(asset_id: &AssetId) -> Self {
        Self::new(Endpoint::Relations).filter("sourceId", asset_id.as_str())
    }

    /// Relations where the asset is the target
    pub fn relations_to(asset_id: &AssetId) -> Self {
        Self::new(Endpoint::Relations).filter("targetId", asset_id.as_str())
    }

    /// Responsibilities assigned on an asset
    pub fn responsibilities_of(asset_id: &AssetId) -> Self {
        Self::new(Endpoint::Responsibilities).filter("resourceIds", asset_id.as_str())
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// Remote query service the traversal engine reads from
///
/// Implementations issue exactly one request per call and return the raw
/// `results` items of the response. Pagination is the caller's concern.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Execute a single query and return its result items
    ///
    /// # Errors
    ///
    /// Returns an error on any transport, authentication or payload failure.
    async fn query(&self, query: &CatalogQuery) -> Result<Vec<serde_json::Value>>;

    /// Base URL (or a descriptive label) of the source, for logging
    fn base_url(&self) -> &str;
}
