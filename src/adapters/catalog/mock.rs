//! In-memory catalog source for testing.
//!
//! [`MockCatalogSource`] stores API-shaped payloads per endpoint, applies the
//! same filter and offset/limit semantics as the REST API, records every
//! query it receives, and can be told to fail specific queries.

use super::source::{CatalogQuery, CatalogSource, Endpoint, LIMIT_PARAM, OFFSET_PARAM};
use crate::domain::ids::AssetId;
use crate::domain::{Asset, CatalogError, Community, Domain, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// A query pattern that makes the mock fail
#[derive(Debug, Clone)]
struct FailureRule {
    endpoint: Endpoint,
    param: Option<(String, String)>,
    message: String,
}

impl FailureRule {
    fn matches(&self, query: &CatalogQuery) -> bool {
        self.endpoint == query.endpoint
            && self
                .param
                .as_ref()
                .map_or(true, |(k, v)| query.param(k) == Some(v.as_str()))
    }
}

/// Mock catalog source for testing.
#[derive(Default)]
pub struct MockCatalogSource {
    items: HashMap<Endpoint, Vec<Value>>,
    failures: Vec<FailureRule>,
    calls: Mutex<Vec<CatalogQuery>>,
}

impl MockCatalogSource {
    /// Creates an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw payload item to an endpoint.
    pub fn with_item(mut self, endpoint: Endpoint, item: Value) -> Self {
        self.items.entry(endpoint).or_default().push(item);
        self
    }

    /// Adds a community.
    pub fn with_community(self, community: &Community) -> Self {
        let mut item = json!({
            "id": community.id.as_str(),
            "name": community.name,
        });
        if let Some(description) = &community.description {
            item["description"] = json!(description);
        }
        if let Some(parent) = &community.parent_id {
            item["parent"] = json!({"id": parent.as_str(), "resourceType": "Community"});
        }
        self.with_item(Endpoint::Communities, item)
    }

    /// Adds a domain.
    pub fn with_domain(self, domain: &Domain) -> Self {
        let mut item = json!({
            "id": domain.id.as_str(),
            "name": domain.name,
            "community": {"id": domain.community_id.as_str()},
        });
        if let Some(domain_type) = &domain.domain_type {
            item["type"] = json!({"id": format!("type-{domain_type}"), "name": domain_type});
        }
        self.with_item(Endpoint::Domains, item)
    }

    /// Adds an asset.
    pub fn with_asset(self, asset: &Asset) -> Self {
        let mut item = json!({
            "id": asset.id.as_str(),
            "name": asset.name,
            "domain": {"id": asset.domain_id.as_str()},
        });
        if let Some(asset_type) = &asset.asset_type {
            item["type"] = json!({"id": format!("type-{asset_type}"), "name": asset_type});
        }
        self.with_item(Endpoint::Assets, item)
    }

    /// Adds an attribute to an asset.
    pub fn with_attribute(self, asset_id: &AssetId, attribute_type: &str, value: Value) -> Self {
        let id = format!("attr-{}-{}", asset_id, self.count(Endpoint::Attributes));
        self.with_item(
            Endpoint::Attributes,
            json!({
                "id": id,
                "type": {"id": format!("type-{attribute_type}"), "name": attribute_type},
                "value": value,
                "asset": {"id": asset_id.as_str()},
            }),
        )
    }

    /// Adds a relation between two assets.
    pub fn with_relation(
        self,
        source: &AssetId,
        target: &AssetId,
        role: &str,
        co_role: &str,
    ) -> Self {
        let id = format!("rel-{}", self.count(Endpoint::Relations));
        self.with_item(
            Endpoint::Relations,
            json!({
                "id": id,
                "source": {"id": source.as_str()},
                "target": {"id": target.as_str()},
                "type": {"id": format!("type-{role}"), "role": role, "coRole": co_role},
            }),
        )
    }

    /// Adds a responsibility on an asset.
    pub fn with_responsibility(self, asset_id: &AssetId, role: &str, owner_id: &str) -> Self {
        let id = format!("resp-{}", self.count(Endpoint::Responsibilities));
        self.with_item(
            Endpoint::Responsibilities,
            json!({
                "id": id,
                "role": {"id": format!("role-{role}"), "name": role},
                "owner": {"id": owner_id, "resourceType": "User"},
                "baseResource": {"id": asset_id.as_str()},
            }),
        )
    }

    /// Fails every query against an endpoint.
    pub fn fail_on(mut self, endpoint: Endpoint, message: &str) -> Self {
        self.failures.push(FailureRule {
            endpoint,
            param: None,
            message: message.to_string(),
        });
        self
    }

    /// Fails queries against an endpoint carrying a given filter value.
    pub fn fail_on_filter(mut self, endpoint: Endpoint, key: &str, value: &str, message: &str) -> Self {
        self.failures.push(FailureRule {
            endpoint,
            param: Some((key.to_string(), value.to_string())),
            message: message.to_string(),
        });
        self
    }

    /// Every query received so far, in order.
    pub fn calls(&self) -> Vec<CatalogQuery> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Number of queries received against an endpoint.
    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|q| q.endpoint == endpoint)
            .count()
    }

    fn count(&self, endpoint: Endpoint) -> usize {
        self.items.get(&endpoint).map_or(0, Vec::len)
    }

    fn record(&self, query: &CatalogQuery) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(query.clone()),
            Err(poisoned) => poisoned.into_inner().push(query.clone()),
        }
    }
}

/// JSON pointer of the field a filter parameter matches against
fn filter_pointer(key: &str) -> Option<&'static str> {
    match key {
        "communityId" => Some("/community/id"),
        "domainId" => Some("/domain/id"),
        "assetId" => Some("/asset/id"),
        "sourceId" => Some("/source/id"),
        "targetId" => Some("/target/id"),
        "resourceIds" => Some("/baseResource/id"),
        _ => None,
    }
}

fn parse_usize(query: &CatalogQuery, key: &str) -> Option<usize> {
    query.param(key).and_then(|v| v.parse().ok())
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn query(&self, query: &CatalogQuery) -> Result<Vec<Value>> {
        self.record(query);

        if let Some(rule) = self.failures.iter().find(|rule| rule.matches(query)) {
            return Err(CatalogError::ServerError {
                status: 500,
                message: rule.message.clone(),
            }
            .into());
        }

        let matching: Vec<Value> = self
            .items
            .get(&query.endpoint)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| {
                        query.params.iter().all(|(key, value)| match filter_pointer(key) {
                            Some(pointer) => {
                                item.pointer(pointer).and_then(Value::as_str) == Some(value)
                            }
                            None => true,
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let offset = parse_usize(query, OFFSET_PARAM).unwrap_or(0);
        let limit = parse_usize(query, LIMIT_PARAM).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    fn base_url(&self) -> &str {
        "mock://catalog"
    }
}
