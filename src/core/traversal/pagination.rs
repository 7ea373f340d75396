//! Offset pagination over a catalog query
//!
//! The catalog returns at most `limit` items per request. [`fetch_all`] walks
//! `offset = 0, P, 2P, ...` until a page comes back with fewer than `P`
//! items, which signals that the result set is exhausted.

use crate::adapters::catalog::{CatalogQuery, CatalogSource};
use crate::domain::{CatalogError, Result, StewardError};
use serde::de::DeserializeOwned;

/// Fetch every item matched by `query`, one page of `page_size` at a time
///
/// Pagination keys override any `offset`/`limit` already present on the
/// query; all other parameters are sent unchanged on every page. Items keep
/// the order in which the catalog returned them.
///
/// # Errors
///
/// Returns a validation error when `page_size` is zero, the first request
/// failure unchanged, or an invalid-response error when an item does not
/// deserialize into `T`.
///
/// # Example
///
/// ```no_run
/// use steward::adapters::catalog::{CatalogQuery, HttpCatalogClient};
/// use steward::config::CatalogConfig;
/// use steward::core::traversal::fetch_all;
///
/// # async fn example() -> steward::domain::Result<()> {
/// let client = HttpCatalogClient::new(CatalogConfig::default())?;
///
/// let communities: Vec<serde_json::Value> =
///     fetch_all(&client, &CatalogQuery::communities(), 100).await?;
/// println!("{} communities", communities.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_all<T, S>(source: &S, query: &CatalogQuery, page_size: usize) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: CatalogSource + ?Sized,
{
    if page_size == 0 {
        return Err(StewardError::Validation(
            "page_size must be greater than 0".to_string(),
        ));
    }

    let mut items = Vec::new();
    let mut offset = 0;

    loop {
        let page = source.query(&query.page(offset, page_size)).await?;
        let received = page.len();

        for value in page {
            let item = serde_json::from_value(value).map_err(|e| {
                CatalogError::InvalidResponse(format!(
                    "Unexpected {} item at offset {offset}: {e}",
                    query.endpoint
                ))
            })?;
            items.push(item);
        }

        tracing::debug!(
            endpoint = %query.endpoint,
            offset = offset,
            received = received,
            total = items.len(),
            "Fetched page"
        );

        if received < page_size {
            break;
        }
        offset += page_size;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::{Endpoint, MockCatalogSource};
    use crate::adapters::catalog::models::DomainPayload;
    use crate::domain::{CommunityId, Domain, DomainId};
    use serde_json::{json, Value};
    use test_case::test_case;

    fn source_with_domains(count: usize) -> MockCatalogSource {
        let community = CommunityId::new("c-1").unwrap();
        (0..count).fold(MockCatalogSource::new(), |source, i| {
            source.with_domain(&Domain::new(
                DomainId::new(format!("d-{i}")).unwrap(),
                format!("Domain {i}"),
                community.clone(),
            ))
        })
    }

    #[test_case(0, 3, 1 ; "empty result needs one request")]
    #[test_case(2, 3, 1 ; "short first page")]
    #[test_case(3, 3, 2 ; "exact page needs trailing empty page")]
    #[test_case(7, 3, 3 ; "partial last page")]
    #[test_case(9, 3, 4 ; "multiple exact pages")]
    #[test_case(5, 1000, 1 ; "default page size")]
    #[tokio::test]
    async fn test_fetch_all_completeness(total: usize, page_size: usize, requests: usize) {
        let source = source_with_domains(total);
        let query = CatalogQuery::domains_in(&CommunityId::new("c-1").unwrap());

        let items: Vec<DomainPayload> = fetch_all(&source, &query, page_size).await.unwrap();

        assert_eq!(items.len(), total);
        let expected: Vec<String> = (0..total).map(|i| format!("d-{i}")).collect();
        let ids: Vec<String> = items.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(source.calls_to(Endpoint::Domains), requests);
    }

    #[tokio::test]
    async fn test_fetch_all_sends_increasing_offsets() {
        let source = source_with_domains(5);
        let query = CatalogQuery::domains_in(&CommunityId::new("c-1").unwrap());

        let _: Vec<Value> = fetch_all(&source, &query, 2).await.unwrap();

        let offsets: Vec<String> = source
            .calls()
            .iter()
            .filter_map(|q| q.param("offset").map(str::to_string))
            .collect();
        assert_eq!(offsets, vec!["0", "2", "4"]);
        assert!(source
            .calls()
            .iter()
            .all(|q| q.param("communityId") == Some("c-1") && q.param("limit") == Some("2")));
    }

    #[tokio::test]
    async fn test_fetch_all_overrides_caller_pagination() {
        let source = source_with_domains(4);
        let query = CatalogQuery::new(Endpoint::Domains)
            .filter("offset", "99")
            .filter("limit", "1");

        let items: Vec<Value> = fetch_all(&source, &query, 10).await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(source.calls()[0].param("offset"), Some("0"));
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_zero_page_size() {
        let source = source_with_domains(1);
        let result: Result<Vec<Value>> =
            fetch_all(&source, &CatalogQuery::new(Endpoint::Domains), 0).await;

        assert!(matches!(result, Err(StewardError::Validation(_))));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_failure() {
        let source = source_with_domains(3).fail_on(Endpoint::Domains, "unavailable");
        let result: Result<Vec<Value>> =
            fetch_all(&source, &CatalogQuery::new(Endpoint::Domains), 2).await;

        assert!(matches!(result, Err(StewardError::Catalog(_))));
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_after_failed_later_page() {
        let source = source_with_domains(6).fail_on_filter(
            Endpoint::Domains,
            "offset",
            "2",
            "unavailable",
        );
        let result: Result<Vec<Value>> =
            fetch_all(&source, &CatalogQuery::new(Endpoint::Domains), 2).await;

        assert!(matches!(
            result,
            Err(StewardError::Catalog(CatalogError::ServerError { status: 500, .. }))
        ));
        let offsets: Vec<String> = source
            .calls()
            .iter()
            .filter_map(|q| q.param("offset").map(str::to_string))
            .collect();
        assert_eq!(offsets, vec!["0", "2"]);
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_mismatched_items() {
        let source = MockCatalogSource::new().with_item(Endpoint::Domains, json!({"unexpected": 1}));
        let result: Result<Vec<DomainPayload>> =
            fetch_all(&source, &CatalogQuery::new(Endpoint::Domains), 10).await;

        assert!(matches!(
            result,
            Err(StewardError::Catalog(CatalogError::InvalidResponse(_)))
        ));
    }
}
