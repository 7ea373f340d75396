//! End-to-end export tests against a mock catalog server
//!
//! The catalog below has a two-level "Finance" community and a flat "HR"
//! community. Listings use a page size of 2 so the community and domain
//! listings span two pages. Query matchers are disjoint so every request
//! matches at most one mock.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;
use steward::adapters::catalog::HttpCatalogClient;
use steward::adapters::output::{DryRunSink, JsonFileSink, JsonLinesFileSink, OutputSink};
use steward::cli::commands::export::ExportArgs;
use steward::cli::commands::{UnitSelection, EXIT_CONNECTION_ERROR};
use steward::config::{CatalogConfig, RetryConfig};
use steward::core::export::{ExportCoordinator, ExportDocument};
use steward::domain::{ExportOptions, OutputDestination, OutputFormat, RelationDirection};
use tempfile::TempDir;

const PAGE_SIZE: usize = 2;

fn catalog_config(base_url: String) -> CatalogConfig {
    CatalogConfig {
        base_url,
        auth_type: "none".to_string(),
        page_size: PAGE_SIZE,
        retry: RetryConfig {
            max_retries: 1,
            initial_delay_ms: 1,
            max_delay_ms: 1,
            backoff_multiplier: 1.0,
        },
        ..CatalogConfig::default()
    }
}

fn page_query(filters: &[(&str, &str)], offset: usize) -> Matcher {
    let mut matchers: Vec<Matcher> = filters
        .iter()
        .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
        .collect();
    matchers.push(Matcher::UrlEncoded("offset".into(), offset.to_string()));
    matchers.push(Matcher::UrlEncoded("limit".into(), PAGE_SIZE.to_string()));
    Matcher::AllOf(matchers)
}

async fn listing(
    server: &mut ServerGuard,
    endpoint: &str,
    query: Matcher,
    results: Value,
) -> Mock {
    server
        .mock("GET", format!("/rest/2.0/{endpoint}").as_str())
        .match_query(query)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": results }).to_string())
        .create_async()
        .await
}

async fn serve_catalog(server: &mut ServerGuard, broken_vat_assets: bool) -> Vec<Mock> {
    let mut mocks = vec![
        listing(
            server,
            "communities",
            Matcher::Exact("offset=0&limit=2".to_string()),
            json!([
                {"id": "c-1", "name": "Finance"},
                {"id": "c-2", "name": "Tax", "parent": {"id": "c-1"}},
            ]),
        )
        .await,
        listing(
            server,
            "communities",
            Matcher::Exact("offset=2&limit=2".to_string()),
            json!([{"id": "c-3", "name": "HR"}]),
        )
        .await,
        listing(
            server,
            "domains",
            page_query(&[("communityId", "c-1")], 0),
            json!([{"id": "d-1", "name": "Ledger", "community": {"id": "c-1"}}]),
        )
        .await,
        listing(
            server,
            "domains",
            page_query(&[("communityId", "c-2")], 0),
            json!([{"id": "d-2", "name": "VAT Rules", "community": {"id": "c-2"}}]),
        )
        .await,
        listing(
            server,
            "domains",
            page_query(&[("communityId", "c-3")], 0),
            json!([]),
        )
        .await,
        listing(
            server,
            "assets",
            page_query(&[("domainId", "d-1")], 0),
            json!([{
                "id": "a-1",
                "name": "General Ledger",
                "type": {"id": "t-1", "name": "Table"},
                "domain": {"id": "d-1"},
            }]),
        )
        .await,
        listing(
            server,
            "domains",
            Matcher::Exact("offset=0&limit=2".to_string()),
            json!([
                {"id": "d-1", "name": "Ledger", "community": {"id": "c-1"}},
                {"id": "d-2", "name": "VAT Rules", "community": {"id": "c-2"}},
            ]),
        )
        .await,
        listing(
            server,
            "domains",
            Matcher::Exact("offset=2&limit=2".to_string()),
            json!([]),
        )
        .await,
    ];

    if broken_vat_assets {
        mocks.push(
            server
                .mock("GET", "/rest/2.0/assets")
                .match_query(page_query(&[("domainId", "d-2")], 0))
                .with_status(500)
                .with_body("internal error")
                .create_async()
                .await,
        );
    } else {
        mocks.push(listing(server, "assets", page_query(&[("domainId", "d-2")], 0), json!([])).await);
    }

    mocks.push(
        listing(
            server,
            "attributes",
            Matcher::UrlEncoded("assetId".into(), "a-1".into()),
            json!([{
                "id": "attr-1",
                "type": {"id": "t-def", "name": "Definition"},
                "value": "All posted journal entries",
            }]),
        )
        .await,
    );
    mocks.push(
        listing(
            server,
            "relations",
            page_query(&[("sourceId", "a-1")], 0),
            json!([{
                "id": "rel-1",
                "source": {"id": "a-1"},
                "target": {"id": "a-9", "name": "Trial Balance"},
                "type": {"id": "rt-1", "role": "feeds", "coRole": "is fed by"},
            }]),
        )
        .await,
    );
    mocks.push(
        listing(
            server,
            "relations",
            page_query(&[("targetId", "a-1")], 0),
            json!([]),
        )
        .await,
    );
    mocks.push(
        listing(
            server,
            "responsibilities",
            page_query(&[("resourceIds", "a-1")], 0),
            json!([{
                "id": "resp-1",
                "role": {"id": "r-1", "name": "Steward"},
                "owner": {"id": "u-7", "resourceType": "User"},
            }]),
        )
        .await,
    );

    mocks
}

async fn coordinator(server: &ServerGuard, sink: Arc<dyn OutputSink>) -> ExportCoordinator {
    let client = HttpCatalogClient::new(catalog_config(server.url())).unwrap();
    ExportCoordinator::new(Arc::new(client), sink, PAGE_SIZE)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_export_community_to_json_file() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, false).await;
    let out = TempDir::new().unwrap();

    let coordinator = coordinator(&server, Arc::new(JsonFileSink::new(out.path()))).await;
    assert_eq!(coordinator.hierarchy().len(), 3);

    let units = coordinator
        .resolve_units(&["Finance".to_string()], &[], false)
        .await
        .unwrap();
    let summary = coordinator
        .run(&units, &ExportOptions::default())
        .await
        .unwrap();

    assert!(summary.is_successful());
    assert_eq!(summary.total_units(), 1);

    let written = std::fs::read_to_string(out.path().join("Finance.json")).unwrap();
    let document: ExportDocument = serde_json::from_str(&written).unwrap();

    assert_eq!(document.unit.name, "Finance");
    let names: Vec<&str> = document
        .communities
        .iter()
        .map(|s| s.community.name.as_str())
        .collect();
    assert_eq!(names, vec!["Finance", "Tax"]);
    assert_eq!(document.communities[1].depth, 1);
    assert_eq!(document.domain_count(), 2);
    assert_eq!(document.asset_count(), 1);

    let ledger = &document.communities[0].domains[0];
    let asset = &ledger.assets.as_ref().unwrap()[0];
    assert_eq!(asset.asset.name, "General Ledger");
    assert_eq!(asset.attributes.as_ref().unwrap()[0].attribute_type, "Definition");

    let relation = &asset.relations.as_ref().unwrap()[0];
    assert_eq!(relation.direction, RelationDirection::Outgoing);
    assert_eq!(relation.related_asset.id.as_str(), "a-9");
    assert_eq!(relation.relation_type, "feeds");

    let responsibility = &asset.responsibilities.as_ref().unwrap()[0];
    assert_eq!(responsibility.role, "Steward");
    assert_eq!(responsibility.assignee_id, "u-7");

    let vat = &document.communities[1].domains[0];
    assert_eq!(vat.assets.as_deref(), Some(&[][..]));
}

#[tokio::test]
async fn test_structure_only_makes_no_asset_requests() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, false).await;
    let assets_guard = server
        .mock("GET", "/rest/2.0/assets")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let out = TempDir::new().unwrap();

    let coordinator = coordinator(&server, Arc::new(JsonFileSink::new(out.path()))).await;
    let units = coordinator
        .resolve_units(&["Finance".to_string()], &[], false)
        .await
        .unwrap();
    let summary = coordinator
        .run(&units, &ExportOptions::structure_only())
        .await
        .unwrap();
    assert!(summary.is_successful());

    let written = std::fs::read_to_string(out.path().join("Finance.json")).unwrap();
    let raw: Value = serde_json::from_str(&written).unwrap();
    assert!(raw["communities"][0]["domains"][0].get("assets").is_none());

    assets_guard.assert_async().await;
}

#[tokio::test]
async fn test_all_roots_to_jsonl() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, false).await;
    let out = TempDir::new().unwrap();

    let coordinator = coordinator(&server, Arc::new(JsonLinesFileSink::new(out.path()))).await;
    let units = coordinator.resolve_units(&[], &[], true).await.unwrap();
    let names: Vec<&str> = units.iter().map(|u| u.name()).collect();
    assert_eq!(names, vec!["Finance", "HR"]);

    let options = ExportOptions::default().with_destination(OutputDestination {
        directory: out.path().to_path_buf(),
        format: OutputFormat::Jsonl,
    });
    let summary = coordinator.run(&units, &options).await.unwrap();
    assert_eq!(summary.successful_exports(), 2);

    let finance = std::fs::read_to_string(out.path().join("Finance.jsonl")).unwrap();
    let lines: Vec<Value> = finance
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);

    // HR owns no domains, so its file has no lines
    let hr = std::fs::read_to_string(out.path().join("HR.jsonl")).unwrap();
    assert!(hr.trim().is_empty());
}

#[tokio::test]
async fn test_failed_unit_does_not_stop_the_run() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, true).await;
    let out = TempDir::new().unwrap();

    let coordinator = coordinator(&server, Arc::new(JsonFileSink::new(out.path()))).await;
    let units = coordinator
        .resolve_units(&["Finance".to_string(), "HR".to_string()], &[], false)
        .await
        .unwrap();
    let summary = coordinator
        .run(&units, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.total_units(), 2);
    assert_eq!(summary.failed_exports(), 1);
    assert_eq!(summary.results[0].unit_name(), "Finance");
    assert!(!summary.results[0].is_success());
    assert!(summary.results[1].is_success());

    assert!(!out.path().join("Finance.json").exists());
    assert!(out.path().join("HR.json").exists());
}

/// Config file for running the `export` command against `server`
fn write_command_config(server: &ServerGuard, dir: &TempDir) -> String {
    let path = dir.path().join("steward.toml");
    let content = format!(
        r#"
[catalog]
base_url = "{}"
auth_type = "none"
page_size = {PAGE_SIZE}

[catalog.retry]
max_retries = 1
initial_delay_ms = 1
max_delay_ms = 1

[output]
directory = "{}"
format = "json"
"#,
        server.url(),
        dir.path().join("out").display()
    );
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn export_command(communities: &[&str]) -> ExportArgs {
    ExportArgs {
        yes: true,
        units: UnitSelection {
            community: communities.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_single_unit_catalog_failure_exits_with_connection_code() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, true).await;
    let dir = TempDir::new().unwrap();
    let config_path = write_command_config(&server, &dir);

    let code = export_command(&["Tax"])
        .execute(&config_path)
        .await
        .unwrap();

    assert_eq!(code, EXIT_CONNECTION_ERROR);
    assert!(!dir.path().join("out").join("Tax.json").exists());
}

#[tokio::test]
async fn test_batch_with_failed_unit_exits_with_partial_code() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, true).await;
    let dir = TempDir::new().unwrap();
    let config_path = write_command_config(&server, &dir);

    let code = export_command(&["Finance", "HR"])
        .execute(&config_path)
        .await
        .unwrap();

    assert_eq!(code, 1);
    assert!(dir.path().join("out").join("HR.json").exists());
}

#[tokio::test]
async fn test_unknown_community_fails_before_export() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, false).await;
    let out = TempDir::new().unwrap();

    let coordinator = coordinator(&server, Arc::new(JsonFileSink::new(out.path()))).await;
    let err = coordinator
        .resolve_units(&["Marketing".to_string()], &[], false)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = serve_catalog(&mut server, false).await;
    let out = TempDir::new().unwrap();
    let destination = OutputDestination {
        directory: out.path().join("export"),
        format: OutputFormat::Json,
    };

    let coordinator = coordinator(&server, Arc::new(DryRunSink::new(destination))).await;
    let units = coordinator
        .resolve_units(&[], &["VAT Rules".to_string()], false)
        .await
        .unwrap();
    let summary = coordinator
        .run(&units, &ExportOptions::default())
        .await
        .unwrap();

    assert!(summary.is_successful());
    assert!(!out.path().join("export").exists());
}

#[tokio::test]
async fn test_catalog_unreachable_on_startup() {
    let client = HttpCatalogClient::new(catalog_config("http://127.0.0.1:9".to_string())).unwrap();
    let out = TempDir::new().unwrap();

    let result = ExportCoordinator::new(
        Arc::new(client),
        Arc::new(JsonFileSink::new(out.path())),
        PAGE_SIZE,
    )
    .await;

    assert!(matches!(
        result,
        Err(steward::domain::StewardError::Catalog(_))
    ));
}

#[tokio::test]
async fn test_client_sends_basic_auth_and_maps_401() {
    use steward::adapters::catalog::{CatalogQuery, CatalogSource};
    use steward::config::secret_string;
    use steward::domain::{CatalogError, StewardError};

    let mut server = mockito::Server::new_async().await;
    let authorized = server
        .mock("GET", "/rest/2.0/communities")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .match_query(Matcher::Exact("offset=0&limit=1".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [{"id": "c-1", "name": "Finance"}], "total": 1}"#)
        .create_async()
        .await;
    let rejected = server
        .mock("GET", "/rest/2.0/domains")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("bad credentials")
        .create_async()
        .await;

    let config = CatalogConfig {
        auth_type: "basic".to_string(),
        username: Some("user".to_string()),
        password: Some(secret_string("pass".to_string())),
        ..catalog_config(server.url())
    };
    let client = HttpCatalogClient::new(config).unwrap();

    let page = client
        .query(&CatalogQuery::communities().page(0, 1))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "Finance");

    let err = client
        .query(&CatalogQuery::new(steward::adapters::catalog::Endpoint::Domains))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StewardError::Catalog(CatalogError::AuthenticationFailed(_))
    ));

    authorized.assert_async().await;
    rejected.assert_async().await;
}
