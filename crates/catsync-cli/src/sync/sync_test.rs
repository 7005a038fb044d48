//! End-to-end sync runs against wiremock stand-ins for both APIs.

use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, BodyContainsMatcher};
use wiremock::{Mock, MockServer, ResponseTemplate};

use catsync_shopify::ShopifyClient;

use super::*;

const GRAPHQL_PATH: &str = "/admin/api/2023-10/graphql.json";

fn test_config() -> AppConfig {
    AppConfig {
        shopify_store: "test-store.myshopify.com".to_owned(),
        shopify_access_token: "shpat_test".to_owned(),
        shopify_api_version: "2023-10".to_owned(),
        baselinker_api_key: "test-key".to_owned(),
        baselinker_inventory_id: 307,
        dry_run: false,
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        shopify_page_size: 250,
        product_batch_size: 50,
    }
}

fn baselinker_client(server: &MockServer) -> BaselinkerClient {
    BaselinkerClient::with_base_url("test-key", 307, 5, &server.uri())
        .expect("failed to build test BaselinkerClient")
}

/// Form-encoded `method=<name>` fragment of a connector request body.
fn connector_method(name: &str) -> BodyContainsMatcher {
    body_string_contains(format!("method={name}"))
}

fn success(mut body: Value) -> ResponseTemplate {
    body["status"] = json!("SUCCESS");
    ResponseTemplate::new(200).set_body_json(body)
}

fn api_error(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "ERROR",
        "error_code": code,
        "error_message": "rejected"
    }))
}

/// Serves `products` (SKU, full category path) as a single Shopify page and
/// fetches the catalog through it. The page must be requested exactly once.
async fn shopify_catalog(products: &[(&str, &str)]) -> SourceCatalog {
    let server = MockServer::start().await;
    let edges: Vec<Value> = products
        .iter()
        .enumerate()
        .map(|(i, &(sku, full_name))| {
            let leaf = full_name.rsplit(" > ").next().unwrap_or(full_name);
            json!({
                "node": {
                    "id": format!("gid://shopify/Product/{}", i + 1),
                    "title": format!("Product {}", i + 1),
                    "category": {"name": leaf, "fullName": full_name},
                    "variants": {"edges": [{"node": {"sku": sku}}]}
                }
            })
        })
        .collect();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "products": {
                    "edges": edges,
                    "pageInfo": {"hasNextPage": false, "endCursor": null}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}{GRAPHQL_PATH}", server.uri());
    let shopify = ShopifyClient::with_endpoint(&endpoint, "shpat_test", 5)
        .expect("failed to build test ShopifyClient");
    fetch_source_catalog(&shopify, 250).await
}

/// Mounts mocks for calls that must never happen.
async fn forbid(server: &MockServer, methods: &[&str]) {
    for name in methods {
        Mock::given(method("POST"))
            .and(connector_method(name))
            .respond_with(success(json!({})))
            .expect(0)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn catalog_yields_paths_and_products_from_one_fetch() {
    let source = shopify_catalog(&[
        ("X1", "Apparel > Shoes"),
        ("X2", "Apparel > Shirts"),
        ("X3", "Apparel > Shoes"),
    ])
    .await;

    let paths: Vec<String> = source.paths.iter().map(ToString::to_string).collect();
    assert_eq!(paths, ["Apparel > Shoes", "Apparel > Shirts"]);
    assert_eq!(source.products.len(), 3);
    assert_eq!(source.products[2].sku.as_deref(), Some("X3"));
    assert_eq!(source.products[2].category_name.as_deref(), Some("Shoes"));
}

#[tokio::test]
async fn product_sync_stops_when_product_list_fails() {
    let source = shopify_catalog(&[("X1", "Apparel > Shoes")]).await;
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(connector_method("getInventoryProductsList"))
        .respond_with(api_error("ERROR_STORAGE"))
        .expect(1)
        .mount(&server)
        .await;
    forbid(
        &server,
        &[
            "getInventoryProductsData",
            "getInventoryCategories",
            "addInventoryProduct",
        ],
    )
    .await;

    let report = run_product_sync(&test_config(), &source, &baselinker_client(&server)).await;

    assert_eq!(report, AssignReport::default());
}

#[tokio::test]
async fn product_sync_stops_when_inventory_is_empty() {
    let source = shopify_catalog(&[("X1", "Apparel > Shoes")]).await;
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(connector_method("getInventoryProductsList"))
        .respond_with(success(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;
    forbid(
        &server,
        &[
            "getInventoryProductsData",
            "getInventoryCategories",
            "addInventoryProduct",
        ],
    )
    .await;

    let report = run_product_sync(&test_config(), &source, &baselinker_client(&server)).await;

    assert_eq!(report, AssignReport::default());
}

#[tokio::test]
async fn category_sync_treats_failed_listing_as_empty() {
    let source = shopify_catalog(&[("X1", "Apparel > Shoes")]).await;
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(connector_method("getInventoryCategories"))
        .respond_with(api_error("ERROR_BAD_TOKEN"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("addInventoryCategory"))
        .and(body_string_contains("%22name%22%3A%22Apparel%22"))
        .and(body_string_contains("%22parent_id%22%3A0"))
        .respond_with(success(json!({"category_id": 11})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("addInventoryCategory"))
        .and(body_string_contains("%22name%22%3A%22Shoes%22"))
        .and(body_string_contains("%22parent_id%22%3A11"))
        .respond_with(success(json!({"category_id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let report = run_category_sync(&test_config(), &source, &baselinker_client(&server))
        .await
        .expect("category sync should succeed");

    assert_eq!(report.created, 2);
    assert_eq!(report.existing, 0);
}

#[tokio::test]
async fn all_assigns_products_to_categories_created_in_the_same_run() {
    let source = shopify_catalog(&[("X1", "Apparel > Shoes")]).await;
    let server = MockServer::start().await;

    // First listing, before category sync: nothing exists yet.
    Mock::given(method("POST"))
        .and(connector_method("getInventoryCategories"))
        .respond_with(success(json!({"categories": []})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    // Second listing, before assignment: the categories just created.
    Mock::given(method("POST"))
        .and(connector_method("getInventoryCategories"))
        .respond_with(success(json!({
            "categories": [
                {"category_id": 11, "name": "Apparel", "parent_id": 0},
                {"category_id": 12, "name": "Shoes", "parent_id": 11}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("addInventoryCategory"))
        .and(body_string_contains("%22name%22%3A%22Apparel%22"))
        .respond_with(success(json!({"category_id": 11})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("addInventoryCategory"))
        .and(body_string_contains("%22name%22%3A%22Shoes%22"))
        .respond_with(success(json!({"category_id": 12})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("getInventoryProductsList"))
        .respond_with(success(json!({"products": {"10": {"id": 10, "sku": "X1"}}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("getInventoryProductsData"))
        .respond_with(success(json!({
            "products": {
                "10": {"sku": "X1", "category_id": 0, "text_fields": {"name": "Trail Runner"}}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("addInventoryProduct"))
        .and(body_string_contains("%22product_id%22%3A10"))
        .and(body_string_contains("%22category_id%22%3A12"))
        .respond_with(success(json!({"product_id": 10})))
        .expect(1)
        .mount(&server)
        .await;

    let (categories, products) = run_all(&test_config(), &source, &baselinker_client(&server))
        .await
        .expect("sync should succeed");

    assert_eq!(categories.created, 2);
    assert_eq!(products.matched, 1);
    assert_eq!(products.updated, 1);
    assert_eq!(products.skipped_unknown_category, 0);
}

#[tokio::test]
async fn all_skips_product_sync_after_missing_parent() {
    let source = shopify_catalog(&[("X1", "Apparel > Shoes")]).await;
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(connector_method("getInventoryCategories"))
        .respond_with(success(json!({"categories": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(connector_method("addInventoryCategory"))
        .respond_with(api_error("ERROR_CATEGORY"))
        .expect(1)
        .mount(&server)
        .await;
    forbid(&server, &["getInventoryProductsList", "addInventoryProduct"]).await;

    let result = run_all(&test_config(), &source, &baselinker_client(&server)).await;

    match result {
        Err(SyncError::MissingParent { category, parent }) => {
            assert_eq!(category, "Shoes");
            assert_eq!(parent, "Apparel");
        }
        other => panic!("expected MissingParent, got: {other:?}"),
    }
}
