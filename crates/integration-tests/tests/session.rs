//! Whole browsing sessions: runtime, state machine and HTTP client against
//! the fake Storefront API.
//!
//! Run with: cargo test -p shopfront-integration-tests --test session

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::Value;
use shopfront::app::{FailureKind, QueryResult, Storefront};
use shopfront::commands::SessionCommand;
use shopfront::config::{CatalogConfig, HomeSource};
use shopfront::device::Breakpoints;
use shopfront::routes::{Route, product_path};
use shopfront::runtime::Runtime;
use shopfront::shopify::StorefrontClient;
use shopfront_core::{ProductId, VariantId};
use shopfront_integration_tests::fixtures::{
    collection_by_handle, product, products, shop_front,
};
use shopfront_integration_tests::{FakeCatalogApi, RecordedRequest, Reply};
use url::Url;

const MANGO: &str = "gid://shopify/Product/1";
const RINGS: &str = "gid://shopify/Product/2";
const KIWI: &str = "gid://shopify/Product/3";

/// Two pages of shop front products, keyed by the `after` variable.
fn paged_shop(request: &RecordedRequest) -> Reply {
    let page = match request.variable("after") {
        Value::Null => products(
            vec![
                product(
                    MANGO,
                    "Dried Mango",
                    &[
                        ("gid://shopify/ProductVariant/11", "4 oz", "8.50"),
                        ("gid://shopify/ProductVariant/12", "1 lb", "24.00"),
                    ],
                ),
                product(
                    RINGS,
                    "Pineapple Rings",
                    &[("gid://shopify/ProductVariant/21", "Default Title", "9.00")],
                ),
            ],
            true,
            Some("cursor-2"),
        ),
        _ => products(
            vec![product(
                KIWI,
                "Dried Kiwi",
                &[("gid://shopify/ProductVariant/31", "Default Title", "7.25")],
            )],
            false,
            Some("cursor-3"),
        ),
    };
    Reply::Data(shop_front("Naked Pineapple", page))
}

fn origin() -> Url {
    Url::parse("http://localhost:3000").unwrap()
}

fn start(
    api: &FakeCatalogApi,
    catalog: &CatalogConfig,
    path: &str,
    width: u32,
    height: u32,
) -> Runtime<StorefrontClient> {
    let storefront = Storefront::new(Breakpoints::default(), catalog);
    Runtime::start(storefront, api.client(catalog), path, width, height)
}

fn command(line: &str) -> SessionCommand {
    line.parse().expect("Command should parse")
}

#[tokio::test]
async fn test_desktop_home_page() {
    let api = FakeCatalogApi::start(paged_shop).await;
    let mut runtime = start(&api, &CatalogConfig::default(), "/", 1440, 900);
    runtime.settle().await;

    assert_eq!(runtime.model().route, Route::Home);
    assert!(!runtime.model().is_loading());

    let frame = runtime.render();
    assert!(frame.starts_with("Naked Pineapple | Home | Search\n"), "{frame}");
    assert!(frame.contains("Dried Mango (8.50 USD) | Pineapple Rings (9.00 USD)"));
    assert!(frame.contains("More products available."));
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn test_browse_product_and_pick_variant() {
    let api = FakeCatalogApi::start(paged_shop).await;
    let mut runtime = start(&api, &CatalogConfig::default(), "/", 390, 844);
    runtime.settle().await;
    assert!(runtime.render().starts_with("[=] Naked Pineapple"));

    command(&format!("product {MANGO}")).apply(&mut runtime, &origin());
    runtime.settle().await;

    let mango = ProductId::new(MANGO);
    assert_eq!(runtime.model().route, Route::ProductDetail(mango.clone()));
    assert_eq!(runtime.history().current(), product_path(&mango));

    command(&format!("variant {MANGO} gid://shopify/ProductVariant/12"))
        .apply(&mut runtime, &origin());
    runtime.settle().await;

    assert_eq!(
        runtime.model().selected_variant(&mango).map(|v| v.id.clone()),
        Some(VariantId::new("gid://shopify/ProductVariant/12"))
    );
    let frame = runtime.render();
    assert!(frame.starts_with("< Naked Pineapple\nDried Mango\n"), "{frame}");
    assert!(frame.contains("  (*) 1 lb - 24.00 USD"));
    assert!(frame.contains("  ( ) 4 oz - 8.50 USD"));

    // Opening a product reuses the loaded page.
    assert_eq!(api.requests().len(), 1);

    // Returning home reloads the catalog and starts focus afresh.
    command("back").apply(&mut runtime, &origin());
    runtime.settle().await;
    assert_eq!(runtime.model().route, Route::Home);
    assert_eq!(api.requests().len(), 2);
    assert_eq!(
        runtime.model().selected_variant(&mango).map(|v| v.title.as_str()),
        Some("4 oz")
    );
}

#[tokio::test]
async fn test_deep_link_to_product() {
    let api = FakeCatalogApi::start(paged_shop).await;
    let rings = ProductId::new(RINGS);
    let mut runtime = start(&api, &CatalogConfig::default(), &product_path(&rings), 1440, 900);
    runtime.settle().await;

    assert_eq!(runtime.model().route, Route::ProductDetail(rings.clone()));
    assert_eq!(runtime.model().product_focus.selected().id, rings);
    assert!(runtime.render().contains("Pineapple Rings\n9.00 USD\n"));
}

#[tokio::test]
async fn test_load_next_page() {
    let api = FakeCatalogApi::start(paged_shop).await;
    let mut runtime = start(&api, &CatalogConfig::default(), "/", 1440, 900);
    runtime.settle().await;

    command("next").apply(&mut runtime, &origin());
    runtime.settle().await;

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].variable("after"), &Value::String("cursor-2".to_string()));

    assert_eq!(runtime.model().query_results.len(), 2);
    assert_eq!(runtime.model().product_focus.selected().id, ProductId::new(KIWI));
    let frame = runtime.render();
    assert!(frame.contains("Dried Kiwi (7.25 USD)"));
    assert!(!frame.contains("More products available."));

    // Last page: nothing more to fetch.
    command("next").apply(&mut runtime, &origin());
    runtime.settle().await;
    assert_eq!(api.requests().len(), 2);
}

#[tokio::test]
async fn test_unknown_path_redirects_home() {
    let api = FakeCatalogApi::start(paged_shop).await;
    let mut runtime = start(&api, &CatalogConfig::default(), "/", 1440, 900);
    runtime.settle().await;

    command("open /checkout").apply(&mut runtime, &origin());
    runtime.settle().await;

    assert_eq!(runtime.model().route, Route::Home);
    assert_eq!(runtime.history().current(), "/home");
    assert_eq!(runtime.history().back_len(), 2);
}

#[tokio::test]
async fn test_external_link_is_recorded() {
    let api = FakeCatalogApi::start(paged_shop).await;
    let mut runtime = start(&api, &CatalogConfig::default(), "/", 1440, 900);
    runtime.settle().await;

    command("open https://instagram.com/nakedpineapple").apply(&mut runtime, &origin());
    runtime.settle().await;

    assert_eq!(
        runtime.history().external_loads(),
        ["https://instagram.com/nakedpineapple"]
    );
    assert_eq!(runtime.history().current(), "/");
    assert_eq!(runtime.model().route, Route::Home);
}

#[tokio::test]
async fn test_failed_fetch_is_shown_inline() {
    let api = FakeCatalogApi::start(|_| Reply::Status(502, "bad gateway".to_string())).await;
    let mut runtime = start(&api, &CatalogConfig::default(), "/", 1440, 900);
    runtime.settle().await;

    assert!(matches!(
        runtime.model().latest(),
        Some(QueryResult::Failure(failure)) if failure.kind == FailureKind::Status
    ));
    let frame = runtime.render();
    assert!(frame.contains("Error: HTTP 502: bad gateway"), "{frame}");
    assert!(frame.contains("Shop | Home | Search"));
}

#[tokio::test]
async fn test_missing_home_collection() {
    let api = FakeCatalogApi::start(|_| Reply::Data(collection_by_handle("Naked Pineapple", None)))
        .await;
    let catalog = CatalogConfig {
        home: HomeSource::Collection("winter".to_string()),
        ..CatalogConfig::default()
    };
    let mut runtime = start(&api, &catalog, "/home", 1440, 900);
    runtime.settle().await;

    assert!(matches!(
        runtime.model().latest(),
        Some(QueryResult::Failure(failure)) if failure.kind == FailureKind::NotFound
    ));
    assert!(runtime.render().contains("Error: Not found: collection winter"));
}
