//! Integration tests for the listing controller against a mock upstream.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lumina_storefront::listing::{ListingController, ProxyPageSource};
use lumina_storefront::upstream::UpstreamClient;

fn controller_for(server: &MockServer, page_size: u32) -> ListingController<ProxyPageSource> {
    let source = ProxyPageSource::new(UpstreamClient::new(&server.uri()));
    ListingController::new(source, page_size)
}

async fn mount_page(
    server: &MockServer,
    page: u32,
    records: serde_json::Value,
    has_next_page: bool,
    category_id: Option<&str>,
) {
    let mut mock = Mock::given(method("GET"))
        .and(path("/v2_0_0-products/get-product-main-info"))
        .and(query_param("page", page.to_string()));
    if let Some(category_id) = category_id {
        mock = mock.and(query_param("category_id", category_id));
    }
    mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": records,
        "exchange_rate": { "rate": 0.5, "to_currency_code": "USD" },
        "pagination": { "current_page": page, "total": 3, "has_next_page": has_next_page }
    })))
    .mount(server)
    .await;
}

#[tokio::test]
async fn pages_accumulate_in_fetch_order_with_converted_prices() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!([
            { "id": "a", "display_name": "A", "product_price": "10" },
            { "id": "b", "display_name": "B", "product_price": "20" }
        ]),
        true,
        None,
    )
    .await;
    mount_page(
        &server,
        2,
        json!([{ "id": "c", "display_name": "C", "product_price": 30 }]),
        false,
        None,
    )
    .await;

    let mut controller = controller_for(&server, 2);
    controller.load_initial(None).await;
    assert!(controller.listing().has_more());

    assert!(controller.load_more().await);
    assert!(!controller.listing().has_more());
    // Exhausted: further calls are no-ops.
    assert!(!controller.load_more().await);

    let listing = controller.listing();
    let ids: Vec<&str> = listing.records().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(listing.total(), 3);
    // Raw "10" at rate 0.5 normalizes to 5.00.
    assert!((listing.records()[0].price - 5.0).abs() < f64::EPSILON);
    assert!((listing.records()[2].price - 15.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn category_switch_resets_the_accumulated_list() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!([{ "id": "w-1", "display_name": "Dress", "product_price": "10" }]),
        true,
        Some("women"),
    )
    .await;
    mount_page(
        &server,
        1,
        json!([{ "id": "m-1", "display_name": "Shirt", "product_price": "10" }]),
        true,
        Some("men"),
    )
    .await;

    let mut controller = controller_for(&server, 2);
    controller.load_initial(Some("women")).await;
    assert_eq!(controller.listing().records()[0].id, "w-1");

    controller.load_initial(Some("men")).await;
    let ids: Vec<&str> = controller
        .listing()
        .records()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["m-1"]);
    assert_eq!(controller.listing().category_id(), Some("men"));
}

#[tokio::test]
async fn empty_page_terminates_pagination() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!([{ "id": "a", "product_price": "10" }]),
        true,
        None,
    )
    .await;
    // Upstream claims another page exists but returns nothing.
    mount_page(&server, 2, json!([]), true, None).await;

    let mut controller = controller_for(&server, 1);
    controller.load_initial(None).await;
    controller.load_more().await;

    assert_eq!(controller.listing().records().len(), 1);
    assert!(!controller.listing().has_more());
}

#[tokio::test]
async fn upstream_failure_keeps_loaded_records() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!([{ "id": "a", "product_price": "10" }]),
        true,
        None,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v2_0_0-products/get-product-main-info"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, 1);
    controller.load_initial(None).await;
    controller.load_more().await;

    let listing = controller.listing();
    assert_eq!(listing.records().len(), 1);
    assert!(!listing.has_more());
    assert!(listing.error().is_some());
}
