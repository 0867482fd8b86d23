//! Integration tests for the upstream proxy API.

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use lumina_integration_tests::TestApp;

#[tokio::test]
async fn health_responds_ok() {
    let app = TestApp::spawn().await;
    let resp = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn products_proxy_adds_converted_prices() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v2_0_0-products/get-product-main-info"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "product_price": "100", "original_price": "120" },
                { "id": 2, "product_price": 19.99 }
            ],
            "exchange_rate": { "rate": 0.14, "from_currency_code": "CNY", "to_currency_code": "USD" },
            "pagination": { "current_page": 1, "total": 40, "has_next_page": true }
        })))
        .mount(&app.upstream)
        .await;

    let body: Value = app
        .client
        .get(app.url("/api/products"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    let first = &body["data"][0];
    assert_eq!(first["product_price"], json!("100"));
    assert_eq!(first["product_price_usd"], json!(14.0));
    assert_eq!(first["original_price_usd"], json!(16.8));
    assert_eq!(body["currency"], json!("USD"));
    // 19.99 * 0.14 rounds to 2.80.
    assert_eq!(body["data"][1]["product_price_usd"], json!(2.8));
    assert_eq!(body["pagination"]["has_next_page"], json!(true));
}

#[tokio::test]
async fn products_proxy_passes_through_without_usable_rate() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v2_0_0-products/get-product-main-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "product_price": "100" }],
            "exchange_rate": { "rate": 0 }
        })))
        .mount(&app.upstream)
        .await;

    let body: Value = app
        .client
        .get(app.url("/api/products"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["data"][0]["product_price"], json!("100"));
    assert!(body["data"][0].get("product_price_usd").is_none());
    assert_eq!(body["currency"], json!("USD"));
}

#[tokio::test]
async fn search_requires_a_keyword() {
    let app = TestApp::spawn().await;

    for uri in ["/api/search", "/api/search?keyword=%20%20"] {
        let resp = app
            .client
            .get(app.url(uri))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), 400, "uri: {uri}");
        let body: Value = resp.json().await.expect("json body");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn search_passes_the_envelope_through() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v2_0_0-search/search"))
        .and(query_param("keyword", "shoes"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "total": 12,
            "has_next_page": false,
            "items": [{ "id": 6 }]
        })))
        .mount(&app.upstream)
        .await;

    let body: Value = app
        .client
        .get(app.url("/api/search?keyword=shoes&page=2&page_size=5"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["items"][0]["id"], json!(6));
}

#[tokio::test]
async fn search_mirrors_the_upstream_status() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v2_0_0-search/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("search backend down"))
        .mount(&app.upstream)
        .await;

    let resp = app
        .client
        .get(app.url("/api/search?keyword=shoes"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 503);
}

#[tokio::test]
async fn categories_transform_the_upstream_tree() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v2_0_0-category/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tree": [{
                "id": 10,
                "category_name": "Women",
                "level": 0,
                "children": [{
                    "id": 20,
                    "category_name": "Tops & Tees",
                    "level": 1,
                    "children": []
                }]
            }]
        })))
        .mount(&app.upstream)
        .await;

    let body: Value = app
        .client
        .get(app.url("/api/categories"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"][0]["slug"], json!("women"));
    assert_eq!(body["data"][0]["sub_categories"][0]["slug"], json!("tops-tees"));
}

#[tokio::test]
async fn categories_fall_back_when_upstream_fails() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/v2_0_0-category/tree"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.upstream)
        .await;

    let resp = app
        .client
        .get(app.url("/api/categories"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], json!(true));
    let slugs: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|c| c["slug"].as_str())
        .collect();
    assert!(slugs.contains(&"women"));
    assert!(slugs.contains(&"men"));
}

#[tokio::test]
async fn product_detail_parses_embedded_json_strings() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v2_0_0-products/get-product-details-with-variants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "info": {
                "title_en": "Linen Shirt",
                "images": "[\"https://img.example/1.jpg\"]",
                "raw_data": "{\"origin_price\": \"100\"}",
                "product_props": "[]"
            },
            "variants": [],
            "exchange_rate": { "rate": 0.14, "to_currency_code": "USD" }
        })))
        .mount(&app.upstream)
        .await;

    let body: Value = app
        .client
        .get(app.url("/api/products/p-1"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["title"], json!("Linen Shirt"));
    assert_eq!(body["images"][0], json!("https://img.example/1.jpg"));
    assert_eq!(body["currency"], json!("USD"));
}

#[tokio::test]
async fn missing_product_detail_is_a_404() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v2_0_0-products/get-product-details-with-variants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&app.upstream)
        .await;

    let resp = app
        .client
        .get(app.url("/api/products/p-missing"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn image_proxy_requires_a_url_and_streams_with_cache_headers() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/api/image-proxy"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 400);

    let resp = app
        .client
        .get(app.url("/api/image-proxy?url=ftp://img.example/a.png"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 400);

    Mock::given(method("GET"))
        .and(path("/images/a.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .mount(&app.upstream)
        .await;

    let image_url = format!("{}/images/a.png", app.upstream.uri());
    let resp = app
        .client
        .get(app.url("/api/image-proxy"))
        .query(&[("url", image_url.as_str())])
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").map(|v| v.to_str().unwrap_or_default()),
        Some("image/png")
    );
    assert_eq!(
        resp.headers().get("cache-control").map(|v| v.to_str().unwrap_or_default()),
        Some("public, max-age=31536000, immutable")
    );
    let bytes = resp.bytes().await.expect("body");
    assert_eq!(bytes.as_ref(), [0x89, 0x50, 0x4e, 0x47]);
}
