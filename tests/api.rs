//! Integration tests for the variant HTTP routes

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use opensase_variants::api::{build_router, AppState};
use opensase_variants::DisplaySettings;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

fn setup_app() -> axum::Router {
    build_router(AppState::new(DisplaySettings::default()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn feed() -> Value {
    json!({
        "colors":         ["black", "black", "white"],
        "capacities":     ["128GB", "256GB", "128GB"],
        "memories":       ["8GB", "8GB", "8GB"],
        "normalPrices":   [1000, 1200, 1000],
        "discountPrices": [750, null, null],
        "ecommerceStock": [2, 0, 0],
        "skus":           ["B-128", "B-256", "W-128"],
        "previewImages":  ["b128.png", "b256.png"],
        "detailImages":   [["b128-1.png", "b128-2.png"]]
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = setup_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_resolve_returns_variants_and_headline_price() {
    let response = setup_app().oneshot(post_json("/api/v1/variants/resolve", feed())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["variants"].as_array().unwrap().len(), 3);
    assert_eq!(body["variants"][0]["price"]["discount"], "-25%");
    assert_eq!(body["variants"][0]["detail_images"][1], "b128-2.png");
    assert_eq!(body["headline_price"]["price"], "$750");
    assert_eq!(body["total_stock"], 2);
    assert_eq!(body["in_stock"], true);
}

#[tokio::test]
async fn test_select_without_state_opens_first_color() {
    let response = setup_app()
        .oneshot(post_json("/api/v1/variants/select", json!({ "feed": feed() })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["state"]["color"], "#000000");
    assert_eq!(body["active"]["sku"], "B-128");
    assert_eq!(body["options"]["capacities"], json!(["128GB", "256GB"]));
    assert_eq!(body["options"]["colors"][0]["label"], "Black");
    assert_eq!(body["options"]["colors"][1]["has_stock"], false);
}

#[tokio::test]
async fn test_select_applies_event() {
    let request = json!({
        "feed": feed(),
        "state": { "color": "#000000", "capacity": null, "memory": null, "active": 0 },
        "event": { "type": "capacity_selected", "value": "256GB" }
    });
    let response = setup_app().oneshot(post_json("/api/v1/variants/select", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["state"]["capacity"], "256GB");
    assert_eq!(body["active"]["sku"], "B-256");
    // white has no 256GB variant
    assert_eq!(body["options"]["colors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_select_rejects_stale_active_index() {
    let request = json!({
        "feed": feed(),
        "state": { "color": null, "capacity": null, "memory": null, "active": 7 }
    });
    let response = setup_app().oneshot(post_json("/api/v1/variants/select", request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_media_for_edit() {
    let response = setup_app()
        .oneshot(post_json("/api/v1/variants/media", json!({ "feed": feed() })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["sku"], "B-128");
    assert_eq!(body["preview_image"], "b128.png");
    assert_eq!(body["detail_images"], json!(["b128-1.png", "b128-2.png"]));
}

#[tokio::test]
async fn test_media_for_edit_without_variants() {
    let response = setup_app()
        .oneshot(post_json("/api/v1/variants/media", json!({ "feed": {} })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
