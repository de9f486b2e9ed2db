//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each store server endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use traced_cache::{api::create_router, AppState};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::default())
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

fn request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .unwrap()
}

// == SET / GET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(request("PUT", "/set/test_key", "test_value"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), "test_key");
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_then_get_raw_bytes() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(request("PUT", "/set/bin", vec![0u8, 1, 2, 255]))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app
        .oneshot(request("GET", "/get/bin", Body::empty()))
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    assert_eq!(body_bytes(get_response.into_body()).await, vec![0u8, 1, 2, 255]);
}

#[tokio::test]
async fn test_encoded_key_with_slashes() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(request(
            "PUT",
            "/set/cache:http:%2F%2Fexample.com%2Fpage",
            "<html></html>",
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(request(
            "GET",
            "/get/cache:http:%2F%2Fexample.com%2Fpage",
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response.into_body()).await, b"<html></html>".to_vec());
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(request("GET", "/get/nonexistent_key", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_set_with_ttl_expires() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(request("PUT", "/set/short?ttl=1", "soon gone"))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let response = app
        .oneshot(request("GET", "/get/short", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_with_zero_ttl_rejected() {
    let app = create_test_app();

    let response = app
        .oneshot(request("PUT", "/set/key?ttl=0", "value"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_key_too_long_rejected() {
    let app = create_test_app();
    let uri = format!("/set/{}", "k".repeat(300));

    let response = app.oneshot(request("PUT", &uri, "value")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == INCR Endpoint Tests ==

#[tokio::test]
async fn test_incr_endpoint_counts() {
    let app = create_test_app();

    for expected in 1..=3 {
        let response = app
            .clone()
            .oneshot(request("POST", "/incr/Cache.store", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["value"].as_i64().unwrap(), expected);
    }

    let response = app
        .oneshot(request("GET", "/get/Cache.store", Body::empty()))
        .await
        .unwrap();
    assert_eq!(body_bytes(response.into_body()).await, b"3".to_vec());
}

#[tokio::test]
async fn test_incr_non_integer_conflicts() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(request("PUT", "/set/text", "hello"))
        .await
        .unwrap();

    let response = app
        .oneshot(request("POST", "/incr/text", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// == RPUSH / LRANGE Endpoint Tests ==

#[tokio::test]
async fn test_rpush_and_lrange() {
    let app = create_test_app();

    for (i, item) in ["first", "second", "third"].iter().enumerate() {
        let response = app
            .clone()
            .oneshot(request("POST", "/rpush/log", *item))
            .await
            .unwrap();
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["length"].as_u64().unwrap(), i as u64 + 1);
    }

    let response = app
        .clone()
        .oneshot(request("GET", "/lrange/log", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let values: Vec<Vec<u8>> = serde_json::from_value(json["values"].clone()).unwrap();
    assert_eq!(
        values,
        vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]
    );

    let response = app
        .oneshot(request("GET", "/lrange/log?start=-1&stop=-1", Body::empty()))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    let values: Vec<Vec<u8>> = serde_json::from_value(json["values"].clone()).unwrap();
    assert_eq!(values, vec![b"third".to_vec()]);
}

#[tokio::test]
async fn test_lrange_missing_key_is_empty() {
    let app = create_test_app();

    let response = app
        .oneshot(request("GET", "/lrange/nothing", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["values"].as_array().unwrap().is_empty());
}

// == FLUSHDB Endpoint Tests ==

#[tokio::test]
async fn test_flushdb_clears_everything() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(request("PUT", "/set/a", "1"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request("POST", "/flushdb", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("GET", "/get/a", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == STATS / HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(request("PUT", "/set/stats_key", "stats_value"))
        .await
        .unwrap();
    // hit
    let _ = app
        .clone()
        .oneshot(request("GET", "/get/stats_key", Body::empty()))
        .await
        .unwrap();
    // miss
    let _ = app
        .clone()
        .oneshot(request("GET", "/get/nonexistent", Body::empty()))
        .await
        .unwrap();

    let response = app
        .oneshot(request("GET", "/stats", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert!((json["hit_rate"].as_f64().unwrap() - 0.5).abs() < 0.001);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(request("GET", "/health", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
