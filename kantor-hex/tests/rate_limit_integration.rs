//! Integration tests for rate limiting middleware.
//!
//! These tests verify the HTTP-level behavior of rate limiting,
//! including 429 responses and proper integration with the middleware stack.

mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use tower::ServiceExt;

use common::{get, json_body, post_json, server};

/// Helper to make a history request on behalf of a forwarded client.
fn client_request(client: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/history")
        .header("X-Forwarded-For", client)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let app = server().with_rate_limit(3).router();

    for i in 1..=3 {
        let response = app
            .clone()
            .oneshot(client_request("198.51.100.1"))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    let response = app.clone().oneshot(client_request("198.51.100.1")).await.unwrap();
    assert_eq!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Request should be rate limited after exceeding quota"
    );

    let json = json_body(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Rate limit exceeded")
    );
    assert_eq!(json["code"], 429);

    // One token refills every 20 seconds at 3 per minute
    let retry_after = json["retry_after_seconds"].as_u64().unwrap();
    assert!((19..=20).contains(&retry_after), "{retry_after}");
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let app = server().with_rate_limit(1).router();

    for _ in 0..10 {
        let response = app.clone().oneshot(get("/api/health")).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Health endpoint should not be rate limited"
        );
    }
}

#[tokio::test]
async fn test_rate_limiting_per_client_isolation() {
    let app = server().with_rate_limit(1).router();

    let response = app.clone().oneshot(client_request("198.51.100.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(client_request("198.51.100.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .clone()
        .oneshot(client_request("198.51.100.2, 10.0.0.1"))
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "Second client should have its own quota"
    );
}

#[tokio::test]
async fn test_unidentified_clients_share_anonymous_quota() {
    let app = server().with_rate_limit(2).router();

    for _ in 0..2 {
        let response = app.clone().oneshot(get("/api/history")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_json("/calculate.php", r#"{"num1": 1, "num2": 2, "operation": "+"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limiting_response_format() {
    let app = server().with_rate_limit(1).router();

    let _ = app.clone().oneshot(client_request("198.51.100.9")).await;
    let response = app.clone().oneshot(client_request("198.51.100.9")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("application/json"));

    let json = json_body(response).await;
    assert!(
        json.get("error").is_some(),
        "Response should have 'error' field"
    );
    assert_eq!(json["code"], 429, "Response should carry the status code");
    assert!(
        json["retry_after_seconds"].as_u64().is_some_and(|s| s >= 1),
        "Response should have a positive 'retry_after_seconds' field"
    );
}

#[tokio::test]
async fn test_many_clients_each_keep_their_own_limit() {
    let app = server().with_rate_limit(1).router();

    for i in 0..50 {
        let client = format!("203.0.113.{i}");

        let response = app.clone().oneshot(client_request(&client)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{client}");

        let response = app.clone().oneshot(client_request(&client)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS, "{client}");
    }
}
