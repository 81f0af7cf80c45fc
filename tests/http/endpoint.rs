use super::{body_text, get, seeded_app, send};
use axum::http::{Method, StatusCode, header};
use delay_server::{CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN};
use delay_server_handler::WELCOME_PAGE;
use std::time::Duration;
use tokio::time::Instant;

const MAX_BELOW_MIN: &str = "invalid 'maxMs' & 'minMs' query params. maxMs must be greater than or equal to minMs";

fn assert_cors(headers: &axum::http::HeaderMap) {
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], CORS_ALLOW_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], CORS_ALLOW_METHODS);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], CORS_ALLOW_HEADERS);
}

#[tokio::test]
async fn success_page_with_html_content_type() {
    let response = get(seeded_app(1), "/?max=0").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_eq!(body_text(response).await, WELCOME_PAGE);
}

#[tokio::test(start_paused = true)]
async fn options_is_empty_and_immediate() {
    let start = Instant::now();
    let response = send(seeded_app(1), Method::OPTIONS, "/?min=5000&max=5000&failure=1").await;

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
    assert_eq!(body_text(response).await, "");
}

#[tokio::test]
async fn max_above_ceiling_is_rejected() {
    let response = get(seeded_app(1), "/?max=30001").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(response.headers());
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(
        body_text(response).await,
        "invalid 'maxMs' query param. must be >= 0 and <= 30000"
    );
}

#[tokio::test]
async fn negative_max_is_rejected() {
    let response = get(seeded_app(1), "/?max=-1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "invalid 'maxMs' query param. must be >= 0 and <= 30000"
    );
}

#[tokio::test]
async fn negative_min_is_rejected() {
    let response = get(seeded_app(1), "/?min=-1&max=10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "invalid 'minMs' query param. must be >= 0"
    );
}

#[tokio::test]
async fn max_below_min_names_both_params() {
    // Defaults: max is 1, so a bare min above it is already invalid.
    for uri in ["/?min=1000&max=999", "/?min=2"] {
        let response = get(seeded_app(1), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, MAX_BELOW_MIN);
    }
}

#[tokio::test]
async fn max_is_checked_before_min() {
    let response = get(seeded_app(1), "/?min=-5&max=40000").await;
    assert_eq!(
        body_text(response).await,
        "invalid 'maxMs' query param. must be >= 0 and <= 30000"
    );
}

#[tokio::test]
async fn unparseable_values_fall_back_to_defaults() {
    let response = get(seeded_app(1), "/?max=soon&min=&failure=often").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, WELCOME_PAGE);
}

#[tokio::test]
async fn first_occurrence_of_a_param_wins() {
    let response = get(seeded_app(1), "/?min=-1&min=0&max=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(seeded_app(1), "/?min=0&min=-1&max=0").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn every_method_and_path_reaches_the_handler() {
    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let response = send(seeded_app(1), method, "/anything/else?max=0&failure=1").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(response.headers());
        assert_eq!(body_text(response).await, "Mock error");
    }
}
