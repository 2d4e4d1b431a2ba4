//! Bearer token enforcement on the movie routes.
//!
//! Tests verify:
//! - Valid tokens reach the handlers
//! - Missing, malformed, forged and expired tokens are rejected with 401
//! - Rejected requests never reach the handler (no 400/404 leaks through)

use std::time::Duration;

use axum::http::StatusCode;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use movieshelf::{RouterConfig, TokenAuth, auth::Claims};

use super::test_utils::{TEST_SECRET, body_json, get, inception, router_with};

fn valid_token() -> String {
    TokenAuth::new(TEST_SECRET).issue("client", Duration::from_secs(3600)).unwrap()
}

// =============================================================================
// Accepted
// =============================================================================

#[tokio::test]
async fn test_valid_token_reaches_handlers() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;
    let token = valid_token();

    let response = get(router.clone(), "/movies", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(router.clone(), "/movies/1", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Inception");

    let response = get(router, "/movies/999", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_routes_are_open_without_auth_config() {
    let router = router_with(&[inception()], RouterConfig::without_auth()).await;

    let response = get(router, "/movies", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Rejected
// =============================================================================

#[tokio::test]
async fn test_missing_header_is_401() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;

    let response = get(router, "/movies", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get("www-authenticate").unwrap(), "Bearer");
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_header_without_bearer_prefix_is_401() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;

    let request = Request::builder()
        .uri("/movies")
        .header("authorization", valid_token())
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forged_token_is_401() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;
    let forged = TokenAuth::new("some-other-secret").issue("client", Duration::from_secs(3600));

    let response = get(router, "/movies", Some(&forged.unwrap())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;

    let now = jiff::Timestamp::now().as_second();
    let claims = Claims { sub: "client".to_string(), iat: now - 7200, exp: now - 3600 };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get(router, "/movies", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;

    let response = get(router, "/movies", Some("not.a.token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejection_happens_before_path_validation() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;

    for uri in ["/movies/foo", "/movies/999", "/movies/"] {
        let response = get(router.clone(), uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_unrouted_paths_are_guarded_too() {
    let router = router_with(&[inception()], RouterConfig::with_auth(TEST_SECRET)).await;

    let response = get(router.clone(), "/movies/1/extra", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(router, "/movies/1/extra", Some(&valid_token())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
