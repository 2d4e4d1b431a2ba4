pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::StatusCode, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use crate::{auth::TokenAuth, config::Config, store::MovieStore};

pub struct AppState {
    pub store: MovieStore,
}

/// How the router is assembled around the handlers.
#[derive(Clone)]
pub struct RouterConfig {
    pub auth: Option<TokenAuth>,
    pub request_timeout: Duration,
}

impl RouterConfig {
    pub fn without_auth() -> Self {
        Self { auth: None, request_timeout: Duration::from_secs(30) }
    }

    pub fn with_auth(secret: impl AsRef<[u8]>) -> Self {
        Self { auth: Some(TokenAuth::new(secret)), ..Self::without_auth() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            auth: config.require_auth.then(|| TokenAuth::new(&config.jwt_secret)),
            request_timeout: config.request_timeout,
        }
    }
}

pub fn create_router(store: MovieStore, config: RouterConfig) -> Router {
    let mut router = Router::new()
        .route("/movies", get(routes::list_movies))
        .route("/movies/", get(routes::missing_movie_id))
        .route("/movies/{id}", get(routes::get_movie))
        .fallback(|| async { error::AppError::NotFound("no such route".to_string()) })
        .with_state(Arc::new(AppState { store }));

    // Layered over the fallback too, so unknown paths also need a token.
    if let Some(token_auth) = config.auth {
        router = router.layer(middleware::from_fn_with_state(token_auth, auth::require_bearer));
    }

    with_service_layers(router, config.request_timeout)
}

/// Wraps `router` in request tracing, the request deadline (answered with
/// 408) and CORS, outermost first.
pub fn with_service_layers(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
            .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any)),
    )
}
