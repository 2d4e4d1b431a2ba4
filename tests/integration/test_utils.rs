//! Shared fixtures for the integration tests.

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use jiff::Timestamp;
use tower::ServiceExt;

use movieshelf::{MovieStore, RouterConfig, create_router, db, models::Movie};

pub const TEST_SECRET: &str = "test-secret-key-for-hmac-signing";

pub fn movie(title: &str, runtime: i32, mpaa_rating: &str) -> Movie {
    Movie {
        id: 0,
        title: title.to_string(),
        release_date: "2010-07-16T00:00:00Z".parse().unwrap(),
        runtime,
        mpaa_rating: mpaa_rating.to_string(),
        description: format!("{title} description"),
        image: format!("{}.jpg", title.to_lowercase()),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn inception() -> Movie {
    movie("Inception", 148, "PG-13")
}

pub async fn store_with(movies: &[Movie]) -> MovieStore {
    let store = MovieStore::new(db::connect_and_migrate("sqlite::memory:").await.unwrap());
    for m in movies {
        store.create(m).await.unwrap();
    }
    store
}

pub async fn router_with(movies: &[Movie], config: RouterConfig) -> Router {
    create_router(store_with(movies).await, config)
}

pub async fn get(router: Router, uri: &str, bearer: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = bearer {
        request = request.header("authorization", format!("Bearer {token}"));
    }
    router.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
