use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::Movie,
};

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.list_all().await?;
    tracing::debug!(count = movies.len(), "listed movies");
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Movie>> {
    let id = parse_id(&raw_id)?;
    let movie = state.store.get_by_id(id).await?;
    Ok(Json(movie))
}

/// `GET /movies/` with nothing after the slash.
pub async fn missing_movie_id() -> AppError {
    AppError::Validation("movie id is missing".to_string())
}

/// Accepts ids only in canonical decimal form, so each movie has exactly one
/// path. An integer too large to be any stored id is reported as missing.
fn parse_id(raw: &str) -> AppResult<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (!digits.starts_with('0') || raw == "0");
    if !canonical {
        return Err(AppError::Validation(format!(
            "invalid movie id {raw:?}: expected an integer"
        )));
    }

    raw.parse::<i64>().map_err(|_| AppError::NotFound(format!("movie {raw} not found")))
}
