use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ActorStats, DirectorStats, MonthCount, TitleScore, TitleVotes, WeekdayCount},
    routes::AppState,
    services::catalog_queries,
};

/// Handler for films released in a month
pub async fn count_by_month(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
) -> AppResult<Json<MonthCount>> {
    let count = catalog_queries::count_by_month(&state.catalog, &month)?;
    Ok(Json(count))
}

/// Handler for films released on a weekday
pub async fn count_by_weekday(
    State(state): State<Arc<AppState>>,
    Path(weekday): Path<String>,
) -> AppResult<Json<WeekdayCount>> {
    let count = catalog_queries::count_by_weekday(&state.catalog, &weekday)?;
    Ok(Json(count))
}

pub async fn score_by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> AppResult<Json<TitleScore>> {
    Ok(Json(catalog_queries::score_by_title(&state.catalog, &title)?))
}

pub async fn votes_by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> AppResult<Json<TitleVotes>> {
    Ok(Json(catalog_queries::votes_by_title(&state.catalog, &title)?))
}

/// Handler for actor return statistics
pub async fn actor_stats(
    State(state): State<Arc<AppState>>,
    Path(actor): Path<String>,
) -> AppResult<Json<ActorStats>> {
    let stats = catalog_queries::actor_stats(&state.catalog, &actor)?;
    tracing::debug!(actor = %actor, films = stats.film_count, "Actor stats computed");
    Ok(Json(stats))
}

/// Handler for director return statistics
pub async fn director_stats(
    State(state): State<Arc<AppState>>,
    Path(director): Path<String>,
) -> AppResult<Json<DirectorStats>> {
    let stats = catalog_queries::director_stats(&state.catalog, &director)?;
    tracing::debug!(director = %director, films = stats.films.len(), "Director stats computed");
    Ok(Json(stats))
}
