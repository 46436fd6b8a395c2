use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::Recommendations,
    routes::AppState,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(title): Path<String>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        title = %title,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&state.catalog, &title)?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.recommendations.len(),
        "Recommendations computed"
    );

    Ok(Json(recommendations))
}
