use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    catalog::Catalog,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{recommender::RecommenderError, Recommender},
};

pub mod films;
pub mod recommendations;

/// Immutable context shared by every handler
///
/// Built once before the listener is bound and never mutated afterwards.
pub struct AppState {
    pub catalog: Catalog,
    pub recommender: Recommender,
}

impl AppState {
    /// Builds the recommendation model over `catalog`
    pub fn build<I, S>(catalog: Catalog, stopwords: I) -> Result<Self, RecommenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let recommender = Recommender::build(&catalog, stopwords)?;
        Ok(Self {
            catalog,
            recommender,
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/count-by-month/:month", get(films::count_by_month))
        .route("/count-by-weekday/:weekday", get(films::count_by_weekday))
        .route("/score-by-title/:title", get(films::score_by_title))
        .route("/votes-by-title/:title", get(films::votes_by_title))
        .route("/actor-stats/:actor", get(films::actor_stats))
        .route("/director-stats/:director", get(films::director_stats))
        .route("/recommend/:title", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
