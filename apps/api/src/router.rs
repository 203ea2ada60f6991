use std::sync::Arc;

use axum::{routing::get, Router};

use doctor_cell::router::doctor_routes;
use queue_cell::router::queue_routes;
use shared_store::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "OPD queue API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", queue_routes(state.clone()))
}
