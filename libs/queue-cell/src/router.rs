// libs/queue-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::AppState;

use crate::handlers;

pub fn queue_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/queue", get(handlers::get_queue))
        .route("/call-next", post(handlers::call_next))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route(
            "/{appointment_id}/confirm-payment",
            post(handlers::confirm_payment),
        )
        .route(
            "/{appointment_id}/complete",
            post(handlers::complete_appointment),
        )
        .route("/{appointment_id}/skip", post(handlers::skip_appointment))
        .route(
            "/{appointment_id}/cancel",
            post(handlers::cancel_appointment),
        )
        .with_state(state)
}
