// libs/reservation-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn reservation_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/", post(handlers::book_reservation))
        .route("/", get(handlers::list_reservations))
        .route("/{reservation_id}", get(handlers::get_reservation_detail))
        .route("/{reservation_id}/cancel", post(handlers::cancel_reservation))
        .route("/patients/{patient_id}", get(handlers::list_patient_reservations))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
