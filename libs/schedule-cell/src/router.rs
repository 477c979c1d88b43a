// libs/schedule-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/practitioners/{practitioner_id}/generate", post(handlers::generate_schedule))
        .route("/practitioners/{practitioner_id}/days", get(handlers::list_schedule_days))
        .route("/practitioners/{practitioner_id}/days/{date}", get(handlers::get_day_offers))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
