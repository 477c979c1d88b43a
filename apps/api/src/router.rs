use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use practitioner_cell::router::{practitioner_routes, department_routes, vacation_routes};
use reservation_cell::router::reservation_routes;
use schedule_cell::router::schedule_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital administration API is running!" }))
        .nest("/practitioners", practitioner_routes(state.clone()))
        .nest("/departments", department_routes(state.clone()))
        .nest("/vacations", vacation_routes(state.clone()))
        .nest("/schedules", schedule_routes(state.clone()))
        .nest("/reservations", reservation_routes(state.clone()))
}
