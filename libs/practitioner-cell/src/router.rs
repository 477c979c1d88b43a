// libs/practitioner-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn practitioner_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/", post(handlers::create_practitioner))
        .route("/", get(handlers::list_practitioners))
        .route("/{practitioner_id}", get(handlers::get_practitioner))
        .route("/{practitioner_id}", put(handlers::update_practitioner))
        .route("/{practitioner_id}", delete(handlers::delete_practitioner))
        .route("/{practitioner_id}/vacations", post(handlers::create_vacation))
        .route("/{practitioner_id}/vacations", get(handlers::list_vacations))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}

pub fn department_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/", get(handlers::list_departments))
        .route("/{department_id}", get(handlers::get_department))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}

pub fn vacation_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/{vacation_id}", delete(handlers::delete_vacation))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
