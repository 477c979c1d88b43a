// libs/practitioner-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State, Extension},
    Json,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    CreatePractitionerRequest, UpdatePractitionerRequest, CreateVacationRequest,
    DirectoryError,
};
use crate::services::directory::DirectoryService;
use crate::services::vacation::VacationService;

fn map_directory_error(e: DirectoryError) -> AppError {
    match e {
        DirectoryError::PractitionerNotFound => {
            AppError::NotFound("Practitioner not found".to_string())
        },
        DirectoryError::DepartmentNotFound => {
            AppError::NotFound("Department not found".to_string())
        },
        DirectoryError::VacationNotFound => {
            AppError::NotFound("Vacation period not found".to_string())
        },
        DirectoryError::HasActiveReservations => {
            AppError::Conflict("Practitioner still has booked reservations".to_string())
        },
        DirectoryError::InvalidPeriod(msg) => AppError::BadRequest(msg),
        DirectoryError::DatabaseError(msg) => AppError::Database(msg),
    }
}

fn require_admin(user: &User) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Auth("Administrator role required".to_string()));
    }
    Ok(())
}

// ==============================================================================
// PRACTITIONER HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_practitioner(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreatePractitionerRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = DirectoryService::new(&state);
    let practitioner = service.create_practitioner(request, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({
        "success": true,
        "practitioner": practitioner
    })))
}

#[axum::debug_handler]
pub async fn get_practitioner(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DirectoryService::new(&state);
    let practitioner = service.get_practitioner(practitioner_id, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!(practitioner)))
}

#[axum::debug_handler]
pub async fn list_practitioners(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DirectoryService::new(&state);
    let practitioners = service.list_practitioners(auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({ "practitioners": practitioners })))
}

#[axum::debug_handler]
pub async fn update_practitioner(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdatePractitionerRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = DirectoryService::new(&state);
    let practitioner = service.update_practitioner(practitioner_id, request, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({
        "success": true,
        "practitioner": practitioner
    })))
}

#[axum::debug_handler]
pub async fn delete_practitioner(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = DirectoryService::new(&state);
    service.delete_practitioner(practitioner_id, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Practitioner deleted"
    })))
}

#[axum::debug_handler]
pub async fn get_department(
    State(state): State<Arc<AppConfig>>,
    Path(department_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DirectoryService::new(&state);
    let department = service.get_department(department_id, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!(department)))
}

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DirectoryService::new(&state);
    let departments = service.list_departments(auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({ "departments": departments })))
}

// ==============================================================================
// VACATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_vacation(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateVacationRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = VacationService::new(&state);
    let vacation = service.create_vacation(practitioner_id, request, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({
        "success": true,
        "vacation": vacation
    })))
}

#[axum::debug_handler]
pub async fn list_vacations(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = VacationService::new(&state);
    let vacations = service.list_vacations(practitioner_id, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({ "vacations": vacations })))
}

#[axum::debug_handler]
pub async fn delete_vacation(
    State(state): State<Arc<AppConfig>>,
    Path(vacation_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let service = VacationService::new(&state);
    service.delete_vacation(vacation_id, auth.token()).await
        .map_err(map_directory_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Vacation period deleted"
    })))
}
