// libs/schedule-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State, Extension},
    Json,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde::Deserialize;
use serde_json::{json, Value};
use chrono::NaiveDate;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{GenerateScheduleRequest, ScheduleError};
use crate::services::availability::AvailabilityService;
use crate::services::generator::ScheduleGeneratorService;

#[derive(Debug, Deserialize)]
pub struct ScheduleDaysQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn map_schedule_error(e: ScheduleError) -> AppError {
    match e {
        ScheduleError::PractitionerNotFound => {
            AppError::BadRequest("Unknown practitioner".to_string())
        },
        ScheduleError::ScheduleNotFound => {
            AppError::NotFound("No schedule for this date".to_string())
        },
        ScheduleError::InvalidWindow(msg) => AppError::BadRequest(msg),
        ScheduleError::DatabaseError(msg) => AppError::Database(msg),
    }
}

/// Generate a practitioner's schedule for a rolling window. Admin only.
#[axum::debug_handler]
pub async fn generate_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<GenerateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Auth("Administrator role required".to_string()));
    }

    let service = ScheduleGeneratorService::new(&state);
    let days_created = service.generate(practitioner_id, request, auth.token()).await
        .map_err(map_schedule_error)?;

    Ok(Json(json!({
        "success": true,
        "practitioner_id": practitioner_id,
        "days_created": days_created
    })))
}

#[axum::debug_handler]
pub async fn list_schedule_days(
    State(state): State<Arc<AppConfig>>,
    Path(practitioner_id): Path<Uuid>,
    Query(query): Query<ScheduleDaysQuery>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);
    let days = service
        .list_schedule_days(practitioner_id, query.from, query.to, auth.token())
        .await
        .map_err(map_schedule_error)?;

    Ok(Json(json!({ "schedule_days": days })))
}

#[axum::debug_handler]
pub async fn get_day_offers(
    State(state): State<Arc<AppConfig>>,
    Path((practitioner_id, date)): Path<(Uuid, NaiveDate)>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);
    let day = service.get_day_offers(practitioner_id, date, auth.token()).await
        .map_err(map_schedule_error)?;

    Ok(Json(json!(day)))
}
