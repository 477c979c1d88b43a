// libs/reservation-cell/src/handlers.rs
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

use crate::models::{BookReservationRequest, ReservationError};
use crate::services::booking::BookingService;
use crate::services::cancellation::CancellationService;
use crate::services::query::ReservationQueryService;

fn map_reservation_error(e: ReservationError) -> AppError {
    match e {
        ReservationError::PractitionerNotFound => {
            AppError::BadRequest("Unknown practitioner".to_string())
        },
        ReservationError::DepartmentNotFound => {
            AppError::BadRequest("Unknown department".to_string())
        },
        ReservationError::PractitionerOnVacation => {
            AppError::Conflict("Practitioner is on vacation on the requested date".to_string())
        },
        ReservationError::ScheduleNotFound => {
            AppError::NotFound("No schedule for this date".to_string())
        },
        ReservationError::TimeNotOffered => {
            AppError::NotFound("Time not offered".to_string())
        },
        ReservationError::SlotAlreadyBooked => {
            AppError::Conflict("Slot already booked".to_string())
        },
        ReservationError::NotFound => {
            AppError::NotFound("Reservation not found".to_string())
        },
        ReservationError::Consistency(msg) => AppError::Internal(msg),
        ReservationError::DatabaseError(msg) => AppError::Database(msg),
    }
}

/// Book an appointment slot. The patient identity is always the
/// authenticated caller; the request never names another patient.
#[axum::debug_handler]
pub async fn book_reservation(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookReservationRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let detail = booking_service.book(request, &user.id, auth.token()).await
        .map_err(map_reservation_error)?;

    Ok(Json(json!({
        "success": true,
        "reservation": detail,
        "message": "Reservation booked successfully"
    })))
}

#[axum::debug_handler]
pub async fn cancel_reservation(
    State(state): State<Arc<AppConfig>>,
    Path(reservation_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    // Only the owning patient or an administrator may cancel.
    let query_service = ReservationQueryService::new(&state);
    let reservation = query_service.get_reservation(reservation_id, token).await
        .map_err(map_reservation_error)?;

    if reservation.patient_id != user.id && !user.is_admin() {
        return Err(AppError::Auth("Not authorized to cancel this reservation".to_string()));
    }

    let cancellation_service = CancellationService::new(&state);
    let cancelled = cancellation_service.cancel(reservation_id, token).await
        .map_err(map_reservation_error)?;

    Ok(Json(json!({
        "success": true,
        "reservation": cancelled,
        "message": "Reservation cancelled"
    })))
}

#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Auth("Administrator role required".to_string()));
    }

    let query_service = ReservationQueryService::new(&state);
    let reservations = query_service.list_all(auth.token()).await
        .map_err(map_reservation_error)?;

    Ok(Json(json!({ "reservations": reservations })))
}

#[axum::debug_handler]
pub async fn list_patient_reservations(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if patient_id != user.id && !user.is_admin() {
        return Err(AppError::Auth("Not authorized to view these reservations".to_string()));
    }

    let query_service = ReservationQueryService::new(&state);
    let reservations = query_service.list_for_patient(&patient_id, auth.token()).await
        .map_err(map_reservation_error)?;

    Ok(Json(json!({ "reservations": reservations })))
}

#[axum::debug_handler]
pub async fn get_reservation_detail(
    State(state): State<Arc<AppConfig>>,
    Path(reservation_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let query_service = ReservationQueryService::new(&state);
    let detail = query_service.get_detail(reservation_id, auth.token()).await
        .map_err(map_reservation_error)?;

    if detail.patient_id != user.id && !user.is_admin() {
        return Err(AppError::Auth("Not authorized to view this reservation".to_string()));
    }

    Ok(Json(json!(detail)))
}
