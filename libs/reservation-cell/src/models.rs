// libs/reservation-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc, NaiveDate, NaiveTime};
use std::fmt;

// ==============================================================================
// CORE RESERVATION MODELS
// ==============================================================================

/// A patient's claim on one time offer. Soft state only: cancellation flips
/// the status, the row is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub department_id: Uuid,
    /// Opaque authenticated patient identity; the core never interprets it.
    pub patient_id: String,
    /// Owning reference to the booked slot. Cancellation resolves the slot
    /// through this id instead of re-deriving it from (practitioner, date,
    /// time), so schedule regeneration cannot detach a reservation.
    pub time_offer_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub symptom_description: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed lifecycle. The only valid transition is `Booked -> Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Booked,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Booked)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Booked => write!(f, "booked"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReservationRequest {
    pub practitioner_id: Uuid,
    pub department_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub symptom_description: String,
}

/// Reservation projection with the display names administration and patient
/// views render, so callers never join on their side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDetail {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub practitioner_name: String,
    pub department_id: Uuid,
    pub department_name: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub symptom_description: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl ReservationDetail {
    pub fn from_parts(
        reservation: Reservation,
        practitioner_name: String,
        department_name: String,
    ) -> Self {
        Self {
            id: reservation.id,
            practitioner_id: reservation.practitioner_id,
            practitioner_name,
            department_id: reservation.department_id,
            department_name,
            patient_id: reservation.patient_id,
            date: reservation.date,
            time: reservation.time,
            symptom_description: reservation.symptom_description,
            status: reservation.status,
            created_at: reservation.created_at,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReservationError {
    #[error("Practitioner not found")]
    PractitionerNotFound,

    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Practitioner is on vacation on the requested date")]
    PractitionerOnVacation,

    #[error("No schedule for this date")]
    ScheduleNotFound,

    #[error("Time not offered")]
    TimeNotOffered,

    #[error("Slot already booked")]
    SlotAlreadyBooked,

    #[error("Reservation not found")]
    NotFound,

    /// An invariant the store should uphold was violated. A defect, never a
    /// user error.
    #[error("Consistency error: {0}")]
    Consistency(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
