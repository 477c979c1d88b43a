// libs/practitioner-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc, NaiveDate};

// ==============================================================================
// DIRECTORY MODELS
// ==============================================================================

/// A medical staff member that can be booked through the reservation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable reference data; reservations record the department they belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
}

/// Date range during which a practitioner is unavailable for booking.
/// Both endpoints are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationPeriod {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePractitionerRequest {
    pub name: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePractitionerRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVacationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("Practitioner not found")]
    PractitionerNotFound,

    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Vacation period not found")]
    VacationNotFound,

    #[error("Practitioner has active reservations")]
    HasActiveReservations,

    #[error("Invalid vacation period: {0}")]
    InvalidPeriod(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
