// libs/schedule-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{NaiveDate, NaiveTime};

// ==============================================================================
// AVAILABILITY STORE MODELS
// ==============================================================================

/// One practitioner's bookable day. The store enforces uniqueness on
/// `(practitioner_id, date)`; the generator skips days that already exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub date: NaiveDate,
}

/// A single bookable clock-time slot within a schedule day. `is_reserved`
/// is flipped inside the same store transaction as the reservation write,
/// never on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffer {
    pub id: Uuid,
    pub schedule_day_id: Uuid,
    pub time: NaiveTime,
    pub is_reserved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDayWithOffers {
    pub day: ScheduleDay,
    pub offers: Vec<TimeOffer>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    /// Defaults to today.
    pub window_start: Option<NaiveDate>,
    /// Defaults to 30 days.
    pub window_days: Option<u32>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ScheduleError {
    #[error("Practitioner not found")]
    PractitionerNotFound,

    #[error("No schedule for this date")]
    ScheduleNotFound,

    #[error("Invalid generation window: {0}")]
    InvalidWindow(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
