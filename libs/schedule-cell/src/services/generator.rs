// libs/schedule-cell/src/services/generator.rs
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{GenerateScheduleRequest, ScheduleError};

/// Hourly marks offered on every generated day, 09:00 through 17:00 inclusive.
const FIRST_OFFER_HOUR: u32 = 9;
const LAST_OFFER_HOUR: u32 = 17;

const DEFAULT_WINDOW_DAYS: u32 = 30;
const MAX_WINDOW_DAYS: u32 = 365;

/// Populates the availability store with schedule days for a practitioner.
/// The batch is handed to the store as one RPC call so a failure midway never
/// leaves a partial schedule behind.
pub struct ScheduleGeneratorService {
    supabase: SupabaseClient,
}

/// Calendar dates to generate for: every day in
/// `[window_start, window_start + window_days]` that is not a Saturday or
/// Sunday. Both endpoints are inclusive.
pub fn plan_weekdays(window_start: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
    (0..=window_days as i64)
        .map(|offset| window_start + Duration::days(offset))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// The fixed set of time offers created for each schedule day.
pub fn daily_offer_times() -> Vec<NaiveTime> {
    (FIRST_OFFER_HOUR..=LAST_OFFER_HOUR)
        .map(|hour| NaiveTime::from_hms_opt(hour, 0, 0).expect("valid offer hour"))
        .collect()
}

impl ScheduleGeneratorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Generate schedule days (with their time offers) for the window and
    /// return the number of days actually created. Days whose
    /// `(practitioner, date)` pair already exists are skipped by the store.
    pub async fn generate(
        &self,
        practitioner_id: Uuid,
        request: GenerateScheduleRequest,
        auth_token: &str,
    ) -> Result<i64, ScheduleError> {
        let window_start = request.window_start.unwrap_or_else(|| Utc::now().date_naive());
        let window_days = request.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);

        if window_days > MAX_WINDOW_DAYS {
            return Err(ScheduleError::InvalidWindow(
                format!("Window cannot exceed {} days", MAX_WINDOW_DAYS)
            ));
        }

        debug!("Generating schedules for practitioner {} from {} over {} days",
               practitioner_id, window_start, window_days);

        // Caller-argument failure: nothing may be written for an unknown id.
        let practitioner_path = format!("/rest/v1/practitioners?id=eq.{}", practitioner_id);
        let practitioner: Vec<Value> = self.supabase.request(
            Method::GET,
            &practitioner_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        if practitioner.is_empty() {
            return Err(ScheduleError::PractitionerNotFound);
        }

        let times = daily_offer_times();
        let days: Vec<Value> = plan_weekdays(window_start, window_days)
            .into_iter()
            .map(|date| json!({ "date": date, "times": times }))
            .collect();

        if days.is_empty() {
            debug!("Window contains no weekdays, nothing to generate");
            return Ok(0);
        }

        // One transaction at the store: all days and offers, or none.
        let created: i64 = self.supabase.rpc(
            "generate_schedule_batch",
            Some(auth_token),
            json!({
                "practitioner_id": practitioner_id,
                "days": days
            }),
        ).await.map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        info!("Generated {} schedule days for practitioner {}", created, practitioner_id);
        Ok(created)
    }
}
