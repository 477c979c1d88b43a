// libs/schedule-cell/src/services/availability.rs
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{ScheduleDay, ScheduleDayWithOffers, ScheduleError, TimeOffer};

/// Read side of the availability store: what days a practitioner offers and
/// which time offers are still free. Writes only ever happen through the
/// generator and the reservation engines.
pub struct AvailabilityService {
    supabase: SupabaseClient,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_schedule_days(
        &self,
        practitioner_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        auth_token: &str,
    ) -> Result<Vec<ScheduleDay>, ScheduleError> {
        let mut path = format!(
            "/rest/v1/schedule_days?practitioner_id=eq.{}",
            practitioner_id
        );
        if let Some(from) = from {
            path.push_str(&format!("&date=gte.{}", from));
        }
        if let Some(to) = to {
            path.push_str(&format!("&date=lte.{}", to));
        }
        path.push_str("&order=date.asc");

        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        result.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ScheduleDay>, _>>()
            .map_err(|e| ScheduleError::DatabaseError(format!("Failed to parse schedule days: {}", e)))
    }

    /// The schedule day for `(practitioner, date)` together with its offers,
    /// ordered by time.
    pub async fn get_day_offers(
        &self,
        practitioner_id: Uuid,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<ScheduleDayWithOffers, ScheduleError> {
        debug!("Fetching offers for practitioner {} on {}", practitioner_id, date);

        let day_path = format!(
            "/rest/v1/schedule_days?practitioner_id=eq.{}&date=eq.{}",
            practitioner_id, date
        );
        let days: Vec<Value> = self.supabase.request(
            Method::GET,
            &day_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        if days.is_empty() {
            return Err(ScheduleError::ScheduleNotFound);
        }

        let day: ScheduleDay = serde_json::from_value(days[0].clone())
            .map_err(|e| ScheduleError::DatabaseError(format!("Failed to parse schedule day: {}", e)))?;

        let offers_path = format!(
            "/rest/v1/time_offers?schedule_day_id=eq.{}&order=time.asc",
            day.id
        );
        let offers_raw: Vec<Value> = self.supabase.request(
            Method::GET,
            &offers_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        let offers = offers_raw.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<TimeOffer>, _>>()
            .map_err(|e| ScheduleError::DatabaseError(format!("Failed to parse time offers: {}", e)))?;

        Ok(ScheduleDayWithOffers { day, offers })
    }
}
