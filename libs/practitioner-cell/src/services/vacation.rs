// libs/practitioner-cell/src/services/vacation.rs
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{VacationPeriod, CreateVacationRequest, DirectoryError};

/// Vacation-period bookkeeping. The booking engine consults `is_on_vacation`
/// before it will hand out a slot.
pub struct VacationService {
    supabase: SupabaseClient,
}

impl VacationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn create_vacation(
        &self,
        practitioner_id: Uuid,
        request: CreateVacationRequest,
        auth_token: &str,
    ) -> Result<VacationPeriod, DirectoryError> {
        debug!("Creating vacation for practitioner {} from {} to {}",
               practitioner_id, request.start_date, request.end_date);

        if request.start_date > request.end_date {
            return Err(DirectoryError::InvalidPeriod(
                "Start date must not be after end date".to_string()
            ));
        }

        // Referenced practitioner must exist.
        let practitioner_path = format!("/rest/v1/practitioners?id=eq.{}", practitioner_id);
        let practitioner: Vec<Value> = self.supabase.request(
            Method::GET,
            &practitioner_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if practitioner.is_empty() {
            return Err(DirectoryError::PractitionerNotFound);
        }

        let vacation_data = json!({
            "practitioner_id": practitioner_id,
            "start_date": request.start_date,
            "end_date": request.end_date,
            "reason": request.reason
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/vacation_periods",
            Some(auth_token),
            Some(vacation_data),
            Some(headers),
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DirectoryError::DatabaseError("Failed to create vacation period".to_string()));
        }

        let vacation: VacationPeriod = serde_json::from_value(result[0].clone())
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse vacation period: {}", e)))?;

        info!("Vacation period {} created for practitioner {}", vacation.id, practitioner_id);
        Ok(vacation)
    }

    pub async fn list_vacations(
        &self,
        practitioner_id: Uuid,
        auth_token: &str,
    ) -> Result<Vec<VacationPeriod>, DirectoryError> {
        let path = format!(
            "/rest/v1/vacation_periods?practitioner_id=eq.{}&order=start_date.asc",
            practitioner_id
        );
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        result.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<VacationPeriod>, _>>()
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse vacation periods: {}", e)))
    }

    pub async fn delete_vacation(
        &self,
        vacation_id: Uuid,
        auth_token: &str,
    ) -> Result<(), DirectoryError> {
        let lookup_path = format!("/rest/v1/vacation_periods?id=eq.{}", vacation_id);
        let existing: Vec<Value> = self.supabase.request(
            Method::GET,
            &lookup_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if existing.is_empty() {
            return Err(DirectoryError::VacationNotFound);
        }

        let _: Vec<Value> = self.supabase.request(
            Method::DELETE,
            &lookup_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        info!("Vacation period deleted: {}", vacation_id);
        Ok(())
    }

    /// True when `date` falls inside any vacation period of the practitioner.
    pub async fn is_on_vacation(
        &self,
        practitioner_id: Uuid,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<bool, DirectoryError> {
        let path = format!(
            "/rest/v1/vacation_periods?practitioner_id=eq.{}&start_date=lte.{}&end_date=gte.{}&limit=1",
            practitioner_id, date, date
        );
        let overlapping: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        Ok(!overlapping.is_empty())
    }
}
