// libs/reservation-cell/src/services/query.rs
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Reservation, ReservationDetail, ReservationError};

/// Read-only lookups over reservations. List queries return empty sequences,
/// never errors, when nothing matches.
pub struct ReservationQueryService {
    supabase: SupabaseClient,
}

impl ReservationQueryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_all(
        &self,
        auth_token: &str,
    ) -> Result<Vec<Reservation>, ReservationError> {
        self.list("/rest/v1/reservations?order=created_at.desc", auth_token).await
    }

    pub async fn list_for_patient(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Reservation>, ReservationError> {
        let path = format!(
            "/rest/v1/reservations?patient_id=eq.{}&order=created_at.desc",
            patient_id
        );
        self.list(&path, auth_token).await
    }

    pub async fn get_reservation(
        &self,
        reservation_id: Uuid,
        auth_token: &str,
    ) -> Result<Reservation, ReservationError> {
        debug!("Fetching reservation: {}", reservation_id);

        let path = format!("/rest/v1/reservations?id=eq.{}", reservation_id);
        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let Some(row) = rows.into_iter().next() else {
            return Err(ReservationError::NotFound);
        };

        serde_json::from_value(row)
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse reservation: {}", e)))
    }

    /// One reservation with the practitioner and department names resolved
    /// for display.
    pub async fn get_detail(
        &self,
        reservation_id: Uuid,
        auth_token: &str,
    ) -> Result<ReservationDetail, ReservationError> {
        let reservation = self.get_reservation(reservation_id, auth_token).await?;

        let practitioner_name = self
            .lookup_name("practitioners", reservation.practitioner_id, auth_token)
            .await?;
        let department_name = self
            .lookup_name("departments", reservation.department_id, auth_token)
            .await?;

        Ok(ReservationDetail::from_parts(reservation, practitioner_name, department_name))
    }

    async fn list(
        &self,
        path: &str,
        auth_token: &str,
    ) -> Result<Vec<Reservation>, ReservationError> {
        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Reservation>, _>>()
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse reservations: {}", e)))
    }

    async fn lookup_name(
        &self,
        table: &str,
        id: Uuid,
        auth_token: &str,
    ) -> Result<String, ReservationError> {
        let path = format!("/rest/v1/{}?id=eq.{}&select=name", table, id);
        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        Ok(rows.first()
            .and_then(|row| row["name"].as_str())
            .unwrap_or("Unknown")
            .to_string())
    }
}
