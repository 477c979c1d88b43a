// libs/reservation-cell/src/services/cancellation.rs
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Reservation, ReservationError, ReservationStatus};

/// Cancellation engine: the exact reverse of booking. The reserved flag reset
/// and the status transition commit together or not at all.
pub struct CancellationService {
    supabase: SupabaseClient,
}

impl CancellationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Cancel a reservation. Cancelling an already-cancelled reservation is a
    /// no-op success.
    pub async fn cancel(
        &self,
        reservation_id: Uuid,
        auth_token: &str,
    ) -> Result<Reservation, ReservationError> {
        debug!("Cancelling reservation: {}", reservation_id);

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

        let reservation: Reservation = serde_json::from_value(row)
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse reservation: {}", e)))?;

        if reservation.status == ReservationStatus::Cancelled {
            info!("Reservation {} already cancelled, nothing to do", reservation_id);
            return Ok(reservation);
        }

        // The booked slot must still exist; a dangling time_offer_id means the
        // store lost an invariant, not that the caller asked for something
        // missing.
        let offer_path = format!("/rest/v1/time_offers?id=eq.{}", reservation.time_offer_id);
        let offers: Vec<Value> = self.supabase.request(
            Method::GET,
            &offer_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        if offers.is_empty() {
            return Err(ReservationError::Consistency(format!(
                "Reservation {} references missing time offer {}",
                reservation_id, reservation.time_offer_id
            )));
        }

        // One transaction: is_reserved back to false, status to cancelled.
        let updated: Vec<Value> = self.supabase.rpc(
            "cancel_reservation",
            Some(auth_token),
            json!({ "reservation_id": reservation_id }),
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let Some(updated_row) = updated.into_iter().next() else {
            return Err(ReservationError::Consistency(format!(
                "Cancellation of reservation {} updated no rows",
                reservation_id
            )));
        };

        let cancelled: Reservation = serde_json::from_value(updated_row)
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse cancelled reservation: {}", e)))?;

        info!("Reservation {} cancelled", reservation_id);
        Ok(cancelled)
    }
}
