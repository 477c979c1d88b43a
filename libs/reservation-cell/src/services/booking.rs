// libs/reservation-cell/src/services/booking.rs
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use practitioner_cell::services::vacation::VacationService;
use schedule_cell::models::{ScheduleDay, TimeOffer};

use crate::models::{
    BookReservationRequest, Reservation, ReservationDetail, ReservationError,
};

/// Booking engine. Validates a request step by step against the directory and
/// the availability store, then commits the reserved-flag flip and the
/// reservation insert as one store transaction.
pub struct BookingService {
    supabase: SupabaseClient,
    vacation_service: VacationService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            vacation_service: VacationService::new(config),
        }
    }

    pub async fn book(
        &self,
        request: BookReservationRequest,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<ReservationDetail, ReservationError> {
        info!("Booking practitioner {} at {} {} for patient {}",
              request.practitioner_id, request.date, request.time, patient_id);

        // Referenced practitioner must exist; keep the row for the detail
        // projection.
        let practitioner_path = format!("/rest/v1/practitioners?id=eq.{}", request.practitioner_id);
        let practitioners: Vec<Value> = self.supabase.request(
            Method::GET,
            &practitioner_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let practitioner = practitioners.into_iter().next()
            .ok_or(ReservationError::PractitionerNotFound)?;

        let on_vacation = self.vacation_service
            .is_on_vacation(request.practitioner_id, request.date, auth_token)
            .await
            .map_err(|e| ReservationError::DatabaseError(e.to_string()))?;
        if on_vacation {
            return Err(ReservationError::PractitionerOnVacation);
        }

        let department_path = format!("/rest/v1/departments?id=eq.{}", request.department_id);
        let departments: Vec<Value> = self.supabase.request(
            Method::GET,
            &department_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let department = departments.into_iter().next()
            .ok_or(ReservationError::DepartmentNotFound)?;

        let day = self.find_schedule_day(&request, auth_token).await?;
        let offer = self.find_time_offer(&day, &request, auth_token).await?;

        // Fast pre-check; the authoritative check is the compare-and-set
        // inside the booking transaction below.
        if offer.is_reserved {
            return Err(ReservationError::SlotAlreadyBooked);
        }

        // The store flips is_reserved from false to true and inserts the
        // reservation in one transaction. An empty result means a concurrent
        // booking won the slot after our pre-check.
        let created: Vec<Value> = self.supabase.rpc(
            "book_reservation",
            Some(auth_token),
            json!({
                "time_offer_id": offer.id,
                "practitioner_id": request.practitioner_id,
                "department_id": request.department_id,
                "patient_id": patient_id,
                "date": request.date,
                "time": request.time.format("%H:%M:%S").to_string(),
                "symptom_description": request.symptom_description
            }),
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let Some(row) = created.into_iter().next() else {
            warn!("Lost booking race for time offer {}", offer.id);
            return Err(ReservationError::SlotAlreadyBooked);
        };

        let reservation: Reservation = serde_json::from_value(row)
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse created reservation: {}", e)))?;

        info!("Reservation {} booked for patient {}", reservation.id, patient_id);

        Ok(ReservationDetail::from_parts(
            reservation,
            practitioner["name"].as_str().unwrap_or("Unknown").to_string(),
            department["name"].as_str().unwrap_or("Unknown").to_string(),
        ))
    }

    async fn find_schedule_day(
        &self,
        request: &BookReservationRequest,
        auth_token: &str,
    ) -> Result<ScheduleDay, ReservationError> {
        let path = format!(
            "/rest/v1/schedule_days?practitioner_id=eq.{}&date=eq.{}",
            request.practitioner_id, request.date
        );
        let days: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let Some(day) = days.into_iter().next() else {
            debug!("No schedule for practitioner {} on {}", request.practitioner_id, request.date);
            return Err(ReservationError::ScheduleNotFound);
        };

        serde_json::from_value(day)
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse schedule day: {}", e)))
    }

    async fn find_time_offer(
        &self,
        day: &ScheduleDay,
        request: &BookReservationRequest,
        auth_token: &str,
    ) -> Result<TimeOffer, ReservationError> {
        let path = format!(
            "/rest/v1/time_offers?schedule_day_id=eq.{}&time=eq.{}",
            day.id,
            request.time.format("%H:%M:%S")
        );
        let offers: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ReservationError::DatabaseError(e.to_string()))?;

        let Some(offer) = offers.into_iter().next() else {
            debug!("Time {} not offered on schedule day {}", request.time, day.id);
            return Err(ReservationError::TimeNotOffered);
        };

        serde_json::from_value(offer)
            .map_err(|e| ReservationError::DatabaseError(format!("Failed to parse time offer: {}", e)))
    }
}
