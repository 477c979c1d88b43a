use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use reservation_cell::models::{ReservationError, ReservationStatus};
use reservation_cell::services::cancellation::CancellationService;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, MockHospitalResponses};

fn config_for(mock_server: &MockServer) -> AppConfig {
    TestConfig::with_supabase_url(&mock_server.uri()).to_app_config()
}

fn reservation_row(reservation_id: Uuid, time_offer_id: Uuid, status: &str) -> serde_json::Value {
    MockHospitalResponses::reservation_response(
        &reservation_id.to_string(),
        &Uuid::new_v4().to_string(),
        &Uuid::new_v4().to_string(),
        "alice",
        &time_offer_id.to_string(),
        "2025-06-02",
        "10:00:00",
        status,
    )
}

#[tokio::test]
async fn cancel_booked_reservation_succeeds() {
    let mock_server = MockServer::start().await;
    let reservation_id = Uuid::new_v4();
    let time_offer_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .and(query_param("id", format!("eq.{}", reservation_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_row(reservation_id, time_offer_id, "booked")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_offers"))
        .and(query_param("id", format!("eq.{}", time_offer_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::time_offer_response(
                &time_offer_id.to_string(),
                &Uuid::new_v4().to_string(),
                "10:00:00",
                true)
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/cancel_reservation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_row(reservation_id, time_offer_id, "cancelled")
        ])))
        .mount(&mock_server)
        .await;

    let service = CancellationService::new(&config_for(&mock_server));
    let cancelled = service
        .cancel(reservation_id, "token")
        .await
        .expect("cancellation should succeed");

    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.id, reservation_id);
}

#[tokio::test]
async fn cancelling_a_cancelled_reservation_is_a_no_op() {
    let mock_server = MockServer::start().await;
    let reservation_id = Uuid::new_v4();
    let time_offer_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_row(reservation_id, time_offer_id, "cancelled")
        ])))
        .mount(&mock_server)
        .await;

    // Nothing is written when the reservation is already cancelled.
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/cancel_reservation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = CancellationService::new(&config_for(&mock_server));
    let reservation = service
        .cancel(reservation_id, "token")
        .await
        .expect("idempotent cancel should succeed");

    assert_eq!(reservation.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn cancelling_unknown_reservation_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = CancellationService::new(&config_for(&mock_server));
    let result = service.cancel(Uuid::new_v4(), "token").await;

    assert_matches!(result, Err(ReservationError::NotFound));
}

#[tokio::test]
async fn dangling_time_offer_is_a_consistency_error() {
    let mock_server = MockServer::start().await;
    let reservation_id = Uuid::new_v4();
    let time_offer_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_row(reservation_id, time_offer_id, "booked")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_offers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = CancellationService::new(&config_for(&mock_server));
    let result = service.cancel(reservation_id, "token").await;

    assert_matches!(result, Err(ReservationError::Consistency(_)));
}

#[tokio::test]
async fn cancellation_updating_no_rows_is_a_consistency_error() {
    let mock_server = MockServer::start().await;
    let reservation_id = Uuid::new_v4();
    let time_offer_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_row(reservation_id, time_offer_id, "booked")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_offers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::time_offer_response(
                &time_offer_id.to_string(),
                &Uuid::new_v4().to_string(),
                "10:00:00",
                true)
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/cancel_reservation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = CancellationService::new(&config_for(&mock_server));
    let result = service.cancel(reservation_id, "token").await;

    assert_matches!(result, Err(ReservationError::Consistency(_)));
}
