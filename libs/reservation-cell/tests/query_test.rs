use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use reservation_cell::models::ReservationError;
use reservation_cell::services::query::ReservationQueryService;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, MockHospitalResponses};

fn config_for(mock_server: &MockServer) -> AppConfig {
    TestConfig::with_supabase_url(&mock_server.uri()).to_app_config()
}

#[tokio::test]
async fn listing_with_no_reservations_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = ReservationQueryService::new(&config_for(&mock_server));
    let reservations = service.list_all("token").await.expect("list should succeed");

    assert!(reservations.is_empty());
}

#[tokio::test]
async fn patient_listing_filters_by_patient() {
    let mock_server = MockServer::start().await;
    let reservation_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .and(query_param("patient_id", "eq.alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::reservation_response(
                &reservation_id.to_string(),
                &Uuid::new_v4().to_string(),
                &Uuid::new_v4().to_string(),
                "alice",
                &Uuid::new_v4().to_string(),
                "2025-06-02",
                "10:00:00",
                "booked")
        ])))
        .mount(&mock_server)
        .await;

    let service = ReservationQueryService::new(&config_for(&mock_server));
    let reservations = service
        .list_for_patient("alice", "token")
        .await
        .expect("list should succeed");

    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].id, reservation_id);
    assert_eq!(reservations[0].patient_id, "alice");
}

#[tokio::test]
async fn detail_resolves_display_names() {
    let mock_server = MockServer::start().await;
    let reservation_id = Uuid::new_v4();
    let practitioner_id = Uuid::new_v4();
    let department_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::reservation_response(
                &reservation_id.to_string(),
                &practitioner_id.to_string(),
                &department_id.to_string(),
                "alice",
                &Uuid::new_v4().to_string(),
                "2025-06-02",
                "10:00:00",
                "booked")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/practitioners"))
        .and(query_param("select", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Dr. Han" }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/departments"))
        .and(query_param("select", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Neurology" }
        ])))
        .mount(&mock_server)
        .await;

    let service = ReservationQueryService::new(&config_for(&mock_server));
    let detail = service
        .get_detail(reservation_id, "token")
        .await
        .expect("detail should succeed");

    assert_eq!(detail.practitioner_name, "Dr. Han");
    assert_eq!(detail.department_name, "Neurology");
    assert_eq!(detail.patient_id, "alice");
}

#[tokio::test]
async fn unknown_reservation_detail_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = ReservationQueryService::new(&config_for(&mock_server));
    let result = service.get_detail(Uuid::new_v4(), "token").await;

    assert_matches!(result, Err(ReservationError::NotFound));
}
