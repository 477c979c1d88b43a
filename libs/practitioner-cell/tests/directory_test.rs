use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use practitioner_cell::models::{CreatePractitionerRequest, DirectoryError};
use practitioner_cell::services::directory::DirectoryService;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, MockHospitalResponses};

fn config_for(mock_server: &MockServer) -> AppConfig {
    TestConfig::with_supabase_url(&mock_server.uri()).to_app_config()
}

#[tokio::test]
async fn get_practitioner_parses_row() {
    let mock_server = MockServer::start().await;
    let practitioner_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/practitioners"))
        .and(query_param("id", format!("eq.{}", practitioner_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::practitioner_response(
                &practitioner_id.to_string(), "Dr. Han", "Neurology")
        ])))
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));
    let practitioner = service
        .get_practitioner(practitioner_id, "token")
        .await
        .expect("lookup should succeed");

    assert_eq!(practitioner.id, practitioner_id);
    assert_eq!(practitioner.name, "Dr. Han");
    assert_eq!(practitioner.specialty, "Neurology");
}

#[tokio::test]
async fn unknown_practitioner_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/practitioners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));
    let result = service.get_practitioner(Uuid::new_v4(), "token").await;

    assert_matches!(result, Err(DirectoryError::PractitionerNotFound));
}

#[tokio::test]
async fn create_practitioner_returns_representation() {
    let mock_server = MockServer::start().await;
    let practitioner_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/practitioners"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockHospitalResponses::practitioner_response(
                &practitioner_id.to_string(), "Dr. Sato", "Cardiology")
        ])))
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));
    let created = service
        .create_practitioner(
            CreatePractitionerRequest {
                name: "Dr. Sato".to_string(),
                specialty: "Cardiology".to_string(),
                phone: None,
                email: None,
            },
            "token",
        )
        .await
        .expect("creation should succeed");

    assert_eq!(created.id, practitioner_id);
    assert_eq!(created.name, "Dr. Sato");
}

#[tokio::test]
async fn deletion_is_blocked_by_booked_reservations() {
    let mock_server = MockServer::start().await;
    let practitioner_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/practitioners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::practitioner_response(
                &practitioner_id.to_string(), "Dr. Han", "Neurology")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .and(query_param("status", "eq.booked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::reservation_response(
                &Uuid::new_v4().to_string(),
                &practitioner_id.to_string(),
                &Uuid::new_v4().to_string(),
                "alice",
                &Uuid::new_v4().to_string(),
                "2025-06-02",
                "10:00:00",
                "booked")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/practitioners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));
    let result = service.delete_practitioner(practitioner_id, "token").await;

    assert_matches!(result, Err(DirectoryError::HasActiveReservations));
}

#[tokio::test]
async fn deletion_succeeds_without_booked_reservations() {
    let mock_server = MockServer::start().await;
    let practitioner_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/practitioners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::practitioner_response(
                &practitioner_id.to_string(), "Dr. Han", "Neurology")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/practitioners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));
    service
        .delete_practitioner(practitioner_id, "token")
        .await
        .expect("deletion should succeed");
}
