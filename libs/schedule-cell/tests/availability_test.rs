use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use schedule_cell::models::ScheduleError;
use schedule_cell::services::availability::AvailabilityService;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, MockHospitalResponses};

fn config_for(mock_server: &MockServer) -> AppConfig {
    TestConfig::with_supabase_url(&mock_server.uri()).to_app_config()
}

#[tokio::test]
async fn day_offers_come_back_ordered_with_reservation_state() {
    let mock_server = MockServer::start().await;
    let practitioner_id = Uuid::new_v4();
    let day_id = Uuid::new_v4();
    let date = "2025-06-02";

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedule_days"))
        .and(query_param("practitioner_id", format!("eq.{}", practitioner_id)))
        .and(query_param("date", format!("eq.{}", date)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::schedule_day_response(
                &day_id.to_string(), &practitioner_id.to_string(), date)
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/time_offers"))
        .and(query_param("schedule_day_id", format!("eq.{}", day_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::time_offer_response(
                &Uuid::new_v4().to_string(), &day_id.to_string(), "09:00:00", false),
            MockHospitalResponses::time_offer_response(
                &Uuid::new_v4().to_string(), &day_id.to_string(), "10:00:00", true),
        ])))
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&config_for(&mock_server));
    let day = service
        .get_day_offers(practitioner_id, date.parse().unwrap(), "token")
        .await
        .expect("day lookup should succeed");

    assert_eq!(day.day.id, day_id);
    assert_eq!(day.offers.len(), 2);
    assert!(!day.offers[0].is_reserved);
    assert!(day.offers[1].is_reserved);
}

#[tokio::test]
async fn missing_day_is_schedule_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedule_days"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&config_for(&mock_server));
    let result = service
        .get_day_offers(Uuid::new_v4(), "2025-06-02".parse().unwrap(), "token")
        .await;

    assert_matches!(result, Err(ScheduleError::ScheduleNotFound));
}

#[tokio::test]
async fn day_listing_applies_window_filters() {
    let mock_server = MockServer::start().await;
    let practitioner_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedule_days"))
        .and(query_param("date", "gte.2025-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockHospitalResponses::schedule_day_response(
                &Uuid::new_v4().to_string(), &practitioner_id.to_string(), "2025-06-02"),
            MockHospitalResponses::schedule_day_response(
                &Uuid::new_v4().to_string(), &practitioner_id.to_string(), "2025-06-03"),
        ])))
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&config_for(&mock_server));
    let days = service
        .list_schedule_days(
            practitioner_id,
            Some("2025-06-01".parse().unwrap()),
            None,
            "token",
        )
        .await
        .expect("listing should succeed");

    assert_eq!(days.len(), 2);
}
