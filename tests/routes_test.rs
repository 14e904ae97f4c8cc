mod common;

use actix_web::{http::header, test};
use serde_json::{json, Value};
use wiremock::MockServer;

use common::{config_for, failing_server, mount_completion, TestApp};
use tastetrip_api::config::AppConfig;

#[actix_rt::test]
async fn test_health_reports_missing_credentials() {
    let test_app = TestApp::new(AppConfig {
        together_api_key: Some("key".to_string()),
        ..AppConfig::default()
    });
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(
        body["services"],
        json!({
            "qloo": "missing",
            "together": "configured",
            "openweather": "missing",
            "unsplash": "missing"
        })
    );
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_rt::test]
async fn test_health_ok_when_fully_configured() {
    let server = MockServer::start().await;
    let test_app = TestApp::new(config_for(&server));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn test_itinerary_is_always_ok() {
    let server = failing_server(502).await;
    let test_app = TestApp::new(config_for(&server));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(json!({
            "trip_description": "Tarantino films and tacos",
            "start_date": "2030-01-01",
            "end_date": "2030-01-05",
            "departure_city": "Nairobi"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["preferences"]["movie"], "tarantino");
    assert_eq!(body["preferences"]["days"], 3);
    assert_eq!(body["recommendation"]["city"], "Paris");
    assert_eq!(body["recommendation"]["qlooPowered"], false);
    assert_eq!(body["recommendation"]["isFallback"], true);
    assert_eq!(body["weather"], json!([]));
    assert_eq!(body["branding"]["name"], "Qloo");
    assert_eq!(body["user_prompt"], "Tarantino films and tacos");
    assert!(body["sections"]["closing"]
        .as_str()
        .unwrap()
        .starts_with("Error: Request failed with status 502"));
}

#[actix_rt::test]
async fn test_itinerary_accepts_empty_body_object() {
    let test_app = TestApp::new(AppConfig::default());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["preferences"]["days"], 3);
    assert_eq!(body["city_info"]["name"], "Paris");
    assert_eq!(
        body["sections"]["tips"],
        "Error: Together API key not configured"
    );
}

#[actix_rt::test]
async fn test_itinerary_rejects_malformed_json() {
    let test_app = TestApp::new(AppConfig::default());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itinerary")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_flight_estimate_route() {
    let server = MockServer::start().await;
    mount_completion(&server, "from Lagos to Lisbon", "Approximately $1,180").await;
    let test_app = TestApp::new(config_for(&server));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/flight-estimate")
        .set_json(json!({"departure": "Lagos", "destination": "Lisbon", "month": "May 2026"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({"price": "$1180 USD", "sites": ["Skyscanner", "Kayak", "Expedia"]})
    );
}

#[actix_rt::test]
async fn test_flight_estimate_defaults_and_failure() {
    let server = MockServer::start().await;
    // Only answers when the default route is used
    mount_completion(&server, "from Nairobi to Barcelona", "not sure").await;
    let test_app = TestApp::new(config_for(&server));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/flight-estimate")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["price"], "Contact travel agent for pricing");
    assert_eq!(body["sites"].as_array().map(|s| s.len()), Some(3));
}
