#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use serde_json::{json, Value};
use wiremock::matchers::{any, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tastetrip_api::config::AppConfig;
use tastetrip_api::routes;
use tastetrip_api::services::trip_planner::TripPlanner;

pub const QLOO_KEY: &str = "qloo-test-key";
pub const TOGETHER_KEY: &str = "together-test-key";
pub const WEATHER_KEY: &str = "weather-test-key";
pub const UNSPLASH_KEY: &str = "unsplash-test-key";

pub struct TestApp {
    pub config: web::Data<AppConfig>,
    pub planner: web::Data<TripPlanner>,
}

impl TestApp {
    pub fn new(config: AppConfig) -> Self {
        let planner = TripPlanner::new(&config).expect("planner should build");
        Self {
            config: web::Data::new(config),
            planner: web::Data::new(planner),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(self.config.clone())
            .app_data(self.planner.clone())
            .configure(routes::configure)
    }
}

/// Every upstream pointed at `server`, with all keys set.
pub fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        qloo_api_key: Some(QLOO_KEY.to_string()),
        qloo_base_url: server.uri(),
        together_api_key: Some(TOGETHER_KEY.to_string()),
        together_base_url: server.uri(),
        openweather_api_key: Some(WEATHER_KEY.to_string()),
        openweather_base_url: server.uri(),
        unsplash_access_key: Some(UNSPLASH_KEY.to_string()),
        unsplash_base_url: server.uri(),
        ..AppConfig::default()
    }
}

/// A mock server that answers every request with the given status.
pub async fn failing_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream exploded"))
        .mount(&server)
        .await;
    server
}

pub fn chat_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

pub async fn mount_qloo_search(server: &MockServer, query: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// Answer completion requests whose prompt contains `marker`.
pub async fn mount_completion(server: &MockServer, marker: &str, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content)))
        .mount(server)
        .await;
}

pub fn place(name: &str, city: &str, country: &str) -> Value {
    json!({
        "name": name,
        "type": "urn:entity:place",
        "location": {"city": city, "country": country}
    })
}
