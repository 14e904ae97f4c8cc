mod common;

use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{config_for, failing_server, mount_completion, mount_qloo_search, place};
use tastetrip_api::models::itinerary::SECTION_NAMES;
use tastetrip_api::models::preferences::{TripRequest, UserPreferences};
use tastetrip_api::services::completion::TogetherClient;
use tastetrip_api::services::itinerary_content::{ContentInput, ItineraryContentGenerator};
use tastetrip_api::services::recommendation::{Recommender, DEFAULT_CITY};
use tastetrip_api::services::taste_graph::QlooClient;
use tastetrip_api::services::trip_planner::TripPlanner;

fn preferences(music: &str, movie: &str, food: &str, vibe: &str, days: u32) -> UserPreferences {
    UserPreferences {
        music: music.to_string(),
        movie: movie.to_string(),
        food: food.to_string(),
        vibe: vibe.to_string(),
        days,
        departure_city: String::new(),
        start_date: None,
        end_date: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[actix_rt::test]
async fn test_unresolvable_taste_graph_results_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"name": "Miles Davis"}, {"name": "Osteria Francescana"}]
        })))
        .mount(&server)
        .await;

    let graph = Arc::new(QlooClient::new(&config_for(&server)).unwrap());
    let recommender = Recommender::new(graph);
    let rec = recommender
        .recommend(&preferences("jazz", "", "Italian", "cultural", 5))
        .await;

    assert!(!rec.qloo_powered);
    assert!(rec.is_fallback);
    assert!(rec.confidence == 1 || rec.confidence == 2);
    assert!(rec.venues.len() <= 20);
    assert!(["Rome", DEFAULT_CITY].contains(&rec.city.as_str()));
}

#[actix_rt::test]
async fn test_empty_preferences_without_keys() {
    let config = tastetrip_api::config::AppConfig::default();
    let graph = Arc::new(QlooClient::new(&config).unwrap());
    let rec = Recommender::new(graph)
        .recommend(&preferences("", "", "", "", 1))
        .await;

    assert!(!rec.qloo_powered);
    assert_eq!(rec.city, "Paris");
    assert!(rec.confidence <= 2);
    assert!(rec.venues.len() <= 4);
}

#[actix_rt::test]
async fn test_completion_failure_fills_every_section_with_the_same_error() {
    let server = failing_server(500).await;
    let generator =
        ItineraryContentGenerator::new(Arc::new(TogetherClient::new(&config_for(&server))));

    let rec = Recommender::new(Arc::new(
        QlooClient::new(&tastetrip_api::config::AppConfig::default()).unwrap(),
    ))
    .recommend(&preferences("", "", "sushi", "", 2))
    .await;
    let input = ContentInput {
        recommendation: &rec,
        start_date: None,
        end_date: None,
        weather: &[],
    };
    let sections = generator.generate(&input).await;

    let expected = "Error: Request failed with status 500: upstream exploded";
    let value = serde_json::to_value(&sections).unwrap();
    for name in SECTION_NAMES {
        assert_eq!(value[name], expected, "section {}", name);
    }
}

#[actix_rt::test]
async fn test_plan_when_every_upstream_fails() {
    let server = failing_server(500).await;
    let planner = TripPlanner::new(&config_for(&server)).unwrap();
    let request = TripRequest {
        trip_description: "Beatles, Kubrick and Indian curry".to_string(),
        start_date: "2025-03-10".to_string(),
        end_date: "2025-03-14".to_string(),
        departure_city: "Lagos".to_string(),
    };

    let plan = planner.plan(&request, date(2025, 3, 8)).await;

    assert_eq!(plan.preferences.music, "beatles");
    assert_eq!(plan.preferences.movie, "kubrick");
    assert_eq!(plan.preferences.food, "indian");
    assert_eq!(plan.preferences.days, 3);
    assert_eq!(plan.recommendation.city, "London");
    assert_eq!(plan.recommendation.confidence, 2);
    assert!(plan.recommendation.venues.len() <= 12);
    assert_eq!(plan.weather.len(), 6);
    assert!(plan.weather.iter().all(|day| day.desc == "N/A"));
    assert_eq!(plan.image_url, "/static/images/logo.png");
    let raw = plan.sections.raw_sections();
    assert!(raw.iter().all(|s| s.map_or(false, |t| t.starts_with("Error: "))));
    assert!(raw.iter().all(|s| *s == raw[0]));
}

#[actix_rt::test]
async fn test_plan_with_taste_graph_match() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        "Extract travel preferences",
        r#"{"music": "reggae", "movie": "", "food": "jerk chicken", "vibe": "relaxing"}"#,
    )
    .await;
    mount_completion(
        &server,
        "travel plan for Kingston",
        "Here is your plan:\n{\"tips\": [\"Try ackee\"], \"closing\": \"Irie!\", \"itinerary\": [{\"morning\": \"Bob Marley Museum\", \"evening\": \"Port Royal sunset\"}]}",
    )
    .await;
    mount_qloo_search(
        &server,
        "reggae",
        json!([{
            "name": "Bob Marley & The Wailers",
            "properties": {"geocode": {"city": "Kingston", "country": "Jamaica"}}
        }]),
    )
    .await;
    mount_qloo_search(
        &server,
        "Kingston attractions",
        json!([
            place("Bob Marley Museum", "Kingston", "Jamaica"),
            place("Port Royal", "Kingston", "Jamaica"),
            place("Dunn's River Falls", "Ocho Rios", "Jamaica")
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .and(query_param("query", "Kingston"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urls": {"regular": "https://images.example/kingston.jpg"}
        })))
        .mount(&server)
        .await;

    let planner = TripPlanner::new(&config_for(&server)).unwrap();
    let request = TripRequest {
        trip_description: "Reggae and jerk chicken, something relaxing".to_string(),
        start_date: "2025-12-01".to_string(),
        end_date: "2025-12-04".to_string(),
        departure_city: "Toronto".to_string(),
    };
    let plan = planner.plan(&request, date(2025, 6, 1)).await;

    let rec = &plan.recommendation;
    assert_eq!(rec.city, "Kingston");
    assert_eq!(rec.country.as_deref(), Some("Jamaica"));
    assert_eq!(rec.confidence, 5);
    assert!(rec.qloo_powered);
    assert_eq!(rec.venues, vec!["Bob Marley Museum", "Port Royal"]);
    assert!(rec.reason.contains("relaxing travel vibe"));
    assert!(rec.reason.contains("peaceful and serene"));

    assert!(plan.weather.is_empty());
    assert_eq!(plan.image_url, "https://images.example/kingston.jpg");
    assert_eq!(plan.places.len(), 2);
    assert_eq!(
        plan.places[1].maps_link,
        "https://www.google.com/maps/search/?api=1&query=Port+Royal+Kingston"
    );

    let itinerary = plan.sections.itinerary.parsed().unwrap();
    assert_eq!(itinerary["Day 1"].morning.as_deref(), Some("Bob Marley Museum"));
    assert!(itinerary["Day 1"].afternoon.is_none());
    assert_eq!(
        plan.sections.tips.parsed(),
        Some(&vec!["Try ackee".to_string()])
    );
    assert_eq!(plan.summary, "You love reggae music, movies like various genres, and delicious jerk chicken food.");
}
