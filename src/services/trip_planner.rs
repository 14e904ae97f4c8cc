use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::models::preferences::{TripRequest, UserPreferences};
use crate::models::trip::{FlightEstimate, FlightEstimateRequest, TripPlan, QLOO_BRANDING};
use crate::services::city_info::{city_info, place_links, taste_summary};
use crate::services::completion::{TextCompletion, TogetherClient};
use crate::services::flight_estimate::FlightEstimator;
use crate::services::image_service::ImageService;
use crate::services::itinerary_content::{ContentInput, ItineraryContentGenerator};
use crate::services::preference_extractor::PreferenceExtractor;
use crate::services::recommendation::Recommender;
use crate::services::taste_graph::{QlooClient, TasteGraph};
use crate::services::weather_service::WeatherService;

const DEFAULT_DEPARTURE: &str = "Nairobi";
const DEFAULT_DESTINATION: &str = "Barcelona";

/// Runs a trip request through every stage: preferences, destination,
/// weather, generated content, photo and place links.
pub struct TripPlanner {
    extractor: PreferenceExtractor,
    recommender: Recommender,
    content: ItineraryContentGenerator,
    flights: FlightEstimator,
    weather: WeatherService,
    images: ImageService,
}

impl TripPlanner {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        let graph: Arc<dyn TasteGraph> = Arc::new(QlooClient::new(config)?);
        let completion: Arc<dyn TextCompletion> = Arc::new(TogetherClient::new(config));
        Ok(Self::with_clients(graph, completion, config))
    }

    /// Build around existing taste-graph and completion clients. Weather and
    /// image clients still come from `config`.
    pub fn with_clients(
        graph: Arc<dyn TasteGraph>,
        completion: Arc<dyn TextCompletion>,
        config: &AppConfig,
    ) -> Self {
        Self {
            extractor: PreferenceExtractor::new(completion.clone()),
            recommender: Recommender::new(graph),
            content: ItineraryContentGenerator::new(completion.clone()),
            flights: FlightEstimator::new(completion),
            weather: WeatherService::new(config),
            images: ImageService::new(config),
        }
    }

    /// Never fails; every upstream problem degrades to fallback content.
    pub async fn plan(&self, request: &TripRequest, today: NaiveDate) -> TripPlan {
        let extracted = self.extractor.extract(&request.trip_description).await;
        let preferences = UserPreferences::from_request(extracted, request);
        info!(
            "Planning {} activity days (music='{}', movie='{}', food='{}')",
            preferences.days, preferences.music, preferences.movie, preferences.food
        );

        let recommendation = self.recommender.recommend(&preferences).await;
        let city = recommendation.city.clone();

        let weather = self
            .weather
            .trip_weather(&city, preferences.start_date, today)
            .await;

        let input = ContentInput {
            recommendation: &recommendation,
            start_date: preferences.start_date,
            end_date: preferences.end_date,
            weather: &weather,
        };
        let (sections, image_url) =
            futures::join!(self.content.generate(&input), self.images.image_url(&city));

        let city_info = city_info(&city, &recommendation.venues);
        let places = place_links(&city_info.places, &city);
        let summary = taste_summary(&preferences);

        TripPlan {
            preferences,
            recommendation,
            summary,
            weather,
            sections,
            image_url,
            city_info,
            places,
            branding: QLOO_BRANDING,
            user_prompt: request.trip_description.clone(),
        }
    }

    pub async fn flight_estimate(&self, request: &FlightEstimateRequest) -> FlightEstimate {
        let departure = request.departure.as_deref().unwrap_or(DEFAULT_DEPARTURE);
        let destination = request.destination.as_deref().unwrap_or(DEFAULT_DESTINATION);
        let month = request.month.as_deref().unwrap_or("");
        self.flights.estimate(departure, destination, month).await
    }
}
