use serde::{Deserialize, Serialize};

use super::{
    itinerary::ItinerarySections, preferences::UserPreferences,
    recommendation::Recommendation, weather::DailyForecast,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityInfo {
    pub name: String,
    pub description: String,
    pub places: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceLink {
    pub name: String,
    pub maps_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandingInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub logo_url: &'static str,
    pub website: &'static str,
}

pub const QLOO_BRANDING: BrandingInfo = BrandingInfo {
    name: "Qloo",
    tagline: "Powered by Qloo's Taste AI™",
    description: "Qloo's advanced cultural intelligence understands the deep connections between your personal tastes and travel destinations.",
    logo_url: "https://qloo.com/assets/qloo-logo.png",
    website: "https://qloo.com",
};

/// The complete result of planning one trip.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub preferences: UserPreferences,
    pub recommendation: Recommendation,
    pub summary: String,
    pub weather: Vec<DailyForecast>,
    pub sections: ItinerarySections,
    pub image_url: String,
    pub city_info: CityInfo,
    pub places: Vec<PlaceLink>,
    pub branding: BrandingInfo,
    pub user_prompt: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightEstimateRequest {
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightEstimate {
    pub price: String,
    pub sites: Vec<String>,
}
