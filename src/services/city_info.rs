use url::Url;

use crate::models::preferences::UserPreferences;
use crate::models::trip::{CityInfo, PlaceLink};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
const GENERIC_PLACES: [&str; 4] = ["City Center", "Historic District", "Cultural Quarter", "Main Square"];

const CITY_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Liverpool", "Liverpool is a vibrant port city in northwest England, famous as the birthplace of The Beatles and home to a rich musical heritage that shaped global pop culture."),
    ("Berlin", "Berlin is Germany's dynamic capital, a city where history meets cutting-edge culture, known for its artistic innovation and transformative musical scenes."),
    ("Rome", "Rome is the eternal city where ancient history meets culinary excellence, offering authentic Italian cuisine in the very place where it originated."),
    ("Tokyo", "Tokyo is a mesmerizing metropolis that seamlessly blends traditional Japanese culture with ultra-modern innovation, creating a unique cultural experience."),
    ("Barcelona", "Barcelona is a captivating Mediterranean city renowned for its distinctive architecture, vibrant arts scene, and exceptional culinary culture."),
    ("Paris", "Paris is the city of light and love, a cultural epicenter known for its artistic heritage, world-class cuisine, and cinematic history."),
    ("New Orleans", "New Orleans is a soulful city where jazz was born, offering a unique blend of musical heritage, Creole culture, and distinctive cuisine."),
    ("Vienna", "Vienna is the imperial city of music, home to classical composers and elegant coffee house culture in the heart of Europe."),
    ("Amsterdam", "Amsterdam is a charming canal city known for its artistic heritage, liberal culture, and historic architecture."),
    ("Madrid", "Madrid is Spain's vibrant capital, renowned for its world-class museums, lively tapas culture, and passionate flamenco traditions."),
];

/// Description and places to visit; the recommended venues when there are any.
pub fn city_info(city: &str, venues: &[String]) -> CityInfo {
    let description = CITY_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| {
            format!(
                "{} is a vibrant destination offering rich cultural experiences and unique local attractions.",
                city
            )
        });

    let places = if venues.is_empty() {
        GENERIC_PLACES.iter().map(|p| p.to_string()).collect()
    } else {
        venues.to_vec()
    };

    CityInfo {
        name: city.to_string(),
        description,
        places,
    }
}

/// Google Maps search link for a place, qualified by city when given.
pub fn maps_link(place: &str, city: Option<&str>) -> String {
    let query = match city.filter(|c| !c.is_empty()) {
        Some(city) => format!("{} {}", place, city),
        None => place.to_string(),
    };

    let mut url = match Url::parse(MAPS_SEARCH_URL) {
        Ok(url) => url,
        Err(_) => return MAPS_SEARCH_URL.to_string(),
    };
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", &query);
    url.into()
}

pub fn place_links(places: &[String], city: &str) -> Vec<PlaceLink> {
    places
        .iter()
        .map(|place| PlaceLink {
            name: place.clone(),
            maps_link: maps_link(place, Some(city)),
        })
        .collect()
}

/// One-line recap of the tastes the trip was built around.
pub fn taste_summary(preferences: &UserPreferences) -> String {
    let or = |value: &str, default: &str| {
        if value.is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    };
    format!(
        "You love {} music, movies like {}, and delicious {} food.",
        or(&preferences.music, "various"),
        or(&preferences.movie, "various genres"),
        or(&preferences.food, "cuisine"),
    )
}
