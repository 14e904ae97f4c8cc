use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::models::recommendation::TasteEntity;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Free-text search over a taste graph.
#[async_trait]
pub trait TasteGraph: Send + Sync {
    /// Whether credentials are available; callers skip the graph entirely otherwise.
    fn is_configured(&self) -> bool;

    /// Search for entities matching `query`. When an expected city or country
    /// is given, entities located elsewhere are dropped.
    async fn search(
        &self,
        query: &str,
        expected_city: Option<&str>,
        expected_country: Option<&str>,
    ) -> Result<Vec<TasteEntity>, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Option<RawEntity>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEntity {
    name: Option<String>,
    #[serde(rename = "type")]
    entity_type: Option<Value>,
    category: Option<Value>,
    city: Option<String>,
    location: Option<RawLocation>,
    properties: Option<RawProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocation {
    city: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    geocode: Option<RawLocation>,
}

impl RawEntity {
    /// Flatten the several places the API may report a location into one entity.
    fn enrich(self) -> TasteEntity {
        let location = self.location.unwrap_or_default();
        let mut city = self.city.or(location.city);
        let mut country = location.country;

        if city.is_none() {
            if let Some(geocode) = self.properties.and_then(|p| p.geocode) {
                city = geocode.city;
                country = country.or(geocode.country);
            }
        }

        TasteEntity {
            name: self.name,
            entity_type: self.entity_type.map(value_text),
            category: self.category.map(value_text),
            city,
            country,
        }
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Case-insensitive "expected value appears in actual value" check.
fn location_matches(expected: Option<&str>, actual: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => actual
            .unwrap_or("")
            .to_lowercase()
            .contains(&expected.to_lowercase()),
    }
}

#[derive(Clone)]
pub struct QlooClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl QlooClient {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        if config.qloo_api_key.is_none() {
            warn!("QLOO_API_KEY not set. Qloo features will be limited.");
        }

        Ok(Self {
            client,
            api_key: config.qloo_api_key.clone(),
            base_url: config.qloo_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TasteGraph for QlooClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(
        &self,
        query: &str,
        expected_city: Option<&str>,
        expected_country: Option<&str>,
    ) -> Result<Vec<TasteEntity>, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingApiKey("Qloo"))?;

        let url = format!("{}/search", self.base_url);
        debug!("[Qloo] Calling {} with query='{}'", url, query);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", api_key)
            .header("Content-Type", "application/json")
            .query(&[("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::from_response(response).await);
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        let entities: Vec<TasteEntity> = body
            .results
            .into_iter()
            .flatten()
            .map(RawEntity::enrich)
            .filter(|entity| {
                location_matches(expected_city, entity.city.as_deref())
                    && location_matches(expected_country, entity.country.as_deref())
            })
            .collect();

        info!("[Qloo] Found {} results for '{}'", entities.len(), query);
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> TasteEntity {
        serde_json::from_value::<RawEntity>(value).unwrap().enrich()
    }

    #[test]
    fn test_enrich_prefers_top_level_city() {
        let entity = parse(json!({
            "name": "Preservation Hall",
            "city": "New Orleans",
            "location": {"city": "Elsewhere", "country": "United States"}
        }));
        assert_eq!(entity.city.as_deref(), Some("New Orleans"));
        assert_eq!(entity.country.as_deref(), Some("United States"));
    }

    #[test]
    fn test_enrich_falls_back_to_geocode() {
        let entity = parse(json!({
            "name": "Sagrada Familia",
            "type": "urn:entity:place",
            "properties": {"geocode": {"city": "Barcelona", "country": "Spain"}}
        }));
        assert_eq!(entity.city.as_deref(), Some("Barcelona"));
        assert_eq!(entity.country.as_deref(), Some("Spain"));
        assert_eq!(entity.entity_type.as_deref(), Some("urn:entity:place"));
    }

    #[test]
    fn test_enrich_without_location() {
        let entity = parse(json!({"name": "Kind of Blue", "category": ["album"]}));
        assert!(entity.city.is_none());
        assert_eq!(entity.category.as_deref(), Some("[\"album\"]"));
    }

    #[test]
    fn test_location_matches_is_case_insensitive_substring() {
        assert!(location_matches(None, None));
        assert!(location_matches(Some("paris"), Some("Paris, Île-de-France")));
        assert!(!location_matches(Some("Paris"), Some("Lyon")));
        assert!(!location_matches(Some("Paris"), None));
    }

    #[test]
    fn test_client_without_key_is_unconfigured() {
        let client = QlooClient::new(&AppConfig::default()).unwrap();
        assert!(!client.is_configured());
    }
}
