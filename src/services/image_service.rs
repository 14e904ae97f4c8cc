use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ServiceError;

/// Served when no destination photo can be fetched.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/logo.png";

#[derive(Debug, Deserialize)]
struct RandomPhoto {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// Destination photos from Unsplash.
#[derive(Clone)]
pub struct ImageService {
    client: Client,
    access_key: Option<String>,
    base_url: String,
}

impl ImageService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            access_key: config.unsplash_access_key.clone(),
            base_url: config.unsplash_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// A landscape photo URL for `query`, or the placeholder.
    pub async fn image_url(&self, query: &str) -> String {
        match self.fetch_random(query).await {
            Ok(url) => {
                info!("Retrieved image URL for {}: {}", query, url);
                url
            }
            Err(e) => {
                warn!("Unsplash API error: {}", e);
                PLACEHOLDER_IMAGE.to_string()
            }
        }
    }

    async fn fetch_random(&self, query: &str) -> Result<String, ServiceError> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or(ServiceError::MissingApiKey("Unsplash"))?;

        let response = self
            .client
            .get(format!("{}/photos/random", self.base_url))
            .query(&[
                ("query", query),
                ("client_id", access_key),
                ("orientation", "landscape"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::from_response(response).await);
        }

        let photo: RandomPhoto = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        Ok(photo.urls.regular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_missing_key_returns_placeholder() {
        let service = ImageService::new(&AppConfig::default());
        assert_eq!(service.image_url("Lisbon").await, PLACEHOLDER_IMAGE);
    }
}
