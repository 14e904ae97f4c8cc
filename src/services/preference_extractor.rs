use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::preferences::ExtractedPreferences;
use crate::services::completion::{CompletionRequest, TextCompletion};
use crate::services::json_repair::braced_span;
use crate::services::keyword_rules::first_keyword;

const EXTRACTION_MAX_TOKENS: u32 = 150;
const EXTRACTION_TEMPERATURE: f32 = 0.1;

const MUSIC_KEYWORDS: &[&str] = &[
    "jazz", "rock", "pop", "classical", "beatles", "elvis", "mozart", "hip-hop", "reggae",
    "country",
];
const MOVIE_KEYWORDS: &[&str] = &[
    "godfather",
    "titanic",
    "amélie",
    "fellini",
    "tarantino",
    "scorsese",
    "hitchcock",
    "kubrick",
];
const FOOD_KEYWORDS: &[&str] = &[
    "italian", "french", "japanese", "chinese", "mexican", "indian", "thai", "spanish", "greek",
];

/// Turns a free-text trip description into music/movie/food/vibe preferences.
pub struct PreferenceExtractor {
    completion: Arc<dyn TextCompletion>,
}

impl PreferenceExtractor {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self { completion }
    }

    /// Never fails: when the model is unreachable or its answer is unusable,
    /// preferences come from a keyword scan of the description instead.
    pub async fn extract(&self, description: &str) -> ExtractedPreferences {
        match self.extract_with_model(description).await {
            Ok(preferences) => {
                debug!("Parsed preferences: {:?}", preferences);
                preferences
            }
            Err(e) => {
                warn!("Text parsing error: {}", e);
                info!("Falling back to keyword extraction");
                extract_keywords(description)
            }
        }
    }

    async fn extract_with_model(
        &self,
        description: &str,
    ) -> Result<ExtractedPreferences, ServiceError> {
        let content = self
            .completion
            .complete(CompletionRequest {
                prompt: build_extraction_prompt(description),
                max_tokens: EXTRACTION_MAX_TOKENS,
                temperature: EXTRACTION_TEMPERATURE,
            })
            .await?;
        debug!("AI extracted content: {}", content);

        let json_str = braced_span(&content)
            .ok_or_else(|| ServiceError::Parse("No JSON object in extraction reply".to_string()))?;
        let value: Value =
            serde_json::from_str(json_str).map_err(|e| ServiceError::Parse(e.to_string()))?;

        let field = |name: &str| match value.get(name) {
            Some(Value::String(text)) => text.trim().to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Ok(ExtractedPreferences {
            music: field("music"),
            movie: field("movie"),
            food: field("food"),
            vibe: field("vibe"),
        })
    }
}

/// Deterministic fallback: first known keyword per field, vibe left empty.
pub fn extract_keywords(description: &str) -> ExtractedPreferences {
    let pick = |keywords: &[&str]| {
        first_keyword(description, keywords)
            .map(str::to_string)
            .unwrap_or_default()
    };

    ExtractedPreferences {
        music: pick(MUSIC_KEYWORDS),
        movie: pick(MOVIE_KEYWORDS),
        food: pick(FOOD_KEYWORDS),
        vibe: String::new(),
    }
}

fn build_extraction_prompt(description: &str) -> String {
    format!(
        r#"
    Extract travel preferences from this description: "{description}"

    Be specific and extract actual names/types. Return ONLY valid JSON:
    {{
        "music": "specific artist, genre, or music style mentioned",
        "movie": "specific movie, director, or film genre mentioned",
        "food": "specific cuisine type or food preference mentioned",
        "vibe": "travel mood: relaxing, adventurous, romantic, party, cultural, luxury, nature, historical"
    }}

    Examples:
    - "I love jazz and Italian food" → {{"music": "jazz", "movie": "", "food": "Italian", "vibe": "cultural"}}
    - "Beatles fan wanting French cuisine" → {{"music": "Beatles", "movie": "", "food": "French", "vibe": "cultural"}}
    "#
    )
}
