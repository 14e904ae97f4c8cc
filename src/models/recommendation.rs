use serde::{Deserialize, Serialize};

/// Which preference field a taste-graph hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Music,
    Cuisine,
    Entertainment,
}

impl MatchCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MatchCategory::Music => "music",
            MatchCategory::Cuisine => "cuisine",
            MatchCategory::Entertainment => "entertainment",
        }
    }
}

/// An entity returned by the taste-graph search, after location enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasteEntity {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// A taste-graph result that resolved to a destination city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasteMatch {
    pub city: String,
    pub country: Option<String>,
    pub reason: String,
    pub preference: String,
    pub category: MatchCategory,
    pub source_entity_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSummary {
    pub music: String,
    pub film: String,
    pub cuisine: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub venue: String,
    pub cultural_path: String,
}

/// Venues grouped by the preference they speak to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteMapping {
    pub preferences: PreferenceSummary,
    pub music_experiences: Vec<Experience>,
    pub film_experiences: Vec<Experience>,
    pub cuisine_experiences: Vec<Experience>,
    pub additional_spots: Vec<Experience>,
}

impl TasteMapping {
    pub fn is_empty(&self) -> bool {
        self.music_experiences.is_empty()
            && self.film_experiences.is_empty()
            && self.cuisine_experiences.is_empty()
            && self.additional_spots.is_empty()
    }
}

/// Destination chosen for the trip, plus the venues to build it around.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub reason: String,
    pub vibe: String,
    pub days: u32,
    pub venues: Vec<String>,
    pub taste_mapping: Option<TasteMapping>,
    pub qloo_powered: bool,
    /// 5 for a direct taste-graph match, 2-3 for heuristics, 1 when nothing matched.
    pub confidence: u8,
    pub is_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_message: Option<String>,
}
