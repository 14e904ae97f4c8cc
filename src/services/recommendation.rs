//! Destination selection.
//!
//! Two tiers sit behind `RecommendationStrategy`: the taste-graph strategy
//! asks Qloo which city fits the user's music, food and film tastes, and the
//! keyword strategy scores a fixed city table when the graph had nothing to
//! offer. `Recommender` chains them so callers always get a destination.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::models::preferences::UserPreferences;
use crate::models::recommendation::{
    MatchCategory, Recommendation, TasteEntity, TasteMatch,
};
use crate::services::keyword_rules::{KeywordRule, RuleTable};
use crate::services::taste_graph::TasteGraph;
use crate::services::venue_categorizer::{
    strategy_for, CategorizationTier, PreferenceTerms,
};

const RESULTS_PER_PREFERENCE: usize = 3;
const VENUES_PER_CATEGORY: usize = 3;
const VENUE_CATEGORIES: [&str; 3] = ["attractions", "restaurants", "music venues"];

pub const PRIMARY_VENUES_PER_DAY: usize = 3;
pub const PRIMARY_MAX_VENUES: usize = 15;
pub const FALLBACK_VENUES_PER_DAY: usize = 4;
pub const FALLBACK_MAX_VENUES: usize = 20;

pub const DEFAULT_CITY: &str = "Paris";

const NO_MATCH_MESSAGE: &str = "Our cultural engine didn't find an exact destination that matches all your tastes right now.\nBut don't worry — your preferences are unique and worth exploring.\nWhile Qloo's Taste AI continues to learn, we've handpicked a destination that still captures the vibe you're looking for.\nIt's not a direct match, but it's a place known for cultural richness, great food, and immersive experiences.\n\n✨ Want to try adjusting your preferences — or explore a different vibe?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTier {
    Primary,
    Fallback,
}

#[async_trait]
pub trait RecommendationStrategy: Send + Sync {
    fn tier(&self) -> RecommendationTier;

    /// Always produces a recommendation; upstream failures lower the confidence
    /// instead of surfacing as errors.
    async fn recommend(&self, preferences: &UserPreferences) -> Recommendation;
}

pub fn venue_cap(days: u32, per_day: usize, max: usize) -> usize {
    (days as usize).saturating_mul(per_day).min(max)
}

// ---------------------------------------------------------------------------
// Taste-graph tier
// ---------------------------------------------------------------------------

/// City inference for search results without location data, by entity name.
static CITY_INFERENCE: RuleTable<(&str, &str)> = RuleTable::new(&[
    KeywordRule {
        keywords: &["korean", "k-pop", "bts", "ghibli", "anime", "japanese"],
        value: ("Tokyo", "Japan"),
    },
    KeywordRule {
        keywords: &["french", "paris", "louvre"],
        value: ("Paris", "France"),
    },
    KeywordRule {
        keywords: &["italian", "rome", "vatican"],
        value: ("Rome", "Italy"),
    },
    KeywordRule {
        keywords: &["spanish", "barcelona", "madrid"],
        value: ("Barcelona", "Spain"),
    },
    KeywordRule {
        keywords: &["british", "london", "beatles"],
        value: ("London", "United Kingdom"),
    },
    KeywordRule {
        keywords: &["west african", "nollywood", "african"],
        value: ("Lagos", "Nigeria"),
    },
    KeywordRule {
        keywords: &["indian", "bollywood", "curry"],
        value: ("Mumbai", "India"),
    },
    KeywordRule {
        keywords: &["chinese", "mandarin", "cantonese"],
        value: ("Beijing", "China"),
    },
    KeywordRule {
        keywords: &["mexican", "latin", "spanish"],
        value: ("Mexico City", "Mexico"),
    },
    KeywordRule {
        keywords: &["electronic"],
        value: ("Berlin", "Germany"),
    },
    KeywordRule {
        keywords: &["reggae"],
        value: ("Kingston", "Jamaica"),
    },
    KeywordRule {
        keywords: &["jazz"],
        value: ("New Orleans", "United States"),
    },
    KeywordRule {
        keywords: &["hip-hop", "hiphop", "rap"],
        value: ("New York", "United States"),
    },
    KeywordRule {
        keywords: &["classical", "mozart", "vienna"],
        value: ("Vienna", "Austria"),
    },
    KeywordRule {
        keywords: &["mediterranean"],
        value: ("Athens", "Greece"),
    },
    KeywordRule {
        keywords: &["bbq", "barbecue", "southern"],
        value: ("Austin", "United States"),
    },
    KeywordRule {
        keywords: &["pizza"],
        value: ("Naples", "Italy"),
    },
    KeywordRule {
        keywords: &["sushi"],
        value: ("Tokyo", "Japan"),
    },
    KeywordRule {
        keywords: &["tapas"],
        value: ("Madrid", "Spain"),
    },
    KeywordRule {
        keywords: &["opera"],
        value: ("Milan", "Italy"),
    },
    KeywordRule {
        keywords: &["blues"],
        value: ("Chicago", "United States"),
    },
    KeywordRule {
        keywords: &["tango"],
        value: ("Buenos Aires", "Argentina"),
    },
    KeywordRule {
        keywords: &["wine"],
        value: ("Bordeaux", "France"),
    },
    KeywordRule {
        keywords: &["beer", "bier"],
        value: ("Munich", "Germany"),
    },
    KeywordRule {
        keywords: &["surf"],
        value: ("Sydney", "Australia"),
    },
]);

/// Venues used when the graph returns nothing for the chosen city.
const GRAPH_FALLBACK_VENUES: &[(&str, &[&str])] = &[
    ("Tokyo", &["Shibuya Crossing", "Senso-ji Temple", "Harajuku District"]),
    ("Paris", &["Eiffel Tower", "Louvre Museum", "Montmartre"]),
    ("Rome", &["Colosseum", "Vatican City", "Trevi Fountain"]),
    ("Barcelona", &["Park Güell", "Sagrada Familia", "Gothic Quarter"]),
    ("London", &["Big Ben", "Tower Bridge", "British Museum"]),
    ("Kingston", &["Bob Marley Museum", "Devon House", "Emancipation Park"]),
];
const GRAPH_GENERIC_VENUES: &[&str] = &["City Center", "Historic District", "Cultural Quarter"];

/// Resolve a search result to a (city, country) pair, from its own location
/// data or by inference from its name.
pub fn infer_city(entity: &TasteEntity) -> Option<(String, Option<String>)> {
    if let Some(city) = entity.city.as_deref().filter(|c| !c.is_empty()) {
        return Some((city.to_string(), entity.country.clone()));
    }

    let name = entity.name.as_deref().unwrap_or("");
    CITY_INFERENCE
        .first_match(name)
        .map(|(city, country)| (city.to_string(), Some(country.to_string())))
}

fn vibe_modifier(vibe: &str) -> &'static str {
    match vibe {
        "relaxing" => "peaceful and serene",
        "adventurous" => "thrilling and exciting",
        "romantic" => "romantic and intimate",
        "party" => "vibrant nightlife and party",
        "cultural" => "rich cultural heritage",
        "luxury" => "luxurious and upscale",
        "nature" => "natural beauty and wildlife",
        "historical" => "ancient history and monuments",
        _ => "culturally enriching",
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// The explanation shown for a direct taste-graph match.
fn match_reason(best: &TasteMatch, preferences: &UserPreferences) -> String {
    let vibe = preferences.effective_vibe();
    let modifier = vibe_modifier(vibe);
    let city = &best.city;
    let days = preferences.days;
    let music = or_default(&preferences.music, "your music taste");
    let movie = or_default(&preferences.movie, "your entertainment preferences");
    let food = or_default(&preferences.food, "your culinary interests");

    let reason = format!(
        "Qloo's Taste AI™ analyzed your cultural preferences and {vibe} travel vibe to identify {city} as your perfect destination.\n\n\
         Based on your love for {music}, {movie}, and {food}, combined with your desire for a {vibe} experience, {city} offers {match_reason} with a {modifier} atmosphere.\n\n\
         This recommendation leverages Qloo's advanced cultural intelligence, which understands the deep connections between your personal tastes, travel mood, and destinations that will truly resonate with your cultural DNA. Qloo's AI has identified cultural patterns that make {city} an ideal match for your {vibe} {days}-day adventure.",
        match_reason = best.reason,
    );

    let scene = best.reason.split_whitespace().next().unwrap_or("");
    let taste_graph = format!(
        "\n\n🔗 Qloo's Taste Graph Connections:\n\
         • {music_pref} → {category} culture → {city}'s {scene} scene\n\
         • {film_pref} → Cultural storytelling → {city}'s cinematic heritage\n\
         • {food_pref} → Culinary traditions → {city}'s authentic food culture\n\
         • {vibe_title} vibe → {modifier} experiences → {city}'s {vibe} attractions\n\n\
         These connections were identified using Qloo's cross-domain intelligence between your music, film, cuisine preferences, and desired travel mood.",
        music_pref = or_default(&preferences.music, "Your music taste"),
        category = best.category.as_str(),
        film_pref = or_default(&preferences.movie, "Your film preferences"),
        food_pref = or_default(&preferences.food, "Your cuisine interests"),
        vibe_title = capitalize(vibe),
    );

    reason + &taste_graph
}

/// Recommendation used when the graph is unavailable or matched nothing.
pub fn no_match_recommendation(preferences: &UserPreferences) -> Recommendation {
    Recommendation {
        city: DEFAULT_CITY.to_string(),
        country: None,
        reason: NO_MATCH_MESSAGE.to_string(),
        vibe: preferences.effective_vibe().to_string(),
        days: preferences.days,
        venues: Vec::new(),
        taste_mapping: None,
        qloo_powered: false,
        confidence: 1,
        is_fallback: true,
        fallback_message: None,
    }
}

/// Primary tier: destination and venues from the taste graph.
pub struct TasteGraphRecommendation {
    graph: Arc<dyn TasteGraph>,
}

impl TasteGraphRecommendation {
    pub fn new(graph: Arc<dyn TasteGraph>) -> Self {
        Self { graph }
    }

    /// Search results, or nothing when the search failed.
    async fn search_or_empty(
        &self,
        query: &str,
        expected_city: Option<&str>,
        expected_country: Option<&str>,
    ) -> Vec<TasteEntity> {
        match self.graph.search(query, expected_city, expected_country).await {
            Ok(results) => results,
            Err(e) => {
                warn!("[Qloo] Error searching for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Every resolvable match, in field order (music, cuisine, entertainment)
    /// then result order.
    pub async fn find_matches(&self, preferences: &UserPreferences) -> Vec<TasteMatch> {
        let fields = [
            (&preferences.music, MatchCategory::Music),
            (&preferences.food, MatchCategory::Cuisine),
            (&preferences.movie, MatchCategory::Entertainment),
        ];

        let mut matches = Vec::new();
        for (preference, category) in fields {
            if preference.is_empty() {
                continue;
            }

            let results = self.search_or_empty(preference, None, None).await;
            debug!("[Qloo] Got {} results for '{}'", results.len(), preference);

            for result in results.iter().take(RESULTS_PER_PREFERENCE) {
                let name = result.name.clone().unwrap_or_default();
                match infer_city(result) {
                    Some((city, country)) => {
                        debug!("Qloo matched '{}' to {}, {:?}", name, city, country);
                        matches.push(TasteMatch {
                            city,
                            country,
                            reason: format!("Related to your interest in {}", name),
                            preference: preference.clone(),
                            category,
                            source_entity_name: name,
                        });
                    }
                    None => debug!("No city data for '{}', skipping", name),
                }
            }
        }
        matches
    }

    /// Up to three unique venue names per category, located in the target city.
    pub async fn venues_for_city(
        &self,
        city: &str,
        country: Option<&str>,
        venues_needed: usize,
    ) -> Vec<String> {
        let mut venues: Vec<String> = Vec::new();

        for category in VENUE_CATEGORIES {
            let query = format!("{} {}", city, category);
            let results = self.search_or_empty(&query, Some(city), country).await;
            for name in results
                .into_iter()
                .take(VENUES_PER_CATEGORY)
                .filter_map(|r| r.name)
                .filter(|n| !n.is_empty())
            {
                if !venues.contains(&name) {
                    venues.push(name);
                }
            }
        }

        if venues.is_empty() {
            info!("No venues found for {}, using static list", city);
            let fallback = GRAPH_FALLBACK_VENUES
                .iter()
                .find(|(name, _)| *name == city)
                .map(|(_, list)| *list)
                .unwrap_or(GRAPH_GENERIC_VENUES);
            venues = fallback.iter().map(|v| v.to_string()).collect();
        }

        venues.truncate(venues_needed);
        venues
    }
}

#[async_trait]
impl RecommendationStrategy for TasteGraphRecommendation {
    fn tier(&self) -> RecommendationTier {
        RecommendationTier::Primary
    }

    async fn recommend(&self, preferences: &UserPreferences) -> Recommendation {
        if !self.graph.is_configured() {
            info!("Taste graph not configured, returning fallback city");
            return no_match_recommendation(preferences);
        }

        let matches = self.find_matches(preferences).await;
        debug!(
            "Found {} Qloo matches: {:?}",
            matches.len(),
            matches.iter().map(|m| m.city.as_str()).collect::<Vec<_>>()
        );

        let Some(best) = matches.into_iter().next() else {
            info!("Qloo found no matches, returning fallback city");
            return no_match_recommendation(preferences);
        };
        info!("Selected best match: {}", best.city);

        let venues_needed =
            venue_cap(preferences.days, PRIMARY_VENUES_PER_DAY, PRIMARY_MAX_VENUES);
        let venues = self
            .venues_for_city(&best.city, best.country.as_deref(), venues_needed)
            .await;

        let terms = PreferenceTerms {
            music: &preferences.music,
            film: &preferences.movie,
            cuisine: &preferences.food,
        };
        let taste_mapping =
            strategy_for(CategorizationTier::Primary).categorize(&venues, &terms);

        Recommendation {
            reason: match_reason(&best, preferences),
            city: best.city,
            country: best.country,
            vibe: preferences.effective_vibe().to_string(),
            days: preferences.days,
            venues,
            taste_mapping: Some(taste_mapping),
            qloo_powered: true,
            confidence: 5,
            is_fallback: false,
            fallback_message: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword-scoring tier
// ---------------------------------------------------------------------------

/// Cities scored by keyword hits across all three preference strings.
/// Definition order breaks ties.
static CITY_KEYWORDS: RuleTable<&str> = RuleTable::new(&[
    KeywordRule {
        keywords: &[
            "french", "france", "paris", "louvre", "eiffel", "baguette", "croissant", "wine",
            "cheese", "amélie", "godard",
        ],
        value: "Paris",
    },
    KeywordRule {
        keywords: &[
            "italian", "italy", "rome", "pasta", "pizza", "vatican", "colosseum", "fellini",
            "gelato",
        ],
        value: "Rome",
    },
    KeywordRule {
        keywords: &[
            "japanese", "japan", "tokyo", "sushi", "anime", "manga", "ramen", "miyazaki",
            "kurosawa",
        ],
        value: "Tokyo",
    },
    KeywordRule {
        keywords: &[
            "british",
            "england",
            "london",
            "tea",
            "fish and chips",
            "beatles",
            "shakespeare",
            "pub",
        ],
        value: "London",
    },
    KeywordRule {
        keywords: &[
            "spanish", "spain", "barcelona", "tapas", "paella", "flamenco", "gaudí", "catalan",
        ],
        value: "Barcelona",
    },
    KeywordRule {
        keywords: &[
            "german", "germany", "berlin", "beer", "sausage", "techno", "bowie", "kraftwerk",
        ],
        value: "Berlin",
    },
    KeywordRule {
        keywords: &[
            "dutch",
            "netherlands",
            "amsterdam",
            "cheese",
            "stroopwafel",
            "van gogh",
            "rembrandt",
        ],
        value: "Amsterdam",
    },
    KeywordRule {
        keywords: &["spanish", "spain", "madrid", "tapas", "flamenco", "prado", "almodovar"],
        value: "Madrid",
    },
]);

const CITY_VENUES: &[(&str, &[&str])] = &[
    (
        "Barcelona",
        &[
            "Park Güell",
            "Sagrada Familia",
            "Gothic Quarter",
            "El Born District",
            "La Boqueria Market",
            "Casa Batlló",
            "Picasso Museum",
            "Barceloneta Beach",
            "Montjuïc Hill",
            "Casa Milà",
            "Palau de la Música",
            "Camp Nou",
        ],
    ),
    (
        "Paris",
        &[
            "Eiffel Tower",
            "Louvre Museum",
            "Notre-Dame",
            "Champs-Élysées",
            "Montmartre",
            "Arc de Triomphe",
            "Seine River",
            "Latin Quarter",
            "Marais District",
            "Versailles",
        ],
    ),
    (
        "Rome",
        &[
            "Colosseum",
            "Vatican City",
            "Trevi Fountain",
            "Roman Forum",
            "Pantheon",
            "Spanish Steps",
            "Trastevere",
            "Campo de Fiori",
            "Villa Borghese",
            "Castel Sant Angelo",
        ],
    ),
    (
        "Tokyo",
        &[
            "Shibuya Crossing",
            "Senso-ji Temple",
            "Tsukiji Market",
            "Harajuku",
            "Tokyo Skytree",
            "Meiji Shrine",
            "Akihabara",
            "Ginza",
            "Ueno Park",
            "Roppongi",
        ],
    ),
    (
        "London",
        &[
            "Big Ben",
            "Tower Bridge",
            "British Museum",
            "Hyde Park",
            "Covent Garden",
            "Camden Market",
            "Tate Modern",
            "Westminster Abbey",
            "Buckingham Palace",
            "Thames River",
        ],
    ),
    (
        "Berlin",
        &[
            "Brandenburg Gate",
            "Museum Island",
            "East Side Gallery",
            "Checkpoint Charlie",
            "Reichstag",
            "Potsdamer Platz",
            "Kreuzberg",
            "Tiergarten",
            "Hackescher Markt",
            "Alexanderplatz",
        ],
    ),
    (
        "Amsterdam",
        &[
            "Anne Frank House",
            "Van Gogh Museum",
            "Rijksmuseum",
            "Jordaan District",
            "Red Light District",
            "Vondelpark",
            "Canal Ring",
            "Dam Square",
            "Bloemenmarkt",
            "Museumplein",
        ],
    ),
    (
        "Madrid",
        &[
            "Prado Museum",
            "Royal Palace",
            "Retiro Park",
            "Gran Vía",
            "Plaza Mayor",
            "Reina Sofía Museum",
            "Thyssen Museum",
            "Malasaña",
            "La Latina",
            "Temple of Debod",
        ],
    ),
];
const GENERIC_CITY_VENUES: &[&str] = &[
    "City Center",
    "Historic District",
    "Cultural Quarter",
    "Main Square",
    "Local Market",
    "Arts District",
];

/// City with the most keyword hits in the combined preferences; Paris if none.
pub fn score_city(preferences: &UserPreferences) -> &'static str {
    let combined = format!(
        "{} {} {}",
        preferences.music, preferences.movie, preferences.food
    );
    CITY_KEYWORDS
        .best_scoring(&combined)
        .copied()
        .unwrap_or(DEFAULT_CITY)
}

pub fn city_venues(city: &str, venues_needed: usize) -> Vec<String> {
    CITY_VENUES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, list)| *list)
        .unwrap_or(GENERIC_CITY_VENUES)
        .iter()
        .take(venues_needed)
        .map(|v| v.to_string())
        .collect()
}

/// Fallback tier: keyword-scored city with static venues.
pub struct KeywordFallbackRecommendation;

#[async_trait]
impl RecommendationStrategy for KeywordFallbackRecommendation {
    fn tier(&self) -> RecommendationTier {
        RecommendationTier::Fallback
    }

    async fn recommend(&self, preferences: &UserPreferences) -> Recommendation {
        let city = score_city(preferences);
        let venues_needed =
            venue_cap(preferences.days, FALLBACK_VENUES_PER_DAY, FALLBACK_MAX_VENUES);
        let venues = city_venues(city, venues_needed);

        let music = or_default(&preferences.music, "various music");
        let movie = or_default(&preferences.movie, "great cinema");
        let food = or_default(&preferences.food, "diverse cuisine");
        let terms = PreferenceTerms {
            music,
            film: movie,
            cuisine: food,
        };
        let taste_mapping =
            strategy_for(CategorizationTier::Fallback).categorize(&venues, &terms);

        let reason = format!(
            "No exact match found, but {city} captures your cultural vibe! 🌟\n\n\
             ✨ Why {city} works for you:\n\
             • {music} → Vibrant music scene & live venues\n\
             • {movie} → Cinematic heritage & visual culture\n\
             • {food} → Authentic culinary traditions\n\n\
             Your unique tastes deserve exploration — this destination offers rich cultural experiences while Qloo's AI continues learning your preferences."
        );
        info!("Keyword fallback selected {}", city);

        Recommendation {
            city: city.to_string(),
            country: None,
            reason,
            vibe: preferences.effective_vibe().to_string(),
            days: preferences.days,
            venues,
            taste_mapping: Some(taste_mapping),
            qloo_powered: false,
            confidence: 2,
            is_fallback: true,
            fallback_message: Some(NO_MATCH_MESSAGE.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tiered entry point
// ---------------------------------------------------------------------------

/// Runs the primary tier and drops to the fallback tier when it comes back
/// with fallback data.
pub struct Recommender {
    primary: Box<dyn RecommendationStrategy>,
    fallback: Box<dyn RecommendationStrategy>,
}

impl Recommender {
    pub fn new(graph: Arc<dyn TasteGraph>) -> Self {
        Self::with_strategies(
            Box::new(TasteGraphRecommendation::new(graph)),
            Box::new(KeywordFallbackRecommendation),
        )
    }

    pub fn with_strategies(
        primary: Box<dyn RecommendationStrategy>,
        fallback: Box<dyn RecommendationStrategy>,
    ) -> Self {
        Self { primary, fallback }
    }

    pub async fn recommend(&self, preferences: &UserPreferences) -> Recommendation {
        debug!(
            "Recommending for music='{}', movie='{}', food='{}', vibe='{}'",
            preferences.music, preferences.movie, preferences.food, preferences.vibe
        );

        let recommendation = self.primary.recommend(preferences).await;
        if !recommendation.is_fallback {
            return recommendation;
        }

        info!(
            "{:?} tier returned fallback data, trying {:?} tier",
            self.primary.tier(),
            self.fallback.tier()
        );
        self.fallback.recommend(preferences).await
    }
}
