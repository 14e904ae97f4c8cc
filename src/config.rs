use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

pub const DEFAULT_QLOO_BASE_URL: &str = "https://hackathon.api.qloo.com";
pub const DEFAULT_TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_TOGETHER_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.1";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

/// Process-wide settings, resolved once at startup and handed to each
/// service constructor.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub qloo_api_key: Option<String>,
    pub qloo_base_url: String,
    pub together_api_key: Option<String>,
    pub together_base_url: String,
    pub together_model: String,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub unsplash_access_key: Option<String>,
    pub unsplash_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            qloo_api_key: None,
            qloo_base_url: DEFAULT_QLOO_BASE_URL.to_string(),
            together_api_key: None,
            together_base_url: DEFAULT_TOGETHER_BASE_URL.to_string(),
            together_model: DEFAULT_TOGETHER_MODEL.to_string(),
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            unsplash_access_key: None,
            unsplash_base_url: DEFAULT_UNSPLASH_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            port: non_empty_var("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            qloo_api_key: non_empty_var("QLOO_API_KEY"),
            qloo_base_url: non_empty_var("QLOO_BASE_URL").unwrap_or(defaults.qloo_base_url),
            together_api_key: non_empty_var("TOGETHER_API_KEY"),
            together_base_url: non_empty_var("TOGETHER_BASE_URL")
                .unwrap_or(defaults.together_base_url),
            together_model: non_empty_var("TOGETHER_MODEL").unwrap_or(defaults.together_model),
            openweather_api_key: non_empty_var("OPENWEATHER_API_KEY"),
            openweather_base_url: non_empty_var("OPENWEATHER_BASE_URL")
                .unwrap_or(defaults.openweather_base_url),
            unsplash_access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            unsplash_base_url: non_empty_var("UNSPLASH_BASE_URL")
                .unwrap_or(defaults.unsplash_base_url),
        }
    }

    /// Names of the upstream services paired with whether a credential is present.
    pub fn credential_status(&self) -> [(&'static str, bool); 4] {
        [
            ("qloo", self.qloo_api_key.is_some()),
            ("together", self.together_api_key.is_some()),
            ("openweather", self.openweather_api_key.is_some()),
            ("unsplash", self.unsplash_access_key.is_some()),
        ]
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
