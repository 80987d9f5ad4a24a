use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{RecipeError, Result};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Settings for the Gemini model client and the session front end
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key for authentication (falls back to GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the API endpoint (override for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens the model may generate per recipe
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Number of history entries surfaced to the user
    #[serde(default = "default_history_display")]
    pub history_display: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            history_display: default_history_display(),
        }
    }
}

// Default value functions
fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_max_output_tokens() -> u32 {
    500
}

fn default_history_display() -> usize {
    5
}

impl GeminiConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_LAB__ prefix
    /// 2. recipe_lab.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_LAB__MODEL
    pub fn load() -> std::result::Result<Self, ConfigError> {
        load_config()
    }

    /// Resolve the API key, preferring the configured value over GEMINI_API_KEY
    pub fn api_key(&self) -> Result<String> {
        resolve_api_key(self.api_key.clone(), std::env::var(API_KEY_ENV).ok())
    }
}

fn resolve_api_key(configured: Option<String>, from_env: Option<String>) -> Result<String> {
    configured
        .into_iter()
        .chain(from_env)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            RecipeError::Config(format!(
                "{} not found in config or environment",
                API_KEY_ENV
            ))
        })
}

/// Load configuration from file and environment variables
///
/// See [`GeminiConfig::load`] for the source priority.
pub fn load_config() -> std::result::Result<GeminiConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_lab").required(false))
        // Use double underscore for nested: RECIPE_LAB__MAX_OUTPUT_TOKENS
        .add_source(
            Environment::with_prefix("RECIPE_LAB")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
