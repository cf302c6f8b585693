use crate::models::ScoringThresholds;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub detector: DetectorSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_tokens() -> u32 { 900 }
fn default_llm_timeout_secs() -> u64 { 30 }

/// One external detection backend
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorEndpoint {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectorSettings {
    pub endpoints: Vec<DetectorEndpoint>,
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "default_detector_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_confidence_threshold() -> f64 { 0.4 }
fn default_detector_timeout_secs() -> u64 { 20 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_calorie_limit")]
    pub calorie_limit: f64,
    #[serde(default = "default_glycemic_limit")]
    pub glycemic_limit: f64,
    #[serde(default = "default_fat_limit_g")]
    pub fat_limit_g: f64,
    #[serde(default = "default_fiber_floor_g")]
    pub fiber_floor_g: f64,
    #[serde(default = "default_junk_hit_penalty")]
    pub junk_hit_penalty: f64,
    #[serde(default = "default_junk_penalty_cap")]
    pub junk_penalty_cap: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            calorie_limit: default_calorie_limit(),
            glycemic_limit: default_glycemic_limit(),
            fat_limit_g: default_fat_limit_g(),
            fiber_floor_g: default_fiber_floor_g(),
            junk_hit_penalty: default_junk_hit_penalty(),
            junk_penalty_cap: default_junk_penalty_cap(),
        }
    }
}

impl From<ThresholdsConfig> for ScoringThresholds {
    fn from(config: ThresholdsConfig) -> Self {
        Self {
            calorie_limit: config.calorie_limit,
            glycemic_limit: config.glycemic_limit,
            fat_limit_g: config.fat_limit_g,
            fiber_floor_g: config.fiber_floor_g,
            junk_hit_penalty: config.junk_hit_penalty,
            junk_penalty_cap: config.junk_penalty_cap,
        }
    }
}

fn default_calorie_limit() -> f64 { 650.0 }
fn default_glycemic_limit() -> f64 { 70.0 }
fn default_fat_limit_g() -> f64 { 25.0 }
fn default_fiber_floor_g() -> f64 { 5.0 }
fn default_junk_hit_penalty() -> f64 { 7.0 }
fn default_junk_penalty_cap() -> f64 { 25.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_advice_cache_size")]
    pub advice_max_entries: u64,
    #[serde(default = "default_advice_ttl_secs")]
    pub advice_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            advice_max_entries: default_advice_cache_size(),
            advice_ttl_secs: default_advice_ttl_secs(),
        }
    }
}

fn default_advice_cache_size() -> u64 { 500 }
fn default_advice_ttl_secs() -> u64 { 600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with PLATE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with PLATE_)
            // e.g., PLATE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PLATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PLATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Pull secrets from the conventional environment variables. GROQ_API_KEY is
/// checked first so deployments can share one variable with other tools.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GROQ_API_KEY")
        .or_else(|_| env::var("PLATE_LLM__API_KEY"))
        .ok();
    let endpoint = env::var("PLATE_LLM__ENDPOINT").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("llm.api_key", api_key)?;
    }
    if let Some(endpoint) = endpoint {
        builder = builder.set_override("llm.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_scorer() {
        let config = ThresholdsConfig::default();
        let thresholds = ScoringThresholds::from(config);
        let reference = ScoringThresholds::default();

        assert_eq!(thresholds.calorie_limit, reference.calorie_limit);
        assert_eq!(thresholds.glycemic_limit, reference.glycemic_limit);
        assert_eq!(thresholds.fat_limit_g, reference.fat_limit_g);
        assert_eq!(thresholds.fiber_floor_g, reference.fiber_floor_g);
        assert_eq!(thresholds.junk_hit_penalty, reference.junk_hit_penalty);
        assert_eq!(thresholds.junk_penalty_cap, reference.junk_penalty_cap);
    }

    #[test]
    fn test_default_cache_settings() {
        let cache = CacheSettings::default();
        assert_eq!(cache.advice_max_entries, 500);
        assert_eq!(cache.advice_ttl_secs, 600);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
