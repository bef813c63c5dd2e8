use std::env;
use std::time::Duration;

use super::error::{ConfigError, ConfigResult};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_ENHANCER_MODEL: &str = "google/gemini-2.5-flash-lite";
pub const DEFAULT_REPORT_MODELS: [&str; 3] = [
    "google/gemini-2.5-flash-lite",
    "deepseek/deepseek-chat",
    "google/gemini-2.5-flash",
];

/// Connection settings shared by every outbound chat-completion call.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    /// Sent as `HTTP-Referer`.
    pub site_url: String,
    /// `X-Title` used by the enhancer.
    pub enhancer_title: String,
    /// `X-Title` used by the report generator.
    pub generator_title: String,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        LlmConfig {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            enhancer_title: "AI Report Enhancer".to_string(),
            generator_title: "AI Report Generator".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        EnhancerConfig {
            model: DEFAULT_ENHANCER_MODEL.to_string(),
            max_tokens: 500,
            temperature: 0.6,
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Candidate models, tried in order.
    pub models: Vec<String>,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            models: DEFAULT_REPORT_MODELS.iter().map(|m| m.to_string()).collect(),
            temperature: 0.7,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub enable_compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            rate_limit_per_minute: 30,
            rate_limit_burst: 10,
            enable_compression: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub enhancer: EnhancerConfig,
    pub generator: GeneratorConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Configuration with defaults everywhere except the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        AppConfig {
            llm: LlmConfig::new(api_key),
            enhancer: EnhancerConfig::default(),
            generator: GeneratorConfig::default(),
            server: ServerConfig::default(),
        }
    }

    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("OPENROUTER_API_KEY"))?;

        let mut config = AppConfig::new(api_key);

        if let Some(base_url) = lookup("OPENROUTER_BASE_URL") {
            config.llm.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(site_url) = lookup("SITE_URL").or_else(|| lookup("NEXT_PUBLIC_SITE_URL")) {
            config.llm.site_url = site_url;
        }
        if let Some(title) = lookup("ENHANCER_APP_TITLE") {
            config.llm.enhancer_title = title;
        }
        if let Some(title) = lookup("GENERATOR_APP_TITLE") {
            config.llm.generator_title = title;
        }

        if let Some(model) = lookup("ENHANCER_MODEL") {
            config.enhancer.model = model;
        }
        if let Some(secs) = lookup("ENHANCE_TIMEOUT_SECS") {
            config.enhancer.timeout = Duration::from_secs(parse("ENHANCE_TIMEOUT_SECS", &secs)?);
        }

        if let Some(models) = lookup("REPORT_MODELS") {
            let models: Vec<String> = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
            if models.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "REPORT_MODELS",
                    reason: "at least one model is required".to_string(),
                });
            }
            config.generator.models = models;
        }
        if let Some(secs) = lookup("GENERATE_TIMEOUT_SECS") {
            config.generator.timeout = Duration::from_secs(parse("GENERATE_TIMEOUT_SECS", &secs)?);
        }

        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse("PORT", &port)?;
        }
        if let Some(limit) = lookup("RATE_LIMIT_PER_MINUTE") {
            config.server.rate_limit_per_minute = parse_non_zero("RATE_LIMIT_PER_MINUTE", &limit)?;
        }
        if let Some(burst) = lookup("RATE_LIMIT_BURST") {
            config.server.rate_limit_burst = parse_non_zero("RATE_LIMIT_BURST", &burst)?;
        }
        config.server.enable_compression = lookup("ENABLE_COMPRESSION")
            .map(|v| v.parse::<bool>().unwrap_or(true))
            .unwrap_or(true);

        Ok(config)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn parse_non_zero(key: &'static str, raw: &str) -> ConfigResult<u32> {
    match parse::<u32>(key, raw)? {
        0 => Err(ConfigError::Invalid {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn api_key_is_required() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENROUTER_API_KEY")));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.site_url, DEFAULT_SITE_URL);
        assert_eq!(config.llm.enhancer_title, "AI Report Enhancer");
        assert_eq!(config.llm.generator_title, "AI Report Generator");
        assert_eq!(config.enhancer.model, DEFAULT_ENHANCER_MODEL);
        assert_eq!(config.enhancer.timeout, Duration::from_secs(20));
        assert_eq!(config.generator.models.len(), 3);
        assert_eq!(config.generator.models[1], "deepseek/deepseek-chat");
        assert_eq!(config.generator.timeout, Duration::from_secs(120));
        assert!(config.server.enable_compression);
    }

    #[test]
    fn legacy_site_url_variable_is_accepted() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("NEXT_PUBLIC_SITE_URL", "https://reports.example.in"),
        ]))
        .unwrap();
        assert_eq!(config.llm.site_url, "https://reports.example.in");
    }

    #[test]
    fn report_models_are_split_and_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("REPORT_MODELS", " a/one , b/two,,"),
        ]))
        .unwrap();
        assert_eq!(config.generator.models, vec!["a/one", "b/two"]);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("RATE_LIMIT_BURST", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RATE_LIMIT_BURST", .. }));
    }
}
