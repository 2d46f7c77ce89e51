//! Remote text-generation configuration and its resolver

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model addressed when none (or a blank one) is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible chat completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Text-generation backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Whether remote generation is permitted at all
    #[serde(default)]
    pub use_remote: bool,

    /// Bearer credential; empty means the backend is unusable
    #[serde(default)]
    pub api_key: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat completions URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_timeout_ms() -> u64 { 10_000 }

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            use_remote: false,
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl IntelligenceConfig {
    /// Configuration that always takes the offline path
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Configuration with remote generation enabled for the given credential
    pub fn remote(api_key: impl Into<String>) -> Self {
        Self {
            use_remote: true,
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Reads `USE_OPENAI`, `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_API_URL`
    /// and `OPENAI_TIMEOUT_MS`. Never fails: missing or unparsable values
    /// leave the disabled defaults in place.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.use_remote = is_truthy(lookup("USE_OPENAI").as_deref());

        if let Some(key) = lookup("OPENAI_API_KEY") {
            config.api_key = key.trim().to_string();
        }

        if let Some(model) = lookup("OPENAI_MODEL") {
            let model = model.trim();
            if !model.is_empty() {
                config.model = model.to_string();
            }
        }

        if let Some(url) = lookup("OPENAI_API_URL") {
            let url = url.trim();
            if !url.is_empty() {
                config.endpoint = url.to_string();
            }
        }

        if let Some(val) = lookup("OPENAI_TIMEOUT_MS") {
            if let Ok(ms) = val.trim().parse() {
                config.timeout_ms = ms;
            }
        }

        config
    }

    /// Remote generation is usable only when enabled and a credential is present
    pub fn is_usable(&self) -> bool {
        self.use_remote && !self.api_key.is_empty()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Parse a flag value; only `1`, `true`, `yes` and `on` (any case) are truthy
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Resolves the configuration an engine call should use.
///
/// The first parameterless resolution reads the environment and the result
/// is kept for the lifetime of the resolver. An explicit configuration passed
/// to [`ConfigResolver::resolve_with`] wins for that call and is not stored.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    cached: OnceCell<IntelligenceConfig>,
}

impl ConfigResolver {
    /// Resolver that reads the environment on first use
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Resolver pre-seeded with a configuration built at startup
    pub fn with_config(config: IntelligenceConfig) -> Self {
        Self {
            cached: OnceCell::with_value(config),
        }
    }

    /// Get the cached configuration, resolving it on first call
    pub fn resolve(&self) -> &IntelligenceConfig {
        self.cached.get_or_init(IntelligenceConfig::from_env)
    }

    /// Prefer an explicit per-call configuration over the cached one
    pub fn resolve_with<'a>(&'a self, explicit: Option<&'a IntelligenceConfig>) -> &'a IntelligenceConfig {
        match explicit {
            Some(config) => config,
            None => self.resolve(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = IntelligenceConfig::default();
        assert!(!config.use_remote);
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.is_usable());
    }

    #[test]
    fn test_truthy_tokens() {
        for value in ["1", "true", "TRUE", "Yes", " on ", "oN"] {
            assert!(is_truthy(Some(value)), "{value} should be truthy");
        }
        for value in ["0", "false", "no", "off", "enabled", "", "2"] {
            assert!(!is_truthy(Some(value)), "{value} should be falsy");
        }
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_from_lookup_enabled() {
        let config = IntelligenceConfig::from_lookup(lookup_from(&[
            ("USE_OPENAI", "yes"),
            ("OPENAI_API_KEY", "  sk-test  "),
            ("OPENAI_MODEL", "gpt-4.1-nano"),
            ("OPENAI_TIMEOUT_MS", "2500"),
        ]));

        assert!(config.use_remote);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4.1-nano");
        assert_eq!(config.timeout_ms, 2500);
        assert!(config.is_usable());
    }

    #[test]
    fn test_blank_model_uses_default() {
        let config = IntelligenceConfig::from_lookup(lookup_from(&[("OPENAI_MODEL", "   ")]));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_enabled_without_key_is_unusable() {
        let config = IntelligenceConfig::from_lookup(lookup_from(&[("USE_OPENAI", "true")]));
        assert!(config.use_remote);
        assert!(!config.is_usable());

        let config = IntelligenceConfig::from_lookup(lookup_from(&[
            ("USE_OPENAI", "true"),
            ("OPENAI_API_KEY", "   "),
        ]));
        assert!(!config.is_usable());
    }

    #[test]
    fn test_key_without_flag_is_unusable() {
        let config = IntelligenceConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")]));
        assert!(!config.is_usable());
    }

    #[test]
    fn test_bad_timeout_keeps_default() {
        let config = IntelligenceConfig::from_lookup(lookup_from(&[("OPENAI_TIMEOUT_MS", "soon")]));
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_resolver_override_not_cached() {
        let resolver = ConfigResolver::with_config(IntelligenceConfig::disabled());
        let explicit = IntelligenceConfig::remote("sk-override");

        assert!(resolver.resolve_with(Some(&explicit)).is_usable());
        assert!(!resolver.resolve_with(None).is_usable());
        assert_eq!(resolver.resolve(), &IntelligenceConfig::disabled());
    }

    #[test]
    fn test_resolver_memoizes() {
        let resolver = ConfigResolver::from_env();
        let first = resolver.resolve() as *const IntelligenceConfig;
        let second = resolver.resolve() as *const IntelligenceConfig;
        assert_eq!(first, second);
    }
}
