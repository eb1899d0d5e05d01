//! Environment-driven configuration for the assistant backend.

use crate::ai::{ChatError, ChatResult};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Upper bound on a single assistant call made by a chat session.
    pub timeout: Duration,
}

impl AssistantConfig {
    /// Read configuration from the process environment.
    ///
    /// `GEMINI_API_KEY` (or `API_KEY`) is required. `GEMINI_MODEL`,
    /// `GEMINI_ENDPOINT` and `ASSISTANT_TIMEOUT_SECS` are optional.
    pub fn from_env() -> ChatResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ChatResult<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or_else(|| {
                ChatError::Config(
                    "No assistant configured. Set GEMINI_API_KEY (or API_KEY).".to_string(),
                )
            })?;
        let model = non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = non_empty("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout = non_empty("ASSISTANT_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            endpoint,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = AssistantConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn falls_back_to_api_key() {
        let config = AssistantConfig::from_lookup(lookup(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.api_key, "legacy");
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = AssistantConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn reads_overrides() {
        let config = AssistantConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("ASSISTANT_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn bad_timeout_uses_default() {
        let config = AssistantConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("ASSISTANT_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
