use sheltie_core::contract::{DEFAULT_IMAGE_BUCKET, DEFAULT_MAX_LABELS, DEFAULT_OBJECT_KEY};
use sheltie_core::storage_keys::{ObjectKeyStrategy, UnknownKeyStrategy};
use thiserror::Error;

pub const BUCKET_ENV: &str = "SHELTIE_IMAGE_BUCKET";
pub const OBJECT_KEY_ENV: &str = "SHELTIE_OBJECT_KEY";
pub const KEY_STRATEGY_ENV: &str = "SHELTIE_KEY_STRATEGY";
pub const MAX_LABELS_ENV: &str = "SHELTIE_MAX_LABELS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub bucket: String,
    pub object_key: String,
    pub key_strategy: ObjectKeyStrategy,
    pub max_labels: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SHELTIE_KEY_STRATEGY: {0}")]
    KeyStrategy(#[from] UnknownKeyStrategy),
    #[error("SHELTIE_MAX_LABELS must be a positive integer, got `{0}`")]
    MaxLabels(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_IMAGE_BUCKET.to_string(),
            object_key: DEFAULT_OBJECT_KEY.to_string(),
            key_strategy: ObjectKeyStrategy::Fixed,
            max_labels: DEFAULT_MAX_LABELS,
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset variables fall back to the defaults; set but invalid ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bucket = non_empty(lookup(BUCKET_ENV), BUCKET_ENV)?.unwrap_or(defaults.bucket);
        let object_key =
            non_empty(lookup(OBJECT_KEY_ENV), OBJECT_KEY_ENV)?.unwrap_or(defaults.object_key);
        // Upload keys are built from the key with its slashes trimmed.
        if object_key.trim().trim_matches('/').is_empty() {
            return Err(ConfigError::Empty(OBJECT_KEY_ENV));
        }

        let key_strategy = match lookup(KEY_STRATEGY_ENV) {
            Some(value) => value.parse::<ObjectKeyStrategy>()?,
            None => defaults.key_strategy,
        };

        let max_labels = match lookup(MAX_LABELS_ENV) {
            Some(value) => match value.trim().parse::<i32>() {
                Ok(parsed) if parsed > 0 => parsed,
                _ => return Err(ConfigError::MaxLabels(value)),
            },
            None => defaults.max_labels,
        };

        Ok(Self {
            bucket,
            object_key,
            key_strategy,
            max_labels,
        })
    }
}

fn non_empty(value: Option<String>, name: &'static str) -> Result<Option<String>, ConfigError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ConfigError::Empty(name)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn defaults_match_historical_constants() {
        let config = HandlerConfig::from_lookup(lookup_from(&[])).expect("defaults should load");

        assert_eq!(config.bucket, "sheltie_image_comparison_bucket");
        assert_eq!(config.object_key, "uploaded_sheltie_image.jpg");
        assert_eq!(config.key_strategy, ObjectKeyStrategy::Fixed);
        assert_eq!(config.max_labels, 10);
    }

    #[test]
    fn reads_overrides() {
        let config = HandlerConfig::from_lookup(lookup_from(&[
            (BUCKET_ENV, "dogs"),
            (OBJECT_KEY_ENV, "upload.png"),
            (KEY_STRATEGY_ENV, "per_request"),
            (MAX_LABELS_ENV, "25"),
        ]))
        .expect("overrides should load");

        assert_eq!(config.bucket, "dogs");
        assert_eq!(config.object_key, "upload.png");
        assert_eq!(config.key_strategy, ObjectKeyStrategy::PerRequest);
        assert_eq!(config.max_labels, 25);
    }

    #[test]
    fn rejects_unknown_key_strategy() {
        let error = HandlerConfig::from_lookup(lookup_from(&[(KEY_STRATEGY_ENV, "random")]))
            .expect_err("unknown strategy should fail");
        assert!(error.to_string().contains("SHELTIE_KEY_STRATEGY"));
    }

    #[test]
    fn rejects_non_positive_max_labels() {
        for value in ["0", "-3", "ten"] {
            let error = HandlerConfig::from_lookup(lookup_from(&[(MAX_LABELS_ENV, value)]))
                .expect_err("invalid max labels should fail");
            assert_eq!(error, ConfigError::MaxLabels(value.to_string()));
        }
    }

    #[test]
    fn rejects_object_key_made_of_slashes() {
        for value in ["/", "//", " / "] {
            let error = HandlerConfig::from_lookup(lookup_from(&[(OBJECT_KEY_ENV, value)]))
                .expect_err("slash-only key should fail");
            assert_eq!(error, ConfigError::Empty(OBJECT_KEY_ENV));
        }
    }

    #[test]
    fn rejects_blank_bucket() {
        let error = HandlerConfig::from_lookup(lookup_from(&[(BUCKET_ENV, "  ")]))
            .expect_err("blank bucket should fail");
        assert_eq!(error, ConfigError::Empty(BUCKET_ENV));
    }
}
