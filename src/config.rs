//! Configuration types.

use crate::error::ConfigError;

/// Env var overriding how many confirmed tasks the dispatch card renders.
pub const CARD_ITEMS_ENV: &str = "MEETING_ASSIST_CARD_ITEMS";

/// Env var overriding the prefix of generated meeting ids.
pub const ID_PREFIX_ENV: &str = "MEETING_ASSIST_ID_PREFIX";

/// Extractor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Maximum number of confirmed tasks rendered as dispatch card items.
    pub card_item_limit: usize,
    /// Prefix for meeting ids generated when the caller supplies none.
    pub meeting_id_prefix: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            card_item_limit: 8,
            meeting_id_prefix: "meeting".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Build a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CARD_ITEMS_ENV) {
            let limit: usize = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: CARD_ITEMS_ENV.to_string(),
                message: format!("{raw:?} is not a number ({e})"),
            })?;
            if limit == 0 {
                return Err(ConfigError::InvalidValue {
                    key: CARD_ITEMS_ENV.to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            config.card_item_limit = limit;
        }

        if let Some(prefix) = lookup(ID_PREFIX_ENV) {
            let prefix = prefix.trim();
            if !prefix.is_empty() {
                config.meeting_id_prefix = prefix.to_string();
            }
        }

        Ok(config)
    }
}
