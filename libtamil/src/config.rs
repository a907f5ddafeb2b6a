//! Tamil-specific configuration that extends the base `Config` from core.
//!
//! All generic options (prediction policy, limits, debounce delay) come
//! from `libindic_core::Config`, flattened via serde; this struct adds the
//! scheme selection and Tamil-side toggles.

use crate::translator::Scheme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TamilConfig {
    /// Base configuration fields (policy, limits, debounce, learning).
    #[serde(flatten)]
    pub base: libindic_core::Config,

    /// Active input scheme.
    pub scheme: Scheme,

    /// Offer emoji candidates when the dictionary carries them.
    pub emoji_suggestions: bool,
}

impl Default for TamilConfig {
    fn default() -> Self {
        Self {
            base: libindic_core::Config::default(),
            scheme: Scheme::default(),
            emoji_suggestions: true,
        }
    }
}

impl TamilConfig {
    pub fn with_scheme(scheme: Scheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Convert into the base config for core construction.
    pub fn into_base(self) -> libindic_core::Config {
        self.base
    }

    pub fn base(&self) -> &libindic_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut libindic_core::Config {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_is_tamil99() {
        let config = TamilConfig::default();
        assert_eq!(config.scheme, Scheme::Tamil99);
    }

    #[test]
    fn toml_round_trip_with_flattened_base() {
        let mut config = TamilConfig::with_scheme(Scheme::Anjal);
        config.base.max_candidates = 4;

        let text = toml::to_string(&config).expect("serialize");
        let back: TamilConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back.scheme, Scheme::Anjal);
        assert_eq!(back.base.max_candidates, 4);
    }
}
