//! Storefront configuration
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_STOREFRONT_DATA: &str =
    include_str!("../../storefront-web/static/assets/data/storefront.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u32,
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Grid geometry. Heights are in CSS pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_header_with_recommendations")]
    pub header_height_with_recommendations: u32,
    #[serde(default = "default_header_plain")]
    pub header_height_plain: u32,
    #[serde(default = "default_row_height")]
    pub product_row_height: u32,
    #[serde(default = "default_overscan")]
    pub overscan_rows: usize,
    #[serde(default = "default_initial_viewport_height")]
    pub initial_viewport_height: u32,
    /// Ordered widest first; the first entry whose `min_width` fits wins.
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<Breakpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    pub columns: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            max_page_size: default_max_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            recommendation_count: default_recommendation_count(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height_with_recommendations: default_header_with_recommendations(),
            header_height_plain: default_header_plain(),
            product_row_height: default_row_height(),
            overscan_rows: default_overscan(),
            initial_viewport_height: default_initial_viewport_height(),
            breakpoints: default_breakpoints(),
        }
    }
}

impl StorefrontConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or describes an unusable layout.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        config.layout.breakpoints.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        Ok(config)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_STOREFRONT_DATA).unwrap_or_else(|err| {
            log::warn!("falling back to built-in storefront config: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Validate cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ConfigError::Invalid("page sizes must be positive"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid("default page size exceeds maximum"));
        }
        if self.layout.product_row_height == 0 {
            return Err(ConfigError::Invalid("product row height must be positive"));
        }
        if self.layout.breakpoints.is_empty() {
            return Err(ConfigError::Invalid("breakpoint table is empty"));
        }
        if self.layout.breakpoints.iter().any(|b| b.columns == 0) {
            return Err(ConfigError::Invalid("breakpoint column count must be positive"));
        }
        Ok(())
    }

    /// Clamp a requested page size into `1..=max_page_size`.
    #[must_use]
    pub fn clamp_page_size(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_page_size.max(1))
    }
}

fn default_endpoint() -> String {
    "http://localhost:3001/api/products".to_string()
}

fn default_page_size() -> usize {
    50
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 20, 50, 100]
}

fn default_max_page_size() -> usize {
    200
}

fn default_search_debounce_ms() -> u32 {
    500
}

fn default_recommendation_count() -> usize {
    4
}

fn default_header_with_recommendations() -> u32 {
    760
}

fn default_header_plain() -> u32 {
    240
}

fn default_row_height() -> u32 {
    480
}

fn default_overscan() -> usize {
    2
}

fn default_initial_viewport_height() -> u32 {
    800
}

fn default_breakpoints() -> Vec<Breakpoint> {
    [(1600, 6), (1200, 4), (992, 3), (768, 2), (576, 2), (0, 1)]
        .into_iter()
        .map(|(min_width, columns)| Breakpoint { min_width, columns })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_config_matches_defaults() {
        let config = StorefrontConfig::load_from_static();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.recommendation_count, 4);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = StorefrontConfig::from_json("{}").unwrap();
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.layout.breakpoints.len(), 6);
    }

    #[test]
    fn breakpoints_are_sorted_widest_first() {
        let config = StorefrontConfig::from_json(
            r#"{"layout":{"breakpoints":[{"min_width":0,"columns":1},{"min_width":900,"columns":3}]}}"#,
        )
        .unwrap();
        assert_eq!(config.layout.breakpoints[0].min_width, 900);
    }

    #[test]
    fn rejects_unusable_layouts() {
        let err = StorefrontConfig::from_json(r#"{"layout":{"breakpoints":[]}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = StorefrontConfig::from_json(r#"{"default_page_size":0}"#).unwrap_err();
        assert!(err.to_string().contains("positive"));
        assert!(matches!(
            StorefrontConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn page_size_clamps_into_bounds() {
        let config = StorefrontConfig::default();
        assert_eq!(config.clamp_page_size(0), 1);
        assert_eq!(config.clamp_page_size(20), 20);
        assert_eq!(config.clamp_page_size(10_000), 200);
    }
}
