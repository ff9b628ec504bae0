//! Runtime Configuration
//!
//! Read once at start-up from a JSON `<script id="app-config">` block in
//! `index.html`. Every field has a default, so the block is optional.

use serde::{Deserialize, Serialize};

/// Id of the element holding the JSON config
pub const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for `/api/...` paths; empty means same origin
    pub api_base: String,
    /// Page size for paged tables
    pub page_size: u32,
    /// Lifetime of success/error toasts
    pub toast_ms: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: option_env!("MALL_ADMIN_API_BASE").unwrap_or_default().to_string(),
            page_size: 20,
            toast_ms: 3000,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("page_size must be positive")]
    ZeroPageSize,
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text)?;
        if config.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(config)
    }

    /// Config from the page, or defaults when the page has none
    pub fn load() -> Result<Self, ConfigError> {
        match embedded_config() {
            Some(text) if !text.trim().is_empty() => Self::from_json(&text),
            _ => Ok(Self::default()),
        }
    }
}

fn embedded_config() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(CONFIG_ELEMENT_ID)?.text_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"api_base": "http://127.0.0.1:8080"}"#).unwrap();

        assert_eq!(config.api_base, "http://127.0.0.1:8080");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.toast_ms, 3000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert!(matches!(
            AppConfig::from_json(r#"{"page_size": 0}"#),
            Err(ConfigError::ZeroPageSize)
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = AppConfig::from_json("{page_size: 10").unwrap_err();
        assert!(err.to_string().starts_with("invalid config JSON"));
    }
}
