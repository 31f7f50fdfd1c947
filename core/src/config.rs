//! Client-wide defaults applied to every request.

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// Base URL and headers held by one `HttpHelper`.
///
/// Deserializable so callers can keep defaults in a JSON file:
///
/// ```json
/// { "base_url": "https://api.example.com", "headers": { "Accept": "application/json" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub headers: Headers,
}

impl ClientConfig {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(str::to_string),
            headers: Headers::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_full_config() {
        let config = ClientConfig::from_json(
            r#"{"base_url":"https://api.example.com","headers":{"Accept":"application/json"}}"#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.headers.get("Accept"), Some("application/json"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn rejects_non_string_header_values() {
        assert!(ClientConfig::from_json(r#"{"headers":{"X-Count":3}}"#).is_err());
    }
}
