//! Upstream endpoint configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_URL: &str = "https://api.exchangerate-api.com/v4/latest";
pub const DEFAULT_SECONDARY_URL: &str = "https://api.fxratesapi.com/latest";

/// Base URLs of the two "latest rates" endpoints.
///
/// The primary endpoint takes the base currency as a path segment, the
/// secondary as a `base` query parameter. Missing fields in a config file
/// fall back to the public defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub primary: String,
    pub secondary: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_URL.to_string(),
            secondary: DEFAULT_SECONDARY_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
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
    fn partial_json_keeps_defaults() {
        let endpoints = Endpoints::from_json(r#"{"primary":"http://localhost:3000/v4/latest"}"#).unwrap();
        assert_eq!(endpoints.primary, "http://localhost:3000/v4/latest");
        assert_eq!(endpoints.secondary, DEFAULT_SECONDARY_URL);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Endpoints::from_json("{}").unwrap(), Endpoints::default());
    }
}
