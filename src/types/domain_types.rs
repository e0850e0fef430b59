// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// API credential for the completion provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.trim().is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        // The key travels in an Authorization header
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace or control characters".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(6).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Name of the completion model, e.g. `gpt-4o`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ValidationError::InvalidModelName {
                name,
                reason: "Model name cannot be empty".to_string(),
            });
        }

        if name.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidModelName {
                name,
                reason: "Model name cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The tone the generated copy should adopt ("Excited", "Funny", ...).
///
/// Free-form: any non-blank tone is passed through to the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vibe(String);

impl Vibe {
    pub fn new(vibe: impl Into<String>) -> Result<Self, ValidationError> {
        let vibe = vibe.into();
        let trimmed = vibe.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField("vibe"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base URL of an upstream service: absolute, `http` or `https`, with a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason,
        };

        let parsed = Url::parse(url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(invalid("a base URL needs a host".to_string()));
        }
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ValidatedUrl {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ValidatedUrl> for String {
    fn from(url: ValidatedUrl) -> Self {
        url.0.into()
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("sk-proj-abcdefghijklmnop").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("sk-abc def").is_err());
        assert!(ApiKey::new("sk-abc\n").is_err());
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("sk-proj-abcdefghijklmnop").unwrap();
        assert_eq!(key.to_string(), "sk-pro...");
        assert!(!format!("{:?}", key).contains("abcdefghijklmnop"));
    }

    #[test]
    fn test_model_name_validation() {
        assert!(ModelName::new("gpt-4o").is_ok());
        assert!(ModelName::new("gpt-3.5-turbo-0125").is_ok());
        assert!(ModelName::new("").is_err());
        assert!(ModelName::new("gpt 4o").is_err());
    }

    #[test]
    fn test_vibe_is_trimmed_and_required() {
        assert_eq!(Vibe::new("  Funny ").unwrap().as_str(), "Funny");
        assert_eq!(Vibe::new("Chaotic good").unwrap().as_str(), "Chaotic good");
        assert_eq!(
            Vibe::new("   ").unwrap_err(),
            ValidationError::MissingField("vibe")
        );
    }

    #[test]
    fn test_url_validation() {
        assert!(ValidatedUrl::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
        assert!(ValidatedUrl::parse("http://localhost:8080").is_ok());
        assert!(ValidatedUrl::parse("ftp://example.com").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
        assert!(matches!(
            ValidatedUrl::parse("ftp://example.com"),
            Err(ValidationError::InvalidUrl { reason, .. }) if reason == "unsupported scheme ftp"
        ));
        let url: ValidatedUrl = serde_json::from_str("\"https://api.openai.com/v1\"").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1");
        assert!(serde_json::from_str::<ValidatedUrl>("\"mailto:a@b.c\"").is_err());
    }
}
