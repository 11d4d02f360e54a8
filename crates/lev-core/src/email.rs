use crate::error::{LevError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// A normalized (lowercased, trimmed) email address that passed the shape check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and normalize a raw email.
    ///
    /// `None` and the empty string are "required" failures. Anything else is
    /// lowercased and trimmed before the shape check, so whitespace-only input
    /// fails as invalid rather than missing.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let raw = match raw {
            Some(s) if !s.is_empty() => s,
            _ => return Err(LevError::EmailRequired),
        };

        let normalized = raw.to_lowercase().trim().to_string();
        if !email_re().is_match(&normalized) {
            return Err(LevError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    /// Extract and validate the `email` field of a request body.
    ///
    /// Any body that is not an object carrying a string `email` counts as
    /// missing the field.
    pub fn from_json(body: &serde_json::Value) -> Result<Self> {
        Self::parse(body.get("email").and_then(serde_json::Value::as_str))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
