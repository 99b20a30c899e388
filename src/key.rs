use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern compiles")
});

/// An email address accepted as a record key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailKey(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidKey {
    #[error("email is empty")]
    Empty,
    #[error("'{0}' is not a valid email address")]
    Shape(String),
}

impl EmailKey {
    pub fn parse(raw: &str) -> Result<Self, InvalidKey> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidKey::Empty);
        }
        if !EMAIL_SHAPE.is_match(trimmed) || trimmed.split('.').any(str::is_empty) {
            return Err(InvalidKey::Shape(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
