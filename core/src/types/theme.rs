use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Colour scheme preference. Only stored and round-tripped by the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Classic,
}

impl Theme {
    /// Case-insensitive lookup; anything unrecognised falls back to `System`.
    pub fn coerce(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "classic" => Theme::Classic,
            _ => Theme::System,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Classic => "classic",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads a theme exactly as written on disk: only the strings `"system"` and
/// `"classic"` are recognised, every other value (of any JSON type) is `System`.
impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("classic") => Theme::Classic,
            _ => Theme::System,
        })
    }
}
