//! Error types for the sandbox.
//!
//! The physics core itself cannot fail: degenerate geometry is skipped rather
//! than reported. Errors only arise at the configuration boundary, when a host
//! hands over a patch or a preset name.

use std::fmt;

/// Errors that can occur while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A config patch was not valid JSON or had the wrong shape.
    Json(serde_json::Error),
    /// No preset with the given name exists.
    UnknownPreset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Failed to parse config patch: {}", e),
            ConfigError::UnknownPreset(name) => write!(f, "Unknown preset: {:?}", name),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::UnknownPreset(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_preset_message() {
        let e = ConfigError::UnknownPreset("Nebula".into());
        assert!(e.to_string().contains("Nebula"));
        assert!(e.source().is_none());
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e = ConfigError::from(json_err);
        assert!(e.source().is_some());
    }
}
