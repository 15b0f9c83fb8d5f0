//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Application-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// The name of the profile used when none is given on the command line.
    pub default_profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_profile() {
        assert!(Settings::default().default_profile.is_none());
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings {
            default_profile: Some("work".to_string()),
        };

        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }
}
