//! JIRA connection profile.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// A JIRA connection profile.
///
/// Profiles store connection details for a JIRA instance. API tokens are
/// stored separately in the OS keyring under the profile name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The JIRA instance URL.
    ///
    /// Should be a valid HTTPS URL (e.g., "https://company.atlassian.net").
    pub url: String,

    /// The account email address.
    ///
    /// Used for JIRA API authentication along with the API token.
    pub email: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, url: String, email: String) -> Self {
        Self { name, url, email }
    }

    /// Validate this profile.
    ///
    /// Checks that:
    /// - The name is non-empty and contains no whitespace
    /// - The URL is non-empty and has a valid scheme
    /// - The email is non-empty and has a plausible format
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation
    /// fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        if self.email.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': email cannot be empty",
                self.name
            )));
        }

        if !self.email.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': '{}' does not appear to be a valid email address",
                self.name, self.email
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, url: &str, email: &str) -> Profile {
        Profile::new(name.to_string(), url.to_string(), email.to_string())
    }

    #[test]
    fn test_profile_creation() {
        let profile = profile("work", "https://company.atlassian.net", "user@company.com");
        assert_eq!(profile.name, "work");
        assert_eq!(profile.url, "https://company.atlassian.net");
        assert_eq!(profile.email, "user@company.com");
    }

    #[test]
    fn test_valid_profile() {
        let profile = profile("work", "https://company.atlassian.net", "user@company.com");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let profile = profile("", "https://company.atlassian.net", "user@company.com");
        let result = profile.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let profile = profile("my work", "https://company.atlassian.net", "user@company.com");
        let result = profile.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot contain whitespace"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let profile = profile("work", "", "user@company.com");
        let result = profile.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("URL cannot be empty"));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let profile = profile("work", "company.atlassian.net", "user@company.com");
        let result = profile.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must start with http"));
    }

    #[test]
    fn test_http_url_accepted() {
        let profile = profile("local", "http://localhost:8080", "user@company.com");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_email_rejected() {
        let profile = profile("work", "https://company.atlassian.net", "");
        let result = profile.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("email cannot be empty"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let profile = profile("work", "https://company.atlassian.net", "not-an-email");
        let result = profile.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("valid email"));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = profile("work", "https://company.atlassian.net", "user@company.com");
        let toml_str = toml::to_string(&profile).unwrap();
        let parsed: Profile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, profile);
    }
}
