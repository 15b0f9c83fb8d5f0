//! Centralized error types for the CLI.
//!
//! Aggregates the API and configuration error hierarchies behind
//! user-friendly messages, using `thiserror` throughout.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// Aggregates everything that can fail in the CLI while preserving the
/// underlying error for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, stdin, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// A message suitable for showing to users, without technical jargon.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => {
                    format!("Profile '{}' not found.", name)
                }
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized(_) => {
                    "Authentication failed. Please check your email and API token.".to_string()
                }
                ApiError::Forbidden(_) => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                ApiError::NotFound { context, .. } => format!("{}.", capitalize(context)),
                ApiError::RateLimited(_) => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError { .. } => {
                    "JIRA server error. Please try again later.".to_string()
                }
                ApiError::UnexpectedStatus { .. } => {
                    "Unexpected response from JIRA. Please try again.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::ReadBody(_) => {
                    "The JIRA response could not be read. Please try again.".to_string()
                }
                ApiError::Decode { .. } => {
                    "Unexpected response from JIRA. Please try again.".to_string()
                }
                ApiError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
                ApiError::Keyring(_) => {
                    "Could not access secure storage. Please run 'jira-users login' again."
                        .to_string()
                }
                ApiError::ConnectionFailed(_) => {
                    "Could not connect to JIRA. Please check your URL and network.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// A suggested next step for the user, when one exists.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::NoConfigDir)
            | AppError::Config(ConfigError::ReadError(_)) => {
                Some("Run 'jira-users profile add' to create a configuration.")
            }
            AppError::Api(ApiError::Unauthorized(_)) => {
                Some("Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens")
            }
            AppError::Api(ApiError::Keyring(_)) => {
                Some("Run 'jira-users login' to store an API token for this profile.")
            }
            AppError::Api(ApiError::RateLimited(_)) => Some("Wait a few seconds and try again."),
            AppError::Api(ApiError::Network(_))
            | AppError::Api(ApiError::ConnectionFailed(_)) => {
                Some("Check your internet connection and JIRA URL.")
            }
            _ => None,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;

    fn not_found(context: &str) -> ApiError {
        ApiError::from_status(
            context,
            ApiResponse::from_parts(
                reqwest::StatusCode::NOT_FOUND,
                reqwest::header::HeaderMap::new(),
                Vec::new(),
            ),
        )
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::Keyring("locked".to_string()).into();
        assert!(matches!(app_err, AppError::Api(ApiError::Keyring(_))));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(not_found("user 'fred' not found"));
        assert_eq!(err.user_message(), "User 'fred' not found.");
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "duplicate profile".to_string(),
        ));
        assert!(err.user_message().contains("duplicate profile"));
    }

    #[test]
    fn test_user_message_invalid_request() {
        let err = AppError::Api(ApiError::InvalidRequest("invalid URL".to_string()));
        assert!(err.user_message().contains("invalid URL"));
    }

    #[test]
    fn test_suggested_action_keyring() {
        let err = AppError::Api(ApiError::Keyring("no entry".to_string()));
        assert!(err.suggested_action().unwrap().contains("login"));
    }

    #[test]
    fn test_suggested_action_connection_failed() {
        let err = AppError::Api(ApiError::ConnectionFailed("unreachable".to_string()));
        assert!(err.suggested_action().unwrap().contains("connection"));
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.user_message(), "something went wrong");
    }
}
