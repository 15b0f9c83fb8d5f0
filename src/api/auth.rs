//! Authentication handling for the JIRA API.
//!
//! JIRA Cloud uses Basic auth with an email address and an API token. The
//! token itself is kept in the OS keyring; in memory only the encoded
//! `Authorization` header value is retained.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::{ApiError, Result};

/// The keyring service name under which API tokens are stored.
const KEYRING_SERVICE: &str = "jira-users";

/// Authentication credentials for a JIRA instance.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The account email address.
    email: String,
    /// The precomputed "Basic ..." authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from an email and an API token.
    ///
    /// The token is encoded immediately; the raw token is not stored.
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            auth_header: build_auth_header(email, token),
        }
    }

    /// Create credentials for a named profile, pulling the API token from
    /// the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Keyring`] if no token is stored for the profile
    /// or the keyring cannot be accessed.
    pub fn from_keyring(profile_name: &str, email: &str) -> Result<Self> {
        let token = get_token(profile_name)?;
        Ok(Self::new(email, &token))
    }

    /// The complete `Authorization` header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The account email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Encode "email:token" as a Basic auth header value.
fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}

/// Store an API token in the OS keyring for a profile.
///
/// # Errors
///
/// Returns [`ApiError::Keyring`] if the keyring rejects the entry.
pub fn store_token(profile_name: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve the API token stored for a profile.
///
/// # Errors
///
/// Returns [`ApiError::Keyring`] if no token is stored or the keyring
/// cannot be read.
pub fn get_token(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete the API token stored for a profile.
///
/// # Errors
///
/// Returns [`ApiError::Keyring`] if the entry cannot be removed.
pub fn delete_token(profile_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))?;

    Ok(())
}

/// Whether a token is stored for the given profile.
pub fn has_token(profile_name: &str) -> bool {
    get_token(profile_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_auth_header() {
        let header = build_auth_header("user@example.com", "api_token_here");
        assert!(header.starts_with("Basic "));

        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            "user@example.com:api_token_here"
        );
    }

    #[test]
    fn test_auth_new() {
        let auth = Auth::new("user@example.com", "secret_token");
        assert_eq!(auth.email(), "user@example.com");
        assert!(auth.header_value().starts_with("Basic "));
    }

    #[test]
    fn test_auth_does_not_expose_token() {
        let auth = Auth::new("user@example.com", "secret_token");
        let debug_output = format!("{:?}", auth);
        assert!(!debug_output.contains("secret_token"));
    }
}
