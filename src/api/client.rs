//! JIRA user API client implementation.
//!
//! This module provides the client for the JIRA REST API v2 user resource:
//! lookup, creation and search. Every operation is a single HTTP round trip
//! plus a JSON decode; the decoded value is returned together with the
//! transport envelope. Nothing is retried or cached at this layer.

use std::time::Duration;

use reqwest::{header, Client, Method, Url};
use tracing::{debug, error, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::response::ApiResponse;
use super::types::{FindUsersOptions, User};
use crate::config::Profile;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The JIRA user API client.
///
/// Owns the base URL, the credentials and the underlying HTTP client.
/// Cloning is cheap and the client is safe to share across tasks; it keeps
/// no mutable state of its own.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a client from a profile.
    ///
    /// Retrieves the API token from the OS keyring and validates the
    /// connection before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token cannot be retrieved from the keyring
    /// - The HTTP client cannot be built
    /// - Connection validation fails
    #[instrument(skip(profile), fields(profile_name = %profile.name))]
    pub async fn new(profile: &Profile) -> Result<Self> {
        info!("Creating JIRA client for profile");

        let auth = Auth::from_keyring(&profile.name, &profile.email)?;
        let client = Self::build_http_client()?;
        let base_url = normalize_base_url(&profile.url);

        let jira = Self {
            client,
            base_url,
            auth,
        };

        jira.validate_connection().await?;

        info!("JIRA client created and connection validated");
        Ok(jira)
    }

    /// Create a client with explicit credentials.
    ///
    /// Use this for testing or when credentials are provided directly.
    /// Does NOT validate the connection.
    pub fn with_credentials(base_url: &str, email: &str, token: &str) -> Result<Self> {
        Ok(Self {
            client: Self::build_http_client()?,
            base_url: normalize_base_url(base_url),
            auth: Auth::new(email, token),
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Validate the connection by fetching the authenticated user.
    ///
    /// This verifies that the URL is reachable, the credentials are valid
    /// and the account has access to the instance.
    #[instrument(skip(self))]
    pub async fn validate_connection(&self) -> Result<User> {
        debug!("Validating JIRA connection");

        let (user, _) = self.current_user().await.map_err(|e| {
            error!("Connection validation failed: {}", e);
            match e {
                ApiError::Unauthorized(_) => e,
                ApiError::Network(_) => ApiError::ConnectionFailed(format!(
                    "cannot connect to {}: {}",
                    self.base_url, e
                )),
                _ => ApiError::ConnectionFailed(e.to_string()),
            }
        })?;

        info!("Connected as user: {}", user);
        Ok(user)
    }

    /// Get the currently authenticated user.
    ///
    /// Calls `GET /rest/api/2/myself`.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<(User, ApiResponse)> {
        let url = format!("{}/rest/api/2/myself", self.base_url);
        let response = self.execute(Method::GET, &url, None).await?;
        unpack(response)
    }

    /// Look up a user by username.
    ///
    /// Calls `GET /rest/api/2/user?username={username}`. Returns the decoded
    /// user together with the transport envelope.
    #[instrument(skip(self), fields(username = %username))]
    pub async fn get_user(&self, username: &str) -> Result<(User, ApiResponse)> {
        debug!("Fetching user");

        let url = user_url(&self.base_url, username);
        let response = self.execute(Method::GET, &url, None).await?;
        unpack(response).map_err(|e| match e {
            ApiError::NotFound { response, .. } => ApiError::NotFound {
                context: format!("user '{}' not found", username),
                response,
            },
            e => e,
        })
    }

    /// Create a user.
    ///
    /// Calls `POST /rest/api/2/user` with the user serialized as the JSON
    /// body; the password field is structurally absent from the payload. On
    /// success the raw response body is decoded into the created user.
    ///
    /// Creates a resource on the remote server; not idempotent.
    #[instrument(skip(self, user), fields(username = user.name.as_deref().unwrap_or_default()))]
    pub async fn create_user(&self, user: &User) -> Result<(User, ApiResponse)> {
        debug!("Creating user");

        let url = format!("{}/rest/api/2/user", self.base_url);
        let body = serde_json::to_vec(user).map_err(|e| {
            ApiError::InvalidRequest(format!("could not serialize user payload: {}", e))
        })?;

        let response = self.execute(Method::POST, &url, Some(body)).await?;
        let (created, response) = unpack::<User>(response)?;

        info!(user = %created, "Created user");
        Ok((created, response))
    }

    /// Search for users by username fragment.
    ///
    /// Calls `GET /rest/api/2/user/search`. When `options` is given, all
    /// five recognized parameters are appended; otherwise the server
    /// applies its own defaults. A zero-match response decodes to an empty
    /// vector. There is no pagination loop here: callers advance
    /// [`FindUsersOptions::start_at`] between calls.
    #[instrument(skip(self, options), fields(username = %username))]
    pub async fn find_users(
        &self,
        username: &str,
        options: Option<&FindUsersOptions>,
    ) -> Result<(Vec<User>, ApiResponse)> {
        debug!(has_options = options.is_some(), "Searching users");

        let url = find_users_url(&self.base_url, username, options);
        let response = self.execute(Method::GET, &url, None).await?;
        let (users, response): (Vec<User>, _) = unpack(response)?;

        debug!(count = users.len(), "Found users");
        Ok((users, response))
    }

    /// Execute a single request and drain the response into an envelope.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        debug!(%method, %url, "Sending request");

        let url = Url::parse(url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid URL '{}': {}", url, e)))?;

        let mut request = self
            .client
            .request(method, url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        ApiResponse::read(response).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Turn a drained response into a decoded value or the matching error.
fn unpack<T: serde::de::DeserializeOwned>(response: ApiResponse) -> Result<(T, ApiResponse)> {
    if !response.status().is_success() {
        return Err(error_from_response(response));
    }

    let value = response.decode()?;
    Ok((value, response))
}

/// Map a non-success response to an error, pulling remote error details
/// out of the body when they are present.
fn error_from_response(response: ApiResponse) -> ApiError {
    let context = remote_error_context(response.body()).unwrap_or_else(|| {
        response
            .status()
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    });

    debug!(status = %response.status(), "Error response");
    ApiError::from_status(&context, response)
}

/// Extract human-readable error details from a JIRA error body.
///
/// JIRA reports errors as `{"errorMessages": [...], "errors": {...}}`.
fn remote_error_context(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;

    if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
        if !messages.is_empty() {
            return Some(
                messages
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
    }

    if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
        if !errors.is_empty() {
            return Some(
                errors
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
    }

    None
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!(
            "URL does not use HTTPS: {}. This is insecure for production use.",
            url
        );
    }

    url.to_string()
}

/// Build the user lookup URL.
fn user_url(base_url: &str, username: &str) -> String {
    format!(
        "{}/rest/api/2/user?username={}",
        base_url,
        urlencoding::encode(username)
    )
}

/// Build the user search URL.
///
/// With options present, all five recognized parameters are appended. The
/// `Property` key keeps the capitalization the endpoint expects.
fn find_users_url(base_url: &str, username: &str, options: Option<&FindUsersOptions>) -> String {
    let username = urlencoding::encode(username);
    match options {
        None => format!("{}/rest/api/2/user/search?username={}", base_url, username),
        Some(options) => format!(
            "{}/rest/api/2/user/search?username={}&startAt={}&maxResults={}\
             &includeActive={}&includeInactive={}&Property={}",
            base_url,
            username,
            options.start_at,
            options.max_results,
            options.include_active,
            options.include_inactive,
            urlencoding::encode(&options.property),
        ),
    }
}
