//! A typed client for the JIRA user REST API.
//!
//! This crate wraps the JIRA REST API v2 user resource: lookup, creation
//! and search. Every operation maps one function call to a single HTTP
//! round trip and returns the decoded value together with the transport
//! envelope. Authentication, base URL handling and configuration profiles
//! are managed here; retry, rate limiting and caching are deliberately not.
//!
//! # Example
//!
//! ```no_run
//! use jira_users::{FindUsersOptions, JiraClient};
//!
//! # async fn example() -> jira_users::Result<()> {
//! let client = JiraClient::with_credentials(
//!     "https://company.atlassian.net",
//!     "admin@company.com",
//!     "api-token",
//! )?;
//!
//! let (user, _) = client.get_user("fred").await?;
//! println!("{} <{}>", user, user.email_address.as_deref().unwrap_or("-"));
//!
//! let options = FindUsersOptions {
//!     max_results: 10,
//!     include_active: true,
//!     ..FindUsersOptions::default()
//! };
//! let (users, _) = client.find_users("fred", Some(&options)).await?;
//! println!("{} matches", users.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

pub use api::{ApiError, ApiResponse, Auth, AvatarUrls, FindUsersOptions, JiraClient, User};
pub use config::{Config, ConfigError, Profile, Settings};
pub use error::{AppError, Result};
