//! JIRA user API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST
//! API v2 user resource.

pub mod auth;
mod client;
pub mod error;
mod response;
mod types;

pub use auth::Auth;
pub use client::JiraClient;
pub use error::ApiError;
pub use response::ApiResponse;
pub use types::{AvatarUrls, FindUsersOptions, User};
