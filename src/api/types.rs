//! JIRA user API request and response types.
//!
//! These types model the JIRA REST API v2 user resource. Field names and
//! shapes are dictated by the remote service; no invariants are enforced
//! locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A JIRA user account.
///
/// Returned by `GET /rest/api/2/user` and accepted by
/// `POST /rest/api/2/user`. All validity rules live on the remote side.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// URL of the user resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Write-only password, accepted when creating a user.
    ///
    /// Never serialized, in either direction, and redacted from `Debug`
    /// output.
    #[serde(skip)]
    pub password: Option<String>,
    /// The user key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// The user's email address (may be hidden by the server).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// URLs for the user's avatar images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_urls: Option<AvatarUrls>,
    /// The user's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub active: bool,
    /// The user's timezone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Application keys granted to the account.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application_keys: Vec<String>,
}

fn default_true() -> bool {
    true
}

// Accounts are active unless the server says otherwise, so the hand-built
// default matches the decode default.
impl Default for User {
    fn default() -> Self {
        Self {
            self_url: None,
            name: None,
            password: None,
            key: None,
            email_address: None,
            avatar_urls: None,
            display_name: None,
            active: true,
            time_zone: None,
            application_keys: Vec::new(),
        }
    }
}

impl User {
    /// The best human-readable name available for this user.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unknown>")
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Manual Debug so a password set for creation cannot leak into logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("self_url", &self.self_url)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("key", &self.key)
            .field("email_address", &self.email_address)
            .field("avatar_urls", &self.avatar_urls)
            .field("display_name", &self.display_name)
            .field("active", &self.active)
            .field("time_zone", &self.time_zone)
            .field("application_keys", &self.application_keys)
            .finish()
    }
}

/// Avatar URLs for a user, keyed by pixel size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarUrls {
    /// 48x48 pixel avatar.
    #[serde(rename = "48x48", default, skip_serializing_if = "Option::is_none")]
    pub size_48: Option<String>,
    /// 32x32 pixel avatar.
    #[serde(rename = "32x32", default, skip_serializing_if = "Option::is_none")]
    pub size_32: Option<String>,
    /// 24x24 pixel avatar.
    #[serde(rename = "24x24", default, skip_serializing_if = "Option::is_none")]
    pub size_24: Option<String>,
    /// 16x16 pixel avatar.
    #[serde(rename = "16x16", default, skip_serializing_if = "Option::is_none")]
    pub size_16: Option<String>,
}

/// Optional parameters for [`find_users`](super::JiraClient::find_users).
///
/// When no options are passed the request carries only the username and the
/// server applies its own defaults. When options are passed, all five
/// parameters are sent exactly as set here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindUsersOptions {
    /// Index of the first user to return. Base index: 0.
    pub start_at: u32,
    /// Maximum number of users to return per page. Server default: 50.
    pub max_results: u32,
    /// Include active users in the results. Server default: true.
    pub include_active: bool,
    /// Include inactive users in the results. Server default: false.
    pub include_inactive: bool,
    /// Property-search query string.
    ///
    /// The property key cannot contain a dot or an equals sign. For a
    /// property value `{"something":{"nested":1}}` you can search
    /// `propertyKey.something.nested=1`.
    pub property: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_user() {
        let json = r#"{
            "self": "https://company.atlassian.net/rest/api/2/user?username=fred",
            "name": "fred",
            "key": "fred",
            "emailAddress": "fred@example.com",
            "avatarUrls": {
                "48x48": "https://company.atlassian.net/secure/useravatar?size=large&ownerId=fred",
                "24x24": "https://company.atlassian.net/secure/useravatar?size=small&ownerId=fred"
            },
            "displayName": "Fred F. User",
            "active": true,
            "timeZone": "Australia/Sydney",
            "applicationKeys": ["jira-core"]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name.as_deref(), Some("fred"));
        assert_eq!(user.key.as_deref(), Some("fred"));
        assert_eq!(user.email_address.as_deref(), Some("fred@example.com"));
        assert_eq!(user.display_name.as_deref(), Some("Fred F. User"));
        assert!(user.active);
        assert_eq!(user.time_zone.as_deref(), Some("Australia/Sydney"));
        assert_eq!(user.application_keys, vec!["jira-core"]);

        let avatars = user.avatar_urls.unwrap();
        assert!(avatars.size_48.unwrap().contains("size=large"));
        assert!(avatars.size_24.unwrap().contains("size=small"));
        assert!(avatars.size_32.is_none());
    }

    #[test]
    fn test_parse_minimal_user() {
        let user: User = serde_json::from_str(r#"{"name": "fred"}"#).unwrap();
        assert_eq!(user.name.as_deref(), Some("fred"));
        assert!(user.self_url.is_none());
        assert!(user.email_address.is_none());
        assert!(user.application_keys.is_empty());
    }

    #[test]
    fn test_active_defaults_to_true() {
        let user: User = serde_json::from_str(r#"{"name": "fred"}"#).unwrap();
        assert!(user.active);
        assert!(User::default().active);
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User {
            name: Some("fred".to_string()),
            password: Some("hunter2".to_string()),
            ..User::default()
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_password_ignored_on_deserialize() {
        // A server echoing a password field back must not populate ours.
        let user: User =
            serde_json::from_str(r#"{"name": "fred", "password": "hunter2"}"#).unwrap();
        assert!(user.password.is_none());
    }

    #[test]
    fn test_none_fields_omitted_from_body() {
        let user = User {
            name: Some("fred".to_string()),
            email_address: Some("fred@example.com".to_string()),
            ..User::default()
        };

        let value = serde_json::to_value(&user).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("emailAddress"));
        assert!(!obj.contains_key("self"));
        assert!(!obj.contains_key("key"));
        assert!(!obj.contains_key("displayName"));
        assert!(!obj.contains_key("timeZone"));
        assert!(!obj.contains_key("applicationKeys"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let user = User {
            name: Some("fred".to_string()),
            password: Some("hunter2".to_string()),
            ..User::default()
        };

        let debug_output = format!("{:?}", user);
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("<redacted>"));
    }

    #[test]
    fn test_user_display() {
        let user = User {
            name: Some("fred".to_string()),
            display_name: Some("Fred F. User".to_string()),
            ..User::default()
        };
        assert_eq!(format!("{}", user), "Fred F. User");

        let user = User {
            name: Some("fred".to_string()),
            ..User::default()
        };
        assert_eq!(format!("{}", user), "fred");

        assert_eq!(format!("{}", User::default()), "<unknown>");
    }

    #[test]
    fn test_find_users_options_default() {
        let options = FindUsersOptions::default();
        assert_eq!(options.start_at, 0);
        assert_eq!(options.max_results, 0);
        assert!(!options.include_active);
        assert!(!options.include_inactive);
        assert!(options.property.is_empty());
    }
}
