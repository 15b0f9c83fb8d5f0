//! Command-line interface definitions and dispatch.

use std::io::Read;

use clap::{Args, Parser, Subcommand};

use jira_users::api::{auth, FindUsersOptions, JiraClient, User};
use jira_users::config::{Config, Profile};
use jira_users::error::{AppError, Result};

/// Manage JIRA users from the command line.
#[derive(Debug, Parser)]
#[command(name = "jira-users", version, about)]
pub struct Cli {
    /// The connection profile to use.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a user by username.
    Get {
        /// The username to look up.
        username: String,
    },
    /// Create a user.
    Create(CreateArgs),
    /// Search for users by username fragment.
    Search(SearchArgs),
    /// Show the authenticated user.
    Whoami,
    /// Store an API token for a profile (token read from stdin).
    Login,
    /// Delete the stored API token for a profile.
    Logout,
    /// Manage connection profiles.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// The login name for the new user.
    #[arg(long)]
    pub name: String,
    /// The display name.
    #[arg(long)]
    pub display_name: Option<String>,
    /// The email address.
    #[arg(long)]
    pub email: Option<String>,
    /// The password; omit to let JIRA generate one.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// The username fragment to search for.
    pub query: String,
    /// Index of the first user to return.
    #[arg(long)]
    pub start_at: Option<u32>,
    /// Maximum number of users per page.
    #[arg(long)]
    pub max_results: Option<u32>,
    /// Include active users in the results.
    #[arg(long)]
    pub include_active: Option<bool>,
    /// Include inactive users in the results.
    #[arg(long)]
    pub include_inactive: Option<bool>,
    /// Property-search query string.
    #[arg(long)]
    pub property: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Add a connection profile.
    Add {
        /// The profile name.
        name: String,
        /// The JIRA instance URL.
        url: String,
        /// The account email address.
        email: String,
    },
    /// List configured profiles.
    List,
    /// Remove a profile and its stored token.
    Remove {
        /// The profile name.
        name: String,
    },
}

impl SearchArgs {
    /// The options object for the search call.
    ///
    /// With no flag given at all, no options are sent and the server
    /// applies its own defaults. With at least one flag, all five
    /// parameters are sent; unspecified ones fall back to the server's
    /// documented defaults.
    pub fn options(&self) -> Option<FindUsersOptions> {
        if self.start_at.is_none()
            && self.max_results.is_none()
            && self.include_active.is_none()
            && self.include_inactive.is_none()
            && self.property.is_none()
        {
            return None;
        }

        Some(FindUsersOptions {
            start_at: self.start_at.unwrap_or(0),
            max_results: self.max_results.unwrap_or(50),
            include_active: self.include_active.unwrap_or(true),
            include_inactive: self.include_inactive.unwrap_or(false),
            property: self.property.clone().unwrap_or_default(),
        })
    }
}

/// Execute the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    let profile_name = cli.profile.as_deref();

    match cli.command {
        Command::Get { username } => {
            let client = client_for(profile_name).await?;
            let (user, _) = client.get_user(&username).await?;
            print_json(&user)
        }
        Command::Create(args) => {
            let client = client_for(profile_name).await?;
            let user = User {
                name: Some(args.name),
                display_name: args.display_name,
                email_address: args.email,
                password: args.password,
                ..User::default()
            };
            let (created, _) = client.create_user(&user).await?;
            print_json(&created)
        }
        Command::Search(args) => {
            let client = client_for(profile_name).await?;
            let options = args.options();
            let (users, _) = client.find_users(&args.query, options.as_ref()).await?;
            print_json(&users)
        }
        Command::Whoami => {
            let client = client_for(profile_name).await?;
            let (user, _) = client.current_user().await?;
            print_json(&user)
        }
        Command::Login => login(profile_name),
        Command::Logout => logout(profile_name),
        Command::Profile { command } => profile_command(command),
    }
}

/// Build an authenticated client for the resolved profile.
async fn client_for(name: Option<&str>) -> Result<JiraClient> {
    let config = Config::load()?;
    let profile = config.profile(name)?;
    Ok(JiraClient::new(profile).await?)
}

/// Read an API token from stdin and store it in the keyring.
fn login(name: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let profile = config.profile(name)?;

    eprintln!("Paste the API token for '{}', then press ctrl-d:", profile.name);
    let mut token = String::new();
    std::io::stdin().read_to_string(&mut token)?;
    let token = token.trim();

    if token.is_empty() {
        return Err(AppError::other("no token provided"));
    }

    auth::store_token(&profile.name, token)?;
    eprintln!("Token stored for profile '{}'.", profile.name);
    Ok(())
}

/// Delete the stored API token for the resolved profile.
fn logout(name: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let profile = config.profile(name)?;

    if !auth::has_token(&profile.name) {
        eprintln!("No token stored for profile '{}'.", profile.name);
        return Ok(());
    }

    auth::delete_token(&profile.name)?;
    eprintln!("Token deleted for profile '{}'.", profile.name);
    Ok(())
}

fn profile_command(command: ProfileCommand) -> Result<()> {
    let mut config = Config::load()?;

    match command {
        ProfileCommand::Add { name, url, email } => {
            config.add_profile(Profile::new(name.clone(), url, email))?;
            config.save()?;
            println!("Added profile '{}'. Run 'jira-users login --profile {}' to store its API token.", name, name);
        }
        ProfileCommand::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
            }
            for profile in &config.profiles {
                let default = if config.settings.default_profile.as_deref()
                    == Some(profile.name.as_str())
                {
                    " (default)"
                } else {
                    ""
                };
                let token = if auth::has_token(&profile.name) {
                    "token stored"
                } else {
                    "no token"
                };
                println!(
                    "{}{}  {}  {}  [{}]",
                    profile.name, default, profile.url, profile.email, token
                );
            }
        }
        ProfileCommand::Remove { name } => {
            config.remove_profile(&name)?;
            config.save()?;
            // The token may never have been stored; ignore a miss.
            let _ = auth::delete_token(&name);
            println!("Removed profile '{}'.", name);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::other(format!("could not render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["jira-users", "get", "fred"]).unwrap();
        match cli.command {
            Command::Get { username } => assert_eq!(username, "fred"),
            _ => panic!("Expected get command"),
        }
    }

    #[test]
    fn test_parse_global_profile_flag() {
        let cli = Cli::try_parse_from(["jira-users", "--profile", "work", "whoami"]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("work"));
    }

    #[test]
    fn test_search_without_flags_sends_no_options() {
        let cli = Cli::try_parse_from(["jira-users", "search", "fred"]).unwrap();
        match cli.command {
            Command::Search(args) => assert!(args.options().is_none()),
            _ => panic!("Expected search command"),
        }
    }

    #[test]
    fn test_search_with_one_flag_fills_server_defaults() {
        let cli =
            Cli::try_parse_from(["jira-users", "search", "fred", "--start-at", "10"]).unwrap();
        let args = match cli.command {
            Command::Search(args) => args,
            _ => panic!("Expected search command"),
        };

        let options = args.options().unwrap();
        assert_eq!(options.start_at, 10);
        assert_eq!(options.max_results, 50);
        assert!(options.include_active);
        assert!(!options.include_inactive);
        assert!(options.property.is_empty());
    }

    #[test]
    fn test_parse_create_flags() {
        let cli = Cli::try_parse_from([
            "jira-users",
            "create",
            "--name",
            "fred",
            "--email",
            "fred@example.com",
        ])
        .unwrap();

        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.name, "fred");
                assert_eq!(args.email.as_deref(), Some("fred@example.com"));
                assert!(args.password.is_none());
            }
            _ => panic!("Expected create command"),
        }
    }
}
