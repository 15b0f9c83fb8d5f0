//! jira-users - manage JIRA users from the command line.

mod cli;

use clap::Parser;

use jira_users::logging;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let result = cli::run(args).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        logging::shutdown();

        eprintln!("Error: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("Hint: {}", action);
        }
        std::process::exit(1);
    }

    logging::shutdown();
}
