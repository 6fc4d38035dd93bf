use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod auth;
pub mod edit;
pub mod init;
pub mod schedule;
pub mod serve;
pub mod view;

use crate::calendar::CalendarAdapter;
use crate::core::AppConfig;
use crate::core::db::async_db;
use crate::google::{access_token_for, default_account};

/// Build a calendar adapter for the first authorized account in the
/// credential store
pub(crate) async fn authorized_adapter(config: &AppConfig) -> Result<CalendarAdapter> {
    let db = async_db(&config.db_path).await?;
    let email = default_account(&db).await?;
    let access_token = access_token_for(&db, config, &email).await?;
    Ok(CalendarAdapter::new(config, access_token))
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the credential database
    Init {},
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2424")]
        port: String,
    },
    /// Perform OAuth authentication and store the refresh token
    Auth {},
    /// Interpret a scheduling request and add it to the calendar
    Schedule {
        /// e.g. "Schedule a team meeting tomorrow at 2pm for 1 hour"
        text: String,
    },
    /// Reschedule, rename, or cancel an existing event
    Edit {
        /// e.g. "Move my meeting with John to next Friday at 3pm"
        text: String,
    },
    /// Show upcoming events
    View {
        /// Also show usage stats for the upcoming window
        #[arg(long, action, default_value = "false")]
        stats: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Init {}) => {
            init::run().await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await;
        }
        Some(Command::Auth {}) => {
            auth::run().await?;
        }
        Some(Command::Schedule { text }) => {
            schedule::run(&text).await?;
        }
        Some(Command::Edit { text }) => {
            edit::run(&text).await?;
        }
        Some(Command::View { stats }) => {
            view::run(stats).await?;
        }
        None => {}
    }

    Ok(())
}
