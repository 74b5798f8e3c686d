//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub use output::{output, CommandOutput, TableFormatter};

#[derive(Parser)]
#[command(name = "lifeprog")]
#[command(about = "Life Progress - gamified goal tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Act as this user instead of the configured one
    #[arg(short, long, global = true, env = "LIFEPROG_USER")]
    pub user: Option<Uuid>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and create your profile
    Init(commands::init::InitArgs),

    /// Quest management commands
    #[command(subcommand)]
    Quest(commands::quest::QuestCommands),

    /// Progression stats, streaks, and rankings
    #[command(subcommand)]
    Stats(commands::stats::StatsCommands),

    /// Friend requests and the follow graph
    #[command(subcommand)]
    Friend(commands::friend::FriendCommands),

    /// Activity feed commands
    #[command(subcommand)]
    Feed(commands::feed::FeedCommands),

    /// Notification commands
    #[command(subcommand)]
    Notification(commands::notification::NotificationCommands),
}

/// Print an error in the selected output mode and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        );
    } else if err.downcast_ref::<DomainError>().is_some() {
        eprintln!("Error: {err}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
