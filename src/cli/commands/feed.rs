//! Implementation of the `lifeprog feed` commands.

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use uuid::Uuid;

use crate::adapters::sqlite::{
    SqliteActivityRepository, SqliteFriendRepository, SqliteUserRepository,
};
use crate::cli::output::TableFormatter;
use crate::domain::ports::FriendRepository;
use crate::services::FeedService;

use super::AppContext;

#[derive(Subcommand, Debug)]
pub enum FeedCommands {
    /// Show recent activity from you and the users you follow
    Show {
        /// Maximum entries to display
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Stream new activity live until interrupted
    Watch,
}

pub async fn execute(
    command: FeedCommands,
    user_override: Option<Uuid>,
    json_mode: bool,
) -> Result<()> {
    let ctx = AppContext::load().await?;
    let user_id = ctx.current_user(user_override)?;

    let friends = SqliteFriendRepository::new(ctx.pool.clone());
    let peers = friends.following(user_id).await?;

    let service = FeedService::new(
        Arc::new(SqliteActivityRepository::new(ctx.pool.clone())),
        Arc::new(SqliteUserRepository::new(ctx.pool.clone())),
        &ctx.config.feed,
    );

    match command {
        FeedCommands::Show { limit } => {
            let entries = service.recent(user_id, &peers, limit).await?;
            if json_mode {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "author": entry.author_name,
                            "content": entry.activity.content(),
                            "created_at": entry.activity.created_at,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if entries.is_empty() {
                println!("Nothing in your feed yet.");
            } else {
                println!("{}", TableFormatter::new().format_feed(&entries));
            }
        }
        FeedCommands::Watch => {
            let mut feed = service.subscribe_live(user_id, &peers).await;
            if feed.is_degraded() {
                eprintln!("Live subscription unavailable; showing nothing.");
                return Ok(());
            }
            eprintln!("Watching feed (Ctrl-C to stop)...");
            loop {
                tokio::select! {
                    activity = feed.next() => {
                        let Some(activity) = activity else { break };
                        if json_mode {
                            println!("{}", serde_json::to_string(&activity)?);
                        } else {
                            println!(
                                "[{}] {}",
                                activity.created_at.format("%H:%M:%S"),
                                activity.content()
                            );
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        break;
                    }
                }
            }
            feed.unsubscribe();
        }
    }

    Ok(())
}
