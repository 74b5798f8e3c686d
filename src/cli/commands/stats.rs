//! Implementation of the `lifeprog stats` commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use uuid::Uuid;

use crate::adapters::sqlite::{
    SqliteFriendRepository, SqliteStatsRepository, SqliteUserRepository,
};
use crate::cli::output::TableFormatter;
use crate::domain::ports::{FriendRepository, StatsRepository, UserRepository};
use crate::services::Ranker;

use super::AppContext;

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Show your level, points, streak, and achievements
    Show,

    /// Recompute and cache your global and friends rank
    Rank,

    /// Show the global leaderboard
    Leaderboard {
        /// Number of entries to display
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Show your life progress bar
    Life,
}

pub async fn execute(
    command: StatsCommands,
    user_override: Option<Uuid>,
    json_mode: bool,
) -> Result<()> {
    let ctx = AppContext::load().await?;
    let user_id = ctx.current_user(user_override)?;
    let stats_repo = Arc::new(SqliteStatsRepository::new(ctx.pool.clone()));

    match command {
        StatsCommands::Show => {
            let stats = stats_repo
                .get(user_id)
                .await?
                .with_context(|| format!("No stats for user {user_id}"))?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", TableFormatter::new().format_stats(&stats));
            }
        }
        StatsCommands::Rank => {
            let friends = SqliteFriendRepository::new(ctx.pool.clone());
            let peers = friends.following(user_id).await?;
            let ranker = Ranker::new(stats_repo)
                .with_leaderboard_limit(ctx.config.ranking.leaderboard_limit);
            let rank = ranker.refresh(user_id, &peers).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&rank)?);
            } else {
                let global = rank
                    .global
                    .map_or_else(|| "outside leaderboard".to_string(), |g| format!("#{g}"));
                println!("Global rank: {global}");
                println!("Friends rank: #{}", rank.friends);
            }
        }
        StatsCommands::Leaderboard { limit } => {
            let top = stats_repo.top_by_points(limit).await?;
            let ids: Vec<Uuid> = top.iter().map(|(id, _)| *id).collect();
            let users = SqliteUserRepository::new(ctx.pool.clone());
            let profiles = users.get_many(&ids).await?;

            // Re-join in leaderboard order; deleted users are skipped.
            let entries: Vec<_> = top
                .into_iter()
                .filter_map(|(id, points)| {
                    profiles.iter().find(|p| p.id == id).cloned().map(|p| (p, points))
                })
                .collect();

            if json_mode {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|(profile, points)| {
                        serde_json::json!({
                            "user_id": profile.id,
                            "display_name": profile.display_name,
                            "points": points,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", TableFormatter::new().format_leaderboard(&entries));
            }
        }
        StatsCommands::Life => {
            let users = SqliteUserRepository::new(ctx.pool.clone());
            let profile = users
                .get(user_id)
                .await?
                .with_context(|| format!("No profile for user {user_id}"))?;
            let progress = profile.life_progress(Utc::now().date_naive());
            if json_mode {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "life_expectancy": profile.life_expectancy,
                        "progress": progress,
                    }))?
                );
            } else if let Some(fraction) = progress {
                let percent = fraction * 100.0;
                let filled = (fraction * 40.0).round() as usize;
                let bar: String = "#".repeat(filled) + &"-".repeat(40 - filled.min(40));
                println!("[{bar}] {percent:.1}% of {} years", profile.life_expectancy);
            } else {
                println!("No birth date set. Rerun `lifeprog init` with --birth-date.");
            }
        }
    }

    Ok(())
}
