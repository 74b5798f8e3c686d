//! Implementation of the `lifeprog friend` commands.

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use uuid::Uuid;

use crate::adapters::sqlite::{
    SqliteFriendRepository, SqliteNotificationRepository, SqliteUserRepository,
};
use crate::cli::output::TableFormatter;
use crate::domain::ports::UserRepository;
use crate::services::FriendService;

use super::AppContext;

#[derive(Subcommand, Debug)]
pub enum FriendCommands {
    /// Send a follow request to another user
    Request {
        /// Target user ID
        to_user: Uuid,
    },

    /// Accept a pending request addressed to you
    Accept {
        /// Request ID
        request_id: Uuid,
    },

    /// Reject a pending request addressed to you
    Reject {
        /// Request ID
        request_id: Uuid,
    },

    /// List pending requests addressed to you
    Pending,

    /// List the users you follow
    Following,

    /// List the users following you
    Followers,

    /// Send an encouragement message to a user you follow
    Cheer {
        /// Target user ID
        to_user: Uuid,

        /// Message to send
        message: String,
    },

    /// Stop following a user
    Unfollow {
        /// Target user ID
        to_user: Uuid,
    },

    /// Search public profiles by name prefix
    Search {
        /// Display-name prefix
        prefix: String,

        /// Maximum results
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
}

type Service =
    FriendService<SqliteFriendRepository, SqliteUserRepository, SqliteNotificationRepository>;

fn build_service(ctx: &AppContext) -> Service {
    FriendService::new(
        Arc::new(SqliteFriendRepository::new(ctx.pool.clone())),
        Arc::new(SqliteUserRepository::new(ctx.pool.clone())),
        Arc::new(SqliteNotificationRepository::new(ctx.pool.clone())),
    )
}

pub async fn execute(
    command: FriendCommands,
    user_override: Option<Uuid>,
    json_mode: bool,
) -> Result<()> {
    let ctx = AppContext::load().await?;
    let user_id = ctx.current_user(user_override)?;
    let service = build_service(&ctx);

    match command {
        FriendCommands::Request { to_user } => {
            let request = service.send_request(user_id, to_user).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                println!("Request sent ({})", request.id);
            }
        }
        FriendCommands::Accept { request_id } => {
            let request = service.accept(request_id, user_id).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                println!("Accepted request from {}", request.from_user);
            }
        }
        FriendCommands::Reject { request_id } => {
            let request = service.reject(request_id, user_id).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                println!("Rejected request from {}", request.from_user);
            }
        }
        FriendCommands::Pending => {
            let requests = service.pending_requests(user_id).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&requests)?);
            } else if requests.is_empty() {
                println!("No pending requests.");
            } else {
                println!("{}", TableFormatter::new().format_requests(&requests));
            }
        }
        FriendCommands::Following => {
            let profiles = service.following(user_id).await?;
            print_profiles(&profiles, "You are not following anyone.", json_mode)?;
        }
        FriendCommands::Followers => {
            let profiles = service.followers(user_id).await?;
            print_profiles(&profiles, "No one follows you yet.", json_mode)?;
        }
        FriendCommands::Cheer { to_user, message } => {
            service.cheer(user_id, to_user, message).await?;
            if json_mode {
                println!("{}", serde_json::json!({ "cheered": to_user }));
            } else {
                println!("Cheer sent to {to_user}");
            }
        }
        FriendCommands::Unfollow { to_user } => {
            service.unfollow(user_id, to_user).await?;
            if json_mode {
                println!("{}", serde_json::json!({ "unfollowed": to_user }));
            } else {
                println!("Unfollowed {to_user}");
            }
        }
        FriendCommands::Search { prefix, limit } => {
            let users = SqliteUserRepository::new(ctx.pool.clone());
            let profiles = users.search(&prefix, limit).await?;
            print_profiles(&profiles, "No matching public profiles.", json_mode)?;
        }
    }

    Ok(())
}

fn print_profiles(
    profiles: &[crate::domain::models::UserProfile],
    empty_message: &str,
    json_mode: bool,
) -> Result<()> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(profiles)?);
    } else if profiles.is_empty() {
        println!("{empty_message}");
    } else {
        println!("{}", TableFormatter::new().format_profiles(profiles));
    }
    Ok(())
}
