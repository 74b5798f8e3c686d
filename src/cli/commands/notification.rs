//! Implementation of the `lifeprog notification` commands.

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use uuid::Uuid;

use crate::adapters::sqlite::SqliteNotificationRepository;
use crate::cli::output::TableFormatter;
use crate::services::NotificationService;

use super::AppContext;

#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List your most recent notifications
    List,

    /// Mark one notification read
    Read {
        /// Notification ID
        notification_id: Uuid,
    },

    /// Mark all notifications read
    ReadAll,

    /// Show the unread count
    Unread,
}

pub async fn execute(
    command: NotificationCommands,
    user_override: Option<Uuid>,
    json_mode: bool,
) -> Result<()> {
    let ctx = AppContext::load().await?;
    let user_id = ctx.current_user(user_override)?;
    let service = NotificationService::new(Arc::new(SqliteNotificationRepository::new(
        ctx.pool.clone(),
    )));

    match command {
        NotificationCommands::List => {
            let notifications = service.list(user_id).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&notifications)?);
            } else if notifications.is_empty() {
                println!("No notifications.");
            } else {
                println!("{}", TableFormatter::new().format_notifications(&notifications));
            }
        }
        NotificationCommands::Read { notification_id } => {
            service.mark_read(notification_id).await?;
            if json_mode {
                println!("{}", serde_json::json!({ "read": notification_id }));
            } else {
                println!("Marked read.");
            }
        }
        NotificationCommands::ReadAll => {
            service.mark_all_read(user_id).await?;
            if json_mode {
                println!("{}", serde_json::json!({ "read_all": true }));
            } else {
                println!("All notifications marked read.");
            }
        }
        NotificationCommands::Unread => {
            let count = service.unread_count(user_id).await?;
            if json_mode {
                println!("{}", serde_json::json!({ "unread": count }));
            } else {
                println!("{count} unread notification(s)");
            }
        }
    }

    Ok(())
}
