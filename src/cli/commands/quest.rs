//! Implementation of the `lifeprog quest` commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::Subcommand;
use uuid::Uuid;

use crate::adapters::sqlite::{
    SqliteActivityRepository, SqliteNotificationRepository, SqliteQuestRepository,
    SqliteStatsRepository,
};
use crate::cli::output::TableFormatter;
use crate::domain::models::{achievement, AchievementRecord, Quest};
use crate::services::QuestService;

use super::AppContext;

#[derive(Subcommand, Debug)]
pub enum QuestCommands {
    /// Create a new quest
    Add {
        /// Quest title
        title: String,

        /// Detailed description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Category label
        #[arg(short, long, default_value = "")]
        category: String,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// List your quests
    List,

    /// Show one quest
    Show {
        /// Quest ID
        quest_id: Uuid,
    },

    /// Set quest progress (0-100)
    Progress {
        /// Quest ID
        quest_id: Uuid,

        /// New progress percentage
        value: u8,
    },

    /// Mark a quest complete (progress 100)
    Complete {
        /// Quest ID
        quest_id: Uuid,
    },

    /// Give up on a quest. This is permanent
    Abandon {
        /// Quest ID
        quest_id: Uuid,
    },

    /// Record today's activity and update your streak
    Login,

    /// Create deadline reminders for quests due within a week
    Deadlines,
}

type Service = QuestService<
    SqliteQuestRepository,
    SqliteStatsRepository,
    SqliteActivityRepository,
    SqliteNotificationRepository,
>;

fn build_service(ctx: &AppContext) -> Service {
    QuestService::new(
        Arc::new(SqliteQuestRepository::new(ctx.pool.clone())),
        Arc::new(SqliteStatsRepository::new(ctx.pool.clone())),
        Arc::new(SqliteActivityRepository::new(ctx.pool.clone())),
        Arc::new(SqliteNotificationRepository::new(ctx.pool.clone())),
    )
}

pub async fn execute(
    command: QuestCommands,
    user_override: Option<Uuid>,
    json_mode: bool,
) -> Result<()> {
    let ctx = AppContext::load().await?;
    let user_id = ctx.current_user(user_override)?;
    let service = build_service(&ctx);

    match command {
        QuestCommands::Add { title, description, category, due } => {
            let due_date = due.and_then(|d| {
                Utc.from_local_datetime(&d.and_hms_opt(23, 59, 59)?).single()
            });
            let (quest, unlocked) = service
                .create_quest(user_id, title, description, category, due_date)
                .await?;
            print_quest(&quest, &unlocked, json_mode)?;
        }
        QuestCommands::List => {
            let quests = service.list_quests(user_id).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&quests)?);
            } else if quests.is_empty() {
                println!("No quests yet. Create one with `lifeprog quest add`.");
            } else {
                println!("{}", TableFormatter::new().format_quests(&quests));
            }
        }
        QuestCommands::Show { quest_id } => {
            let quest = service
                .get_quest(quest_id)
                .await?
                .with_context(|| format!("Quest {quest_id} not found"))?;
            print_quest(&quest, &[], json_mode)?;
        }
        QuestCommands::Progress { quest_id, value } => {
            let (quest, unlocked) = service.update_progress(quest_id, value).await?;
            print_quest(&quest, &unlocked, json_mode)?;
        }
        QuestCommands::Complete { quest_id } => {
            let (quest, unlocked) = service.update_progress(quest_id, 100).await?;
            print_quest(&quest, &unlocked, json_mode)?;
        }
        QuestCommands::Abandon { quest_id } => {
            let quest = service.abandon(quest_id).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&quest)?);
            } else {
                println!("Abandoned quest: {}", quest.title);
            }
        }
        QuestCommands::Login => {
            let (stats, unlocked) = service.record_login(user_id, Utc::now()).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Streak: {} day(s)", stats.streak);
                print_unlocks(&unlocked);
            }
        }
        QuestCommands::Deadlines => {
            let reminders = service.check_deadlines(user_id, Utc::now()).await?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&reminders)?);
            } else if reminders.is_empty() {
                println!("Nothing due within the next 7 days.");
            } else {
                for reminder in &reminders {
                    println!("{}", reminder.body());
                }
            }
        }
    }

    Ok(())
}

fn print_quest(quest: &Quest, unlocked: &[AchievementRecord], json_mode: bool) -> Result<()> {
    if json_mode {
        let mut value = serde_json::to_value(quest)?;
        value["status"] = serde_json::json!(quest.status().as_str());
        if !unlocked.is_empty() {
            value["unlocked_achievements"] = serde_json::to_value(unlocked)?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", TableFormatter::new().format_quests(std::slice::from_ref(quest)));
        print_unlocks(unlocked);
    }
    Ok(())
}

fn print_unlocks(unlocked: &[AchievementRecord]) {
    for record in unlocked {
        if let Some(def) = achievement::find(&record.id) {
            println!(
                "Achievement unlocked: {} (+{} points, +{} XP)",
                def.title, def.reward.points, def.reward.experience
            );
        }
    }
}
