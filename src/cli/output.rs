//! CLI output formatting
//!
//! Commands produce a structured output value that renders either as
//! human-readable text or as JSON, selected by the global `--json` flag.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::{
    FriendRequest, GameStats, Notification, Quest, QuestStatus, UserProfile,
};
use crate::services::progression;
use crate::services::FeedEntry;

/// A command result that can render as text or JSON.
pub trait CommandOutput {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command output in the selected mode.
pub fn output<T: CommandOutput>(data: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&data.to_json()).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        println!("{}", data.to_human());
    }
}

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self { use_colors: console::colors_enabled() }
    }

    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format a list of quests as a table
    pub fn format_quests(&self, quests: &[Quest]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Progress").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
        ]);

        for quest in quests {
            let id_short = &quest.id.to_string()[..8];
            let status = quest.status();

            let status_cell = if self.use_colors {
                Cell::new(status.as_str()).fg(status_color(status))
            } else {
                Cell::new(status.as_str())
            };

            let due = quest
                .due_date
                .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());

            table.add_row(vec![
                Cell::new(id_short),
                Cell::new(truncate_text(&quest.title, 40)),
                Cell::new(if quest.category.is_empty() { "-" } else { &quest.category }),
                Cell::new(format!("{}%", quest.progress)),
                status_cell,
                Cell::new(due),
            ]);
        }

        table.to_string()
    }

    /// Format game stats as a summary block
    pub fn format_stats(&self, stats: &GameStats) -> String {
        let (into_level, needed) = progression::level_progress(stats.experience);
        let mut lines = vec![
            format!("Level {} ({} / {} XP into next level)", stats.level, into_level, needed),
            format!("Experience: {}", stats.experience),
            format!("Points: {}", stats.points),
            format!("Streak: {} day(s)", stats.streak),
        ];

        if let Some(rank) = stats.rank {
            let global = rank
                .global
                .map_or_else(|| "outside leaderboard".to_string(), |g| format!("#{g}"));
            lines.push(format!("Rank: {} global, #{} among friends", global, rank.friends));
        }

        if stats.achievements.is_empty() {
            lines.push("Achievements: none yet".to_string());
        } else {
            lines.push(format!("Achievements ({}):", stats.achievements.len()));
            for record in &stats.achievements {
                let title = crate::domain::models::achievement::find(&record.id)
                    .map_or(record.id.as_str(), |def| def.title);
                lines.push(format!(
                    "  - {} ({})",
                    title,
                    record.unlocked_at.format("%Y-%m-%d")
                ));
            }
        }

        lines.join("\n")
    }

    /// Format a list of profiles as a table
    pub fn format_profiles(&self, profiles: &[UserProfile]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Public").add_attribute(Attribute::Bold),
        ]);

        for profile in profiles {
            table.add_row(vec![
                Cell::new(profile.id.to_string()),
                Cell::new(truncate_text(&profile.display_name, 30)),
                Cell::new(if profile.is_public { "yes" } else { "no" }),
            ]);
        }

        table.to_string()
    }

    /// Format pending friend requests as a table
    pub fn format_requests(&self, requests: &[FriendRequest]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Request ID").add_attribute(Attribute::Bold),
            Cell::new("From").add_attribute(Attribute::Bold),
            Cell::new("Received").add_attribute(Attribute::Bold),
        ]);

        for request in requests {
            table.add_row(vec![
                Cell::new(request.id.to_string()),
                Cell::new(request.from_user.to_string()),
                Cell::new(request.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ]);
        }

        table.to_string()
    }

    /// Format feed entries, newest first
    pub fn format_feed(&self, entries: &[FeedEntry]) -> String {
        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            let when = entry.activity.created_at.format("%Y-%m-%d %H:%M");
            let line = format!("[{}] {} {}", when, entry.author_name, entry.activity.content());
            if self.use_colors {
                lines.push(format!("{}", console::style(line).dim()));
            } else {
                lines.push(line);
            }
        }
        lines.join("\n")
    }

    /// Format notifications, unread ones highlighted
    pub fn format_notifications(&self, notifications: &[Notification]) -> String {
        let mut lines = Vec::with_capacity(notifications.len());
        for n in notifications {
            let marker = if n.read { " " } else { "*" };
            let line = format!(
                "{} [{}] {}: {}",
                marker,
                n.created_at.format("%Y-%m-%d %H:%M"),
                n.title(),
                n.body()
            );
            if self.use_colors && !n.read {
                lines.push(format!("{}", console::style(line).bold()));
            } else {
                lines.push(line);
            }
        }
        lines.join("\n")
    }

    /// Format the leaderboard with resolved names
    pub fn format_leaderboard(&self, entries: &[(UserProfile, u64)]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Points").add_attribute(Attribute::Bold),
        ]);

        for (position, (profile, points)) in entries.iter().enumerate() {
            table.add_row(vec![
                Cell::new((position + 1).to_string()),
                Cell::new(truncate_text(&profile.display_name, 30)),
                Cell::new(points.to_string()),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

const fn status_color(status: QuestStatus) -> Color {
    match status {
        QuestStatus::Active => Color::Yellow,
        QuestStatus::Completed => Color::Green,
        QuestStatus::Failed => Color::Red,
    }
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
