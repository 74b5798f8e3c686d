//! User profile domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default assumed lifespan in years for the life progress bar.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;

/// Profile fields for one account.
///
/// Authentication itself is owned by an external identity provider;
/// this record is the application's view of the principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Display name shown in feeds and rankings
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Birth date, used for the lifespan progress bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Expected lifespan in years
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: u32,
    /// Private profiles cannot be followed
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const fn default_life_expectancy() -> u32 {
    DEFAULT_LIFE_EXPECTANCY
}

const fn default_is_public() -> bool {
    true
}

impl UserProfile {
    /// Create a new public profile.
    pub fn new(display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            email: String::new(),
            photo_url: None,
            birth_date: None,
            life_expectancy: DEFAULT_LIFE_EXPECTANCY,
            is_public: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub const fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub const fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Fraction of the expected lifespan already lived, in 0.0..=1.0.
    ///
    /// Returns `None` when no birth date is set.
    pub fn life_progress(&self, today: NaiveDate) -> Option<f64> {
        let birth = self.birth_date?;
        let lived_days = (today - birth).num_days().max(0) as f64;
        let total_days = f64::from(self.life_expectancy) * 365.25;
        if total_days <= 0.0 {
            return Some(1.0);
        }
        Some((lived_days / total_days).min(1.0))
    }

    /// Validate this profile.
    pub fn validate(&self) -> Result<(), String> {
        if self.display_name.is_empty() {
            return Err("Display name cannot be empty".to_string());
        }
        if self.life_expectancy == 0 || self.life_expectancy > 150 {
            return Err(format!(
                "Life expectancy {} out of range 1..=150",
                self.life_expectancy
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_progress_halfway() {
        let birth = NaiveDate::from_ymd_opt(1985, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let user = UserProfile::new("Mila").with_birth_date(birth);

        // 40 of 80 years lived
        let progress = user.life_progress(today).unwrap();
        assert!((progress - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_life_progress_without_birth_date() {
        let user = UserProfile::new("Anonymous");
        assert!(user.life_progress(Utc::now().date_naive()).is_none());
    }

    #[test]
    fn test_life_progress_capped_at_one() {
        let birth = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let user = UserProfile::new("Elder").with_birth_date(birth);
        assert!((user.life_progress(today).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation() {
        assert!(UserProfile::new("").validate().is_err());
        assert!(UserProfile::new("Valid").validate().is_ok());

        let mut user = UserProfile::new("Methuselah");
        user.life_expectancy = 500;
        assert!(user.validate().is_err());
    }
}
