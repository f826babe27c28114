//! Runtime configuration read from the environment (and an optional `.env`).

use chrono::Duration;
use std::env;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;
use crate::reminders::ReminderWindows;

pub const ENV_LOG_FILTER: &str = "BIZDESK_LOG";
pub const ENV_LOG_FORMAT: &str = "BIZDESK_LOG_FORMAT";
pub const ENV_REMINDER_HORIZON_HOURS: &str = "BIZDESK_REMINDER_HORIZON_HOURS";
pub const ENV_REMINDER_URGENT_HOURS: &str = "BIZDESK_REMINDER_URGENT_HOURS";
pub const ENV_FOLLOW_UP_AFTER_HOURS: &str = "BIZDESK_FOLLOW_UP_AFTER_HOURS";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// Bunyan JSON lines
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// `tracing_subscriber::EnvFilter` directive
    #[validate(length(min = 1))]
    pub log_filter: String,
    pub log_format: LogFormat,
    /// Reminders are raised for dates up to this far ahead
    #[validate(range(min = 1, max = 720))]
    pub reminder_horizon_hours: u32,
    /// Dates within this window are urgent rather than upcoming
    #[validate(range(min = 1, max = 720))]
    pub reminder_urgent_hours: u32,
    /// Open leads older than this need a follow-up
    #[validate(range(min = 1, max = 720))]
    pub follow_up_after_hours: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_format: LogFormat::Pretty,
            reminder_horizon_hours: 48,
            reminder_urgent_hours: 24,
            follow_up_after_hours: 48,
        }
    }
}

fn parse_hours(key: &str, default: u32) -> Result<u32, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} must be a whole number of hours: {}", key, e))),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load a `.env` file from the working directory, if any.
    pub fn load_dotenv() {
        // A missing file is the normal case.
        let _ = dotenv::dotenv();
    }

    /// Build the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let log_filter = env::var(ENV_LOG_FILTER)
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or(defaults.log_filter);
        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            log_filter,
            log_format,
            reminder_horizon_hours: parse_hours(
                ENV_REMINDER_HORIZON_HOURS,
                defaults.reminder_horizon_hours,
            )?,
            reminder_urgent_hours: parse_hours(
                ENV_REMINDER_URGENT_HOURS,
                defaults.reminder_urgent_hours,
            )?,
            follow_up_after_hours: parse_hours(
                ENV_FOLLOW_UP_AFTER_HOURS,
                defaults.follow_up_after_hours,
            )?,
        };

        config.check()?;
        Ok(config)
    }

    /// Field ranges plus the urgent-inside-horizon constraint
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;
        if self.reminder_urgent_hours > self.reminder_horizon_hours {
            return Err(AppError::Config(format!(
                "{} ({}) cannot exceed {} ({})",
                ENV_REMINDER_URGENT_HOURS,
                self.reminder_urgent_hours,
                ENV_REMINDER_HORIZON_HOURS,
                self.reminder_horizon_hours
            )));
        }
        Ok(())
    }

    pub fn reminder_windows(&self) -> ReminderWindows {
        ReminderWindows {
            horizon: Duration::hours(i64::from(self.reminder_horizon_hours)),
            urgent: Duration::hours(i64::from(self.reminder_urgent_hours)),
            follow_up_after: Duration::hours(i64::from(self.follow_up_after_hours)),
        }
    }
}
