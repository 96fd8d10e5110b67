// handlers/api/mod.rs - JSON API under /api
pub mod log;
pub mod read;

pub use log::{log_calorie, log_cardio, log_mood, log_weight};
pub use read::{bmi, calories_today, daily_summary, food, goals, weekly_summary};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::services::calendar::{self, parse_date};

/// Body of every successful log call
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub success: bool,
    pub message: &'static str,
}

impl LogResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// An absent or empty date means today; anything else must be `YYYY-MM-DD`
pub(crate) fn date_or_today(value: Option<&str>, field: &str) -> ApiResult<NaiveDate> {
    match value {
        None | Some("") => Ok(calendar::today()),
        Some(raw) => parse_date(raw).ok_or_else(|| {
            tracing::warn!(field, value = raw, "invalid date");
            ApiError::invalid_date(field)
        }),
    }
}
