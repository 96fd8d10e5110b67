use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One day of the BMI trend; `bmi` is null for days without a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BmiPoint {
    #[serde(rename = "date")]
    pub log_date: NaiveDate,
    pub bmi: Option<f64>,
}

/// One row of `v_weekly_stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_estimated: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budgeted: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_deficit: Option<i32>,
}

impl WeeklyStats {
    /// A week with no aggregated rows yet
    pub fn empty(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            avg_weight: None,
            total_estimated: None,
            total_budgeted: None,
            total_deficit: None,
        }
    }
}
