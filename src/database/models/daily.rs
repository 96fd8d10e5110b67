use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `v_daily_summary`. Absent metrics are omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailySummary {
    pub log_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal_estimated: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal_budgeted: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_activity_min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_duration: Option<i32>,
}

impl DailySummary {
    /// A day with nothing logged yet
    pub fn empty(log_date: NaiveDate) -> Self {
        Self {
            log_date,
            weight_kg: None,
            kcal_estimated: None,
            kcal_budgeted: None,
            mood: None,
            motivation: None,
            total_activity_min: None,
            sleep_duration: None,
        }
    }

    /// Budgeted minus estimated kcal, when both are known
    pub fn kcal_balance(&self) -> Option<i32> {
        match (self.kcal_budgeted, self.kcal_estimated) {
            (Some(budgeted), Some(estimated)) => Some(budgeted - estimated),
            _ => None,
        }
    }
}

/// A (date, weight) pair feeding the goal projection
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct WeightSample {
    pub log_date: NaiveDate,
    pub weight_kg: f64,
}

/// Column changes for a daily log; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyLogUpdate {
    pub weight_kg: Option<f64>,
    pub mood: Option<i32>,
    pub sleep_duration: Option<i32>,
    pub motivation: Option<i32>,
}

impl DailyLogUpdate {
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none()
            && self.mood.is_none()
            && self.sleep_duration.is_none()
            && self.motivation.is_none()
    }
}
