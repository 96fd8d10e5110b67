use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single row of `daily_calorie_entries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FoodEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub calories: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A (note, calories) pair offered as a one-click re-entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuickAddItem {
    pub note: String,
    pub calories: i32,
}
