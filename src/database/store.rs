use async_trait::async_trait;
use chrono::NaiveDate;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    BmiPoint, DailyLogUpdate, DailySummary, FoodEntry, QuickAddItem, WeeklyStats, WeightSample,
};

/// Data access for the dashboard. Every operation is scoped to the single
/// configured user; implementations hold that id themselves.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Summaries for `start..=end`, ascending by date. Days without a row are absent.
    async fn daily_summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>, DatabaseError>;

    /// Summary for one day; a missing row yields `DailySummary::empty(date)`
    async fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary, DatabaseError>;

    /// Food entries for the day, ordered by creation time
    async fn food_entries(&self, date: NaiveDate) -> Result<Vec<FoodEntry>, DatabaseError>;

    /// Most frequent (note, calories) pairs, most recent first on ties
    async fn quick_add_items(&self, limit: i64) -> Result<Vec<QuickAddItem>, DatabaseError>;

    /// The latest `limit` days carrying a weight, ascending by date
    async fn weight_samples(&self, limit: i64) -> Result<Vec<WeightSample>, DatabaseError>;

    /// One point per day for the `days` days ending at `end`
    async fn bmi_series(&self, end: NaiveDate, days: i32) -> Result<Vec<BmiPoint>, DatabaseError>;

    async fn weekly_stats(&self, week_start: NaiveDate) -> Result<Option<WeeklyStats>, DatabaseError>;

    /// Upsert the (user, date) daily log, then apply the provided columns
    async fn update_daily_log(
        &self,
        date: NaiveDate,
        update: &DailyLogUpdate,
    ) -> Result<(), DatabaseError>;

    /// Upsert the daily log and add minutes onto its accumulated activity
    async fn add_activity(&self, date: NaiveDate, minutes: i32) -> Result<(), DatabaseError>;

    /// Insert a food entry; an empty note is stored as NULL
    async fn add_food_entry(
        &self,
        date: NaiveDate,
        calories: i32,
        note: &str,
    ) -> Result<i64, DatabaseError>;

    /// Returns false when no entry with that id belongs to the user
    async fn delete_food_entry(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn calories_total(&self, date: NaiveDate) -> Result<i64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
