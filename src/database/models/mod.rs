pub mod daily;
pub mod food;
pub mod reports;

pub use daily::{DailyLogUpdate, DailySummary, WeightSample};
pub use food::{FoodEntry, QuickAddItem};
pub use reports::{BmiPoint, WeeklyStats};
