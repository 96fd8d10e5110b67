pub mod calendar;
pub mod goals;

pub use goals::{calculate_projection, GoalProjection, TargetProjection, WeightTrend};
