//! Linear weight-trend projection towards the milestone and goal weights.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::database::models::WeightSample;
use crate::database::{DatabaseError, MetricsStore};

/// Latest weight and average change per day across the sample window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightTrend {
    pub current: f64,
    pub daily_change: f64,
}

impl WeightTrend {
    /// `samples` must be ascending by date. Fewer than two samples, or a
    /// window spanning zero days, yields a flat trend.
    pub fn from_samples(samples: &[WeightSample]) -> Self {
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Self {
                    current: 0.0,
                    daily_change: 0.0,
                }
            }
        };

        let days = (last.log_date - first.log_date).num_days();
        let daily_change = if samples.len() < 2 || days == 0 {
            0.0
        } else {
            (last.weight_kg - first.weight_kg) / days as f64
        };

        Self {
            current: last.weight_kg,
            daily_change,
        }
    }
}

/// Estimate for reaching one target weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProjection {
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl TargetProjection {
    fn unreachable(weight: f64) -> Self {
        Self {
            weight,
            days: None,
            date: None,
            formula: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.days.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    pub current_weight: f64,
    pub daily_change: f64,
    pub milestone: TargetProjection,
    pub goal: TargetProjection,
}

impl GoalProjection {
    pub fn new(trend: WeightTrend, milestone: f64, goal: f64, today: NaiveDate) -> Self {
        Self {
            current_weight: trend.current,
            daily_change: trend.daily_change,
            milestone: project_target(trend, milestone, today),
            goal: project_target(trend, goal, today),
        }
    }
}

/// Only a losing trend above the target projects a date; negative day
/// counts and dates outside the calendar are reported as unreachable.
pub fn project_target(trend: WeightTrend, target: f64, today: NaiveDate) -> TargetProjection {
    let WeightTrend {
        current,
        daily_change: rate,
    } = trend;

    if rate >= 0.0 || current <= target {
        return TargetProjection::unreachable(target);
    }

    let days = ((target - current) / rate).ceil();
    if !days.is_finite() || days < 0.0 {
        return TargetProjection::unreachable(target);
    }
    let days = days as i64;

    // A near-flat trend can put the date beyond what chrono represents
    let date = match Duration::try_days(days).and_then(|d| today.checked_add_signed(d)) {
        Some(date) => date,
        None => return TargetProjection::unreachable(target),
    };

    TargetProjection {
        weight: target,
        days: Some(days),
        date: Some(date),
        formula: Some(format!(
            "({:.1} - {:.1})/{:.3} = {} days",
            target, current, rate, days
        )),
    }
}

/// Load recent samples and project both configured targets
pub async fn calculate_projection(
    store: &dyn MetricsStore,
    dashboard: &DashboardConfig,
    today: NaiveDate,
) -> Result<GoalProjection, DatabaseError> {
    let samples = store.weight_samples(dashboard.trend_window_days).await?;
    let trend = WeightTrend::from_samples(&samples);
    tracing::debug!(
        samples = samples.len(),
        current = trend.current,
        daily_change = trend.daily_change,
        "weight trend"
    );
    Ok(GoalProjection::new(
        trend,
        dashboard.milestone_kg,
        dashboard.goal_kg,
        today,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample(d: u32, weight_kg: f64) -> WeightSample {
        WeightSample {
            log_date: day(d),
            weight_kg,
        }
    }

    #[test]
    fn no_samples_is_flat_at_zero() {
        let trend = WeightTrend::from_samples(&[]);
        assert_eq!(trend.current, 0.0);
        assert_eq!(trend.daily_change, 0.0);
    }

    #[test]
    fn single_sample_has_no_rate() {
        let trend = WeightTrend::from_samples(&[sample(5, 70.0)]);
        assert_eq!(trend.current, 70.0);
        assert_eq!(trend.daily_change, 0.0);
    }

    #[test]
    fn rate_uses_first_and_last_sample() {
        let samples = [sample(1, 70.0), sample(3, 71.5), sample(11, 68.0)];
        let trend = WeightTrend::from_samples(&samples);
        assert_eq!(trend.current, 68.0);
        assert!((trend.daily_change - (-0.2)).abs() < 1e-9);
    }

    #[test]
    fn projects_milestone_and_goal_when_losing() {
        let trend = WeightTrend {
            current: 65.0,
            daily_change: -0.1,
        };
        let projection = GoalProjection::new(trend, 63.0, 60.0, day(1));

        assert_eq!(projection.milestone.days, Some(20));
        assert_eq!(projection.milestone.date, Some(day(21)));
        assert_eq!(
            projection.milestone.formula.as_deref(),
            Some("(63.0 - 65.0)/-0.100 = 20 days")
        );
        assert_eq!(projection.goal.days, Some(50));
        assert_eq!(
            projection.goal.date,
            NaiveDate::from_ymd_opt(2024, 4, 20)
        );
    }

    #[test]
    fn day_count_rounds_up() {
        let trend = WeightTrend {
            current: 64.0,
            daily_change: -0.3,
        };
        // 1.0 / 0.3 = 3.33.. -> 4
        assert_eq!(project_target(trend, 63.0, day(1)).days, Some(4));
    }

    #[test]
    fn gaining_or_flat_trend_is_unreachable() {
        let gaining = WeightTrend {
            current: 65.0,
            daily_change: 0.05,
        };
        let flat = WeightTrend {
            current: 65.0,
            daily_change: 0.0,
        };
        assert!(!project_target(gaining, 63.0, day(1)).is_reachable());
        assert!(!project_target(flat, 63.0, day(1)).is_reachable());
    }

    #[test]
    fn near_flat_trend_is_unreachable_instead_of_overflowing() {
        let trend = WeightTrend {
            current: 65.0,
            daily_change: -1e-12,
        };
        let projection = GoalProjection::new(trend, 63.0, 60.0, day(1));
        assert!(!projection.milestone.is_reachable());
        assert_eq!(projection.milestone.date, None);
        assert_eq!(projection.milestone.formula, None);
        assert!(!projection.goal.is_reachable());
    }

    #[test]
    fn already_below_target_is_unreachable() {
        let trend = WeightTrend {
            current: 62.0,
            daily_change: -0.2,
        };
        let projection = GoalProjection::new(trend, 63.0, 60.0, day(1));
        assert!(!projection.milestone.is_reachable());
        assert_eq!(projection.milestone.weight, 63.0);
        assert!(projection.goal.is_reachable());
    }

    #[test]
    fn unreachable_targets_serialize_without_estimates() {
        let json = serde_json::to_value(TargetProjection::unreachable(60.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "weight": 60.0 }));
    }
}
