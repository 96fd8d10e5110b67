// handlers/pages.rs - GET / and GET /weekly

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::database::models::WeeklyStats;
use crate::error::{ApiError, ApiResult};
use crate::services::calendar::{self, parse_date, week_start, window_around};
use crate::services::calculate_projection;
use crate::state::AppState;
use crate::views::{render_dashboard, render_weekly, DashboardPage};

#[derive(Debug, Default, Deserialize)]
pub struct PivotQuery {
    /// `YYYY-MM-DD`; anything unparseable falls back to today
    pub d: Option<String>,
}

impl PivotQuery {
    /// A query string the extractor rejects counts as no pivot at all
    fn or_default(query: Result<Query<Self>, QueryRejection>) -> Self {
        query.map(|Query(q)| q).unwrap_or_else(|e| {
            debug!(error = %e, "ignoring pivot query");
            Self::default()
        })
    }

    fn date_or_today(&self) -> chrono::NaiveDate {
        self.d
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(calendar::today)
    }
}

/// GET / - dashboard around the pivot date
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<PivotQuery>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let today = calendar::today();
    let pivot = PivotQuery::or_default(query).date_or_today();
    let dashboard = &state.config.dashboard;
    let store = state.store.as_ref();

    let (start, end) = window_around(pivot, dashboard.summary_span_days);
    let (summary, food, quick_add) = futures::try_join!(
        store.daily_summaries(start, end),
        store.food_entries(today),
        store.quick_add_items(dashboard.quick_add_limit),
    )
    .map_err(|e| ApiError::database("Error fetching page data", e))?;

    let goals = match calculate_projection(store, dashboard, today).await {
        Ok(goals) => Some(goals),
        Err(e) => {
            warn!(error = %e, "calculate goals");
            None
        }
    };

    let page = DashboardPage {
        pivot,
        today,
        summary,
        food,
        quick_add,
        goals,
    };
    Ok(Html(render_dashboard(&page).into_string()))
}

/// GET /weekly - stats for the ISO week containing `?d=` (default: this week)
pub async fn weekly(
    State(state): State<AppState>,
    query: Result<Query<PivotQuery>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let start = week_start(PivotQuery::or_default(query).date_or_today());

    let stats = state
        .store
        .weekly_stats(start)
        .await
        .map_err(|e| ApiError::database("Error fetching weekly stats", e))?;

    let stats = stats.unwrap_or_else(|| {
        info!(week_start = %start, "no weekly stats");
        WeeklyStats::empty(start)
    });

    Ok(Html(render_weekly(&stats).into_string()))
}
