// handlers/api/read.rs - GET endpoints under /api

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::models::{BmiPoint, DailySummary, FoodEntry, WeeklyStats};
use crate::error::{ApiError, ApiResult};
use crate::services::calendar::{self, week_start};
use crate::services::{calculate_projection, GoalProjection};
use crate::state::AppState;

use super::date_or_today;

#[derive(Debug, Default, Deserialize)]
pub struct DailySummaryQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeeklySummaryQuery {
    pub start_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CaloriesTodayResponse {
    pub date: String,
    pub total_calories: i64,
}

/// GET /api/bmi - one point per day for the BMI window ending today
pub async fn bmi(State(state): State<AppState>) -> ApiResult<Json<Vec<BmiPoint>>> {
    let series = state
        .store
        .bmi_series(calendar::today(), state.config.dashboard.bmi_window_days)
        .await
        .map_err(|e| ApiError::database("Error fetching BMI series.", e))?;
    Ok(Json(series))
}

/// GET /api/summary/daily?date=YYYY-MM-DD
pub async fn daily_summary(
    State(state): State<AppState>,
    Query(query): Query<DailySummaryQuery>,
) -> ApiResult<Json<DailySummary>> {
    let date = date_or_today(query.date.as_deref(), "date")?;
    let summary = state
        .store
        .daily_summary(date)
        .await
        .map_err(|e| ApiError::database("Error fetching daily summary.", e))?;
    Ok(Json(summary))
}

/// GET /api/calories/today
pub async fn calories_today(State(state): State<AppState>) -> ApiResult<Json<CaloriesTodayResponse>> {
    let today = calendar::today();
    let total_calories = state
        .store
        .calories_total(today)
        .await
        .map_err(|e| ApiError::database("Error fetching total calories.", e))?;

    Ok(Json(CaloriesTodayResponse {
        date: today.format(calendar::DATE_FORMAT).to_string(),
        total_calories,
    }))
}

/// GET /api/food - today's entries, `[]` when nothing is logged
pub async fn food(State(state): State<AppState>) -> ApiResult<Json<Vec<FoodEntry>>> {
    let entries = state
        .store
        .food_entries(calendar::today())
        .await
        .map_err(|e| ApiError::database("Error fetching food entries.", e))?;
    Ok(Json(entries))
}

/// GET /api/summary/weekly?start_date=YYYY-MM-DD - the ISO week containing the date
pub async fn weekly_summary(
    State(state): State<AppState>,
    Query(query): Query<WeeklySummaryQuery>,
) -> ApiResult<Json<WeeklyStats>> {
    let start = week_start(date_or_today(query.start_date.as_deref(), "start_date")?);
    let stats = state
        .store
        .weekly_stats(start)
        .await
        .map_err(|e| ApiError::database("Error fetching weekly summary.", e))?;
    Ok(Json(stats.unwrap_or_else(|| WeeklyStats::empty(start))))
}

/// GET /api/goals
pub async fn goals(State(state): State<AppState>) -> ApiResult<Json<GoalProjection>> {
    let projection = calculate_projection(
        state.store.as_ref(),
        &state.config.dashboard,
        calendar::today(),
    )
    .await
    .map_err(|e| ApiError::database("Error calculating goal projection.", e))?;
    Ok(Json(projection))
}
