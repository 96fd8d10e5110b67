// handlers/htmx.rs - POST /log, POST /food, DELETE /food
//
// Each mutation answers an HTMX request with the fragment(s) it changed and
// anything else with a 303 back to the dashboard.

use std::str::FromStr;

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::database::models::DailyLogUpdate;
use crate::error::{ApiError, ApiResult};
use crate::services::calendar::{self, window_around};
use crate::state::AppState;
use crate::views::{food_mutation_response, summary_table, SummaryFragment};

use super::is_htmx;

#[derive(Debug, Default, Deserialize)]
pub struct LogForm {
    pub weight: Option<String>,
    pub mood: Option<String>,
    pub sleep: Option<String>,
    pub motivation: Option<String>,
}

impl LogForm {
    /// Blank fields are skipped; anything else must parse
    fn to_update(&self) -> ApiResult<DailyLogUpdate> {
        Ok(DailyLogUpdate {
            weight_kg: form_value("weight", &self.weight)?,
            mood: form_value("mood", &self.mood)?,
            sleep_duration: form_value("sleep", &self.sleep)?,
            motivation: form_value("motivation", &self.motivation)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FoodForm {
    pub calories: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteFoodQuery {
    pub id: Option<String>,
}

fn form_value<T: FromStr>(name: &str, value: &Option<String>) -> ApiResult<Option<T>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("bad {}", name))),
    }
}

/// POST /log - update today's daily log from the dashboard form
pub async fn log_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<LogForm>, FormRejection>,
) -> ApiResult<Response> {
    let Form(form) = form.map_err(|_| ApiError::bad_request("bad form"))?;
    let update = form.to_update()?;
    let today = calendar::today();

    state
        .store
        .update_daily_log(today, &update)
        .await
        .map_err(|e| ApiError::database("Error updating daily log", e))?;
    debug!(?update, "daily log updated");

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/").into_response());
    }

    let (start, end) = window_around(today, state.config.dashboard.summary_span_days);
    let days = state
        .store
        .daily_summaries(start, end)
        .await
        .map_err(|e| ApiError::database("Error fetching summary", e))?;

    let markup = summary_table(&days, today, today, SummaryFragment::Inline);
    Ok(Html(markup.into_string()).into_response())
}

/// POST /food - add a food entry to today's log
pub async fn food_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<FoodForm>, FormRejection>,
) -> ApiResult<Response> {
    let Form(form) = form.map_err(|_| ApiError::bad_request("bad form"))?;
    let calories = match form_value::<i32>("calories", &form.calories) {
        Ok(Some(c)) if c >= 0 => c,
        _ => return Err(ApiError::bad_request("calories")),
    };
    let note = form.note.as_deref().map(str::trim).unwrap_or_default();

    let id = state
        .store
        .add_food_entry(calendar::today(), calories, note)
        .await
        .map_err(|e| ApiError::database("Database error", e))?;
    debug!(id, calories, "food entry added");

    food_mutation_reply(&state, &headers).await
}

/// DELETE /food?id=N - remove one of the user's food entries
pub async fn food_delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DeleteFoodQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let id = query
        .ok()
        .and_then(|Query(q)| q.id)
        .and_then(|id| id.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("bad id"))?;

    let removed = state
        .store
        .delete_food_entry(id)
        .await
        .map_err(|e| ApiError::database("Database error", e))?;
    if !removed {
        warn!(id, "food entry not found for user");
    }

    food_mutation_reply(&state, &headers).await
}

/// Food list as the primary swap plus the summary swapped out of band
async fn food_mutation_reply(state: &AppState, headers: &HeaderMap) -> ApiResult<Response> {
    if !is_htmx(headers) {
        return Ok(Redirect::to("/").into_response());
    }

    let today = calendar::today();
    let (start, end) = window_around(today, state.config.dashboard.summary_span_days);
    let store = state.store.as_ref();
    let (food, days) = futures::try_join!(store.food_entries(today), store.daily_summaries(start, end))
        .map_err(|e| ApiError::database("Error rendering food entries", e))?;

    let markup = food_mutation_response(&food, &days, today, today);
    Ok(Html(markup.into_string()).into_response())
}
