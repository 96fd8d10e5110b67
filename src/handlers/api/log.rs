// handlers/api/log.rs - POST /api/log/{weight,calorie,cardio,mood}
//
// Bodies are decoded from raw bytes so clients need not send a JSON
// Content-Type. Missing or null numeric fields count as zero and are then
// validated.

use axum::{body::Bytes, extract::State, Json};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{error, info};

use crate::database::models::DailyLogUpdate;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::{date_or_today, LogResponse};

#[derive(Debug, Deserialize)]
pub struct WeightLogRequest {
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalorieLogRequest {
    #[serde(default)]
    pub calories: Option<i32>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CardioLogRequest {
    #[serde(default)]
    pub duration_min: Option<i32>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodLogRequest {
    #[serde(default)]
    pub mood: Option<i32>,
    #[serde(default)]
    pub date: Option<String>,
}

fn decode<T: DeserializeOwned>(body: &Bytes, what: &str) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, "decode {} payload", what);
        ApiError::invalid_json(format!("Invalid JSON payload: {}", e))
    })
}

/// POST /api/log/weight
pub async fn log_weight(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LogResponse>> {
    let req: WeightLogRequest = decode(&body, "weight")?;
    let weight_kg = req.weight_kg.unwrap_or(0.0);
    if weight_kg <= 0.0 {
        return Err(ApiError::bad_request("weight_kg must be a positive value"));
    }
    let date = date_or_today(req.date.as_deref(), "date")?;

    let update = DailyLogUpdate {
        weight_kg: Some(weight_kg),
        ..Default::default()
    };
    state
        .store
        .update_daily_log(date, &update)
        .await
        .map_err(|e| ApiError::database("Database error while updating weight.", e))?;

    info!(%date, weight_kg, "weight logged");
    Ok(Json(LogResponse::ok("Weight logged successfully")))
}

/// POST /api/log/calorie
pub async fn log_calorie(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LogResponse>> {
    let req: CalorieLogRequest = decode(&body, "calorie")?;
    let calories = req.calories.unwrap_or(0);
    if calories < 0 {
        return Err(ApiError::bad_request("calories must be a non-negative value"));
    }
    let date = date_or_today(req.date.as_deref(), "date")?;

    let id = state
        .store
        .add_food_entry(date, calories, req.note.as_deref().unwrap_or_default())
        .await
        .map_err(|e| ApiError::database("Database error while logging calorie entry.", e))?;

    info!(%date, id, calories, "calorie entry logged");
    Ok(Json(LogResponse::ok("Calorie entry logged successfully")))
}

/// POST /api/log/cardio
pub async fn log_cardio(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LogResponse>> {
    let req: CardioLogRequest = decode(&body, "cardio")?;
    let duration_min = req.duration_min.unwrap_or(0);
    if duration_min < 0 {
        return Err(ApiError::bad_request("duration_min must be a non-negative value"));
    }
    let date = date_or_today(req.date.as_deref(), "date")?;

    state
        .store
        .add_activity(date, duration_min)
        .await
        .map_err(|e| ApiError::database("Database error while logging cardio activity.", e))?;

    info!(%date, duration_min, "cardio logged");
    Ok(Json(LogResponse::ok("Cardio activity logged successfully")))
}

/// POST /api/log/mood
pub async fn log_mood(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LogResponse>> {
    let req: MoodLogRequest = decode(&body, "mood")?;
    let mood = req.mood.unwrap_or(0);
    let date = date_or_today(req.date.as_deref(), "date")?;

    let update = DailyLogUpdate {
        mood: Some(mood),
        ..Default::default()
    };
    state
        .store
        .update_daily_log(date, &update)
        .await
        .map_err(|e| ApiError::database("Database error while logging mood.", e))?;

    info!(%date, mood, "mood logged");
    Ok(Json(LogResponse::ok("Mood logged successfully")))
}
