use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::error::ApiError;
use crate::handlers::{api, health, htmx, pages};
use crate::state::AppState;

/// Main listener: pages, HTMX fragments, the JSON API and static assets
pub fn create_app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);
    let enable_cors = state.config.security.enable_cors;

    let app = Router::new()
        // Pages
        .route("/", get(pages::index))
        .route("/weekly", get(pages::weekly))
        // HTMX form posts
        .route("/log", post(htmx::log_update))
        .route("/food", post(htmx::food_create).delete(htmx::food_delete))
        .route("/health", get(health::health))
        .merge(api_routes())
        .nest_service("/static", static_dir)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    with_cors(app, enable_cors).with_state(state)
}

/// API-only listener for agents and scripts
pub fn api_router(state: AppState) -> Router {
    let enable_cors = state.config.security.enable_cors;

    let app = Router::new()
        .route("/health", get(health::health))
        .merge(api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    with_cors(app, enable_cors).with_state(state)
}

fn with_cors(app: Router<AppState>, enable: bool) -> Router<AppState> {
    if enable {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bmi", get(api::bmi))
        .route("/api/goals", get(api::goals))
        // Logging
        .route("/api/log/weight", post(api::log_weight))
        .route("/api/log/calorie", post(api::log_calorie))
        .route("/api/log/cardio", post(api::log_cardio))
        .route("/api/log/mood", post(api::log_mood))
        // Reads
        .route("/api/summary/daily", get(api::daily_summary))
        .route("/api/summary/weekly", get(api::weekly_summary))
        .route("/api/calories/today", get(api::calories_today))
        .route("/api/food", get(api::food))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
