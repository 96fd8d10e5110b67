#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use tower::ServiceExt;

use vitals::config::AppConfig;
use vitals::database::models::{
    BmiPoint, DailyLogUpdate, DailySummary, FoodEntry, QuickAddItem, WeeklyStats, WeightSample,
};
use vitals::database::{DatabaseError, MetricsStore};
use vitals::{api_router, create_app, AppState};

pub use vitals::services::calendar::today;

const HEIGHT_M: f64 = 1.75;

#[derive(Default)]
struct Inner {
    logs: BTreeMap<NaiveDate, DailySummary>,
    food: Vec<(NaiveDate, FoodEntry)>,
    weekly: HashMap<NaiveDate, WeeklyStats>,
    next_id: i64,
    failing: HashSet<&'static str>,
}

impl Inner {
    fn check(&self, op: &'static str) -> Result<(), DatabaseError> {
        if self.failing.contains(op) || self.failing.contains("*") {
            Err(DatabaseError::Sqlx(sqlx::Error::Protocol(format!("{} failed", op))))
        } else {
            Ok(())
        }
    }

    fn upsert(&mut self, date: NaiveDate) -> &mut DailySummary {
        self.logs
            .entry(date)
            .or_insert_with(|| DailySummary::empty(date))
    }

    /// Stored row with food totals folded in, like `v_daily_summary`
    fn summary(&self, date: NaiveDate) -> Option<DailySummary> {
        let mut row = self.logs.get(&date)?.clone();
        let entries: Vec<i32> = self
            .food
            .iter()
            .filter(|(d, _)| *d == date)
            .map(|(_, e)| e.calories)
            .collect();
        if !entries.is_empty() {
            row.kcal_estimated = Some(entries.iter().sum());
        }
        Some(row)
    }
}

/// `MetricsStore` held in memory so the router runs without Postgres
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_summary(&self, summary: DailySummary) {
        self.inner.lock().unwrap().logs.insert(summary.log_date, summary);
    }

    pub fn seed_weight(&self, date: NaiveDate, weight_kg: f64) {
        self.inner.lock().unwrap().upsert(date).weight_kg = Some(weight_kg);
    }

    pub fn seed_weekly(&self, stats: WeeklyStats) {
        self.inner.lock().unwrap().weekly.insert(stats.week_start, stats);
    }

    /// Make one store operation (or `"*"` for all) return a database error
    pub fn fail(&self, op: &'static str) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    pub fn summary(&self, date: NaiveDate) -> Option<DailySummary> {
        self.inner.lock().unwrap().summary(date)
    }

    pub fn food_on(&self, date: NaiveDate) -> Vec<FoodEntry> {
        self.inner
            .lock()
            .unwrap()
            .food
            .iter()
            .filter(|(d, _)| *d == date)
            .map(|(_, e)| e.clone())
            .collect()
    }
}

#[async_trait]
impl MetricsStore for MemoryStore {
    async fn daily_summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("daily_summaries")?;
        Ok(inner
            .logs
            .range(start..=end)
            .filter_map(|(date, _)| inner.summary(*date))
            .collect())
    }

    async fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("daily_summary")?;
        Ok(inner.summary(date).unwrap_or_else(|| DailySummary::empty(date)))
    }

    async fn food_entries(&self, date: NaiveDate) -> Result<Vec<FoodEntry>, DatabaseError> {
        self.inner.lock().unwrap().check("food_entries")?;
        let mut entries = self.food_on(date);
        entries.sort_by_key(|e| e.created_at);
        Ok(entries)
    }

    async fn quick_add_items(&self, limit: i64) -> Result<Vec<QuickAddItem>, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("quick_add_items")?;

        let mut groups: HashMap<(String, i32), (usize, chrono::DateTime<Utc>)> = HashMap::new();
        for (_, e) in &inner.food {
            let key = (e.note.clone().unwrap_or_default(), e.calories);
            let slot = groups.entry(key).or_insert((0, e.created_at));
            slot.0 += 1;
            slot.1 = slot.1.max(e.created_at);
        }

        let mut ranked: Vec<_> = groups.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(b.1 .1.cmp(&a.1 .1)));
        Ok(ranked
            .into_iter()
            .take(limit as usize)
            .map(|((note, calories), _)| QuickAddItem { note, calories })
            .collect())
    }

    async fn weight_samples(&self, limit: i64) -> Result<Vec<WeightSample>, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("weight_samples")?;

        let mut samples: Vec<WeightSample> = inner
            .logs
            .values()
            .rev()
            .filter_map(|d| {
                d.weight_kg.map(|weight_kg| WeightSample {
                    log_date: d.log_date,
                    weight_kg,
                })
            })
            .take(limit as usize)
            .collect();
        samples.reverse();
        Ok(samples)
    }

    async fn bmi_series(&self, end: NaiveDate, days: i32) -> Result<Vec<BmiPoint>, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("bmi_series")?;

        Ok((0..days as i64)
            .rev()
            .map(|back| {
                let log_date = end - Duration::days(back);
                let bmi = inner
                    .logs
                    .get(&log_date)
                    .and_then(|d| d.weight_kg)
                    .map(|w| w / (HEIGHT_M * HEIGHT_M));
                BmiPoint { log_date, bmi }
            })
            .collect())
    }

    async fn weekly_stats(&self, week_start: NaiveDate) -> Result<Option<WeeklyStats>, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("weekly_stats")?;
        Ok(inner.weekly.get(&week_start).cloned())
    }

    async fn update_daily_log(
        &self,
        date: NaiveDate,
        update: &DailyLogUpdate,
    ) -> Result<(), DatabaseError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("update_daily_log")?;

        let row = inner.upsert(date);
        if let Some(v) = update.weight_kg {
            row.weight_kg = Some(v);
        }
        if let Some(v) = update.mood {
            row.mood = Some(v);
        }
        if let Some(v) = update.sleep_duration {
            row.sleep_duration = Some(v);
        }
        if let Some(v) = update.motivation {
            row.motivation = Some(v);
        }
        Ok(())
    }

    async fn add_activity(&self, date: NaiveDate, minutes: i32) -> Result<(), DatabaseError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("add_activity")?;

        let row = inner.upsert(date);
        row.total_activity_min = Some(row.total_activity_min.unwrap_or(0) + minutes);
        Ok(())
    }

    async fn add_food_entry(
        &self,
        date: NaiveDate,
        calories: i32,
        note: &str,
    ) -> Result<i64, DatabaseError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("add_food_entry")?;

        inner.upsert(date);
        inner.next_id += 1;
        let id = inner.next_id;
        let entry = FoodEntry {
            id,
            created_at: Utc::now() + Duration::milliseconds(id),
            calories,
            note: Some(note.to_string()).filter(|n| !n.is_empty()),
        };
        inner.food.push((date, entry));
        Ok(id)
    }

    async fn delete_food_entry(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("delete_food_entry")?;

        let before = inner.food.len();
        inner.food.retain(|(_, e)| e.id != id);
        Ok(inner.food.len() < before)
    }

    async fn calories_total(&self, date: NaiveDate) -> Result<i64, DatabaseError> {
        let inner = self.inner.lock().unwrap();
        inner.check("calories_total")?;
        Ok(inner
            .food
            .iter()
            .filter(|(d, _)| *d == date)
            .map(|(_, e)| i64::from(e.calories))
            .sum())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.inner.lock().unwrap().check("ping")
    }
}

pub fn state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(store, AppConfig::default())
}

pub fn app(store: &Arc<MemoryStore>) -> Router {
    create_app(state(store.clone()))
}

pub fn api_only(store: &Arc<MemoryStore>) -> Router {
    api_router(state(store.clone()))
}

pub fn app_with_config(store: &Arc<MemoryStore>, config: AppConfig) -> Router {
    create_app(AppState::new(store.clone(), config))
}

pub fn api_only_with_config(store: &Arc<MemoryStore>, config: AppConfig) -> Router {
    api_router(AppState::new(store.clone(), config))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Result<TestResponse> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec())?,
    })
}

pub async fn get(app: Router, uri: &str) -> Result<TestResponse> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

pub async fn get_from_origin(app: Router, uri: &str, origin: &str) -> Result<TestResponse> {
    let request = Request::builder()
        .uri(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())?;
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Result<TestResponse> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str, htmx: bool) -> Result<TestResponse> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    send(app, builder.body(Body::from(body.to_string()))?).await
}

pub async fn delete(app: Router, uri: &str, htmx: bool) -> Result<TestResponse> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    send(app, builder.body(Body::empty())?).await
}
