use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    BmiPoint, DailyLogUpdate, DailySummary, FoodEntry, QuickAddItem, WeeklyStats, WeightSample,
};
use crate::database::store::MetricsStore;

// Views may expose NUMERIC/SMALLINT columns; cast everything to the Rust-side types.
const SUMMARY_COLUMNS: &str = r#"
    log_date,
    weight_kg::float8          AS weight_kg,
    kcal_estimated::int4       AS kcal_estimated,
    kcal_budgeted::int4        AS kcal_budgeted,
    mood::int4                 AS mood,
    motivation::int4           AS motivation,
    total_activity_min::int4   AS total_activity_min,
    sleep_duration::int4       AS sleep_duration
"#;

const UPSERT_DAILY_LOG: &str = r#"
    INSERT INTO daily_logs (user_id, log_date)
    VALUES ($1, $2)
    ON CONFLICT (user_id, log_date) DO UPDATE SET log_date = EXCLUDED.log_date
    RETURNING log_id::int8
"#;

/// Postgres-backed `MetricsStore` for a single user
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
    user_id: i32,
}

impl Repository {
    pub fn new(pool: PgPool, user_id: i32) -> Self {
        Self { pool, user_id }
    }

    async fn upsert_log(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: NaiveDate,
    ) -> Result<i64, DatabaseError> {
        let log_id: i64 = sqlx::query_scalar(UPSERT_DAILY_LOG)
            .bind(self.user_id)
            .bind(date)
            .fetch_one(&mut **tx)
            .await?;
        Ok(log_id)
    }
}

#[async_trait]
impl MetricsStore for Repository {
    async fn daily_summaries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM v_daily_summary WHERE user_id = $1 AND log_date BETWEEN $2 AND $3 ORDER BY log_date",
            SUMMARY_COLUMNS
        );
        let rows = sqlx::query_as::<_, DailySummary>(&sql)
            .bind(self.user_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn daily_summary(&self, date: NaiveDate) -> Result<DailySummary, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM v_daily_summary WHERE user_id = $1 AND log_date = $2",
            SUMMARY_COLUMNS
        );
        let row = sqlx::query_as::<_, DailySummary>(&sql)
            .bind(self.user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.unwrap_or_else(|| DailySummary::empty(date)))
    }

    async fn food_entries(&self, date: NaiveDate) -> Result<Vec<FoodEntry>, DatabaseError> {
        let rows = sqlx::query_as::<_, FoodEntry>(
            r#"
            SELECT e.entry_id::int8           AS id,
                   e.created_at::timestamptz  AS created_at,
                   e.calories::int4           AS calories,
                   e.note
              FROM daily_calorie_entries e
              JOIN daily_logs l ON l.log_id = e.log_id
             WHERE l.user_id = $1
               AND l.log_date = $2
             ORDER BY e.created_at
            "#,
        )
        .bind(self.user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn quick_add_items(&self, limit: i64) -> Result<Vec<QuickAddItem>, DatabaseError> {
        let rows = sqlx::query_as::<_, QuickAddItem>(
            r#"
            SELECT COALESCE(NULLIF(e.note, ''), '') AS note,
                   e.calories::int4                AS calories
              FROM daily_calorie_entries e
              JOIN daily_logs l ON l.log_id = e.log_id
             WHERE l.user_id = $1
             GROUP BY COALESCE(NULLIF(e.note, ''), ''), e.calories
             ORDER BY COUNT(*) DESC, MAX(e.created_at) DESC
             LIMIT $2
            "#,
        )
        .bind(self.user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn weight_samples(&self, limit: i64) -> Result<Vec<WeightSample>, DatabaseError> {
        let rows = sqlx::query_as::<_, WeightSample>(
            r#"
            SELECT log_date, weight_kg FROM (
                SELECT log_date, weight_kg::float8 AS weight_kg
                  FROM v_daily_summary
                 WHERE user_id = $1 AND weight_kg IS NOT NULL
                 ORDER BY log_date DESC
                 LIMIT $2
            ) t ORDER BY log_date
            "#,
        )
        .bind(self.user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn bmi_series(&self, end: NaiveDate, days: i32) -> Result<Vec<BmiPoint>, DatabaseError> {
        let rows = sqlx::query_as::<_, BmiPoint>(
            r#"
            SELECT d.dt::date     AS log_date,
                   b.bmi::float8  AS bmi
              FROM generate_series(
                       $2::date - ($3::int4 - 1) * INTERVAL '1 day',
                       $2::date,
                       INTERVAL '1 day'
                   ) AS d(dt)
              LEFT JOIN v_bmi AS b
                ON b.log_date = d.dt::date AND b.user_id = $1
             ORDER BY d.dt
            "#,
        )
        .bind(self.user_id)
        .bind(end)
        .bind(days)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn weekly_stats(&self, week_start: NaiveDate) -> Result<Option<WeeklyStats>, DatabaseError> {
        let row = sqlx::query_as::<_, WeeklyStats>(
            r#"
            SELECT week_start::date          AS week_start,
                   avg_weight::float8        AS avg_weight,
                   total_estimated::int4     AS total_estimated,
                   total_budgeted::int4      AS total_budgeted,
                   total_deficit::int4       AS total_deficit
              FROM v_weekly_stats
             WHERE user_id = $1 AND week_start::date = $2
            "#,
        )
        .bind(self.user_id)
        .bind(week_start)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_daily_log(
        &self,
        date: NaiveDate,
        update: &DailyLogUpdate,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let log_id = self.upsert_log(&mut tx, date).await?;

        if !update.is_empty() {
            sqlx::query(
                r#"
                UPDATE daily_logs
                   SET weight_kg      = COALESCE($3, weight_kg),
                       mood           = COALESCE($4, mood),
                       sleep_duration = COALESCE($5, sleep_duration),
                       motivation     = COALESCE($6, motivation)
                 WHERE log_id = $1 AND user_id = $2
                "#,
            )
            .bind(log_id)
            .bind(self.user_id)
            .bind(update.weight_kg)
            .bind(update.mood)
            .bind(update.sleep_duration)
            .bind(update.motivation)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn add_activity(&self, date: NaiveDate, minutes: i32) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let log_id = self.upsert_log(&mut tx, date).await?;

        sqlx::query(
            r#"
            UPDATE daily_logs
               SET total_activity_min = COALESCE(total_activity_min, 0) + $3
             WHERE log_id = $1 AND user_id = $2
            "#,
        )
        .bind(log_id)
        .bind(self.user_id)
        .bind(minutes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn add_food_entry(
        &self,
        date: NaiveDate,
        calories: i32,
        note: &str,
    ) -> Result<i64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let log_id = self.upsert_log(&mut tx, date).await?;

        let entry_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO daily_calorie_entries (log_id, calories, note)
            VALUES ($1, $2, NULLIF($3, ''))
            RETURNING entry_id::int8
            "#,
        )
        .bind(log_id)
        .bind(calories)
        .bind(note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(entry_id)
    }

    async fn delete_food_entry(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            DELETE FROM daily_calorie_entries e
             USING daily_logs l
             WHERE e.log_id = l.log_id
               AND l.user_id = $1
               AND e.entry_id = $2
            "#,
        )
        .bind(self.user_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn calories_total(&self, date: NaiveDate) -> Result<i64, DatabaseError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(e.calories), 0)::int8
              FROM daily_calorie_entries e
              JOIN daily_logs l ON e.log_id = l.log_id
             WHERE l.user_id = $1 AND l.log_date = $2
            "#,
        )
        .bind(self.user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
