use anyhow::Context;

use crate::cli::utils::{output_error, output_record, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, MetricsStore, Repository};
use crate::services::calendar::{self, parse_date};
use crate::services::{calculate_projection, TargetProjection};
use crate::views::format::{fmt_f1, fmt_int, fmt_signed};

async fn open_store(config: &AppConfig) -> anyhow::Result<Repository> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    Ok(Repository::new(pool, config.dashboard.user_id))
}

fn describe_target(target: &TargetProjection) -> String {
    match (target.days, target.date) {
        (Some(days), Some(date)) => format!(
            "{:.1} kg in {} days ({})",
            target.weight,
            days,
            date.format(calendar::DATE_FORMAT)
        ),
        _ => format!("{:.1} kg not projected", target.weight),
    }
}

/// `vitals goals`
pub async fn goals(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let projection = calculate_projection(&store, &config.dashboard, calendar::today())
        .await
        .context("failed to calculate goal projection")?;

    output_record(
        output_format,
        "Goal projection",
        &[
            ("Current", format!("{:.1} kg", projection.current_weight)),
            ("Trend", format!("{:+.3} kg/day", projection.daily_change)),
            ("Milestone", describe_target(&projection.milestone)),
            ("Goal", describe_target(&projection.goal)),
        ],
        serde_json::to_value(&projection)?,
    )
}

/// `vitals day [--date YYYY-MM-DD]`
pub async fn day(
    config: &AppConfig,
    date: Option<&str>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let date = match date {
        None => calendar::today(),
        Some(raw) => match parse_date(raw) {
            Some(d) => d,
            None => {
                output_error(
                    output_format,
                    "Invalid date format. Please use YYYY-MM-DD.",
                    Some("INVALID_DATE"),
                )?;
                anyhow::bail!("invalid date '{}'", raw);
            }
        },
    };

    let store = open_store(config).await?;
    let summary = store
        .daily_summary(date)
        .await
        .context("failed to fetch daily summary")?;

    output_record(
        output_format,
        &format!("Summary for {}", date.format(calendar::DATE_FORMAT)),
        &[
            ("Weight", fmt_f1(summary.weight_kg)),
            ("kcal estimated", fmt_int(summary.kcal_estimated)),
            ("kcal budgeted", fmt_int(summary.kcal_budgeted)),
            ("Balance", fmt_signed(summary.kcal_balance())),
            ("Mood", fmt_int(summary.mood)),
            ("Motivation", fmt_int(summary.motivation)),
            ("Activity", fmt_int(summary.total_activity_min)),
            ("Sleep", fmt_int(summary.sleep_duration)),
        ],
        serde_json::to_value(&summary)?,
    )
}

/// `vitals health`
pub async fn health(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let result = DatabaseManager::health_check(&pool).await;
    DatabaseManager::close(pool).await;

    match result {
        Ok(()) => output_success(output_format, "Database is reachable"),
        Err(e) => {
            output_error(output_format, "Database unavailable", Some("SERVICE_UNAVAILABLE"))?;
            Err(e).context("health check failed")
        }
    }
}
