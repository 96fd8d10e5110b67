use chrono::{Duration, NaiveDate};
use maud::{html, Markup};

use crate::database::models::{DailySummary, FoodEntry, QuickAddItem};
use crate::services::GoalProjection;

use super::format::or_default;
use super::partials::{food_list, goals_panel, quick_add, summary_table, SummaryFragment};
use super::{layout, FOOD_LIST_ID, SUMMARY_ID};

/// Everything the index page shows
#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub pivot: NaiveDate,
    pub today: NaiveDate,
    pub summary: Vec<DailySummary>,
    pub food: Vec<FoodEntry>,
    pub quick_add: Vec<QuickAddItem>,
    /// `None` when the projection could not be computed
    pub goals: Option<GoalProjection>,
}

impl DashboardPage {
    fn today_summary(&self) -> Option<&DailySummary> {
        self.summary.iter().find(|d| d.log_date == self.today)
    }
}

pub fn render_dashboard(page: &DashboardPage) -> Markup {
    let today = page.today_summary();
    let week = Duration::days(7);

    let body = html! {
        header.pivot {
            a.prev href={ "/?d=" ((page.pivot - week).format("%Y-%m-%d").to_string()) } { "‹ week" }
            h1 { (page.pivot.format("%A %d %B %Y").to_string()) }
            a.next href={ "/?d=" ((page.pivot + week).format("%Y-%m-%d").to_string()) } { "week ›" }
        }

        section.log {
            h2 { "Today" }
            form method="post" action="/log"
                hx-post="/log" hx-target={ "#" (SUMMARY_ID) } hx-swap="outerHTML" {
                label {
                    "Weight (kg) "
                    input type="number" name="weight" step="0.1" min="0"
                        placeholder=[today.and_then(|d| d.weight_kg).map(|w| format!("{:.1}", w))];
                }
                label {
                    "Mood "
                    input type="range" name="mood" min="1" max="5"
                        value=(or_default(today.and_then(|d| d.mood), 3));
                }
                label {
                    "Motivation "
                    input type="range" name="motivation" min="1" max="5"
                        value=(or_default(today.and_then(|d| d.motivation), 3));
                }
                label {
                    "Sleep (min) "
                    input type="number" name="sleep" min="0" step="15"
                        placeholder=[today.and_then(|d| d.sleep_duration)];
                }
                button type="submit" { "Save" }
            }
        }

        (summary_table(&page.summary, page.pivot, page.today, SummaryFragment::Inline))

        section.food-log {
            h2 { "Food" }
            form method="post" action="/food"
                hx-post="/food" hx-target={ "#" (FOOD_LIST_ID) } hx-swap="outerHTML" {
                input type="number" name="calories" min="0" required placeholder="kcal";
                input type="text" name="note" placeholder="note";
                button type="submit" { "Add" }
            }
            (quick_add(&page.quick_add))
            (food_list(&page.food))
        }

        @if let Some(goals) = &page.goals {
            (goals_panel(goals))
        }

        section.bmi {
            h2 { "BMI, last 30 days" }
            canvas #bmi-chart data-src="/api/bmi" {}
        }
    };

    layout("Dashboard", body)
}
