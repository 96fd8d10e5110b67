//! Server-rendered pages and HTMX fragments.
//!
//! Fragments that HTMX swaps carry stable ids: `#summary`, `#food-list`.
//! After a food mutation the summary is re-sent with `hx-swap-oob` so both
//! stay consistent with one round trip.

pub mod dashboard;
pub mod format;
pub mod partials;
pub mod weekly;

use maud::{html, Markup, DOCTYPE};

pub use dashboard::{render_dashboard, DashboardPage};
pub use partials::{food_list, food_mutation_response, summary_table, SummaryFragment};
pub use weekly::render_weekly;

pub const SUMMARY_ID: &str = "summary";
pub const FOOD_LIST_ID: &str = "food-list";

/// Shared page chrome
pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Vitals" }
                link rel="stylesheet" href="/static/app.css";
                script src="/static/htmx.min.js" defer {}
            }
            body {
                nav.top {
                    a href="/" { "Today" }
                    a href="/weekly" { "Weekly" }
                }
                main.container {
                    (body)
                }
                script src="/static/app.js" defer {}
            }
        }
    }
}
