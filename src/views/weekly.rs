use chrono::Duration;
use maud::{html, Markup};

use crate::database::models::WeeklyStats;

use super::format::{fmt_f1, fmt_int, fmt_signed};
use super::layout;

pub fn render_weekly(week: &WeeklyStats) -> Markup {
    let week_end = week.week_start + Duration::days(6);
    let prev = week.week_start - Duration::days(7);
    let next = week.week_start + Duration::days(7);

    let body = html! {
        header.pivot {
            a.prev href={ "/weekly?d=" (prev.format("%Y-%m-%d").to_string()) } { "‹" }
            h1 {
                "Week of " (week.week_start.format("%d %b").to_string())
                " – " (week_end.format("%d %b %Y").to_string())
            }
            a.next href={ "/weekly?d=" (next.format("%Y-%m-%d").to_string()) } { "›" }
        }
        section.weekly {
            dl {
                dt { "Average weight" }
                dd { (fmt_f1(week.avg_weight)) " kg" }
                dt { "Estimated kcal" }
                dd { (fmt_int(week.total_estimated)) }
                dt { "Budgeted kcal" }
                dd { (fmt_int(week.total_budgeted)) }
                dt { "Deficit" }
                dd.deficit { (fmt_signed(week.total_deficit)) }
            }
        }
    };

    layout("Weekly", body)
}
