use chrono::{Local, NaiveDate};
use maud::{html, Markup};
use serde_json::json;

use crate::database::models::{DailySummary, FoodEntry, QuickAddItem};
use crate::services::GoalProjection;

use super::format::{fmt_f1, fmt_int, fmt_signed, format_note};
use super::{FOOD_LIST_ID, SUMMARY_ID};

/// How the summary table is being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFragment {
    /// Part of a full page, or the primary target of an HTMX swap
    Inline,
    /// Secondary fragment replacing `#summary` out of band
    OutOfBand,
}

/// The ±span day summary table (`#summary`)
pub fn summary_table(
    days: &[DailySummary],
    pivot: NaiveDate,
    today: NaiveDate,
    fragment: SummaryFragment,
) -> Markup {
    let oob = (fragment == SummaryFragment::OutOfBand).then_some("outerHTML");

    html! {
        section.summary id=(SUMMARY_ID) hx-swap-oob=[oob] {
            table {
                thead {
                    tr {
                        th { "Date" }
                        th { "Weight" }
                        th { "kcal est." }
                        th { "kcal budget" }
                        th { "Balance" }
                        th { "Mood" }
                        th { "Motivation" }
                        th { "Activity" }
                        th { "Sleep" }
                    }
                }
                tbody {
                    @if days.is_empty() {
                        tr.empty {
                            td colspan="9" { "Nothing logged in this window." }
                        }
                    }
                    @for day in days {
                        tr.pivot[day.log_date == pivot].today[day.log_date == today] {
                            td {
                                a href={ "/?d=" (day.log_date.format("%Y-%m-%d").to_string()) } {
                                    (day.log_date.format("%a %d %b").to_string())
                                }
                            }
                            td { (fmt_f1(day.weight_kg)) }
                            td { (fmt_int(day.kcal_estimated)) }
                            td { (fmt_int(day.kcal_budgeted)) }
                            td.balance { (fmt_signed(day.kcal_balance())) }
                            td { (fmt_int(day.mood)) }
                            td { (fmt_int(day.motivation)) }
                            td { (fmt_int(day.total_activity_min)) }
                            td { (fmt_int(day.sleep_duration)) }
                        }
                    }
                }
            }
        }
    }
}

/// Today's food entries (`#food-list`) with per-entry delete buttons
pub fn food_list(entries: &[FoodEntry]) -> Markup {
    let total: i64 = entries.iter().map(|e| i64::from(e.calories)).sum();

    html! {
        section.food id=(FOOD_LIST_ID) {
            @if entries.is_empty() {
                p.empty { "No food logged today." }
            } @else {
                table {
                    tbody {
                        @for entry in entries {
                            tr {
                                td.time { (entry.created_at.with_timezone(&Local).format("%H:%M").to_string()) }
                                td.kcal { (entry.calories) }
                                td.note { (format_note(entry.note.as_deref())) }
                                td {
                                    button.delete
                                        hx-delete={ "/food?id=" (entry.id) }
                                        hx-target={ "#" (FOOD_LIST_ID) }
                                        hx-swap="outerHTML"
                                        hx-confirm="Delete this entry?" { "✕" }
                                }
                            }
                        }
                    }
                    tfoot {
                        tr {
                            td { "Total" }
                            td.kcal { (total) }
                            td colspan="2" {}
                        }
                    }
                }
            }
        }
    }
}

/// One-click re-entry buttons for frequent foods
pub fn quick_add(items: &[QuickAddItem]) -> Markup {
    html! {
        @if !items.is_empty() {
            div.quick-add {
                @for item in items {
                    button.quick
                        hx-post="/food"
                        hx-vals=(json!({ "calories": item.calories.to_string(), "note": item.note }).to_string())
                        hx-target={ "#" (FOOD_LIST_ID) }
                        hx-swap="outerHTML" {
                        (format_note(Some(item.note.as_str()))) " · " (item.calories) " kcal"
                    }
                }
            }
        }
    }
}

/// Trend and projected dates for the milestone and goal weights
pub fn goals_panel(goals: &GoalProjection) -> Markup {
    let targets = [("Milestone", &goals.milestone), ("Goal", &goals.goal)];

    html! {
        section.goals {
            p {
                "Current " strong { (format!("{:.1}", goals.current_weight)) " kg" }
                ", trend " strong { (format!("{:+.3}", goals.daily_change)) " kg/day" }
            }
            ul {
                @for (label, target) in targets {
                    li title=[target.formula.as_deref()] {
                        (label) " " (format!("{:.1}", target.weight)) " kg: "
                        @match (target.days, target.date) {
                            (Some(days), Some(date)) => {
                                (days) " days (" (date.format("%Y-%m-%d").to_string()) ")"
                            }
                            _ => { "not projected" }
                        }
                    }
                }
            }
        }
    }
}

/// Body returned after an HTMX food mutation: the refreshed list followed by
/// the summary table swapped out of band.
pub fn food_mutation_response(
    entries: &[FoodEntry],
    days: &[DailySummary],
    pivot: NaiveDate,
    today: NaiveDate,
) -> Markup {
    html! {
        (food_list(entries))
        "\n"
        (summary_table(days, pivot, today, SummaryFragment::OutOfBand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{GoalProjection, WeightTrend};
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn inline_summary_has_no_oob_attribute() {
        let html = summary_table(&[], day(1), day(1), SummaryFragment::Inline).into_string();
        assert!(html.contains(r#"id="summary""#));
        assert!(!html.contains("hx-swap-oob"));
        assert!(html.contains("Nothing logged"));
    }

    #[test]
    fn oob_summary_is_tagged_for_outer_html_swap() {
        let mut summary = DailySummary::empty(day(1));
        summary.weight_kg = Some(70.44);
        summary.kcal_budgeted = Some(1800);
        summary.kcal_estimated = Some(1650);

        let html = summary_table(&[summary], day(1), day(1), SummaryFragment::OutOfBand).into_string();
        assert!(html.contains(r#"hx-swap-oob="outerHTML""#));
        assert!(html.contains("70.4"));
        assert!(html.contains("+150"));
        assert!(html.contains(r#"class="pivot today""#));
    }

    #[test]
    fn food_list_shows_notes_totals_and_delete_buttons() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let entries = vec![
            FoodEntry {
                id: 7,
                created_at,
                calories: 300,
                note: Some("{Oats true}".into()),
            },
            FoodEntry {
                id: 8,
                created_at,
                calories: 150,
                note: None,
            },
        ];
        let html = food_list(&entries).into_string();
        assert!(html.contains(r#"id="food-list""#));
        assert!(html.contains("Oats"));
        assert!(!html.contains("{Oats"));
        assert!(html.contains(r#"hx-delete="/food?id=7""#));
        assert!(html.contains("450"));
    }

    #[test]
    fn mutation_response_puts_food_list_first() {
        let html = food_mutation_response(&[], &[], day(1), day(1)).into_string();
        let food = html.find(r#"id="food-list""#).unwrap();
        let summary = html.find(r#"id="summary""#).unwrap();
        assert!(food < summary);
        assert_eq!(html.matches("hx-swap-oob").count(), 1);
    }

    #[test]
    fn quick_add_encodes_values_for_htmx() {
        let items = vec![QuickAddItem {
            note: "Coffee".into(),
            calories: 40,
        }];
        let html = quick_add(&items).into_string();
        assert!(html.contains("hx-vals="));
        assert!(html.contains("Coffee · 40 kcal"));
        assert!(quick_add(&[]).into_string().is_empty());
    }

    #[test]
    fn goals_panel_lists_projection() {
        let trend = WeightTrend {
            current: 65.0,
            daily_change: -0.1,
        };
        let html = goals_panel(&GoalProjection::new(trend, 63.0, 70.0, day(1))).into_string();
        assert!(html.contains("20 days (2024-03-21)"));
        assert!(html.contains("not projected"));
        assert!(html.contains("-0.100"));
    }
}
