use chrono::{Datelike, Duration, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today in the server's local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Monday of the ISO week containing `date` (Postgres `date_trunc('week', ..)`)
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Inclusive `pivot - span ..= pivot + span` window
pub fn window_around(pivot: NaiveDate, span: i64) -> (NaiveDate, NaiveDate) {
    (pivot - Duration::days(span), pivot + Duration::days(span))
}
