//! Saved-excuse list rendering.
//!
//! Display order is always recomputed from `created_at`, newest first;
//! storage order is never trusted for display.

use std::fmt::Write as _;

use alibi_core::models::excuse::SavedExcuse;
use jiff::Timestamp;

pub const EMPTY_PLACEHOLDER: &str =
    "You haven't saved any excuses yet. Generate one and save it for later!";

/// One displayed row. `id` is the handle passed back to delete the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcuseRow<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub details: String,
    pub saved: String,
}

/// Rows sorted by `created_at` descending. Ties keep their store order.
pub fn rows(excuses: &[SavedExcuse], now: Timestamp) -> Vec<ExcuseRow<'_>> {
    let mut sorted: Vec<&SavedExcuse> = excuses.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .map(|excuse| ExcuseRow {
            id: &excuse.id,
            text: &excuse.text,
            details: details(excuse),
            saved: format!("Saved: {}", relative_time(excuse.created_at, now)),
        })
        .collect()
}

/// Render the whole list, or the placeholder when there is nothing saved.
pub fn render_list(excuses: &[SavedExcuse], now: Timestamp) -> String {
    if excuses.is_empty() {
        return format!("Saved Excuses\n\n{EMPTY_PLACEHOLDER}\n");
    }

    let mut out = String::from("Your Saved Excuses\n");
    for row in rows(excuses, now) {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\n{}\n  {}\n  {}\n  id: {}\n",
            row.text, row.details, row.saved, row.id
        );
    }
    out
}

fn details(excuse: &SavedExcuse) -> String {
    let mut details = format!("Context: {}", excuse.context);
    if let Some(urgency) = excuse.urgency {
        details.push_str(&format!(", Urgency: {urgency}"));
    }
    if let Some(believability) = excuse.believability {
        details.push_str(&format!(", Believability: {believability}"));
    }
    details
}

/// Coarse, human-scale distance between `then` and `now`, e.g.
/// `"about 3 hours ago"`. Timestamps in the future read as just now.
pub fn relative_time(then: Timestamp, now: Timestamp) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let secs = now.duration_since(then).as_secs().max(0);

    let phrase = if secs < 30 {
        "less than a minute".to_string()
    } else if secs < 90 {
        "1 minute".to_string()
    } else if secs < 45 * MINUTE {
        format!("{} minutes", round_div(secs, MINUTE))
    } else if secs < 90 * MINUTE {
        "about 1 hour".to_string()
    } else if secs < DAY {
        format!("about {} hours", round_div(secs, HOUR))
    } else if secs < 42 * HOUR {
        "1 day".to_string()
    } else if secs < MONTH {
        format!("{} days", round_div(secs, DAY))
    } else if secs < 45 * DAY {
        "about 1 month".to_string()
    } else if secs < YEAR {
        format!("{} months", round_div(secs, MONTH).max(2))
    } else {
        match round_div(secs, YEAR).max(1) {
            1 => "about 1 year".to_string(),
            years => format!("about {years} years"),
        }
    };

    format!("{phrase} ago")
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

