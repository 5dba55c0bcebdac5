//! Pure display formatting for amounts, dates and table cells.

use crate::labels::{Locale, ReportLabels};
use crate::period::ReportPeriod;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use smartspend_types::TransactionDate;

pub const DESCRIPTION_MAX_CHARS: usize = 16;
pub const CATEGORY_MAX_CHARS: usize = 10;

/// `symbol` followed by the amount with two decimals, halves rounded away
/// from zero. The sign is kept: `€-50.00`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", symbol, rounded)
}

/// Resolves a transaction date to a calendar day. Arrays are read as
/// `[year, month, day, ..]`; strings as RFC 3339, a naive timestamp or a
/// leading `YYYY-MM-DD`. Impossible days yield `None` rather than rolling
/// over into the next month.
pub fn resolve_date(date: &TransactionDate) -> Option<NaiveDate> {
    match date {
        TransactionDate::Parts(parts) => match parts.as_slice() {
            [year, month, day, ..] => NaiveDate::from_ymd_opt(
                i32::try_from(*year).ok()?,
                u32::try_from(*month).ok()?,
                u32::try_from(*day).ok()?,
            ),
            _ => None,
        },
        TransactionDate::Text(text) => parse_date_text(text.trim()),
        TransactionDate::Other(_) => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    let prefix = text.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// `dd/mm/yy`, or the "not available" label.
pub fn format_short_date(date: Option<&TransactionDate>, labels: &ReportLabels) -> String {
    date.and_then(resolve_date)
        .map(|d| d.format("%d/%m/%y").to_string())
        .unwrap_or_else(|| labels.not_available.to_string())
}

/// Footer date: "March 5, 2024" or "5 de marzo de 2024".
pub fn format_long_date(date: NaiveDate, labels: &ReportLabels) -> String {
    let month = labels.month_name(ReportPeriod::from(date));
    match labels.locale {
        Locale::En => format!("{} {}, {}", month, date.day(), date.year()),
        Locale::Es => format!("{} de {} de {}", date.day(), month.to_lowercase(), date.year()),
    }
}

/// Keeps the first `max_chars` characters and appends `...` when anything was
/// cut. Missing or empty text becomes the "not available" label.
pub fn truncate_cell(text: Option<&str>, max_chars: usize, labels: &ReportLabels) -> String {
    match text {
        Some(t) if !t.is_empty() => {
            if t.chars().count() > max_chars {
                let head: String = t.chars().take(max_chars).collect();
                format!("{}...", head)
            } else {
                t.to_string()
            }
        }
        _ => labels.not_available.to_string(),
    }
}
