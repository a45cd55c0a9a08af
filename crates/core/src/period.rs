//! Reporting window resolution.
//!
//! A report covers either an explicit `[start, end]` pair supplied by the
//! caller or a calendar unit (week, month, year) containing "today". Both
//! bounds are inclusive.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Calendar unit a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    /// Sunday through Saturday of the current week.
    Weekly,
    /// First through last day of the current month.
    Monthly,
    /// January 1st through December 31st of the current year.
    Yearly,
    /// Caller-supplied bounds only.
    Custom,
}

/// Period used when the caller does not name one.
pub const DEFAULT_PERIOD: PeriodKind = PeriodKind::Monthly;

impl PeriodKind {
    /// Parse a period name. Portuguese and English spellings are accepted.
    ///
    /// Returns `None` for unrecognized names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "semanal" | "weekly" => Some(Self::Weekly),
            "mensal" | "monthly" => Some(Self::Monthly),
            "anual" | "yearly" => Some(Self::Yearly),
            "customizado" | "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Compute the calendar window of `kind` containing `today`.
///
/// Returns `None` for [`PeriodKind::Custom`], which has no implicit bounds.
pub fn period_bounds(kind: PeriodKind, today: NaiveDate) -> Option<DateRange> {
    match kind {
        PeriodKind::Weekly => {
            // Monday = 0 .. Sunday = 6; shifting by one makes Sunday the first day.
            let offset = (today.weekday().num_days_from_monday() + 1) % 7;
            let start = today - Duration::days(i64::from(offset));
            Some(DateRange {
                start,
                end: start + Duration::days(6),
            })
        }
        PeriodKind::Monthly => {
            let start = today.with_day(1)?;
            let (next_year, next_month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
            Some(DateRange {
                start,
                end: next_first.pred_opt()?,
            })
        }
        PeriodKind::Yearly => Some(DateRange {
            start: NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
            end: NaiveDate::from_ymd_opt(today.year(), 12, 31)?,
        }),
        PeriodKind::Custom => None,
    }
}

/// Resolve the window a report should cover.
///
/// Explicit bounds win when both are present. Otherwise the window is derived
/// from `kind`. `None` means no date filter ("all time"), which happens for a
/// custom or unrecognized period without both bounds.
pub fn resolve_window(
    kind: Option<PeriodKind>,
    explicit_start: Option<NaiveDate>,
    explicit_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<DateRange> {
    if let (Some(start), Some(end)) = (explicit_start, explicit_end) {
        return Some(DateRange { start, end });
    }
    kind.and_then(|k| period_bounds(k, today))
}
