//! Calendar arithmetic and day-menu paging.
//!
//! A select menu holds at most 25 options. Every page reserves two slots for
//! navigation, so a page lists at most 23 real days: page `p` covers days
//! `(p-1)*23 + 1 ..= min((p-1)*23 + 23, days_in_month)`, preceded by a
//! "previous page" entry when `p > 1` and followed by a "next page" entry when
//! days remain.

use chrono::{Datelike, Local};

use datebot_types::month::Month;
use datebot_types::selection::{DayOption, NEXT_PAGE_VALUE, PREVIOUS_PAGE_VALUE};

/// Maximum number of options a select menu accepts.
pub const MAX_MENU_OPTIONS: u32 = 25;

/// Real day entries per page (two slots reserved for navigation).
pub const DAYS_PER_PAGE: u32 = MAX_MENU_OPTIONS - 2;

/// Proleptic Gregorian leap year rule, defined for every `i32`.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(month: Month, year: i32) -> u32 {
    match month.number() {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// The current local calendar year.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Number of days in `month` of the current year.
pub fn days_in_current_month(month: Month) -> u32 {
    days_in_month(month, current_year())
}

/// Last valid page for a month of `days_in_month` days.
pub fn last_page(days_in_month: u32) -> u32 {
    days_in_month.div_ceil(DAYS_PER_PAGE).max(1)
}

/// Clamp a requested page into `1..=last_page(days_in_month)`.
pub fn clamp_page(days_in_month: u32, page: u32) -> u32 {
    page.clamp(1, last_page(days_in_month))
}

/// Build the day-menu options for `page` (1-based).
///
/// Deterministic in `(days_in_month, page)`. Page 0 is treated as page 1.
/// A page past the end yields only the "previous page" entry.
pub fn day_options(days_in_month: u32, page: u32) -> Vec<DayOption> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(DAYS_PER_PAGE).saturating_add(1);
    let end = start.saturating_add(DAYS_PER_PAGE - 1).min(days_in_month);

    let mut options = Vec::with_capacity(MAX_MENU_OPTIONS as usize);

    if page > 1 {
        options.push(DayOption {
            label: "Powrót do poprzedniej strony".to_string(),
            description: "Wróć do poprzednich dni".to_string(),
            value: PREVIOUS_PAGE_VALUE.to_string(),
        });
    }

    options.extend((start..=end).map(|day| DayOption {
        label: day.to_string(),
        description: format!("Dzień {day}"),
        value: day.to_string(),
    }));

    if end < days_in_month {
        options.push(DayOption {
            label: "Strona następna".to_string(),
            description: "Zobacz więcej dni".to_string(),
            value: NEXT_PAGE_VALUE.to_string(),
        });
    }

    options
}

/// Format a month/day pair as zero-padded `MM/DD`.
pub fn format_month_day(month: Month, day: u32) -> String {
    format!("{:02}/{:02}", month.number(), day)
}
