use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Canonical month label used as the grouping key everywhere: the Portuguese
/// long month name followed by the year, e.g. `"janeiro 2024"`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// Label comparison is case-insensitive exact match. A stored label in a
/// different locale or spacing simply fails to match; that is a data-hygiene
/// precondition on stored months, never silently coerced here.
pub fn same_month_label(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Reads `(year, month)` back out of a canonical label, for chronological
/// ordering of per-month breakdowns. Unrecognized labels yield `None` and
/// sort after recognized ones.
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let mut parts = label.split_whitespace();
    let name = parts.next()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let folded = name.to_lowercase();
    let month_index = MONTH_NAMES
        .iter()
        .position(|candidate| *candidate == folded)?;
    Some((year, (month_index as u32) + 1))
}
