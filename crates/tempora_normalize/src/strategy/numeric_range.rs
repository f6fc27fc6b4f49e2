//! Year ranges joined by a hyphen, bare or enclosed.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tempora_edtf::{DateError, DatePart, Edtf, InstantDate, InstantDateBuilder, IntervalDate};

use super::Extracted;

/// `1942-1943`, `1942 - 1943?`, `?1942-1943`
static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\?)?(\d{4})(\?)?\s*-\s*(\?)?(\d{4})(\?)?$").unwrap()
});
static ENCLOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\[\s*([^\[\]]+?)\s*\]|\(\s*([^()]+?)\s*\))$").unwrap());

pub(super) fn extract(value: &str) -> Result<Option<Extracted>, DateError> {
    let Some(caps) = YEAR_RANGE.captures(value) else {
        return Ok(None);
    };
    let start = side(&caps, 2, [1, 3])?;
    let end = side(&caps, 5, [4, 6])?;
    let interval = IntervalDate::new(start, end)?;
    Ok(Some(Edtf::Interval(interval).into()))
}

/// The same range inside `[...]` or `(...)`.
pub(super) fn extract_bracketed(value: &str) -> Result<Option<Extracted>, DateError> {
    let inner = ENCLOSED
        .captures(value)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)));
    match inner {
        Some(inner) => extract(inner.as_str()),
        None => Ok(None),
    }
}

fn side(caps: &Captures<'_>, year: usize, marks: [usize; 2]) -> Result<InstantDate, DateError> {
    let year = caps[year].parse::<i64>().unwrap_or_default();
    InstantDateBuilder::new(DatePart::year_only(year))
        .uncertain(marks.iter().any(|&group| caps.get(group).is_some()))
        .build()
}
