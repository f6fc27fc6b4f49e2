//! Ranges whose end year is abbreviated to two digits: `2014/15`.

use std::sync::LazyLock;

use regex::Regex;
use tempora_edtf::{DateError, DatePart, Edtf, InstantDateBuilder, IntervalDate};

use super::Extracted;

static BRIEF_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\?)?(\d{3,4})(\?)?/(\?)?(\d{2})(\?)?$").unwrap());

/// Two-digit ends at or below this could be a month.
const LAST_MONTH: i64 = 12;

pub(super) fn extract(value: &str) -> Result<Option<Extracted>, DateError> {
    let Some(caps) = BRIEF_RANGE.captures(value) else {
        return Ok(None);
    };
    let (Ok(start), Ok(end)) = (caps[2].parse::<i64>(), caps[5].parse::<i64>()) else {
        return Ok(None);
    };
    if end <= LAST_MONTH || end <= start % 100 {
        return Ok(None);
    }
    let start_uncertain = caps.get(1).is_some() || caps.get(3).is_some();
    let end_uncertain = caps.get(4).is_some() || caps.get(6).is_some();

    let start_instant = InstantDateBuilder::new(DatePart::year_only(start))
        .uncertain(start_uncertain)
        .build()?;
    let end_instant = InstantDateBuilder::new(DatePart::year_only(start / 100 * 100 + end))
        .uncertain(end_uncertain)
        .build()?;
    let interval = IntervalDate::new(start_instant, end_instant)?;
    Ok(Some(Edtf::Interval(interval).into()))
}
