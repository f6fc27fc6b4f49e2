//! Negative years too wide for four digits, written without the `Y` prefix.

use std::sync::LazyLock;

use regex::Regex;
use tempora_edtf::{DateError, DatePart, Edtf, InstantDate, IntervalDate};

use super::Extracted;

/// `-600000`, `-600000/-500000`
static LONG_NEGATIVE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-\d{5,})(?:/(-\d{5,}))?$").unwrap());

fn instant(year: &str) -> Result<Option<InstantDate>, DateError> {
    match year.parse::<i64>() {
        Ok(year) => InstantDate::from_date_part(DatePart::year_only(year)).map(Some),
        Err(_) => Ok(None),
    }
}

pub(super) fn extract(value: &str) -> Result<Option<Extracted>, DateError> {
    let Some(caps) = LONG_NEGATIVE_YEAR.captures(value) else {
        return Ok(None);
    };
    let Some(start) = instant(&caps[1])? else {
        return Ok(None);
    };
    let edtf = match caps.get(2) {
        None => Edtf::Instant(start),
        Some(end) => match instant(end.as_str())? {
            Some(end) => Edtf::Interval(IntervalDate::new(start, end)?),
            None => return Ok(None),
        },
    };
    Ok(Some(edtf.into()))
}
