//! Strict ISO calendar dates: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
//!
//! Widths are fixed (four-digit year, two-digit month and day) and `-` is the
//! only separator. A complete date may be followed by `T<time>` and a `Z` or
//! `±HH[:MM]` offset; the time is recognised and dropped.

use winnow::combinator::{alt, opt, preceded};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::date_part::DatePart;
use crate::error::DateError;

/// Raw fields as written; `00` months and days are still present here.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct CalendarDate {
    pub year: i64,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl CalendarDate {
    /// Checks the calendar fields and builds a year-precision date.
    ///
    /// A `00` month or day reads as "not given", so `1989-00` is `1989`.
    /// A real day under a `00` month is rejected.
    pub fn into_date_part(self, negative: bool) -> Result<DatePart, String> {
        let year = if negative { -self.year } else { self.year };
        let (month, day) = match (self.month, self.day) {
            (Some(0), None | Some(0)) => (None, None),
            (Some(0), Some(day)) => return Err(format!("day {day:02} under month 00")),
            (month, Some(0)) => (month, None),
            fields => fields,
        };
        DatePart::new(year, month, day).map_err(|err| match err {
            DateError::Builder(reason) => reason,
            other => other.to_string(),
        })
    }
}

pub(crate) fn digits<'i>(count: usize) -> impl Parser<&'i str, &'i str, ContextError> {
    take_while(count, |c: char| c.is_ascii_digit())
}

pub(crate) fn four_digit_year(input: &mut &str) -> winnow::Result<i64> {
    digits(4)
        .try_map(|s: &str| s.parse::<i64>())
        .parse_next(input)
}

pub(crate) fn two_digit_field(input: &mut &str) -> winnow::Result<u32> {
    digits(2)
        .try_map(|s: &str| s.parse::<u32>())
        .parse_next(input)
}

fn utc_offset(input: &mut &str) -> winnow::Result<()> {
    alt((
        "Z".void(),
        (one_of(['+', '-']), digits(2), opt((':', digits(2)))).void(),
    ))
    .parse_next(input)
}

/// `T` followed by any run of digits, colons and fraction dots, then an
/// optional offset. Nothing here is kept.
fn time_of_day(input: &mut &str) -> winnow::Result<()> {
    (
        'T',
        take_while(0.., |c: char| c.is_ascii_digit() || c == ':' || c == '.'),
        opt(utc_offset),
    )
        .void()
        .parse_next(input)
}

/// Parses one calendar date, leaving any trailing input untouched.
pub(crate) fn calendar_date(input: &mut &str) -> winnow::Result<CalendarDate> {
    let year = four_digit_year.parse_next(input)?;
    let month = opt(preceded('-', two_digit_field)).parse_next(input)?;
    let day = match month {
        Some(_) => opt(preceded('-', two_digit_field)).parse_next(input)?,
        None => None,
    };
    if day.is_some() {
        opt(time_of_day).parse_next(input)?;
    }
    Ok(CalendarDate { year, month, day })
}
