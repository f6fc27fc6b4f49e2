//! EDTF Level 0 and the Level 1 features used in heritage metadata.
//!
//! Accepted instants, in the order they are tried:
//!
//! 1. `Y` + signed integer of five or more digits: `Y170000002`, `Y-170000002`
//! 2. masked year digits: `201X` (decade), `19XX` (century)
//! 3. masked month or day: `1986-XX`, `1986-XX-XX`, `1986-07-XX`
//! 4. calendar date with optional leading `-`: `1986`, `-0989`, `1986-07-12T10:00Z`
//!
//! Each may end in a single `?`, `~` or `%`. Two instants joined by `/` form an
//! interval; a side may be empty (unknown) or `..` (open). No whitespace is
//! allowed anywhere, including around the separator.

use winnow::combinator::{alt, opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::calendar::{calendar_date, digits, four_digit_year, two_digit_field, CalendarDate};
use crate::date_part::{DatePart, Precision};
use crate::error::{DateError, Result};
use crate::instant::{InstantDate, InstantDateBuilder, Masked, Quality};
use crate::interval::IntervalDate;
use crate::Edtf;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum RawDate {
    Calendar {
        negative: bool,
        date: CalendarDate,
    },
    LongYear(i64),
    Bucket {
        index: i64,
        precision: Precision,
    },
    MaskedCalendar {
        year: i64,
        month: Option<u32>,
        masked: Masked,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct RawInstant {
    date: RawDate,
    quality: Quality,
}

impl RawInstant {
    fn resolve(self, text: &str) -> Result<InstantDate> {
        let builder = match self.date {
            RawDate::Calendar { negative, date } => {
                let date_part = date
                    .into_date_part(negative)
                    .map_err(|reason| DateError::extraction(text, reason))?;
                InstantDateBuilder::new(date_part)
            }
            RawDate::LongYear(year) => InstantDateBuilder::new(DatePart::year_only(year)),
            RawDate::Bucket { index, precision } => {
                let date_part = match precision {
                    Precision::Decade => DatePart::decade_bucket(index),
                    _ => DatePart::century_bucket(index),
                }
                .map_err(|err| DateError::extraction(text, err.to_string()))?;
                InstantDateBuilder::new(date_part)
            }
            RawDate::MaskedCalendar {
                year,
                month,
                masked,
            } => {
                if let Some(month) = month.filter(|m| !(1..=12).contains(m)) {
                    return Err(DateError::extraction(
                        text,
                        format!("month {month:02} outside 01-12"),
                    ));
                }
                InstantDateBuilder::new(DatePart::new(year, month, None)?).masked(masked)
            }
        };
        builder.quality(self.quality).build()
    }
}

fn quality(input: &mut &str) -> winnow::Result<Quality> {
    let qualifier = opt(alt(('?', '~', '%'))).parse_next(input)?;
    Ok(match qualifier {
        Some('?') => Quality::UNCERTAIN,
        Some('~') => Quality::APPROXIMATE,
        Some('%') => Quality::UNCERTAIN_APPROXIMATE,
        _ => Quality::default(),
    })
}

fn long_year(input: &mut &str) -> winnow::Result<RawDate> {
    preceded('Y', (opt('-'), take_while(5.., |c: char| c.is_ascii_digit())))
        .try_map(|(sign, digits): (Option<char>, &str)| {
            digits
                .parse::<i64>()
                .map(|value| if sign.is_some() { -value } else { value })
        })
        .map(RawDate::LongYear)
        .parse_next(input)
}

fn masked_year(input: &mut &str) -> winnow::Result<RawDate> {
    alt((
        terminated(digits(3), 'X')
            .try_map(|s: &str| s.parse::<i64>())
            .map(|index| RawDate::Bucket {
                index,
                precision: Precision::Decade,
            }),
        terminated(digits(2), "XX")
            .try_map(|s: &str| s.parse::<i64>())
            .map(|index| RawDate::Bucket {
                index,
                precision: Precision::Century,
            }),
    ))
    .parse_next(input)
}

fn masked_calendar(input: &mut &str) -> winnow::Result<RawDate> {
    let year = terminated(four_digit_year, '-').parse_next(input)?;
    let (month, masked) = alt((
        "XX-XX".value((None, Masked::MonthAndDay)),
        "XX".value((None, Masked::Month)),
        terminated(two_digit_field, "-XX").map(|month| (Some(month), Masked::Day)),
    ))
    .parse_next(input)?;
    Ok(RawDate::MaskedCalendar {
        year,
        month,
        masked,
    })
}

fn signed_calendar(input: &mut &str) -> winnow::Result<RawDate> {
    (opt('-'), calendar_date)
        .map(|(sign, date)| RawDate::Calendar {
            negative: sign.is_some(),
            date,
        })
        .parse_next(input)
}

fn raw_instant(input: &mut &str) -> winnow::Result<RawInstant> {
    let date = alt((long_year, masked_year, masked_calendar, signed_calendar)).parse_next(input)?;
    let quality = quality.parse_next(input)?;
    Ok(RawInstant { date, quality })
}

/// Parses a single instant; `/`, `..` and empty input are rejected.
pub fn parse_instant(text: &str) -> Result<InstantDate> {
    let raw = raw_instant.parse(text).map_err(|err| {
        DateError::extraction(text, format!("unexpected input at offset {}", err.offset()))
    })?;
    raw.resolve(text)
}

/// Parses an instant or an interval.
pub fn parse(input: &str) -> Result<Edtf> {
    match input.split_once('/') {
        Some((start, end)) => parse_interval(input, start, end).map(Edtf::Interval),
        None => parse_instant(input).map(Edtf::Instant),
    }
}

fn parse_interval(input: &str, start: &str, end: &str) -> Result<IntervalDate> {
    if end.contains('/') {
        return Err(DateError::extraction(input, "more than one '/' separator"));
    }
    let start = interval_side(input, start)?;
    let end = interval_side(input, end)?;
    if start.is_sentinel() && end.is_sentinel() {
        return Err(DateError::extraction(
            input,
            "neither side of the interval is a date",
        ));
    }
    IntervalDate::new(start, end)
}

fn interval_side(input: &str, side: &str) -> Result<InstantDate> {
    match side {
        "" => Ok(InstantDate::unknown()),
        ".." => Ok(InstantDate::open()),
        text => parse_instant(text).map_err(|err| match err {
            DateError::Extraction { reason, .. } => DateError::extraction(input, reason),
            other => other,
        }),
    }
}
