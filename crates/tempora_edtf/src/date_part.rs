//! The year/month/day value shared by every date in the crate, and the two
//! century computations that operate on it.
//!
//! A [`DatePart`] carries one of three precisions. With [`Precision::Year`] the
//! `year` field is a calendar year. With [`Precision::Decade`] or
//! [`Precision::Century`] it is a *bucket index* instead: decade `198` is
//! 1980-1989 and century `19` is 1901-2000.
//!
//! Keep the two century numbers apart:
//!
//! - [`century_of_year`] maps a calendar year to its century,
//!   `floor((year - 1) / 100) + 1`, so 1900 is in century 19 and 1901 in 20.
//! - [`DatePart::century`] on a bucket-precision value returns the stored index
//!   unchanged. A `19XX` value reports 19 even though its first day, 1901-01-01,
//!   is in century 20 by the calendar formula.

use std::fmt;

use crate::error::{DateError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest absolute year written with four digits; anything wider uses the
/// `Y` prefix form.
pub const MAX_FOUR_DIGIT_YEAR: i64 = 9999;

/// `99XX` would end in year 10000, which has no four-digit form.
const MAX_CENTURY_INDEX: i64 = 98;
const MAX_DECADE_INDEX: i64 = 999;

/// Granularity at which a [`DatePart`] is known.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Precision {
    /// A calendar year, optionally narrowed by month and day.
    #[default]
    Year,
    /// A ten-year bucket; `year` holds the decade index.
    Decade,
    /// A hundred-year bucket; `year` holds the century index.
    Century,
}

impl Precision {
    /// True for the two bucket precisions.
    pub fn is_bucket(self) -> bool {
        matches!(self, Precision::Decade | Precision::Century)
    }
}

/// Year, month and day, with absent fields left unset rather than defaulted.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DatePartFields"))]
pub struct DatePart {
    year: i64,
    month: Option<u32>,
    day: Option<u32>,
    precision: Precision,
}

impl DatePart {
    /// A calendar date at year precision.
    ///
    /// Fails when `day` is set without `month`, when the month is outside
    /// 1-12, or when the day does not exist in that month.
    pub fn new(year: i64, month: Option<u32>, day: Option<u32>) -> Result<Self> {
        check_calendar_fields(year, month, day).map_err(DateError::builder)?;
        Ok(DatePart {
            year,
            month,
            day,
            precision: Precision::Year,
        })
    }

    /// A year with no month or day.
    pub fn year_only(year: i64) -> Self {
        DatePart {
            year,
            month: None,
            day: None,
            precision: Precision::Year,
        }
    }

    /// The century bucket `index` (19 covers 1901-2000).
    pub fn century_bucket(index: i64) -> Result<Self> {
        Self::bucket(index, Precision::Century, MAX_CENTURY_INDEX)
    }

    /// The decade bucket `index` (198 covers 1980-1989).
    pub fn decade_bucket(index: i64) -> Result<Self> {
        Self::bucket(index, Precision::Decade, MAX_DECADE_INDEX)
    }

    fn bucket(index: i64, precision: Precision, max: i64) -> Result<Self> {
        if !(0..=max).contains(&index) {
            return Err(DateError::builder(format!(
                "{precision:?} bucket index {index} outside 0..={max}"
            )));
        }
        Ok(DatePart {
            year: index,
            month: None,
            day: None,
            precision,
        })
    }

    /// The calendar year, or the bucket index for decade/century precision.
    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// A year too wide for the four-digit form.
    pub fn is_long_year(&self) -> bool {
        self.precision == Precision::Year && self.year.unsigned_abs() > MAX_FOUR_DIGIT_YEAR as u64
    }

    /// Month and day both present.
    pub fn is_complete(&self) -> bool {
        self.precision == Precision::Year && self.day.is_some()
    }

    /// The century number this value carries.
    ///
    /// Century buckets return their stored index; decade buckets return the
    /// century bucket that contains them (198 gives 19); calendar years go
    /// through [`century_of_year`].
    pub fn century(&self) -> i64 {
        match self.precision {
            Precision::Century => self.year,
            Precision::Decade => self.year.div_euclid(10),
            Precision::Year => century_of_year(self.year),
        }
    }

    /// The earliest fully specified day this value covers.
    ///
    /// Years wider than four digits have no meaningful calendar day and come
    /// back as year-only values.
    pub fn first_day(&self) -> DatePart {
        match self.precision {
            Precision::Century => Self::full(self.year * 100 + 1, 1, 1),
            Precision::Decade => Self::full(self.year * 10, 1, 1),
            Precision::Year if self.is_long_year() => Self::year_only(self.year),
            Precision::Year => match self.month {
                Some(month) => Self::full(self.year, month, self.day.unwrap_or(1)),
                None => Self::full(self.year, 1, 1),
            },
        }
    }

    /// The latest fully specified day this value covers.
    pub fn last_day(&self) -> DatePart {
        match self.precision {
            Precision::Century => Self::full((self.year + 1) * 100, 12, 31),
            Precision::Decade => Self::full(self.year * 10 + 9, 12, 31),
            Precision::Year if self.is_long_year() => Self::year_only(self.year),
            Precision::Year => match self.month {
                Some(month) => Self::full(
                    self.year,
                    month,
                    self.day.unwrap_or_else(|| days_in_month(self.year, month)),
                ),
                None => Self::full(self.year, 12, 31),
            },
        }
    }

    fn full(year: i64, month: u32, day: u32) -> DatePart {
        DatePart {
            year,
            month: Some(month),
            day: Some(day),
            precision: Precision::Year,
        }
    }
}

/// Unchecked wire form of a [`DatePart`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DatePartFields {
    year: i64,
    month: Option<u32>,
    day: Option<u32>,
    precision: Precision,
}

#[cfg(feature = "serde")]
impl TryFrom<DatePartFields> for DatePart {
    type Error = DateError;

    fn try_from(fields: DatePartFields) -> Result<Self> {
        let DatePartFields {
            year,
            month,
            day,
            precision,
        } = fields;
        if precision.is_bucket() && (month.is_some() || day.is_some()) {
            return Err(DateError::builder(format!(
                "{precision:?} bucket {year} cannot carry a month or day"
            )));
        }
        match precision {
            Precision::Year => DatePart::new(year, month, day),
            Precision::Decade => DatePart::decade_bucket(year),
            Precision::Century => DatePart::century_bucket(year),
        }
    }
}

/// Century of a calendar year: `floor((year - 1) / 100) + 1`.
///
/// 1900 is in century 19, 1901 and 2000 in century 20, 2001 in century 21.
pub fn century_of_year(year: i64) -> i64 {
    year.saturating_sub(1).div_euclid(100) + 1
}

/// Proleptic Gregorian leap-year rule.
pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in `month` of `year`; `month` must be 1-12.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Shared calendar bounds check: day requires month, month in 1-12, day
/// within the month.
pub(crate) fn check_calendar_fields(
    year: i64,
    month: Option<u32>,
    day: Option<u32>,
) -> std::result::Result<(), String> {
    match (month, day) {
        (None, Some(day)) => Err(format!("day {day} given without a month")),
        (Some(month), _) if !(1..=12).contains(&month) => {
            Err(format!("month {month} outside 1-12"))
        }
        (Some(month), Some(day)) if day == 0 || day > days_in_month(year, month) => Err(format!(
            "day {day} does not exist in {}-{month:02}",
            DatePart::year_only(year)
        )),
        _ => Ok(()),
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Precision::Century => return write!(f, "{:02}XX", self.year),
            Precision::Decade => return write!(f, "{:03}X", self.year),
            Precision::Year => {}
        }
        if self.is_long_year() {
            write!(f, "Y{}", self.year)?;
        } else if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        if let Some(month) = self.month {
            write!(f, "-{:02}", month)?;
            if let Some(day) = self.day {
                write!(f, "-{:02}", day)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_century_of_year_boundaries() {
        let cases = [
            (1900, 19),
            (1901, 20),
            (2000, 20),
            (2001, 21),
            (2011, 21),
            (1804, 19),
            (1782, 18),
            (1, 1),
            (100, 1),
            (101, 2),
        ];
        for (year, century) in cases {
            assert_eq!(century_of_year(year), century, "year {year}");
        }
    }

    #[test]
    fn test_century_bucket_expansion() {
        let bucket = DatePart::century_bucket(19).unwrap();
        assert_eq!(bucket.first_day().to_string(), "1901-01-01");
        assert_eq!(bucket.last_day().to_string(), "2000-12-31");
    }

    #[test]
    fn test_decade_bucket_expansion() {
        let eighties = DatePart::decade_bucket(198).unwrap();
        assert_eq!(eighties.first_day().to_string(), "1980-01-01");
        assert_eq!(eighties.last_day().to_string(), "1989-12-31");

        let nineteen_hundreds = DatePart::decade_bucket(190).unwrap();
        assert_eq!(nineteen_hundreds.first_day().to_string(), "1900-01-01");
        assert_eq!(nineteen_hundreds.last_day().to_string(), "1909-12-31");
    }

    #[test]
    fn test_bucket_century_is_raw_index() {
        let bucket = DatePart::century_bucket(19).unwrap();
        assert_eq!(bucket.century(), 19);
        assert_eq!(bucket.first_day().century(), 20);
        assert_eq!(bucket.last_day().century(), 20);
    }

    #[test]
    fn test_reduced_precision_bounds() {
        let year = DatePart::new(1989, None, None).unwrap();
        assert_eq!(year.first_day().to_string(), "1989-01-01");
        assert_eq!(year.last_day().to_string(), "1989-12-31");

        let month = DatePart::new(1989, Some(11), None).unwrap();
        assert_eq!(month.first_day().to_string(), "1989-11-01");
        assert_eq!(month.last_day().to_string(), "1989-11-30");

        let february = DatePart::new(2000, Some(2), None).unwrap();
        assert_eq!(february.last_day().to_string(), "2000-02-29");
        let february = DatePart::new(1900, Some(2), None).unwrap();
        assert_eq!(february.last_day().to_string(), "1900-02-28");
    }

    #[test]
    fn test_builder_rejects_day_without_month() {
        let err = DatePart::new(1989, None, Some(3)).unwrap_err();
        assert!(matches!(err, DateError::Builder(_)));
    }

    #[test]
    fn test_builder_rejects_impossible_fields() {
        assert!(DatePart::new(1989, Some(13), None).is_err());
        assert!(DatePart::new(1989, Some(4), Some(31)).is_err());
        assert!(DatePart::new(1989, Some(2), Some(29)).is_err());
        assert!(DatePart::new(1988, Some(2), Some(29)).is_ok());
        assert!(DatePart::century_bucket(-1).is_err());
        assert!(DatePart::decade_bucket(1000).is_err());
    }

    #[test]
    fn test_last_century_bucket_stays_four_digits() {
        let last = DatePart::century_bucket(98).unwrap();
        assert_eq!(last.last_day().to_string(), "9900-12-31");
        assert!(DatePart::century_bucket(99).is_err());
        assert_eq!(DatePart::decade_bucket(999).unwrap().last_day().to_string(), "9999-12-31");
    }

    #[test]
    fn test_error_prints_negative_year_like_display() {
        let err = DatePart::new(-1, Some(2), Some(30)).unwrap_err();
        assert_eq!(
            err,
            DateError::Builder("day 30 does not exist in -0001-02".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DatePart::year_only(989).to_string(), "0989");
        assert_eq!(DatePart::year_only(-989).to_string(), "-0989");
        assert_eq!(DatePart::year_only(-600_000).to_string(), "Y-600000");
        assert_eq!(DatePart::year_only(170_000_002).to_string(), "Y170000002");
        assert_eq!(DatePart::century_bucket(0).unwrap().to_string(), "00XX");
        assert_eq!(DatePart::decade_bucket(201).unwrap().to_string(), "201X");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_goes_through_checks() {
        let date: DatePart =
            serde_json::from_str(r#"{"year":1989,"month":11,"day":1,"precision":"year"}"#)
                .unwrap();
        assert_eq!(date, DatePart::new(1989, Some(11), Some(1)).unwrap());

        for json in [
            r#"{"year":1989,"month":null,"day":3,"precision":"year"}"#,
            r#"{"year":1989,"month":2,"day":30,"precision":"year"}"#,
            r#"{"year":99,"month":null,"day":null,"precision":"century"}"#,
            r#"{"year":19,"month":1,"day":null,"precision":"century"}"#,
        ] {
            assert!(serde_json::from_str::<DatePart>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_long_year_has_no_calendar_day() {
        let long = DatePart::year_only(-600_000);
        assert_eq!(long.first_day(), long);
        assert_eq!(long.last_day(), long);
    }
}
