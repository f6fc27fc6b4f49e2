//! tempora_edtf - EDTF (Extended Date/Time Format) values for heritage metadata
//!
//! This crate implements ISO 8601-2:2019 (EDTF) Level 0 and the parts of
//! Level 1 that turn up in cultural-heritage records: qualification
//! (`?`, `~`, `%`), unspecified digits (`19XX`, `201X`, `1986-XX`), long years
//! (`Y-170000002`) and open or unknown interval ends.
//!
//! ```
//! use tempora_edtf::Edtf;
//!
//! let edtf: Edtf = "1650?/..".parse().unwrap();
//! assert_eq!(edtf.to_string(), "1650?/..");
//! assert_eq!(edtf.first_day().unwrap().to_string(), "1650-01-01");
//! ```

use std::fmt;
use std::str::FromStr;

mod calendar;
mod date_part;
mod error;
mod grammar;
mod instant;
mod interval;

pub use date_part::{
    century_of_year, days_in_month, is_leap_year, DatePart, Precision, MAX_FOUR_DIGIT_YEAR,
};
pub use error::{DateError, Result};
pub use grammar::{parse, parse_instant};
pub use instant::{InstantDate, InstantDateBuilder, InstantState, Masked, Quality};
pub use interval::IntervalDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the top-level EDTF value.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edtf {
    /// A single date.
    Instant(InstantDate),
    /// A range between two instants.
    Interval(IntervalDate),
}

impl Edtf {
    /// Earliest concrete day covered, or `None` when the start is open or unknown.
    pub fn first_day(&self) -> Option<InstantDate> {
        let first = match self {
            Edtf::Instant(instant) => instant.first_day(),
            Edtf::Interval(interval) => interval.first_day(),
        };
        first.date_part().is_some().then_some(first)
    }

    /// Latest concrete day covered, or `None` when the end is open or unknown.
    pub fn last_day(&self) -> Option<InstantDate> {
        let last = match self {
            Edtf::Instant(instant) => instant.last_day(),
            Edtf::Interval(interval) => interval.last_day(),
        };
        last.date_part().is_some().then_some(last)
    }

    pub fn quality(&self) -> Quality {
        match self {
            Edtf::Instant(instant) => instant.quality(),
            Edtf::Interval(interval) => interval.quality(),
        }
    }

    /// Rewrites the flags of every side that carries a date; open and unknown
    /// sides are left alone.
    pub fn map_quality(&self, f: impl Fn(Quality) -> Quality) -> Result<Edtf> {
        let side = |instant: &InstantDate| {
            if instant.is_sentinel() {
                Ok(instant.clone())
            } else {
                instant.with_quality(f(instant.quality()))
            }
        };
        match self {
            Edtf::Instant(instant) => side(instant).map(Edtf::Instant),
            Edtf::Interval(interval) => {
                IntervalDate::new(side(interval.start())?, side(interval.end())?)
                    .map(Edtf::Interval)
            }
        }
    }
}

impl fmt::Display for Edtf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edtf::Instant(instant) => write!(f, "{}", instant),
            Edtf::Interval(interval) => write!(f, "{}", interval),
        }
    }
}

impl FromStr for Edtf {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl From<InstantDate> for Edtf {
    fn from(instant: InstantDate) -> Self {
        Edtf::Instant(instant)
    }
}

impl From<IntervalDate> for Edtf {
    fn from(interval: IntervalDate) -> Self {
        Edtf::Interval(interval)
    }
}
