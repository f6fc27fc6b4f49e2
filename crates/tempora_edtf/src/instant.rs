//! Single points in time and the builder that guards their invariants.

use std::fmt;

use crate::date_part::{DatePart, Precision};
use crate::error::{DateError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Uncertainty and approximation flags (`?`, `~`, `%`).
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quality {
    pub uncertain: bool,   // '?'
    pub approximate: bool, // '~'
}

impl Quality {
    pub const UNCERTAIN: Quality = Quality {
        uncertain: true,
        approximate: false,
    };
    pub const APPROXIMATE: Quality = Quality {
        uncertain: false,
        approximate: true,
    };
    pub const UNCERTAIN_APPROXIMATE: Quality = Quality {
        uncertain: true,
        approximate: true,
    };

    pub fn is_qualified(self) -> bool {
        self.uncertain || self.approximate
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.uncertain, self.approximate) {
            (true, true) => write!(f, "%"),
            (true, false) => write!(f, "?"),
            (false, true) => write!(f, "~"),
            (false, false) => Ok(()),
        }
    }
}

/// Which trailing fields of an unspecified date are written as `X`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Masked {
    /// Trailing year digits (`201X`, `19XX`); the date part carries a bucket precision.
    YearDigits,
    /// The month (`1986-XX`).
    Month,
    /// Month and day (`1986-XX-XX`).
    MonthAndDay,
    /// The day (`1986-07-XX`).
    Day,
}

/// What kind of instant this is.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InstantState {
    /// An ordinary date.
    #[default]
    Normal,
    /// Nothing is known about this side of an interval; written as an empty string.
    Unknown,
    /// This side of an interval is ongoing; written as `..`.
    Open,
    /// A date whose trailing digits are masked.
    Unspecified(Masked),
}

/// A single, possibly imprecise, point in time.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "InstantDateFields"))]
pub struct InstantDate {
    date_part: Option<DatePart>,
    quality: Quality,
    state: InstantState,
}

impl InstantDate {
    /// The "no information" side of an interval.
    pub fn unknown() -> Self {
        InstantDate {
            date_part: None,
            quality: Quality::default(),
            state: InstantState::Unknown,
        }
    }

    /// The "ongoing" side of an interval.
    pub fn open() -> Self {
        InstantDate {
            date_part: None,
            quality: Quality::default(),
            state: InstantState::Open,
        }
    }

    /// An unqualified instant at the given date.
    pub fn from_date_part(date_part: DatePart) -> Result<Self> {
        InstantDateBuilder::new(date_part).build()
    }

    /// The date, absent for the `Unknown` and `Open` sentinels.
    pub fn date_part(&self) -> Option<&DatePart> {
        self.date_part.as_ref()
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn is_uncertain(&self) -> bool {
        self.quality.uncertain
    }

    pub fn is_approximate(&self) -> bool {
        self.quality.approximate
    }

    pub fn state(&self) -> InstantState {
        self.state
    }

    /// `Unknown` or `Open`.
    pub fn is_sentinel(&self) -> bool {
        matches!(self.state, InstantState::Unknown | InstantState::Open)
    }

    /// The raw century number of the stored date (see [`DatePart::century`]).
    pub fn century(&self) -> Option<i64> {
        self.date_part.map(|date| date.century())
    }

    /// The same instant with different qualification flags.
    pub fn with_quality(&self, quality: Quality) -> Result<Self> {
        let date_part = self.date_part.ok_or_else(|| {
            DateError::builder(format!("{:?} instant cannot carry qualification", self.state))
        })?;
        let mut builder = InstantDateBuilder::new(date_part).quality(quality);
        if let InstantState::Unspecified(masked) = self.state {
            builder = builder.masked(masked);
        }
        builder.build()
    }

    /// Earliest concrete day covered; sentinels come back unchanged.
    ///
    /// The result is always `Normal` and unqualified, so its [`century`](Self::century)
    /// is computed from the calendar year rather than from a bucket index.
    pub fn first_day(&self) -> InstantDate {
        self.bound(DatePart::first_day)
    }

    /// Latest concrete day covered; sentinels come back unchanged.
    pub fn last_day(&self) -> InstantDate {
        self.bound(DatePart::last_day)
    }

    fn bound(&self, edge: fn(&DatePart) -> DatePart) -> InstantDate {
        match &self.date_part {
            Some(date) => InstantDate {
                date_part: Some(edge(date)),
                quality: Quality::default(),
                state: InstantState::Normal,
            },
            None => self.clone(),
        }
    }
}

/// Unchecked wire form of an [`InstantDate`]; rebuilt through the builder.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct InstantDateFields {
    date_part: Option<DatePart>,
    quality: Quality,
    state: InstantState,
}

#[cfg(feature = "serde")]
impl TryFrom<InstantDateFields> for InstantDate {
    type Error = DateError;

    fn try_from(fields: InstantDateFields) -> Result<Self> {
        let sentinel = match fields.state {
            InstantState::Unknown => Some(InstantDate::unknown()),
            InstantState::Open => Some(InstantDate::open()),
            InstantState::Normal | InstantState::Unspecified(_) => None,
        };
        match (fields.date_part, sentinel) {
            (None, Some(sentinel)) if !fields.quality.is_qualified() => Ok(sentinel),
            (None, Some(_)) => Err(DateError::builder(format!(
                "{:?} instant cannot carry qualification",
                fields.state
            ))),
            (None, None) => Err(DateError::builder(format!(
                "{:?} instant needs a date",
                fields.state
            ))),
            (Some(date), Some(_)) => Err(DateError::builder(format!(
                "{:?} instant cannot carry the date {date}",
                fields.state
            ))),
            (Some(date), None) => {
                let mut builder = InstantDateBuilder::new(date).quality(fields.quality);
                if let InstantState::Unspecified(masked) = fields.state {
                    builder = builder.masked(masked);
                }
                builder.build()
            }
        }
    }
}

impl fmt::Display for InstantDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(date) = &self.date_part else {
            return match self.state {
                InstantState::Open => write!(f, ".."),
                _ => Ok(()),
            };
        };
        write!(f, "{}", date)?;
        match self.state {
            InstantState::Unspecified(Masked::Month) => write!(f, "-XX")?,
            InstantState::Unspecified(Masked::MonthAndDay) => write!(f, "-XX-XX")?,
            InstantState::Unspecified(Masked::Day) => write!(f, "-XX")?,
            _ => {}
        }
        write!(f, "{}", self.quality)
    }
}

/// Assembles an [`InstantDate`], rejecting contradictory combinations.
///
/// Bucket-precision dates are always stored as `Unspecified(YearDigits)`,
/// so the mask may be left out for them.
#[derive(Debug, Clone)]
pub struct InstantDateBuilder {
    date_part: DatePart,
    quality: Quality,
    masked: Option<Masked>,
}

impl InstantDateBuilder {
    pub fn new(date_part: DatePart) -> Self {
        InstantDateBuilder {
            date_part,
            quality: Quality::default(),
            masked: None,
        }
    }

    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn uncertain(mut self, uncertain: bool) -> Self {
        self.quality.uncertain = uncertain;
        self
    }

    pub fn approximate(mut self, approximate: bool) -> Self {
        self.quality.approximate = approximate;
        self
    }

    pub fn masked(mut self, masked: Masked) -> Self {
        self.masked = Some(masked);
        self
    }

    pub fn build(self) -> Result<InstantDate> {
        let date = self.date_part;
        let state = match (date.precision(), self.masked) {
            (Precision::Decade | Precision::Century, None | Some(Masked::YearDigits)) => {
                InstantState::Unspecified(Masked::YearDigits)
            }
            (Precision::Decade | Precision::Century, Some(masked)) => {
                return Err(DateError::builder(format!(
                    "{masked:?} mask on a {:?} bucket",
                    date.precision()
                )));
            }
            (Precision::Year, None) => InstantState::Normal,
            (Precision::Year, Some(Masked::YearDigits)) => {
                return Err(DateError::builder(
                    "masked year digits need a decade or century precision",
                ));
            }
            (Precision::Year, Some(masked @ (Masked::Month | Masked::MonthAndDay))) => {
                if date.month().is_some() || date.is_long_year() {
                    return Err(DateError::builder(format!(
                        "{masked:?} mask on {date}, which already has a month or is too wide"
                    )));
                }
                InstantState::Unspecified(masked)
            }
            (Precision::Year, Some(Masked::Day)) => {
                if date.month().is_none() || date.day().is_some() {
                    return Err(DateError::builder(format!(
                        "day mask on {date}, which needs a month and no day"
                    )));
                }
                InstantState::Unspecified(Masked::Day)
            }
        };
        Ok(InstantDate {
            date_part: Some(date),
            quality: self.quality,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_display() {
        assert_eq!(InstantDate::unknown().to_string(), "");
        assert_eq!(InstantDate::open().to_string(), "..");
    }

    #[test]
    fn test_sentinel_bounds_keep_state() {
        assert_eq!(InstantDate::open().first_day().state(), InstantState::Open);
        assert_eq!(InstantDate::unknown().last_day().state(), InstantState::Unknown);
        assert!(InstantDate::open().first_day().date_part().is_none());
    }

    #[test]
    fn test_sentinel_rejects_quality() {
        let err = InstantDate::open().with_quality(Quality::UNCERTAIN).unwrap_err();
        assert!(matches!(err, DateError::Builder(_)));
    }

    #[test]
    fn test_bucket_is_always_unspecified() {
        let instant = InstantDate::from_date_part(DatePart::century_bucket(19).unwrap()).unwrap();
        assert_eq!(instant.state(), InstantState::Unspecified(Masked::YearDigits));
        assert_eq!(instant.to_string(), "19XX");
        assert_eq!(instant.century(), Some(19));
        assert_eq!(instant.first_day().century(), Some(20));
    }

    #[test]
    fn test_builder_rejects_contradictory_masks() {
        let with_month = DatePart::new(1986, Some(7), None).unwrap();
        assert!(InstantDateBuilder::new(with_month).masked(Masked::Month).build().is_err());
        assert!(InstantDateBuilder::new(with_month).masked(Masked::YearDigits).build().is_err());

        let year = DatePart::year_only(1986);
        assert!(InstantDateBuilder::new(year).masked(Masked::Day).build().is_err());

        let bucket = DatePart::decade_bucket(198).unwrap();
        assert!(InstantDateBuilder::new(bucket).masked(Masked::Day).build().is_err());
    }

    #[test]
    fn test_display_masks_and_quality() {
        let month_masked = InstantDateBuilder::new(DatePart::year_only(1986))
            .masked(Masked::Month)
            .uncertain(true)
            .build()
            .unwrap();
        assert_eq!(month_masked.to_string(), "1986-XX?");

        let day_masked = InstantDateBuilder::new(DatePart::new(1986, Some(7), None).unwrap())
            .masked(Masked::Day)
            .quality(Quality::UNCERTAIN_APPROXIMATE)
            .build()
            .unwrap();
        assert_eq!(day_masked.to_string(), "1986-07-XX%");
        assert_eq!(day_masked.first_day().to_string(), "1986-07-01");
        assert_eq!(day_masked.last_day().to_string(), "1986-07-31");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rebuilds_through_builder() {
        let masked = InstantDateBuilder::new(DatePart::new(1986, Some(7), None).unwrap())
            .masked(Masked::Day)
            .uncertain(true)
            .build()
            .unwrap();
        let json = serde_json::to_string(&masked).unwrap();
        assert_eq!(serde_json::from_str::<InstantDate>(&json).unwrap(), masked);

        let open = serde_json::to_string(&InstantDate::open()).unwrap();
        assert_eq!(serde_json::from_str::<InstantDate>(&open).unwrap(), InstantDate::open());

        let quality = r#"{"uncertain":false,"approximate":false}"#;
        let year = r#"{"year":1986,"month":null,"day":null,"precision":"year"}"#;
        for json in [
            format!(r#"{{"date_part":null,"quality":{quality},"state":"Normal"}}"#),
            format!(r#"{{"date_part":{year},"quality":{quality},"state":"Open"}}"#),
            format!(r#"{{"date_part":{year},"quality":{quality},"state":{{"Unspecified":"Day"}}}}"#),
            format!(
                r#"{{"date_part":null,"quality":{{"uncertain":true,"approximate":false}},"state":"Unknown"}}"#
            ),
        ] {
            assert!(serde_json::from_str::<InstantDate>(&json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_bounds_drop_quality() {
        let approximate = InstantDateBuilder::new(DatePart::year_only(1989))
            .approximate(true)
            .build()
            .unwrap();
        let first = approximate.first_day();
        assert!(!first.is_approximate());
        assert_eq!(first.state(), InstantState::Normal);
        assert_eq!(first.to_string(), "1989-01-01");
    }
}
