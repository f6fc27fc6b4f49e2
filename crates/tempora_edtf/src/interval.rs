use std::fmt;

use crate::error::{DateError, Result};
use crate::instant::{InstantDate, Quality};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A range between two instants, either of which may be open or unknown.
///
/// `start <= end` is not checked; reversed ranges are kept as given.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "IntervalDateFields"))]
pub struct IntervalDate {
    start: InstantDate,
    end: InstantDate,
}

impl IntervalDate {
    /// Fails when neither side carries a date.
    pub fn new(start: InstantDate, end: InstantDate) -> Result<Self> {
        if start.is_sentinel() && end.is_sentinel() {
            return Err(DateError::builder(format!(
                "interval {start}/{end} has no bounded side"
            )));
        }
        Ok(IntervalDate { start, end })
    }

    pub fn start(&self) -> &InstantDate {
        &self.start
    }

    pub fn end(&self) -> &InstantDate {
        &self.end
    }

    pub fn first_day(&self) -> InstantDate {
        self.start.first_day()
    }

    pub fn last_day(&self) -> InstantDate {
        self.end.last_day()
    }

    /// Flags carried by either side.
    pub fn quality(&self) -> Quality {
        let (start, end) = (self.start.quality(), self.end.quality());
        Quality {
            uncertain: start.uncertain || end.uncertain,
            approximate: start.approximate || end.approximate,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct IntervalDateFields {
    start: InstantDate,
    end: InstantDate,
}

#[cfg(feature = "serde")]
impl TryFrom<IntervalDateFields> for IntervalDate {
    type Error = DateError;

    fn try_from(fields: IntervalDateFields) -> Result<Self> {
        IntervalDate::new(fields.start, fields.end)
    }
}

impl fmt::Display for IntervalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}
