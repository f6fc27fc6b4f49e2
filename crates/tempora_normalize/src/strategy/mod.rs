/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Recognizers for the date syntaxes found in heritage records.
//!
//! Each strategy is a pure function from a sanitized value to an optional
//! [`Extracted`] date. `Ok(None)` means the strategy declines; `Err` is kept
//! for builder failures, which indicate a defect rather than bad input.

use std::fmt;

use serde::Serialize;
use tempora_edtf::{DateError, Edtf};

mod brief_range;
mod century;
mod dcmi;
mod long_year;
mod numeric;
mod numeric_range;

pub use century::roman_to_decimal;

/// What a strategy recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub edtf: Edtf,
    /// A label carried by the value itself (the DCMI `name`).
    pub label: Option<String>,
}

impl From<Edtf> for Extracted {
    fn from(edtf: Edtf) -> Self {
        Extracted { edtf, label: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// The strict Level 0/1 grammar.
    Edtf,
    /// `19xx`, `18..`, `19th century`, `s. XVI-XX`.
    CenturyShorthand,
    /// `1942-1943`
    NumericRange,
    /// `[1842-1943]`, `(1842-1943)`
    BracketedRange,
    /// `1989.11/1990.11`, `1989/..`, `198 - 199`
    NumericDateRange,
    /// `01.11.1989`, `1989/11?`, `19UU-XX-99`
    NumericDate,
    /// `name=...; start=...; end=...`
    DcmiPeriod,
    /// `2014/15`
    BriefRange,
    /// `-600000`
    LongNegativeYear,
}

impl Strategy {
    /// Priority order; the first strategy to match wins.
    pub const ALL: [Strategy; 9] = [
        Strategy::Edtf,
        Strategy::CenturyShorthand,
        Strategy::NumericRange,
        Strategy::BracketedRange,
        Strategy::NumericDateRange,
        Strategy::NumericDate,
        Strategy::DcmiPeriod,
        Strategy::BriefRange,
        Strategy::LongNegativeYear,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Strategy::Edtf => "edtf",
            Strategy::CenturyShorthand => "century-shorthand",
            Strategy::NumericRange => "numeric-range",
            Strategy::BracketedRange => "bracketed-range",
            Strategy::NumericDateRange => "numeric-date-range",
            Strategy::NumericDate => "numeric-date",
            Strategy::DcmiPeriod => "dcmi-period",
            Strategy::BriefRange => "brief-range",
            Strategy::LongNegativeYear => "long-negative-year",
        }
    }

    pub fn extract(self, value: &str) -> Result<Option<Extracted>, DateError> {
        match self {
            Strategy::Edtf => declines(tempora_edtf::parse(value)).map(|e| e.map(Extracted::from)),
            Strategy::CenturyShorthand => century::extract(value),
            Strategy::NumericRange => numeric_range::extract(value),
            Strategy::BracketedRange => numeric_range::extract_bracketed(value),
            Strategy::NumericDateRange => numeric::extract_range(value),
            Strategy::NumericDate => numeric::extract(value),
            Strategy::DcmiPeriod => dcmi::extract(value),
            Strategy::BriefRange => brief_range::extract(value),
            Strategy::LongNegativeYear => long_year::extract(value),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Extraction failures become a decline; builder failures pass through.
pub(crate) fn declines<T>(result: Result<T, DateError>) -> Result<Option<T>, DateError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_extraction() => Ok(None),
        Err(err) => Err(err),
    }
}
