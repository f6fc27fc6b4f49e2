//! Century and decade shorthand the strict grammar does not accept.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tempora_edtf::{DateError, DatePart, Edtf, InstantDate, InstantDateBuilder, IntervalDate};

use super::Extracted;

const ROMAN: &str = r"(X?(?:IX|IV|VI{0,3}|I{1,3})|X|XXI?)";
const CENTURY_PREFIX: &str = r"(?:(?:s|sec|saec)(?:\s|\.\s?))?";

/// `19xx`, `19??`, `19--`, and `18..` for centuries 10 to 21 only
static MASKED_CENTURY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\?)?(?:(\d{2})(?:[xX]{2}|\?\?|--)|(1\d|2[01])\.\.)(\?)?$").unwrap()
});
/// `190x`
static MASKED_DECADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\?)?(\d{3})[xX](\?)?$").unwrap());
/// `1st century` to `21st century`
static ORDINAL_CENTURY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\?)?(2?1st|2nd|3rd|(?:1\d|[4-9]|20)th)\s+century(\?)?$").unwrap()
});
/// `XIV`, `s. XIX`, `S. XVI-XX`
static ROMAN_CENTURY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(\?)?{CENTURY_PREFIX}{ROMAN}(?:\s?-\s?{ROMAN})?(\?)?$"
    ))
    .unwrap()
});

const MAX_CENTURY: u32 = 21;

pub(super) fn extract(value: &str) -> Result<Option<Extracted>, DateError> {
    if let Some(caps) = MASKED_CENTURY.captures(value) {
        let group = if caps.get(2).is_some() { 2 } else { 3 };
        let Ok(date_part) = DatePart::century_bucket(number(&caps, group)) else {
            return Ok(None);
        };
        return bucket(date_part, uncertain(&caps, 4)).map(Some);
    }
    if let Some(caps) = MASKED_DECADE.captures(value) {
        let index = number(&caps, 2);
        return bucket(DatePart::decade_bucket(index)?, uncertain(&caps, 3)).map(Some);
    }
    if let Some(caps) = ORDINAL_CENTURY.captures(value) {
        let ordinal = &caps[2];
        let Ok(century) = ordinal[..ordinal.len() - 2].parse::<u32>() else {
            return Ok(None);
        };
        let start = century_instant(century, uncertain(&caps, 3))?;
        return Ok(start.map(|instant| Edtf::Instant(instant).into()));
    }
    if let Some(caps) = ROMAN_CENTURY.captures(value) {
        let is_uncertain = uncertain(&caps, 4);
        let Some(start) = roman_century(caps.get(2).map(|m| m.as_str()), is_uncertain)? else {
            return Ok(None);
        };
        let edtf = match caps.get(3) {
            None => Edtf::Instant(start),
            Some(end) => match roman_century(Some(end.as_str()), is_uncertain)? {
                Some(end) => Edtf::Interval(IntervalDate::new(start, end)?),
                None => return Ok(None),
            },
        };
        return Ok(Some(edtf.into()));
    }
    Ok(None)
}

fn number(caps: &Captures<'_>, group: usize) -> i64 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

/// A `?` before or after the value.
fn uncertain(caps: &Captures<'_>, trailing_group: usize) -> bool {
    caps.get(1).is_some() || caps.get(trailing_group).is_some()
}

fn bucket(date_part: DatePart, uncertain: bool) -> Result<Extracted, DateError> {
    let instant = InstantDateBuilder::new(date_part)
        .uncertain(uncertain)
        .build()?;
    Ok(Edtf::Instant(instant).into())
}

/// Ordinal century `n` (1-based) as its bucket, `n - 1`.
fn century_instant(century: u32, uncertain: bool) -> Result<Option<InstantDate>, DateError> {
    if !(1..=MAX_CENTURY).contains(&century) {
        return Ok(None);
    }
    let date_part = DatePart::century_bucket(i64::from(century) - 1)?;
    InstantDateBuilder::new(date_part)
        .uncertain(uncertain)
        .build()
        .map(Some)
}

fn roman_century(numeral: Option<&str>, uncertain: bool) -> Result<Option<InstantDate>, DateError> {
    match numeral.and_then(roman_to_decimal) {
        Some(century) => century_instant(century, uncertain),
        None => Ok(None),
    }
}

/// Value of a Roman numeral, case-insensitive.
pub fn roman_to_decimal(numeral: &str) -> Option<u32> {
    let values = numeral
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            'L' => Some(50),
            'C' => Some(100),
            'D' => Some(500),
            'M' => Some(1000),
            _ => None,
        })
        .collect::<Option<Vec<u32>>>()?;
    if values.is_empty() {
        return None;
    }
    let mut total = 0;
    for (i, &value) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if next > value => total -= value as i64,
            _ => total += value as i64,
        }
    }
    u32::try_from(total).ok().filter(|&total| total > 0)
}
