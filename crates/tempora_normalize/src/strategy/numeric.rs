//! All-numeric dates written year first or year last, and ranges of them.
//!
//! Month and day may be replaced by `XX`, `UU`, `??` or `--`; trailing year
//! digits may be masked the same way. A masked year becomes a decade or
//! century bucket and loses its month and day.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tempora_edtf::{DateError, DatePart, Edtf, InstantDate, InstantDateBuilder, IntervalDate};

use super::Extracted;

const YEAR: &str = r"[0-9]{3,4}|[0-9]{2}(?:[xX]{2}|[uU]{2}|\?\?|--)|[0-9]{3}[xXuU]";
const PART: &str = r"[0-9]{1,2}|[xX]{2}|[uU]{2}|\?\?|--";

/// `1989-11-01`, `989.1.1`, `1989/XX`
static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({YEAR})(?:([-./])({PART}))?(?:([-./])({PART}))?$")).unwrap()
});
/// `01-11-1989`, `11/1989`, `XX.11.198X`
static YEAR_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:({PART})([-./]))?(?:({PART})([-./]))?({YEAR})$")).unwrap()
});
/// `1989 11 01`, `01 11 1989`
static SPACED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]{4}) ([0-9]{1,2}) ([0-9]{1,2})|([0-9]{1,2}) ([0-9]{1,2}) ([0-9]{4}))$")
        .unwrap()
});

/// What a date's fields may look like.
#[derive(Debug, Clone, Copy)]
struct Syntax {
    /// Characters allowed between year, month and day.
    separators: &'static str,
    /// Whether `XX`, `UU`, `??` and `--` may stand in for digits.
    unknown: bool,
}

impl Syntax {
    const SINGLE: Syntax = Syntax {
        separators: "-./",
        unknown: true,
    };
}

/// A range separator and what each side may hold.
struct RangeSeparator {
    text: &'static str,
    components: &'static str,
    /// Side values meaning "no bound".
    unspecified: &'static [&'static str],
}

const RANGE_SEPARATORS: [RangeSeparator; 5] = [
    RangeSeparator {
        text: " - ",
        components: "-./",
        unspecified: &["?", "-", ".."],
    },
    RangeSeparator {
        text: "/",
        components: "-.",
        unspecified: &["?", "-", ".."],
    },
    RangeSeparator {
        text: "|",
        components: "-./",
        unspecified: &["?", "-", ".."],
    },
    RangeSeparator {
        text: "-",
        components: "./",
        unspecified: &["?", ".."],
    },
    RangeSeparator {
        text: " ",
        components: "-./",
        unspecified: &[],
    },
];

#[derive(Debug)]
struct Parsed {
    date: DatePart,
    /// A three-digit year closes the text; a `?` after it reads as a masked digit.
    short_year_last: bool,
}

#[derive(Debug)]
enum Side {
    Unspecified,
    Dated { parsed: Parsed, uncertain: bool },
}

impl Side {
    fn instant(&self) -> Result<InstantDate, DateError> {
        match self {
            Side::Unspecified => Ok(InstantDate::open()),
            Side::Dated { parsed, uncertain } => InstantDateBuilder::new(parsed.date)
                .uncertain(*uncertain)
                .build(),
        }
    }
}

pub(super) fn extract(value: &str) -> Result<Option<Extracted>, DateError> {
    let (text, leading) = strip_leading_mark(value);
    let (text, trailing) = strip_trailing_mark(text);
    let Some(parsed) = parse(text, Syntax::SINGLE).or_else(|| parse_spaced(text)) else {
        return Ok(None);
    };
    if trailing && parsed.short_year_last {
        return Ok(None);
    }
    let instant = InstantDateBuilder::new(parsed.date)
        .uncertain(leading || trailing)
        .build()?;
    Ok(Some(Edtf::Instant(instant).into()))
}

/// Two numeric dates joined by ` - `, `/`, `|`, `-` or a space.
pub(super) fn extract_range(value: &str) -> Result<Option<Extracted>, DateError> {
    for separator in &RANGE_SEPARATORS {
        let mut sides = value.split(separator.text);
        let (Some(start), Some(end), None) = (sides.next(), sides.next(), sides.next()) else {
            continue;
        };
        if let Some(extracted) = separator.interval(start, end)? {
            return Ok(Some(extracted));
        }
    }
    Ok(None)
}

impl RangeSeparator {
    fn interval(&self, start: &str, end: &str) -> Result<Option<Extracted>, DateError> {
        let (Some(start), Some(end)) = (self.side(start), self.side(end)) else {
            return Ok(None);
        };
        match (&start, &end) {
            (Side::Unspecified, Side::Unspecified) => return Ok(None),
            (Side::Dated { parsed, .. }, Side::Unspecified) if parsed.short_year_last => {
                return Ok(None);
            }
            _ => {}
        }
        let interval = IntervalDate::new(start.instant()?, end.instant()?)?;
        Ok(Some(Edtf::Interval(interval).into()))
    }

    fn side(&self, text: &str) -> Option<Side> {
        if self.unspecified.contains(&text) {
            return Some(Side::Unspecified);
        }
        let (text, leading) = match text.strip_prefix('?') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        let (text, trailing) = match text.strip_suffix('?') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        let syntax = Syntax {
            separators: self.components,
            unknown: false,
        };
        let parsed = parse(text, syntax)?;
        if trailing && parsed.short_year_last {
            return None;
        }
        Some(Side::Dated {
            parsed,
            uncertain: leading || trailing,
        })
    }
}

/// Strips one leading `?` unless it opens a `??` mask.
fn strip_leading_mark(value: &str) -> (&str, bool) {
    match value.strip_prefix('?') {
        Some(rest) if value.starts_with("???") || !rest.starts_with('?') => (rest, true),
        _ => (value, false),
    }
}

/// Strips one trailing `?` unless it closes a `??` mask.
fn strip_trailing_mark(value: &str) -> (&str, bool) {
    match value.strip_suffix('?') {
        Some(rest) if value.ends_with("???") || !rest.ends_with('?') => (rest, true),
        _ => (value, false),
    }
}

fn parse(text: &str, syntax: Syntax) -> Option<Parsed> {
    if let Some(caps) = YEAR_FIRST.captures(text) {
        let parts = separated_parts(&caps, [(2, 3), (4, 5)], syntax)?;
        let (month, day) = (parts.first().copied(), parts.get(1).copied());
        return fields(&caps[1], month, day, parts.is_empty(), syntax);
    }
    if let Some(caps) = YEAR_LAST.captures(text) {
        let parts = separated_parts(&caps, [(2, 1), (4, 3)], syntax)?;
        let (month, day) = match parts.as_slice() {
            [day, month] => (Some(*month), Some(*day)),
            [month] => (Some(*month), None),
            _ => (None, None),
        };
        return fields(&caps[5], month, day, true, syntax);
    }
    None
}

/// The month and day texts in written order, checking each separator.
fn separated_parts<'t>(
    caps: &Captures<'t>,
    groups: [(usize, usize); 2],
    syntax: Syntax,
) -> Option<Vec<&'t str>> {
    let mut parts = Vec::with_capacity(2);
    for (separator, part) in groups {
        let (Some(separator), Some(part)) = (caps.get(separator), caps.get(part)) else {
            continue;
        };
        let (separator, part) = (separator.as_str(), part.as_str());
        if !syntax.separators.contains(separator) || (part == "--" && separator == "-") {
            return None;
        }
        parts.push(part);
    }
    Some(parts)
}

fn parse_spaced(text: &str) -> Option<Parsed> {
    let caps = SPACED.captures(text)?;
    let (year, month, day) = if caps.get(1).is_some() {
        (&caps[1], &caps[2], &caps[3])
    } else {
        (&caps[6], &caps[5], &caps[4])
    };
    fields(year, Some(month), Some(day), false, Syntax::SINGLE)
}

fn fields(
    year: &str,
    month: Option<&str>,
    day: Option<&str>,
    year_last: bool,
    syntax: Syntax,
) -> Option<Parsed> {
    let all_digits = |text: &str| text.bytes().all(|b| b.is_ascii_digit());
    if !syntax.unknown && !(all_digits(year) && month.into_iter().chain(day).all(all_digits)) {
        return None;
    }
    let digits = year.bytes().take_while(u8::is_ascii_digit).count();
    let index = year[..digits].parse::<i64>().ok()?;
    let date = match year.len() - digits {
        0 => {
            let month = number(month);
            DatePart::new(index, month, month.and(number(day))).ok()?
        }
        1 => DatePart::decade_bucket(index).ok()?,
        2 => DatePart::century_bucket(index).ok()?,
        _ => return None,
    };
    Some(Parsed {
        date,
        short_year_last: year_last && year.len() == 3 && digits == 3,
    })
}

/// A written month or day; masked or zero fields are absent.
fn number(text: Option<&str>) -> Option<u32> {
    text.filter(|text| text.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|text| text.parse().ok())
        .filter(|&value| value != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(value: &str) -> Option<String> {
        extract(value).unwrap().map(|e| e.edtf.to_string())
    }

    fn range(value: &str) -> Option<String> {
        extract_range(value).unwrap().map(|e| e.edtf.to_string())
    }

    fn check(table: &[(&str, Option<&str>)], f: fn(&str) -> Option<String>) {
        for &(input, expected) in table {
            assert_eq!(f(input).as_deref(), expected, "{input:?}");
        }
    }

    #[test]
    fn test_year_first() {
        check(
            &[
                ("1989", Some("1989")),
                ("?1989", Some("1989?")),
                ("?1989?", Some("1989?")),
                ("1989.11", Some("1989-11")),
                ("1989/11?", Some("1989-11?")),
                ("?1989.11.01", Some("1989-11-01?")),
                ("1989/11/01", Some("1989-11-01")),
                ("989-1-1", Some("0989-01-01")),
                ("?989/1-1", Some("0989-01-01?")),
                ("?989-1/1", Some("0989-01-01?")),
                ("1989-13-32", None),
                ("1989-02-30", None),
                ("89-01-01", None),
                ("12345-01-01", None),
                ("1234-123-12", None),
                ("1234-12-123", None),
                ("1989--11--01", None),
                ("1989..11..01", None),
                ("1989//11//01", None),
            ],
            canonical,
        );
    }

    #[test]
    fn test_year_last() {
        check(
            &[
                ("11-1989", Some("1989-11")),
                ("?11/1989?", Some("1989-11?")),
                ("01-11-1989", Some("1989-11-01")),
                ("01.11.1989?", Some("1989-11-01?")),
                ("1.1.989", Some("0989-01-01")),
                ("?1/1-989", Some("0989-01-01?")),
                ("32-13-1989", None),
                ("01-01-89", None),
                ("01-01-12345", None),
                ("12-123-1234", None),
                ("123-12-1234", None),
            ],
            canonical,
        );
    }

    #[test]
    fn test_three_digit_year_then_question_mark() {
        check(
            &[
                ("198?", None),
                ("198-", None),
                ("198-?", None),
                ("?99/99-989?", None),
                ("?1.1.989", Some("0989-01-01?")),
            ],
            canonical,
        );
    }

    #[test]
    fn test_masked_fields() {
        check(
            &[
                ("198U", Some("198X")),
                ("19--", Some("19XX")),
                ("19UU", Some("19XX")),
                ("19??", Some("19XX")),
                ("19???", Some("19XX?")),
                ("1989.XX", Some("1989")),
                ("1989/--", Some("1989")),
                ("1989-??", Some("1989")),
                ("?1989.UU", Some("1989?")),
                ("1989.???", Some("1989?")),
                ("1989-XX?", Some("1989?")),
                ("1989.11.XX", Some("1989-11")),
                ("1989/11/--", Some("1989-11")),
                ("1989-11-uu", Some("1989-11")),
                ("1989-??-??", Some("1989")),
                ("198X.11.XX", Some("198X")),
                ("19XX/XX/99", Some("19XX")),
                ("19UU/--/99?", Some("19XX?")),
                ("XX.1989", Some("1989")),
                ("--/1989", Some("1989")),
                ("???.1989", Some("1989?")),
                ("??-1989?", Some("1989?")),
                ("XX.11.1989", Some("1989-11")),
                ("xx/--/198X", Some("198X")),
                ("?99-XX-19UU", Some("19XX?")),
                ("??-??-1989", Some("1989")),
            ],
            canonical,
        );
    }

    #[test]
    fn test_masked_field_errors() {
        for input in [
            "1989---",
            "?1989---",
            "---1989",
            "?---1989",
            "1989-11---",
            "---11-1989",
            "1989.11.X",
            "1989.11.?",
            "1989.11.-",
            "1989-????",
            "????-1989",
            "X.11.1989",
            "-.11.1989",
            "99XX",
        ] {
            assert_eq!(canonical(input), None, "{input:?}");
        }
    }

    #[test]
    fn test_spaced_fields() {
        check(
            &[
                ("1989 11 01", Some("1989-11-01")),
                ("01 11 1989", Some("1989-11-01")),
                ("1989 13 01", None),
                ("1989 11", None),
            ],
            canonical,
        );
    }

    #[test]
    fn test_ranges() {
        check(
            &[
                ("198/199", Some("0198/0199")),
                ("1989?/1990?", Some("1989?/1990?")),
                ("?1989/?1990", Some("1989?/1990?")),
                ("1989/?", Some("1989/..")),
                ("1989/-", Some("1989/..")),
                ("-/1989", Some("../1989")),
                ("1989 - ?", Some("1989/..")),
                ("- - 1989", Some("../1989")),
                ("198 - 199", Some("0198/0199")),
                ("1989|1990", Some("1989/1990")),
                ("..|1989", Some("../1989")),
                ("198-199", Some("0198/0199")),
                ("1989-?", Some("1989/..")),
                ("..-1989", Some("../1989")),
                ("1989 1990", Some("1989/1990")),
                ("?1989 ?1990", Some("1989?/1990?")),
            ],
            range,
        );
    }

    #[test]
    fn test_ranges_with_months() {
        check(
            &[
                ("1989.11/1990.11", Some("1989-11/1990-11")),
                ("198-11/199-11", Some("0198-11/0199-11")),
                ("?1989-11/?1990-11", Some("1989-11?/1990-11?")),
                ("1989-11/..", Some("1989-11/..")),
                ("../1989.11", Some("../1989-11")),
                ("1989/11 - 1990/11", Some("1989-11/1990-11")),
                ("1989.11? - 1990.11?", Some("1989-11?/1990-11?")),
                (".. - 1989/11", Some("../1989-11")),
                ("198/11|199/11", Some("0198-11/0199-11")),
                ("1989/11-1990/11", Some("1989-11/1990-11")),
                ("1989.11-..", Some("1989-11/..")),
                ("?-1989.11", Some("../1989-11")),
                ("1989-11 1990-11", Some("1989-11/1990-11")),
            ],
            range,
        );
    }

    #[test]
    fn test_not_a_range() {
        for input in [
            "1989 ",
            " 1989",
            "1989 ..",
            "?/?",
            "../..",
            "198/..",
            "--1989/11",
            "1989.11--",
            "1989-11/1990/11",
            "2014/15",
            "1989/13",
            "1989 / 1990 / 1991",
        ] {
            assert_eq!(range(input), None, "{input:?}");
        }
    }
}
