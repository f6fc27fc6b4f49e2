//! DCMI Period encoding: `name=Byzantine Period; start=0395; end=0641`.
//!
//! A leading component without `=` is read as the name. `scheme` and other
//! keys are ignored. A missing `start` or `end` becomes an open side, but at
//! least one of them must be present.

use tempora_edtf::{parse_instant, DateError, Edtf, InstantDate, IntervalDate};

use super::{declines, Extracted};

#[derive(Debug, Default)]
struct Period<'a> {
    name: Option<&'a str>,
    start: Option<&'a str>,
    end: Option<&'a str>,
}

fn components(value: &str) -> Option<Period<'_>> {
    if !value.contains('=') {
        return None;
    }
    let mut period = Period::default();
    for (position, component) in value.split(';').map(str::trim).enumerate() {
        if component.is_empty() {
            continue;
        }
        let Some((key, field)) = component.split_once('=') else {
            if position == 0 {
                period.name = Some(component);
                continue;
            }
            return None;
        };
        let slot = match key.trim().to_ascii_lowercase().as_str() {
            "name" => &mut period.name,
            "start" => &mut period.start,
            "end" => &mut period.end,
            _ => continue,
        };
        let field = field.trim();
        if slot.is_some() || field.is_empty() {
            return None;
        }
        *slot = Some(field);
    }
    Some(period)
}

fn side(field: Option<&str>) -> Result<Option<InstantDate>, DateError> {
    match field {
        Some(text) => declines(parse_instant(text)),
        None => Ok(Some(InstantDate::open())),
    }
}

pub(super) fn extract(value: &str) -> Result<Option<Extracted>, DateError> {
    let Some(period) = components(value) else {
        return Ok(None);
    };
    if period.start.is_none() && period.end.is_none() {
        return Ok(None);
    }
    let (Some(start), Some(end)) = (side(period.start)?, side(period.end)?) else {
        return Ok(None);
    };
    let interval = IntervalDate::new(start, end)?;
    Ok(Some(Extracted {
        edtf: Edtf::Interval(interval),
        label: period.name.map(str::to_string),
    }))
}
