/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Linked-data time spans built from resolved dates.
//!
//! A [`TimeSpan`] carries the identifier, labels, notation, begin/end days and
//! the century buckets the range belongs to. It serializes to JSON through
//! serde, or to N-Triples lines with [`TimeSpan::to_ntriples`].

use std::fmt::Write as _;
use std::ops::RangeInclusive;

use serde::Serialize;
use tempora_edtf::{century_of_year, Edtf, InstantDate, Precision};

use crate::config::LinkedDataConfig;
use crate::error::Result;
use crate::normalizer::ResolvedDate;

/// Centuries with a published time-span resource.
pub const CENTURY_BUCKETS: RangeInclusive<i64> = 1..=21;

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const EDM_TIMESPAN: &str = "http://www.europeana.eu/schemas/edm/TimeSpan";
pub const EDM_BEGIN: &str = "http://www.europeana.eu/schemas/edm/begin";
pub const EDM_END: &str = "http://www.europeana.eu/schemas/edm/end";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const SKOS_NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";
pub const SKOS_NOTE: &str = "http://www.w3.org/2004/02/skos/core#note";
pub const DCTERMS_IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    pub id: String,
    pub pref_label: Label,
    pub notation: String,
    pub notation_datatype: String,
    /// First calendar day as `YYYY-MM-DD`. Unset for open or unknown starts
    /// and for years beyond four digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    /// Last calendar day, with the same limits as `begin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub is_part_of: Vec<String>,
}

impl TimeSpan {
    pub fn from_resolved(resolved: &ResolvedDate, config: &LinkedDataConfig) -> Self {
        let edtf = resolved.edtf();
        let notation = edtf.to_string();
        let id = format!(
            "{}{}",
            config.identifier_prefix,
            url::form_urlencoded::byte_serialize(notation.as_bytes()).collect::<String>()
        );
        let pref_label = match resolved.label() {
            Some(name) => Label {
                value: name.to_string(),
                language: None,
            },
            None => Label {
                value: notation.clone(),
                language: Some(config.no_label_language.clone()),
            },
        };

        let quality = edtf.quality();
        let mut notes = Vec::new();
        if quality.approximate {
            notes.push("approximate".to_string());
        }
        if quality.uncertain {
            notes.push("uncertain".to_string());
        }

        let is_part_of = century_links(edtf)
            .into_iter()
            .map(|century| format!("{}{}", config.bucket_base_uri, century))
            .collect();

        TimeSpan {
            id,
            pref_label,
            notation,
            notation_datatype: config.notation_datatype.clone(),
            begin: edtf.first_day().as_ref().and_then(calendar_day),
            end: edtf.last_day().as_ref().and_then(calendar_day),
            notes,
            is_part_of,
        }
    }

    /// The span as a JSON value, with camelCase keys.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// One N-Triples line per statement.
    pub fn to_ntriples(&self) -> String {
        let subject = format!("<{}>", self.id);
        let mut out = String::new();
        let mut triple = |predicate: &str, object: String| {
            let _ = writeln!(out, "{subject} <{predicate}> {object} .");
        };

        triple(RDF_TYPE, format!("<{EDM_TIMESPAN}>"));
        let label = quote(&self.pref_label.value);
        triple(
            SKOS_PREF_LABEL,
            match &self.pref_label.language {
                Some(language) => format!("{label}@{language}"),
                None => label,
            },
        );
        triple(
            SKOS_NOTATION,
            format!("{}^^<{}>", quote(&self.notation), self.notation_datatype),
        );
        if let Some(begin) = &self.begin {
            triple(EDM_BEGIN, quote(begin));
        }
        if let Some(end) = &self.end {
            triple(EDM_END, quote(end));
        }
        for note in &self.notes {
            triple(SKOS_NOTE, quote(note));
        }
        for bucket in &self.is_part_of {
            triple(DCTERMS_IS_PART_OF, format!("<{bucket}>"));
        }
        out
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Century buckets containing the first and the last day of `edtf`.
///
/// Both days must be concrete calendar days inside [`CENTURY_BUCKETS`];
/// otherwise there are no links. The result holds one bucket when both days
/// share a century and two when they do not. Centuries strictly between the
/// endpoints are not linked: `0395/0641` gives 4 and 7, not 5 and 6.
pub fn century_links(edtf: &Edtf) -> Vec<i64> {
    let (Some(first), Some(last)) = (edtf.first_day(), edtf.last_day()) else {
        return Vec::new();
    };
    let (Some(first), Some(last)) = (calendar_century(&first), calendar_century(&last)) else {
        return Vec::new();
    };
    if first == last {
        vec![first]
    } else {
        vec![first, last]
    }
}

fn calendar_day(day: &InstantDate) -> Option<String> {
    let date = day.date_part()?;
    (!date.is_long_year()).then(|| day.to_string())
}

fn calendar_century(day: &InstantDate) -> Option<i64> {
    let date = day.date_part()?;
    if date.precision() != Precision::Year || date.is_long_year() {
        return None;
    }
    Some(century_of_year(date.year())).filter(|century| CENTURY_BUCKETS.contains(century))
}
