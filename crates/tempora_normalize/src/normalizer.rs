/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The normalization orchestrator.
//!
//! A value is sanitized, then every enabled strategy is tried in priority
//! order. If none matches and cleaning is enabled, up to two cleaning passes
//! follow, each feeding the next, and the chain reruns after each one.

use std::fmt;

use tempora_edtf::{DateError, Edtf, Quality};
use tracing::{debug, trace, warn};

use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::sanitize::{clean, sanitize_characters, CleanOperation, Cleaned};
use crate::strategy::{Extracted, Strategy};

/// A successful normalization and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    edtf: Edtf,
    original_label: String,
    strategy: Strategy,
    label: Option<String>,
    clean_operation: Option<CleanOperation>,
}

impl ResolvedDate {
    pub fn edtf(&self) -> &Edtf {
        &self.edtf
    }

    /// The raw input, before sanitizing.
    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// A name supplied by the value itself (DCMI `name`).
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The last cleaning operation applied before a strategy matched, if any.
    pub fn clean_operation(&self) -> Option<CleanOperation> {
        self.clean_operation
    }

    /// Canonical EDTF text.
    pub fn canonical(&self) -> String {
        self.edtf.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationResult {
    Matched(ResolvedDate),
    /// Nothing recognised the value; carries the raw input.
    NoMatch(String),
}

impl NormalizationResult {
    pub fn resolved(&self) -> Option<&ResolvedDate> {
        match self {
            NormalizationResult::Matched(resolved) => Some(resolved),
            NormalizationResult::NoMatch(_) => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, NormalizationResult::Matched(_))
    }
}

impl fmt::Display for NormalizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationResult::Matched(resolved) => write!(f, "{}", resolved.edtf),
            NormalizationResult::NoMatch(_) => write!(f, "no match"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatesNormalizer {
    config: NormalizerConfig,
}

impl DatesNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes a value from a property that should hold a date.
    pub fn normalize_date_property(&self, input: &str) -> Result<NormalizationResult> {
        if self.config.generic_property {
            return self.normalize_generic_property(input);
        }
        self.normalize(input, Mode::DateProperty)
    }

    /// Normalizes a value from a property that may hold a date among other
    /// things. Brief ranges are not attempted and only enclosing brackets or
    /// parentheses are cleaned.
    pub fn normalize_generic_property(&self, input: &str) -> Result<NormalizationResult> {
        self.normalize(input, Mode::GenericProperty)
    }

    fn normalize(&self, input: &str, mode: Mode) -> Result<NormalizationResult> {
        let sanitized = sanitize_characters(input);
        if sanitized.is_empty() {
            return Ok(NormalizationResult::NoMatch(input.to_string()));
        }

        if let Some((strategy, extracted)) = self.run_strategies(&sanitized, mode)? {
            return Ok(self.matched(input, strategy, extracted, None));
        }

        if self.config.clean {
            let mut value = sanitized;
            let mut approximate = false;
            for operations in mode.clean_passes() {
                let Some(Cleaned { value: cleaned, operation }) = clean(&value, operations) else {
                    continue;
                };
                approximate |= operation.is_approximate();
                debug!(input, cleaned = %cleaned, operation = %operation, "retrying cleaned value");
                if let Some((strategy, mut extracted)) = self.run_strategies(&cleaned, mode)? {
                    if approximate {
                        extracted.edtf = mark_approximate(&extracted.edtf)?;
                    }
                    return Ok(self.matched(input, strategy, extracted, Some(operation)));
                }
                value = cleaned;
            }
        }

        debug!(input, "no strategy matched");
        Ok(NormalizationResult::NoMatch(input.to_string()))
    }

    fn strategies(&self, mode: Mode) -> impl Iterator<Item = Strategy> + '_ {
        Strategy::ALL.into_iter().filter(move |&strategy| {
            (self.config.legacy_strategies || strategy == Strategy::Edtf)
                && !(mode == Mode::GenericProperty && strategy == Strategy::BriefRange)
        })
    }

    fn run_strategies(&self, value: &str, mode: Mode) -> Result<Option<(Strategy, Extracted)>> {
        for strategy in self.strategies(mode) {
            match strategy.extract(value) {
                Ok(Some(extracted)) => {
                    debug!(%strategy, value, canonical = %extracted.edtf, "strategy matched");
                    return Ok(Some((strategy, extracted)));
                }
                Ok(None) => trace!(%strategy, value, "strategy declined"),
                Err(err) => {
                    warn!(%strategy, value, error = %err, "date construction failed");
                    return Err(err.into());
                }
            }
        }
        Ok(None)
    }

    fn matched(
        &self,
        input: &str,
        strategy: Strategy,
        extracted: Extracted,
        clean_operation: Option<CleanOperation>,
    ) -> NormalizationResult {
        NormalizationResult::Matched(ResolvedDate {
            edtf: extracted.edtf,
            original_label: input.to_string(),
            strategy,
            label: extracted.label,
            clean_operation,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    DateProperty,
    GenericProperty,
}

impl Mode {
    fn clean_passes(self) -> &'static [&'static [CleanOperation]] {
        match self {
            Mode::DateProperty => &[&CleanOperation::FIRST_PASS, &CleanOperation::SECOND_PASS],
            Mode::GenericProperty => &[&CleanOperation::GENERIC_PROPERTY],
        }
    }
}

fn mark_approximate(edtf: &Edtf) -> std::result::Result<Edtf, DateError> {
    edtf.map_quality(|quality| Quality {
        approximate: true,
        ..quality
    })
}
