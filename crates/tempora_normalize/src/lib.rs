/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Tempora Normalize
//!
//! Turns the date strings found in cultural-heritage metadata into EDTF and
//! publishes them as linked-data time spans. Values the strict grammar
//! rejects are tried against a fixed list of legacy strategies (century
//! shorthand, year and bracketed ranges, numeric dates and their ranges, DCMI
//! periods, brief ranges, long negative years), then again after each of two
//! cleaning passes.
//!
//! # Example
//!
//! ```rust
//! use tempora_normalize::{Config, DatesNormalizer, NormalizationResult, TimeSpan};
//!
//! let config = Config::default();
//! let normalizer = DatesNormalizer::new(config.normalizer.clone());
//! let result = normalizer
//!     .normalize_date_property("Byzantine Period; start=0395; end=0641")
//!     .unwrap();
//! let NormalizationResult::Matched(resolved) = result else {
//!     panic!("expected a match");
//! };
//! let span = TimeSpan::from_resolved(&resolved, &config.linked_data);
//! assert_eq!(span.notation, "0395/0641");
//! assert_eq!(span.pref_label.value, "Byzantine Period");
//! ```

pub mod config;
pub mod error;
pub mod linked_data;
pub mod normalizer;
pub mod sanitize;
pub mod strategy;

pub use config::{Config, LinkedDataConfig, NormalizerConfig};
pub use error::{NormalizeError, Result};
pub use linked_data::TimeSpan;
pub use normalizer::{DatesNormalizer, NormalizationResult, ResolvedDate};
pub use sanitize::CleanOperation;
pub use strategy::Strategy;
