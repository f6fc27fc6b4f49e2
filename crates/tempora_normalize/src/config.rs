/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Normalizer and serializer settings, loadable from YAML or JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    #[serde(default)]
    pub linked_data: LinkedDataConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// When false only the strict EDTF grammar is tried.
    #[serde(default = "default_true")]
    pub legacy_strategies: bool,

    /// Retry once on a cleaned value (brackets, circa, trailing notes).
    #[serde(default = "default_true")]
    pub clean: bool,

    /// Treat every value as a generic property (subject, coverage).
    #[serde(default)]
    pub generic_property: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedDataConfig {
    #[serde(default = "default_bucket_base_uri")]
    pub bucket_base_uri: String,

    #[serde(default = "default_notation_datatype")]
    pub notation_datatype: String,

    #[serde(default = "default_identifier_prefix")]
    pub identifier_prefix: String,

    /// Language tag for labels that are bare notation.
    #[serde(default = "default_no_label_language")]
    pub no_label_language: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            legacy_strategies: true,
            clean: true,
            generic_property: false,
        }
    }
}

impl Default for LinkedDataConfig {
    fn default() -> Self {
        Self {
            bucket_base_uri: default_bucket_base_uri(),
            notation_datatype: default_notation_datatype(),
            identifier_prefix: default_identifier_prefix(),
            no_label_language: default_no_label_language(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_bucket_base_uri() -> String {
    "http://data.europeana.eu/timespan/".to_string()
}

fn default_notation_datatype() -> String {
    "http://id.loc.gov/datatypes/edtf/EDTF-level1".to_string()
}

fn default_identifier_prefix() -> String {
    "#".to_string()
}

fn default_no_label_language() -> String {
    "zxx".to_string()
}

impl Config {
    /// Reads a YAML or JSON file; missing keys take their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str_at(&content, path)
    }

    fn from_str_at(content: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| NormalizeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
