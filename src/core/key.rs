//! Correlation keys.
//!
//! Table rows carry a `file:line` location while lines read from the original
//! scripts only know their file, so both sides are reduced to
//! `(prefix, original, file name)` before they are joined.

use std::{fmt, path::Path};

use crate::core::data::TranslationUnit;

/// Join key between table rows and script lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrelationKey {
    pub prefix: String,
    pub original: String,
    pub file_name: String,
}

impl CorrelationKey {
    /// Key of a table row or unit; the file part is `location` up to the first `:`.
    pub fn from_row(prefix: &str, original: &str, location: &str) -> Self {
        let file_name = location.split(':').next().unwrap_or_default();
        Self {
            prefix: prefix.to_string(),
            original: original.to_string(),
            file_name: file_name.to_string(),
        }
    }

    /// Key of a line read from a script; the file part is the script's base name.
    pub fn from_script(prefix: &str, original: &str, path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            prefix: prefix.to_string(),
            original: original.to_string(),
            file_name,
        }
    }

    pub fn from_unit(unit: &TranslationUnit) -> Self {
        Self::from_row(&unit.prefix, &unit.original, &unit.location)
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "\"{}\" in {}", self.original, self.file_name)
        } else {
            write!(
                f,
                "{} \"{}\" in {}",
                self.prefix, self.original, self.file_name
            )
        }
    }
}
