//! Tabular interchange store.
//!
//! The table is a JSON array of rows, one row per line:
//!
//! ```text
//! [
//!   ["Prefix","Original","Translation","Condition","Location","Identifier"],
//!   ["e","Hello","你好","","script.rpy:10","start_1a2b3c4d"]
//! ]
//! ```
//!
//! Row 1 is the fixed header and data starts at row 2; the 1-based row index
//! is what patches address.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::data::TranslationUnit;

pub const TABLE_HEADER: [&str; 6] = [
    "Prefix",
    "Original",
    "Translation",
    "Condition",
    "Location",
    "Identifier",
];

/// Row index of the first data row.
pub const FIRST_DATA_ROW: usize = 2;

/// One data row of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub prefix: String,
    pub original: String,
    pub translation: String,
    pub condition: String,
    pub location: String,
    pub identifier: String,
}

impl TableRow {
    pub fn from_unit(unit: TranslationUnit) -> Self {
        Self {
            prefix: unit.prefix,
            original: unit.original,
            translation: unit.translation,
            condition: String::new(),
            location: unit.location,
            identifier: unit.identifier,
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            &self.prefix,
            &self.original,
            &self.translation,
            &self.condition,
            &self.location,
            &self.identifier,
        ]
    }

    fn from_cells(cells: &[Value], row_index: usize) -> Result<Self> {
        let mut fields: [String; 6] = Default::default();
        for (field, cell) in fields.iter_mut().zip(cells) {
            *field = match cell {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => bail!("Row {} contains a nested value", row_index),
            };
        }
        let [prefix, original, translation, condition, location, identifier] = fields;
        Ok(Self {
            prefix,
            original,
            translation,
            condition,
            location,
            identifier,
        })
    }
}

/// In-memory copy of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: impl IntoIterator<Item = TranslationUnit>) -> Self {
        Self {
            rows: units.into_iter().map(TableRow::from_unit).collect(),
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows paired with their 1-based row index.
    pub fn indexed_rows(&self) -> impl Iterator<Item = (usize, &TableRow)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i + FIRST_DATA_ROW, row))
    }

    pub fn row(&self, row_index: usize) -> Option<&TableRow> {
        row_index
            .checked_sub(FIRST_DATA_ROW)
            .and_then(|i| self.rows.get(i))
    }

    /// Clear and rewrite the Condition cell. Returns false for unknown rows.
    pub fn set_condition(&mut self, row_index: usize, condition: &str) -> bool {
        let Some(row) = row_index
            .checked_sub(FIRST_DATA_ROW)
            .and_then(|i| self.rows.get_mut(i))
        else {
            return false;
        };
        row.condition.clear();
        row.condition.push_str(condition);
        true
    }

    /// Parse table content. Empty content is an empty table.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: Value = serde_json::from_str(content).context("Table is not valid JSON")?;
        let Value::Array(rows) = value else {
            bail!("Table root must be an array of rows");
        };

        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return Ok(Self::new());
        };
        let header_matches = header.as_array().is_some_and(|cells| {
            cells.len() >= TABLE_HEADER.len()
                && cells
                    .iter()
                    .zip(TABLE_HEADER)
                    .all(|(cell, expected)| cell.as_str() == Some(expected))
        });
        if !header_matches {
            bail!(
                "Table header must be [{}]",
                TABLE_HEADER.map(|h| format!("\"{}\"", h)).join(", ")
            );
        }

        let rows = rows
            .enumerate()
            .map(|(i, row)| {
                let row_index = i + FIRST_DATA_ROW;
                match row {
                    Value::Array(cells) => TableRow::from_cells(&cells, row_index),
                    _ => bail!("Row {} is not an array", row_index),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows })
    }

    /// Load a table file. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse table: {}", path.display()))
    }

    /// Serialize with the header first and one row per line.
    pub fn to_json(&self) -> Result<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(serde_json::to_string(&TABLE_HEADER).context("Failed to serialize header")?);
        for row in &self.rows {
            lines.push(serde_json::to_string(&row.cells()).context("Failed to serialize row")?);
        }
        Ok(format!("[\n  {}\n]\n", lines.join(",\n  ")))
    }

    /// Write the table in a single call, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write table: {}", path.display()))
    }
}
