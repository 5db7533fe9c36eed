//! Correlation of script lines with table rows, and condition patches.
//!
//! The row index is built once per run. Every conditional line found in the
//! original scripts is looked up by its [`CorrelationKey`]; a key that maps to
//! several rows cannot be told apart without line-level data, so all of those
//! rows are flagged with [`REPEAT_CONDITION`] instead of picking one.

use std::{collections::HashMap, path::Path};

use crate::{
    core::{
        data::{STRINGS_PREFIX, SourceContext},
        extract::read_script,
        key::CorrelationKey,
        parsers::conditions::analyze_conditions,
        table::Table,
    },
    issues::{Issue, RepeatIssue, UnmatchedKeyIssue},
};

/// Condition written to rows whose key is ambiguous.
pub const REPEAT_CONDITION: &str = "repeat";

/// Outcome of looking up one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    Unmatched,
    Unique(usize),
    Ambiguous(Vec<usize>),
}

/// Key → row indices of every dialogue row in the table.
#[derive(Debug, Default)]
pub struct RowIndex {
    rows: HashMap<CorrelationKey, Vec<usize>>,
}

impl RowIndex {
    /// Index all dialogue rows. String-table rows and rows without a location
    /// are left out.
    pub fn build(table: &Table) -> Self {
        let mut rows: HashMap<CorrelationKey, Vec<usize>> = HashMap::new();
        for (row_index, row) in table.indexed_rows() {
            if row.prefix == STRINGS_PREFIX || row.location.is_empty() {
                continue;
            }
            let key = CorrelationKey::from_row(&row.prefix, &row.original, &row.location);
            rows.entry(key).or_default().push(row_index);
        }
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn correlate(&self, key: &CorrelationKey) -> Correlation {
        match self.rows.get(key).map(Vec::as_slice) {
            None | Some([]) => Correlation::Unmatched,
            Some([row]) => Correlation::Unique(*row),
            Some(rows) => Correlation::Ambiguous(rows.to_vec()),
        }
    }
}

/// A conditional line keyed for correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedCondition {
    pub key: CorrelationKey,
    pub condition: String,
    pub context: SourceContext,
}

/// Result of analyzing one original script.
#[derive(Debug, Default)]
pub struct FileConditions {
    pub entries: Vec<KeyedCondition>,
    pub issues: Vec<Issue>,
    /// Number of quoted lines without a usable speaker/text split.
    pub unrecognized: usize,
}

/// Analyze one original script. Never fails; problems become issues.
pub fn analyze_file(path: &Path) -> FileConditions {
    let content = match read_script(path) {
        Ok(content) => content,
        Err(issue) => {
            return FileConditions {
                issues: vec![issue],
                ..Default::default()
            };
        }
    };

    let file_path = path.to_string_lossy().to_string();
    let analysis = analyze_conditions(&content);
    let entries = analysis
        .lines
        .into_iter()
        .map(|line| KeyedCondition {
            key: CorrelationKey::from_script(&line.prefix, &line.original, path),
            condition: line.condition,
            context: SourceContext::at_line(file_path.as_str(), line.line, &line.source_line),
        })
        .collect();

    FileConditions {
        entries,
        issues: Vec::new(),
        unrecognized: analysis.unrecognized.len(),
    }
}

/// Rewrite of one Condition cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub row: usize,
    pub condition: String,
}

/// Patches to apply plus what could not be matched.
#[derive(Debug, Default)]
pub struct PatchPlan {
    pub patches: Vec<Patch>,
    pub issues: Vec<Issue>,
    pub unique_count: usize,
    pub ambiguous_count: usize,
    pub unmatched_count: usize,
}

/// Turn keyed conditions into patches. Pure; nothing is written.
pub fn plan_patches(index: &RowIndex, entries: &[KeyedCondition]) -> PatchPlan {
    let mut plan = PatchPlan::default();

    for entry in entries {
        match index.correlate(&entry.key) {
            Correlation::Unmatched => {
                plan.unmatched_count += 1;
                plan.issues.push(Issue::UnmatchedKey(UnmatchedKeyIssue {
                    context: entry.context.clone(),
                    key: entry.key.clone(),
                    condition: entry.condition.clone(),
                }));
            }
            Correlation::Unique(row) => {
                plan.unique_count += 1;
                plan.patches.push(Patch {
                    row,
                    condition: entry.condition.clone(),
                });
            }
            Correlation::Ambiguous(rows) => {
                plan.ambiguous_count += 1;
                plan.patches.extend(rows.iter().map(|&row| Patch {
                    row,
                    condition: REPEAT_CONDITION.to_string(),
                }));
                plan.issues.push(Issue::Repeat(RepeatIssue {
                    context: entry.context.clone(),
                    key: entry.key.clone(),
                    rows,
                    first_line: None,
                }));
            }
        }
    }

    plan
}

impl Table {
    /// Apply patches in order, single-threaded. Returns the number applied.
    pub fn apply_patches(&mut self, patches: &[Patch]) -> usize {
        patches
            .iter()
            .filter(|patch| self.set_condition(patch.row, &patch.condition))
            .count()
    }
}
