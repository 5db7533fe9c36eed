//! Issue types for translation runs.
//!
//! This module defines every per-file condition a run can report. Issues are
//! data, not errors: a run collects them from all files and reports them at
//! the end, and only runtime failures abort a command.

use enum_dispatch::enum_dispatch;

use crate::core::{data::SourceContext, key::CorrelationKey};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    FileAccess,
    ParseError,
    UnmatchedKey,
    LookupMiss,
    Repeat,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::FileAccess => write!(f, "file-access"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::UnmatchedKey => write!(f, "unmatched-key"),
            Rule::LookupMiss => write!(f, "lookup-miss"),
            Rule::Repeat => write!(f, "repeat"),
        }
    }
}

// ============================================================
// Issue Types - File Level
// ============================================================

/// File or directory could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAccessIssue {
    pub file_path: String,
    pub error: String,
}

impl FileAccessIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::FileAccess
    }
}

/// File could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Types - Script Lines (SourceContext)
// ============================================================

/// Conditional line in an original script with no matching table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedKeyIssue {
    pub context: SourceContext,
    pub key: CorrelationKey,
    /// Condition that could not be recorded.
    pub condition: String,
}

impl UnmatchedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnmatchedKey
    }
}

/// Dialogue block whose identifier has no translation in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupMissIssue {
    pub context: SourceContext,
    pub identifier: String,
}

impl LookupMissIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::LookupMiss
    }
}

/// Correlation key shared by several lines.
///
/// Raised by export for duplicates inside one translation script
/// (`first_line` set), and by patch for keys matching several table rows
/// (`rows` set; all of them get the `repeat` condition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatIssue {
    pub context: SourceContext,
    pub key: CorrelationKey,
    /// Table rows flagged for this key.
    pub rows: Vec<usize>,
    /// Line of the first occurrence in the same file.
    pub first_line: Option<usize>,
}

impl RepeatIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Repeat
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while processing scripts.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    FileAccess(FileAccessIssue),
    ParseError(ParseErrorIssue),
    UnmatchedKey(UnmatchedKeyIssue),
    LookupMiss(LookupMissIssue),
    Repeat(RepeatIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::FileAccess(_) => FileAccessIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::UnmatchedKey(_) => UnmatchedKeyIssue::severity(),
            Issue::LookupMiss(_) => LookupMissIssue::severity(),
            Issue::Repeat(_) => RepeatIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::FileAccess(_) => FileAccessIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::UnmatchedKey(_) => UnmatchedKeyIssue::rule(),
            Issue::LookupMiss(_) => LookupMissIssue::rule(),
            Issue::Repeat(_) => RepeatIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Script line (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls made on
/// the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for FileAccessIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("save the script as UTF-8")
    }
}

impl Report for UnmatchedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("run `tlbridge export` to refresh the table")
    }

    fn details(&self) -> Option<String> {
        Some(format!("no table row for condition `{}`", self.condition))
    }
}

impl Report for LookupMissIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("no translation in the table".to_string())
    }
}

impl Report for RepeatIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if !self.rows.is_empty() {
            let rows: Vec<String> = self.rows.iter().map(ToString::to_string).collect();
            return Some(format!("rows {} marked as repeat", rows.join(", ")));
        }
        self.first_line
            .map(|line| format!("first seen at line {}", line))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
