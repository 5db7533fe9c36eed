use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Export(ExportSummary),
    Patch(PatchSummary),
    Import(ImportSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExportSummary {
    pub table_path: String,
    pub unit_count: usize,
    /// True if an existing table was overwritten.
    pub replaced_existing: bool,
}

#[derive(Debug)]
pub struct PatchSummary {
    pub table_path: String,
    /// Condition cells written.
    pub patched_rows: usize,
    pub unique_count: usize,
    pub ambiguous_count: usize,
    pub unmatched_count: usize,
    /// Quoted lines inside conditional blocks that were not dialogue.
    pub unrecognized_lines: usize,
}

#[derive(Debug)]
pub struct ImportSummary {
    pub files_written: usize,
    pub substitutions: usize,
    /// Table rows left out of the lookup.
    pub skipped_rows: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running tlbridge commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found while processing files, sorted.
    pub issues: Vec<Issue>,
    /// Number of script files that were processed.
    pub files_processed: usize,
}
