use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::super::args::PatchCommand;
use super::{CommandResult, CommandSummary, PatchSummary, helper::finish};
use crate::core::{
    RunContext,
    correlate::{FileConditions, RowIndex, analyze_file, plan_patches},
    table::Table,
};

/// Annotate table rows with the condition their original line is shown under.
///
/// The table must exist: without it there is nothing to correlate against.
pub fn patch(cmd: PatchCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let table_path = ctx.table_path();
    let mut table = Table::load(&table_path)?;
    let index = RowIndex::build(&table);
    if ctx.verbose && index.is_empty() {
        eprintln!(
            "{} {} has no dialogue rows with a location",
            "note:".bold(),
            table_path.display()
        );
    }

    let files = ctx.original_files();
    let analyses: Vec<FileConditions> = files.par_iter().map(|f| analyze_file(f)).collect();

    let mut entries = Vec::new();
    let mut issues = Vec::new();
    let mut unrecognized_lines = 0;
    for (file, analysis) in files.iter().zip(analyses) {
        if ctx.verbose && !analysis.entries.is_empty() {
            eprintln!(
                "{} {} conditional line(s) in {}",
                "note:".bold(),
                analysis.entries.len(),
                file.display()
            );
        }
        entries.extend(analysis.entries);
        issues.extend(analysis.issues);
        unrecognized_lines += analysis.unrecognized;
    }

    // Single-threaded merge into the table.
    let plan = plan_patches(&index, &entries);
    let patched_rows = table.apply_patches(&plan.patches);
    table.save(&table_path)?;
    issues.extend(plan.issues);

    Ok(finish(
        CommandSummary::Patch(PatchSummary {
            table_path: table_path.display().to_string(),
            patched_rows,
            unique_count: plan.unique_count,
            ambiguous_count: plan.ambiguous_count,
            unmatched_count: plan.unmatched_count,
            unrecognized_lines,
        }),
        issues,
        files.len(),
    ))
}
