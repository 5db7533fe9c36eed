use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::super::args::ExportCommand;
use super::{CommandResult, CommandSummary, ExportSummary, helper::finish};
use crate::core::{
    RunContext,
    extract::{FileExtraction, extract_file},
    table::Table,
};

/// Extract every translation script of the language and overwrite the table.
pub fn export(cmd: ExportCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let files = ctx.translation_files();

    // Per-file work in parallel; results keep file order.
    let extractions: Vec<FileExtraction> = files.par_iter().map(|f| extract_file(f)).collect();

    let mut units = Vec::new();
    let mut issues = Vec::new();
    for (file, extraction) in files.iter().zip(extractions) {
        if ctx.verbose {
            eprintln!(
                "{} {} unit(s) from {}",
                "note:".bold(),
                extraction.units.len(),
                file.display()
            );
        }
        units.extend(extraction.units);
        issues.extend(extraction.issues);
    }

    let table_path = ctx.table_path();
    let replaced_existing = table_path.exists();
    let unit_count = units.len();
    Table::from_units(units).save(&table_path)?;

    Ok(finish(
        CommandSummary::Export(ExportSummary {
            table_path: table_path.display().to_string(),
            unit_count,
            replaced_existing,
        }),
        issues,
        files.len(),
    ))
}
