use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::super::args::ImportCommand;
use super::{CommandResult, CommandSummary, ImportSummary, helper::finish};
use crate::core::{
    RunContext,
    merge::{FileMerge, TranslationLookup, merge_file},
    table::Table,
};

/// Write table translations back into the language's translation scripts.
pub fn import(cmd: ImportCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let table = Table::load(&ctx.table_path())?;
    let lookup = TranslationLookup::from_table(&table);

    let files = ctx.translation_files();
    let merges: Vec<FileMerge> = files
        .par_iter()
        .map(|f| merge_file(f, &ctx.language, &lookup))
        .collect();

    let mut issues = Vec::new();
    let mut files_written = 0;
    let mut substitutions = 0;
    for (file, merge) in files.iter().zip(merges) {
        if merge.written {
            files_written += 1;
            substitutions += merge.substitutions;
            if ctx.verbose {
                eprintln!(
                    "{} updated {} line(s) in {}",
                    "note:".bold(),
                    merge.substitutions,
                    file.display()
                );
            }
        }
        issues.extend(merge.issues);
    }

    Ok(finish(
        CommandSummary::Import(ImportSummary {
            files_written,
            substitutions,
            skipped_rows: lookup.skipped_rows.len(),
        }),
        issues,
        files.len(),
    ))
}
