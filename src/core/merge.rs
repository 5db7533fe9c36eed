//! Import merger: writes table translations back into translation scripts.
//!
//! Scripts are rewritten line by line. Indentation, speaker tokens, trailing
//! content and line endings are kept verbatim; only the quoted text changes.
//! A file whose bytes would not change is never written.

use std::{collections::HashMap, fs, path::Path};

use crate::{
    core::{
        data::SourceContext,
        extract::read_script_text,
        parsers::{
            blocks::{HeaderKind, parse_translate_header},
            say::{comment_body, keyword_literal, parse_say},
        },
        table::Table,
    },
    issues::{FileAccessIssue, Issue, LookupMissIssue},
};

const BOM: &str = "\u{feff}";

/// Escape sequence separating the source text from the translation in
/// multi-line dialogue (`"Hello\nBonjour"`).
const NEWLINE_ESCAPE: &str = "\\n";

/// Translations taken from the table.
#[derive(Debug, Default)]
pub struct TranslationLookup {
    by_identifier: HashMap<String, String>,
    by_original: HashMap<String, String>,
    /// Row indices left out for missing original, translation or location.
    pub skipped_rows: Vec<usize>,
}

impl TranslationLookup {
    /// Build both lookups. The first row wins when a key repeats.
    pub fn from_table(table: &Table) -> Self {
        let mut lookup = Self::default();
        for (row_index, row) in table.indexed_rows() {
            if row.original.is_empty() || row.translation.is_empty() || row.location.is_empty() {
                lookup.skipped_rows.push(row_index);
                continue;
            }
            if row.identifier.is_empty() {
                lookup
                    .by_original
                    .entry(row.original.clone())
                    .or_insert_with(|| row.translation.clone());
            } else {
                lookup
                    .by_identifier
                    .entry(row.identifier.clone())
                    .or_insert_with(|| row.translation.clone());
            }
        }
        lookup
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&str> {
        self.by_identifier.get(identifier).map(String::as_str)
    }

    pub fn by_original(&self, original: &str) -> Option<&str> {
        self.by_original.get(original).map(String::as_str)
    }
}

/// A dialogue block whose identifier has no translation in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedIdentifier {
    pub line: usize,
    pub identifier: String,
    pub source_line: String,
}

/// Result of merging one script text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub content: String,
    /// Lines whose bytes changed.
    pub substitutions: usize,
    pub lookup_misses: Vec<MissedIdentifier>,
}

/// Split a line into its body and line ending.
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Text currently shown for a translated dialogue line.
fn current_translation(text: &str) -> &str {
    text.split_once(NEWLINE_ESCAPE)
        .map_or(text, |(_, after)| after)
}

/// Rewrite `text` with translations for `language`.
///
/// A `translate <language> <id>:` header opens a dialogue block; the first
/// say statement inside it is replaced by the identifier's translation and
/// closes the block. An `old "..."` line followed by `new "..."` gets the
/// `new` literal replaced by the translation of the `old` text.
pub fn merge_translations(text: &str, language: &str, lookup: &TranslationLookup) -> MergeOutcome {
    let mut outcome = MergeOutcome {
        content: String::with_capacity(text.len()),
        ..Default::default()
    };
    let mut open_block: Option<&str> = None;
    let mut previous_old: Option<&str> = None;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let number = index + 1;
        let (body, ending) = split_line_ending(line);
        let old_text = previous_old.take();
        let mut replacement: Option<String> = None;

        if let Some(header) = parse_translate_header(body) {
            open_block = match header.kind {
                HeaderKind::Dialogue(identifier) if header.language == language => Some(identifier),
                _ => None,
            };
        } else if let Some(identifier) = open_block
            && comment_body(body).is_none()
            && let Some(say) = parse_say(body)
        {
            open_block = None;
            match lookup.by_identifier(identifier) {
                Some(translation) => {
                    let unchanged = translation == say.text.trim()
                        || translation == current_translation(say.text).trim();
                    if !unchanged {
                        replacement = Some(say.with_text(translation));
                    }
                }
                None if !identifier.is_empty() => {
                    outcome.lookup_misses.push(MissedIdentifier {
                        line: number,
                        identifier: identifier.to_string(),
                        source_line: body.to_string(),
                    });
                }
                None => {}
            }
        } else if let Some(old) = old_text
            && let Some(new) = keyword_literal(body, "new")
            && let Some(translation) = lookup.by_original(old.trim())
            && translation != new.text.trim()
        {
            replacement = Some(format!(
                "{}\"{}\"{}",
                &body[..new.start],
                translation,
                &body[new.end..]
            ));
        } else if let Some(old) = keyword_literal(body, "old") {
            previous_old = Some(old.text);
        }

        match replacement {
            Some(rewritten) if rewritten != body => {
                outcome.substitutions += 1;
                outcome.content.push_str(&rewritten);
                outcome.content.push_str(ending);
            }
            _ => outcome.content.push_str(line),
        }
    }

    outcome
}

/// Result of merging one file.
#[derive(Debug, Default)]
pub struct FileMerge {
    pub substitutions: usize,
    pub written: bool,
    pub issues: Vec<Issue>,
}

/// Merge one translation script in place. Never fails; problems become issues.
pub fn merge_file(path: &Path, language: &str, lookup: &TranslationLookup) -> FileMerge {
    let script = match read_script_text(path) {
        Ok(script) => script,
        Err(issue) => {
            return FileMerge {
                issues: vec![issue],
                ..Default::default()
            };
        }
    };

    let file_path = path.to_string_lossy().to_string();
    let outcome = merge_translations(&script.content, language, lookup);
    let mut issues: Vec<Issue> = outcome
        .lookup_misses
        .into_iter()
        .map(|miss| {
            Issue::LookupMiss(LookupMissIssue {
                context: SourceContext::at_line(file_path.as_str(), miss.line, &miss.source_line),
                identifier: miss.identifier,
            })
        })
        .collect();

    if outcome.substitutions == 0 {
        return FileMerge {
            issues,
            ..Default::default()
        };
    }

    let content = if script.bom {
        format!("{}{}", BOM, outcome.content)
    } else {
        outcome.content
    };
    let written = match fs::write(path, content) {
        Ok(()) => true,
        Err(e) => {
            issues.push(Issue::FileAccess(FileAccessIssue {
                file_path,
                error: e.to_string(),
            }));
            false
        }
    };

    FileMerge {
        substitutions: if written { outcome.substitutions } else { 0 },
        written,
        issues,
    }
}
