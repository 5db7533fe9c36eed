//! Translation unit extraction.
//!
//! Turns the raw blocks of a translation script into [`TranslationUnit`]s.
//! Extraction is fail-soft per file: a file that cannot be read or decoded
//! produces an issue and no units, and never stops the other files.

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    core::{
        data::{STRINGS_PREFIX, SourceContext, TranslationUnit},
        key::CorrelationKey,
        parsers::blocks::{DialogueBlock, RawBlock, StringEntry, StringsBlock, scan_blocks},
    },
    issues::{FileAccessIssue, Issue, ParseErrorIssue, RepeatIssue},
};

/// A comment that ends in a location: `game/script.rpy:10`.
/// The file name runs from the last `/` to the final `:<line>` and may
/// contain spaces.
static LOCATION_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:.*/)?([^/]*\.\w+):(\d+)$").unwrap());

/// A location mentioned somewhere inside a freeform comment.
static EMBEDDED_LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:[^\s"'/]*/)*([^\s/"':]+\.\w+):(\d+)"#).unwrap()
});

/// Location of an explicit location comment, reduced to `file:line`.
fn explicit_location(comment: &str) -> Option<String> {
    LOCATION_COMMENT_REGEX
        .captures(comment.trim())
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
}

/// First location embedded in a freeform comment, reduced to `file:line`.
fn embedded_location(comment: &str) -> Option<String> {
    EMBEDDED_LOCATION_REGEX
        .captures(comment)
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
}

/// Resolve a unit's location.
///
/// Precedence: the entry's own location comment, then the block's location
/// comment, then a location embedded in any of those comments, then empty.
fn resolve_location(entry_comments: &[&str], block_comment: Option<&str>) -> String {
    entry_comments
        .iter()
        .rev()
        .find_map(|c| explicit_location(c))
        .or_else(|| block_comment.and_then(explicit_location))
        .or_else(|| {
            entry_comments
                .iter()
                .rev()
                .copied()
                .chain(block_comment)
                .find_map(embedded_location)
        })
        .unwrap_or_default()
}

fn string_unit(block: &StringsBlock<'_>, entry: &StringEntry<'_>) -> TranslationUnit {
    TranslationUnit {
        prefix: STRINGS_PREFIX.to_string(),
        original: entry.old.trim().to_string(),
        translation: entry.new.trim().to_string(),
        location: resolve_location(&entry.comments, block.location_comment),
        identifier: String::new(),
    }
}

fn dialogue_unit(block: &DialogueBlock<'_>) -> TranslationUnit {
    TranslationUnit {
        prefix: block.speaker.to_string(),
        original: block.original.trim().to_string(),
        translation: block.translation.unwrap_or_default().trim().to_string(),
        location: resolve_location(&block.comments, block.location_comment),
        identifier: block.identifier.to_string(),
    }
}

/// A unit together with the translation-file line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedUnit {
    pub unit: TranslationUnit,
    /// Line number in the translation script.
    pub line: usize,
}

/// Extract all units from the text of one translation script, in source order.
pub fn extract_units(text: &str) -> Vec<ExtractedUnit> {
    let mut units = Vec::new();
    for block in scan_blocks(text) {
        match block {
            RawBlock::Strings(block) => {
                units.extend(block.entries.iter().map(|entry| ExtractedUnit {
                    unit: string_unit(&block, entry),
                    line: entry.line,
                }));
            }
            RawBlock::Dialogue(block) => units.push(ExtractedUnit {
                unit: dialogue_unit(&block),
                line: block.original_line,
            }),
        }
    }
    units
}

/// Result of extracting one translation script.
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub units: Vec<TranslationUnit>,
    pub issues: Vec<Issue>,
}

/// Decoded contents of a script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptText {
    /// Text without the byte order mark.
    pub content: String,
    /// Whether the file started with a UTF-8 byte order mark.
    pub bom: bool,
}

/// Read a script as UTF-8, dropping a leading byte order mark.
pub fn read_script(path: &Path) -> Result<String, Issue> {
    read_script_text(path).map(|text| text.content)
}

/// Like [`read_script`], but remembers whether a byte order mark was present.
pub fn read_script_text(path: &Path) -> Result<ScriptText, Issue> {
    let file_path = path.to_string_lossy().to_string();
    let bytes = fs::read(path).map_err(|e| {
        Issue::FileAccess(FileAccessIssue {
            file_path: file_path.clone(),
            error: e.to_string(),
        })
    })?;
    let content = String::from_utf8(bytes).map_err(|e| {
        Issue::ParseError(ParseErrorIssue {
            file_path: file_path.clone(),
            error: format!("invalid UTF-8: {}", e.utf8_error()),
        })
    })?;
    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => ScriptText {
            content: stripped.to_string(),
            bom: true,
        },
        None => ScriptText {
            content,
            bom: false,
        },
    })
}

/// Extract one translation script. Never fails; problems become issues.
pub fn extract_file(path: &Path) -> FileExtraction {
    let content = match read_script(path) {
        Ok(content) => content,
        Err(issue) => {
            return FileExtraction {
                units: Vec::new(),
                issues: vec![issue],
            };
        }
    };

    let file_path = path.to_string_lossy().to_string();
    let extracted = extract_units(&content);
    let lines: Vec<&str> = content.lines().collect();
    let issues = find_repeats(&extracted, &file_path, &lines);

    FileExtraction {
        units: extracted.into_iter().map(|e| e.unit).collect(),
        issues,
    }
}

/// Report dialogue units that share a correlation key within one file.
fn find_repeats(extracted: &[ExtractedUnit], file_path: &str, lines: &[&str]) -> Vec<Issue> {
    let mut first_seen: HashMap<CorrelationKey, usize> = HashMap::new();
    let mut issues = Vec::new();

    for item in extracted.iter().filter(|e| !e.unit.is_string_entry()) {
        let key = CorrelationKey::from_unit(&item.unit);
        match first_seen.get(&key) {
            Some(&first_line) => {
                let source_line = lines.get(item.line - 1).copied().unwrap_or_default();
                issues.push(Issue::Repeat(RepeatIssue {
                    context: SourceContext::at_line(file_path, item.line, source_line),
                    key,
                    rows: Vec::new(),
                    first_line: Some(first_line),
                }));
            }
            None => {
                first_seen.insert(key, item.line);
            }
        }
    }

    issues
}
