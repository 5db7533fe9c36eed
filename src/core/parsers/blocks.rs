//! Translation block scanner.
//!
//! Recognizes the two block shapes found in translation scripts:
//!
//! ```text
//! # game/script.rpy:10
//! translate chinese start_1a2b3c4d:
//!
//!     # e "Hello"
//!     e "Bonjour"
//!
//! translate chinese strings:
//!
//!     # game/screens.rpy:20
//!     old "Start"
//!     new "Commencer"
//! ```
//!
//! The scanner walks lines instead of matching one large pattern: a block
//! starts at a `translate <language> <name>:` header and owns every following
//! line that is more indented than the header. Blocks are yielded lazily, in
//! source order, and never overlap.

use super::say::{comment_body, indent_width, keyword_literal, parse_say};

/// Block name that introduces a string table.
pub const STRINGS_BLOCK: &str = "strings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Line<'a> {
    /// 1-based line number.
    number: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn comment(&self) -> Option<&'a str> {
        comment_body(self.text)
    }
}

/// Parsed `translate <language> <name>:` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateHeader<'a> {
    pub language: &'a str,
    pub kind: HeaderKind<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind<'a> {
    /// `translate <language> strings:`
    Strings,
    /// `translate <language> <identifier>:`; the identifier may be empty.
    Dialogue(&'a str),
    /// `translate <language> style ...:` and other multi-word forms.
    Other,
}

/// Parse a translate header line.
pub fn parse_translate_header(line: &str) -> Option<TranslateHeader<'_>> {
    let rest = line.trim().strip_prefix("translate")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start().strip_suffix(':')?;

    let language_end = rest
        .find(|c: char| !is_word_char(c))
        .unwrap_or(rest.len());
    let language = &rest[..language_end];
    if language.is_empty() {
        return None;
    }

    let name = rest[language_end..].trim();
    let kind = if name == STRINGS_BLOCK {
        HeaderKind::Strings
    } else if name.chars().all(is_word_char) {
        HeaderKind::Dialogue(name)
    } else {
        HeaderKind::Other
    };

    Some(TranslateHeader { language, kind })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// One `old`/`new` pair of a string table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry<'a> {
    /// Line number of the `old` line.
    pub line: usize,
    /// Comment bodies directly preceding the `old` line.
    pub comments: Vec<&'a str>,
    pub old: &'a str,
    pub new: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsBlock<'a> {
    pub language: &'a str,
    /// Line number of the header.
    pub line: usize,
    /// Comment directly above the header.
    pub location_comment: Option<&'a str>,
    pub entries: Vec<StringEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueBlock<'a> {
    pub language: &'a str,
    pub identifier: &'a str,
    /// Line number of the header.
    pub line: usize,
    /// Comment directly above the header.
    pub location_comment: Option<&'a str>,
    /// Comments inside the block that precede the original line.
    pub comments: Vec<&'a str>,
    /// Speaker of the commented original; empty for narration.
    pub speaker: &'a str,
    pub original: &'a str,
    /// Line number of the commented original.
    pub original_line: usize,
    pub translation: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBlock<'a> {
    Strings(StringsBlock<'a>),
    Dialogue(DialogueBlock<'a>),
}

/// Lazy iterator over the translation blocks of a script.
pub struct BlockScanner<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

/// Scan `text` for translation blocks.
pub fn scan_blocks(text: &str) -> BlockScanner<'_> {
    let lines = text
        .lines()
        .enumerate()
        .map(|(i, text)| Line { number: i + 1, text })
        .collect();
    BlockScanner { lines, pos: 0 }
}

impl<'a> BlockScanner<'a> {
    /// Index one past the last line owned by a header at `header_indent`.
    fn body_end(&self, start: usize, header_indent: usize) -> usize {
        let mut end = start;
        while let Some(line) = self.lines.get(end) {
            if !line.is_blank() && indent_width(line.text) <= header_indent {
                break;
            }
            end += 1;
        }
        end
    }

    /// Comment directly above the header at `index` (blank lines allowed).
    fn location_comment(&self, index: usize, header_indent: usize) -> Option<&'a str> {
        self.lines[..index]
            .iter()
            .rev()
            .find(|line| !line.is_blank())
            .filter(|line| indent_width(line.text) <= header_indent)
            .and_then(|line| comment_body(line.text))
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.lines.len() {
            let index = self.pos;
            let header_line = self.lines[index];
            self.pos += 1;

            let Some(header) = parse_translate_header(header_line.text) else {
                continue;
            };

            let header_indent = indent_width(header_line.text);
            let end = self.body_end(index + 1, header_indent);
            let location_comment = self.location_comment(index, header_indent);
            let body = &self.lines[index + 1..end];
            self.pos = end;

            match header.kind {
                HeaderKind::Strings => {
                    let entries = scan_string_entries(body);
                    if !entries.is_empty() {
                        return Some(RawBlock::Strings(StringsBlock {
                            language: header.language,
                            line: header_line.number,
                            location_comment,
                            entries,
                        }));
                    }
                }
                HeaderKind::Dialogue(identifier) => {
                    if let Some(block) = scan_dialogue(body, header.language, identifier) {
                        return Some(RawBlock::Dialogue(DialogueBlock {
                            line: header_line.number,
                            location_comment,
                            ..block
                        }));
                    }
                }
                HeaderKind::Other => {}
            }
        }
        None
    }
}

fn scan_string_entries<'a>(body: &[Line<'a>]) -> Vec<StringEntry<'a>> {
    let mut entries = Vec::new();
    let mut comments: Vec<&'a str> = Vec::new();
    let mut i = 0;

    while i < body.len() {
        let line = body[i];
        if line.is_blank() {
            i += 1;
            continue;
        }
        if let Some(comment) = line.comment() {
            comments.push(comment);
            i += 1;
            continue;
        }

        if let Some(old) = keyword_literal(line.text, "old") {
            let next = (i + 1..body.len()).find(|&j| !body[j].is_blank());
            if let Some(j) = next
                && let Some(new) = keyword_literal(body[j].text, "new")
            {
                entries.push(StringEntry {
                    line: line.number,
                    comments: std::mem::take(&mut comments),
                    old: old.text,
                    new: new.text,
                });
                i = j + 1;
                continue;
            }
        }

        comments.clear();
        i += 1;
    }

    entries
}

fn scan_dialogue<'a>(
    body: &[Line<'a>],
    language: &'a str,
    identifier: &'a str,
) -> Option<DialogueBlock<'a>> {
    let mut comments = Vec::new();
    let mut original = None;

    for (i, line) in body.iter().enumerate() {
        let Some(comment) = line.comment() else {
            continue;
        };
        match parse_say(comment) {
            Some(say) => {
                original = Some((i, line.number, say));
                break;
            }
            None => comments.push(comment),
        }
    }

    let (index, original_line, say) = original?;

    // The translation is the first say line after the original; another
    // comment ends the search.
    let mut translation = None;
    for line in &body[index + 1..] {
        if line.is_blank() {
            continue;
        }
        if line.comment().is_some() {
            break;
        }
        if let Some(translated) = parse_say(line.text) {
            translation = Some(translated.text);
            break;
        }
    }

    Some(DialogueBlock {
        language,
        identifier,
        line: 0,
        location_comment: None,
        comments,
        speaker: say.speaker,
        original: say.text,
        original_line,
        translation,
    })
}
