//! Line tokenizer shared by the block scanner, the condition analyzer and
//! the import merger.
//!
//! All three must agree on what a speaker and a line of text are, otherwise
//! keys built from translation files would never meet keys built from the
//! original scripts.

/// Statements that take a quoted argument but never carry dialogue.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "jump", "scene", "show", "hide", "with", "play", "stop", "pause", "call", "return", "voice",
    "queue", "menu",
];

/// A double-quoted literal found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedLiteral<'a> {
    /// Byte offset of the opening quote.
    pub start: usize,
    /// Byte offset just past the closing quote.
    pub end: usize,
    /// Raw contents between the quotes, escapes untouched.
    pub text: &'a str,
}

/// Scan the literal whose opening quote sits at byte `start`.
///
/// Backslash escapes are skipped, so `"say \"hi\""` is a single literal.
pub fn quoted_literal_at(line: &str, start: usize) -> Option<QuotedLiteral<'_>> {
    let bytes = line.as_bytes();
    if bytes.get(start) != Some(&b'"') {
        return None;
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                return Some(QuotedLiteral {
                    start,
                    end: i + 1,
                    text: &line[start + 1..i],
                });
            }
            _ => i += 1,
        }
    }
    None
}

/// Return the line with any trailing `#` comment removed.
///
/// `#` inside single- or double-quoted strings does not start a comment.
pub fn strip_comment(line: &str) -> &str {
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (i, b) in line.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, b) {
            (Some(_), b'\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'#') => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Body of a comment line (`# text` -> `text`), or `None` for other lines.
pub fn comment_body(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('#').map(str::trim)
}

/// Width of the leading whitespace, counting each space or tab as one column.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Parse `keyword "text"` (e.g. `old "Start"`) and return the literal.
pub fn keyword_literal<'a>(line: &'a str, keyword: &str) -> Option<QuotedLiteral<'a>> {
    let trimmed_start = line.len() - line.trim_start().len();
    let rest = line[trimmed_start..].strip_prefix(keyword)?;
    let after_keyword = rest.trim_start();
    if after_keyword.len() == rest.len() && !rest.starts_with('"') {
        return None;
    }
    let quote = line.len() - after_keyword.len();
    quoted_literal_at(line, quote)
}

/// A say statement split into its parts.
///
/// Concatenating `indent + speaker + separator + "\"" + text + "\"" + trailing`
/// reproduces the original line exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SayLine<'a> {
    pub indent: &'a str,
    /// Speaker tag (possibly with attributes, e.g. `e happy`); empty for narration.
    pub speaker: &'a str,
    /// Whitespace between the speaker and the opening quote.
    pub separator: &'a str,
    /// Raw text between the quotes.
    pub text: &'a str,
    /// Everything after the closing quote (line ending excluded).
    pub trailing: &'a str,
}

impl SayLine<'_> {
    /// Rebuild the line with `text` in place of the current text.
    pub fn with_text(&self, text: &str) -> String {
        format!(
            "{}{}{}\"{}\"{}",
            self.indent, self.speaker, self.separator, text, self.trailing
        )
    }
}

/// Split `[speaker] "text" [trailing]` into its parts.
///
/// The speaker must be one or more identifier tokens; statement keywords
/// (`play`, `voice`, ...) and anything with punctuation (`define e = ...`)
/// are rejected.
pub fn parse_say(line: &str) -> Option<SayLine<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let quote = line.find('"')?;
    let head = &line[..quote];

    let indent_len = head.len() - head.trim_start().len();
    let indent = &head[..indent_len];
    let speaker = head[indent_len..].trim_end();
    let separator = &head[indent_len + speaker.len()..];

    if !speaker.is_empty() && !is_speaker(speaker) {
        return None;
    }

    let literal = quoted_literal_at(line, quote)?;
    Some(SayLine {
        indent,
        speaker,
        separator,
        text: literal.text,
        trailing: &line[literal.end..],
    })
}

fn is_speaker(head: &str) -> bool {
    let mut tokens = head.split_whitespace();
    let Some(first) = tokens.next() else {
        return false;
    };
    if STATEMENT_KEYWORDS.contains(&first) {
        return false;
    }
    head.split_whitespace().all(|token| {
        token
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_quoted_literal_with_escapes() {
        let line = r#"e "say \"hi\" now" with dissolve"#;
        let literal = quoted_literal_at(line, 2).unwrap();
        assert_eq!(literal.text, r#"say \"hi\" now"#);
        assert_eq!(&line[literal.end..], " with dissolve");
    }

    #[test]
    fn test_quoted_literal_unterminated() {
        assert!(quoted_literal_at(r#""open"#, 0).is_none());
        assert!(quoted_literal_at("no quote", 0).is_none());
    }

    #[test]
    fn test_strip_comment_outside_strings() {
        assert_eq!(strip_comment(r#"e "Item #1" # note"#), r#"e "Item #1" "#);
        assert_eq!(strip_comment("jump end # done"), "jump end ");
        assert_eq!(strip_comment("# only comment"), "");
        assert_eq!(strip_comment(r#"$ x = '#'"#), r#"$ x = '#'"#);
    }

    #[test]
    fn test_comment_body() {
        assert_eq!(comment_body("    # game/script.rpy:10"), Some("game/script.rpy:10"));
        assert_eq!(comment_body("e \"x\""), None);
    }

    #[test]
    fn test_keyword_literal() {
        assert_eq!(keyword_literal(r#"    old "Start""#, "old").unwrap().text, "Start");
        assert_eq!(keyword_literal(r#"new"Go""#, "new").unwrap().text, "Go");
        assert!(keyword_literal(r#"older "x""#, "old").is_none());
    }

    #[test]
    fn test_parse_say_with_speaker() {
        let say = parse_say("    e \"Hello\\nWorld\"\n").unwrap();
        assert_eq!(say.indent, "    ");
        assert_eq!(say.speaker, "e");
        assert_eq!(say.separator, " ");
        assert_eq!(say.text, "Hello\\nWorld");
        assert_eq!(say.trailing, "");
    }

    #[test]
    fn test_parse_say_narration_and_attributes() {
        let narration = parse_say(r#"  "It was dark." with fade"#).unwrap();
        assert_eq!(narration.speaker, "");
        assert_eq!(narration.text, "It was dark.");
        assert_eq!(narration.trailing, " with fade");

        let attributed = parse_say(r#"e happy "Yay!""#).unwrap();
        assert_eq!(attributed.speaker, "e happy");
    }

    #[test]
    fn test_parse_say_rejects_statements() {
        assert!(parse_say(r#"play music "theme.ogg""#).is_none());
        assert!(parse_say(r#"voice "line01.ogg""#).is_none());
        assert!(parse_say(r#"define e = Character("Eileen")"#).is_none());
        assert!(parse_say("jump start").is_none());
    }

    #[test]
    fn test_say_line_roundtrip() {
        let line = r#"    e  "Hello" nointeract"#;
        let say = parse_say(line).unwrap();
        assert_eq!(say.with_text(say.text), line);
        assert_eq!(say.with_text("Bonjour"), r#"    e  "Bonjour" nointeract"#);
    }
}
