//! Conditional context analysis for original (untranslated) scripts.
//!
//! Walks a script line by line and attaches to every dialogue line inside an
//! `if`/`elif`/`else` block the condition under which it is shown:
//!
//! ```text
//! if met_before:
//!     e "Welcome back."        -> "met_before"
//! else:
//!     e "Nice to meet you."    -> "not (met_before)"
//! ```
//!
//! Containment is decided by indentation: a header owns the consecutive lines
//! that are strictly more indented, and the first non-blank, non-comment line
//! at or below its indentation closes it. Nested blocks resolve to the
//! innermost header. Conditions are kept verbatim and never evaluated.

use super::say::{STATEMENT_KEYWORDS, indent_width, parse_say, strip_comment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    If,
    Elif,
    Else,
}

/// A parsed `if <expr>:`, `elif <expr>:` or `else:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionHeader<'a> {
    pub branch: Branch,
    /// Verbatim expression; empty for `else`.
    pub expression: &'a str,
}

pub fn parse_condition_header(line: &str) -> Option<ConditionHeader<'_>> {
    let code = strip_comment(line).trim();
    let body = code.strip_suffix(':')?.trim_end();

    if body == "else" {
        return Some(ConditionHeader {
            branch: Branch::Else,
            expression: "",
        });
    }

    for (keyword, branch) in [("if", Branch::If), ("elif", Branch::Elif)] {
        let Some(rest) = body.strip_prefix(keyword) else {
            continue;
        };
        if !rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
            continue;
        }
        let expression = rest.trim();
        if !expression.is_empty() {
            return Some(ConditionHeader { branch, expression });
        }
    }
    None
}

/// Condition stored for an `else` branch.
pub fn negate(expression: &str) -> String {
    format!("not ({})", expression)
}

/// A dialogue line found inside a conditional block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalLine {
    pub prefix: String,
    pub original: String,
    pub condition: String,
    /// 1-based line number.
    pub line: usize,
    pub source_line: String,
}

#[derive(Debug, Clone)]
struct Frame {
    indent: usize,
    condition: String,
}

/// Parser state threaded through [`walk_line`].
///
/// One value per file; nothing is shared between files.
#[derive(Debug, Default)]
pub struct AnalyzerState {
    /// Open conditional blocks, innermost last.
    frames: Vec<Frame>,
    /// Most recent `if` expression per indentation level, for `else` negation.
    sibling_ifs: Vec<(usize, String)>,
    /// Most recent `if` expression anywhere in the file.
    last_if: Option<String>,
    /// Lines inside conditional blocks that carried a quote but no usable say statement.
    pub unrecognized: Vec<usize>,
}

impl AnalyzerState {
    fn else_condition(&self, indent: usize) -> String {
        let sibling = self
            .sibling_ifs
            .iter()
            .rev()
            .find(|(level, _)| *level == indent)
            .map(|(_, expression)| expression.as_str());
        negate(sibling.or(self.last_if.as_deref()).unwrap_or_default())
    }

    /// Close every block the line at `indent` is not part of.
    fn leave_blocks(&mut self, indent: usize) {
        while self
            .frames
            .last()
            .is_some_and(|frame| frame.indent >= indent)
        {
            self.frames.pop();
        }
        self.sibling_ifs.retain(|(level, _)| *level <= indent);
    }

    fn enter_block(&mut self, indent: usize, header: ConditionHeader<'_>) {
        let condition = match header.branch {
            Branch::If => {
                self.sibling_ifs.retain(|(level, _)| *level != indent);
                self.sibling_ifs
                    .push((indent, header.expression.to_string()));
                self.last_if = Some(header.expression.to_string());
                header.expression.to_string()
            }
            Branch::Elif => header.expression.to_string(),
            Branch::Else => self.else_condition(indent),
        };
        self.frames.push(Frame { indent, condition });
    }
}

/// Process one line and return the dialogue it contributes, if any.
pub fn walk_line(
    state: &mut AnalyzerState,
    number: usize,
    line: &str,
) -> Option<ConditionalLine> {
    let code = strip_comment(line).trim();
    if code.is_empty() {
        return None;
    }

    let indent = indent_width(line);
    state.leave_blocks(indent);

    if let Some(header) = parse_condition_header(line) {
        state.enter_block(indent, header);
        return None;
    }

    if state.frames.is_empty() || !is_dialogue_candidate(code) {
        return None;
    }

    match parse_say(code) {
        Some(say) => Some(ConditionalLine {
            prefix: say.speaker.to_string(),
            original: say.text.trim().to_string(),
            condition: state.frames.last()?.condition.clone(),
            line: number,
            source_line: line.to_string(),
        }),
        None => {
            state.unrecognized.push(number);
            None
        }
    }
}

/// Filter out inline code, statements, menu headers and menu choices.
fn is_dialogue_candidate(code: &str) -> bool {
    if code.starts_with('$') || !code.contains('"') {
        return false;
    }
    let first_token = code
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_end_matches(':');
    if STATEMENT_KEYWORDS.contains(&first_token) {
        return false;
    }
    !code.ends_with(':')
}

/// Result of analyzing one script.
#[derive(Debug, Default)]
pub struct ConditionAnalysis {
    pub lines: Vec<ConditionalLine>,
    /// Line numbers of quoted lines that could not be split into speaker and text.
    pub unrecognized: Vec<usize>,
}

/// Analyze a whole script.
pub fn analyze_conditions(text: &str) -> ConditionAnalysis {
    let mut state = AnalyzerState::default();
    let lines = text
        .lines()
        .enumerate()
        .filter_map(|(i, line)| walk_line(&mut state, i + 1, line))
        .collect();

    ConditionAnalysis {
        lines,
        unrecognized: state.unrecognized,
    }
}
