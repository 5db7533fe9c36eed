/// Pure position information in script files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position with context information in script files.
///
/// Contains everything the reporter needs to display the issue location
/// together with the offending script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The script line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    /// Build a context pointing at the first non-blank character of `source_line`.
    pub fn at_line(file_path: impl Into<String>, line: usize, source_line: &str) -> Self {
        let indent = source_line.chars().take_while(|c| c.is_whitespace()).count();
        Self::new(
            SourceLocation::new(file_path, line, indent + 1),
            source_line.trim_end(),
        )
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
