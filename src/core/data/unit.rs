/// Prefix used for string-table entries (`old`/`new` pairs).
pub const STRINGS_PREFIX: &str = "strings";

/// A single translatable text unit extracted from a translation script.
///
/// - `prefix`: speaker tag, [`STRINGS_PREFIX`] for string-table entries,
///   or empty for narration.
/// - `location`: `file[:line]`, reduced to the script's base name.
/// - `identifier`: the dialogue block name; always empty for string-table entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    pub prefix: String,
    pub original: String,
    pub translation: String,
    pub location: String,
    pub identifier: String,
}

impl TranslationUnit {
    pub fn is_string_entry(&self) -> bool {
        self.prefix == STRINGS_PREFIX
    }
}
