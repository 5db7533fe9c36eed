//! Core data types shared by the export, patch and import pipelines.
//!
//! ## Module Structure
//!
//! - `source`: Script location types (SourceContext, SourceLocation)
//! - `unit`: TranslationUnit and the string-table prefix marker

pub mod source;
pub mod unit;

pub use source::{SourceContext, SourceLocation};
pub use unit::{STRINGS_PREFIX, TranslationUnit};
