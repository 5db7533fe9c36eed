//! Core translation engine.
//!
//! ## Module Structure
//!
//! - `data`: Translation units and script locations
//! - `parsers`: Line and block scanners for the scripting dialect
//! - `extract`: Translation scripts → units (export)
//! - `key`: Correlation keys shared by every flow
//! - `correlate`: Table row index and condition patches (patch)
//! - `merge`: Table → rewritten translation scripts (import)
//! - `table`: The tabular interchange store
//! - `file_scanner`: Script discovery
//! - `context`: Per-run paths, language and configuration

pub mod context;
pub mod correlate;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod key;
pub mod merge;
pub mod parsers;
pub mod table;

pub use context::RunContext;
pub use data::{SourceContext, SourceLocation, TranslationUnit};
