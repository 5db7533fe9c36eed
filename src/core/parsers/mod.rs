//! Line and block scanners for the scripting dialect.
//!
//! - `say`: shared line tokenizer (quoted literals, comments, say statements)
//! - `blocks`: translation block scanner (dialogue and string-table blocks)
//! - `conditions`: `if`/`elif`/`else` context analyzer for original scripts

pub mod blocks;
pub mod conditions;
pub mod say;
