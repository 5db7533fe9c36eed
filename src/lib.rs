//! tlbridge - translation table bridge for Ren'Py-style visual novel scripts
//!
//! tlbridge moves dialogue between a game's translation scripts and a flat
//! table that translators can edit. It exports translation units into the
//! table, patches each row with the `if`/`elif`/`else` condition guarding the
//! original line, and imports edited translations back into the scripts.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, reporting, exit codes)
//! - `config`: Configuration file loading and validation
//! - `core`: Script parsing, table storage and the three flows
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
