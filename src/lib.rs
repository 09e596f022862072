//! Lokey - translation key usage auditor for JS/TS projects
//!
//! Lokey flattens a hierarchical translation document into its full set of
//! dot-joined keys, scans a source tree for direct, dynamic, and transitive
//! references, and classifies every defined key as used, possibly dynamic,
//! or unused. Dead keys can then be pruned without mistaking dynamically
//! constructed lookups for dead code.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (flatten, scan, deep scan, classify)
//! - `report`: Report data model and serialization

pub mod cli;
pub mod config;
pub mod core;
pub mod report;
