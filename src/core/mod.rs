//! Core analysis engine.
//!
//! The pipeline runs in a fixed order: `keys` flattens the key document
//! into the universe, `file_scanner` discovers candidate source files,
//! `direct` and `dynamic` stream every file once, `deep` matches quoted
//! literals against the keys still unexplained, and `classify` resolves
//! all evidence into the final partition. `pipeline` wires the phases
//! together.

pub mod classify;
pub mod deep;
pub mod direct;
pub mod dynamic;
pub mod file_scanner;
pub mod keys;
pub mod pipeline;

pub use classify::{Classification, DynamicEntry, Evidence, UnusedEntry, UsedEntry, classify};
pub use dynamic::DynamicPattern;
pub use keys::{KeyEntry, KeyUniverse, load_key_document};
pub use pipeline::{AnalyzeOptions, run_analysis};
