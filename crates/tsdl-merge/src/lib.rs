//! Symbol table and declaration merge engine.
//!
//! `SymbolTable` groups the top-level declarations of a `SourceSet` by kind
//! and name; `merge` folds every group into one `MergedUnit` that renders
//! to a standalone declaration file.

pub mod error;
pub use error::MergeError;

pub mod symbol_table;
pub use symbol_table::{DeclEntry, SymbolTable, classify};

pub mod merge;
pub use merge::{MergeConfig, MergeReport, MergedUnit, build_symbol_table, merge, merge_table};

pub mod output;
pub use output::bundle;
