//! Common types and utilities shared by the tsdl crates.
//!
//! This crate provides the vocabulary every pass agrees on:
//! - The closed set of mergeable declaration kinds (`DeclKind`)
//! - Qualified symbol names and Symbol-key normalization (`QualifiedName`)
//! - Anchor slugs and per-symbol output file stems

// Declaration kinds tracked by the symbol table
pub mod kind;
pub use kind::{DeclKind, UnsupportedKind};

// Qualified names (dotted containment paths)
pub mod qualified_name;
pub use qualified_name::{QualifiedName, normalize_symbol_part};

// Anchor slugs and file naming
pub mod naming;
pub use naming::{anchor_slug, output_file_stem};
