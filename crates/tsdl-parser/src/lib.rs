//! Declaration-level parser for TypeScript lib `.d.ts` files.
//!
//! This crate provides:
//! - `Scanner` - byte cursor with bracket-balanced scans
//! - `ParserState` - statement and member parser producing the `ast` types
//! - `Printer` - declaration-file emitter
//! - `PreProcess` - text rewrites applied between read and parse
//! - `SourceSet` - parsed files addressed by `FileId` / `NodeRef`

pub mod ast;
pub use ast::{
    ClassDecl, EnumDecl, FunctionDecl, InterfaceDecl, Member, ModuleDecl, NamespaceDecl,
    SourceFile, Statement, TypeAliasDecl, VarKind, VariableDeclarator, VariableStatement,
};

pub mod scanner;

pub mod text;

pub mod parser;
pub use parser::{ParseError, ParseResult, ParserState, member_name, parse_source_file};

pub mod printer;
pub use printer::{Printer, print_statement};

pub mod preprocess;
pub use preprocess::{
    ExportDeclarations, PreProcess, RegexRewrite, StripTsLibHeaders, has_exports, run_pipeline,
};

pub mod source_set;
pub use source_set::{FileId, NodeRef, SourceSet};
