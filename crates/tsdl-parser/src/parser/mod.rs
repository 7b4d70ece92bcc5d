//! Declaration parser.
//!
//! `ParserState` is split across files by concern:
//! - `state.rs` - cursor, errors and shared helpers
//! - `state_statements.rs` - top-level and namespace statements
//! - `state_members.rs` - interface and class members

mod state;
mod state_members;
mod state_statements;

pub use state::{ParseError, ParseResult, ParserState};
pub use state_members::member_name;

use crate::ast::SourceFile;

/// Parse one declaration file.
pub fn parse_source_file(file_name: &str, source_text: &str) -> ParseResult<SourceFile> {
    ParserState::new(file_name, source_text).parse_source_file()
}
