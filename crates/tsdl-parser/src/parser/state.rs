//! Parser state - cursor, error construction and shared helpers.

use crate::scanner::{ScanError, Scanner};
use crate::text::dedent;

/// A fatal parse failure, positioned at a 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{file_name}:{line}:{column}: {message}")]
pub struct ParseError {
    pub file_name: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct ParserState<'a> {
    pub(crate) file_name: String,
    pub(crate) scanner: Scanner<'a>,
}

impl<'a> ParserState<'a> {
    pub fn new(file_name: impl Into<String>, source_text: &'a str) -> Self {
        Self {
            file_name: file_name.into(),
            scanner: Scanner::new(source_text),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub(crate) fn error_at(&self, pos: usize, message: impl Into<String>) -> ParseError {
        let (line, column) = self.scanner.line_col(pos);
        ParseError {
            file_name: self.file_name.clone(),
            line,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn scan_error(&self, err: ScanError) -> ParseError {
        self.error_at(err.pos, err.kind.message())
    }

    pub(crate) fn skip_trivia(&mut self) -> ParseResult<Option<usize>> {
        self.scanner.skip_trivia().map_err(|e| self.scan_error(e))
    }

    /// Skip trivia and return any comments found there as dedented docs.
    pub(crate) fn collect_docs(&mut self) -> ParseResult<Option<String>> {
        let first_comment = self.skip_trivia()?;
        Ok(first_comment.map(|start| {
            let end = self.scanner.pos();
            let region = self.scanner.slice(start, end).trim_end();
            self.dedent_region(start, start + region.len())
        }))
    }

    /// Dedent `[start, end)`. When only whitespace precedes `start` on its
    /// line, that whitespace counts as the first line's indentation.
    pub(crate) fn dedent_region(&self, start: usize, end: usize) -> String {
        let line_start = self.scanner.line_start(start);
        let prefix = self.scanner.slice(line_start, start);
        if prefix.chars().all(char::is_whitespace) {
            dedent(self.scanner.slice(line_start, end), false)
        } else {
            dedent(self.scanner.slice(start, end), true)
        }
    }

    /// Skip trivia and consume `expected`, or fail.
    pub(crate) fn expect_byte(&mut self, expected: u8) -> ParseResult<()> {
        self.skip_trivia()?;
        if self.scanner.eat_byte(expected) {
            Ok(())
        } else {
            Err(self.error_at(
                self.scanner.pos(),
                format!("expected '{}'", expected as char),
            ))
        }
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> ParseResult<&'a str> {
        self.skip_trivia()?;
        let pos = self.scanner.pos();
        self.scanner
            .eat_identifier()
            .ok_or_else(|| self.error_at(pos, format!("expected {what}")))
    }

    /// Identifier after the cursor's trivia, without consuming anything.
    pub(crate) fn lookahead_identifier(&mut self) -> ParseResult<Option<&'a str>> {
        let save = self.scanner.pos();
        self.skip_trivia()?;
        let ident = self.scanner.peek_identifier();
        self.scanner.set_pos(save);
        Ok(ident)
    }

    /// First significant byte after the cursor's trivia, without consuming.
    pub(crate) fn lookahead_byte(&mut self) -> ParseResult<Option<u8>> {
        let save = self.scanner.pos();
        self.skip_trivia()?;
        let b = self.scanner.peek();
        self.scanner.set_pos(save);
        Ok(b)
    }
}
