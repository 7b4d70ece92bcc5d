//! Parser state - interface and class member parsing.

use super::state::{ParseResult, ParserState};
use crate::ast::Member;
use crate::scanner::{Scanner, Stop, Terminator};

/// Modifiers that may precede a member name. Any of them is itself the name
/// when followed by `(`, `:`, `?`, `;` and so on.
const MEMBER_MODIFIERS: &[&str] = &[
    "readonly",
    "static",
    "abstract",
    "public",
    "private",
    "protected",
    "declare",
    "override",
    "accessor",
    "async",
    "get",
    "set",
];

impl<'a> ParserState<'a> {
    /// Parse members up to (not including) the closing `}`.
    pub(crate) fn parse_members(&mut self) -> ParseResult<Vec<Member>> {
        let body_start = self.scanner.pos();
        let mut members = Vec::new();
        loop {
            let first_comment = self.skip_trivia()?;
            match self.scanner.peek() {
                None => return Err(self.error_at(body_start, "unterminated block")),
                Some(b'}') => break,
                Some(b';') | Some(b',') => {
                    self.scanner.set_pos(self.scanner.pos() + 1);
                    continue;
                }
                Some(_) => {}
            }

            let member_start = self.scanner.pos();
            let name = member_name(&self.scanner.text()[member_start..]);
            let term = self
                .scanner
                .scan_until(Stop::MEMBER)
                .map_err(|e| self.scan_error(e))?;
            let end = match term {
                Terminator::Semicolon | Terminator::Comma => self.scanner.pos() - 1,
                Terminator::Eof => return Err(self.error_at(body_start, "unterminated block")),
                Terminator::Newline => {
                    return Err(self.error_at(
                        self.scanner.pos(),
                        "expected ';' or ',' after member",
                    ));
                }
                _ => self.scanner.pos(),
            };
            let body = self.scanner.slice(member_start, end).trim_end();
            let region_start = first_comment.unwrap_or(member_start);
            let mut text = self.dedent_region(region_start, member_start + body.len());
            text.push(';');
            members.push(Member { name, text });
        }
        Ok(members)
    }
}

/// Extract the symbol name of a member from its source text.
///
/// Call, construct and index signatures are named `__call`, `__new` and
/// `__index`; computed keys keep their brackets (`[Symbol.iterator]`).
pub fn member_name(source: &str) -> Option<String> {
    let mut scanner = Scanner::new(source);
    loop {
        scanner.skip_trivia().ok()?;
        let Some(ident) = scanner.peek_identifier() else {
            break;
        };
        if !MEMBER_MODIFIERS.contains(&ident) {
            break;
        }
        let save = scanner.pos();
        scanner.eat_identifier();
        scanner.skip_trivia().ok()?;
        let continues_name = match scanner.peek() {
            Some(b) => {
                b.is_ascii_alphanumeric()
                    || matches!(b, b'_' | b'$' | b'#' | b'[' | b'"' | b'\'' | b'*')
                    || b >= 0x80
            }
            None => false,
        };
        if !continues_name {
            scanner.set_pos(save);
            break;
        }
        scanner.eat_byte(b'*');
    }

    match scanner.peek()? {
        b'(' | b'<' => Some("__call".to_string()),
        b'[' => {
            let start = scanner.pos();
            scanner.skip_group().ok()?;
            let inner = &source[start + 1..scanner.pos() - 1];
            if has_top_level_colon(inner) {
                Some("__index".to_string())
            } else {
                Some(format!("[{}]", inner.trim()))
            }
        }
        b'"' | b'\'' => {
            let start = scanner.pos();
            scanner.skip_string().ok()?;
            Some(source[start + 1..scanner.pos() - 1].to_string())
        }
        b if b.is_ascii_digit() => {
            let rest = &source[scanner.pos()..];
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'))
                .unwrap_or(rest.len());
            Some(rest[..len].to_string())
        }
        _ => {
            let ident = scanner.eat_identifier()?;
            if ident == "new" {
                scanner.skip_trivia().ok()?;
                if matches!(scanner.peek(), Some(b'(') | Some(b'<')) {
                    return Some("__new".to_string());
                }
            }
            Some(ident.to_string())
        }
    }
}

fn has_top_level_colon(text: &str) -> bool {
    let mut depth = 0i32;
    for b in text.bytes() {
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth -= 1,
            b':' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}
