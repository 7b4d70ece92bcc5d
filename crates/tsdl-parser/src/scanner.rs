//! Byte cursor over declaration source text.
//!
//! The scanner does not produce a token stream. It offers the handful of
//! primitives the declaration parser needs: trivia skipping, identifier
//! reads, and bracket-balanced scans that step over strings, template
//! literals and comments.

/// Low level scan failure, positioned by byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    UnterminatedComment,
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedBlock,
    UnbalancedBracket,
}

impl ScanErrorKind {
    pub const fn message(self) -> &'static str {
        match self {
            ScanErrorKind::UnterminatedComment => "unterminated comment",
            ScanErrorKind::UnterminatedString => "unterminated string literal",
            ScanErrorKind::UnterminatedTemplate => "unterminated template literal",
            ScanErrorKind::UnterminatedBlock => "unterminated block",
            ScanErrorKind::UnbalancedBracket => "unbalanced closing bracket",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub pos: usize,
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Which terminators end a `scan_until` run. Only terminators at bracket
/// depth zero count; commas additionally require angle depth zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stop {
    pub semicolon: bool,
    pub comma: bool,
    pub open_brace: bool,
    pub close_brace: bool,
    /// End at a line break when the text so far reads as complete and the
    /// next line does not continue it.
    pub line_break: bool,
    /// Also end at a line break followed by a declaration keyword.
    pub declaration_keywords: bool,
}

impl Stop {
    pub const STATEMENT: Stop = Stop {
        semicolon: true,
        comma: false,
        open_brace: false,
        close_brace: true,
        line_break: true,
        declaration_keywords: true,
    };

    pub const MEMBER: Stop = Stop {
        semicolon: true,
        comma: true,
        open_brace: false,
        close_brace: true,
        line_break: true,
        declaration_keywords: false,
    };

    pub const HEADER: Stop = Stop {
        semicolon: false,
        comma: false,
        open_brace: true,
        close_brace: false,
        line_break: false,
        declaration_keywords: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `;` consumed.
    Semicolon,
    /// `,` consumed.
    Comma,
    /// Positioned at `{`, not consumed.
    OpenBrace,
    /// Positioned at `}`, not consumed.
    CloseBrace,
    /// Positioned at the line break.
    Newline,
    Eof,
}

/// Words that start a new top-level declaration.
const DECLARATION_KEYWORDS: &[&str] = &[
    "export",
    "declare",
    "interface",
    "type",
    "var",
    "let",
    "const",
    "function",
    "namespace",
    "class",
    "enum",
    "module",
    "import",
    "abstract",
];

/// Words that continue a type on the next line.
const CONTINUATION_WORDS: &[&str] = &["extends", "is", "as"];

/// Trailing words after which a type is still incomplete.
const OPEN_ENDED_WORDS: &[&str] = &[
    "extends", "keyof", "typeof", "infer", "is", "as", "readonly", "unique", "new", "in",
    "asserts",
];

#[derive(Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b == b'#' || b >= 0x80
}

#[inline]
fn is_ident_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.bytes.len());
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// 1-based line and column of a byte offset.
    pub fn line_col(&self, pos: usize) -> (u32, u32) {
        let pos = pos.min(self.bytes.len());
        let mut line = 1u32;
        let mut line_start = 0usize;
        for (i, &b) in self.bytes[..pos].iter().enumerate() {
            if b == b'\n' {
                line += 1;
                line_start = i + 1;
            }
        }
        let col = self.text[line_start..pos].chars().count() as u32 + 1;
        (line, col)
    }

    /// Offset where the line containing `pos` starts.
    pub fn line_start(&self, pos: usize) -> usize {
        self.bytes[..pos.min(self.bytes.len())]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1)
    }

    /// Skip whitespace and comments. Returns the offset of the first comment
    /// encountered, if any.
    pub fn skip_trivia(&mut self) -> ScanResult<Option<usize>> {
        let mut first_comment = None;
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b'\x0B' | b'\x0C' => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'/') || self.peek_at(1) == Some(b'*') => {
                    first_comment.get_or_insert(self.pos);
                    self.skip_comment()?;
                }
                // BOM / nbsp
                0xEF if self.text[self.pos..].starts_with('\u{FEFF}') => self.pos += 3,
                0xC2 if self.text[self.pos..].starts_with('\u{A0}') => self.pos += 2,
                _ => break,
            }
        }
        Ok(first_comment)
    }

    fn skip_comment(&mut self) -> ScanResult<()> {
        let start = self.pos;
        if self.peek_at(1) == Some(b'/') {
            while let Some(b) = self.peek() {
                if b == b'\n' {
                    break;
                }
                self.pos += 1;
            }
            return Ok(());
        }
        self.pos += 2;
        while self.pos + 1 < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.bytes[self.pos + 1] == b'/' {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(ScanError {
            kind: ScanErrorKind::UnterminatedComment,
            pos: start,
        })
    }

    pub fn peek_identifier(&self) -> Option<&'a str> {
        let start = self.pos;
        let first = *self.bytes.get(start)?;
        if !is_ident_start(first) {
            return None;
        }
        let mut end = start + 1;
        while end < self.bytes.len() && is_ident_part(self.bytes[end]) {
            end += 1;
        }
        Some(&self.text[start..end])
    }

    pub fn eat_identifier(&mut self) -> Option<&'a str> {
        let ident = self.peek_identifier()?;
        self.pos += ident.len();
        Some(ident)
    }

    /// Consume `keyword` when it is the whole identifier at the cursor.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_identifier() == Some(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    pub fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip a `'` or `"` string literal; the cursor is on the opening quote.
    pub fn skip_string(&mut self) -> ScanResult<()> {
        let start = self.pos;
        let quote = self.bytes[self.pos];
        self.pos += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => break,
                _ if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(ScanError {
            kind: ScanErrorKind::UnterminatedString,
            pos: start,
        })
    }

    /// Skip a template literal, including `${ ... }` substitutions.
    pub fn skip_template(&mut self) -> ScanResult<()> {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    return Ok(());
                }
                b'$' if self.peek_at(1) == Some(b'{') => {
                    self.pos += 1;
                    self.skip_group()?;
                }
                _ => self.pos += 1,
            }
        }
        Err(ScanError {
            kind: ScanErrorKind::UnterminatedTemplate,
            pos: start,
        })
    }

    /// Skip a bracketed group; the cursor is on `(`, `[` or `{` and ends just
    /// past the matching closer.
    pub fn skip_group(&mut self) -> ScanResult<()> {
        let start = self.pos;
        let mut stack: Vec<u8> = Vec::new();
        while let Some(b) = self.peek() {
            match b {
                b'(' => stack.push(b')'),
                b'[' => stack.push(b']'),
                b'{' => stack.push(b'}'),
                b')' | b']' | b'}' => {
                    if stack.pop() != Some(b) {
                        return Err(ScanError {
                            kind: ScanErrorKind::UnbalancedBracket,
                            pos: self.pos,
                        });
                    }
                    if stack.is_empty() {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                b'\'' | b'"' => {
                    self.skip_string()?;
                    continue;
                }
                b'`' => {
                    self.skip_template()?;
                    continue;
                }
                b'/' if matches!(self.peek_at(1), Some(b'/') | Some(b'*')) => {
                    self.skip_comment()?;
                    continue;
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(ScanError {
            kind: ScanErrorKind::UnterminatedBlock,
            pos: start,
        })
    }

    /// Skip a `<...>` type parameter or argument list; the cursor is on `<`.
    /// Returns the text between the brackets.
    pub fn scan_angle_group(&mut self) -> ScanResult<&'a str> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'<' => depth += 1,
                b'>' if self.pos > 0 && self.bytes[self.pos - 1] == b'=' => {}
                b'>' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(&self.text[start + 1..self.pos - 1]);
                    }
                }
                b'(' | b'[' | b'{' => {
                    self.skip_group()?;
                    continue;
                }
                b'\'' | b'"' => {
                    self.skip_string()?;
                    continue;
                }
                b'`' => {
                    self.skip_template()?;
                    continue;
                }
                b'/' if matches!(self.peek_at(1), Some(b'/') | Some(b'*')) => {
                    self.skip_comment()?;
                    continue;
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(ScanError {
            kind: ScanErrorKind::UnterminatedBlock,
            pos: start,
        })
    }

    /// Advance until one of the requested terminators appears at depth zero.
    pub fn scan_until(&mut self, stop: Stop) -> ScanResult<Terminator> {
        let mut angle = 0usize;
        let mut last: Option<usize> = None;
        while let Some(b) = self.peek() {
            match b {
                b'\n' if stop.line_break && angle == 0 => {
                    if self.line_ends_here(last, stop)? {
                        return Ok(Terminator::Newline);
                    }
                }
                b'(' | b'[' => {
                    self.skip_group()?;
                    last = Some(self.pos - 1);
                    continue;
                }
                b'{' => {
                    if stop.open_brace && angle == 0 {
                        return Ok(Terminator::OpenBrace);
                    }
                    self.skip_group()?;
                    last = Some(self.pos - 1);
                    continue;
                }
                b'}' => {
                    if stop.close_brace {
                        return Ok(Terminator::CloseBrace);
                    }
                    return Err(ScanError {
                        kind: ScanErrorKind::UnbalancedBracket,
                        pos: self.pos,
                    });
                }
                b')' | b']' => {
                    return Err(ScanError {
                        kind: ScanErrorKind::UnbalancedBracket,
                        pos: self.pos,
                    });
                }
                b'<' => angle += 1,
                b'>' if self.pos > 0 && self.bytes[self.pos - 1] == b'=' => {}
                b'>' => angle = angle.saturating_sub(1),
                b';' if stop.semicolon => {
                    self.pos += 1;
                    return Ok(Terminator::Semicolon);
                }
                b',' if stop.comma && angle == 0 => {
                    self.pos += 1;
                    return Ok(Terminator::Comma);
                }
                b'\'' | b'"' => {
                    self.skip_string()?;
                    last = Some(self.pos - 1);
                    continue;
                }
                b'`' => {
                    self.skip_template()?;
                    last = Some(self.pos - 1);
                    continue;
                }
                b'/' if matches!(self.peek_at(1), Some(b'/') | Some(b'*')) => {
                    self.skip_comment()?;
                    continue;
                }
                _ => {}
            }
            if !b.is_ascii_whitespace() {
                last = Some(self.pos);
            }
            self.pos += 1;
        }
        Ok(Terminator::Eof)
    }

    /// Decide whether the line break at the cursor ends the current run.
    /// `last` is the offset of the last significant byte seen so far.
    fn line_ends_here(&self, last: Option<usize>, stop: Stop) -> ScanResult<bool> {
        let mut ahead = self.clone();
        ahead.skip_trivia()?;
        let Some(next) = ahead.peek() else {
            return Ok(false);
        };
        let word = ahead.peek_identifier();
        if stop.declaration_keywords && word.is_some_and(|w| DECLARATION_KEYWORDS.contains(&w)) {
            return Ok(true);
        }
        if !self.is_complete_at(last) {
            return Ok(false);
        }
        let continues = matches!(
            next,
            b'|' | b'&' | b'?' | b':' | b'[' | b'.' | b'=' | b';' | b',' | b'}' | b')' | b']' | b'>'
        ) || word.is_some_and(|w| CONTINUATION_WORDS.contains(&w));
        Ok(!continues)
    }

    /// Whether the text ending at `last` could end a type.
    fn is_complete_at(&self, last: Option<usize>) -> bool {
        let Some(i) = last else {
            return false;
        };
        match self.bytes[i] {
            b')' | b']' | b'}' | b'"' | b'\'' | b'`' => true,
            b'>' => i == 0 || self.bytes[i - 1] != b'=',
            b if is_ident_part(b) => {
                let start = self.bytes[..=i]
                    .iter()
                    .rposition(|&c| !is_ident_part(c))
                    .map_or(0, |p| p + 1);
                !OPEN_ENDED_WORDS.contains(&&self.text[start..=i])
            }
            _ => false,
        }
    }
}

/// Split `text` on commas that sit outside any bracket or angle pair.
pub fn split_top_level_commas(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => depth -= 1,
            b'\'' | b'"' | b'`' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    let tail = text[start.min(text.len())..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}
