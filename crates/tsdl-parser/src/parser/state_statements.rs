//! Parser state - statement parsing.

use super::state::{ParseResult, ParserState};
use crate::ast::{
    ClassDecl, EnumDecl, FunctionDecl, InterfaceDecl, ModuleDecl, NamespaceDecl, SourceFile,
    Statement, TypeAliasDecl, VarKind, VariableDeclarator, VariableStatement,
};
use crate::scanner::{Stop, Terminator, split_top_level_commas};
use crate::text::{dedent_continuation, leading_ws};

/// Modifiers seen in front of a declaration keyword.
#[derive(Debug, Default, Clone, Copy)]
struct Modifiers {
    is_exported: bool,
    is_default: bool,
    is_abstract: bool,
    is_const: bool,
}

impl<'a> ParserState<'a> {
    /// Parse the whole file.
    pub fn parse_source_file(mut self) -> ParseResult<SourceFile> {
        let statements = self.parse_statements(false)?;
        Ok(SourceFile {
            file_name: self.file_name,
            statements,
        })
    }

    /// Parse statements up to end of input, or up to (not including) the `}`
    /// closing the enclosing block.
    pub(crate) fn parse_statements(&mut self, in_block: bool) -> ParseResult<Vec<Statement>> {
        let block_start = self.scanner.pos();
        let mut statements = Vec::new();
        loop {
            let docs = self.collect_docs()?;
            match self.scanner.peek() {
                None if in_block => {
                    return Err(self.error_at(block_start, "unterminated block"));
                }
                None => break,
                Some(b'}') if in_block => break,
                Some(b'}') => {
                    return Err(self.error_at(self.scanner.pos(), "unexpected '}'"));
                }
                Some(b';') => {
                    self.scanner.eat_byte(b';');
                    continue;
                }
                Some(_) => {}
            }
            statements.push(self.parse_statement(docs)?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self, docs: Option<String>) -> ParseResult<Statement> {
        let start = self.scanner.pos();
        let mut mods = Modifiers::default();

        loop {
            let save = self.scanner.pos();
            match self.scanner.peek_identifier() {
                Some("export") => {
                    self.scanner.eat_identifier();
                    mods.is_exported = true;
                    if matches!(self.lookahead_byte()?, Some(b'{') | Some(b'*') | Some(b'=')) {
                        return self.parse_opaque(start);
                    }
                }
                Some("declare") | Some("async") => {
                    self.scanner.eat_identifier();
                }
                Some("default") => {
                    self.scanner.eat_identifier();
                    mods.is_default = true;
                }
                Some("abstract") => {
                    self.scanner.eat_identifier();
                    mods.is_abstract = true;
                }
                Some("const") => {
                    self.scanner.eat_identifier();
                    if self.lookahead_identifier()? == Some("enum") {
                        mods.is_const = true;
                    } else {
                        self.scanner.set_pos(save);
                        break;
                    }
                }
                _ => break,
            }
            self.skip_trivia()?;
        }

        let mut stmt = match self.scanner.peek_identifier() {
            Some("interface") => self.parse_interface(docs).map(Statement::Interface),
            Some("class") => self.parse_class(docs, mods.is_abstract).map(Statement::Class),
            Some("function") => self.parse_function(docs, mods.is_default),
            Some("namespace") => self.parse_namespace(docs),
            Some("module") => {
                self.scanner.eat_identifier();
                if matches!(self.lookahead_byte()?, Some(b'"') | Some(b'\'')) {
                    self.parse_module(docs, start)
                } else {
                    self.parse_namespace_body(docs)
                }
            }
            Some("global") => {
                self.scanner.eat_identifier();
                self.parse_module(docs, start)
            }
            Some("type") if self.is_type_alias_start()? => {
                self.parse_type_alias(docs).map(Statement::TypeAlias)
            }
            Some("var") | Some("let") | Some("const") => {
                self.parse_variable_statement(docs).map(Statement::Variable)
            }
            Some("enum") => self.parse_enum(docs, mods.is_const).map(Statement::Enum),
            _ => self.parse_opaque(start),
        }?;
        stmt.set_exported(mods.is_exported);
        Ok(stmt)
    }

    fn is_type_alias_start(&mut self) -> ParseResult<bool> {
        let save = self.scanner.pos();
        self.scanner.eat_keyword("type");
        let next = self.lookahead_identifier()?;
        self.scanner.set_pos(save);
        Ok(next.is_some())
    }

    /// Keep a statement verbatim (imports, `export {}`, expressions).
    fn parse_opaque(&mut self, start: usize) -> ParseResult<Statement> {
        self.scanner
            .scan_until(Stop::STATEMENT)
            .map_err(|e| self.scan_error(e))?;
        let text = self.scanner.slice(start, self.scanner.pos()).trim();
        Ok(Statement::Opaque(text.to_string()))
    }

    /// Scan a declaration tail up to its `;` (or block end) and return the
    /// trimmed text without the terminator. Continuation lines lose the
    /// indentation of the line the tail starts on.
    fn scan_declaration_tail(&mut self) -> ParseResult<String> {
        let start = self.scanner.pos();
        let line_start = self.scanner.line_start(start);
        let term = self
            .scanner
            .scan_until(Stop::STATEMENT)
            .map_err(|e| self.scan_error(e))?;
        let end = match term {
            Terminator::Semicolon => self.scanner.pos() - 1,
            _ => self.scanner.pos(),
        };
        let indent = leading_ws(self.scanner.slice(line_start, start));
        Ok(dedent_continuation(self.scanner.slice(start, end).trim(), indent))
    }

    /// Scan the heritage clauses between a declaration name and its `{`.
    fn scan_header(&mut self) -> ParseResult<&'a str> {
        let start = self.scanner.pos();
        let term = self
            .scanner
            .scan_until(Stop::HEADER)
            .map_err(|e| self.scan_error(e))?;
        if term != Terminator::OpenBrace {
            return Err(self.error_at(start, "expected '{' after declaration header"));
        }
        Ok(self.scanner.slice(start, self.scanner.pos()).trim())
    }

    fn parse_type_params(&mut self) -> ParseResult<Option<String>> {
        self.skip_trivia()?;
        if self.scanner.peek() != Some(b'<') {
            return Ok(None);
        }
        let params = self
            .scanner
            .scan_angle_group()
            .map_err(|e| self.scan_error(e))?;
        Ok(Some(params.trim().to_string()))
    }

    fn parse_interface(&mut self, docs: Option<String>) -> ParseResult<InterfaceDecl> {
        self.scanner.eat_keyword("interface");
        let name = self.expect_identifier("interface name")?.to_string();
        let type_params = self.parse_type_params()?;
        self.skip_trivia()?;
        let header = self.scan_header()?;
        let (extends, _) = split_heritage(header);
        self.expect_byte(b'{')?;
        let members = self.parse_members()?;
        self.expect_byte(b'}')?;
        Ok(InterfaceDecl {
            docs,
            is_exported: false,
            name,
            type_params,
            extends,
            members,
        })
    }

    fn parse_class(&mut self, docs: Option<String>, is_abstract: bool) -> ParseResult<ClassDecl> {
        self.scanner.eat_keyword("class");
        self.skip_trivia()?;
        let name = match self.scanner.peek_identifier() {
            Some("extends") | Some("implements") | None => None,
            Some(_) => self.scanner.eat_identifier().map(str::to_string),
        };
        let type_params = self.parse_type_params()?;
        self.skip_trivia()?;
        let header = self.scan_header()?;
        let (extends, implements) = split_heritage(header);
        self.expect_byte(b'{')?;
        let members = self.parse_members()?;
        self.expect_byte(b'}')?;
        Ok(ClassDecl {
            docs,
            is_exported: false,
            name,
            is_abstract,
            type_params,
            extends,
            implements,
            members,
        })
    }

    fn parse_function(&mut self, docs: Option<String>, is_default: bool) -> ParseResult<Statement> {
        let start = self.scanner.pos();
        self.scanner.eat_keyword("function");
        self.skip_trivia()?;
        self.scanner.eat_byte(b'*');
        self.skip_trivia()?;
        let name = self.scanner.eat_identifier().map(str::to_string);
        if name.is_none() && !is_default {
            return Err(self.error_at(start, "expected function name"));
        }
        let signature = self.scan_declaration_tail()?;
        Ok(Statement::Function(FunctionDecl {
            docs,
            is_exported: false,
            name,
            signature,
        }))
    }

    fn parse_namespace(&mut self, docs: Option<String>) -> ParseResult<Statement> {
        self.scanner.eat_keyword("namespace");
        self.parse_namespace_body(docs)
    }

    /// Parse `A.B.C { ... }` after the `namespace` / `module` keyword.
    /// Dotted names become nested namespaces.
    fn parse_namespace_body(&mut self, docs: Option<String>) -> ParseResult<Statement> {
        let mut path = vec![self.expect_identifier("namespace name")?.to_string()];
        loop {
            self.skip_trivia()?;
            if !self.scanner.eat_byte(b'.') {
                break;
            }
            path.push(self.expect_identifier("namespace name")?.to_string());
        }
        self.expect_byte(b'{')?;
        let body = self.parse_statements(true)?;
        self.expect_byte(b'}')?;

        let mut inner = body;
        let mut docs = docs;
        while let Some(name) = path.pop() {
            let decl = NamespaceDecl {
                docs: if path.is_empty() { docs.take() } else { None },
                is_exported: !path.is_empty(),
                name,
                body: inner,
            };
            inner = vec![Statement::Namespace(decl)];
        }
        inner
            .pop()
            .ok_or_else(|| self.error_at(self.scanner.pos(), "empty namespace path"))
    }

    /// `declare module "x" { ... }`, `declare module "x";` or `declare global { ... }`.
    fn parse_module(&mut self, docs: Option<String>, start: usize) -> ParseResult<Statement> {
        self.skip_trivia()?;
        let name = match self.scanner.peek() {
            Some(b'"') | Some(b'\'') => {
                let name_start = self.scanner.pos();
                self.scanner
                    .skip_string()
                    .map_err(|e| self.scan_error(e))?;
                self.scanner
                    .slice(name_start, self.scanner.pos())
                    .to_string()
            }
            _ => "global".to_string(),
        };
        self.skip_trivia()?;
        if self.scanner.peek() == Some(b'{') {
            self.scanner.skip_group().map_err(|e| self.scan_error(e))?;
        } else {
            self.scan_declaration_tail()?;
        }
        let text = self.dedent_region(start, self.scanner.pos());
        Ok(Statement::Module(ModuleDecl { docs, name, text }))
    }

    fn parse_type_alias(&mut self, docs: Option<String>) -> ParseResult<TypeAliasDecl> {
        self.scanner.eat_keyword("type");
        let name = self.expect_identifier("type alias name")?.to_string();
        let rest = self.scan_declaration_tail()?;
        Ok(TypeAliasDecl {
            docs,
            is_exported: false,
            name,
            rest,
        })
    }

    fn parse_variable_statement(&mut self, docs: Option<String>) -> ParseResult<VariableStatement> {
        let kind = match self.scanner.eat_identifier() {
            Some("let") => VarKind::Let,
            Some("const") => VarKind::Const,
            _ => VarKind::Var,
        };
        let tail = self.scan_declaration_tail()?;
        let declarations = split_top_level_commas(&tail)
            .into_iter()
            .filter_map(|decl| {
                let ident_len = decl
                    .char_indices()
                    .find(|(_, ch)| !(ch.is_alphanumeric() || *ch == '_' || *ch == '$'))
                    .map_or(decl.len(), |(i, _)| i);
                if ident_len == 0 {
                    return None;
                }
                Some(VariableDeclarator {
                    name: decl[..ident_len].to_string(),
                    rest: decl[ident_len..].trim().to_string(),
                })
            })
            .collect();
        Ok(VariableStatement {
            docs,
            is_exported: false,
            kind,
            declarations,
        })
    }

    fn parse_enum(&mut self, docs: Option<String>, is_const: bool) -> ParseResult<EnumDecl> {
        self.scanner.eat_keyword("enum");
        let name = self.expect_identifier("enum name")?.to_string();
        self.skip_trivia()?;
        let body_start = self.scanner.pos();
        if self.scanner.peek() != Some(b'{') {
            return Err(self.error_at(body_start, "expected '{'"));
        }
        self.scanner.skip_group().map_err(|e| self.scan_error(e))?;
        let body = self.dedent_region(body_start, self.scanner.pos());
        Ok(EnumDecl {
            docs,
            is_exported: false,
            name,
            is_const,
            body,
        })
    }
}

/// Split heritage text (`extends A<B>, C implements D`) into its
/// `extends` and `implements` lists.
pub(crate) fn split_heritage(header: &str) -> (Vec<String>, Vec<String>) {
    #[derive(Clone, Copy)]
    enum Clause {
        None,
        Extends,
        Implements,
    }

    let bytes = header.as_bytes();
    let mut sections: Vec<(Clause, usize, usize)> = Vec::new();
    let mut clause = Clause::None;
    let mut section_start = 0usize;
    let mut depth = 0i32;
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => depth -= 1,
            _ if depth == 0 && (b.is_ascii_alphabetic()) => {
                let word_start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                let preceded_by_ident = word_start > 0
                    && (bytes[word_start - 1].is_ascii_alphanumeric()
                        || bytes[word_start - 1] == b'_'
                        || bytes[word_start - 1] == b'.');
                let next = match (&header[word_start..i], preceded_by_ident) {
                    ("extends", false) => Some(Clause::Extends),
                    ("implements", false) => Some(Clause::Implements),
                    _ => None,
                };
                if let Some(next) = next {
                    sections.push((clause, section_start, word_start));
                    clause = next;
                    section_start = i;
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    sections.push((clause, section_start, bytes.len()));

    let mut extends = Vec::new();
    let mut implements = Vec::new();
    for (clause, start, end) in sections {
        let target = match clause {
            Clause::Extends => &mut extends,
            Clause::Implements => &mut implements,
            Clause::None => continue,
        };
        target.extend(
            split_top_level_commas(&header[start..end])
                .into_iter()
                .map(str::to_string),
        );
    }
    (extends, implements)
}

#[cfg(test)]
mod tests {
    use super::split_heritage;

    #[test]
    fn test_split_heritage() {
        let (extends, implements) = split_heritage("extends Base<T> implements A, B<C, D>");
        assert_eq!(extends, vec!["Base<T>"]);
        assert_eq!(implements, vec!["A", "B<C, D>"]);
    }

    #[test]
    fn test_heritage_keyword_inside_type_arguments_is_ignored() {
        let (extends, implements) = split_heritage("extends Foo<T extends string>");
        assert_eq!(extends, vec!["Foo<T extends string>"]);
        assert!(implements.is_empty());
    }
}
