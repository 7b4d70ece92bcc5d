//! Declaration printer.
//!
//! Emits conventional declaration-file syntax: top-level interfaces and
//! type aliases get `export`, every other declaration gets
//! `export declare`. Namespace bodies are printed without modifiers and
//! indented four spaces per level.

use crate::ast::{
    ClassDecl, EnumDecl, FunctionDecl, InterfaceDecl, Member, NamespaceDecl, Statement,
    TypeAliasDecl, VariableStatement,
};
use crate::text::indent_lines;

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct Printer {
    out: String,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Print one top-level statement followed by a line break.
    pub fn print_statement(&mut self, stmt: &Statement) {
        self.write_statement(stmt, true);
    }

    pub fn print_statements<'s>(&mut self, statements: impl IntoIterator<Item = &'s Statement>) {
        for stmt in statements {
            self.print_statement(stmt);
        }
    }

    fn write_docs(&mut self, docs: Option<&str>) {
        if let Some(docs) = docs {
            self.out.push_str(docs);
            self.out.push('\n');
        }
    }

    fn write_statement(&mut self, stmt: &Statement, top_level: bool) {
        match stmt {
            Statement::Interface(decl) => self.write_interface(decl, top_level),
            Statement::Class(decl) => self.write_class(decl, top_level),
            Statement::Function(decl) => self.write_function(decl, top_level),
            Statement::Namespace(decl) => self.write_namespace(decl, top_level),
            Statement::TypeAlias(decl) => self.write_type_alias(decl, top_level),
            Statement::Variable(stmt) => self.write_variable(stmt, top_level),
            Statement::Enum(decl) => self.write_enum(decl, top_level),
            Statement::Module(decl) => {
                self.write_docs(decl.docs.as_deref());
                self.out.push_str(&decl.text);
                self.out.push('\n');
            }
            Statement::Opaque(text) => {
                self.out.push_str(text);
                self.out.push('\n');
            }
        }
    }

    fn write_modifiers(&mut self, top_level: bool, declare: bool) {
        if top_level {
            self.out
                .push_str(if declare { "export declare " } else { "export " });
        }
    }

    fn write_members(&mut self, members: &[Member]) {
        self.out.push_str("{\n");
        for member in members {
            indent_lines(&mut self.out, &member.text, INDENT);
        }
        self.out.push_str("}\n");
    }

    fn write_interface(&mut self, decl: &InterfaceDecl, top_level: bool) {
        self.write_docs(decl.docs.as_deref());
        self.write_modifiers(top_level, false);
        self.out.push_str("interface ");
        self.out.push_str(&decl.name);
        write_type_params(&mut self.out, decl.type_params.as_deref());
        write_heritage(&mut self.out, "extends", &decl.extends);
        self.out.push(' ');
        self.write_members(&decl.members);
    }

    fn write_class(&mut self, decl: &ClassDecl, top_level: bool) {
        self.write_docs(decl.docs.as_deref());
        self.write_modifiers(top_level, true);
        if decl.is_abstract {
            self.out.push_str("abstract ");
        }
        self.out.push_str("class");
        if let Some(name) = &decl.name {
            self.out.push(' ');
            self.out.push_str(name);
        }
        write_type_params(&mut self.out, decl.type_params.as_deref());
        write_heritage(&mut self.out, "extends", &decl.extends);
        write_heritage(&mut self.out, "implements", &decl.implements);
        self.out.push(' ');
        self.write_members(&decl.members);
    }

    fn write_function(&mut self, decl: &FunctionDecl, top_level: bool) {
        self.write_docs(decl.docs.as_deref());
        self.write_modifiers(top_level, true);
        self.out.push_str("function");
        match &decl.name {
            Some(name) => {
                self.out.push(' ');
                self.out.push_str(&join_name(name, &decl.signature));
            }
            None => self.out.push_str(&decl.signature),
        }
        self.out.push_str(";\n");
    }

    fn write_namespace(&mut self, decl: &NamespaceDecl, top_level: bool) {
        self.write_docs(decl.docs.as_deref());
        self.write_modifiers(top_level, true);
        self.out.push_str("namespace ");
        self.out.push_str(&decl.name);
        self.out.push_str(" {\n");
        let mut inner = Printer::new();
        for stmt in &decl.body {
            inner.write_statement(stmt, false);
        }
        indent_lines(&mut self.out, &inner.finish(), INDENT);
        self.out.push_str("}\n");
    }

    fn write_type_alias(&mut self, decl: &TypeAliasDecl, top_level: bool) {
        self.write_docs(decl.docs.as_deref());
        self.write_modifiers(top_level, false);
        self.out.push_str("type ");
        self.out.push_str(&join_name(&decl.name, &decl.rest));
        self.out.push_str(";\n");
    }

    fn write_variable(&mut self, stmt: &VariableStatement, top_level: bool) {
        self.write_docs(stmt.docs.as_deref());
        self.write_modifiers(top_level, true);
        self.out.push_str(stmt.kind.keyword());
        self.out.push(' ');
        let declarators: Vec<String> = stmt
            .declarations
            .iter()
            .map(|d| join_name(&d.name, &d.rest))
            .collect();
        self.out.push_str(&declarators.join(", "));
        self.out.push_str(";\n");
    }

    fn write_enum(&mut self, decl: &EnumDecl, top_level: bool) {
        self.write_docs(decl.docs.as_deref());
        self.write_modifiers(top_level, true);
        if decl.is_const {
            self.out.push_str("const ");
        }
        self.out.push_str("enum ");
        self.out.push_str(&decl.name);
        self.out.push(' ');
        self.out.push_str(&decl.body);
        self.out.push('\n');
    }
}

/// Print a single top-level statement.
pub fn print_statement(stmt: &Statement) -> String {
    let mut printer = Printer::new();
    printer.print_statement(stmt);
    printer.finish()
}

/// Join a declared name with the text that followed it in the source.
fn join_name(name: &str, rest: &str) -> String {
    let rest = rest.trim();
    if rest.is_empty() {
        return name.to_string();
    }
    match rest.as_bytes()[0] {
        b'<' | b'(' | b':' | b'?' | b'!' => format!("{name}{rest}"),
        _ => format!("{name} {rest}"),
    }
}

fn write_type_params(out: &mut String, params: Option<&str>) {
    if let Some(params) = params {
        out.push('<');
        out.push_str(params);
        out.push('>');
    }
}

fn write_heritage(out: &mut String, keyword: &str, types: &[String]) {
    if types.is_empty() {
        return;
    }
    out.push(' ');
    out.push_str(keyword);
    out.push(' ');
    out.push_str(&types.join(", "));
}
