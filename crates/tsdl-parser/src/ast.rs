//! Declaration-level AST for `.d.ts` files.
//!
//! Only the structure the merge engine needs is modelled: containers
//! (interfaces, classes, namespaces) keep their members as named units of
//! verbatim text, everything else keeps its name plus the text following
//! the name. Leading comments travel with the node they precede.

use tsdl_common::DeclKind;

/// One member of an interface or class body.
///
/// `text` is the member's source text, including its leading comments and a
/// terminating `;`, dedented so that it starts at column zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Symbol name of the member; `None` when no name could be extracted.
    pub name: Option<String>,
    pub text: String,
}

impl Member {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceDecl {
    pub docs: Option<String>,
    pub is_exported: bool,
    pub name: String,
    /// Text between `<` and `>`, without the brackets.
    pub type_params: Option<String>,
    pub extends: Vec<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDecl {
    pub docs: Option<String>,
    pub is_exported: bool,
    pub name: Option<String>,
    pub is_abstract: bool,
    pub type_params: Option<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionDecl {
    pub docs: Option<String>,
    pub is_exported: bool,
    /// `None` for `export default function (...)`.
    pub name: Option<String>,
    /// Everything after the name: type parameters, parameters, return type.
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeAliasDecl {
    pub docs: Option<String>,
    pub is_exported: bool,
    pub name: String,
    /// Everything after the name up to (not including) the `;`.
    pub rest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarKind {
    #[default]
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableDeclarator {
    pub name: String,
    /// Type annotation and/or initializer following the name.
    pub rest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableStatement {
    pub docs: Option<String>,
    pub is_exported: bool,
    pub kind: VarKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceDecl {
    pub docs: Option<String>,
    pub is_exported: bool,
    pub name: String,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumDecl {
    pub docs: Option<String>,
    pub is_exported: bool,
    pub name: String,
    pub is_const: bool,
    /// The `{ ... }` body, verbatim.
    pub body: String,
}

/// `declare module "x" { ... }` or `declare global { ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleDecl {
    pub docs: Option<String>,
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Interface(InterfaceDecl),
    Class(ClassDecl),
    Function(FunctionDecl),
    Namespace(NamespaceDecl),
    TypeAlias(TypeAliasDecl),
    Variable(VariableStatement),
    Enum(EnumDecl),
    Module(ModuleDecl),
    /// Imports, `export {}`, `export =` and anything else kept verbatim.
    Opaque(String),
}

impl Statement {
    /// Declared name; variable statements report their first declarator.
    pub fn name(&self) -> Option<&str> {
        match self {
            Statement::Interface(decl) => Some(&decl.name),
            Statement::Class(decl) => decl.name.as_deref(),
            Statement::Function(decl) => decl.name.as_deref(),
            Statement::Namespace(decl) => Some(&decl.name),
            Statement::TypeAlias(decl) => Some(&decl.name),
            Statement::Variable(stmt) => stmt.declarations.first().map(|d| d.name.as_str()),
            Statement::Enum(decl) => Some(&decl.name),
            Statement::Module(decl) => Some(&decl.name),
            Statement::Opaque(_) => None,
        }
    }

    /// Whether the declaration carries `export`. Modules and opaque
    /// statements never do.
    pub fn is_exported(&self) -> bool {
        match self {
            Statement::Interface(decl) => decl.is_exported,
            Statement::Class(decl) => decl.is_exported,
            Statement::Function(decl) => decl.is_exported,
            Statement::Namespace(decl) => decl.is_exported,
            Statement::TypeAlias(decl) => decl.is_exported,
            Statement::Variable(stmt) => stmt.is_exported,
            Statement::Enum(decl) => decl.is_exported,
            Statement::Module(_) | Statement::Opaque(_) => false,
        }
    }

    pub(crate) fn set_exported(&mut self, exported: bool) {
        match self {
            Statement::Interface(decl) => decl.is_exported = exported,
            Statement::Class(decl) => decl.is_exported = exported,
            Statement::Function(decl) => decl.is_exported = exported,
            Statement::Namespace(decl) => decl.is_exported = exported,
            Statement::TypeAlias(decl) => decl.is_exported = exported,
            Statement::Variable(stmt) => stmt.is_exported = exported,
            Statement::Enum(decl) => decl.is_exported = exported,
            Statement::Module(_) | Statement::Opaque(_) => {}
        }
    }

    /// Classify into one of the mergeable kinds.
    ///
    /// Enums, ambient modules, `declare global` and opaque statements are
    /// not tracked.
    pub fn decl_kind(&self) -> Option<DeclKind> {
        match self {
            Statement::Interface(_) => Some(DeclKind::Interface),
            Statement::Class(_) => Some(DeclKind::Class),
            Statement::Function(_) => Some(DeclKind::Function),
            Statement::Namespace(_) => Some(DeclKind::Namespace),
            Statement::TypeAlias(_) => Some(DeclKind::TypeAlias),
            Statement::Variable(_) => Some(DeclKind::Variable),
            Statement::Enum(_) | Statement::Module(_) | Statement::Opaque(_) => None,
        }
    }
}

/// A parsed declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub file_name: String,
    pub statements: Vec<Statement>,
}
