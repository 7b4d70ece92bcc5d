//! The set of parsed declaration files of one group, addressed by stable
//! index handles.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::ast::{SourceFile, Statement, VariableDeclarator, VariableStatement};
use crate::parser::{ParseResult, parse_source_file};

/// Index of a file in its `SourceSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// Handle to a top-level declaration: the statement index within its file
/// and, for variable statements, the declarator index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub file: FileId,
    pub statement: u32,
    pub declarator: Option<u32>,
}

impl NodeRef {
    pub const fn statement(file: FileId, statement: u32) -> Self {
        Self {
            file,
            statement,
            declarator: None,
        }
    }

    pub const fn declarator(file: FileId, statement: u32, declarator: u32) -> Self {
        Self {
            file,
            statement,
            declarator: Some(declarator),
        }
    }
}

#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
    by_name: FxHashMap<String, FileId>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: SourceFile) -> FileId {
        let id = FileId(self.files.len() as u32);
        if self.by_name.insert(file.file_name.clone(), id).is_some() {
            warn!(file = %file.file_name, "source file added twice; the later copy shadows the earlier");
        }
        self.files.push(file);
        id
    }

    /// Parse `source_text` and add the result.
    pub fn add_source(&mut self, file_name: &str, source_text: &str) -> ParseResult<FileId> {
        let file = parse_source_file(file_name, source_text)?;
        Ok(self.add(file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    pub fn file_id(&self, file_name: &str) -> Option<FileId> {
        self.by_name.get(file_name).copied()
    }

    pub fn file_name(&self, id: FileId) -> Option<&str> {
        self.file(id).map(|f| f.file_name.as_str())
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId(i as u32), f))
    }

    pub fn statement(&self, node: NodeRef) -> Option<&Statement> {
        self.file(node.file)?
            .statements
            .get(node.statement as usize)
    }

    /// The variable statement wrapping a declarator handle, with the
    /// declarator itself. `None` when the handle does not lead to one.
    pub fn variable(&self, node: NodeRef) -> Option<(&VariableStatement, &VariableDeclarator)> {
        let Statement::Variable(stmt) = self.statement(node)? else {
            return None;
        };
        let decl = stmt.declarations.get(node.declarator? as usize)?;
        Some((stmt, decl))
    }

    /// Every exported top-level declaration of `file` in source order.
    /// Variable statements yield one handle per declarator.
    pub fn exported_declarations(&self, file: FileId) -> Vec<NodeRef> {
        let Some(source) = self.file(file) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (i, stmt) in source.statements.iter().enumerate() {
            if !stmt.is_exported() {
                continue;
            }
            match stmt {
                Statement::Variable(var) => {
                    for j in 0..var.declarations.len() {
                        out.push(NodeRef::declarator(file, i as u32, j as u32));
                    }
                }
                _ => out.push(NodeRef::statement(file, i as u32)),
            }
        }
        out
    }
}
