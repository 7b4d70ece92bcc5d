//! Declaration index: every tracked top-level declaration grouped by kind
//! and name, in the order the declarations were added.

use std::fmt::Write;

use indexmap::IndexMap;
use tracing::trace;
use tsdl_common::{DeclKind, UnsupportedKind};
use tsdl_parser::{NodeRef, SourceSet, Statement};

/// One tracked declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclEntry {
    pub node: NodeRef,
    /// Whether the declaring file is in the override set.
    pub is_override: bool,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    /// One map per `DeclKind`, indexed by the kind's position in `DeclKind::ALL`.
    groups: [IndexMap<String, Vec<DeclEntry>>; 6],
}

/// Position of `kind` in `DeclKind::ALL`.
const fn slot(kind: DeclKind) -> usize {
    match kind {
        DeclKind::Class => 0,
        DeclKind::Function => 1,
        DeclKind::Interface => 2,
        DeclKind::Namespace => 3,
        DeclKind::TypeAlias => 4,
        DeclKind::Variable => 5,
    }
}

/// Kind and symbol name of a declaration handle, or `None` when the node is
/// untracked (enums, ambient modules, anonymous default exports).
pub fn classify(sources: &SourceSet, node: NodeRef) -> Option<(DeclKind, &str)> {
    let stmt = sources.statement(node)?;
    let kind = stmt.decl_kind()?;
    let name = match (stmt, node.declarator) {
        (Statement::Variable(var), Some(i)) => {
            var.declarations.get(i as usize).map(|d| d.name.as_str())
        }
        (_, Some(_)) => None,
        (_, None) => stmt.name(),
    }?;
    Some((kind, name))
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track one declaration. Returns `false` when the node has no name or
    /// is not one of the supported kinds.
    pub fn add_declaration(&mut self, sources: &SourceSet, node: NodeRef, is_override: bool) -> bool {
        let Some((kind, name)) = classify(sources, node) else {
            trace!(?node, "declaration not tracked");
            return false;
        };
        self.groups[slot(kind)]
            .entry(name.to_string())
            .or_default()
            .push(DeclEntry { node, is_override });
        true
    }

    /// Groups of one kind in insertion order.
    pub fn entries_of(&self, kind: DeclKind) -> impl Iterator<Item = (&str, &[DeclEntry])> {
        self.groups[slot(kind)]
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Like `entries_of`, with the kind given by name (`"interface"`,
    /// `"type-alias"`, ...).
    pub fn entries_by_name(
        &self,
        kind: &str,
    ) -> Result<impl Iterator<Item = (&str, &[DeclEntry])>, UnsupportedKind> {
        let kind: DeclKind = kind.parse()?;
        Ok(self.entries_of(kind))
    }

    pub fn get(&self, kind: DeclKind, name: &str) -> Option<&[DeclEntry]> {
        self.groups[slot(kind)].get(name).map(Vec::as_slice)
    }

    /// Number of distinct (kind, name) groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-kind listing of names and how many declarations each has.
    pub fn overview(&self) -> String {
        let mut out = String::new();
        for kind in DeclKind::ALL {
            let group = &self.groups[slot(kind)];
            if group.is_empty() {
                continue;
            }
            let mut names: Vec<(&String, usize)> =
                group.iter().map(|(name, entries)| (name, entries.len())).collect();
            names.sort();
            let _ = writeln!(out, "{}:", kind.plural_label());
            for (name, count) in names {
                let _ = writeln!(out, "\t{name}: {count}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_kind_order() {
        for (i, kind) in DeclKind::ALL.into_iter().enumerate() {
            assert_eq!(slot(kind), i);
        }
    }
}
