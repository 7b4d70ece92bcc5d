//! Declaration merge engine.
//!
//! Per (kind, name) group:
//! - interfaces and classes merge members into the first-seen declaration;
//!   a later copy replaces same-named members only when its file is in the
//!   override set
//! - namespaces merge their bodies into the first-seen block, and a later
//!   block always wins on conflicts
//! - functions and type aliases keep every declaration
//! - variables keep the last declaration
//!
//! Merged containers have their members sorted by name.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument, warn};
use tsdl_common::DeclKind;
use tsdl_parser::{
    ClassDecl, InterfaceDecl, Member, NamespaceDecl, SourceSet, Statement, VariableStatement,
};

use crate::error::MergeError;
use crate::symbol_table::{DeclEntry, SymbolTable};

/// Which files take part, in which order, and which of them override.
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    /// File names in processing order. Declaration order inside a group
    /// follows this list.
    pub file_order: Vec<String>,
    /// Files whose members replace earlier same-named members.
    pub override_files: FxHashSet<String>,
}

impl MergeConfig {
    pub fn new(file_order: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            file_order: file_order.into_iter().map(Into::into).collect(),
            override_files: FxHashSet::default(),
        }
    }

    pub fn with_overrides(mut self, files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.override_files.extend(files.into_iter().map(Into::into));
        self
    }
}

/// The consolidated declaration(s) of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedUnit {
    pub kind: DeclKind,
    pub name: String,
    /// One statement for merged kinds; every declaration for functions and
    /// type aliases.
    pub statements: Vec<Statement>,
}

/// Merge result plus the structural violations that caused symbols to be
/// skipped.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub units: Vec<MergedUnit>,
    pub skipped: Vec<MergeError>,
}

impl MergeReport {
    pub fn unit(&self, kind: DeclKind, name: &str) -> Option<&MergedUnit> {
        self.units.iter().find(|u| u.kind == kind && u.name == name)
    }
}

/// Build the symbol table for the files named in `config`, in order.
pub fn build_symbol_table(
    sources: &SourceSet,
    config: &MergeConfig,
) -> Result<SymbolTable, MergeError> {
    for file in &config.override_files {
        if sources.file_id(file).is_none() {
            return Err(MergeError::UnknownFile { file: file.clone() });
        }
    }

    let mut table = SymbolTable::new();
    for file_name in &config.file_order {
        let file = sources
            .file_id(file_name)
            .ok_or_else(|| MergeError::UnknownFile {
                file: file_name.clone(),
            })?;
        let is_override = config.override_files.contains(file_name);
        info!(file = %file_name, is_override, "processing");
        for node in sources.exported_declarations(file) {
            table.add_declaration(sources, node, is_override);
        }
    }
    Ok(table)
}

/// Merge every declaration group of the configured files.
#[instrument(skip_all, fields(files = config.file_order.len()))]
pub fn merge(sources: &SourceSet, config: &MergeConfig) -> Result<MergeReport, MergeError> {
    let table = build_symbol_table(sources, config)?;
    Ok(merge_table(sources, &table))
}

/// Merge the groups of an already built symbol table.
pub fn merge_table(sources: &SourceSet, table: &SymbolTable) -> MergeReport {
    let mut report = MergeReport::default();
    for kind in DeclKind::ALL {
        for (name, entries) in table.entries_of(kind) {
            let merged = match kind {
                DeclKind::Interface => merge_interfaces(sources, name, entries),
                DeclKind::Class => merge_classes(sources, name, entries),
                DeclKind::Namespace => merge_namespaces(sources, name, entries),
                DeclKind::Function | DeclKind::TypeAlias => collect_all(sources, entries),
                DeclKind::Variable => match last_variable(sources, name, entries) {
                    Ok(stmt) => vec![stmt],
                    Err(err) => {
                        warn!(%err, "skipping symbol");
                        report.skipped.push(err);
                        continue;
                    }
                },
            };
            report.units.push(MergedUnit {
                kind,
                name: name.to_string(),
                statements: merged,
            });
        }
    }
    report
}

fn statements<'s>(
    sources: &'s SourceSet,
    entries: &'s [DeclEntry],
) -> impl Iterator<Item = (&'s Statement, bool)> {
    entries.iter().filter_map(move |entry| {
        sources
            .statement(entry.node)
            .map(|stmt| (stmt, entry.is_override))
    })
}

fn collect_all(sources: &SourceSet, entries: &[DeclEntry]) -> Vec<Statement> {
    statements(sources, entries)
        .map(|(stmt, _)| stmt.clone())
        .collect()
}

fn merge_interfaces(sources: &SourceSet, name: &str, entries: &[DeclEntry]) -> Vec<Statement> {
    let mut decls = statements(sources, entries).filter_map(|(stmt, is_override)| match stmt {
        Statement::Interface(decl) => Some((decl, is_override)),
        _ => None,
    });
    let Some((base, _)) = decls.next() else {
        return Vec::new();
    };
    let mut merged = base.clone();
    if entries.len() > 1 {
        info!(interface = name, copies = entries.len(), "updating interface");
        for (decl, is_override) in decls {
            merge_interface_into(&mut merged, decl, is_override);
        }
        sort_members(&mut merged.members);
    }
    vec![Statement::Interface(merged)]
}

fn merge_classes(sources: &SourceSet, name: &str, entries: &[DeclEntry]) -> Vec<Statement> {
    let mut decls = statements(sources, entries).filter_map(|(stmt, is_override)| match stmt {
        Statement::Class(decl) => Some((decl, is_override)),
        _ => None,
    });
    let Some((base, _)) = decls.next() else {
        return Vec::new();
    };
    let mut merged = base.clone();
    if entries.len() > 1 {
        info!(class = name, copies = entries.len(), "updating class");
        for (decl, is_override) in decls {
            merge_class_into(&mut merged, decl, is_override);
        }
        sort_members(&mut merged.members);
    }
    vec![Statement::Class(merged)]
}

fn merge_namespaces(sources: &SourceSet, name: &str, entries: &[DeclEntry]) -> Vec<Statement> {
    let mut decls = statements(sources, entries).filter_map(|(stmt, _)| match stmt {
        Statement::Namespace(decl) => Some(decl),
        _ => None,
    });
    let Some(base) = decls.next() else {
        return Vec::new();
    };
    let mut merged = base.clone();
    if entries.len() > 1 {
        info!(namespace = name, copies = entries.len(), "updating namespace");
        for decl in decls {
            merge_namespace_into(&mut merged, decl);
        }
    }
    vec![Statement::Namespace(merged)]
}

fn last_variable(
    sources: &SourceSet,
    name: &str,
    entries: &[DeclEntry],
) -> Result<Statement, MergeError> {
    let missing = |entry: Option<&DeclEntry>| MergeError::MissingVariableStatement {
        name: name.to_string(),
        file: entry
            .and_then(|e| sources.file_name(e.node.file))
            .unwrap_or_default()
            .to_string(),
    };
    let entry = entries.last().ok_or_else(|| missing(None))?;
    if entries.len() > 1 {
        warn!(
            variable = name,
            declarations = entries.len(),
            "variable declared more than once; keeping the last declaration"
        );
    }
    let (stmt, decl) = sources
        .variable(entry.node)
        .ok_or_else(|| missing(Some(entry)))?;
    Ok(Statement::Variable(VariableStatement {
        docs: stmt.docs.clone(),
        is_exported: stmt.is_exported,
        kind: stmt.kind,
        declarations: vec![decl.clone()],
    }))
}

/// Members keyed by name. A value holds every same-named member of one
/// declaration, so overload groups are added and replaced as a whole.
struct MemberMap {
    groups: IndexMap<String, Vec<Member>>,
}

fn member_key(member: &Member) -> &str {
    member.name.as_deref().unwrap_or(&member.text)
}

fn group_members(members: &[Member]) -> IndexMap<String, Vec<Member>> {
    let mut groups: IndexMap<String, Vec<Member>> = IndexMap::new();
    for member in members {
        groups
            .entry(member_key(member).to_string())
            .or_default()
            .push(member.clone());
    }
    groups
}

impl MemberMap {
    fn new(members: &[Member]) -> Self {
        Self {
            groups: group_members(members),
        }
    }

    fn merge(&mut self, owner: &str, incoming: &[Member], overwrite: bool) {
        let named: Vec<Member> = incoming
            .iter()
            .filter(|m| m.name.is_some())
            .cloned()
            .collect();
        for (name, group) in group_members(&named) {
            if !self.groups.contains_key(&name) {
                debug!(owner, member = %name, "adding member");
                self.groups.insert(name, group);
            } else if overwrite {
                debug!(owner, member = %name, "replacing member");
                self.groups.shift_remove(&name);
                self.groups.insert(name, group);
            } else {
                debug!(owner, member = %name, "keeping first-seen member");
            }
        }
    }

    fn into_members(self) -> Vec<Member> {
        self.groups.into_values().flatten().collect()
    }
}

/// Stable sort by member name; overloads stay in declaration order.
fn sort_members(members: &mut [Member]) {
    members.sort_by(|a, b| member_key(a).cmp(member_key(b)));
}

fn union_into(target: &mut Vec<String>, incoming: &[String]) {
    for item in incoming {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

fn merge_interface_into(target: &mut InterfaceDecl, incoming: &InterfaceDecl, overwrite: bool) {
    let mut members = MemberMap::new(&target.members);
    members.merge(&target.name, &incoming.members, overwrite);
    target.members = members.into_members();
    union_into(&mut target.extends, &incoming.extends);
    if target.docs.is_none() {
        target.docs.clone_from(&incoming.docs);
    }
}

fn merge_class_into(target: &mut ClassDecl, incoming: &ClassDecl, overwrite: bool) {
    let owner = target.name.clone().unwrap_or_default();
    let mut members = MemberMap::new(&target.members);
    members.merge(&owner, &incoming.members, overwrite);
    target.members = members.into_members();
    union_into(&mut target.extends, &incoming.extends);
    union_into(&mut target.implements, &incoming.implements);
    if target.docs.is_none() {
        target.docs.clone_from(&incoming.docs);
    }
}

/// Position of the statement in `body` with the same variant and name as
/// `stmt`.
fn find_same(body: &[Statement], stmt: &Statement) -> Option<usize> {
    let name = stmt.name()?;
    body.iter().position(|existing| {
        std::mem::discriminant(existing) == std::mem::discriminant(stmt)
            && existing.name() == Some(name)
    })
}

/// Merge a later namespace block into `target`. The later block wins every
/// conflict: nested interfaces and classes merge with overwrite, type
/// aliases, variables and enums are replaced, nested namespaces recurse.
fn merge_namespace_into(target: &mut NamespaceDecl, incoming: &NamespaceDecl) {
    let owner = target.name.clone();
    for stmt in &incoming.body {
        match stmt {
            Statement::Interface(decl) => {
                match find_same(&target.body, stmt) {
                    Some(i) => {
                        debug!(namespace = %owner, interface = %decl.name, "merging interface");
                        if let Statement::Interface(existing) = &mut target.body[i] {
                            merge_interface_into(existing, decl, true);
                            sort_members(&mut existing.members);
                        }
                    }
                    None => {
                        debug!(namespace = %owner, interface = %decl.name, "adding interface");
                        target.body.push(stmt.clone());
                    }
                }
            }
            Statement::Class(decl) => {
                let name = decl.name.as_deref().unwrap_or_default();
                match find_same(&target.body, stmt) {
                    Some(i) => {
                        debug!(namespace = %owner, class = name, "merging class");
                        if let Statement::Class(existing) = &mut target.body[i] {
                            merge_class_into(existing, decl, true);
                            sort_members(&mut existing.members);
                        }
                    }
                    None => target.body.push(stmt.clone()),
                }
            }
            Statement::Namespace(decl) => {
                match find_same(&target.body, stmt) {
                    Some(i) => {
                        if let Statement::Namespace(existing) = &mut target.body[i] {
                            merge_namespace_into(existing, decl);
                        }
                    }
                    None => target.body.push(stmt.clone()),
                }
            }
            Statement::TypeAlias(decl) => {
                match find_same(&target.body, stmt) {
                    Some(i) => {
                        debug!(namespace = %owner, type_alias = %decl.name, "replacing type alias");
                        target.body[i] = stmt.clone();
                    }
                    None => {
                        debug!(namespace = %owner, type_alias = %decl.name, "adding type alias");
                        target.body.push(stmt.clone());
                    }
                }
            }
            Statement::Variable(var) => merge_variable_into(&owner, &mut target.body, var),
            Statement::Enum(_) => match find_same(&target.body, stmt) {
                Some(i) => target.body[i] = stmt.clone(),
                None => target.body.push(stmt.clone()),
            },
            Statement::Function(_) | Statement::Module(_) | Statement::Opaque(_) => {
                if !target.body.contains(stmt) {
                    target.body.push(stmt.clone());
                }
            }
        }
    }
    target
        .body
        .sort_by(|a, b| a.name().unwrap_or_default().cmp(b.name().unwrap_or_default()));
    if target.docs.is_none() {
        target.docs.clone_from(&incoming.docs);
    }
}

fn merge_variable_into(owner: &str, body: &mut Vec<Statement>, incoming: &VariableStatement) {
    for decl in &incoming.declarations {
        let existing = body.iter_mut().find_map(|stmt| match stmt {
            Statement::Variable(var) => var.declarations.iter_mut().find(|d| d.name == decl.name),
            _ => None,
        });
        match existing {
            Some(slot) => {
                debug!(namespace = owner, variable = %decl.name, "replacing variable");
                *slot = decl.clone();
            }
            None => {
                debug!(namespace = owner, variable = %decl.name, "adding variable");
                body.push(Statement::Variable(VariableStatement {
                    docs: incoming.docs.clone(),
                    is_exported: incoming.is_exported,
                    kind: incoming.kind,
                    declarations: vec![decl.clone()],
                }));
            }
        }
    }
}
