//! Second stage: attach `extends` chains to the internal entries.

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{instrument, trace};
use tsdl_common::normalize_symbol_part;

use crate::kind::ReflectionKind;
use crate::maps::ReflectionMaps;
use crate::project::{ProjectTree, ReflectionId};

/// Snapshot of one ancestor in an inheritance chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentNode {
    pub id: ReflectionId,
    pub kind: ReflectionKind,
    /// Dotted qualified name.
    pub name: String,
    /// Lookup parts, Symbol keys in `@@inner` form.
    pub parts: Vec<String>,
    pub parents: Vec<ParentNode>,
}

impl ParentNode {
    /// Ancestors in depth-first preorder, each before its own ancestors.
    pub fn flatten(nodes: &[ParentNode]) -> Vec<&ParentNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&ParentNode> = nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.parents.iter().rev());
        }
        out
    }
}

/// The inheritance tree rooted at `id`. A reflection already visited in
/// this walk is not expanded again, which ends cycles and repeats.
pub fn inheritance_tree(tree: &ProjectTree, id: ReflectionId) -> Option<ParentNode> {
    let mut visited = FxHashSet::default();
    visit(tree, id, &mut visited)
}

fn visit(tree: &ProjectTree, id: ReflectionId, visited: &mut FxHashSet<ReflectionId>) -> Option<ParentNode> {
    if !visited.insert(id) {
        return None;
    }
    let reflection = tree.get(id)?;
    let mut parents = Vec::new();
    for &target in &reflection.extended_types {
        let Some(parent) = tree.resolve_reference(target) else {
            continue;
        };
        if let Some(node) = visit(tree, parent.id, visited) {
            parents.push(node);
        }
    }
    let name = tree.qualified_name(id);
    Some(ParentNode {
        id,
        kind: reflection.kind,
        name: name.to_string(),
        parts: name.compat_parts(),
        parents,
    })
}

/// Re-address a container's ancestor chain at one of its members:
/// `Element` becomes `Element.frobnicate`. The ancestor's own member
/// reflection is used when it declares one.
fn project_onto_member(tree: &ProjectTree, node: &ParentNode, member: &str, member_kind: ReflectionKind) -> ParentNode {
    let declared = tree.child_named(node.id, member);
    let part = normalize_symbol_part(member).unwrap_or_else(|| member.to_string());
    let mut parts = node.parts.clone();
    parts.push(part);
    ParentNode {
        id: declared.map_or(node.id, |r| r.id),
        kind: declared.map_or(member_kind, |r| r.kind),
        name: format!("{}.{member}", node.name),
        parts,
        parents: node
            .parents
            .iter()
            .map(|parent| project_onto_member(tree, parent, member, member_kind))
            .collect(),
    }
}

/// Resolve the chain of every registered reflection. Members with no
/// `extends` edges of their own take their container's chain projected onto
/// the member name.
#[instrument(level = "debug", skip_all)]
pub fn attach_inheritance(tree: &ProjectTree, mut maps: ReflectionMaps) -> ReflectionMaps {
    // Preorder: a container's chain is settled before its members are seen.
    let ids: Vec<ReflectionId> = maps.internal.keys().copied().collect();
    for id in ids {
        let Some(reflection) = tree.get(id) else {
            continue;
        };
        let mut parents = inheritance_tree(tree, id)
            .map(|node| node.parents)
            .unwrap_or_default();

        if parents.is_empty() {
            if let Some(container) = reflection.parent.and_then(|parent| maps.internal.get(&parent)) {
                parents = container
                    .parents
                    .iter()
                    .map(|node| project_onto_member(tree, node, &reflection.name, reflection.kind))
                    .collect();
            }
        }

        if !parents.is_empty() {
            trace!(name = %tree.qualified_name(id), count = parents.len(), "inheritance chain");
            if let Some(entry) = maps.internal.get_mut(&id) {
                entry.parents = parents;
            }
        }
    }
    maps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_extends_terminates() {
        let mut tree = ProjectTree::new("p");
        let root = tree.root().id;
        let a = tree.add_child(root, "A", ReflectionKind::Interface).unwrap();
        let b = tree.add_child(root, "B", ReflectionKind::Interface).unwrap();
        tree.add_extends(a, b).unwrap();
        tree.add_extends(b, a).unwrap();
        tree.add_extends(a, a).unwrap();

        let node = inheritance_tree(&tree, a).unwrap();
        assert_eq!(node.parents.len(), 1);
        assert_eq!(node.parents[0].name, "B");
        assert!(node.parents[0].parents.is_empty());
    }

    #[test]
    fn test_reference_reflections_are_followed() {
        let mut tree = ProjectTree::new("p");
        let root = tree.root().id;
        let base = tree.add_child(root, "Base", ReflectionKind::Interface).unwrap();
        let alias = tree.add_child(root, "BaseRef", ReflectionKind::Reference).unwrap();
        let derived = tree.add_child(root, "Derived", ReflectionKind::Interface).unwrap();
        tree.set_target(alias, base).unwrap();
        tree.add_extends(derived, alias).unwrap();

        let node = inheritance_tree(&tree, derived).unwrap();
        assert_eq!(node.parents[0].id, base);
    }

    #[test]
    fn test_flatten_is_depth_first() {
        let leaf = |name: &str, id: u32, parents: Vec<ParentNode>| ParentNode {
            id: ReflectionId(id),
            kind: ReflectionKind::Interface,
            name: name.to_string(),
            parts: vec![name.to_string()],
            parents,
        };
        let chain = vec![
            leaf("B", 1, vec![leaf("D", 3, vec![])]),
            leaf("C", 2, vec![]),
        ];
        let names: Vec<&str> = ParentNode::flatten(&chain).iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "C"]);
    }
}
