//! Documentation reflection tree.
//!
//! The tree is read from TypeDoc's JSON project format and flattened into
//! an arena addressed by `ReflectionId`. Nested `children` become child
//! handles; `extendedTypes` reference targets become inheritance edges.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tsdl_common::QualifiedName;

use crate::error::ReflectError;
use crate::kind::ReflectionKind;

/// TypeDoc reflection id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection {
    pub id: ReflectionId,
    pub name: String,
    pub kind: ReflectionKind,
    pub parent: Option<ReflectionId>,
    pub children: Vec<ReflectionId>,
    /// Targets of the `extends` clause that resolved to reflections.
    pub extended_types: Vec<ReflectionId>,
    /// Redirect target of a `Reference` reflection.
    pub target: Option<ReflectionId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReflection {
    id: u32,
    name: String,
    kind: ReflectionKind,
    #[serde(default)]
    children: Vec<RawReflection>,
    #[serde(default)]
    extended_types: Vec<RawType>,
    #[serde(default)]
    target: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    #[serde(rename = "type")]
    type_kind: String,
    #[serde(default)]
    target: Option<Value>,
}

/// Reference targets are numeric ids for reflections inside the project and
/// objects for symbols from outside it.
fn target_id(target: Option<&Value>) -> Option<ReflectionId> {
    target?.as_u64().and_then(|id| u32::try_from(id).ok()).map(ReflectionId)
}

#[derive(Debug, Clone)]
pub struct ProjectTree {
    reflections: Vec<Reflection>,
    by_id: FxHashMap<ReflectionId, usize>,
}

impl ProjectTree {
    /// An empty project whose root has id 0.
    pub fn new(name: impl Into<String>) -> Self {
        let root = Reflection {
            id: ReflectionId(0),
            name: name.into(),
            kind: ReflectionKind::Project,
            parent: None,
            children: Vec::new(),
            extended_types: Vec::new(),
            target: None,
        };
        let mut by_id = FxHashMap::default();
        by_id.insert(root.id, 0);
        Self {
            reflections: vec![root],
            by_id,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ReflectError> {
        let raw: RawReflection = serde_json::from_str(json).map_err(ReflectError::ProjectJson)?;
        let mut tree = Self {
            reflections: Vec::new(),
            by_id: FxHashMap::default(),
        };
        tree.insert_raw(raw, None)?;
        Ok(tree)
    }

    fn insert_raw(
        &mut self,
        raw: RawReflection,
        parent: Option<ReflectionId>,
    ) -> Result<ReflectionId, ReflectError> {
        let id = ReflectionId(raw.id);
        let extended_types = raw
            .extended_types
            .iter()
            .filter(|ty| ty.type_kind == "reference")
            .filter_map(|ty| target_id(ty.target.as_ref()))
            .collect();
        self.push(Reflection {
            id,
            name: raw.name,
            kind: raw.kind,
            parent,
            children: Vec::new(),
            extended_types,
            target: target_id(raw.target.as_ref()),
        })?;
        for child in raw.children {
            let child_id = self.insert_raw(child, Some(id))?;
            self.get_mut(id)?.children.push(child_id);
        }
        Ok(id)
    }

    fn push(&mut self, reflection: Reflection) -> Result<(), ReflectError> {
        let id = reflection.id;
        if self.by_id.insert(id, self.reflections.len()).is_some() {
            return Err(ReflectError::DuplicateId(id.0));
        }
        self.reflections.push(reflection);
        Ok(())
    }

    fn get_mut(&mut self, id: ReflectionId) -> Result<&mut Reflection, ReflectError> {
        let index = *self
            .by_id
            .get(&id)
            .ok_or(ReflectError::UnknownReflection(id.0))?;
        Ok(&mut self.reflections[index])
    }

    /// Append a child reflection with the next free id.
    pub fn add_child(
        &mut self,
        parent: ReflectionId,
        name: impl Into<String>,
        kind: ReflectionKind,
    ) -> Result<ReflectionId, ReflectError> {
        let next = self.reflections.iter().map(|r| r.id.0).max().map_or(0, |max| max + 1);
        let id = ReflectionId(next);
        self.get_mut(parent)?.children.push(id);
        self.push(Reflection {
            id,
            name: name.into(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
            extended_types: Vec::new(),
            target: None,
        })?;
        Ok(id)
    }

    /// Record that `child` extends `parent`.
    pub fn add_extends(&mut self, child: ReflectionId, parent: ReflectionId) -> Result<(), ReflectError> {
        self.get_mut(child)?.extended_types.push(parent);
        Ok(())
    }

    pub fn set_target(&mut self, reference: ReflectionId, target: ReflectionId) -> Result<(), ReflectError> {
        self.get_mut(reference)?.target = Some(target);
        Ok(())
    }

    pub fn root(&self) -> &Reflection {
        &self.reflections[0]
    }

    pub fn get(&self, id: ReflectionId) -> Option<&Reflection> {
        self.by_id.get(&id).map(|&index| &self.reflections[index])
    }

    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    /// Every reflection in depth-first preorder from the root.
    pub fn preorder(&self) -> Vec<ReflectionId> {
        let mut out = Vec::with_capacity(self.reflections.len());
        let mut stack = vec![self.root().id];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(reflection) = self.get(id) {
                stack.extend(reflection.children.iter().rev().copied());
            }
        }
        out
    }

    /// Qualified name of a reflection. The project root contributes no part.
    pub fn qualified_name(&self, id: ReflectionId) -> QualifiedName {
        let mut parts = Vec::new();
        let mut current = self.get(id);
        while let Some(reflection) = current {
            if reflection.kind == ReflectionKind::Project {
                break;
            }
            parts.push(reflection.name.as_str());
            current = reflection.parent.and_then(|parent| self.get(parent));
        }
        parts.reverse();
        QualifiedName::from_parts(parts)
    }

    /// Follow `Reference` redirections to the reflection they stand for.
    /// Stops on a cycle and returns the last reflection reached.
    pub fn resolve_reference(&self, id: ReflectionId) -> Option<&Reflection> {
        let mut current = self.get(id)?;
        let mut hops = 0usize;
        while current.kind == ReflectionKind::Reference {
            let Some(next) = current.target.and_then(|target| self.get(target)) else {
                break;
            };
            hops += 1;
            if hops > self.reflections.len() {
                break;
            }
            current = next;
        }
        Some(current)
    }

    /// The child of `container` named `name`.
    pub fn child_named(&self, container: ReflectionId, name: &str) -> Option<&Reflection> {
        self.get(container)?
            .children
            .iter()
            .filter_map(|&child| self.get(child))
            .find(|child| child.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "id": 0, "name": "dom", "variant": "project", "kind": 1,
        "children": [
            {"id": 1, "name": "Element", "kind": 256, "children": [
                {"id": 2, "name": "id", "kind": 1024}
            ]},
            {"id": 3, "name": "HTMLElement", "kind": 256,
             "extendedTypes": [
                {"type": "reference", "target": 1, "name": "Element"},
                {"type": "reference", "target": {"sourceFileName": "x.ts", "qualifiedName": "Y"}, "name": "Y"},
                {"type": "intrinsic", "name": "any"}
             ]},
            {"id": 4, "name": "ElementAlias", "kind": 4194304, "target": 1}
        ]
    }"#;

    #[test]
    fn test_from_json_flattens_children() {
        let tree = ProjectTree::from_json(PROJECT).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root().children, vec![ReflectionId(1), ReflectionId(3), ReflectionId(4)]);
        let html = tree.get(ReflectionId(3)).unwrap();
        assert_eq!(html.extended_types, vec![ReflectionId(1)]);
        assert_eq!(tree.qualified_name(ReflectionId(2)).to_string(), "Element.id");
        assert_eq!(tree.resolve_reference(ReflectionId(4)).unwrap().name, "Element");
        assert_eq!(
            tree.preorder(),
            vec![ReflectionId(0), ReflectionId(1), ReflectionId(2), ReflectionId(3), ReflectionId(4)]
        );
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"{"id": 0, "name": "p", "kind": 1, "children": [{"id": 0, "name": "A", "kind": 256}]}"#;
        assert!(matches!(ProjectTree::from_json(json), Err(ReflectError::DuplicateId(0))));
    }

    #[test]
    fn test_reference_cycle_terminates() {
        let mut tree = ProjectTree::new("p");
        let a = tree.add_child(ReflectionId(0), "A", ReflectionKind::Reference).unwrap();
        let b = tree.add_child(ReflectionId(0), "B", ReflectionKind::Reference).unwrap();
        tree.set_target(a, b).unwrap();
        tree.set_target(b, a).unwrap();
        assert!(tree.resolve_reference(a).is_some());
    }
}
