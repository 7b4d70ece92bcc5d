//! First stage of the reflection pipeline: walk the project and register
//! every documented reflection in both maps.

use tracing::{debug, instrument};
use tsdl_common::anchor_slug;

use crate::kind::ReflectionKind;
use crate::maps::{ExternalEntry, InternalEntry, ReflectionMaps};
use crate::project::{ProjectTree, ReflectionId};
use crate::urls::UrlMapping;

/// Build the external and internal maps in depth-first preorder.
///
/// A reflection's URL is its own page URL when it has one. Otherwise it is
/// the URL handed down by its container with `#<slug>` appended, so a
/// member of an anchored reflection carries two anchors.
#[instrument(level = "debug", skip_all, fields(reflections = tree.len()))]
pub fn build_reflection_maps(tree: &ProjectTree, urls: &dyn UrlMapping) -> ReflectionMaps {
    let mut maps = ReflectionMaps::default();
    let mut stack: Vec<(ReflectionId, String)> = vec![(tree.root().id, String::new())];

    while let Some((id, parent_url)) = stack.pop() {
        let Some(reflection) = tree.get(id) else {
            continue;
        };
        let url = match urls.page_url(id) {
            Some(page) => page.to_string(),
            None if !parent_url.is_empty() && reflection.parent.is_some() => {
                format!("{parent_url}#{}", anchor_slug(&reflection.name))
            }
            None => parent_url,
        };

        if reflection.kind.is_registered() {
            register(&mut maps, tree, id, reflection.kind, &url);
        }

        for &child in reflection.children.iter().rev() {
            stack.push((child, url.clone()));
        }
    }

    debug!(
        external = maps.external.len(),
        internal = maps.internal.len(),
        "reflection maps built"
    );
    maps
}

fn register(maps: &mut ReflectionMaps, tree: &ProjectTree, id: ReflectionId, kind: ReflectionKind, url: &str) {
    let name = tree.qualified_name(id);
    let is_symbol = name.is_symbol();
    let key = name.to_string();

    // Interfaces keep their entry against a same-named function, class or
    // variable so links land on the interface page.
    let keeps_interface = maps
        .external
        .get(&key)
        .is_some_and(|existing| existing.kind == ReflectionKind::Interface);
    if !is_symbol && !keeps_interface {
        maps.external.insert(key, ExternalEntry::new(url, kind));
    }

    maps.internal.insert(
        id,
        InternalEntry {
            parts: name.compat_parts(),
            name,
            is_symbol,
            kind,
            doc_url: url.to_string(),
            parents: Vec::new(),
            has_links: false,
            has_compat: false,
            compat: Default::default(),
            links: Default::default(),
        },
    );
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    #[test]
    fn test_anchors_follow_container_urls() {
        let mut tree = ProjectTree::new("dom");
        let root = tree.root().id;
        let window = tree.add_child(root, "Window", ReflectionKind::Interface).unwrap();
        let focus = tree.add_child(window, "focus", ReflectionKind::Method).unwrap();
        let sig = tree.add_child(focus, "focus", ReflectionKind::CallSignature).unwrap();
        let literal = tree.add_child(window, "options", ReflectionKind::Property).unwrap();
        let inner = tree.add_child(literal, "once", ReflectionKind::Property).unwrap();

        let mut urls = FxHashMap::default();
        urls.insert(window, "interfaces/Window.html".to_string());
        let maps = build_reflection_maps(&tree, &urls);

        assert_eq!(maps.entry(window).unwrap().doc_url, "interfaces/Window.html");
        assert_eq!(maps.entry(focus).unwrap().doc_url, "interfaces/Window.html#focus");
        assert!(maps.entry(sig).is_none());
        assert_eq!(
            maps.entry(inner).unwrap().doc_url,
            "interfaces/Window.html#options#once"
        );
        assert_eq!(
            maps.external.names().collect::<Vec<_>>(),
            vec!["Window", "Window.focus", "Window.options", "Window.options.once"]
        );
    }

    #[test]
    fn test_symbol_members_stay_out_of_external_map() {
        let mut tree = ProjectTree::new("es");
        let root = tree.root().id;
        let array = tree.add_child(root, "Array", ReflectionKind::Interface).unwrap();
        let iter = tree.add_child(array, "[iterator]", ReflectionKind::Method).unwrap();
        let urls: FxHashMap<ReflectionId, String> = FxHashMap::default();
        let maps = build_reflection_maps(&tree, &urls);

        let entry = maps.entry(iter).unwrap();
        assert!(entry.is_symbol);
        assert_eq!(entry.name.to_string(), "Array.[iterator]");
        assert_eq!(entry.parts, vec!["Array", "@@iterator"]);
        assert!(maps.external.get("Array.[iterator]").is_none());
        assert!(maps.external.get("Array").is_some());
    }
}
