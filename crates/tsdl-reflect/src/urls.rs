//! Page URLs of reflections that get their own documentation page.

use rustc_hash::FxHashMap;

use crate::project::{ProjectTree, ReflectionId};

/// Supplies the page URL of reflections rendered as their own page.
/// Reflections without one are addressed by an anchor on their container's
/// page.
pub trait UrlMapping {
    fn page_url(&self, id: ReflectionId) -> Option<&str>;
}

impl UrlMapping for FxHashMap<ReflectionId, String> {
    fn page_url(&self, id: ReflectionId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

/// Page layout of TypeDoc's default theme.
#[derive(Debug, Clone, Default)]
pub struct DefaultThemeUrls {
    urls: FxHashMap<ReflectionId, String>,
}

fn alias_of(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect()
}

impl DefaultThemeUrls {
    pub fn new(tree: &ProjectTree) -> Self {
        let mut urls = FxHashMap::default();
        let root = tree.root();
        urls.insert(root.id, "modules.html".to_string());
        let mut builder = Builder {
            tree,
            urls: &mut urls,
        };
        builder.assign_pages(root.id, "");
        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl UrlMapping for DefaultThemeUrls {
    fn page_url(&self, id: ReflectionId) -> Option<&str> {
        self.urls.get(&id).map(String::as_str)
    }
}

struct Builder<'a> {
    tree: &'a ProjectTree,
    urls: &'a mut FxHashMap<ReflectionId, String>,
}

impl Builder<'_> {
    /// Assign pages to the children of a page-owning container. `prefix` is
    /// the container's dotted alias path, empty for the project.
    fn assign_pages(&mut self, container: ReflectionId, prefix: &str) {
        let Some(reflection) = self.tree.get(container) else {
            return;
        };
        // Aliases differing only by case collide on case-insensitive
        // filesystems, so later ones get a numeric suffix.
        let mut seen: FxHashMap<String, u32> = FxHashMap::default();
        for &child_id in &reflection.children {
            let Some(child) = self.tree.get(child_id) else {
                continue;
            };
            let Some(dir) = child.kind.page_dir() else {
                continue;
            };
            let mut alias = alias_of(&child.name);
            let count = seen.entry(alias.to_lowercase()).or_insert(0);
            if *count > 0 {
                alias = format!("{alias}-{count}");
            }
            *count += 1;

            let path = if prefix.is_empty() {
                alias
            } else {
                format!("{prefix}.{alias}")
            };
            self.urls.insert(child_id, format!("{dir}/{path}.html"));
            if child.kind.is_page_container() {
                self.assign_pages(child_id, &path);
            }
        }
    }
}
