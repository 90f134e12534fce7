//! In-memory store with a JSON snapshot on disk.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::repo::{LayoutRepo, PageRepo, RevisionRepo, SiteRepo};
use crate::error::{CmsError, CmsResult};
use crate::types::layout::Layout;
use crate::types::revision::{Revision, RevisionField};
use crate::types::site::{Page, Site};
use crate::types::{LayoutId, PageId, RevisionId, SiteId};


#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryStore {
    #[serde(default)]
    sites: BTreeMap<SiteId, Site>,
    #[serde(default)]
    layouts: BTreeMap<LayoutId, Layout>,
    #[serde(default)]
    pages: BTreeMap<PageId, Page>,
    #[serde(default)]
    revisions: Vec<Revision>,
    #[serde(default)]
    last_id: u64,
}


impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Load a snapshot. A missing file yields an empty store; a snapshot
    /// whose layout tree is broken is rejected.
    pub fn load(path: &Path) -> CmsResult<MemoryStore> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(MemoryStore::default()),
            Err(e) => return Err(e.into()),
        };
        let store: MemoryStore = serde_json::from_str(&raw)?;
        store.check_tree()?;
        log::debug!(
            "loaded store from {}: {} sites, {} layouts, {} pages",
            path.display(),
            store.sites.len(),
            store.layouts.len(),
            store.pages.len()
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> CmsResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Verify every parent chain ends at a root of the same site without
    /// revisiting a layout.
    pub fn check_tree(&self) -> CmsResult<()> {
        for layout in self.layouts.values() {
            let mut seen = HashSet::new();
            seen.insert(layout.id);
            let mut current = layout;
            while let Some(parent_id) = current.parent_id {
                let parent = self.layouts.get(&parent_id).ok_or_else(|| {
                    CmsError::CorruptTree(format!(
                        "layout {} has missing parent {}",
                        current.id, parent_id
                    ))
                })?;
                if parent.site_id != current.site_id {
                    return Err(CmsError::CorruptTree(format!(
                        "layout {} has parent {} from another site",
                        current.id, parent_id
                    )));
                }
                if !seen.insert(parent_id) {
                    return Err(CmsError::CorruptTree(format!(
                        "cycle through layout {}",
                        parent_id
                    )));
                }
                current = parent;
            }
        }
        Ok(())
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn sorted(mut layouts: Vec<Layout>) -> Vec<Layout> {
        layouts.sort_by_key(|l| (l.position, l.id));
        layouts
    }
}


impl SiteRepo for MemoryStore {
    fn site(&self, id: SiteId) -> Option<Site> {
        self.sites.get(&id).cloned()
    }

    fn sites(&self) -> Vec<Site> {
        self.sites.values().cloned().collect()
    }

    fn insert_site(&mut self, mut site: Site) -> Site {
        site.id = self.next_id();
        self.sites.insert(site.id, site.clone());
        site
    }
}


impl LayoutRepo for MemoryStore {
    fn layout(&self, id: LayoutId) -> Option<Layout> {
        self.layouts.get(&id).cloned()
    }

    fn layouts_for_site(&self, site_id: SiteId) -> Vec<Layout> {
        Self::sorted(
            self.layouts
                .values()
                .filter(|l| l.site_id == site_id)
                .cloned()
                .collect(),
        )
    }

    fn children(&self, id: LayoutId) -> Vec<Layout> {
        Self::sorted(
            self.layouts
                .values()
                .filter(|l| l.parent_id == Some(id))
                .cloned()
                .collect(),
        )
    }

    fn roots(&self, site_id: SiteId) -> Vec<Layout> {
        Self::sorted(
            self.layouts
                .values()
                .filter(|l| l.site_id == site_id && l.is_root())
                .cloned()
                .collect(),
        )
    }

    fn max_position(&self, site_id: SiteId, parent_id: Option<LayoutId>) -> Option<i32> {
        self.layouts
            .values()
            .filter(|l| l.site_id == site_id && l.parent_id == parent_id)
            .map(|l| l.position)
            .max()
    }

    fn identifier_taken(&self, site_id: SiteId, identifier: &str, except: Option<LayoutId>) -> bool {
        self.layouts.values().any(|l| {
            l.site_id == site_id && l.identifier == identifier && Some(l.id) != except
        })
    }

    fn insert_layout(&mut self, mut layout: Layout) -> Layout {
        layout.id = self.next_id();
        self.layouts.insert(layout.id, layout.clone());
        layout
    }

    fn update_layout(&mut self, layout: &Layout) -> CmsResult<()> {
        match self.layouts.get_mut(&layout.id) {
            Some(slot) => {
                *slot = layout.clone();
                Ok(())
            }
            None => Err(CmsError::NotFound {
                kind: "layout",
                id: layout.id,
            }),
        }
    }

    fn remove_layout(&mut self, id: LayoutId) -> CmsResult<Layout> {
        self.layouts
            .remove(&id)
            .ok_or(CmsError::NotFound { kind: "layout", id })
    }
}


impl PageRepo for MemoryStore {
    fn page(&self, id: PageId) -> Option<Page> {
        self.pages.get(&id).cloned()
    }

    fn page_ids_for_layout(&self, layout_id: LayoutId) -> Vec<PageId> {
        self.pages
            .values()
            .filter(|p| p.layout_id == Some(layout_id))
            .map(|p| p.id)
            .collect()
    }

    fn insert_page(&mut self, mut page: Page) -> Page {
        page.id = self.next_id();
        self.pages.insert(page.id, page.clone());
        page
    }

    fn clear_content_cache(&mut self, ids: &[PageId]) -> CmsResult<usize> {
        if let Some(missing) = ids.iter().find(|id| !self.pages.contains_key(id)) {
            return Err(CmsError::NotFound {
                kind: "page",
                id: *missing,
            });
        }
        let mut touched = 0;
        for id in ids {
            if let Some(page) = self.pages.get_mut(id) {
                page.content_cache = None;
                touched += 1;
            }
        }
        Ok(touched)
    }

    fn set_content_cache(&mut self, id: PageId, content: String) -> CmsResult<()> {
        let page = self
            .pages
            .get_mut(&id)
            .ok_or(CmsError::NotFound { kind: "page", id })?;
        page.content_cache = Some(content);
        Ok(())
    }

    fn nullify_layout(&mut self, layout_id: LayoutId) -> usize {
        let mut touched = 0;
        for page in self.pages.values_mut() {
            if page.layout_id == Some(layout_id) {
                page.layout_id = None;
                touched += 1;
            }
        }
        touched
    }
}


impl RevisionRepo for MemoryStore {
    fn revision(&self, id: RevisionId) -> Option<Revision> {
        self.revisions.iter().find(|r| r.id == id).cloned()
    }

    fn revisions(&self, layout_id: LayoutId, field: Option<RevisionField>) -> Vec<Revision> {
        let mut out: Vec<Revision> = self
            .revisions
            .iter()
            .filter(|r| r.layout_id == layout_id && field.map_or(true, |f| r.field == f))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }

    fn append_revision(&mut self, mut revision: Revision) -> Revision {
        revision.id = self.next_id();
        self.revisions.push(revision.clone());
        revision
    }

    fn prune_revisions(&mut self, layout_id: LayoutId, field: RevisionField, keep: usize) -> usize {
        let mut ids: Vec<RevisionId> = self
            .revisions
            .iter()
            .filter(|r| r.layout_id == layout_id && r.field == field)
            .map(|r| r.id)
            .collect();
        if ids.len() <= keep {
            return 0;
        }
        ids.sort_unstable_by(|a, b| b.cmp(a));
        let doomed: HashSet<RevisionId> = ids.into_iter().skip(keep).collect();
        let before = self.revisions.len();
        self.revisions.retain(|r| !doomed.contains(&r.id));
        before - self.revisions.len()
    }

    fn remove_revisions(&mut self, layout_id: LayoutId) -> usize {
        let before = self.revisions.len();
        self.revisions.retain(|r| r.layout_id != layout_id);
        before - self.revisions.len()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn site(store: &mut MemoryStore) -> SiteId {
        store
            .insert_site(Site {
                id: 0,
                identifier: "default".into(),
                label: "Default".into(),
                hostname: "example.com".into(),
            })
            .id
    }

    fn layout(store: &mut MemoryStore, site_id: SiteId, parent: Option<LayoutId>, ident: &str, position: i32) -> Layout {
        store.insert_layout(Layout {
            id: 0,
            site_id,
            parent_id: parent,
            label: ident.into(),
            identifier: ident.into(),
            content: String::new(),
            css: String::new(),
            js: String::new(),
            position,
            created_at_ms: 0,
            updated_at_ms: 0,
        })
    }

    #[test]
    fn ids_are_assigned() {
        let mut store = MemoryStore::new();
        let s = site(&mut store);
        let a = layout(&mut store, s, None, "a", 0);
        let b = layout(&mut store, s, None, "b", 1);
        assert!(a.id > 0);
        assert_ne!(a.id, b.id);
        assert_eq!(store.layout(a.id).unwrap().identifier, "a");
    }

    #[test]
    fn children_ordered_by_position() {
        let mut store = MemoryStore::new();
        let s = site(&mut store);
        let root = layout(&mut store, s, None, "root", 0);
        layout(&mut store, s, Some(root.id), "late", 5);
        layout(&mut store, s, Some(root.id), "early", 1);
        let names: Vec<String> = store
            .children(root.id)
            .into_iter()
            .map(|l| l.identifier)
            .collect();
        assert_eq!(names, vec!["early", "late"]);
        assert_eq!(store.roots(s).len(), 1);
        assert_eq!(store.max_position(s, Some(root.id)), Some(5));
        assert_eq!(store.max_position(s, Some(999)), None);
    }

    #[test]
    fn identifier_scope_is_per_site() {
        let mut store = MemoryStore::new();
        let s1 = site(&mut store);
        let s2 = site(&mut store);
        let a = layout(&mut store, s1, None, "main", 0);
        assert!(store.identifier_taken(s1, "main", None));
        assert!(!store.identifier_taken(s1, "main", Some(a.id)));
        assert!(!store.identifier_taken(s2, "main", None));
    }

    #[test]
    fn clear_cache_rejects_unknown_page() {
        let mut store = MemoryStore::new();
        let s = site(&mut store);
        let mut page = Page::new(s, "Home", None);
        page.content_cache = Some("cached".into());
        let page = store.insert_page(page);
        assert!(store.clear_content_cache(&[page.id, 4242]).is_err());
        assert_eq!(store.page(page.id).unwrap().content_cache.as_deref(), Some("cached"));
        assert_eq!(store.clear_content_cache(&[page.id]).unwrap(), 1);
        assert_eq!(store.page(page.id).unwrap().content_cache, None);
    }

    #[test]
    fn prune_keeps_newest() {
        let mut store = MemoryStore::new();
        for i in 0..5 {
            store.append_revision(Revision {
                id: 0,
                layout_id: 9,
                field: RevisionField::Content,
                previous: format!("v{}", i),
                recorded_at_ms: i,
            });
        }
        store.append_revision(Revision {
            id: 0,
            layout_id: 9,
            field: RevisionField::Css,
            previous: "css".into(),
            recorded_at_ms: 0,
        });
        assert_eq!(store.prune_revisions(9, RevisionField::Content, 2), 3);
        let kept: Vec<String> = store
            .revisions(9, Some(RevisionField::Content))
            .into_iter()
            .map(|r| r.previous)
            .collect();
        assert_eq!(kept, vec!["v4", "v3"]);
        assert_eq!(store.revisions(9, None).len(), 3);
        assert_eq!(store.remove_revisions(9), 3);
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut store = MemoryStore::new();
        let s = site(&mut store);
        let root = layout(&mut store, s, None, "root", 0);
        layout(&mut store, s, Some(root.id), "child", 0);
        store.save(&path).unwrap();
        let loaded = MemoryStore::load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(store, MemoryStore::default());
    }

    #[test]
    fn check_tree_detects_cycle() {
        let mut store = MemoryStore::new();
        let s = site(&mut store);
        let a = layout(&mut store, s, None, "a", 0);
        let mut b = layout(&mut store, s, Some(a.id), "b", 0);
        let mut a2 = store.layout(a.id).unwrap();
        a2.parent_id = Some(b.id);
        store.update_layout(&a2).unwrap();
        assert!(matches!(store.check_tree(), Err(CmsError::CorruptTree(_))));

        // Break the cycle and point across sites instead.
        let other = site(&mut store);
        a2.parent_id = None;
        store.update_layout(&a2).unwrap();
        b.site_id = other;
        store.update_layout(&b).unwrap();
        assert!(matches!(store.check_tree(), Err(CmsError::CorruptTree(_))));
    }
}
