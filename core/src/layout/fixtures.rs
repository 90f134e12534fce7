//! Shared test helpers for building small layout trees directly in a store.

use crate::data::memory::MemoryStore;
use crate::data::repo::{LayoutRepo, SiteRepo};
use crate::types::layout::Layout;
use crate::types::site::Site;
use crate::types::{LayoutId, SiteId};


pub fn store_with_site() -> (MemoryStore, SiteId) {
    let mut store = MemoryStore::new();
    let site = store.insert_site(Site {
        id: 0,
        identifier: "default-site".into(),
        label: "Default Site".into(),
        hostname: "test.host".into(),
    });
    (store, site.id)
}


/// Insert a layout labelled and identified by `name`, appended after its siblings.
pub fn add_layout(
    store: &mut MemoryStore,
    site_id: SiteId,
    parent_id: Option<LayoutId>,
    name: &str,
    content: &str,
) -> Layout {
    let position = store
        .max_position(site_id, parent_id)
        .map(|p| p + 1)
        .unwrap_or(0);
    store.insert_layout(Layout {
        id: 0,
        site_id,
        parent_id,
        label: name.into(),
        identifier: name.to_lowercase(),
        content: content.into(),
        css: String::new(),
        js: String::new(),
        position,
        created_at_ms: 0,
        updated_at_ms: 0,
    })
}
