//! Page content cache cascade.
//!
//! A page's rendered output depends on its layout and every ancestor of that
//! layout, so a change to one layout must invalidate the pages of its whole
//! subtree. Each level is cleared with a single batch update.

use log::debug;

use crate::data::repo::{LayoutRepo, PageRepo};
use crate::error::CmsResult;
use crate::types::LayoutId;


/// Clear `content_cache` for pages on `layout_id` and on every descendant.
/// Returns the number of pages cleared.
pub fn clear_page_content_cache<S: LayoutRepo + PageRepo + ?Sized>(
    store: &mut S,
    layout_id: LayoutId,
) -> CmsResult<usize> {
    let page_ids = store.page_ids_for_layout(layout_id);
    let mut cleared = if page_ids.is_empty() {
        0
    } else {
        store.clear_content_cache(&page_ids)?
    };
    debug!("layout {}: cleared {} page caches", layout_id, cleared);

    for child in store.children(layout_id) {
        cleared += clear_page_content_cache(store, child.id)?;
    }
    Ok(cleared)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::MemoryStore;
    use crate::layout::fixtures::{add_layout, store_with_site};
    use crate::types::site::Page;
    use crate::types::PageId;

    fn cached_page(store: &mut MemoryStore, site: u64, layout: Option<u64>) -> PageId {
        let mut page = Page::new(site, "Page", layout);
        page.content_cache = Some("rendered".into());
        store.insert_page(page).id
    }

    #[test]
    fn clears_subtree_pages_only() {
        let (mut store, site) = store_with_site();
        let a = add_layout(&mut store, site, None, "A", "");
        let b = add_layout(&mut store, site, Some(a.id), "B", "");
        let d = add_layout(&mut store, site, Some(b.id), "D", "");
        let other = add_layout(&mut store, site, None, "Other", "");

        let on_b = cached_page(&mut store, site, Some(b.id));
        let on_d = cached_page(&mut store, site, Some(d.id));
        let on_a = cached_page(&mut store, site, Some(a.id));
        let on_other = cached_page(&mut store, site, Some(other.id));
        let unassigned = cached_page(&mut store, site, None);

        let cleared = clear_page_content_cache(&mut store, b.id).unwrap();
        assert_eq!(cleared, 2);
        assert_eq!(store.page(on_b).unwrap().content_cache, None);
        assert_eq!(store.page(on_d).unwrap().content_cache, None);
        assert!(store.page(on_a).unwrap().content_cache.is_some());
        assert!(store.page(on_other).unwrap().content_cache.is_some());
        assert!(store.page(unassigned).unwrap().content_cache.is_some());
    }

    #[test]
    fn leaf_without_pages_clears_nothing() {
        let (mut store, site) = store_with_site();
        let a = add_layout(&mut store, site, None, "A", "");
        assert_eq!(clear_page_content_cache(&mut store, a.id).unwrap(), 0);
    }
}
