//! Tree queries over the parent references stored on each layout.

use std::collections::HashSet;

use crate::data::repo::LayoutRepo;
use crate::error::ValidationErrors;
use crate::types::layout::Layout;
use crate::types::LayoutId;


/// Ancestors of `layout`, nearest first. Stops early on a dangling parent
/// or a repeated id.
pub fn ancestors<S: LayoutRepo + ?Sized>(store: &S, layout: &Layout) -> Vec<Layout> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(layout.id);
    let mut next = layout.parent_id;
    while let Some(id) = next {
        if !seen.insert(id) {
            break;
        }
        match store.layout(id) {
            Some(parent) => {
                next = parent.parent_id;
                out.push(parent);
            }
            None => break,
        }
    }
    out
}


/// Every layout below `id`, depth-first pre-order, siblings by position.
pub fn descendants<S: LayoutRepo + ?Sized>(store: &S, id: LayoutId) -> Vec<Layout> {
    let mut out = Vec::new();
    for child in store.children(id) {
        let child_id = child.id;
        out.push(child);
        out.extend(descendants(store, child_id));
    }
    out
}


/// True when `ancestor` is `id` itself or appears on `id`'s parent chain.
pub fn is_self_or_ancestor<S: LayoutRepo + ?Sized>(store: &S, ancestor: LayoutId, id: LayoutId) -> bool {
    if ancestor == id {
        return true;
    }
    match store.layout(id) {
        Some(layout) => ancestors(store, &layout).iter().any(|l| l.id == ancestor),
        None => false,
    }
}


/// Check `layout.parent_id`: it must exist, share the site, and not sit
/// inside `layout`'s own subtree.
pub fn check_parent<S: LayoutRepo + ?Sized>(store: &S, layout: &Layout, errors: &mut ValidationErrors) {
    let Some(parent_id) = layout.parent_id else {
        return;
    };
    if parent_id == layout.id {
        errors.add("parent_id", "would create a cycle");
        return;
    }
    let Some(parent) = store.layout(parent_id) else {
        errors.add("parent_id", "must exist");
        return;
    };
    if parent.site_id != layout.site_id {
        errors.add("parent_id", "must belong to the same site");
        return;
    }
    if is_self_or_ancestor(store, layout.id, parent_id) {
        errors.add("parent_id", "would create a cycle");
    }
}
