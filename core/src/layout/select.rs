//! Indented pick lists of a site's layout tree.

use crate::data::repo::LayoutRepo;
use crate::types::layout::Layout;
use crate::types::site::Site;
use crate::types::LayoutId;


/// Flatten the site's layout tree into `(indented label, id)` pairs,
/// depth-first pre-order.
///
/// Starts at `current` when given, otherwise at the site's roots. Each row is
/// the label prefixed with `spacer` repeated `depth` times. The `exclude`d
/// layout gets no row, but its children are still listed at their own depth.
pub fn options_for_select<S: LayoutRepo + ?Sized>(
    store: &S,
    site: &Site,
    exclude: Option<&Layout>,
    current: Option<&Layout>,
    depth: usize,
    spacer: &str,
) -> Vec<(String, LayoutId)> {
    let layouts = match current {
        Some(layout) => vec![layout.clone()],
        None => store.roots(site.id),
    };

    let mut out = Vec::new();
    for layout in &layouts {
        if exclude.map(|e| e.id) != Some(layout.id) {
            out.push((format!("{}{}", spacer.repeat(depth), layout.label), layout.id));
        }
        for child in store.children(layout.id) {
            out.extend(options_for_select(store, site, exclude, Some(&child), depth + 1, spacer));
        }
    }
    out
}


/// Like `options_for_select`, but leaves out `layout` and its whole subtree,
/// so every remaining row is a valid new parent for it.
pub fn parent_options_for_select<S: LayoutRepo + ?Sized>(
    store: &S,
    site: &Site,
    layout: Option<&Layout>,
    spacer: &str,
) -> Vec<(String, LayoutId)> {
    let mut out = Vec::new();
    for root in store.roots(site.id) {
        push_pruned(store, &root, layout.map(|l| l.id), 0, spacer, &mut out);
    }
    out
}


fn push_pruned<S: LayoutRepo + ?Sized>(
    store: &S,
    layout: &Layout,
    pruned: Option<LayoutId>,
    depth: usize,
    spacer: &str,
    out: &mut Vec<(String, LayoutId)>,
) {
    if pruned == Some(layout.id) {
        return;
    }
    out.push((format!("{}{}", spacer.repeat(depth), layout.label), layout.id));
    for child in store.children(layout.id) {
        push_pruned(store, &child, pruned, depth + 1, spacer, out);
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
