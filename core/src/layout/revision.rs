//! Revision history for layout `content`, `css` and `js`.

use crate::data::repo::RevisionRepo;
use crate::types::layout::{Layout, LayoutChanges};
use crate::types::revision::{Revision, RevisionField};


/// Append one entry per versioned field that differs between `before` and
/// `after`, then prune each touched field down to `limit` entries.
pub fn record_changes<S: RevisionRepo + ?Sized>(
    store: &mut S,
    before: &Layout,
    after: &Layout,
    limit: usize,
    now_ms: u64,
) -> Vec<Revision> {
    let mut recorded = Vec::new();
    for field in RevisionField::ALL {
        let previous = field.value_of(before);
        if previous == field.value_of(after) {
            continue;
        }
        recorded.push(store.append_revision(Revision {
            id: 0,
            layout_id: after.id,
            field,
            previous: previous.to_string(),
            recorded_at_ms: now_ms,
        }));
        store.prune_revisions(after.id, field, limit);
    }
    recorded
}


/// The update that puts a revision's value back.
pub fn restore_changes(revision: &Revision) -> LayoutChanges {
    let value = Some(revision.previous.clone());
    match revision.field {
        RevisionField::Content => LayoutChanges {
            content: value,
            ..LayoutChanges::default()
        },
        RevisionField::Css => LayoutChanges {
            css: value,
            ..LayoutChanges::default()
        },
        RevisionField::Js => LayoutChanges {
            js: value,
            ..LayoutChanges::default()
        },
    }
}
