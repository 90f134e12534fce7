use crate::data::repo::LayoutRepo;
use crate::types::layout::Layout;


/// Place a new layout after its siblings. An explicit positive position is
/// kept as given; zero or negative means "append".
pub fn assign_position<S: LayoutRepo + ?Sized>(store: &S, layout: &mut Layout) {
    if layout.position > 0 {
        return;
    }
    layout.position = match store.max_position(layout.site_id, layout.parent_id) {
        Some(max) => max + 1,
        None => 0,
    };
}
