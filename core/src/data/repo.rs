//! Repository traits, one per collaborator the layout logic depends on.
//!
//! Reads return owned records, ordered the way callers display them. Writes
//! that target a record by id return `CmsError::NotFound` when it is missing.

use crate::error::CmsResult;
use crate::types::layout::Layout;
use crate::types::revision::{Revision, RevisionField};
use crate::types::site::{Page, Site};
use crate::types::{LayoutId, PageId, RevisionId, SiteId};


pub trait SiteRepo {
    fn site(&self, id: SiteId) -> Option<Site>;

    /// All sites, ordered by id.
    fn sites(&self) -> Vec<Site>;

    /// Store a new site, assigning its id.
    fn insert_site(&mut self, site: Site) -> Site;
}


/// Layout persistence plus the tree queries (`children`, `roots`).
/// Every list is ordered by `position`, then id.
pub trait LayoutRepo {
    fn layout(&self, id: LayoutId) -> Option<Layout>;

    fn layouts_for_site(&self, site_id: SiteId) -> Vec<Layout>;

    fn children(&self, id: LayoutId) -> Vec<Layout>;

    /// Layouts of the site without a parent.
    fn roots(&self, site_id: SiteId) -> Vec<Layout>;

    /// Highest `position` among layouts sharing `site_id` and `parent_id`.
    fn max_position(&self, site_id: SiteId, parent_id: Option<LayoutId>) -> Option<i32>;

    /// Whether another layout in the site already uses `identifier`.
    fn identifier_taken(&self, site_id: SiteId, identifier: &str, except: Option<LayoutId>) -> bool;

    /// Store a new layout, assigning its id.
    fn insert_layout(&mut self, layout: Layout) -> Layout;

    fn update_layout(&mut self, layout: &Layout) -> CmsResult<()>;

    fn remove_layout(&mut self, id: LayoutId) -> CmsResult<Layout>;
}


/// Pages, as far as layouts care about them: assignment and the content cache.
pub trait PageRepo {
    fn page(&self, id: PageId) -> Option<Page>;

    /// Ids of pages assigned directly to the layout.
    fn page_ids_for_layout(&self, layout_id: LayoutId) -> Vec<PageId>;

    /// Store a new page, assigning its id.
    fn insert_page(&mut self, page: Page) -> Page;

    /// Reset `content_cache` to `None` for every listed page in one batch.
    /// Returns how many pages were touched.
    fn clear_content_cache(&mut self, ids: &[PageId]) -> CmsResult<usize>;

    fn set_content_cache(&mut self, id: PageId, content: String) -> CmsResult<()>;

    /// Detach every page from the layout. Returns how many pages were touched.
    fn nullify_layout(&mut self, layout_id: LayoutId) -> usize;
}


/// Append-only history of layout `content`/`css`/`js`.
pub trait RevisionRepo {
    fn revision(&self, id: RevisionId) -> Option<Revision>;

    /// Entries for the layout, newest first, optionally limited to one field.
    fn revisions(&self, layout_id: LayoutId, field: Option<RevisionField>) -> Vec<Revision>;

    /// Append an entry, assigning its id.
    fn append_revision(&mut self, revision: Revision) -> Revision;

    /// Drop all but the newest `keep` entries for `(layout_id, field)`.
    fn prune_revisions(&mut self, layout_id: LayoutId, field: RevisionField, keep: usize) -> usize;

    fn remove_revisions(&mut self, layout_id: LayoutId) -> usize;
}


/// Everything the write path needs from a backend.
pub trait Store: SiteRepo + LayoutRepo + PageRepo + RevisionRepo {}

impl<T: SiteRepo + LayoutRepo + PageRepo + RevisionRepo> Store for T {}
