//! Write path and read helpers over a `Store`.
//!
//! Every layout write runs the same explicit sequence:
//!
//! 1. `assign_label`
//! 2. validation (fields, uniqueness, parent/cycle checks)
//! 3. `assign_position` (create, or a move without an explicit position)
//! 4. persist the record
//! 5. append revisions for changed `content`/`css`/`js`
//! 6. clear the page content cache for the layout's subtree
//!
//! Validation happens before anything is written, so a rejected write leaves
//! the store untouched.

use log::info;

use crate::content::render::render;
use crate::content::token::Token;
use crate::content::tokenizer::{CmsTokenizer, Tokenize};
use crate::data::repo::Store;
use crate::error::{CmsError, CmsResult, ValidationErrors};
use crate::layout::{app_layouts, cache, position, revision, select, tokens, tree, validation};
use crate::types::config::CmsSettings;
use crate::types::layout::{Layout, LayoutChanges, LayoutDraft};
use crate::types::revision::Revision;
use crate::types::site::{Page, Site};
use crate::types::{LayoutId, PageId, RevisionId, SiteId};


/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}


pub struct Cms<S, T = CmsTokenizer> {
    store: S,
    tokenizer: T,
    settings: CmsSettings,
}


impl<S: Store> Cms<S> {
    pub fn new(store: S, settings: CmsSettings) -> Self {
        Cms {
            store,
            tokenizer: CmsTokenizer,
            settings,
        }
    }
}


impl<S: Store, T: Tokenize> Cms<S, T> {
    pub fn with_tokenizer(store: S, tokenizer: T, settings: CmsSettings) -> Self {
        Cms {
            store,
            tokenizer,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &CmsSettings {
        &self.settings
    }

    // -----------------------------------------------------------------------
    // Sites and pages
    // -----------------------------------------------------------------------

    pub fn create_site(&mut self, identifier: &str, label: &str, hostname: &str) -> CmsResult<Site> {
        let mut errors = ValidationErrors::new();
        if identifier.trim().is_empty() {
            errors.add("identifier", "can't be blank");
        } else {
            if !validation::identifier_is_valid(identifier) {
                errors.add("identifier", "is invalid");
            }
            if self.store.sites().iter().any(|s| s.identifier == identifier) {
                errors.add("identifier", "has already been taken");
            }
        }
        errors.into_result()?;

        let label = if label.trim().is_empty() {
            validation::titleize(identifier)
        } else {
            label.to_string()
        };
        let site = self.store.insert_site(Site {
            id: 0,
            identifier: identifier.to_string(),
            label,
            hostname: hostname.to_string(),
        });
        info!("created site {} '{}'", site.id, site.identifier);
        Ok(site)
    }

    pub fn site(&self, id: SiteId) -> CmsResult<Site> {
        self.store
            .site(id)
            .ok_or(CmsError::NotFound { kind: "site", id })
    }

    pub fn create_page(&mut self, page: Page) -> CmsResult<Page> {
        let mut errors = ValidationErrors::new();
        if self.store.site(page.site_id).is_none() {
            errors.add("site_id", "must exist");
        }
        if page.label.trim().is_empty() {
            errors.add("label", "can't be blank");
        }
        if let Some(layout_id) = page.layout_id {
            match self.store.layout(layout_id) {
                None => errors.add("layout_id", "must exist"),
                Some(layout) if layout.site_id != page.site_id => {
                    errors.add("layout_id", "must belong to the same site")
                }
                Some(_) => {}
            }
        }
        errors.into_result()?;

        let page = self.store.insert_page(Page {
            content_cache: None,
            ..page
        });
        info!("created page {} '{}'", page.id, page.label);
        Ok(page)
    }

    /// Rendered page content, from cache when present. A cache miss renders
    /// through the page's layout and stores the result.
    pub fn page_content(&mut self, page_id: PageId) -> CmsResult<String> {
        let page = self
            .store
            .page(page_id)
            .ok_or(CmsError::NotFound { kind: "page", id: page_id })?;
        if let Some(cached) = page.content_cache {
            return Ok(cached);
        }

        let rendered = match page.layout_id {
            Some(layout_id) => {
                let tokens = self.content_tokens(layout_id)?;
                render(&tokens, &page.fragments)
            }
            None => String::new(),
        };
        self.store.set_content_cache(page_id, rendered.clone())?;
        Ok(rendered)
    }

    // -----------------------------------------------------------------------
    // Layout writes
    // -----------------------------------------------------------------------

    pub fn create_layout(&mut self, draft: LayoutDraft, now_ms: u64) -> CmsResult<Layout> {
        let mut errors = ValidationErrors::new();
        let site_id = match draft.site_id {
            Some(id) => id,
            None => {
                errors.add("site_id", "can't be blank");
                0
            }
        };

        let mut layout = Layout {
            id: 0,
            site_id,
            parent_id: draft.parent_id,
            label: draft.label,
            identifier: draft.identifier,
            content: draft.content,
            css: draft.css,
            js: draft.js,
            position: draft.position.unwrap_or(0),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };

        validation::assign_label(&mut layout);
        validation::check(&self.store, &layout, &mut errors);
        errors.into_result()?;

        position::assign_position(&self.store, &mut layout);
        let layout = self.store.insert_layout(layout);
        info!(
            "created layout {} '{}' at position {}",
            layout.id, layout.identifier, layout.position
        );

        cache::clear_page_content_cache(&mut self.store, layout.id)?;
        Ok(layout)
    }

    pub fn update_layout(
        &mut self,
        id: LayoutId,
        changes: LayoutChanges,
        now_ms: u64,
    ) -> CmsResult<Layout> {
        let before = self.layout(id)?;
        let mut layout = before.clone();
        let explicit_position = changes.position.is_some();
        changes.apply_to(&mut layout);

        validation::assign_label(&mut layout);
        validation::validate(&self.store, &layout)?;

        // A moved layout goes after its new siblings unless told otherwise.
        if layout.parent_id != before.parent_id && !explicit_position {
            layout.position = 0;
            position::assign_position(&self.store, &mut layout);
        }

        if layout != before {
            layout.updated_at_ms = now_ms;
        }
        self.store.update_layout(&layout)?;
        let recorded = revision::record_changes(
            &mut self.store,
            &before,
            &layout,
            self.settings.revisions_limit,
            now_ms,
        );
        info!(
            "updated layout {} '{}' ({} revisions recorded)",
            layout.id,
            layout.identifier,
            recorded.len()
        );

        cache::clear_page_content_cache(&mut self.store, layout.id)?;
        Ok(layout)
    }

    /// Destroy a layout and its descendants. Pages on any of them lose their
    /// cached content and their layout reference. Returns the destroyed
    /// layouts, the requested one first.
    pub fn destroy_layout(&mut self, id: LayoutId) -> CmsResult<Vec<Layout>> {
        let layout = self.layout(id)?;
        let mut doomed = vec![layout];
        doomed.extend(tree::descendants(&self.store, id));

        cache::clear_page_content_cache(&mut self.store, id)?;

        for layout in doomed.iter().rev() {
            let detached = self.store.nullify_layout(layout.id);
            self.store.remove_revisions(layout.id);
            self.store.remove_layout(layout.id)?;
            info!(
                "destroyed layout {} '{}' ({} pages detached)",
                layout.id, layout.identifier, detached
            );
        }
        Ok(doomed)
    }

    /// Put a revision's value back through the normal update path.
    pub fn restore_revision(
        &mut self,
        layout_id: LayoutId,
        revision_id: RevisionId,
        now_ms: u64,
    ) -> CmsResult<Layout> {
        let entry = self
            .store
            .revision(revision_id)
            .filter(|r| r.layout_id == layout_id)
            .ok_or(CmsError::NotFound { kind: "revision", id: revision_id })?;
        self.update_layout(layout_id, revision::restore_changes(&entry), now_ms)
    }

    // -----------------------------------------------------------------------
    // Layout reads
    // -----------------------------------------------------------------------

    pub fn layout(&self, id: LayoutId) -> CmsResult<Layout> {
        self.store
            .layout(id)
            .ok_or(CmsError::NotFound { kind: "layout", id })
    }

    pub fn layouts_for_site(&self, site_id: SiteId) -> CmsResult<Vec<Layout>> {
        self.site(site_id)?;
        Ok(self.store.layouts_for_site(site_id))
    }

    pub fn revisions(&self, layout_id: LayoutId) -> CmsResult<Vec<Revision>> {
        self.layout(layout_id)?;
        Ok(self.store.revisions(layout_id, None))
    }

    pub fn content_tokens(&self, id: LayoutId) -> CmsResult<Vec<Token>> {
        let layout = self.layout(id)?;
        tokens::content_tokens(&self.store, &self.tokenizer, &layout)
    }

    /// Tree listing with the configured spacer.
    pub fn options_for_select(
        &self,
        site_id: SiteId,
        exclude: Option<LayoutId>,
    ) -> CmsResult<Vec<(String, LayoutId)>> {
        let site = self.site(site_id)?;
        let exclude = exclude.map(|id| self.layout(id)).transpose()?;
        Ok(select::options_for_select(
            &self.store,
            &site,
            exclude.as_ref(),
            None,
            0,
            &self.settings.option_spacer,
        ))
    }

    /// Tree listing of layouts that `layout_id` may be moved under.
    pub fn parent_options_for_select(
        &self,
        site_id: SiteId,
        layout_id: Option<LayoutId>,
    ) -> CmsResult<Vec<(String, LayoutId)>> {
        let site = self.site(site_id)?;
        let layout = layout_id.map(|id| self.layout(id)).transpose()?;
        Ok(select::parent_options_for_select(
            &self.store,
            &site,
            layout.as_ref(),
            &self.settings.option_spacer,
        ))
    }

    /// Application layouts under the configured view paths.
    pub fn app_layouts_for_select(&self) -> Vec<String> {
        app_layouts::app_layouts_for_select(&self.settings.view_paths)
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
