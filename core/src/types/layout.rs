use serde::{Deserialize, Serialize};

use crate::types::{LayoutId, SiteId};


/// A reusable HTML/CSS/JS template, one node of a per-site layout forest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub id: LayoutId,
    pub site_id: SiteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<LayoutId>,
    pub label: String,
    pub identifier: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub created_at_ms: u64,
    #[serde(default)]
    pub updated_at_ms: u64,
}


impl Layout {
    /// Whole seconds of `updated_at_ms`, suitable for `?v=` asset URLs.
    pub fn cache_buster(&self) -> u64 {
        self.updated_at_ms / 1000
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}


/// Input for creating a layout. `site_id` stays optional so that a missing
/// site is reported as a validation error rather than a type error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutDraft {
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default)]
    pub parent_id: Option<LayoutId>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default)]
    pub position: Option<i32>,
}


impl LayoutDraft {
    pub fn new(site_id: SiteId, identifier: &str) -> Self {
        LayoutDraft {
            site_id: Some(site_id),
            identifier: identifier.to_string(),
            ..LayoutDraft::default()
        }
    }

    pub fn with_parent(mut self, parent_id: LayoutId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }
}


/// A partial update. `None` leaves the field untouched; `parent_id` uses a
/// nested option so that `Some(None)` detaches the layout to the root level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<LayoutId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}


impl LayoutChanges {
    pub fn is_empty(&self) -> bool {
        self == &LayoutChanges::default()
    }

    /// Apply the set fields onto `layout` in place.
    pub fn apply_to(&self, layout: &mut Layout) {
        if let Some(parent_id) = self.parent_id {
            layout.parent_id = parent_id;
        }
        if let Some(ref label) = self.label {
            layout.label = label.clone();
        }
        if let Some(ref identifier) = self.identifier {
            layout.identifier = identifier.clone();
        }
        if let Some(ref content) = self.content {
            layout.content = content.clone();
        }
        if let Some(ref css) = self.css {
            layout.css = css.clone();
        }
        if let Some(ref js) = self.js {
            layout.js = js.clone();
        }
        if let Some(position) = self.position {
            layout.position = position;
        }
    }
}
