use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{LayoutId, PageId, SiteId};


/// The scope every layout and page belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    pub id: SiteId,
    pub identifier: String,
    pub label: String,
    #[serde(default)]
    pub hostname: String,
}


/// A page rendered through a layout. `content_cache` holds the last render and
/// is reset to `None` whenever its layout (or an ancestor of it) changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub site_id: SiteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_id: Option<LayoutId>,
    pub label: String,
    /// Fragment identifier -> content supplied by this page.
    #[serde(default)]
    pub fragments: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_cache: Option<String>,
}


impl Page {
    pub fn new(site_id: SiteId, label: &str, layout_id: Option<LayoutId>) -> Self {
        Page {
            id: 0,
            site_id,
            layout_id,
            label: label.to_string(),
            fragments: BTreeMap::new(),
            content_cache: None,
        }
    }

    pub fn with_fragment(mut self, identifier: &str, content: &str) -> Self {
        self.fragments
            .insert(identifier.to_string(), content.to_string());
        self
    }
}
