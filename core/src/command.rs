//! Command — the typed interface for every CMS operation.
//!
//! Site, layout, and page commands map one-to-one onto `Cms` methods. Ids are
//! numeric; `parent` on update is a string so that `none` can detach a layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    // -----------------------------------------------------------------
    // Site commands
    // -----------------------------------------------------------------

    #[serde(rename = "site.create")]
    SiteCreate {
        identifier: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hostname: Option<String>,
    },

    #[serde(rename = "site.list")]
    SiteList,

    // -----------------------------------------------------------------
    // Layout commands
    // -----------------------------------------------------------------

    #[serde(rename = "layout.create")]
    LayoutCreate {
        site: u64,
        identifier: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        css: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        js: Option<String>,
    },

    #[serde(rename = "layout.update")]
    LayoutUpdate {
        id: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identifier: Option<String>,
        /// A layout id, or `none` to move the layout to the root level.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        css: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        js: Option<String>,
    },

    #[serde(rename = "layout.destroy")]
    LayoutDestroy {
        id: u64,
    },

    #[serde(rename = "layout.show")]
    LayoutShow {
        id: u64,
    },

    #[serde(rename = "layout.list")]
    LayoutList {
        site: u64,
    },

    #[serde(rename = "layout.tokens")]
    LayoutTokens {
        id: u64,
    },

    #[serde(rename = "layout.options")]
    LayoutOptions {
        site: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude: Option<u64>,
        /// Drop the excluded layout's whole subtree (valid parents only).
        #[serde(default)]
        parents: bool,
    },

    #[serde(rename = "layout.app")]
    LayoutApp {
        #[serde(default)]
        paths: Vec<String>,
    },

    #[serde(rename = "layout.revisions")]
    LayoutRevisions {
        id: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    #[serde(rename = "layout.restore")]
    LayoutRestore {
        id: u64,
        revision: u64,
    },

    // -----------------------------------------------------------------
    // Page commands
    // -----------------------------------------------------------------

    #[serde(rename = "page.create")]
    PageCreate {
        site: u64,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layout: Option<u64>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        fragments: BTreeMap<String, String>,
    },

    #[serde(rename = "page.render")]
    PageRender {
        id: u64,
    },

    // -----------------------------------------------------------------
    // Help
    // -----------------------------------------------------------------

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}


impl Command {
    /// Whether executing this command may change the store.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::SiteCreate { .. }
                | Command::LayoutCreate { .. }
                | Command::LayoutUpdate { .. }
                | Command::LayoutDestroy { .. }
                | Command::LayoutRestore { .. }
                | Command::PageCreate { .. }
                | Command::PageRender { .. }
        )
    }
}
