use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{LayoutId, RevisionId};
use crate::types::layout::Layout;


/// The layout fields that are versioned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RevisionField {
    Content,
    Css,
    Js,
}


impl RevisionField {
    pub const ALL: [RevisionField; 3] = [RevisionField::Content, RevisionField::Css, RevisionField::Js];

    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionField::Content => "content",
            RevisionField::Css => "css",
            RevisionField::Js => "js",
        }
    }

    /// Read this field's current value off a layout.
    pub fn value_of<'a>(&self, layout: &'a Layout) -> &'a str {
        match self {
            RevisionField::Content => &layout.content,
            RevisionField::Css => &layout.css,
            RevisionField::Js => &layout.js,
        }
    }
}


impl fmt::Display for RevisionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


impl FromStr for RevisionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(RevisionField::Content),
            "css" => Ok(RevisionField::Css),
            "js" => Ok(RevisionField::Js),
            other => Err(format!("unknown revision field: '{}'", other)),
        }
    }
}


/// One append-only log entry: the value `field` held before a save changed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Revision {
    pub id: RevisionId,
    pub layout_id: LayoutId,
    pub field: RevisionField,
    pub previous: String,
    pub recorded_at_ms: u64,
}
