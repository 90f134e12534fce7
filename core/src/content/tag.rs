//! Tag registry — the closed set of tag kinds templates may use.
//!
//! Fragment-family tags mark slots whose content comes from elsewhere (a page
//! or a child layout). Everything else (snippets, partials, helpers, assets)
//! is resolved by the renderer. Unknown classes are kept as `Other` so a
//! template using a tag this crate doesn't know still tokenizes.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    // Fragment family
    Content,
    Fragment,
    Wysiwyg,
    Text,
    Textarea,
    Markdown,
    Datetime,
    Date,
    Number,
    Checkbox,
    File,
    Files,

    // Everything else
    Snippet,
    Partial,
    Helper,
    Asset,
    Other(String),
}


impl TagKind {
    /// Names of every fragment-family tag class, as written in templates.
    pub const FRAGMENT_NAMES: [&'static str; 12] = [
        "content", "fragment", "wysiwyg", "text", "textarea", "markdown", "datetime", "date", "number",
        "checkbox", "file", "files",
    ];

    pub fn from_name(name: &str) -> TagKind {
        match name {
            "content" => TagKind::Content,
            "fragment" => TagKind::Fragment,
            "wysiwyg" => TagKind::Wysiwyg,
            "text" => TagKind::Text,
            "textarea" => TagKind::Textarea,
            "markdown" => TagKind::Markdown,
            "datetime" => TagKind::Datetime,
            "date" => TagKind::Date,
            "number" => TagKind::Number,
            "checkbox" => TagKind::Checkbox,
            "file" => TagKind::File,
            "files" => TagKind::Files,
            "snippet" => TagKind::Snippet,
            "partial" => TagKind::Partial,
            "helper" => TagKind::Helper,
            "asset" => TagKind::Asset,
            other => TagKind::Other(other.to_string()),
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(
            self,
            TagKind::Content
                | TagKind::Fragment
                | TagKind::Wysiwyg
                | TagKind::Text
                | TagKind::Textarea
                | TagKind::Markdown
                | TagKind::Datetime
                | TagKind::Date
                | TagKind::Number
                | TagKind::Checkbox
                | TagKind::File
                | TagKind::Files
        )
    }

    /// A fragment tag whose first whitespace-delimited parameter is `content`
    /// is where a child layout's tokens get spliced in.
    pub fn is_fragment_content_placeholder(&self, params: &str) -> bool {
        self.is_fragment() && params.split_whitespace().next() == Some("content")
    }
}
