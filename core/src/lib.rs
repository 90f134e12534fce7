//! CMS layouts — reusable HTML/CSS/JS templates arranged as a per-site tree.
//!
//! A child layout's content is spliced into its parent's
//! `{{cms:<fragment> content}}` tag, so a chain of layouts resolves into one
//! flat token list. Any write to a layout clears the cached rendered content
//! of every page below it.

pub mod cms;
pub mod command;
pub mod content;
pub mod data;
pub mod error;
pub mod help;
pub mod layout;
pub mod response;
pub mod sys;
pub mod types;

pub use cms::Cms;
pub use error::{CmsError, CmsResult, ValidationErrors};
