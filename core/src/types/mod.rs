//! Plain records and settings. Behaviour lives in `layout` and `cms`.

pub mod config;
pub mod layout;
pub mod revision;
pub mod site;

pub type SiteId = u64;
pub type LayoutId = u64;
pub type PageId = u64;
pub type RevisionId = u64;
