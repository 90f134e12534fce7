//! Layout operations — validation, ordering, inheritance, and cache cascades.
//!
//! `validation` and `position` fill in and check a record before it is
//! written. `tree` answers ancestry questions and rejects cycle-creating
//! parents. `tokens` resolves a layout's content against its parent chain.
//! `cache` clears rendered page content below a changed layout. `select`
//! and `app_layouts` build the pick lists shown to editors. `revision`
//! records and restores the `content`/`css`/`js` history.
//!
//! Each function takes the store it needs as an argument; the ordering of
//! the steps on a write lives in `crate::cms`.

pub mod app_layouts;
pub mod cache;
pub mod position;
pub mod revision;
pub mod select;
pub mod tokens;
pub mod tree;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;
