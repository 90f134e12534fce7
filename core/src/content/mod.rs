//! Template content — tokens, the `{{cms:...}}` tokenizer, the tag registry,
//! and a minimal renderer for page output.
//!
//! A template is a flat list of `Token`s: literal text and tag invocations.
//! Inheritance between layouts works purely on these lists (see
//! `layout::tokens`), so nothing here knows about the layout tree.

pub mod render;
pub mod tag;
pub mod token;
pub mod tokenizer;

pub use tag::TagKind;
pub use token::Token;
pub use tokenizer::{CmsTokenizer, Tokenize};
