//! Content inheritance — merge a layout's tokens into its parent's.
//!
//! A child layout's tokens replace the first fragment tag in the parent's
//! resolved tokens whose first parameter is `content`. The parent is resolved
//! the same way first, so a chain of layouts nests outermost-first. Only one
//! placeholder is replaced; later ones stay as tags. If the parent has no
//! placeholder the parent's tokens are returned and the child's are dropped.

use log::{debug, warn};

use crate::content::token::Token;
use crate::content::tokenizer::Tokenize;
use crate::data::repo::LayoutRepo;
use crate::error::CmsResult;
use crate::types::layout::Layout;


/// Fully resolved token list for `layout`, including every ancestor.
pub fn content_tokens<S, T>(store: &S, tokenizer: &T, layout: &Layout) -> CmsResult<Vec<Token>>
where
    S: LayoutRepo + ?Sized,
    T: Tokenize + ?Sized,
{
    let tokens = tokenizer.tokenize(&layout.content)?;

    let Some(parent) = layout.parent_id.and_then(|id| store.layout(id)) else {
        return Ok(tokens);
    };

    let parent_tokens = content_tokens(store, tokenizer, &parent)?;
    match merge_into_parent(parent_tokens, tokens) {
        Merged::Spliced(merged) => {
            debug!("layout {} merged into parent {}", layout.id, parent.id);
            Ok(merged)
        }
        Merged::NoPlaceholder(parent_tokens) => {
            warn!(
                "parent layout '{}' has no content placeholder; content of '{}' is not used",
                parent.identifier, layout.identifier
            );
            Ok(parent_tokens)
        }
    }
}


#[derive(Debug, PartialEq)]
pub enum Merged {
    Spliced(Vec<Token>),
    NoPlaceholder(Vec<Token>),
}


impl Merged {
    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            Merged::Spliced(tokens) | Merged::NoPlaceholder(tokens) => tokens,
        }
    }
}


/// Splice `own` into `parent` at its first content placeholder.
pub fn merge_into_parent(mut parent: Vec<Token>, own: Vec<Token>) -> Merged {
    match parent.iter().position(Token::is_content_placeholder) {
        Some(index) => {
            parent.splice(index..=index, own);
            Merged::Spliced(parent)
        }
        None => Merged::NoPlaceholder(parent),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
