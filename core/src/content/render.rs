//! Renderer — turns a resolved token list into page output.
//!
//! Fragment tags are filled from the page's fragments, keyed by the tag's
//! first parameter. Snippets, partials, helpers, assets and unknown tags have
//! no backing data here and render empty.

use std::collections::BTreeMap;

use crate::content::token::Token;


pub fn render(tokens: &[Token], fragments: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Tag { .. } => {
                let is_fragment = token.kind().map(|k| k.is_fragment()).unwrap_or(false);
                if !is_fragment {
                    continue;
                }
                if let Some(value) = token.first_param().and_then(|id| fragments.get(id)) {
                    out.push_str(value);
                }
            }
        }
    }
    out
}
