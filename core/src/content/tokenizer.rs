//! Tokenizer — splits raw template text into text and `{{cms:...}}` tags.
//!
//! A tag signature is `{{`, optional whitespace, `cms:`, any run of
//! characters without braces, then `}}`. Inside it the tag class is the
//! leading run of alphabetic characters and the params are whatever follows,
//! trimmed. A signature without an alphabetic class is dropped from the
//! output entirely; anything that isn't a signature is text.

use crate::content::token::Token;
use crate::error::CmsResult;


/// Converts raw template text into tokens.
pub trait Tokenize {
    fn tokenize(&self, raw: &str) -> CmsResult<Vec<Token>>;
}


/// The built-in `{{cms:class params}}` tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmsTokenizer;


impl Tokenize for CmsTokenizer {
    fn tokenize(&self, raw: &str) -> CmsResult<Vec<Token>> {
        Ok(tokenize(raw))
    }
}


/// Tokenize a template. Adjacent text is merged into a single token.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = raw;

    while let Some(ch) = rest.chars().next() {
        if ch == '{' {
            if let Some(len) = signature_len(rest) {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                if let Some(tag) = parse_signature(&rest[..len]) {
                    tokens.push(tag);
                }
                rest = &rest[len..];
                continue;
            }
        }
        text.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    tokens
}


/// Byte length of the tag signature at the start of `s`, if there is one.
fn signature_len(s: &str) -> Option<usize> {
    let after_open = s.strip_prefix("{{")?;
    let trimmed = after_open.trim_start();
    let body = trimmed.strip_prefix("cms:")?;
    let close = body.find(&['{', '}'][..])?;
    if !body[close..].starts_with("}}") {
        return None;
    }
    let consumed_before_body = s.len() - body.len();
    Some(consumed_before_body + close + 2)
}


/// Parse a complete signature into a tag token.
fn parse_signature(signature: &str) -> Option<Token> {
    let inner = signature
        .strip_prefix("{{")?
        .strip_suffix("}}")?
        .trim_start()
        .strip_prefix("cms:")?;

    let class_len: usize = inner
        .chars()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    if class_len == 0 {
        return None;
    }

    Some(Token::Tag {
        tag_class: inner[..class_len].to_string(),
        tag_params: inner[class_len..].trim().to_string(),
        source: signature.to_string(),
    })
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
