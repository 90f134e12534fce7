//! Layout defaults and validation rules.
//!
//! `assign_label` runs first so that a blank label never fails validation
//! when an identifier is present.

use crate::data::repo::{LayoutRepo, SiteRepo};
use crate::error::ValidationErrors;
use crate::layout::tree;
use crate::types::layout::Layout;


/// Fill a blank label from the identifier (`default_layout` -> `Default Layout`).
pub fn assign_label(layout: &mut Layout) {
    if layout.label.trim().is_empty() {
        layout.label = titleize(&layout.identifier);
    }
}


/// Split on `_`, `-`, whitespace and lower-to-upper case boundaries, then
/// capitalise each word.
pub fn titleize(s: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in s.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = ch.is_uppercase()
            && prev.map_or(false, |p| p.is_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}


/// `^[A-Za-z_][A-Za-z0-9_-]*$`
pub fn identifier_is_valid(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}


/// Append every failing rule for `layout` to `errors`.
pub fn check<S: SiteRepo + LayoutRepo + ?Sized>(store: &S, layout: &Layout, errors: &mut ValidationErrors) {
    if errors.on("site_id").is_empty() && store.site(layout.site_id).is_none() {
        errors.add("site_id", "must exist");
    }

    if layout.label.trim().is_empty() {
        errors.add("label", "can't be blank");
    }

    if layout.identifier.trim().is_empty() {
        errors.add("identifier", "can't be blank");
    } else {
        if !identifier_is_valid(&layout.identifier) {
            errors.add("identifier", "is invalid");
        }
        if store.identifier_taken(layout.site_id, &layout.identifier, Some(layout.id)) {
            errors.add("identifier", "has already been taken");
        }
    }

    tree::check_parent(store, layout, errors);
}


pub fn validate<S: SiteRepo + LayoutRepo + ?Sized>(store: &S, layout: &Layout) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check(store, layout, &mut errors);
    errors.into_result()
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::{add_layout, store_with_site};

    fn candidate(site_id: u64, identifier: &str, label: &str) -> Layout {
        Layout {
            id: 0,
            site_id,
            parent_id: None,
            label: label.into(),
            identifier: identifier.into(),
            content: String::new(),
            css: String::new(),
            js: String::new(),
            position: 0,
            created_at_ms: 0,
            updated_at_ms: 0,
        }
    }

    #[test]
    fn titleize_variants() {
        assert_eq!(titleize("default_layout"), "Default Layout");
        assert_eq!(titleize("my-layout"), "My Layout");
        assert_eq!(titleize("defaultLayout"), "Default Layout");
        assert_eq!(titleize("HTML"), "Html");
        assert_eq!(titleize("_nested__name_"), "Nested Name");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn assign_label_only_when_blank() {
        let mut layout = candidate(1, "blog_post", "");
        assign_label(&mut layout);
        assert_eq!(layout.label, "Blog Post");

        let mut layout = candidate(1, "blog_post", "Custom");
        assign_label(&mut layout);
        assert_eq!(layout.label, "Custom");
    }

    #[test]
    fn identifier_format() {
        assert!(identifier_is_valid("default"));
        assert!(identifier_is_valid("_private"));
        assert!(identifier_is_valid("Main-Layout_2"));
        assert!(!identifier_is_valid("2col"));
        assert!(!identifier_is_valid("-dash"));
        assert!(!identifier_is_valid("has space"));
        assert!(!identifier_is_valid("dot.ted"));
        assert!(!identifier_is_valid(""));
    }

    #[test]
    fn valid_layout_passes() {
        let (store, site) = store_with_site();
        assert!(validate(&store, &candidate(site, "default", "Default")).is_ok());
    }

    #[test]
    fn blank_fields_reported() {
        let (store, site) = store_with_site();
        let errors = validate(&store, &candidate(site, "", "")).unwrap_err();
        assert_eq!(errors.on("label"), vec!["can't be blank"]);
        assert_eq!(errors.on("identifier"), vec!["can't be blank"]);
    }

    #[test]
    fn unknown_site_reported() {
        let (store, site) = store_with_site();
        let errors = validate(&store, &candidate(site + 50, "default", "Default")).unwrap_err();
        assert_eq!(errors.fields(), vec!["site_id"]);
    }

    #[test]
    fn malformed_identifier() {
        let (store, site) = store_with_site();
        let errors = validate(&store, &candidate(site, "not valid", "X")).unwrap_err();
        assert_eq!(errors.on("identifier"), vec!["is invalid"]);
    }

    #[test]
    fn duplicate_identifier_in_site() {
        let (mut store, site) = store_with_site();
        let existing = add_layout(&mut store, site, None, "Default", "");
        let errors = validate(&store, &candidate(site, "default", "Again")).unwrap_err();
        assert_eq!(errors.on("identifier"), vec!["has already been taken"]);

        // The existing record doesn't collide with itself.
        assert!(validate(&store, &existing).is_ok());
    }
}
