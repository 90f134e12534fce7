use serde::{Deserialize, Serialize};

use crate::content::tag::TagKind;


/// One unit of tokenized template content.
///
/// Serializes untagged: text becomes a JSON string, a tag becomes
/// `{"tag_class": .., "tag_params": .., "source": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Token {
    Text(String),
    Tag {
        tag_class: String,
        tag_params: String,
        /// The tag exactly as written, e.g. `{{ cms:text title }}`.
        #[serde(default)]
        source: String,
    },
}


impl Token {
    pub fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    /// Build a tag token, synthesising `source` from class and params.
    pub fn tag(tag_class: &str, tag_params: &str) -> Token {
        let source = if tag_params.is_empty() {
            format!("{{{{cms:{}}}}}", tag_class)
        } else {
            format!("{{{{cms:{} {}}}}}", tag_class, tag_params)
        };
        Token::Tag {
            tag_class: tag_class.to_string(),
            tag_params: tag_params.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> Option<TagKind> {
        match self {
            Token::Text(_) => None,
            Token::Tag { tag_class, .. } => Some(TagKind::from_name(tag_class)),
        }
    }

    /// First whitespace-delimited tag parameter, if this is a tag with any.
    pub fn first_param(&self) -> Option<&str> {
        match self {
            Token::Text(_) => None,
            Token::Tag { tag_params, .. } => tag_params.split_whitespace().next(),
        }
    }

    /// True for a fragment-family tag whose first parameter is `content`.
    pub fn is_content_placeholder(&self) -> bool {
        match self {
            Token::Text(_) => false,
            Token::Tag { tag_class, tag_params, .. } => {
                TagKind::from_name(tag_class).is_fragment_content_placeholder(tag_params)
            }
        }
    }

    /// The original template text this token came from.
    pub fn source(&self) -> &str {
        match self {
            Token::Text(s) => s,
            Token::Tag { source, .. } => source,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_source_is_synthesised() {
        assert_eq!(Token::tag("wysiwyg", "content").source(), "{{cms:wysiwyg content}}");
        assert_eq!(Token::tag("helper", "").source(), "{{cms:helper}}");
    }

    #[test]
    fn first_param_splits_on_whitespace() {
        let token = Token::tag("text", "content  render: false");
        assert_eq!(token.first_param(), Some("content"));
        assert_eq!(Token::text("content").first_param(), None);
        assert_eq!(Token::tag("helper", "").first_param(), None);
    }

    #[test]
    fn content_placeholder_requires_fragment_kind() {
        assert!(Token::tag("wysiwyg", "content").is_content_placeholder());
        assert!(Token::tag("markdown", "content render: false").is_content_placeholder());
        assert!(!Token::tag("snippet", "content").is_content_placeholder());
        assert!(!Token::tag("wysiwyg", "header").is_content_placeholder());
        assert!(!Token::text("{{cms:wysiwyg content}}").is_content_placeholder());
    }

    #[test]
    fn serializes_untagged() {
        let tokens = vec![Token::text("<p>"), Token::tag("text", "title")];
        let json = serde_json::to_value(&tokens).unwrap();
        assert_eq!(json[0], "<p>");
        assert_eq!(json[1]["tag_class"], "text");
        assert_eq!(json[1]["tag_params"], "title");
        let back: Vec<Token> = serde_json::from_value(json).unwrap();
        assert_eq!(back, tokens);
    }
}
