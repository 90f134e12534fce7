//! Error types shared by the store, the write path, and the command layer.

use std::fmt;


/// One failed validation rule: the field name and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}


/// Every rule that failed during a single validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}


impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages recorded against one field, in the order they were added.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Distinct field names that failed, in first-failure order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for e in &self.errors {
            if !out.contains(&e.field) {
                out.push(e.field);
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}


impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}


impl std::error::Error for ValidationErrors {}


#[derive(Debug)]
pub enum CmsError {
    /// The record was rejected; nothing was written.
    Validation(ValidationErrors),
    NotFound { kind: &'static str, id: u64 },
    Tokenize(String),
    Io(std::io::Error),
    Parse(String),
    /// A loaded snapshot violates the tree invariants (cycle or cross-site parent).
    CorruptTree(String),
}


impl fmt::Display for CmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmsError::Validation(errors) => write!(f, "validation failed: {}", errors),
            CmsError::NotFound { kind, id } => write!(f, "{} {} not found", kind, id),
            CmsError::Tokenize(msg) => write!(f, "tokenize failed: {}", msg),
            CmsError::Io(err) => write!(f, "io error: {}", err),
            CmsError::Parse(msg) => write!(f, "parse error: {}", msg),
            CmsError::CorruptTree(msg) => write!(f, "corrupt layout tree: {}", msg),
        }
    }
}


impl std::error::Error for CmsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CmsError::Validation(errors) => Some(errors),
            CmsError::Io(err) => Some(err),
            _ => None,
        }
    }
}


impl From<ValidationErrors> for CmsError {
    fn from(errors: ValidationErrors) -> Self {
        CmsError::Validation(errors)
    }
}


impl From<std::io::Error> for CmsError {
    fn from(err: std::io::Error) -> Self {
        CmsError::Io(err)
    }
}


impl From<serde_json::Error> for CmsError {
    fn from(err: serde_json::Error) -> Self {
        CmsError::Parse(err.to_string())
    }
}


impl From<serde_yaml::Error> for CmsError {
    fn from(err: serde_yaml::Error) -> Self {
        CmsError::Parse(err.to_string())
    }
}


pub type CmsResult<T> = Result<T, CmsError>;
