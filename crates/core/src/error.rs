//! Error types for pdfrsrc resource resolution.

use thiserror::Error;

/// Primary error type for resource loading and lookup.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The document is structurally invalid for the requested resource.
    #[error("format error: {0}")]
    FormatError(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{category} resource not found: {name}")]
    ResourceNotFound {
        category: &'static str,
        name: String,
    },

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("PDF object not found: {0}")]
    ObjectNotFound(u32),

    #[error("PDF syntax error: {0}")]
    SyntaxError(String),

    #[error("font error: {0}")]
    FontError(String),
}

impl PdfError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::FormatError(msg.into())
    }

    pub(crate) fn not_found(category: &'static str, name: &str) -> Self {
        Self::ResourceNotFound {
            category,
            name: name.to_string(),
        }
    }
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
