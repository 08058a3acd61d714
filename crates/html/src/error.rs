//! Error types for tree construction
//!
//! Policy failures (unknown attribute, unsafe style value) never surface
//! here; they are filtered and logged. Only structural violations abort.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HtmlError>;

#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("Missing required field '{field}' in node structure")]
    MissingField { field: &'static str },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid tag name: '{tag}'")]
    InvalidTagName { tag: String },

    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    #[error("Self-closing tag '{tag}' cannot have children")]
    SelfClosingChildren { tag: String },

    #[error("Invalid child entry: expected object or string, got {kind}")]
    InvalidChild { kind: &'static str },
}
