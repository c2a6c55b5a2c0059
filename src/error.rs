//! Error types for the grok engine.
//!
//! Errors fall into two groups. Compile-time errors (unknown or cyclic pattern
//! references, invalid expanded expressions) are configuration errors and are
//! surfaced once by [`Grok::compile`](crate::Grok::compile). Extraction-time
//! errors (type hints and conversions) are per-input data errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrokError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrokError {
    /// A `%{SYNTAX}` reference did not resolve against the registry.
    #[error("pattern definition \"{0}\" unknown")]
    UnknownPattern(String),

    /// Pattern definitions reference each other in a loop.
    #[error("cyclic pattern definition: {}", .0.join(" -> "))]
    CyclicPattern(Vec<String>),

    #[error("pattern expansion exceeded the maximum depth of {0}")]
    ExpansionDepthExceeded(usize),

    /// A capture name that would not survive the dot placeholder encoding.
    #[error(
        "field name \"{0}\" cannot be encoded with the dot placeholder \"{placeholder}\"",
        placeholder = crate::naming::DOT_PLACEHOLDER
    )]
    ReservedFieldName(String),

    #[error("invalid dot placeholder \"{0}\"")]
    InvalidPlaceholder(String),

    /// The host regex engine rejected the expanded expression.
    #[error("invalid expanded expression: {0}")]
    InvalidExpression(String),

    #[error("no expression has been compiled")]
    NotCompiled,

    #[error("invalid type for {field}: type \"{hint}\" not provided")]
    TypeNotProvided { field: String, hint: String },

    #[error("cannot convert {field} value \"{value}\" to {hint}: {reason}")]
    Conversion {
        field: String,
        hint: String,
        value: String,
        reason: String,
    },

    #[error("invalid pattern definition on line {line}: {content}")]
    InvalidPatternDefinition { line: usize, content: String },

    #[error("IO error: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl GrokError {
    /// True for errors raised while building a matcher rather than while
    /// extracting fields from an input line.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            GrokError::UnknownPattern(_)
                | GrokError::CyclicPattern(_)
                | GrokError::ExpansionDepthExceeded(_)
                | GrokError::ReservedFieldName(_)
                | GrokError::InvalidPlaceholder(_)
                | GrokError::InvalidExpression(_)
        )
    }
}

impl From<std::io::Error> for GrokError {
    fn from(err: std::io::Error) -> Self {
        GrokError::IoError(err.to_string())
    }
}

impl From<regex::Error> for GrokError {
    fn from(err: regex::Error) -> Self {
        GrokError::InvalidExpression(err.to_string())
    }
}

impl From<serde_yaml::Error> for GrokError {
    fn from(err: serde_yaml::Error) -> Self {
        GrokError::YamlError(err.to_string())
    }
}

impl From<serde_json::Error> for GrokError {
    fn from(err: serde_json::Error) -> Self {
        GrokError::JsonError(err.to_string())
    }
}
