//! Capture name encoding for hierarchical field names.
//!
//! Grok field names are frequently dotted (`destination.port`,
//! `http.request.method`). Every dot is replaced by [`DOT_PLACEHOLDER`] before
//! the name becomes a capture group identifier, and the placeholder is turned
//! back into a dot before the value reaches the caller.
//!
//! The placeholder is built from identifier characters so the host engine
//! always accepts it. To keep the mapping reversible, a target name whose
//! encoding does not decode back to itself is rejected during expansion (see
//! [`is_reserved`]). That covers names containing the placeholder and names
//! with an underscore next to a dot (`user_.name` encodes to `user____name`).

use crate::error::{GrokError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Stand-in for `.` inside capture group identifiers.
pub const DOT_PLACEHOLDER: &str = "___";

static PLACEHOLDER_CHECK: Lazy<Result<()>> = Lazy::new(|| validate_placeholder(DOT_PLACEHOLDER));

/// Encode a field name into a capture group identifier.
///
/// ```rust
/// use grok_engine::naming::{decode, encode};
///
/// assert_eq!(encode("destination.port"), "destination___port");
/// assert_eq!(decode(&encode("destination.port")), "destination.port");
/// assert_eq!(encode("plain"), "plain");
/// ```
pub fn encode(name: &str) -> Cow<'_, str> {
    if name.contains('.') {
        Cow::Owned(name.replace('.', DOT_PLACEHOLDER))
    } else {
        Cow::Borrowed(name)
    }
}

/// Restore the dotted field name from a capture group identifier.
pub fn decode(name: &str) -> Cow<'_, str> {
    if name.contains(DOT_PLACEHOLDER) {
        Cow::Owned(name.replace(DOT_PLACEHOLDER, "."))
    } else {
        Cow::Borrowed(name)
    }
}

/// True when `name` cannot be encoded without losing information on decode.
///
/// ```rust
/// use grok_engine::naming::is_reserved;
///
/// assert!(is_reserved("a___b"));
/// assert!(is_reserved("user_.name"));
/// assert!(!is_reserved("user_agent.original"));
/// ```
pub fn is_reserved(name: &str) -> bool {
    decode(&encode(name)) != name
}

/// Check a placeholder against the host engine's capture name syntax.
///
/// A usable placeholder is non-empty, contains no dot, and yields a valid
/// group name when embedded between two identifier characters.
pub fn validate_placeholder(placeholder: &str) -> Result<()> {
    if placeholder.is_empty() || placeholder.contains('.') {
        return Err(GrokError::InvalidPlaceholder(placeholder.to_string()));
    }

    let expected = format!("a{placeholder}b");
    let accepted = Regex::new(&format!("(?P<{expected}>)"))
        .map(|re| re.capture_names().flatten().any(|name| name == expected))
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(GrokError::InvalidPlaceholder(placeholder.to_string()))
    }
}

/// Validate [`DOT_PLACEHOLDER`] once per process.
pub(crate) fn ensure_placeholder() -> Result<()> {
    PLACEHOLDER_CHECK.clone()
}
