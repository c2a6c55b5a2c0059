//! Configuration for grok instances.
//!
//! [`GrokConfig`] gathers the construction-time choices of a [`Grok`](crate::Grok)
//! instance: whether the built-in pattern tier is consulted, the default
//! named-captures-only mode, expansion limits and extra pattern definitions.
//! It can be built in code or loaded from YAML/JSON.
//!
//! # Examples
//!
//! ```rust
//! use grok_engine::GrokConfig;
//!
//! let config = GrokConfig::isolated()
//!     .with_pattern("NUM", r"\d+")
//!     .with_named_captures_only(false);
//!
//! assert!(!config.use_default_patterns);
//! assert_eq!(config.patterns.len(), 1);
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default ceiling on nested pattern references.
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 1000;

/// Settings for a [`Grok`](crate::Grok) instance.
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `use_default_patterns` | `true` | Fall back to the built-in pattern table on lookup |
/// | `named_captures_only` | `true` | Bare `%{SYNTAX}` references are not surfaced as fields |
/// | `max_expansion_depth` | `1000` | Maximum nesting of pattern references |
/// | `size_limit` | `None` | Compiled size limit forwarded to the regex engine |
/// | `patterns` | empty | Extra definitions installed at construction |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrokConfig {
    /// Consult the built-in pattern tier when a name is not user-defined.
    pub use_default_patterns: bool,

    /// Mode used by [`Grok::compile_with_config`](crate::Grok::compile_with_config).
    pub named_captures_only: bool,

    /// Maximum nesting depth of `%{...}` references.
    pub max_expansion_depth: usize,

    /// Optional compiled-size limit in bytes for the regex engine.
    pub size_limit: Option<usize>,

    /// User pattern definitions, keyed by pattern name.
    pub patterns: BTreeMap<String, String>,
}

impl Default for GrokConfig {
    fn default() -> Self {
        Self {
            use_default_patterns: true,
            named_captures_only: true,
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            size_limit: None,
            patterns: BTreeMap::new(),
        }
    }
}

impl GrokConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration without the built-in pattern tier.
    ///
    /// Useful for tests and for pipelines that ship their own complete
    /// pattern library.
    pub fn isolated() -> Self {
        Self {
            use_default_patterns: false,
            ..Self::default()
        }
    }

    /// Configuration that surfaces every referenced pattern as a field.
    pub fn permissive() -> Self {
        Self {
            named_captures_only: false,
            ..Self::default()
        }
    }

    /// Load a configuration from YAML.
    ///
    /// ```rust
    /// use grok_engine::GrokConfig;
    ///
    /// let config = GrokConfig::from_yaml(r#"
    /// use_default_patterns: false
    /// patterns:
    ///   NGINX_NOTSEPARATOR: '"[^\t ,:]+"'
    /// "#)?;
    /// assert!(config.patterns.contains_key("NGINX_NOTSEPARATOR"));
    /// assert!(config.named_captures_only);
    /// # Ok::<(), grok_engine::GrokError>(())
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_default_patterns(mut self, enable: bool) -> Self {
        self.use_default_patterns = enable;
        self
    }

    pub fn with_named_captures_only(mut self, enable: bool) -> Self {
        self.named_captures_only = enable;
        self
    }

    pub fn with_max_expansion_depth(mut self, depth: usize) -> Self {
        self.max_expansion_depth = depth;
        self
    }

    pub fn with_size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    /// Add a single pattern definition, replacing any previous body.
    pub fn with_pattern(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.patterns.insert(name.into(), body.into());
        self
    }

    /// Add several pattern definitions, replacing previous bodies.
    pub fn with_patterns<I, K, V>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.patterns
            .extend(patterns.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}
