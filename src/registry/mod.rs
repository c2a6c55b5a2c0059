//! Named pattern definitions.
//!
//! This module provides [`PatternRegistry`], the two-tier store every grok
//! expression is expanded against. User definitions always shadow the
//! built-in tier, and the built-in tier can be switched off per registry.

pub mod graph;

use crate::config::GrokConfig;
use crate::error::{GrokError, Result};
use crate::patterns;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Store of pattern definitions for one grok instance.
///
/// Bodies are kept verbatim; nothing is validated on insertion. Unknown
/// references and malformed bodies surface when an expression is compiled,
/// or earlier through [`PatternRegistry::validate`].
///
/// # Examples
///
/// ```rust
/// use grok_engine::PatternRegistry;
///
/// let mut registry = PatternRegistry::new();
/// registry.define("NGINX_PORT", "%{INT}");
///
/// // User tier first, then the built-in tier.
/// assert_eq!(registry.lookup("NGINX_PORT"), Some("%{INT}"));
/// assert!(registry.lookup("IPV4").is_some());
/// assert!(registry.lookup("NOT_A_REAL_PATTERN").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: HashMap<String, String>,
    use_default_patterns: bool,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRegistry {
    /// Create a registry that falls back to the built-in pattern tier.
    pub fn new() -> Self {
        Self::with_default_patterns(true)
    }

    /// Create a registry that only knows user definitions.
    ///
    /// ```rust
    /// use grok_engine::PatternRegistry;
    ///
    /// let registry = PatternRegistry::isolated();
    /// assert!(registry.lookup("WORD").is_none());
    /// assert!(!registry.uses_default_patterns());
    /// ```
    pub fn isolated() -> Self {
        Self::with_default_patterns(false)
    }

    pub fn with_default_patterns(use_default_patterns: bool) -> Self {
        Self {
            patterns: HashMap::new(),
            use_default_patterns,
        }
    }

    /// Build a registry from a [`GrokConfig`], installing its definitions.
    pub fn from_config(config: &GrokConfig) -> Self {
        let mut registry = Self::with_default_patterns(config.use_default_patterns);
        registry.define_all(config.patterns.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        registry
    }

    /// Insert or overwrite a definition. Returns the previous user body.
    ///
    /// ```rust
    /// use grok_engine::PatternRegistry;
    ///
    /// let mut registry = PatternRegistry::isolated();
    /// assert_eq!(registry.define("A", "first"), None);
    /// assert_eq!(registry.define("A", "second"), Some("first".to_string()));
    /// assert_eq!(registry.lookup("A"), Some("second"));
    /// ```
    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) -> Option<String> {
        self.patterns.insert(name.into(), body.into())
    }

    /// Insert or overwrite several definitions.
    pub fn define_all<I, K, V>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.patterns.extend(
            definitions
                .into_iter()
                .map(|(name, body)| (name.into(), body.into())),
        );
    }

    /// Resolve a name against the user tier, then the built-in tier if enabled.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match self.patterns.get(name) {
            Some(body) => Some(body.as_str()),
            None if self.use_default_patterns => patterns::lookup_default(name),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Remove a user definition. A shadowed built-in body becomes visible again.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.patterns.remove(name)
    }

    /// Number of user definitions.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// User-defined names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn uses_default_patterns(&self) -> bool {
        self.use_default_patterns
    }

    /// Load definitions in the conventional pattern-file format.
    ///
    /// Each non-blank line holds a name, whitespace, then the body. Lines
    /// starting with `#` are comments. Returns the number of definitions read.
    ///
    /// ```rust
    /// use grok_engine::PatternRegistry;
    ///
    /// let mut registry = PatternRegistry::isolated();
    /// let loaded = registry.load_pattern_text(
    ///     "# ports\nPORT \\d+\nHOSTPORT %{HOST}:%{PORT}\n\nHOST [a-z]+\n",
    /// )?;
    /// assert_eq!(loaded, 3);
    /// assert_eq!(registry.lookup("PORT"), Some(r"\d+"));
    /// # Ok::<(), grok_engine::GrokError>(())
    /// ```
    pub fn load_pattern_text(&mut self, text: &str) -> Result<usize> {
        let mut definitions = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let invalid = || GrokError::InvalidPatternDefinition {
                line: index + 1,
                content: line.to_string(),
            };

            let (name, body) = trimmed.split_once(char::is_whitespace).ok_or_else(invalid)?;
            let body = body.trim_start();
            if body.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid());
            }
            definitions.push((name, body));
        }

        let loaded = definitions.len();
        self.define_all(definitions);
        Ok(loaded)
    }

    /// Load a pattern file from disk. See [`PatternRegistry::load_pattern_text`].
    pub fn load_pattern_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let text = std::fs::read_to_string(path)?;
        self.load_pattern_text(&text)
    }

    /// Load definitions from a YAML mapping of name to body.
    ///
    /// ```rust
    /// use grok_engine::PatternRegistry;
    ///
    /// let mut registry = PatternRegistry::isolated();
    /// registry.load_yaml("NGINX_HOST: '%{IPV4:destination.ip}'\nIPV4: '[0-9.]+'\n")?;
    /// assert_eq!(registry.len(), 2);
    /// # Ok::<(), grok_engine::GrokError>(())
    /// ```
    pub fn load_yaml(&mut self, yaml: &str) -> Result<usize> {
        let definitions: BTreeMap<String, String> = serde_yaml::from_str(yaml)?;
        let loaded = definitions.len();
        self.define_all(definitions);
        Ok(loaded)
    }

    /// Load definitions from a JSON object of name to body.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let definitions: BTreeMap<String, String> = serde_json::from_str(json)?;
        let loaded = definitions.len();
        self.define_all(definitions);
        Ok(loaded)
    }

    /// Check that every user definition resolves and that no definitions
    /// reference each other in a loop.
    ///
    /// Names are visited in sorted order so the reported error is stable.
    ///
    /// ```rust
    /// use grok_engine::{GrokError, PatternRegistry};
    ///
    /// let mut registry = PatternRegistry::isolated();
    /// registry.define("A", "%{B}");
    /// registry.define("B", "%{A}");
    /// assert_eq!(
    ///     registry.validate(),
    ///     Err(GrokError::CyclicPattern(vec!["A".into(), "B".into(), "A".into()]))
    /// );
    /// ```
    pub fn validate(&self) -> Result<()> {
        graph::check(self, self.names())
    }
}
