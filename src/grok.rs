//! The grok instance: a pattern registry plus at most one active matcher.

use crate::config::GrokConfig;
use crate::error::{GrokError, Result};
use crate::matcher::value::FieldValue;
use crate::matcher::CompiledMatcher;
use crate::registry::PatternRegistry;
use std::collections::HashMap;

/// Grok pattern engine.
///
/// A `Grok` owns its [`PatternRegistry`] and the matcher installed by the
/// last successful [`Grok::compile`]. A failed compile leaves the previous
/// matcher in place.
///
/// Registering patterns and compiling take `&mut self`; matching and
/// extraction take `&self`. Sharing one instance between threads that also
/// mutate it needs external synchronization (a `RwLock`, for example).
/// For lock-free fan-out, hand each thread a clone of
/// [`Grok::matcher`] or a matcher built with [`Grok::build_matcher`].
///
/// # Examples
///
/// ```rust
/// use grok_engine::Grok;
///
/// let mut grok = Grok::new();
/// grok.add_pattern("NGINX_HOST", "(?:%{IP:destination.ip}|%{NGINX_NOTSEPARATOR:destination.domain})(:%{NUMBER:destination.port})?");
/// grok.add_pattern("NGINX_NOTSEPARATOR", r#""[^\t ,:]+""#);
/// grok.compile("%{NGINX_HOST}", true)?;
///
/// let fields = grok.parse_str("127.0.0.1:1234")?;
/// assert_eq!(fields["destination.ip"], "127.0.0.1");
/// assert_eq!(fields["destination.port"], "1234");
/// assert_eq!(fields.len(), 2);
/// # Ok::<(), grok_engine::GrokError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grok {
    registry: PatternRegistry,
    config: GrokConfig,
    matcher: Option<CompiledMatcher>,
}

impl Default for Grok {
    fn default() -> Self {
        Self::new()
    }
}

impl Grok {
    /// Create an instance backed by the built-in patterns.
    pub fn new() -> Self {
        Self::with_config(GrokConfig::default())
    }

    /// Create an instance that only knows user-registered patterns.
    pub fn without_default_patterns() -> Self {
        Self::with_config(GrokConfig::isolated())
    }

    /// Create an instance backed by the built-in patterns plus `patterns`.
    ///
    /// ```rust
    /// use grok_engine::{patterns, Grok};
    ///
    /// let grok = Grok::with_patterns(patterns::HTTPD.iter().copied());
    /// assert!(grok.registry().contains("COMBINEDAPACHELOG"));
    /// assert!(grok.registry().contains("IPORHOST"));
    /// ```
    pub fn with_patterns<I, K, V>(patterns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut grok = Self::new();
        grok.add_patterns(patterns);
        grok
    }

    /// Create an instance from a [`GrokConfig`].
    pub fn with_config(config: GrokConfig) -> Self {
        Self {
            registry: PatternRegistry::from_config(&config),
            config,
            matcher: None,
        }
    }

    pub fn config(&self) -> &GrokConfig {
        &self.config
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Mutable access for bulk loading (pattern files, YAML, JSON).
    ///
    /// Changes only affect later compiles; the active matcher is untouched.
    pub fn registry_mut(&mut self) -> &mut PatternRegistry {
        &mut self.registry
    }

    /// Register or overwrite a pattern definition.
    pub fn add_pattern(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.registry.define(name, body);
    }

    /// Register or overwrite several pattern definitions.
    pub fn add_patterns<I, K, V>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.registry.define_all(patterns);
    }

    /// Compile `expression` and install it as the active matcher.
    ///
    /// With `named_captures_only` set, bare `%{SYNTAX}` references still
    /// match but do not produce fields.
    pub fn compile(&mut self, expression: &str, named_captures_only: bool) -> Result<()> {
        let matcher = self.build_matcher(expression, named_captures_only)?;
        self.matcher = Some(matcher);
        Ok(())
    }

    /// Compile using the mode stored in the instance's [`GrokConfig`].
    pub fn compile_with_config(&mut self, expression: &str) -> Result<()> {
        self.compile(expression, self.config.named_captures_only)
    }

    /// Compile `expression` without installing it.
    pub fn build_matcher(
        &self,
        expression: &str,
        named_captures_only: bool,
    ) -> Result<CompiledMatcher> {
        CompiledMatcher::compile(&self.registry, expression, named_captures_only, &self.config)
    }

    /// The active matcher, if an expression has been compiled.
    pub fn matcher(&self) -> Option<&CompiledMatcher> {
        self.matcher.as_ref()
    }

    /// Whether the active expression matches `text`. False when nothing
    /// has been compiled.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.as_ref().map_or(false, |m| m.is_match(text))
    }

    pub fn is_match_bytes(&self, text: &[u8]) -> bool {
        self.matcher.as_ref().map_or(false, |m| m.is_match_bytes(text))
    }

    /// Extract raw text fields. No match yields an empty map.
    pub fn parse_str(&self, text: &str) -> Result<HashMap<String, String>> {
        Ok(self.active()?.parse_str(text))
    }

    /// Extract raw byte fields. No match yields an empty map.
    pub fn parse_bytes(&self, text: &[u8]) -> Result<HashMap<String, Vec<u8>>> {
        Ok(self.active()?.parse_bytes(text))
    }

    /// Extract fields converted per their `%{SYNTAX:ID:TYPE}` hints.
    ///
    /// ```rust
    /// use grok_engine::{FieldValue, Grok};
    ///
    /// let mut grok = Grok::new();
    /// grok.compile("%{NUMBER:n:int}", true)?;
    /// assert_eq!(grok.parse_typed("42")?["n"], FieldValue::Int(42));
    /// # Ok::<(), grok_engine::GrokError>(())
    /// ```
    pub fn parse_typed(&self, text: &str) -> Result<HashMap<String, FieldValue>> {
        self.active()?.parse_typed(text)
    }

    pub fn parse_typed_bytes(&self, text: &[u8]) -> Result<HashMap<String, FieldValue>> {
        self.active()?.parse_typed_bytes(text)
    }

    fn active(&self) -> Result<&CompiledMatcher> {
        self.matcher.as_ref().ok_or(GrokError::NotCompiled)
    }
}
