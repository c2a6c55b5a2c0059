//! Compiled grok expressions and field extraction.
//!
//! A [`CompiledMatcher`] owns the host regex compiled from an expanded grok
//! expression together with a per-group field table built once at compile
//! time. Extraction walks the capture groups in index order, skips groups
//! that did not participate or matched empty, and folds every group back
//! onto its dotted field name. When a field is captured by several groups
//! the later non-empty group wins.
//!
//! ## Example
//!
//! ```rust
//! use grok_engine::{CompiledMatcher, FieldValue, GrokConfig, PatternRegistry};
//!
//! let registry = PatternRegistry::new();
//! let matcher = CompiledMatcher::compile(
//!     &registry,
//!     "%{IPV4:destination.ip}:%{INT:destination.port:int}",
//!     true,
//!     &GrokConfig::default(),
//! )?;
//!
//! let fields = matcher.parse_typed("127.0.0.1:1234")?;
//! assert_eq!(fields["destination.port"], FieldValue::Int(1234));
//! assert_eq!(fields["destination.ip"], FieldValue::from("127.0.0.1"));
//! # Ok::<(), grok_engine::GrokError>(())
//! ```
//!
//! Matchers are cheap to clone and safe to share across threads; the batch
//! methods fan input out over the `rayon` pool.

#[cfg(feature = "metrics")]
pub mod metrics;
pub mod value;

use crate::config::GrokConfig;
use crate::error::Result;
use crate::expand::{self, ExpansionResult};
use crate::registry::PatternRegistry;
use rayon::prelude::*;
use regex::{bytes, Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use metrics::{MatchCounters, MatchMetrics};
use value::{FieldValue, TypeHint};

/// Field surfaced by one capture group.
#[derive(Debug, Clone)]
struct CaptureField {
    name: String,
    hint: Option<TypeHint>,
}

#[derive(Debug)]
struct Inner {
    expression: String,
    named_captures_only: bool,
    regex: Regex,
    bytes: bytes::Regex,
    /// Indexed by capture group; `None` for unnamed groups.
    fields: Vec<Option<CaptureField>>,
    #[cfg(feature = "metrics")]
    counters: MatchCounters,
}

/// A compiled grok expression.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    inner: Arc<Inner>,
}

impl CompiledMatcher {
    /// Expand `expression` against `registry` and compile the result.
    ///
    /// `config` supplies the expansion depth and regex size limit;
    /// `named_captures_only` selects whether bare `%{SYNTAX}` references
    /// become fields.
    pub fn compile(
        registry: &PatternRegistry,
        expression: &str,
        named_captures_only: bool,
        config: &GrokConfig,
    ) -> Result<Self> {
        let expansion = expand::expand(
            registry,
            expression,
            named_captures_only,
            config.max_expansion_depth,
        )?;
        Self::from_expansion(expression, named_captures_only, expansion, config.size_limit)
    }

    /// Compile an already expanded expression.
    pub fn from_expansion(
        expression: &str,
        named_captures_only: bool,
        expansion: ExpansionResult,
        size_limit: Option<usize>,
    ) -> Result<Self> {
        let mut builder = RegexBuilder::new(&expansion.source);
        let mut bytes_builder = bytes::RegexBuilder::new(&expansion.source);
        if let Some(limit) = size_limit {
            builder.size_limit(limit);
            bytes_builder.size_limit(limit);
        }
        let regex = builder.build()?;
        let bytes = bytes_builder.build()?;

        let fields = regex
            .capture_names()
            .map(|group| {
                group.map(|group| CaptureField {
                    name: expansion.field_name(group).into_owned(),
                    hint: expansion.type_hints.get(group).cloned(),
                })
            })
            .collect();

        Ok(Self {
            inner: Arc::new(Inner {
                expression: expression.to_string(),
                named_captures_only,
                regex,
                bytes,
                fields,
                #[cfg(feature = "metrics")]
                counters: MatchCounters::default(),
            }),
        })
    }

    /// The grok expression this matcher was compiled from.
    pub fn expression(&self) -> &str {
        &self.inner.expression
    }

    /// The expanded regular-expression source.
    pub fn source(&self) -> &str {
        self.inner.regex.as_str()
    }

    pub fn named_captures_only(&self) -> bool {
        self.inner.named_captures_only
    }

    /// Distinct field names in capture group order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for field in self.inner.fields.iter().flatten() {
            if !names.contains(&field.name.as_str()) {
                names.push(&field.name);
            }
        }
        names
    }

    /// Declared type of `field`, if any capture of it used the three-part form.
    pub fn type_hint(&self, field: &str) -> Option<&TypeHint> {
        self.inner
            .fields
            .iter()
            .flatten()
            .filter(|f| f.name == field)
            .filter_map(|f| f.hint.as_ref())
            .last()
    }

    /// Test whether the expression matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        let matched = self.inner.regex.is_match(text);
        self.record(matched);
        matched
    }

    pub fn is_match_bytes(&self, text: &[u8]) -> bool {
        let matched = self.inner.bytes.is_match(text);
        self.record(matched);
        matched
    }

    /// Extract raw text values. No match yields an empty map.
    ///
    /// Type hints are not consulted, so this never fails.
    pub fn parse_str(&self, text: &str) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        let Some(caps) = self.inner.regex.captures(text) else {
            self.record(false);
            return fields;
        };
        self.record(true);

        for (field, group) in self.inner.fields.iter().zip(caps.iter()) {
            if let (Some(field), Some(group)) = (field, group) {
                if !group.as_str().is_empty() {
                    fields.insert(field.name.clone(), group.as_str().to_string());
                }
            }
        }
        fields
    }

    /// Byte-oriented variant of [`CompiledMatcher::parse_str`].
    pub fn parse_bytes(&self, text: &[u8]) -> HashMap<String, Vec<u8>> {
        let mut fields = HashMap::new();
        let Some(caps) = self.inner.bytes.captures(text) else {
            self.record(false);
            return fields;
        };
        self.record(true);

        for (field, group) in self.inner.fields.iter().zip(caps.iter()) {
            if let (Some(field), Some(group)) = (field, group) {
                if !group.as_bytes().is_empty() {
                    fields.insert(field.name.clone(), group.as_bytes().to_vec());
                }
            }
        }
        fields
    }

    /// Extract values converted per their type hints.
    ///
    /// Only the winning group of each field is converted. The first failed
    /// conversion aborts the whole extraction.
    pub fn parse_typed(&self, text: &str) -> Result<HashMap<String, FieldValue>> {
        let Some(caps) = self.inner.regex.captures(text) else {
            self.record(false);
            return Ok(HashMap::new());
        };
        self.record(true);

        self.last_per_field(caps.iter().map(|group| group.map(|g| g.as_str())))
            .into_iter()
            .map(|(field, raw)| -> Result<(String, FieldValue)> {
                Ok((field.name.clone(), self.convert(field, raw)?))
            })
            .collect()
    }

    /// Byte-oriented variant of [`CompiledMatcher::parse_typed`].
    ///
    /// Values are decoded as UTF-8, replacing invalid sequences.
    pub fn parse_typed_bytes(&self, text: &[u8]) -> Result<HashMap<String, FieldValue>> {
        let Some(caps) = self.inner.bytes.captures(text) else {
            self.record(false);
            return Ok(HashMap::new());
        };
        self.record(true);

        self.last_per_field(caps.iter().map(|group| group.map(|g| g.as_bytes())))
            .into_iter()
            .map(|(field, raw)| -> Result<(String, FieldValue)> {
                let raw = String::from_utf8_lossy(raw);
                Ok((field.name.clone(), self.convert(field, &raw)?))
            })
            .collect()
    }

    /// Run [`CompiledMatcher::parse_str`] over `lines` in parallel.
    ///
    /// Results are returned in input order.
    pub fn parse_batch<S>(&self, lines: &[S]) -> Vec<HashMap<String, String>>
    where
        S: AsRef<str> + Sync,
    {
        lines
            .par_iter()
            .map(|line| self.parse_str(line.as_ref()))
            .collect()
    }

    /// Run [`CompiledMatcher::parse_typed`] over `lines` in parallel.
    pub fn parse_typed_batch<S>(&self, lines: &[S]) -> Vec<Result<HashMap<String, FieldValue>>>
    where
        S: AsRef<str> + Sync,
    {
        lines
            .par_iter()
            .map(|line| self.parse_typed(line.as_ref()))
            .collect()
    }

    /// The last non-empty group of each field, in order of the field's first
    /// capture group.
    fn last_per_field<'t, T>(
        &self,
        groups: impl Iterator<Item = Option<&'t T>>,
    ) -> Vec<(&CaptureField, &'t T)>
    where
        T: AsRef<[u8]> + ?Sized + 't,
    {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut winners: Vec<(&CaptureField, &'t T)> = Vec::new();
        for (field, group) in self.inner.fields.iter().zip(groups) {
            let (Some(field), Some(group)) = (field, group) else {
                continue;
            };
            if group.as_ref().is_empty() {
                continue;
            }
            match slots.get(field.name.as_str()) {
                Some(&slot) => winners[slot] = (field, group),
                None => {
                    slots.insert(&field.name, winners.len());
                    winners.push((field, group));
                }
            }
        }
        winners
    }

    fn convert(&self, field: &CaptureField, raw: &str) -> Result<FieldValue> {
        let Some(hint) = &field.hint else {
            return Ok(FieldValue::Text(raw.to_string()));
        };
        let converted = hint.convert(&field.name, raw);
        #[cfg(feature = "metrics")]
        {
            if converted.is_err() {
                self.inner.counters.record_conversion_failure();
            }
        }
        converted
    }

    #[inline]
    fn record(&self, _matched: bool) {
        #[cfg(feature = "metrics")]
        {
            self.inner.counters.record(_matched);
        }
    }

    /// Counters accumulated by this matcher and all of its clones.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> MatchMetrics {
        self.inner.counters.snapshot()
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) {
        self.inner.counters.reset();
    }
}
