//! Grok expression expansion.
//!
//! Expansion turns `%{SYNTAX}`, `%{SYNTAX:ID}` and `%{SYNTAX:ID:TYPE}` tokens
//! into plain regular-expression source. Definitions are resolved through a
//! [`PatternRegistry`] and expanded depth-first over an explicit frame
//! stack, so a cyclic definition set fails with the exact cycle instead of
//! being expanded forever.
//!
//! Capture names are encoded with [`naming::encode`]. The `regex` crate
//! rejects an expression that declares the same group name twice, so when
//! an expression captures one name more than once every repeat is emitted
//! under a unique alias and [`ExpansionResult::captures`] maps it back.

use crate::error::{GrokError, Result};
use crate::matcher::value::TypeHint;
use crate::naming;
use crate::registry::PatternRegistry;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%\{(\w+)(?::([\w+.]+)(?::(\w+))?)?\}").expect("token grammar is a valid regex")
});

/// Separator between an encoded capture name and its repeat counter.
const ALIAS_SEPARATOR: &str = "__";

/// Type hints keyed by capture group name.
pub type TypeHints = HashMap<String, TypeHint>;

/// One parsed `%{...}` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrokToken<'a> {
    pub syntax: &'a str,
    pub id: Option<&'a str>,
    pub type_hint: Option<&'a str>,
}

impl<'a> GrokToken<'a> {
    /// Parse a single token such as `%{NUMBER:n:int}`.
    ///
    /// ```rust
    /// use grok_engine::expand::GrokToken;
    ///
    /// let token = GrokToken::parse("%{NUMBER:destination.port:int}").unwrap();
    /// assert_eq!(token.syntax, "NUMBER");
    /// assert_eq!(token.id, Some("destination.port"));
    /// assert_eq!(token.type_hint, Some("int"));
    ///
    /// assert!(GrokToken::parse("%{NUMBER} trailing").is_none());
    /// ```
    pub fn parse(text: &'a str) -> Option<Self> {
        let caps = TOKEN.captures(text)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 || whole.end() != text.len() {
            return None;
        }
        Self::from_captures(&caps)
    }

    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            syntax: caps.get(1)?.as_str(),
            id: caps.get(2).map(|m| m.as_str()),
            type_hint: caps.get(3).map(|m| m.as_str()),
        })
    }

    /// Field name surfaced for this token, if any.
    ///
    /// The explicit id always wins. A bare token is surfaced under its
    /// syntax name unless named-captures-only mode is on.
    pub fn capture_name(&self, named_captures_only: bool) -> Option<&'a str> {
        match self.id {
            Some(id) => Some(id),
            None if named_captures_only => None,
            None => Some(self.syntax),
        }
    }
}

/// Every token in `text` with its byte range.
pub fn tokens(text: &str) -> impl Iterator<Item = (Range<usize>, GrokToken<'_>)> + '_ {
    TOKEN.captures_iter(text).filter_map(|caps| {
        let range = caps.get(0)?.range();
        GrokToken::from_captures(&caps).map(|token| (range, token))
    })
}

/// Output of expanding one grok expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionResult {
    /// Regular-expression source with no `%{...}` tokens left.
    pub source: String,

    /// Declared type for each capture group whose field used the three-part
    /// form. The last declaration of a field applies to all of its groups.
    pub type_hints: TypeHints,

    /// Field name (dots restored) for each capture group emitted by expansion.
    pub captures: HashMap<String, String>,
}

impl ExpansionResult {
    /// Field name for a capture group of the expanded source.
    ///
    /// Groups written directly in an expression body are not tracked by
    /// expansion; their names are decoded as-is.
    pub fn field_name<'a>(&'a self, group: &'a str) -> std::borrow::Cow<'a, str> {
        match self.captures.get(group) {
            Some(field) => std::borrow::Cow::Borrowed(field.as_str()),
            None => naming::decode(group),
        }
    }
}

/// Expand `expression` against `registry`.
///
/// ```rust
/// use grok_engine::{expand::expand, PatternRegistry};
///
/// let mut registry = PatternRegistry::isolated();
/// registry.define("A", r"\d+");
/// registry.define("B", "%{A:x}-%{A:y}");
///
/// let result = expand(&registry, "%{B}", true, 16)?;
/// assert_eq!(result.source, r"(?:(?P<x>\d+)-(?P<y>\d+))");
/// # Ok::<(), grok_engine::GrokError>(())
/// ```
pub fn expand(
    registry: &PatternRegistry,
    expression: &str,
    named_captures_only: bool,
    max_depth: usize,
) -> Result<ExpansionResult> {
    naming::ensure_placeholder()?;

    let mut expander = Expander {
        registry,
        named_captures_only,
        max_depth,
        used: HashSet::new(),
        field_hints: HashMap::new(),
        result: ExpansionResult::default(),
    };
    expander.result.source = expander.run(expression)?;
    expander.apply_field_hints();
    Ok(expander.result)
}

/// A body being expanded and how far into it expansion has got.
struct Frame<'r> {
    /// Pattern the body belongs to; `None` for the top-level expression.
    name: Option<&'r str>,
    text: &'r str,
    pos: usize,
}

struct Expander<'r> {
    registry: &'r PatternRegistry,
    named_captures_only: bool,
    max_depth: usize,
    /// Group names already emitted.
    used: HashSet<String>,
    /// Last declared type per field name.
    field_hints: HashMap<String, TypeHint>,
    result: ExpansionResult,
}

impl<'r> Expander<'r> {
    /// Expand with an explicit frame stack so nesting depth is bounded by
    /// `max_depth` rather than by the thread's stack size.
    fn run(&mut self, expression: &'r str) -> Result<String> {
        let mut out = String::with_capacity(expression.len());
        let mut frames = vec![Frame {
            name: None,
            text: expression,
            pos: 0,
        }];

        while let Some(frame) = frames.last_mut() {
            let (text, pos) = (frame.text, frame.pos);
            let next = TOKEN.captures_at(text, pos).and_then(|caps| {
                let range = caps.get(0)?.range();
                GrokToken::from_captures(&caps).map(|token| (range, token))
            });

            let Some((range, token)) = next else {
                out.push_str(&text[pos..]);
                if frames.pop().and_then(|done| done.name).is_some() {
                    out.push(')');
                }
                continue;
            };

            out.push_str(&text[pos..range.start]);
            frame.pos = range.end;

            let body = self.open(token, &frames, &mut out)?;
            frames.push(Frame {
                name: Some(token.syntax),
                text: body,
                pos: 0,
            });
        }
        Ok(out)
    }

    /// Check `token` against the frames being expanded, emit its opening
    /// group and return the body to expand next.
    fn open(
        &mut self,
        token: GrokToken<'r>,
        frames: &[Frame<'r>],
        out: &mut String,
    ) -> Result<&'r str> {
        let stack = frames.iter().filter_map(|frame| frame.name);
        if let Some(start) = stack.clone().position(|name| name == token.syntax) {
            let mut cycle: Vec<String> = stack.skip(start).map(str::to_string).collect();
            cycle.push(token.syntax.to_string());
            return Err(GrokError::CyclicPattern(cycle));
        }
        if frames.len().saturating_sub(1) >= self.max_depth {
            return Err(GrokError::ExpansionDepthExceeded(self.max_depth));
        }

        let registry = self.registry;
        let body = registry
            .lookup(token.syntax)
            .ok_or_else(|| GrokError::UnknownPattern(token.syntax.to_string()))?;

        match token.capture_name(self.named_captures_only) {
            None => out.push_str("(?:"),
            Some(field) => {
                if naming::is_reserved(field) {
                    return Err(GrokError::ReservedFieldName(field.to_string()));
                }
                let group = self.allocate(&naming::encode(field));
                if let Some(hint) = token.type_hint {
                    self.field_hints.insert(field.to_string(), TypeHint::parse(hint));
                }
                self.result.captures.insert(group.clone(), field.to_string());

                out.push_str("(?P<");
                out.push_str(&group);
                out.push('>');
            }
        }
        Ok(body)
    }

    /// A field's declared type applies to every group that captures it.
    fn apply_field_hints(&mut self) {
        for (group, field) in &self.result.captures {
            if let Some(hint) = self.field_hints.get(field) {
                self.result.type_hints.insert(group.clone(), hint.clone());
            }
        }
    }

    /// Reserve a group name, aliasing repeats as `name__2`, `name__3`, ...
    fn allocate(&mut self, encoded: &str) -> String {
        if self.used.insert(encoded.to_string()) {
            return encoded.to_string();
        }
        let mut n = 2;
        loop {
            let alias = format!("{encoded}{ALIAS_SEPARATOR}{n}");
            if self.used.insert(alias.clone()) {
                return alias;
            }
            n += 1;
        }
    }
}
