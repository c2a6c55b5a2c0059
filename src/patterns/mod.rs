//! Built-in pattern tables.
//!
//! [`BASE`] is the default tier consulted by a [`PatternRegistry`](crate::PatternRegistry)
//! when default patterns are enabled. The remaining tables are opt-in
//! families meant to be layered on top of it:
//!
//! ```rust
//! use grok_engine::{patterns, Grok};
//!
//! let mut grok = Grok::with_patterns(patterns::REDIS.iter().copied());
//! grok.compile("%{REDISLOG}", true)?;
//! let fields = grok.parse_str("[1234] 26 Jun 12:34:56 *")?;
//! assert_eq!(fields["process.pid"], "1234");
//! # Ok::<(), grok_engine::GrokError>(())
//! ```
//!
//! Every body is written for the `regex` crate: no lookaround, no
//! backreferences, no atomic groups.

mod base;
mod httpd;
mod mongodb;
mod redis;
mod syslog;

pub use base::BASE;
pub use httpd::HTTPD;
pub use mongodb::MONGODB;
pub use redis::REDIS;
pub use syslog::SYSLOG;

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A named table of `(name, body)` definitions.
pub type PatternTable = &'static [(&'static str, &'static str)];

/// Opt-in families, keyed by a lowercase family name.
pub const FAMILIES: &[(&str, PatternTable)] = &[
    ("httpd", HTTPD),
    ("mongodb", MONGODB),
    ("redis", REDIS),
    ("syslog", SYSLOG),
];

static DEFAULTS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BASE.iter().copied().collect());

/// The default tier as a lookup table.
pub fn default_patterns() -> &'static HashMap<&'static str, &'static str> {
    &DEFAULTS
}

/// Look up a name in the default tier.
pub fn lookup_default(name: &str) -> Option<&'static str> {
    DEFAULTS.get(name).copied()
}

/// Look up an opt-in family by name (`"httpd"`, `"syslog"`, ...).
pub fn family(name: &str) -> Option<PatternTable> {
    FAMILIES
        .iter()
        .find(|(family, _)| family.eq_ignore_ascii_case(name))
        .map(|(_, table)| *table)
}
