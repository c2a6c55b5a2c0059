//! # Grok Engine
//!
//! A Rust library for turning unstructured log lines into structured fields
//! with [grok](https://www.elastic.co/guide/en/logstash/current/plugins-filters-grok.html)
//! expressions: named, reusable regular-expression fragments composed with
//! `%{SYNTAX}`, `%{SYNTAX:ID}` and `%{SYNTAX:ID:TYPE}` references.
//!
//! ## Quick Start
//!
//! ### Basic Usage
//!
//! ```rust
//! use grok_engine::Grok;
//!
//! let mut grok = Grok::new();
//! grok.compile("%{IP:client.ip} %{WORD:http.method} %{URIPATHPARAM:url.original}", true)?;
//!
//! let fields = grok.parse_str("55.3.244.1 GET /index.html?page=2")?;
//! assert_eq!(fields["client.ip"], "55.3.244.1");
//! assert_eq!(fields["http.method"], "GET");
//! assert_eq!(fields["url.original"], "/index.html?page=2");
//! # Ok::<(), grok_engine::GrokError>(())
//! ```
//!
//! ### Typed Extraction
//!
//! ```rust
//! use grok_engine::{FieldValue, Grok};
//!
//! let mut grok = Grok::new();
//! grok.compile("%{NUMBER:duration:float}s %{INT:status:int} %{BOOL:cached:boolean}", true)?;
//!
//! let fields = grok.parse_typed("0.25s 200 true")?;
//! assert_eq!(fields["duration"], FieldValue::Float(0.25));
//! assert_eq!(fields["status"], FieldValue::Int(200));
//! assert_eq!(fields["cached"], FieldValue::Bool(true));
//! # Ok::<(), grok_engine::GrokError>(())
//! ```
//!
//! ### Custom Patterns
//!
//! ```rust
//! use grok_engine::{Grok, GrokConfig};
//!
//! let config = GrokConfig::isolated()
//!     .with_pattern("A", r"\d+")
//!     .with_pattern("B", "%{A:x}-%{A:y}");
//!
//! let mut grok = Grok::with_config(config);
//! grok.compile("%{B}", true)?;
//!
//! let fields = grok.parse_str("12-34")?;
//! assert_eq!(fields["x"], "12");
//! assert_eq!(fields["y"], "34");
//! # Ok::<(), grok_engine::GrokError>(())
//! ```
//!
//! ### Batch Processing
//!
//! ```rust
//! use grok_engine::Grok;
//!
//! let grok = Grok::new();
//! let matcher = grok.build_matcher("%{WORD:level} %{GREEDYDATA:message}", true)?;
//!
//! let lines = ["INFO started", "WARN disk almost full", "-"];
//! let results = matcher.parse_batch(&lines);
//! assert_eq!(results[1]["level"], "WARN");
//! assert!(results[2].is_empty());
//! # Ok::<(), grok_engine::GrokError>(())
//! ```

pub mod config;
pub mod error;
pub mod expand;
pub mod grok;
pub mod matcher;
pub mod naming;
pub mod patterns;
pub mod registry;

pub use config::GrokConfig;
pub use error::{GrokError, Result};
pub use expand::{ExpansionResult, GrokToken, TypeHints};
pub use grok::Grok;
pub use matcher::value::{FieldValue, TypeHint};
pub use matcher::CompiledMatcher;
pub use registry::PatternRegistry;

#[cfg(feature = "metrics")]
pub use matcher::metrics::MatchMetrics;
