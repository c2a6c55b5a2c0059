//! Shared fixtures for the grok engine benchmarks.

#![allow(dead_code)]

use grok_engine::{patterns, CompiledMatcher, Grok};

/// Apache access-log expression used by the single-line benchmarks.
pub const ACCESS_LOG_EXPRESSION: &str = r#"%{IPORHOST:clientip} %{USER:ident} %{USER:auth} \[%{HTTPDATE:timestamp}\] "(?:%{WORD:verb} %{NOTSPACE:request}(?: HTTP/%{NUMBER:httpversion})?|%{DATA:rawrequest})" %{NUMBER:response} (?:%{NUMBER:bytes}|-)"#;

pub const ACCESS_LOG_LINE: &str =
    r#"127.0.0.1 - - [23/Apr/2014:22:58:32 +0200] "GET /index.php HTTP/1.1" 404 207"#;

/// The same expression written out by hand, for comparison with the
/// underlying regex engine.
pub const ACCESS_LOG_REGEX: &str = r#"(?P<clientip>\S+) (?P<ident>[a-zA-Z0-9._-]+) (?P<auth>[a-zA-Z0-9._-]+) \[(?P<timestamp>[^\]]+)\] "(?:(?P<verb>\w+) (?P<request>\S+)(?: HTTP/(?P<httpversion>[0-9.]+))?|(?P<rawrequest>.*?))" (?P<response>\d+) (?:(?P<bytes>\d+)|-)"#;

pub const NESTED_EXPRESSION: &str = "%{NGINX_HOST} %{USERNAME} - %{EMAILADDRESS}";

pub const NESTED_LINE: &str = "127.0.0.1:1234 grok123 - grok123@elastic.co";

/// A grok instance with the nested `NGINX_HOST` definitions installed.
pub fn nested_grok() -> Grok {
    Grok::with_patterns([
        (
            "NGINX_HOST",
            "(?:%{IP:destination.ip}|%{NGINX_NOTSEPARATOR:destination.domain})(:%{NUMBER:destination.port})?",
        ),
        ("NGINX_NOTSEPARATOR", r#""[^\t ,:]+""#),
    ])
}

pub fn access_log_matcher() -> anyhow::Result<CompiledMatcher> {
    Ok(Grok::new().build_matcher(ACCESS_LOG_EXPRESSION, true)?)
}

pub fn syslog_matcher() -> anyhow::Result<CompiledMatcher> {
    let grok = Grok::with_patterns(patterns::SYSLOG.iter().copied());
    Ok(grok.build_matcher("%{SYSLOGLINE}", true)?)
}

/// Generate `count` access-log lines, every tenth one malformed.
pub fn access_log_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i % 10 == 9 {
                format!("garbage line {i}")
            } else {
                format!(
                    r#"10.0.{}.{} - user{} [23/Apr/2014:22:58:{:02} +0200] "GET /item/{} HTTP/1.1" {} {}"#,
                    i / 256 % 256,
                    i % 256,
                    i % 50,
                    i % 60,
                    i,
                    if i % 7 == 0 { 404 } else { 200 },
                    i * 13 % 10_000
                )
            }
        })
        .collect()
}

pub fn syslog_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "Jun {:2} 12:{:02}:{:02} host{} sshd[{}]: Accepted publickey for user{}",
                i % 28 + 1,
                i % 60,
                (i * 7) % 60,
                i % 5,
                1000 + i,
                i % 100
            )
        })
        .collect()
}
