//! Basic grok engine usage examples.
//!
//! This example walks through compiling expressions against the built-in
//! pattern library, adding custom patterns, typed extraction and batch
//! processing.

use grok_engine::{patterns, Grok, GrokConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Grok Engine Basic Usage Examples");
    println!("================================\n");

    // Example 1: Built-in patterns
    access_log_example()?;
    println!();

    // Example 2: Custom and nested patterns
    custom_patterns_example()?;
    println!();

    // Example 3: Typed fields
    typed_example()?;
    println!();

    // Example 4: Batch processing with a pattern family
    batch_processing_example()?;

    Ok(())
}

/// Parse an Apache access line with the built-in patterns.
fn access_log_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Access Log Example ===");

    let mut grok = Grok::new();
    grok.compile(
        r#"%{IPORHOST:client.ip} %{USER:ident} %{USER:auth} \[%{HTTPDATE:timestamp}\] "%{WORD:http.method} %{NOTSPACE:url.original} HTTP/%{NUMBER:http.version}" %{NUMBER:status} %{NUMBER:bytes}"#,
        true,
    )?;

    let line = r#"127.0.0.1 - - [23/Apr/2014:22:58:32 +0200] "GET /index.php HTTP/1.1" 404 207"#;
    print_sorted(grok.parse_str(line)?);

    Ok(())
}

/// Define patterns on top of the defaults and compare the two capture modes.
fn custom_patterns_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Custom Patterns Example ===");

    let config = GrokConfig::new()
        .with_pattern(
            "NGINX_HOST",
            "(?:%{IP:destination.ip}|%{NGINX_NOTSEPARATOR:destination.domain})(:%{NUMBER:destination.port})?",
        )
        .with_pattern("NGINX_NOTSEPARATOR", r#""[^\t ,:]+""#);
    let mut grok = Grok::with_config(config);

    grok.compile("%{NGINX_HOST}", true)?;
    println!("named captures only:");
    print_sorted(grok.parse_str("127.0.0.1:1234")?);

    grok.compile("%{NGINX_HOST}", false)?;
    println!("all captures:");
    print_sorted(grok.parse_str("127.0.0.1:1234")?);

    Ok(())
}

/// Convert captures with `%{SYNTAX:ID:TYPE}` hints.
fn typed_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Typed Fields Example ===");

    let mut grok = Grok::new();
    grok.compile(
        "%{WORD:service} took %{NUMBER:duration:float}ms status=%{INT:status:int} cached=%{WORD:cached:boolean}",
        true,
    )?;

    let fields = grok.parse_typed("checkout took 12.5ms status=200 cached=false")?;
    println!("{}", serde_json::to_string_pretty(&fields)?);

    // Conversion failures surface as errors
    match grok.parse_typed("checkout took 12.5ms status=200 cached=maybe") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}

/// Parse syslog lines in parallel using the syslog pattern family.
fn batch_processing_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Batch Processing Example ===");

    let grok = Grok::with_patterns(patterns::SYSLOG.iter().copied());
    let matcher = grok.build_matcher("%{SYSLOGLINE}", true)?;

    let lines = [
        "Jun 26 12:34:56 web01 sshd[42]: Accepted publickey for root",
        "Jun 26 12:35:01 web01 CRON[77]: (root) CMD (run-parts /etc/cron.hourly)",
        "not a syslog line",
    ];

    for (line, fields) in lines.iter().zip(matcher.parse_batch(&lines)) {
        if fields.is_empty() {
            println!("no match: {line}");
        } else {
            println!(
                "{} {} -> {}",
                fields["host.name"],
                fields["process.name"],
                fields.get("message").map(String::as_str).unwrap_or("")
            );
        }
    }

    Ok(())
}

fn print_sorted(fields: std::collections::HashMap<String, String>) {
    let mut fields: Vec<_> = fields.into_iter().collect();
    fields.sort();
    for (name, value) in fields {
        println!("  {name:<20} {value}");
    }
}
