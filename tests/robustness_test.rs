//! Malformed-input robustness: recoverable damage decodes best effort,
//! unrecoverable damage fails with the right class, nothing panics.

use dehtml::{parse_html, parse_html_to_string, Error};
use std::time::{Duration, Instant};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn decode_recovers_from_unclosed_tags() {
    init_tracing();
    let text = parse_html_to_string(b"<p>text<div>more").unwrap();
    assert_eq!(text, "textmore");
}

#[test]
fn decode_recovers_from_invalid_nesting() {
    let text = parse_html_to_string(b"<p><div>x</p></div>").unwrap();
    assert_eq!(text, "x");
}

#[test]
fn decode_recovers_from_broken_attributes() {
    // The unclosed quote swallows the rest of the tag, which is then
    // discarded at end of input.
    let text = parse_html_to_string(b"before<div class=\"test id=broken>after").unwrap();
    assert_eq!(text, "before");
}

#[test]
fn decode_recovers_from_incomplete_entities() {
    let text = parse_html_to_string(b"&amp text &lt;").unwrap();
    assert_eq!(text, "&amp text <");
}

#[test]
fn decode_handles_empty_input() {
    assert_eq!(parse_html_to_string(b"").unwrap(), "");
    let mut output = [0u8; 0];
    assert_eq!(parse_html(b"", &mut output).unwrap(), 0);
}

#[test]
fn decode_handles_markup_only_input() {
    assert_eq!(parse_html_to_string(b"<html><body></body></html>").unwrap(), "");
    assert_eq!(parse_html_to_string(b"<!-- nothing here -->").unwrap(), "");
}

#[test]
fn decode_skips_script_payloads() {
    let text = parse_html_to_string(
        b"<script>alert('xss')</script><p>Safe content here</p>",
    )
    .unwrap();
    assert!(!text.contains("alert"));
    assert!(!text.contains("xss"));
    assert!(text.contains("Safe content"));
}

#[test]
fn decode_rejects_nul_inside_markup() {
    let result = parse_html_to_string(b"<p \x00>x</p>");
    assert!(matches!(result, Err(Error::MalformedMarkup(_, _))));
}

#[test]
fn decode_rejects_runaway_markup() {
    let mut input = Vec::from(&b"<p "[..]);
    input.extend(std::iter::repeat_n(b'a', 100_000));
    let result = parse_html_to_string(&input);
    assert!(matches!(result, Err(Error::MalformedMarkup(_, _))));
}

#[test]
fn decode_handles_deeply_nested_markup() {
    let mut input = String::new();
    for _ in 0..10_000 {
        input.push_str("<div>");
    }
    input.push('x');
    for _ in 0..10_000 {
        input.push_str("</div>");
    }
    assert_eq!(parse_html_to_string(input.as_bytes()).unwrap(), "x");
}

#[test]
fn decode_handles_large_input_without_panic() {
    let target_size = 10 * 1024 * 1024 + 1;
    let chunk = "<p>Some repeated content for stress testing.</p>";
    let mut html = String::with_capacity(target_size + 128);
    while html.len() < target_size {
        html.push_str(chunk);
    }

    let start = Instant::now();
    let result = parse_html_to_string(html.as_bytes());
    let elapsed = start.elapsed();

    assert!(result.is_ok());
    assert!(elapsed < Duration::from_secs(30), "large input took {elapsed:?}");
}

#[test]
fn decode_handles_entity_flood() {
    let input = "&amp;".repeat(50_000);
    let text = parse_html_to_string(input.as_bytes()).unwrap();
    assert_eq!(text, "&".repeat(50_000));
}

#[test]
fn decode_handles_ampersand_runs() {
    let input = "&".repeat(1000);
    let text = parse_html_to_string(input.as_bytes()).unwrap();
    assert_eq!(text, input);
}

#[test]
fn decode_handles_angle_bracket_noise() {
    let text = parse_html_to_string(b"1 < 2 > 0 <= 3 <? ?> <!----> done").unwrap();
    assert_eq!(text, "1 < 2 > 0 <= 3   done");
}
