//! Character encoding checks.
//!
//! The decoder's collaborator contract promises UTF-8 input, so no
//! transcoding is attempted: input that is not valid UTF-8 is rejected, and
//! a document that *declares* a different charset in its head is rejected as
//! a recognized but unsupported construct before any text is decoded.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

// Module-level regex patterns for charset detection
// These are compiled once at first use and reused throughout the program lifetime

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// How many leading bytes are examined for a charset declaration.
const HEAD_WINDOW: usize = 1024;

/// The encoding a document declares in its head, if any.
///
/// Looks for charset declarations in the following order:
/// 1. `<meta charset="...">`
/// 2. `<meta http-equiv="Content-Type" content="...; charset=...">`
///
/// Only examines the first 1024 bytes. Labels that `encoding_rs` does not
/// recognize are ignored, as they are in browsers.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = &html[..html.len().min(HEAD_WINDOW)];
    let head_str = String::from_utf8_lossy(head);

    for pattern in [&CHARSET_META_RE, &CONTENT_TYPE_CHARSET_RE] {
        if let Some(label) = pattern.captures(&head_str).and_then(|c| c.get(1)) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return Some(encoding);
            }
        }
    }
    None
}

/// Reject documents whose head declares a charset other than UTF-8.
///
/// `encoding_rs` resolves labels per the WHATWG rules, so `us-ascii` and
/// `latin1` both land on windows-1252 and are rejected here.
pub(crate) fn check_declared_charset(html: &[u8]) -> Result<()> {
    match declared_encoding(html) {
        Some(encoding) if encoding != UTF_8 => {
            Err(Error::UnsupportedConstruct(0, "non-UTF-8 charset declaration"))
        }
        _ => Ok(()),
    }
}

/// Strict UTF-8 validation; no repair is attempted.
pub(crate) fn validate_utf8(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|err| Error::InvalidEncoding(err.valid_up_to()))
}
