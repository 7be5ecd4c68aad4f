//! # dehtml
//!
//! Bounded HTML-to-plain-text decoding.
//!
//! This library strips markup (tags, comments, CDATA sections, doctypes)
//! from possibly-malformed HTML and resolves entity references, writing the
//! literal text into a caller-supplied fixed-size buffer. Each call is a
//! single pass over the input, allocates nothing that survives the call,
//! and is safe to run concurrently from independent threads with private
//! buffers.
//!
//! The same engine is exported through a C-compatible ABI (see [`ffi`]) for
//! callers on the other side of a shared-library boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use dehtml::parse_html;
//!
//! let mut output = [0u8; 64];
//! let written = parse_html(b"<p>Hello &amp; welcome</p>", &mut output)?;
//! assert_eq!(&output[..written], b"Hello & welcome");
//! # Ok::<(), dehtml::Error>(())
//! ```
//!
//! ## Failure model
//!
//! Errors form a closed set, each with a stable negative ABI code: output
//! truncation, invalid UTF-8, unrecoverable markup, and recognized but
//! unsupported constructs. On any error the output buffer's contents are
//! unspecified and must not be read. Minor malformations (unclosed tags,
//! unknown entities, stray ampersands) are recovered best-effort and are
//! not errors.

mod decode;
mod entities;
mod error;
mod options;

/// Character encoding checks (charset declarations, strict UTF-8).
pub mod encoding;

/// The C-compatible export surface.
#[allow(unsafe_code)]
pub mod ffi;

// Public API - re-exports
pub use error::{Error, Result};
pub use error::{
    ERR_BAD_DOCUMENT, ERR_INSUFFICIENT_BUFFER, ERR_INVALID_STRING, ERR_UNSPECIFIED,
    ERR_UNSUPPORTED,
};
pub use options::Options;

/// Decodes HTML bytes into plain text using default options.
///
/// # Arguments
///
/// * `input` - The document bytes; must be valid UTF-8
/// * `output` - The caller's output buffer; its length is the capacity
///
/// # Returns
///
/// Returns `Ok(written)` with the number of bytes written, which is always
/// at most `output.len()`. On `Err(_)` the contents of `output` are
/// unspecified.
///
/// # Example
///
/// ```rust
/// use dehtml::parse_html;
///
/// let mut output = [0u8; 64];
/// let written = parse_html(b"<b>unterminated", &mut output)?;
/// assert_eq!(&output[..written], b"unterminated");
/// # Ok::<(), dehtml::Error>(())
/// ```
pub fn parse_html(input: &[u8], output: &mut [u8]) -> Result<usize> {
    parse_html_with_options(input, output, &Options::default())
}

/// Decodes HTML bytes into plain text with custom options.
///
/// See [`parse_html`] for the buffer contract and [`Options`] for the
/// available knobs.
pub fn parse_html_with_options(
    input: &[u8],
    output: &mut [u8],
    options: &Options,
) -> Result<usize> {
    encoding::check_declared_charset(input)?;
    let text = encoding::validate_utf8(input)?;
    let mut sink = decode::BufSink::new(output);
    decode::run(text, &mut sink, options)?;
    Ok(sink.written())
}

/// Decodes HTML bytes into an owned `String`.
///
/// Convenience for callers that do not manage buffers; truncation cannot
/// occur, the remaining error classes are unchanged.
///
/// # Example
///
/// ```rust
/// use dehtml::parse_html_to_string;
///
/// let text = parse_html_to_string(b"<p>fish &amp; chips</p>")?;
/// assert_eq!(text, "fish & chips");
/// # Ok::<(), dehtml::Error>(())
/// ```
pub fn parse_html_to_string(input: &[u8]) -> Result<String> {
    let options = Options::default();
    encoding::check_declared_charset(input)?;
    let text = encoding::validate_utf8(input)?;
    let mut out = String::new();
    decode::run(text, &mut out, &options)?;
    Ok(out)
}
