//! Configuration options for decoding.
//!
//! The `Options` struct controls decoding behavior. The defaults preserve
//! literal text byte-for-byte, so markup-free input round-trips unchanged.

/// Configuration options for decoding.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use dehtml::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     line_breaks: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Synthesize newlines from structural markup.
    ///
    /// When enabled, `<br>` emits a newline and the closing tag of a block
    /// element (`p`, `div`, `li`, headings, table rows and similar) emits a
    /// newline unless the output already ends with one. When disabled, all
    /// markup is stripped without leaving any separator, so literal text
    /// passes through byte-for-byte.
    ///
    /// Default: `false`
    pub line_breaks: bool,

    /// Upper bound in bytes on a single tag, doctype, or processing
    /// instruction, measured from its `<`.
    ///
    /// A construct that runs past this bound without closing is treated as
    /// unrecoverable (typically a stray `<` in binary junk dragging the
    /// scanner through the rest of the document). Comments and CDATA
    /// sections are exempt, as they legitimately hold long content.
    ///
    /// Default: `1024`
    pub max_tag_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            line_breaks: false,
            max_tag_len: 1024,
        }
    }
}
