//! The decoding engine: a single-pass scanner that strips markup and
//! resolves entity references, streaming literal text into a
//! capacity-checked sink.
//!
//! The scanner is a small automaton driven one construct at a time: literal
//! text, tag open, tag name, inside-tag (with a quoted-attribute sub-state),
//! comment, CDATA section, and entity reference. Every step either consumes
//! input or fails, so a call always terminates within `input.len()` steps.
//! No state survives a call.

use tracing::{debug, trace};

use crate::entities::{self, Decoded};
use crate::error::{Error, Result};
use crate::options::Options;

/// Longest entity body considered before the ampersand is treated as
/// literal text.
const MAX_ENTITY_LEN: usize = 32;

/// Elements whose raw content is discarded up to the matching end tag.
const RAW_TEXT_TAGS: &[&[u8]] = &[b"script", b"style"];

/// Elements whose closing tag emits a newline when `Options::line_breaks`
/// is enabled.
const BLOCK_TAGS: &[&[u8]] = &[
    b"p",
    b"div",
    b"li",
    b"ul",
    b"ol",
    b"dd",
    b"dt",
    b"h1",
    b"h2",
    b"h3",
    b"h4",
    b"h5",
    b"h6",
    b"tr",
    b"table",
    b"blockquote",
    b"pre",
    b"section",
    b"article",
    b"header",
    b"footer",
];

/// Destination for decoded text.
///
/// The engine is generic over the sink so the same scanner serves both the
/// caller-supplied fixed buffer at the ABI and the growable-string
/// convenience API.
pub(crate) trait Sink {
    fn push_str(&mut self, text: &str) -> Result<()>;
    fn push_char(&mut self, c: char) -> Result<()>;
    fn last_byte(&self) -> Option<u8>;
}

/// Sink over a caller-owned byte buffer. Writes never exceed the buffer
/// length; a write that would is rejected as truncation without touching
/// the buffer.
pub(crate) struct BufSink<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> BufSink<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        BufSink { buf, len: 0 }
    }

    /// Number of bytes written so far.
    pub(crate) fn written(&self) -> usize {
        self.len
    }
}

impl Sink for BufSink<'_> {
    fn push_str(&mut self, text: &str) -> Result<()> {
        let bytes = text.as_bytes();
        if self.len + bytes.len() > self.buf.len() {
            return Err(Error::Truncated(self.buf.len()));
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    fn push_char(&mut self, c: char) -> Result<()> {
        let mut tmp = [0u8; 4];
        self.push_str(c.encode_utf8(&mut tmp))
    }

    fn last_byte(&self) -> Option<u8> {
        self.buf[..self.len].last().copied()
    }
}

impl Sink for String {
    fn push_str(&mut self, text: &str) -> Result<()> {
        String::push_str(self, text);
        Ok(())
    }

    fn push_char(&mut self, c: char) -> Result<()> {
        self.push(c);
        Ok(())
    }

    fn last_byte(&self) -> Option<u8> {
        self.as_bytes().last().copied()
    }
}

/// Decode `input` into `sink` in one pass.
pub(crate) fn run<S: Sink>(input: &str, sink: &mut S, options: &Options) -> Result<()> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        i = match bytes[i] {
            b'<' => markup(input, i, sink, options)?,
            b'&' => entity(input, i, sink)?,
            _ => {
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] != b'<' && bytes[j] != b'&' {
                    j += 1;
                }
                sink.push_str(&input[i..j])?;
                j
            }
        };
    }
    Ok(())
}

/// Dispatch on the byte after `<`. A `<` that cannot start a markup
/// construct is literal text.
fn markup<S: Sink>(input: &str, i: usize, sink: &mut S, options: &Options) -> Result<usize> {
    let bytes = input.as_bytes();
    match bytes.get(i + 1) {
        Some(b'!') => declaration(bytes, i, options),
        Some(b'?') => match find_close(bytes, i, options, "processing instruction")? {
            Some(gt) => Ok(gt + 1),
            None => Ok(bytes.len()),
        },
        Some(b'/') => tag(bytes, i, sink, options),
        Some(c) if c.is_ascii_alphabetic() => tag(bytes, i, sink, options),
        _ => {
            sink.push_str("<")?;
            Ok(i + 1)
        }
    }
}

/// Scan from the `<` at `i` to the closing `>`, honoring quoted attribute
/// values. Returns the index of the `>`, or `None` when the construct is
/// still open at end of input (discarded, best effort).
fn find_close(
    bytes: &[u8],
    i: usize,
    options: &Options,
    what: &'static str,
) -> Result<Option<usize>> {
    let mut quote: Option<u8> = None;
    let mut j = i + 1;
    while j < bytes.len() {
        if j - i > options.max_tag_len {
            return Err(Error::MalformedMarkup(i, "markup construct exceeds length bound"));
        }
        match bytes[j] {
            0 => return Err(Error::MalformedMarkup(j, "NUL byte inside markup")),
            q @ (b'"' | b'\'') => match quote {
                Some(open) if open == q => quote = None,
                Some(_) => {}
                None => quote = Some(q),
            },
            b'>' if quote.is_none() => return Ok(Some(j)),
            _ => {}
        }
        j += 1;
    }
    debug!("unterminated {what} at byte {i}; discarding to end of input");
    Ok(None)
}

/// Consume a start or end tag. The tag itself never reaches the output;
/// raw-text elements additionally swallow their content, and structural
/// tags may synthesize a newline when the option is enabled.
fn tag<S: Sink>(bytes: &[u8], i: usize, sink: &mut S, options: &Options) -> Result<usize> {
    let mut j = i + 1;
    let end_tag = bytes[j] == b'/';
    if end_tag {
        j += 1;
    }
    let name_start = j;
    while j < bytes.len() && bytes[j].is_ascii_alphanumeric() {
        j += 1;
    }
    let name = &bytes[name_start..j];

    let Some(gt) = find_close(bytes, i, options, "tag")? else {
        return Ok(bytes.len());
    };
    let self_closing = bytes[gt - 1] == b'/';
    let mut next = gt + 1;

    if !end_tag && !self_closing && RAW_TEXT_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
        next = skip_raw_text(bytes, next, name);
    }

    if options.line_breaks {
        if name.eq_ignore_ascii_case(b"br") {
            sink.push_str("\n")?;
        } else if end_tag
            && BLOCK_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t))
            && sink.last_byte().is_some_and(|b| b != b'\n')
        {
            sink.push_str("\n")?;
        }
    }
    Ok(next)
}

/// Discard the content of a raw-text element (`<script>`, `<style>`) up to
/// and including its end tag.
fn skip_raw_text(bytes: &[u8], from: usize, name: &[u8]) -> usize {
    let mut j = from;
    while j + 2 + name.len() <= bytes.len() {
        if bytes[j] == b'<'
            && bytes[j + 1] == b'/'
            && bytes[j + 2..j + 2 + name.len()].eq_ignore_ascii_case(name)
        {
            let mut k = j + 2 + name.len();
            while k < bytes.len() && bytes[k] != b'>' {
                k += 1;
            }
            return (k + 1).min(bytes.len());
        }
        j += 1;
    }
    trace!("raw-text element never closed; discarding to end of input");
    bytes.len()
}

/// Consume a `<!` construct: comment, CDATA section, or markup declaration.
fn declaration(bytes: &[u8], i: usize, options: &Options) -> Result<usize> {
    if bytes[i..].starts_with(b"<!--") {
        return skip_section(bytes, i, i + 4, b"-->");
    }
    if bytes[i..].starts_with(b"<![CDATA[") {
        return skip_section(bytes, i, i + 9, b"]]>");
    }
    if bytes[i..].starts_with(b"<![") {
        return Err(Error::UnsupportedConstruct(i, "marked section other than CDATA"));
    }
    match find_close(bytes, i, options, "markup declaration")? {
        Some(gt) => Ok(gt + 1),
        None => Ok(bytes.len()),
    }
}

/// Discard a comment or CDATA section up to its terminator, or to end of
/// input when unterminated. Not subject to the tag length bound.
fn skip_section(bytes: &[u8], start: usize, content_from: usize, terminator: &[u8]) -> Result<usize> {
    let (end, next) = match bytes[content_from..]
        .windows(terminator.len())
        .position(|w| w == terminator)
    {
        Some(p) => (content_from + p, content_from + p + terminator.len()),
        None => {
            debug!("unterminated section at byte {start}; discarding to end of input");
            (bytes.len(), bytes.len())
        }
    };
    if bytes[start..end].contains(&0) {
        return Err(Error::MalformedMarkup(start, "NUL byte inside markup"));
    }
    Ok(next)
}

/// Resolve an entity reference at the `&` at `i`, or emit it literally when
/// it is unknown or not well formed.
fn entity<S: Sink>(input: &str, i: usize, sink: &mut S) -> Result<usize> {
    let bytes = input.as_bytes();
    let mut j = i + 1;
    if bytes.get(j) == Some(&b'#') {
        j += 1;
    }
    while j < bytes.len() && j - i <= MAX_ENTITY_LEN && bytes[j].is_ascii_alphanumeric() {
        j += 1;
    }
    if j > i + 1 && bytes.get(j) == Some(&b';') {
        let body = &input[i + 1..j];
        if let Some(decoded) = entities::resolve(body) {
            match decoded {
                Decoded::Str(text) => sink.push_str(text)?,
                Decoded::Char(c) => sink.push_char(c)?,
            }
        } else {
            trace!("unknown entity {body:?}; emitting literally");
            sink.push_str(&input[i..=j])?;
        }
        return Ok(j + 1);
    }
    // Bare ampersand, literal text.
    sink.push_str("&")?;
    Ok(i + 1)
}
