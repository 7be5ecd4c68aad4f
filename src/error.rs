//! Error types and the stable ABI error-code table.
//!
//! Every failure the decoder can produce maps to one member of a closed set
//! of negative integer codes, so callers on the other side of the C boundary
//! can branch on the failure class (for example, retry with a larger buffer
//! only on `ERR_INSUFFICIENT_BUFFER`).

use std::ffi::CStr;

/// Caught panic, or a null pointer handed across the ABI.
pub const ERR_UNSPECIFIED: i32 = -1;

/// Decoded output would exceed the caller's buffer capacity.
pub const ERR_INSUFFICIENT_BUFFER: i32 = -2;

/// Input is not valid UTF-8 and cannot be repaired.
pub const ERR_INVALID_STRING: i32 = -3;

/// Markup is structurally invalid beyond the recovery heuristics.
pub const ERR_BAD_DOCUMENT: i32 = -4;

/// A recognized markup construct that is intentionally unsupported.
pub const ERR_UNSUPPORTED: i32 = -5;

/// Error type for decoding operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Failure with no more specific classification.
    #[error("unspecified failure")]
    Unspecified,

    /// Decoded output would exceed the output buffer capacity.
    #[error("decoded output exceeds the {0}-byte output buffer")]
    Truncated(usize),

    /// Input bytes are not valid UTF-8.
    #[error("invalid UTF-8 sequence at byte {0}")]
    InvalidEncoding(usize),

    /// Structurally invalid markup beyond recovery.
    #[error("malformed markup at byte {0}: {1}")]
    MalformedMarkup(usize, &'static str),

    /// Recognized but intentionally unsupported construct.
    #[error("unsupported construct at byte {0}: {1}")]
    UnsupportedConstruct(usize, &'static str),
}

impl Error {
    /// The stable negative integer code reported across the C boundary.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Error::Unspecified => ERR_UNSPECIFIED,
            Error::Truncated(_) => ERR_INSUFFICIENT_BUFFER,
            Error::InvalidEncoding(_) => ERR_INVALID_STRING,
            Error::MalformedMarkup(_, _) => ERR_BAD_DOCUMENT,
            Error::UnsupportedConstruct(_, _) => ERR_UNSUPPORTED,
        }
    }
}

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Static description for an ABI error code.
///
/// Returns a valid string for every code, including codes the decoder never
/// produces; unrecognized values map to `"unknown error"`.
#[must_use]
pub fn errstr(errno: i32) -> &'static CStr {
    match errno {
        ERR_UNSPECIFIED => c"unspecified",
        ERR_INSUFFICIENT_BUFFER => c"insufficient buffer",
        ERR_INVALID_STRING => c"invalid string",
        ERR_BAD_DOCUMENT => c"invalid document",
        ERR_UNSUPPORTED => c"unsupported construct",
        _ => c"unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_negative_and_distinct() {
        let codes = [
            Error::Unspecified.code(),
            Error::Truncated(64).code(),
            Error::InvalidEncoding(0).code(),
            Error::MalformedMarkup(0, "test").code(),
            Error::UnsupportedConstruct(0, "test").code(),
        ];
        for (n, code) in codes.iter().enumerate() {
            assert!(*code < 0);
            for other in &codes[n + 1..] {
                assert_ne!(code, other);
            }
        }
    }

    #[test]
    fn errstr_covers_every_producible_code() {
        for code in [
            ERR_UNSPECIFIED,
            ERR_INSUFFICIENT_BUFFER,
            ERR_INVALID_STRING,
            ERR_BAD_DOCUMENT,
            ERR_UNSUPPORTED,
        ] {
            assert!(!errstr(code).to_bytes().is_empty());
        }
    }

    #[test]
    fn errstr_is_defensive_for_unknown_codes() {
        assert_eq!(errstr(0).to_bytes(), b"unknown error");
        assert_eq!(errstr(-9999).to_bytes(), b"unknown error");
        assert_eq!(errstr(i32::MAX).to_bytes(), b"unknown error");
    }

    #[test]
    fn truncated_message_names_the_capacity() {
        let message = Error::Truncated(4096).to_string();
        assert!(message.contains("4096"));
    }
}
