//! The C-compatible export surface.
//!
//! Two functions are exported for callers loading this crate as a shared
//! library:
//!
//! ```c
//! int32_t parse_html(const char *input, size_t input_len,
//!                    char *output, size_t output_capacity);
//! const char *dehtml_errstr(int32_t errno);
//! ```
//!
//! `parse_html` returns the number of bytes written (>= 0) or a negative
//! code from the closed error set. Errors are reported exclusively through
//! the return value: panics are caught at the boundary and reported as
//! `ERR_UNSPECIFIED`, never unwound across the ABI.

use std::ffi::{c_char, c_int};
use std::panic;
use std::slice;

use crate::error::{self, ERR_UNSPECIFIED};

/// Decode HTML bytes into the caller's output buffer.
///
/// Returns the number of bytes written on success, or a negative error
/// code. On a negative return the output buffer's contents are unspecified
/// and must not be read. Null `input` or `output` yields
/// `ERR_UNSPECIFIED`.
///
/// # Safety
///
/// `input` must point to `input_len` readable bytes and `output` to
/// `output_capacity` writable bytes for the duration of the call. The
/// buffers must not overlap. Distinct buffers make concurrent calls from
/// multiple threads safe; no state is shared between calls.
#[no_mangle]
pub unsafe extern "C" fn parse_html(
    input: *const c_char,
    input_len: usize,
    output: *mut c_char,
    output_capacity: usize,
) -> c_int {
    if input.is_null() || output.is_null() {
        return ERR_UNSPECIFIED;
    }

    panic::catch_unwind(|| {
        let ibuf = slice::from_raw_parts(input.cast::<u8>(), input_len);
        let obuf = slice::from_raw_parts_mut(output.cast::<u8>(), output_capacity);

        match crate::parse_html(ibuf, obuf) {
            Ok(written) => c_int::try_from(written).unwrap_or(ERR_UNSPECIFIED),
            Err(err) => err.code(),
        }
    })
    .unwrap_or(ERR_UNSPECIFIED)
}

/// Static description for an error code returned by [`parse_html`].
///
/// The returned pointer is to a null-terminated string with process
/// lifetime; it is never null, and unrecognized codes map to a generic
/// `"unknown error"` string.
#[no_mangle]
pub extern "C" fn dehtml_errstr(errno: c_int) -> *const c_char {
    error::errstr(errno).as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ERR_INSUFFICIENT_BUFFER, ERR_INVALID_STRING};
    use std::ffi::CStr;
    use std::ptr;

    fn call(input: &[u8], output: &mut [u8]) -> c_int {
        unsafe {
            parse_html(
                input.as_ptr().cast::<c_char>(),
                input.len(),
                output.as_mut_ptr().cast::<c_char>(),
                output.len(),
            )
        }
    }

    #[test]
    fn round_trip_through_the_abi() {
        let mut output = [0u8; 64];
        let rv = call(b"<p>Hello &amp; welcome</p>", &mut output);
        assert_eq!(rv, 15);
        assert_eq!(&output[..15], b"Hello & welcome");
    }

    #[test]
    fn errors_surface_as_negative_codes() {
        let mut output = [0u8; 5];
        assert_eq!(call(b"AAAAAAAAAA", &mut output), ERR_INSUFFICIENT_BUFFER);

        let mut output = [0u8; 64];
        assert_eq!(call(b"bad \xFF utf8", &mut output), ERR_INVALID_STRING);
    }

    #[test]
    fn null_pointers_are_rejected() {
        let mut output = [0u8; 8];
        let rv = unsafe {
            parse_html(ptr::null(), 0, output.as_mut_ptr().cast::<c_char>(), output.len())
        };
        assert_eq!(rv, ERR_UNSPECIFIED);

        let input = b"x";
        let rv = unsafe {
            parse_html(input.as_ptr().cast::<c_char>(), input.len(), ptr::null_mut(), 0)
        };
        assert_eq!(rv, ERR_UNSPECIFIED);
    }

    #[test]
    fn errstr_is_never_null() {
        for errno in [-1, -2, -3, -4, -5, 0, 42, i32::MIN] {
            let ptr = dehtml_errstr(errno);
            assert!(!ptr.is_null());
            let s = unsafe { CStr::from_ptr(ptr) };
            assert!(!s.to_bytes().is_empty());
        }
    }

    #[test]
    fn errstr_describes_the_buffer_error() {
        let s = unsafe { CStr::from_ptr(dehtml_errstr(ERR_INSUFFICIENT_BUFFER)) };
        assert_eq!(s.to_bytes(), b"insufficient buffer");
    }
}
