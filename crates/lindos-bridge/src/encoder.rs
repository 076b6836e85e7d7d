//! Request encoding for the boundary
//!
//! The native library takes NUL-terminated UTF-8. Anything that cannot be
//! carried that way is rejected here, before the boundary is crossed.

use crate::error::ProcessingError;
use crate::taxonomy::ErrorCode;
use std::ffi::CString;

/// Encode caller text as a boundary string
///
/// Empty text is passed through; classifying it is the native side's job.
pub fn encode(text: &str) -> Result<CString, ProcessingError> {
    CString::new(text).map_err(|_| ProcessingError::from_code(ErrorCode::InvalidUtf8))
}

/// Encode raw bytes as a boundary string, checking they are UTF-8
pub fn encode_bytes(bytes: &[u8]) -> Result<CString, ProcessingError> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| ProcessingError::from_code(ErrorCode::InvalidUtf8))?;
    encode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_and_multibyte() {
        assert_eq!(encode("hello").unwrap().as_bytes(), b"hello");

        let text = "Hello 🌍 世界 🚀";
        assert_eq!(encode(text).unwrap().to_str().unwrap(), text);
    }

    #[test]
    fn test_empty_passes_through() {
        let encoded = encode("").unwrap();
        assert!(encoded.as_bytes().is_empty());
        assert_eq!(encoded.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_interior_nul_rejected() {
        let error = encode("abc\0def").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidUtf8);
        assert_eq!(error.message, "Message contains invalid characters");
    }

    #[test]
    fn test_invalid_utf8_bytes_rejected() {
        let error = encode_bytes(&[0x66, 0xFF, 0xFE]).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidUtf8);

        assert_eq!(encode_bytes("ok".as_bytes()).unwrap().as_bytes(), b"ok");
    }
}
