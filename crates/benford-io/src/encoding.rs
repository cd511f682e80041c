//! Character encoding detection and strict decoding
//!
//! Uploaded files arrive in whatever encoding the spreadsheet that produced
//! them happened to use. Detection looks at a leading sample only:
//!
//! 1. A byte-order mark wins (UTF-8, UTF-16LE, UTF-16BE)
//! 2. Otherwise a sample that is valid UTF-8 is read as UTF-8
//! 3. Anything else is treated as windows-1252, which covers latin-1 exports

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::{IoError, IoResult};

/// Guess the encoding of a file from its first bytes
pub fn detect_encoding(sample: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(sample) {
        return encoding;
    }

    if is_utf8_prefix(sample) {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Check whether `sample` is valid UTF-8, allowing the sample boundary to
/// fall inside a multi-byte sequence
fn is_utf8_prefix(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        // error_len() is None only when the input ends mid-sequence
        Err(e) => e.error_len().is_none(),
    }
}

/// Decode `bytes`, failing on any malformed sequence
///
/// A leading byte-order mark matching `encoding` is removed.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> IoResult<String> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(IoError::Encoding {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16BE, UTF_16LE};

    #[test]
    fn test_detect_plain_utf8() {
        assert_eq!(detect_encoding(b"amount\n1,234\n"), UTF_8);
        assert_eq!(detect_encoding("prix\n12 €\n".as_bytes()), UTF_8);
        assert_eq!(detect_encoding(b""), UTF_8);
    }

    #[test]
    fn test_detect_bom() {
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFa,b\n"), UTF_8);
        assert_eq!(detect_encoding(b"\xFF\xFEa\x00"), UTF_16LE);
        assert_eq!(detect_encoding(b"\xFE\xFF\x00a"), UTF_16BE);
    }

    #[test]
    fn test_detect_latin1() {
        // "café,1" with a latin-1 é
        assert_eq!(detect_encoding(b"caf\xE9,1\n"), WINDOWS_1252);
    }

    #[test]
    fn test_truncated_sample_is_still_utf8() {
        let text = "name\nJosé\n".as_bytes();
        // Cut inside the two-byte é
        let cut = text.iter().position(|&b| b == 0xC3).unwrap() + 1;
        assert_eq!(detect_encoding(&text[..cut]), UTF_8);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(b"caf\xE9", WINDOWS_1252).unwrap(), "café");
        assert_eq!(decode(b"\xEF\xBB\xBFa,b", UTF_8).unwrap(), "a,b");
        assert_eq!(decode(b"\xFF\xFEa\x00,\x00b\x00", UTF_16LE).unwrap(), "a,b");
    }

    #[test]
    fn test_decode_is_strict() {
        let err = decode(b"caf\xE9", UTF_8).unwrap_err();
        assert!(matches!(err, IoError::Encoding { ref encoding } if encoding == "UTF-8"));
    }
}
