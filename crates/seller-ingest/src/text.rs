//! Byte-to-text decoding for import files.

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Decodes file bytes to text.
///
/// A byte-order mark selects the encoding (UTF-8, UTF-16LE, UTF-16BE) and is
/// dropped. Without one the bytes must be valid UTF-8. Malformed input is an
/// error rather than being replaced with U+FFFD.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let Some((encoding, bom_len)) = Encoding::for_bom(bytes) else {
        return decode_utf8(bytes);
    };
    let body = &bytes[bom_len..];
    debug!(encoding = encoding.name(), "byte-order mark detected");
    if encoding == UTF_8 {
        return decode_utf8(body);
    }

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(IngestError::Decode {
            encoding: encoding.name(),
            reason: "malformed code unit sequence".to_string(),
        });
    }
    Ok(text.into_owned())
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| IngestError::Decode {
            encoding: UTF_8.name(),
            reason: format!("invalid byte sequence at offset {}", e.valid_up_to()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        assert_eq!(decode_text(b"date,revenue\n").unwrap(), "date,revenue\n");
        assert_eq!(decode_text(b"").unwrap(), "");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let bytes = b"\xEF\xBB\xBFsku,stock";
        assert_eq!(decode_text(bytes).unwrap(), "sku,stock");
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a,b".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes).unwrap(), "a,b");
    }

    #[test]
    fn test_utf16be_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "caf\u{e9}".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text(&bytes).unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode_text(b"ok,\xFF\xFE\xFD").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid UTF-8 text: invalid byte sequence at offset 3"
        );
    }
}
