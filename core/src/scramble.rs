//! Reversible credential obfuscation for stored broker properties.
//!
//! The stored format is base64 over a 10-character right-aligned decimal
//! CRC32 of the text followed by the text itself. This guards against
//! accidental display of a credential, not against a reader of the stored
//! value. `decode` verifies the checksum and returns `None` on any
//! mismatch so callers can fall back to treating the input as a legacy
//! plain-text value.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub fn encode(txt: &str) -> String {
    let crc = crc32fast::hash(txt.as_bytes());
    let framed = format!("{:>10}{}", crc, txt);
    BASE64.encode(framed.as_bytes())
}

pub fn decode(encoded: &str) -> Option<String> {
    let bytes = BASE64.decode(encoded).ok()?;
    let framed = String::from_utf8(bytes).ok()?;
    if framed.len() < 10 || !framed.is_char_boundary(10) {
        return None;
    }
    let (prefix, txt) = framed.split_at(10);
    let crc: u32 = prefix.trim().parse().ok()?;
    if crc != crc32fast::hash(txt.as_bytes()) {
        return None;
    }
    Some(txt.to_string())
}

/// Decode falling back to the raw input, for values stored before
/// scrambling was introduced.
pub fn decode_or_raw(value: &str) -> String {
    decode(value).unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        for txt in ["secret", "", "p@ss word", "日本語"] {
            assert_eq!(decode(&encode(txt)).as_deref(), Some(txt));
        }
    }

    #[test]
    fn plain_text_is_not_decodable() {
        assert_eq!(decode("not-encoded-text"), None);
    }

    #[test]
    fn tampered_payload_fails_checksum() {
        let encoded = encode("secret");
        let framed = BASE64.decode(&encoded).unwrap();
        let mut tampered = framed.clone();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;
        let reencoded = BASE64.encode(&tampered);
        assert_eq!(decode(&reencoded), None);
    }

    #[test]
    fn decode_or_raw_falls_back() {
        assert_eq!(decode_or_raw("legacy-password"), "legacy-password");
        assert_eq!(decode_or_raw(&encode("secret")), "secret");
    }

    #[test]
    fn frame_matches_stored_format() {
        // "%10d" framing: checksum right-aligned in a 10 character field.
        let framed = String::from_utf8(BASE64.decode(encode("x")).unwrap()).unwrap();
        assert_eq!(framed.len(), 10 + 1);
        assert_eq!(&framed[10..], "x");
        assert!(framed[..10].trim_start().chars().all(|c| c.is_ascii_digit()));
    }
}
