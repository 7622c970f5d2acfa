//! Symbol classification — leading-byte → encoded length.
//!
//! The buffer stores raw bytes and never validates UTF-8. All Unicode
//! awareness in the editor reduces to two questions asked of single bytes:
//! "how many bytes does the symbol starting here occupy?" and "is this byte
//! a continuation byte belonging to a preceding symbol?". Both are answered
//! by the high bits of the byte alone, so this module is pure and stateless.
//!
//! A *symbol* is one code point's encoded byte sequence (1 for ASCII, 2–6
//! for multi-byte lead bytes by threshold bands). This is deliberately not
//! grapheme clustering — the cursor steps over code points, nothing more.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest encoded length [`symbol_len`] can report.
///
/// The classic (pre-RFC 3629) UTF-8 bands go up to 6 bytes; we keep the
/// full table so navigation never stalls on old-style encodings.
pub const MAX_SYMBOL_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Total encoded byte length of the symbol whose *leading* byte is `lead`.
///
/// - `0x00..=0x7F` (ASCII) → 1
/// - `0xC0..=0xDF` → 2, `0xE0..=0xEF` → 3, `0xF0..=0xF7` → 4,
///   `0xF8..=0xFB` → 5, `0xFC..=0xFF` → 6
/// - `0x80..=0xBF` → **0**: a continuation byte can never lead a symbol.
///   Callers must treat a zero length as a corrupt-input signal — the
///   renderer aborts the frame on it, navigation skips forward to the
///   next lead byte.
#[inline]
#[must_use]
pub const fn symbol_len(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead < 0xC0 {
        0
    } else if lead < 0xE0 {
        2
    } else if lead < 0xF0 {
        3
    } else if lead < 0xF8 {
        4
    } else if lead < 0xFC {
        5
    } else {
        6
    }
}

/// True for a plain ASCII byte (`< 0x80`).
#[inline]
#[must_use]
pub const fn is_ascii_byte(b: u8) -> bool {
    b < 0x80
}

/// True for a continuation byte — a non-leading byte of a multi-byte
/// symbol (`0x80..=0xBF`). Never valid on its own.
#[inline]
#[must_use]
pub const fn is_continuation(b: u8) -> bool {
    !is_ascii_byte(b) && b <= 0xBF
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_byte() {
        assert_eq!(symbol_len(b'a'), 1);
        assert_eq!(symbol_len(0x00), 1);
        assert_eq!(symbol_len(0x7F), 1);
    }

    #[test]
    fn multibyte_lead_bands() {
        assert_eq!(symbol_len(0xC0), 2);
        assert_eq!(symbol_len(0xC3), 2); // 'é' lead
        assert_eq!(symbol_len(0xDF), 2);
        assert_eq!(symbol_len(0xE0), 3);
        assert_eq!(symbol_len(0xE4), 3); // CJK lead
        assert_eq!(symbol_len(0xEF), 3);
        assert_eq!(symbol_len(0xF0), 4); // emoji lead
        assert_eq!(symbol_len(0xF7), 4);
        assert_eq!(symbol_len(0xF8), 5);
        assert_eq!(symbol_len(0xFB), 5);
        assert_eq!(symbol_len(0xFC), 6);
        assert_eq!(symbol_len(0xFF), 6);
    }

    #[test]
    fn continuation_byte_is_not_a_lead() {
        assert_eq!(symbol_len(0x80), 0);
        assert_eq!(symbol_len(0xBF), 0);
    }

    #[test]
    fn continuation_predicate() {
        assert!(is_continuation(0x80));
        assert!(is_continuation(0xBF));
        assert!(!is_continuation(0x7F));
        assert!(!is_continuation(b'a'));
        assert!(!is_continuation(0xC0));
        assert!(!is_continuation(0xFF));
    }

    #[test]
    fn ascii_predicate() {
        assert!(is_ascii_byte(b'z'));
        assert!(is_ascii_byte(b'\n'));
        assert!(!is_ascii_byte(0x80));
        assert!(!is_ascii_byte(0xC3));
    }

    #[test]
    fn every_real_utf8_char_matches_table() {
        for ch in ['a', 'é', '好', '👋'] {
            let mut buf = [0u8; 4];
            let encoded = ch.encode_utf8(&mut buf);
            assert_eq!(
                symbol_len(encoded.as_bytes()[0]),
                encoded.len(),
                "length mismatch for {ch:?}"
            );
            for &cont in &encoded.as_bytes()[1..] {
                assert!(is_continuation(cont));
            }
        }
    }
}
