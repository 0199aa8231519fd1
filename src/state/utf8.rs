//! Codepoint arithmetic over UTF-8 text.
//!
//! Edit offsets count codepoints, never bytes. These helpers translate a
//! codepoint index into the byte index `String` editing needs, so an edit can
//! never land inside a multi-byte sequence. Raw platform bytes are decoded
//! (lossily) before they reach here.

/// Number of codepoints in `text`.
pub fn codepoint_count(text: &str) -> usize {
    text.chars().count()
}

/// Byte index where codepoint `index` starts, clamped to `text.len()`.
///
/// The result is always a char boundary of `text`.
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(at, _)| at)
        .unwrap_or(text.len())
}

/// Keep at most `max` codepoints of `text`.
pub fn truncate_codepoints(text: &str, max: usize) -> &str {
    &text[..byte_offset(text, max)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_ascii_and_multibyte() {
        assert_eq!(codepoint_count(""), 0);
        assert_eq!(codepoint_count("abc"), 3);
        assert_eq!(codepoint_count("日本語"), 3);
        assert_eq!(codepoint_count("a🚀b"), 3);
    }

    #[test]
    fn test_count_replacement_chars() {
        // Orphan continuation bytes decode to one U+FFFD each
        let decoded = String::from_utf8_lossy(&[0x80, 0x80, b'a']);
        assert_eq!(codepoint_count(&decoded), 3);
        // A truncated 3-byte sequence decodes to a single U+FFFD
        let decoded = String::from_utf8_lossy(&[0xE6, 0x97, b'x']);
        assert_eq!(codepoint_count(&decoded), 2);
    }

    #[test]
    fn test_byte_offset() {
        let s = "a日b";
        assert_eq!(byte_offset(s, 0), 0);
        assert_eq!(byte_offset(s, 1), 1);
        assert_eq!(byte_offset(s, 2), 4);
        assert_eq!(byte_offset(s, 3), 5);
        assert_eq!(byte_offset(s, 99), 5);
        assert_eq!(byte_offset("", 0), 0);
    }

    #[test]
    fn test_byte_offset_is_char_boundary() {
        let s = "🚀日a";
        for index in 0..=4 {
            assert!(s.is_char_boundary(byte_offset(s, index)));
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_codepoints("日本語", 2), "日本");
        assert_eq!(truncate_codepoints("abc", 0), "");
        assert_eq!(truncate_codepoints("abc", 10), "abc");
    }
}
