/// The encoding of a document, as far as it can be told from its first bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8, detected from its byte order mark.
    Utf8,
    /// UTF-16, big endian.
    Utf16Be,
    /// UTF-16, little endian.
    Utf16Le,
    /// UTF-32, big endian.
    Utf32Be,
    /// UTF-32, little endian.
    Utf32Le,
    /// No byte order mark and no null bytes. Treated as UTF-8 or an ASCII-compatible encoding.
    Unknown,
}

// Longer marks come first, `FF FE 00 00` would otherwise be taken for UTF-16LE.
const BYTE_ORDER_MARKS: [(&[u8], Encoding); 5] = [
    (&[0x00, 0x00, 0xFE, 0xFF], Encoding::Utf32Be),
    (&[0xFF, 0xFE, 0x00, 0x00], Encoding::Utf32Le),
    (&[0xEF, 0xBB, 0xBF], Encoding::Utf8),
    (&[0xFE, 0xFF], Encoding::Utf16Be),
    (&[0xFF, 0xFE], Encoding::Utf16Le),
];

impl Encoding {
    /// Detect the encoding of `input` from its byte order mark, or failing that, from the
    /// position of null bytes in it. A byte order mark is consumed, nothing else is.
    ///
    /// ```
    /// use xmlgum::Encoding;
    ///
    /// let mut input: &[u8] = b"\xEF\xBB\xBF<doc/>";
    /// assert_eq!(Encoding::sniff(&mut input), Encoding::Utf8);
    /// assert_eq!(input, b"<doc/>");
    ///
    /// let mut input: &[u8] = b"<\0d\0";
    /// assert_eq!(Encoding::sniff(&mut input), Encoding::Utf16Le);
    /// assert_eq!(input, b"<\0d\0");
    /// ```
    pub fn sniff(input: &mut &[u8]) -> Encoding {
        for &(mark, encoding) in &BYTE_ORDER_MARKS {
            if input.starts_with(mark) {
                *input = &input[mark.len()..];
                return encoding;
            }
        }

        match **input {
            [0, 0, 0, x, ..] if x != 0 => Encoding::Utf32Be,
            [x, 0, 0, 0, ..] if x != 0 => Encoding::Utf32Le,
            [0, x, ..] if x != 0 => Encoding::Utf16Be,
            [x, 0, ..] if x != 0 => Encoding::Utf16Le,
            _ => Encoding::Unknown,
        }
    }

    /// Whether text in this encoding can be tokenized as UTF-8.
    #[must_use]
    pub fn is_utf8_compatible(self) -> bool {
        matches!(self, Encoding::Utf8 | Encoding::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(bytes: &[u8]) -> (Encoding, usize) {
        let mut input = bytes;
        let encoding = Encoding::sniff(&mut input);
        (encoding, bytes.len() - input.len())
    }

    #[test]
    fn test_byte_order_marks() {
        assert_eq!(sniff(b"\xEF\xBB\xBF<a/>"), (Encoding::Utf8, 3));
        assert_eq!(sniff(b"\xFE\xFF\0<"), (Encoding::Utf16Be, 2));
        assert_eq!(sniff(b"\xFF\xFE<\0"), (Encoding::Utf16Le, 2));
        assert_eq!(sniff(b"\0\0\xFE\xFF\0\0\0<"), (Encoding::Utf32Be, 4));
        assert_eq!(sniff(b"\xFF\xFE\0\0<\0\0\0"), (Encoding::Utf32Le, 4));
    }

    #[test]
    fn test_null_byte_heuristic() {
        assert_eq!(sniff(b"\0\0\0<"), (Encoding::Utf32Be, 0));
        assert_eq!(sniff(b"<\0\0\0"), (Encoding::Utf32Le, 0));
        assert_eq!(sniff(b"\0<\0?"), (Encoding::Utf16Be, 0));
        assert_eq!(sniff(b"<\0?\0"), (Encoding::Utf16Le, 0));
        assert_eq!(sniff(b"<\0"), (Encoding::Utf16Le, 0));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(sniff(b"<?xml version='1.0'?>"), (Encoding::Unknown, 0));
        assert_eq!(sniff(b""), (Encoding::Unknown, 0));
        assert_eq!(sniff(b"\0\0"), (Encoding::Unknown, 0));
        assert!(Encoding::Unknown.is_utf8_compatible());
        assert!(!Encoding::Utf16Le.is_utf8_compatible());
    }
}
