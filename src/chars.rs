//! Character classes from the XML 1.0 (fifth edition) grammar.

#[inline]
pub(crate) fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// `NameStartChar`
pub(crate) fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// `NameChar`
pub(crate) fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}'
        )
}

/// `PubidChar`
pub(crate) fn is_pubid_char(c: char) -> bool {
    matches!(c,
        ' ' | '\r' | '\n'
        | 'a'..='z' | 'A'..='Z' | '0'..='9'
        | '-' | '\'' | '(' | ')' | '+' | ',' | '.' | '/' | ':'
        | '=' | '?' | ';' | '!' | '*' | '#' | '@' | '$' | '_' | '%'
    )
}

/// `Char`, the set of characters a character reference may produce.
pub(crate) fn is_xml_char(c: u32) -> bool {
    matches!(c,
        0x9 | 0xA | 0xD
        | 0x20..=0xD7FF
        | 0xE000..=0xFFFD
        | 0x10000..=0x10FFFF
    )
}

#[test]
fn test_name_chars() {
    assert!(is_name_start_char('é'));
    assert!(is_name_start_char(':'));
    assert!(!is_name_start_char('-'));
    assert!(!is_name_start_char('1'));
    assert!(is_name_char('-'));
    assert!(is_name_char('\u{B7}'));
    assert!(!is_name_char(' '));
    assert!(!is_name_char('>'));
}

#[test]
fn test_pubid_chars() {
    assert!("-//W3C//DTD XHTML 1.0 Strict//EN".chars().all(is_pubid_char));
    assert!(!is_pubid_char('"'));
    assert!(!is_pubid_char('\t'));
}
