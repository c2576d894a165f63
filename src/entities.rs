use crate::chars::is_xml_char;
use crate::utils::fail;
use crate::{Cursor, Error};

/// The five entities every XML processor knows without a DTD.
const BUILTIN_ENTITIES: [(&str, &str); 5] = [
    ("lt", "<"),
    ("gt", ">"),
    ("amp", "&"),
    ("quot", "\""),
    ("apos", "'"),
];

/// Resolve one of the built-in entities by name, e.g. `"lt"` to `"<"`.
#[must_use]
pub fn builtin_entity(name: &str) -> Option<&'static str> {
    BUILTIN_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, value)| *value)
}

macro_rules! mutate_character_reference {
    ($code:ident, $radix:expr, $digit:expr) => {
        match $code
            .checked_mul($radix)
            .and_then(|cr| cr.checked_add($digit))
        {
            Some(cr) => $code = cr,
            None => {
                // provoke err
                $code = 0x110000;
            }
        }
    };
}

/// Read a character reference. The cursor must be positioned right after `&#`, `start` is the
/// offset of the `&`.
pub(crate) fn read_character_reference(input: &mut Cursor<'_>, start: usize) -> Result<char, Error> {
    let hex = match input.peek_byte() {
        Some(b'x') => {
            input.advance(1);
            true
        }
        // XML only allows lowercase x, unlike HTML
        Some(b'X') => fail!(UppercaseXInCharacterReference, input.position()),
        Some(_) => false,
        None => fail!(EofInCharacterReference, start),
    };

    let radix = if hex { 16 } else { 10 };
    let mut code: u32 = 0;
    let mut has_digits = false;

    loop {
        match input.peek_byte() {
            Some(b';') => {
                input.advance(1);
                break;
            }
            Some(x @ b'0'..=b'9') => {
                mutate_character_reference!(code, radix, u32::from(x - b'0'));
            }
            Some(x @ b'a'..=b'f') if hex => {
                mutate_character_reference!(code, radix, u32::from(x - b'a' + 10));
            }
            Some(x @ b'A'..=b'F') if hex => {
                mutate_character_reference!(code, radix, u32::from(x - b'A' + 10));
            }
            Some(_) if has_digits => fail!(MissingSemicolonAfterCharacterReference, input.position()),
            Some(_) => fail!(AbsenceOfDigitsInCharacterReference, input.position()),
            None => fail!(EofInCharacterReference, start),
        }
        has_digits = true;
        input.advance(1);
    }

    if !has_digits {
        fail!(AbsenceOfDigitsInCharacterReference, start);
    }

    match char::from_u32(code) {
        Some(c) if is_xml_char(code) => Ok(c),
        _ => fail!(InvalidCharacterReference, start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn decode(s: &str) -> Result<char, ErrorKind> {
        let mut cursor = Cursor::new(s);
        assert!(cursor.try_read_string("&#"));
        read_character_reference(&mut cursor, 0).map_err(|e| e.kind)
    }

    #[test]
    fn test_builtin_entities() {
        assert_eq!(builtin_entity("lt"), Some("<"));
        assert_eq!(builtin_entity("apos"), Some("'"));
        assert_eq!(builtin_entity("nbsp"), None);
        assert_eq!(builtin_entity("LT"), None);
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode("&#65;"), Ok('A'));
        assert_eq!(decode("&#x41;"), Ok('A'));
        assert_eq!(decode("&#x1F600;"), Ok('\u{1F600}'));
        assert_eq!(decode("&#X41;"), Err(ErrorKind::UppercaseXInCharacterReference));
        assert_eq!(decode("&#;"), Err(ErrorKind::AbsenceOfDigitsInCharacterReference));
        assert_eq!(decode("&#x;"), Err(ErrorKind::AbsenceOfDigitsInCharacterReference));
        assert_eq!(decode("&#65"), Err(ErrorKind::EofInCharacterReference));
        assert_eq!(decode("&#6a;"), Err(ErrorKind::MissingSemicolonAfterCharacterReference));
    }

    #[test]
    fn test_invalid_code_points() {
        assert_eq!(decode("&#0;"), Err(ErrorKind::InvalidCharacterReference));
        assert_eq!(decode("&#xD800;"), Err(ErrorKind::InvalidCharacterReference));
        assert_eq!(decode("&#x110000;"), Err(ErrorKind::InvalidCharacterReference));
        assert_eq!(
            decode("&#99999999999999999999;"),
            Err(ErrorKind::InvalidCharacterReference)
        );
    }
}
