use std::borrow::Cow;

use crate::lexer::read_name;
use crate::utils::{fail, trace_log};
use crate::{Cursor, Error};

/// The XML declaration, `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>`.
///
/// It is read once, before tokenization, by [`read_declaration`] and is not part of the token
/// stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration<'a> {
    /// `VersionNum`. Any value is accepted.
    pub version: Cow<'a, str>,
    /// `EncName`, if present.
    pub encoding: Option<Cow<'a, str>>,
    /// Whether the document is standalone. `true` unless declared `standalone="no"`.
    pub standalone: bool,
}

impl Default for Declaration<'_> {
    fn default() -> Self {
        Declaration {
            version: Cow::Borrowed("1.0"),
            encoding: None,
            standalone: true,
        }
    }
}

impl Declaration<'_> {
    /// Whether the declared encoding (or the lack of one) means the document is UTF-8 or a
    /// subset of it.
    #[must_use]
    pub fn is_utf8_compatible(&self) -> bool {
        match self.encoding {
            None => true,
            Some(ref encoding) => ["utf-8", "utf8", "us-ascii", "ascii"]
                .iter()
                .any(|x| encoding.eq_ignore_ascii_case(x)),
        }
    }
}

/// Read an XML declaration at the start of `input`.
///
/// If `input` does not start with `<?xml` followed by whitespace, `Ok(None)` is returned and the
/// cursor is not touched. Otherwise the cursor is advanced past the declaration.
///
/// ```
/// use xmlgum::{read_declaration, Cursor};
///
/// let mut cursor = Cursor::new("<?xml version='1.1' standalone='no'?><doc/>");
/// let declaration = read_declaration(&mut cursor).unwrap().unwrap();
/// assert_eq!(declaration.version, "1.1");
/// assert_eq!(declaration.encoding, None);
/// assert!(!declaration.standalone);
/// assert_eq!(cursor.rest(), "<doc/>");
/// ```
///
/// # Errors
///
/// If the declaration is malformed: `version` missing, attributes in the wrong order or
/// unknown, a `standalone` value other than `yes`/`no`, or no closing `?>`.
pub fn read_declaration<'a>(input: &mut Cursor<'a>) -> Result<Option<Declaration<'a>>, Error> {
    let start = input.position();
    let is_declaration = input.lookahead("<?xml")
        && input
            .rest()
            .as_bytes()
            .get(5)
            .map_or(false, |&b| crate::chars::is_whitespace_byte(b));

    if !is_declaration {
        return Ok(None);
    }

    input.advance(5);

    let mut version = None;
    let mut encoding = None;
    let mut standalone = None;

    loop {
        let had_whitespace = input.skip_whitespace();

        if input.try_read_string("?>") {
            break;
        }

        if input.is_empty() {
            fail!(EofInDeclaration, start);
        }

        if !had_whitespace {
            fail!(MissingWhitespaceInDeclaration, input.position());
        }

        let attribute_start = input.position();
        let (name, value) = read_pseudo_attribute(input, start)?;
        trace_log!("declaration: {}={:?}", name, value);

        match name {
            "version" if version.is_none() && encoding.is_none() && standalone.is_none() => {
                version = Some(value);
            }
            "encoding" if version.is_some() && encoding.is_none() && standalone.is_none() => {
                encoding = Some(value);
            }
            "standalone" if version.is_some() && standalone.is_none() => {
                standalone = Some(match value {
                    "yes" => true,
                    "no" => false,
                    _ => fail!(InvalidStandaloneValue, attribute_start),
                });
            }
            "encoding" | "standalone" if version.is_none() => {
                fail!(MissingVersionInDeclaration, attribute_start)
            }
            "version" | "encoding" | "standalone" => {
                fail!(DeclarationAttributesOutOfOrder, attribute_start)
            }
            _ => fail!(UnknownDeclarationAttribute, attribute_start),
        }
    }

    let version = match version {
        Some(version) => version,
        None => fail!(MissingVersionInDeclaration, start),
    };

    Ok(Some(Declaration {
        version: Cow::Borrowed(version),
        encoding: encoding.map(Cow::Borrowed),
        standalone: standalone.unwrap_or(true),
    }))
}

/// Read `name = "value"` inside of the XML declaration.
fn read_pseudo_attribute<'a>(
    input: &mut Cursor<'a>,
    start: usize,
) -> Result<(&'a str, &'a str), Error> {
    let name = read_name(input)?;

    input.skip_whitespace();
    if !input.try_read_string("=") {
        if input.is_empty() {
            fail!(EofInDeclaration, start);
        }
        fail!(MalformedDeclarationAttribute, input.position());
    }
    input.skip_whitespace();

    let quote = match input.peek_byte() {
        Some(b'"') => "\"",
        Some(b'\'') => "'",
        Some(_) => fail!(MalformedDeclarationAttribute, input.position()),
        None => fail!(EofInDeclaration, start),
    };
    input.advance(1);

    match input.read_until_terminator(quote) {
        Some(value) => Ok((name, value)),
        None => fail!(EofInDeclaration, start),
    }
}
