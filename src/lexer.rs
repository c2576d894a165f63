//! Grammar-level readers used by the state machine in [`crate::machine`].
//!
//! Every reader consumes exactly one construct from the cursor. On error the cursor is left
//! somewhere inside of the construct, which is fine because errors are not recoverable.
use std::borrow::Cow;

use crate::chars::{is_name_char, is_name_start_char, is_pubid_char};
use crate::entities::{builtin_entity, read_character_reference};
use crate::utils::{fail, trace_log};
use crate::{Cursor, Error};

/// Read a `Name`.
pub(crate) fn read_name<'a>(input: &mut Cursor<'a>) -> Result<&'a str, Error> {
    match input.peek() {
        Some(c) if is_name_start_char(c) => {}
        _ => fail!(InvalidNameStartCharacter, input.position()),
    }

    Ok(input.read_while(is_name_char))
}

/// Read the name of an entity reference. The cursor must be positioned right after `&`.
pub(crate) fn read_entity_reference<'a>(
    input: &mut Cursor<'a>,
    start: usize,
) -> Result<&'a str, Error> {
    if input.is_empty() {
        fail!(EofInEntityReference, start);
    }

    let name = read_name(input)?;
    match input.peek_byte() {
        Some(b';') => {
            input.advance(1);
            Ok(name)
        }
        Some(_) => fail!(MissingSemicolonAfterEntityReference, input.position()),
        None => fail!(EofInEntityReference, start),
    }
}

/// Read `name="value"` inside of a start tag.
///
/// Unlike in content, references in attribute values are resolved right away. The value is only
/// allocated if it contains references.
pub(crate) fn read_attribute<'a>(
    input: &mut Cursor<'a>,
) -> Result<(&'a str, Cow<'a, str>), Error> {
    let start = input.position();
    let name = read_name(input)?;

    input.skip_whitespace();
    match input.peek_byte() {
        Some(b'=') => input.advance(1),
        Some(_) => fail!(MissingEqualsAfterAttributeName, input.position()),
        None => fail!(EofInAttribute, start),
    }
    input.skip_whitespace();

    let quote = match input.peek_byte() {
        Some(quote @ b'"') | Some(quote @ b'\'') => {
            input.advance(1);
            quote
        }
        Some(_) => fail!(MissingQuoteBeforeAttributeValue, input.position()),
        None => fail!(EofInAttribute, start),
    };

    let mut value = Cow::Borrowed(input.read_attribute_value_chunk(quote));

    loop {
        match input.peek_byte() {
            Some(x) if x == quote => {
                input.advance(1);
                break;
            }
            Some(b'&') => {
                let reference_start = input.position();
                input.advance(1);
                if input.try_read_string("#") {
                    let c = read_character_reference(input, reference_start)?;
                    value.to_mut().push(c);
                } else {
                    let entity = read_entity_reference(input, reference_start)?;
                    match builtin_entity(entity) {
                        Some(resolved) => value.to_mut().push_str(resolved),
                        None => fail!(UnknownEntityInAttributeValue, reference_start),
                    }
                }
            }
            Some(b'<') => fail!(LessThanInAttributeValue, input.position()),
            Some(_) => {
                // only reachable after a reference, the first chunk has been read above
                let chunk = input.read_attribute_value_chunk(quote);
                value.to_mut().push_str(chunk);
            }
            None => fail!(EofInAttribute, start),
        }
    }

    Ok((name, value))
}

/// Read a comment body. The cursor must be positioned right after `<!--`.
pub(crate) fn read_comment<'a>(input: &mut Cursor<'a>, start: usize) -> Result<&'a str, Error> {
    let body_start = input.position();
    let len = match input.rest().find("--") {
        Some(len) => len,
        None => fail!(EofInComment, start),
    };

    input.advance(len);
    let content = input.slice_from(body_start);

    if input.try_read_string("-->") {
        Ok(content)
    } else if input.rest().len() == 2 {
        fail!(EofInComment, start)
    } else {
        fail!(DoubleHyphenInComment, input.position())
    }
}

/// Read a CDATA section body. The cursor must be positioned right after `<![CDATA[`.
pub(crate) fn read_cdata_section<'a>(
    input: &mut Cursor<'a>,
    start: usize,
) -> Result<&'a str, Error> {
    match input.read_until_terminator("]]>") {
        Some(content) => Ok(content),
        None => fail!(EofInCdata, start),
    }
}

/// Read a processing instruction. The cursor must be positioned right after `<?`.
pub(crate) fn read_processing_instruction<'a>(
    input: &mut Cursor<'a>,
    start: usize,
) -> Result<(&'a str, &'a str), Error> {
    if input.is_empty() {
        fail!(EofInProcessingInstruction, start);
    }

    let target = read_name(input)?;

    if input.try_read_string("?>") {
        return Ok((target, ""));
    }

    if !input.skip_whitespace() {
        if input.is_empty() {
            fail!(EofInProcessingInstruction, start);
        }
        fail!(MissingWhitespaceAfterProcessingInstructionTarget, input.position());
    }

    match input.read_until_terminator("?>") {
        Some(content) => Ok((target, content)),
        None => fail!(EofInProcessingInstruction, start),
    }
}

/// The parts of a DOCTYPE header, see [`read_doctype`].
#[derive(Debug)]
pub(crate) struct DoctypeHeader<'a> {
    pub name: &'a str,
    pub pubid_literal: Option<&'a str>,
    pub system_literal: Option<&'a str>,
}

/// Read a DOCTYPE name and external id. The cursor must be positioned right after `<!DOCTYPE`.
///
/// Whatever follows the external id (whitespace, `>`, an internal subset) is left to the
/// `InDoctype` state.
pub(crate) fn read_doctype<'a>(
    input: &mut Cursor<'a>,
    start: usize,
) -> Result<DoctypeHeader<'a>, Error> {
    require_doctype_whitespace(input, start)?;
    let name = read_name(input)?;

    let mut header = DoctypeHeader {
        name,
        pubid_literal: None,
        system_literal: None,
    };

    // Only consume the whitespace if an external id follows. Otherwise leave it for the
    // InDoctype state, it does not matter which one skips it.
    let checkpoint = *input;
    input.skip_whitespace();

    if input.try_read_string("SYSTEM") {
        require_doctype_whitespace(input, start)?;
        header.system_literal = Some(read_doctype_literal(input, start)?);
    } else if input.try_read_string("PUBLIC") {
        require_doctype_whitespace(input, start)?;
        let literal_start = input.position() + 1;
        let pubid = read_doctype_literal(input, start)?;
        if let Some((i, _)) = pubid.char_indices().find(|&(_, c)| !is_pubid_char(c)) {
            fail!(InvalidCharacterInPubidLiteral, literal_start + i);
        }
        header.pubid_literal = Some(pubid);
        require_doctype_whitespace(input, start)?;
        header.system_literal = Some(read_doctype_literal(input, start)?);
    } else {
        *input = checkpoint;
    }

    trace_log!(
        "doctype: name={:?} pubid={:?} system={:?}",
        header.name,
        header.pubid_literal,
        header.system_literal
    );

    Ok(header)
}

fn require_doctype_whitespace(input: &mut Cursor<'_>, start: usize) -> Result<(), Error> {
    if input.skip_whitespace() {
        Ok(())
    } else if input.is_empty() {
        fail!(EofInDoctype, start)
    } else {
        fail!(MissingWhitespaceInDoctype, input.position())
    }
}

fn read_doctype_literal<'a>(input: &mut Cursor<'a>, start: usize) -> Result<&'a str, Error> {
    let quote = match input.peek_byte() {
        Some(b'"') => "\"",
        Some(b'\'') => "'",
        Some(_) => fail!(MissingQuoteBeforeDoctypeLiteral, input.position()),
        None => fail!(EofInDoctype, start),
    };
    input.advance(1);

    match input.read_until_terminator(quote) {
        Some(literal) => Ok(literal),
        None => fail!(EofInDoctype, start),
    }
}
