use std::borrow::Cow;

use crate::chars::is_name_start_char;
use crate::entities::{builtin_entity, read_character_reference};
use crate::lexer;
use crate::utils::{fail, trace_log};
use crate::{Cursor, Emitter, Error, ParseState, Token};

/// Tokenize `input`, handing every token to `emitter`.
///
/// Returns `Ok(true)` if the emitter asked to stop while there is still unconsumed input, and
/// `Ok(false)` once all input has been consumed.
///
/// Input ending inside of a start tag or after a DOCTYPE header is not an error here, `state`
/// is left at [`ParseState::Attrs`] or [`ParseState::InDoctype`] so the next chunk can finish
/// it. Check `state` after the last chunk, or use [`crate::Tokenizer`], which reports it.
///
/// `state` and `input` together describe where tokenization stopped. Calling `tokenize` again
/// with both picks up exactly there. A token never spans two calls, so `input` can also be
/// replaced by a new cursor over the next chunk of a document, as long as every chunk ends
/// between two tokens:
///
/// ```
/// use xmlgum::{tokenize, Cursor, DefaultEmitter, ParseState};
///
/// let mut state = ParseState::default();
/// let mut split = DefaultEmitter::default();
/// tokenize(&mut split, &mut state, &mut Cursor::new("<a>")).unwrap();
/// tokenize(&mut split, &mut state, &mut Cursor::new("<b/></a>")).unwrap();
///
/// let mut whole = DefaultEmitter::default();
/// tokenize(&mut whole, &mut ParseState::default(), &mut Cursor::new("<a><b/></a>")).unwrap();
///
/// assert_eq!(split, whole);
/// ```
///
/// # Errors
///
/// Malformed input aborts tokenization with an [`Error`]. Tokens emitted before that stay
/// with the emitter, `state` and `input` should not be used for resumption afterwards.
pub fn tokenize<'a, E>(
    emitter: &mut E,
    state: &mut ParseState,
    input: &mut Cursor<'a>,
) -> Result<bool, Error>
where
    E: Emitter<'a> + ?Sized,
{
    loop {
        let token = match *state {
            ParseState::Tags => tags(state, input)?,
            ParseState::Attrs => attrs(state, input)?,
            ParseState::InDoctype => in_doctype(state, input)?,
        };

        let token = match token {
            Some(token) => token,
            None => return Ok(false),
        };

        trace_log!("emit: {:?} (state after: {:?})", token, state);

        if emitter.emit(token).is_break() {
            return Ok(!input.is_empty());
        }
    }
}

macro_rules! switch_to {
    ($state:expr, $new_state:ident) => {{
        trace_log!("switch_to: {:?} -> {:?}", $state, ParseState::$new_state);
        *$state = ParseState::$new_state;
    }};
}

/// Read one token in [`ParseState::Tags`], or return `None` at the end of input.
fn tags<'a>(state: &mut ParseState, input: &mut Cursor<'a>) -> Result<Option<Token<'a>>, Error> {
    let start = input.position();

    let token = match input.peek_byte() {
        None => return Ok(None),
        Some(b'<') => {
            input.advance(1);
            markup(state, input, start)?
        }
        Some(b'&') => {
            input.advance(1);
            if input.try_read_string("#") {
                let c = read_character_reference(input, start)?;
                Token::CharData(Cow::Owned(c.to_string()))
            } else {
                let name = lexer::read_entity_reference(input, start)?;
                match builtin_entity(name) {
                    Some(resolved) => Token::CharData(Cow::Borrowed(resolved)),
                    None => Token::EntityReference(Cow::Borrowed(name)),
                }
            }
        }
        Some(_) => Token::CharData(Cow::Borrowed(input.read_char_data())),
    };

    Ok(Some(token))
}

/// Read the markup construct starting with `<`. The cursor is positioned right after `<`.
fn markup<'a>(
    state: &mut ParseState,
    input: &mut Cursor<'a>,
    start: usize,
) -> Result<Token<'a>, Error> {
    match input.peek() {
        Some('/') => {
            input.advance(1);
            let name = lexer::read_name(input)?;
            input.skip_whitespace();
            match input.peek_byte() {
                Some(b'>') => input.advance(1),
                Some(_) => fail!(InvalidCharacterInCloseTag, input.position()),
                None => fail!(EofInCloseTag, start),
            }
            Ok(Token::CloseElement(Cow::Borrowed(name)))
        }
        Some('!') => {
            input.advance(1);
            if input.try_read_string("--") {
                let content = lexer::read_comment(input, start)?;
                Ok(Token::Comment(Cow::Borrowed(content)))
            } else if input.try_read_string("[") {
                if !input.try_read_string("CDATA[") {
                    if "CDATA[".starts_with(input.rest()) {
                        fail!(EofInCdata, start);
                    }
                    fail!(InvalidMarkupDeclaration, start);
                }
                let content = lexer::read_cdata_section(input, start)?;
                Ok(Token::CDataSection(Cow::Borrowed(content)))
            } else if input.try_read_string("DOCTYPE") {
                let header = lexer::read_doctype(input, start)?;
                switch_to!(state, InDoctype);
                Ok(Token::Doctype {
                    name: Cow::Borrowed(header.name),
                    pubid_literal: header.pubid_literal.map(Cow::Borrowed),
                    system_literal: header.system_literal.map(Cow::Borrowed),
                })
            } else {
                // the input might just end within one of the keywords
                let rest = input.rest();
                if rest.is_empty() {
                    fail!(EofInMarkupDeclaration, start)
                } else if "--".starts_with(rest) {
                    fail!(EofInComment, start)
                } else if "DOCTYPE".starts_with(rest) {
                    fail!(EofInDoctype, start)
                } else {
                    fail!(InvalidMarkupDeclaration, start)
                }
            }
        }
        Some('?') => {
            input.advance(1);
            let (target, content) = lexer::read_processing_instruction(input, start)?;
            Ok(Token::Pi {
                target: Cow::Borrowed(target),
                content: Cow::Borrowed(content),
            })
        }
        Some(c) if is_name_start_char(c) => {
            let name = lexer::read_name(input)?;
            switch_to!(state, Attrs);
            Ok(Token::OpenElement(Cow::Borrowed(name)))
        }
        Some(_) => fail!(InvalidFirstCharacterOfTagName, input.position()),
        None => fail!(EofBeforeTagName, start),
    }
}

/// Read one token in [`ParseState::Attrs`], or return `None` at the end of input.
fn attrs<'a>(state: &mut ParseState, input: &mut Cursor<'a>) -> Result<Option<Token<'a>>, Error> {
    let had_whitespace = input.skip_whitespace();

    let token = match input.peek() {
        None => return Ok(None),
        Some('>') => {
            input.advance(1);
            switch_to!(state, Tags);
            Token::OpenTagDone
        }
        Some('/') => {
            let start = input.position();
            input.advance(1);
            match input.peek_byte() {
                Some(b'>') => input.advance(1),
                Some(_) => fail!(UnexpectedSolidusInTag, start),
                None => fail!(EofAfterSolidusInTag, start),
            }
            switch_to!(state, Tags);
            Token::EmptyOpenTagDone
        }
        Some(c) if is_name_start_char(c) => {
            let start = input.position();
            // The tag name or a previous attribute always ends right before this one, so
            // this can only be missing whitespace. At the start of a resumed call the
            // whitespace might have been skipped by the previous call already.
            if !had_whitespace && start > 0 {
                fail!(MissingWhitespaceBetweenAttributes, start);
            }
            let (name, value) = lexer::read_attribute(input)?;
            Token::Attr {
                name: Cow::Borrowed(name),
                value,
            }
        }
        Some(_) => fail!(InvalidCharacterInTag, input.position()),
    };

    Ok(Some(token))
}

/// Read one token in [`ParseState::InDoctype`], or return `None` at the end of input.
fn in_doctype<'a>(
    state: &mut ParseState,
    input: &mut Cursor<'a>,
) -> Result<Option<Token<'a>>, Error> {
    input.skip_whitespace();

    match input.peek_byte() {
        None => Ok(None),
        Some(b'>') => {
            input.advance(1);
            switch_to!(state, Tags);
            Ok(Some(Token::DoctypeDone))
        }
        Some(b'[') => fail!(InternalSubsetUnsupported, input.position()),
        Some(_) => fail!(InvalidCharacterInDoctype, input.position()),
    }
}
