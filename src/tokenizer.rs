use std::borrow::Cow;
use std::ops::ControlFlow;

use crate::utils::{fail, trace_log};
use crate::{
    read_declaration, tokenize, CallbackEmitter, Cursor, Declaration, Encoding, Error, ErrorKind,
    ParseState, Token,
};

/// A pull-style XML tokenizer. See crate-level docs for basic usage.
///
/// The tokenizer is always positioned on one token, [`Tokenizer::current`], and moves on with
/// [`Tokenizer::advance`]. It can also be used as an iterator. [`Token::OpenTagDone`] is never
/// surfaced: a start tag is complete once the next token that is not an [`Token::Attr`] shows up.
///
/// The input is a complete document: unlike [`crate::tokenize`], input ending inside of a start
/// tag or a DOCTYPE fails with `eof-in-tag` or `eof-in-doctype`.
///
/// An XML declaration at the start of the input is read up front and is available through
/// [`Tokenizer::declaration`] instead of being part of the token stream.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    state: ParseState,
    current: Option<Token<'a>>,
    declaration: Option<Declaration<'a>>,
    open_elements: Vec<Cow<'a, str>>,
    check_nesting: bool,
    // nesting violation caused by `current`, raised only if `check_nesting` is enabled
    violation: Option<Error>,
    pending_error: Option<Error>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input` and read the first token.
    ///
    /// # Errors
    ///
    /// If the XML declaration or the first token is malformed.
    pub fn new(input: &'a str) -> Result<Self, Error> {
        let mut cursor = Cursor::new(input);
        let declaration = read_declaration(&mut cursor)?;
        Tokenizer::with_declaration(cursor, declaration)
    }

    /// Create a tokenizer over raw bytes and read the first token.
    ///
    /// A byte order mark is skipped. Only UTF-8 input is supported. Error offsets are relative to
    /// the input after the byte order mark.
    ///
    /// ```
    /// use xmlgum::{ErrorKind, Token, Tokenizer};
    ///
    /// let tokenizer = Tokenizer::from_bytes(b"\xEF\xBB\xBF<?xml version='1.0'?><doc/>").unwrap();
    /// assert_eq!(tokenizer.declaration().unwrap().version, "1.0");
    /// assert_eq!(tokenizer.current(), Some(&Token::OpenElement("doc".into())));
    ///
    /// let error = Tokenizer::from_bytes(b"\xFF\xFE<\0d\0o\0c\0/\0>\0").unwrap_err();
    /// assert_eq!(error.kind, ErrorKind::UnsupportedEncoding);
    /// ```
    ///
    /// # Errors
    ///
    /// `unsupported-encoding` if the input is recognizably not UTF-8, or declares an encoding
    /// other than UTF-8. `invalid-utf8` if it isn't valid UTF-8 after all. Also every error
    /// [`Tokenizer::new`] can return.
    pub fn from_bytes(input: &'a [u8]) -> Result<Self, Error> {
        let mut bytes = input;
        let encoding = Encoding::sniff(&mut bytes);
        trace_log!("from_bytes: sniffed {:?}", encoding);

        if !encoding.is_utf8_compatible() {
            return Err(Error::new(ErrorKind::UnsupportedEncoding, 0));
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::new(ErrorKind::InvalidUtf8, e.valid_up_to()))?;

        let mut cursor = Cursor::new(text);
        let declaration = read_declaration(&mut cursor)?;

        if let Some(ref declaration) = declaration {
            if !declaration.is_utf8_compatible() {
                return Err(Error::new(ErrorKind::UnsupportedEncoding, 0));
            }
        }

        Tokenizer::with_declaration(cursor, declaration)
    }

    fn with_declaration(
        cursor: Cursor<'a>,
        declaration: Option<Declaration<'a>>,
    ) -> Result<Self, Error> {
        let mut tokenizer = Tokenizer {
            cursor,
            state: ParseState::default(),
            current: None,
            declaration,
            open_elements: Vec::new(),
            check_nesting: false,
            violation: None,
            pending_error: None,
        };
        tokenizer.advance()?;
        Ok(tokenizer)
    }

    /// The XML declaration at the start of the input, if there was one.
    pub fn declaration(&self) -> Option<&Declaration<'a>> {
        self.declaration.as_ref()
    }

    /// The token the tokenizer is positioned on, or `None` once all input has been consumed or
    /// an error occurred.
    pub fn current(&self) -> Option<&Token<'a>> {
        self.current.as_ref()
    }

    /// Enable or disable checking that end tags match start tags. Off by default.
    ///
    /// With the check enabled, an end tag that doesn't close the innermost open element fails
    /// with `mismatched-close-tag` (or `unexpected-close-tag` if no element is open), and
    /// reaching the end of input with elements still open fails with `unclosed-element`.
    ///
    /// ```
    /// use xmlgum::{ErrorKind, Token, Tokenizer};
    ///
    /// let mut tokenizer = Tokenizer::new("<a></b>").unwrap();
    /// tokenizer.check_nesting(true);
    /// assert_eq!(tokenizer.next().unwrap().unwrap(), Token::OpenElement("a".into()));
    /// assert_eq!(tokenizer.next().unwrap().unwrap_err().kind, ErrorKind::MismatchedCloseTag);
    /// assert!(tokenizer.next().is_none());
    /// ```
    pub fn check_nesting(&mut self, yes: bool) {
        self.check_nesting = yes;
        if yes {
            self.raise_violation();
        }
    }

    /// Move on to the next token.
    ///
    /// # Errors
    ///
    /// If the input is malformed at that point. The tokenizer has no current token afterwards.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.current = None;

        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        let (start, token) = self.read_token()?;
        self.current = token;
        self.violation = self.track_nesting(start);

        if self.check_nesting {
            self.raise_violation();
            if let Some(e) = self.pending_error.take() {
                return Err(e);
            }
        }

        Ok(())
    }

    fn raise_violation(&mut self) {
        if let Some(e) = self.violation.take() {
            trace_log!("nesting violation: {}", e);
            self.current = None;
            self.pending_error = Some(e);
        }
    }

    /// Read the next token other than `OpenTagDone`, along with its offset.
    fn read_token(&mut self) -> Result<(usize, Option<Token<'a>>), Error> {
        loop {
            let start = self.cursor.position();
            let mut token = None;
            let mut emitter = CallbackEmitter::new(|t: Token<'a>| {
                token = Some(t);
                ControlFlow::Break(())
            });
            tokenize(&mut emitter, &mut self.state, &mut self.cursor)?;

            match token {
                Some(Token::OpenTagDone) => continue,
                // no more chunks can follow to finish a start tag or DOCTYPE
                None => match self.state {
                    ParseState::Tags => return Ok((start, None)),
                    ParseState::Attrs => fail!(EofInTag, self.cursor.position()),
                    ParseState::InDoctype => fail!(EofInDoctype, self.cursor.position()),
                },
                token => return Ok((start, token)),
            }
        }
    }

    fn track_nesting(&mut self, start: usize) -> Option<Error> {
        match self.current {
            Some(Token::OpenElement(ref name)) => {
                self.open_elements.push(name.clone());
                None
            }
            Some(Token::EmptyOpenTagDone) => {
                self.open_elements.pop();
                None
            }
            Some(Token::CloseElement(ref name)) => match self.open_elements.last() {
                Some(open) if open == name => {
                    self.open_elements.pop();
                    None
                }
                Some(_) => Some(Error::new(ErrorKind::MismatchedCloseTag, start)),
                None => Some(Error::new(ErrorKind::UnexpectedCloseTag, start)),
            },
            None if !self.open_elements.is_empty() => {
                self.open_elements.clear();
                Some(Error::new(
                    ErrorKind::UnclosedElement,
                    self.cursor.position(),
                ))
            }
            _ => None,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = match self.current.take() {
            Some(token) => token,
            None => return self.pending_error.take().map(Err),
        };

        if let Err(e) = self.advance() {
            self.pending_error = Some(e);
        }

        Some(Ok(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_tag_done_is_hidden() {
        let tokens: Vec<_> = Tokenizer::new("<a x='1'>t</a>")
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpenElement("a".into()),
                Token::Attr {
                    name: "x".into(),
                    value: "1".into()
                },
                Token::CharData("t".into()),
                Token::CloseElement("a".into()),
            ]
        );
    }

    #[test]
    fn test_eof_inside_of_start_tag() {
        let mut tokenizer = Tokenizer::new("<doc x='1'").unwrap();
        assert_eq!(tokenizer.current(), Some(&Token::OpenElement("doc".into())));
        tokenizer.advance().unwrap();
        assert!(matches!(tokenizer.current(), Some(Token::Attr { .. })));

        let error = tokenizer.advance().unwrap_err();
        assert_eq!(error, Error::new(ErrorKind::EofInTag, 10));
        assert_eq!(tokenizer.current(), None);
    }

    #[test]
    fn test_eof_after_doctype_header() {
        let results: Vec<_> = Tokenizer::new("<!DOCTYPE doc").unwrap().collect();
        assert_eq!(
            results,
            vec![
                Ok(Token::Doctype {
                    name: "doc".into(),
                    pubid_literal: None,
                    system_literal: None,
                }),
                Err(Error::new(ErrorKind::EofInDoctype, 13)),
            ]
        );
    }

    #[test]
    fn test_first_token_violation() {
        let mut tokenizer = Tokenizer::new("</a>").unwrap();
        assert_eq!(tokenizer.current(), Some(&Token::CloseElement("a".into())));
        tokenizer.check_nesting(true);
        assert_eq!(tokenizer.current(), None);
        assert_eq!(
            tokenizer.advance().unwrap_err().kind,
            ErrorKind::UnexpectedCloseTag
        );
        assert_eq!(tokenizer.next(), None);
    }
}
