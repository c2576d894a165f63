/// A position within a borrowed input buffer. Used by the tokenizer to read XML from strings.
///
/// The cursor never copies its input. Tokens that are plain views into the input are produced
/// by slicing between two offsets of the same cursor.
///
/// ```rust
/// use xmlgum::{tokenize, Cursor, DefaultEmitter, ParseState, Token};
///
/// let mut emitter = DefaultEmitter::default();
/// let mut state = ParseState::default();
/// let mut cursor = Cursor::new("<title>hello world</title>");
///
/// let stopped_early = tokenize(&mut emitter, &mut state, &mut cursor).unwrap();
/// assert!(!stopped_early);
/// assert!(cursor.is_empty());
/// assert_eq!(emitter.tokens()[3], Token::CharData("hello world".into()));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    /// The whole input buffer, including already consumed parts.
    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the next unconsumed character.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The input that has not been consumed yet.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Whether all input has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub(crate) fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    /// Skip `n` bytes. `n` must end on a character boundary.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.input.is_char_boundary(self.position + n));
        self.position += n;
    }

    /// If the next characters equal to `s`, consume them and return `true`. If not, do nothing
    /// and return `false`.
    #[inline]
    pub(crate) fn try_read_string(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.position += s.len();
            true
        } else {
            false
        }
    }

    /// Whether the unconsumed input starts with `s`, without consuming anything.
    #[inline]
    pub(crate) fn lookahead(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// The text between `start` and the current position.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.position]
    }

    /// Consume whitespace. Return whether there was any.
    pub(crate) fn skip_whitespace(&mut self) -> bool {
        let start = self.position;
        while let Some(b) = self.peek_byte() {
            if !crate::chars::is_whitespace_byte(b) {
                break;
            }
            self.position += 1;
        }
        self.position != start
    }

    /// Consume characters while `f` returns true and return them.
    pub(crate) fn read_while(&mut self, mut f: impl FnMut(char) -> bool) -> &'a str {
        let start = self.position;
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !f(c))
            .map_or(self.rest().len(), |(i, _)| i);
        self.position += len;
        self.slice_from(start)
    }

    /// Consume and return all text up to (not including) the first occurrence of `terminator`,
    /// then consume the terminator too. If the terminator is never found, nothing is consumed.
    pub(crate) fn read_until_terminator(&mut self, terminator: &str) -> Option<&'a str> {
        let len = self.rest().find(terminator)?;
        let start = self.position;
        self.position += len;
        let rv = self.slice_from(start);
        self.position += terminator.len();
        Some(rv)
    }

    /// Consume and return all text up to the next `<` or `&`, or the end of input.
    pub(crate) fn read_char_data(&mut self) -> &'a str {
        let start = self.position;
        let len = fast_find_markup(self.rest().as_bytes()).unwrap_or(self.rest().len());
        self.position += len;
        self.slice_from(start)
    }

    /// Consume and return all text up to the next `quote`, `&` or `<`, or the end of input.
    pub(crate) fn read_attribute_value_chunk(&mut self, quote: u8) -> &'a str {
        let start = self.position;
        let len =
            fast_find_attribute_delimiter(quote, self.rest().as_bytes()).unwrap_or(self.rest().len());
        self.position += len;
        self.slice_from(start)
    }
}

// All needles are ASCII, so every returned index is a character boundary.

#[cfg(feature = "jetscii")]
#[inline]
fn fast_find_markup(haystack: &[u8]) -> Option<usize> {
    jetscii::bytes!(b'<', b'&').find(haystack)
}

#[cfg(not(feature = "jetscii"))]
#[inline]
fn fast_find_markup(haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == b'<' || b == b'&')
}

#[cfg(feature = "jetscii")]
#[inline]
fn fast_find_attribute_delimiter(quote: u8, haystack: &[u8]) -> Option<usize> {
    if quote == b'"' {
        jetscii::bytes!(b'"', b'&', b'<').find(haystack)
    } else {
        jetscii::bytes!(b'\'', b'&', b'<').find(haystack)
    }
}

#[cfg(not(feature = "jetscii"))]
#[inline]
fn fast_find_attribute_delimiter(quote: u8, haystack: &[u8]) -> Option<usize> {
    haystack
        .iter()
        .position(|&b| b == quote || b == b'&' || b == b'<')
}

#[test]
fn test_read_until_terminator() {
    let mut cursor = Cursor::new("[cdata]]]>rest");
    assert_eq!(cursor.read_until_terminator("]]>"), Some("[cdata]"));
    assert_eq!(cursor.rest(), "rest");
    assert_eq!(cursor.read_until_terminator("]]>"), None);
    assert_eq!(cursor.rest(), "rest");
}

#[test]
fn test_read_char_data() {
    let mut cursor = Cursor::new("hello wörld<a>");
    assert_eq!(cursor.read_char_data(), "hello wörld");
    assert_eq!(cursor.peek(), Some('<'));
    assert_eq!(cursor.read_char_data(), "");
}
