//! [Emitter] is how the tokenizer hands tokens to its caller.
//!
//! [`crate::tokenize`] calls [`Emitter::emit`] once per token. The emitter may ask the tokenizer
//! to stop after any token by returning [`ControlFlow::Break`]; the tokenizer then returns with
//! its state and the remaining input intact, so that tokenization can be resumed later.
//!
//! The following ways to consume tokens are available:
//!
//! * [DefaultEmitter], if you just want a `Vec` of tokens.
//! * [CallbackEmitter], to handle tokens in a closure.
//! * `()`, which discards all tokens. Useful for checking well-formedness only.
//! * [`crate::Writer`], which serializes tokens back to text.
//! * Implementing [Emitter] yourself.
use std::ops::ControlFlow;

use crate::utils::trace_log;
use crate::Token;

/// An object consuming tokens from the tokenizer.
///
/// This trait is object safe, `&mut dyn Emitter<'a>` can be passed to [`crate::tokenize`].
pub trait Emitter<'a> {
    /// Consume one token. Return [`ControlFlow::Break`] to make the tokenizer return after this
    /// token.
    fn emit(&mut self, token: Token<'a>) -> ControlFlow<()>;
}

impl<'a> Emitter<'a> for () {
    fn emit(&mut self, _token: Token<'a>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<'a, E: Emitter<'a> + ?Sized> Emitter<'a> for &mut E {
    fn emit(&mut self, token: Token<'a>) -> ControlFlow<()> {
        (**self).emit(token)
    }
}

/// The simplest emitter, collecting all tokens into a `Vec`.
///
/// ```
/// use xmlgum::{tokenize, Cursor, DefaultEmitter, ParseState, Token};
///
/// let mut emitter = DefaultEmitter::default();
/// let mut cursor = Cursor::new("<br/>");
/// tokenize(&mut emitter, &mut ParseState::default(), &mut cursor).unwrap();
///
/// assert_eq!(
///     emitter.into_tokens(),
///     vec![Token::OpenElement("br".into()), Token::EmptyOpenTagDone]
/// );
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefaultEmitter<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> DefaultEmitter<'a> {
    /// All tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Take all tokens emitted so far.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token<'a>> {
        self.tokens
    }
}

impl<'a> Emitter<'a> for DefaultEmitter<'a> {
    fn emit(&mut self, token: Token<'a>) -> ControlFlow<()> {
        self.tokens.push(token);
        ControlFlow::Continue(())
    }
}

/// Consume tokens through a callback.
///
/// The callback decides after each token whether tokenization should go on.
///
/// ```
/// // Collect the text inside of the first <title>, then stop reading.
/// use std::ops::ControlFlow;
/// use xmlgum::{tokenize, CallbackEmitter, Cursor, ParseState, Token};
///
/// let mut in_title = false;
/// let mut title = String::new();
/// let mut emitter = CallbackEmitter::new(|token: Token<'_>| {
///     match token {
///         Token::OpenElement(name) => in_title = name == "title",
///         Token::CharData(text) if in_title => title.push_str(&text),
///         Token::CloseElement(name) if name == "title" => return ControlFlow::Break(()),
///         _ => {}
///     }
///     ControlFlow::Continue(())
/// });
///
/// let mut cursor = Cursor::new("<doc><title>a &amp; b</title><body/></doc>");
/// let stopped_early = tokenize(&mut emitter, &mut ParseState::default(), &mut cursor).unwrap();
///
/// assert!(stopped_early);
/// assert_eq!(cursor.rest(), "<body/></doc>");
/// drop(emitter);
/// assert_eq!(title, "a & b");
/// ```
#[derive(Debug)]
pub struct CallbackEmitter<F> {
    callback: F,
}

impl<F> CallbackEmitter<F> {
    /// Create a new emitter. See type-level docs to understand basic usage.
    pub fn new(callback: F) -> Self {
        CallbackEmitter { callback }
    }
}

impl<'a, F> Emitter<'a> for CallbackEmitter<F>
where
    F: FnMut(Token<'a>) -> ControlFlow<()>,
{
    fn emit(&mut self, token: Token<'a>) -> ControlFlow<()> {
        let rv = (self.callback)(token);
        if rv.is_break() {
            trace_log!("callbacks: stop requested");
        }
        rv
    }
}
