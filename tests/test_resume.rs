use std::ops::ControlFlow;

use pretty_assertions::assert_eq;

use xmlgum::{tokenize, CallbackEmitter, Cursor, DefaultEmitter, ParseState, Token};

fn tokenize_all(input: &str) -> Vec<Token<'_>> {
    let mut emitter = DefaultEmitter::default();
    tokenize(&mut emitter, &mut ParseState::default(), &mut Cursor::new(input)).unwrap();
    emitter.into_tokens()
}

#[test]
fn test_two_buffers_share_state() {
    let mut state = ParseState::default();
    let mut emitter = DefaultEmitter::default();

    assert!(!tokenize(&mut emitter, &mut state, &mut Cursor::new("<a>")).unwrap());
    assert_eq!(state, ParseState::Tags);
    assert!(!tokenize(&mut emitter, &mut state, &mut Cursor::new("<b/></a>")).unwrap());

    assert_eq!(emitter.into_tokens(), tokenize_all("<a><b/></a>"));
}

#[test]
fn test_split_inside_of_start_tag() {
    let mut state = ParseState::default();
    let mut emitter = DefaultEmitter::default();

    tokenize(&mut emitter, &mut state, &mut Cursor::new("<a x='1'")).unwrap();
    assert_eq!(state, ParseState::Attrs);
    tokenize(&mut emitter, &mut state, &mut Cursor::new(" y='2'>t</a>")).unwrap();

    assert_eq!(emitter.into_tokens(), tokenize_all("<a x='1' y='2'>t</a>"));
}

#[test]
fn test_split_inside_of_doctype() {
    let mut state = ParseState::default();
    let mut emitter = DefaultEmitter::default();

    tokenize(&mut emitter, &mut state, &mut Cursor::new("<!DOCTYPE doc")).unwrap();
    assert_eq!(state, ParseState::InDoctype);
    tokenize(&mut emitter, &mut state, &mut Cursor::new(">")).unwrap();

    assert_eq!(
        emitter.into_tokens(),
        vec![
            Token::Doctype {
                name: "doc".into(),
                pubid_literal: None,
                system_literal: None,
            },
            Token::DoctypeDone,
        ]
    );
}

#[test]
fn test_stop_and_resume() {
    let input = "<a><b>text</b><c/></a>";
    let mut state = ParseState::default();
    let mut cursor = Cursor::new(input);
    let mut tokens = Vec::new();

    loop {
        let mut emitter = CallbackEmitter::new(|token: Token<'_>| {
            let is_close = matches!(token, Token::CloseElement(_));
            tokens.push(token.into_owned());
            if is_close {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        if !tokenize(&mut emitter, &mut state, &mut cursor).unwrap() {
            break;
        }
    }

    assert_eq!(tokens, tokenize_all(input));
}

#[test]
fn test_stop_at_end_of_input() {
    let mut cursor = Cursor::new("<a/>");
    let mut emitter = CallbackEmitter::new(|_token: Token<'_>| ControlFlow::Break(()));
    let mut state = ParseState::default();

    assert!(tokenize(&mut emitter, &mut state, &mut cursor).unwrap());
    assert_eq!(cursor.rest(), "/>");
    assert!(!tokenize(&mut emitter, &mut state, &mut cursor).unwrap());
    assert!(cursor.is_empty());
    assert!(!tokenize(&mut emitter, &mut state, &mut cursor).unwrap());
}

#[test]
fn test_no_sink() {
    let mut cursor = Cursor::new("<a><!-- ok --></a>");
    assert!(!tokenize(&mut (), &mut ParseState::default(), &mut cursor).unwrap());

    let mut cursor = Cursor::new("<a><!-- not -- ok --></a>");
    assert!(tokenize(&mut (), &mut ParseState::default(), &mut cursor).is_err());
}

#[test]
fn test_dyn_emitter() {
    let mut collected = DefaultEmitter::default();
    let emitter: &mut dyn xmlgum::Emitter<'_> = &mut collected;
    tokenize(emitter, &mut ParseState::default(), &mut Cursor::new("<a/>")).unwrap();
    assert_eq!(collected.tokens().len(), 2);
}

#[test]
fn test_attribute_at_start_of_resumed_call() {
    // Whitespace consumed at the end of the previous chunk is not tracked in `ParseState`, so an
    // attribute starting a chunk is accepted without it.
    let mut state = ParseState::default();
    let mut emitter = DefaultEmitter::default();

    tokenize(&mut emitter, &mut state, &mut Cursor::new("<a x='1'")).unwrap();
    tokenize(&mut emitter, &mut state, &mut Cursor::new("y='2'>")).unwrap();
    assert_eq!(state, ParseState::Tags);
    assert_eq!(emitter.into_tokens(), tokenize_all("<a x='1' y='2'>"));

    let mut cursor = Cursor::new("<a x='1'y='2'>");
    let error = tokenize(&mut (), &mut ParseState::default(), &mut cursor).unwrap_err();
    assert_eq!(error.kind, xmlgum::ErrorKind::MissingWhitespaceBetweenAttributes);
}
