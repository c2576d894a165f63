use pretty_assertions::assert_eq;

use xmlgum::{Error, ErrorKind, Token, Tokenizer};

fn collect(mut tokenizer: Tokenizer<'_>, check_nesting: bool) -> Result<Vec<Token<'_>>, Error> {
    tokenizer.check_nesting(check_nesting);
    tokenizer.collect()
}

#[test]
fn test_current_and_advance() {
    let mut tokenizer = Tokenizer::new("<a x='1'>hi</a>").unwrap();
    let mut seen = Vec::new();

    while let Some(token) = tokenizer.current() {
        seen.push(token.clone());
        tokenizer.advance().unwrap();
    }

    assert_eq!(
        seen,
        vec![
            Token::OpenElement("a".into()),
            Token::Attr {
                name: "x".into(),
                value: "1".into(),
            },
            Token::CharData("hi".into()),
            Token::CloseElement("a".into()),
        ]
    );

    // advancing past the end stays at the end
    tokenizer.advance().unwrap();
    assert_eq!(tokenizer.current(), None);
}

#[test]
fn test_declaration() {
    let tokenizer = Tokenizer::new("<?xml version=\"1.0\" encoding=\"UTF-8\"?><doc/>").unwrap();
    let declaration = tokenizer.declaration().unwrap();
    assert_eq!(declaration.version, "1.0");
    assert_eq!(declaration.encoding.as_deref(), Some("UTF-8"));
    assert!(declaration.standalone);
    assert_eq!(tokenizer.current(), Some(&Token::OpenElement("doc".into())));

    let tokenizer = Tokenizer::new("<doc/>").unwrap();
    assert_eq!(tokenizer.declaration(), None);

    let error = Tokenizer::new("<?xml encoding=\"UTF-8\"?><doc/>").unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingVersionInDeclaration);
}

#[test]
fn test_declared_encoding_is_not_checked_for_text() {
    let tokenizer = Tokenizer::new("<?xml version='1.0' encoding='UTF-16'?><doc/>").unwrap();
    assert_eq!(
        tokenizer.declaration().unwrap().encoding.as_deref(),
        Some("UTF-16")
    );
}

#[test]
fn test_from_bytes() {
    let tokenizer = Tokenizer::from_bytes(b"<doc>\xC3\xA4</doc>").unwrap();
    let tokens: Vec<_> = tokenizer.collect::<Result<_, _>>().unwrap();
    assert_eq!(tokens[1], Token::CharData("ä".into()));

    let tokenizer = Tokenizer::from_bytes(b"\xEF\xBB\xBF<doc/>").unwrap();
    assert_eq!(tokenizer.current(), Some(&Token::OpenElement("doc".into())));

    let error = Tokenizer::from_bytes(b"\0<\0d\0o\0c\0/\0>").unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnsupportedEncoding);

    let error = Tokenizer::from_bytes(b"\0\0\xFE\xFF\0\0\0<").unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnsupportedEncoding);

    let error = Tokenizer::from_bytes(b"<doc>\xFF</doc>").unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::InvalidUtf8, offset: 5 });

    let error =
        Tokenizer::from_bytes(b"<?xml version='1.0' encoding='ISO-8859-1'?><doc/>").unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnsupportedEncoding);

    let tokenizer =
        Tokenizer::from_bytes(b"<?xml version='1.0' encoding='utf-8'?><doc/>").unwrap();
    assert_eq!(tokenizer.current(), Some(&Token::OpenElement("doc".into())));
}

#[test]
fn test_nesting_is_not_checked_by_default() {
    let tokens = collect(Tokenizer::new("<a></b>").unwrap(), false).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::OpenElement("a".into()),
            Token::CloseElement("b".into()),
        ]
    );

    assert!(collect(Tokenizer::new("<a>").unwrap(), false).is_ok());
    assert!(collect(Tokenizer::new("</a>").unwrap(), false).is_ok());
}

#[test]
fn test_nesting() {
    let tokens = collect(Tokenizer::new("<a><b/><c></c></a>").unwrap(), true).unwrap();
    assert_eq!(tokens.len(), 6);

    let error = collect(Tokenizer::new("<a><b></a></b>").unwrap(), true).unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::MismatchedCloseTag, offset: 6 });

    let error = collect(Tokenizer::new("<a></a></a>").unwrap(), true).unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::UnexpectedCloseTag, offset: 7 });

    let error = collect(Tokenizer::new("<a><b>").unwrap(), true).unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::UnclosedElement, offset: 6 });
}

#[test]
fn test_error_ends_iteration() {
    let mut tokenizer = Tokenizer::new("<a>x<!-- -- --></a>").unwrap();
    assert_eq!(
        tokenizer.next(),
        Some(Ok(Token::OpenElement("a".into())))
    );
    assert_eq!(tokenizer.next(), Some(Ok(Token::CharData("x".into()))));
    assert_eq!(
        tokenizer.next().unwrap().unwrap_err().kind,
        ErrorKind::DoubleHyphenInComment
    );
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.current(), None);
}

#[test]
fn test_document_ends_inside_of_markup() {
    let error = collect(Tokenizer::from_bytes(b"<doc").unwrap(), false).unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::EofInTag, offset: 4 });

    let error = collect(Tokenizer::new("<doc x='1' ").unwrap(), false).unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::EofInTag, offset: 11 });

    // reported as such, not as an element left open
    let error = collect(Tokenizer::new("<a><b x='1'").unwrap(), true).unwrap_err();
    assert_eq!(error.kind, ErrorKind::EofInTag);

    let error = collect(Tokenizer::new("<!DOCTYPE doc SYSTEM 'doc.dtd'").unwrap(), false).unwrap_err();
    assert_eq!(error.kind, ErrorKind::EofInDoctype);

    let error = Tokenizer::new("<![CDA").unwrap_err();
    assert_eq!(error, Error { kind: ErrorKind::EofInCdata, offset: 0 });
}
