use pretty_assertions::assert_eq;
use xmlgum::{tokenize, Cursor, DefaultEmitter, ParseState, Token, Writer};

/// Tokens written out by the writer must tokenize back into the same tokens.
///
/// Character data is compared after merging adjacent runs, since e.g. `a&#66;` is two tokens but
/// is written as `aB`, which is one.
pub fn validate_roundtrip(input: &str) {
    let tokens = match tokenize_all(input) {
        Some(tokens) => tokens,
        None => return,
    };

    let mut writer = Writer::new(String::new());
    for token in &tokens {
        writer.write_token(token).unwrap();
    }
    let output = writer.into_inner();

    let roundtripped = tokenize_all(&output).expect("writer produced malformed output");
    assert_eq!(merge_char_data(roundtripped), merge_char_data(tokens));
}

fn tokenize_all(input: &str) -> Option<Vec<Token<'_>>> {
    let mut emitter = DefaultEmitter::default();
    tokenize(&mut emitter, &mut ParseState::default(), &mut Cursor::new(input)).ok()?;
    Some(emitter.into_tokens())
}

fn merge_char_data(tokens: Vec<Token<'_>>) -> Vec<Token<'static>> {
    let mut rv: Vec<Token<'static>> = Vec::new();

    for token in tokens {
        match (rv.last_mut(), token) {
            (Some(Token::CharData(existing)), Token::CharData(text)) => {
                existing.to_mut().push_str(&text);
            }
            (_, token) => rv.push(token.into_owned()),
        }
    }

    rv
}
