//! Collect the `href` of every `<a>` with a callback, without building any tokens up front.
//!
//! ```text
//! printf '<p><a href="foo">bar</a><a title="x" href="b&amp;z"/></p>' | cargo run --example=callback_emitter
//! ```
//!
//! Output:
//!
//! ```text
//! link: foo
//! link: b&z
//! ```
use std::io::{stdin, Read};
use std::ops::ControlFlow;

use xmlgum::{tokenize, CallbackEmitter, Cursor, Error, ParseState, Token};

fn extract_links(input: &str) -> Result<Vec<String>, Error> {
    let mut links = Vec::new();
    let mut is_anchor_tag = false;

    let mut emitter = CallbackEmitter::new(|token: Token<'_>| {
        match token {
            Token::OpenElement(name) => is_anchor_tag = name == "a",
            Token::Attr { name, value } if is_anchor_tag && name == "href" => {
                links.push(value.into_owned());
            }
            _ => {}
        }
        ControlFlow::Continue(())
    });

    tokenize(&mut emitter, &mut ParseState::default(), &mut Cursor::new(input))?;
    Ok(links)
}

fn main() {
    let mut input = String::new();
    stdin().read_to_string(&mut input).unwrap();

    for link in extract_links(&input).unwrap() {
        println!("link: {}", link);
    }
}

#[test]
fn basic() {
    let links = extract_links(r#"<h1>Hello world</h1><a href="foo">bar</a><link href="no"/>"#);
    assert_eq!(links, Ok(vec!["foo".to_owned()]));
}
