//! Lets you easily try out the tokenizer with e.g.
//!
//! ```text
//! printf '<h1>Hello world!</h1>' | cargo run --example=tokenize
//! printf '<a x="1">&lt;</a>' | cargo run --example=tokenize -- --roundtrip
//! ```
//!
//! Errors are printed with the offending location highlighted.
use std::io::{stdin, Read};
use std::process::exit;

use annotate_snippets::{Level, Renderer, Snippet};
use argh::FromArgs;
use xmlgum::{tokenize, Cursor, Error, ParseState, Tokenizer, Writer};

/// Read XML from stdin and print its tokens.
#[derive(FromArgs)]
struct Cli {
    /// instead of printing tokens, write them back out as XML.
    #[argh(switch)]
    roundtrip: bool,

    /// fail on end tags that don't match their start tag.
    #[argh(switch)]
    check_nesting: bool,
}

fn report(source: &str, error: &Error) -> ! {
    let start = error.offset.min(source.len());
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    let label = error.kind.as_str();

    let message = Level::Error.title("malformed XML").snippet(
        Snippet::source(source)
            .origin("<stdin>")
            .fold(true)
            .annotation(Level::Error.span(start..end).label(label)),
    );
    eprintln!("{}", Renderer::plain().render(message));
    exit(1);
}

fn main() {
    let cli: Cli = argh::from_env();

    let mut input = String::new();
    stdin().read_to_string(&mut input).unwrap();

    if cli.roundtrip {
        let mut writer = Writer::new(String::new());
        if let Err(e) = tokenize(&mut writer, &mut ParseState::default(), &mut Cursor::new(&input))
        {
            report(&input, &e);
        }
        match writer.finish() {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("error: {}", e);
                exit(1);
            }
        }
        return;
    }

    let mut tokenizer = match Tokenizer::new(&input) {
        Ok(tokenizer) => tokenizer,
        Err(e) => report(&input, &e),
    };
    tokenizer.check_nesting(cli.check_nesting);

    if let Some(declaration) = tokenizer.declaration() {
        println!("{:?}", declaration);
    }

    for token in tokenizer {
        match token {
            Ok(token) => println!("{:?}", token),
            Err(e) => report(&input, &e),
        }
    }
}
