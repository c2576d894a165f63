#![deny(missing_docs)]
// XML is frequently untrusted input from the network.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod chars;
mod cursor;
mod declaration;
mod emitter;
mod encoding;
mod entities;
mod error;
mod lexer;
mod machine;
mod state;
mod token;
mod tokenizer;
mod utils;
mod writer;

#[doc(hidden)]
pub mod testutils;

pub use cursor::Cursor;
pub use declaration::{read_declaration, Declaration};
pub use emitter::{CallbackEmitter, DefaultEmitter, Emitter};
pub use encoding::Encoding;
pub use entities::builtin_entity;
pub use error::{Error, ErrorKind, WriteError};
pub use machine::tokenize;
pub use state::ParseState;
pub use token::Token;
pub use tokenizer::Tokenizer;
pub use writer::Writer;
