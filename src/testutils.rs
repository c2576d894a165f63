//! Hooks for the integration tests. Not part of the public API.
use std::cell::Cell;

use crate::{Cursor, Emitter, Error, ParseState, Token};

thread_local! {
    /// Trace log of the current thread, written by `trace_log!` in debug builds.
    pub static OUTPUT: Cell<String> = Cell::default();
}

/// Append a line to [`OUTPUT`]. The buffer is reset once it grows past 20 MiB.
///
/// The fixture harness in `tests/xml_fixtures.rs` runs on libtest-mimic, which cannot capture
/// stdout, so failures print this buffer instead.
pub fn trace_log(msg: &str) {
    OUTPUT.with(|cell| {
        let mut buf = cell.take();
        buf.push_str(msg);
        buf.push('\n');

        if buf.len() > 20 * 1024 * 1024 {
            buf.clear();
            buf.push_str("[truncated output]\n");
        }

        cell.set(buf);
    });
}

/// Tokenize `input` one token per [`crate::tokenize`] call, stopping and resuming after every
/// token. Returns the tokens and the state tokenization ended in. Only available in tests.
pub fn tokenize_stepwise(input: &str) -> (Vec<Token<'_>>, Result<ParseState, Error>) {
    struct StopAfterOne<'a>(Vec<Token<'a>>);

    impl<'a> Emitter<'a> for StopAfterOne<'a> {
        fn emit(&mut self, token: Token<'a>) -> std::ops::ControlFlow<()> {
            self.0.push(token);
            std::ops::ControlFlow::Break(())
        }
    }

    let mut emitter = StopAfterOne(Vec::new());
    let mut state = ParseState::default();
    let mut cursor = Cursor::new(input);

    loop {
        let before = emitter.0.len();
        match crate::tokenize(&mut emitter, &mut state, &mut cursor) {
            Ok(true) => {
                assert_eq!(emitter.0.len(), before + 1, "stopped without a token");
            }
            Ok(false) => return (emitter.0, Ok(state)),
            Err(e) => return (emitter.0, Err(e)),
        }
    }
}
