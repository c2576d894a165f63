use pretty_assertions::assert_eq;
use xmlgum::testutils::tokenize_stepwise;
use xmlgum::{tokenize, Cursor, DefaultEmitter, ParseState};

/// Stopping after every token and resuming must not change the result.
pub fn validate_stepwise(input: &str) {
    let mut emitter = DefaultEmitter::default();
    let mut state = ParseState::default();
    let result = tokenize(&mut emitter, &mut state, &mut Cursor::new(input));

    let (tokens, stepwise_result) = tokenize_stepwise(input);

    assert_eq!(tokens, emitter.into_tokens());
    assert_eq!(stepwise_result, result.map(|_| state));
}
