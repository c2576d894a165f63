use std::env;

mod roundtrip;
mod stepwise;

fn enabled(var: &str) -> bool {
    env::var(var).map_or(false, |value| value == "1")
}

pub fn run(s: &[u8]) {
    // unconditionally run the pull tokenizer against raw bytes, it should never crash. we rely on
    // running in debug mode such that this is not just simply optimized away
    if let Ok(mut tokenizer) = xmlgum::Tokenizer::from_bytes(s) {
        tokenizer.check_nesting(true);
        for _ in tokenizer {}
    }

    let data = match std::str::from_utf8(s) {
        Ok(data) => data,
        Err(_) => return,
    };

    if enabled("FUZZ_STEPWISE") {
        stepwise::validate_stepwise(data);
    }

    if enabled("FUZZ_ROUNDTRIP") {
        roundtrip::validate_roundtrip(data);
    }
}
