// A macro and not a function: the `format!` call and its allocation must disappear entirely from
// release builds, which doesn't happen when the formatted string is passed to an empty function.
macro_rules! trace_log {
    ($($tt:tt)*) => {{
        #[cfg(debug_assertions)]
        crate::testutils::trace_log(&format!($($tt)*));
    }};
}

pub(crate) use trace_log;

/// Return early with an [`crate::Error`] of the given kind at the given offset.
macro_rules! fail {
    ($kind:ident, $offset:expr) => {{
        let offset = $offset;
        crate::utils::trace_log!("error: {} at {}", crate::ErrorKind::$kind, offset);
        return Err(crate::Error::new(crate::ErrorKind::$kind, offset));
    }};
}

pub(crate) use fail;
