//! Logging shim over [`tracing`](https://docs.rs/tracing).
//!
//! With the `tracing` feature enabled the macros here are the `tracing` crate's own. Without it
//! they expand to a unit expression, so call sites never need their own `cfg` attributes.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! trace {
        ($($arg:tt)*) => {
            ()
        };
    }

    macro_rules! debug {
        ($($arg:tt)*) => {
            ()
        };
    }

    pub(crate) use {debug, trace};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::{debug, trace};
