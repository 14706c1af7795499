//! A "prelude" for crates using the `future-cell` crate.
//!
//! This prelude is similar to the [standard library's prelude] in that you'll
//! almost always want to import its entire contents, but unlike the
//! standard library's prelude you'll have to do so manually:
//!
//! ```
//! # #[allow(unused_imports)]
//! use future_cell::prelude::*;
//! ```
//!
//! It brings the [`CancelContext`](crate::cancel::CancelContext) methods into scope, which is
//! what calling `wait_timeout` and friends on a [`Context`](crate::cancel::Context) requires.
//!
//! [standard library's prelude]: https://doc.rust-lang.org/std/prelude/index.html

pub use crate::cancel::CancelContext as _;
pub use crate::{await_all, Done, FutureCell};
