//! Support for the crate's macros.

pub use crate::{await_all::await_all, signal::Done};
pub use core::{borrow::Borrow, clone::Clone, iter::empty};
