//! Single-assignment future cells for threads.
//!
//! # What is this crate?
//!
//! A [`FutureCell`] holds a value that becomes available at some point in the future. One
//! producer resolves it, exactly once; any number of consumers, on any number of threads, can
//! check whether it is ready, block until it is, and read it. Unlike a channel a cell is never
//! closed and never drained: once resolved, every reader sees the same value forever, which makes
//! it a natural fit for broadcasting a single result.
//!
//! Each cell has a completion signal, a [`Done`], which is not tied to the value's type. The
//! [`await_all`] function (and the variadic [`await_all!`] macro) blocks until a whole list of
//! signals has fired, giving up early if a [cancellation context](cancel) is cancelled.
//!
//! # Example
//!
//! Cells compose into dependency graphs: each stage runs on its own thread, waits for its inputs,
//! and resolves its output.
//!
//! ```
//! use future_cell::{cancel, FutureCell};
//! use std::thread;
//!
//! let (canceler, ctx) = cancel::new_pair();
//!
//! let water: FutureCell<String> = FutureCell::new();
//! let pasta: FutureCell<String> = FutureCell::new();
//! let dish: FutureCell<Option<String>> = FutureCell::new();
//!
//! let stages = vec![
//!     thread::spawn({
//!         let water = water.clone();
//!         move || water.resolve("boiling water".to_owned())
//!     }),
//!     thread::spawn({
//!         let pasta = pasta.clone();
//!         move || pasta.resolve("spaghetti".to_owned())
//!     }),
//!     thread::spawn({
//!         let (water, pasta, dish) = (water.clone(), pasta.clone(), dish.clone());
//!         move || {
//!             if future_cell::await_all!(ctx, water.done(), pasta.done()) {
//!                 dish.resolve(Some(format!("{} in {}", pasta.get(), water.get())));
//!             } else {
//!                 dish.resolve(None);
//!             }
//!         }
//!     }),
//! ];
//!
//! assert_eq!(dish.get().as_deref(), Some("spaghetti in boiling water"));
//! for stage in stages {
//!     stage.join().unwrap();
//! }
//! # drop(canceler);
//! ```
//!
//! # Features
//!
//! * `tracing`: emit [`tracing`](https://docs.rs/tracing) events on resolution and
//!   cancellation.
//! * `parking_lot`: forwarded to `tokio/parking_lot`, which switches tokio's internal locks to
//!   `parking_lot`.

mod await_all;
pub mod cancel;
mod cell;
#[doc(hidden)]
pub mod macros;
pub mod prelude;
mod signal;
mod support;
mod tracing_compat;

pub use crate::await_all::await_all;
pub use cancel::CancelContext;
pub use cell::{AlreadyResolved, FutureCell};
pub use signal::{Done, Fired};
