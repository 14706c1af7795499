//! Single-assignment future cells.

use crate::{
    signal::Done,
    tracing_compat::{debug, trace},
};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};

/// A value that becomes available at some point in the future, and then never changes.
///
/// A `FutureCell` starts out empty and is *resolved* exactly once, by whoever calls
/// [`resolve`](Self::resolve), [`try_resolve`](Self::try_resolve) or [`offer`](Self::offer)
/// first. From then on every reader sees that same value.
///
/// `FutureCell` is a handle: cloning it is cheap and every clone refers to the same cell, so a
/// producer and any number of consumers can each hold one. The cell is freed once the last handle
/// is dropped.
///
/// # The resolution race
///
/// Any number of threads may try to resolve the same cell concurrently. Exactly one of them wins;
/// the value it supplied becomes the cell's value, and the cell's completion signal fires. Every
/// other attempt leaves the cell untouched:
///
/// * [`resolve`](Self::resolve) treats losing as a bug in the caller and panics.
/// * [`try_resolve`](Self::try_resolve) returns `false`.
/// * [`offer`](Self::offer) returns the rejected value inside an [`AlreadyResolved`] error.
///
/// A thread that observes the completion signal fired (through [`done`](Self::done),
/// [`wait`](Self::wait) or [`await_all`](crate::await_all)) is guaranteed to see the value.
///
/// # Examples
///
/// ```
/// use future_cell::FutureCell;
/// use std::thread;
///
/// let cell = FutureCell::new();
///
/// let producer = {
///     let cell = cell.clone();
///     thread::spawn(move || cell.resolve(42))
/// };
///
/// // Blocks until the producer has resolved the cell.
/// assert_eq!(cell.get(), 42);
/// producer.join().unwrap();
///
/// // The cell is single-assignment.
/// assert!(!cell.try_resolve(43));
/// assert_eq!(cell.get(), 42);
/// ```
pub struct FutureCell<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    value: OnceLock<T>,
    // Created on first use. Whoever wins the resolution race fires the one instance every past
    // and future observer sees.
    done: OnceLock<Done>,
}

impl<T> FutureCell<T> {
    /// Creates a new, unresolved cell.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                value: OnceLock::new(),
                done: OnceLock::new(),
            }),
        }
    }

    /// Creates a cell that is already resolved with `value`.
    ///
    /// The cell is indistinguishable from one that was resolved before anyone else got hold of
    /// it: its signal has already fired, reads never block, and every attempt to resolve it
    /// again fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use future_cell::FutureCell;
    ///
    /// let cell = FutureCell::resolved("hello");
    /// assert!(cell.done().is_fired());
    /// assert_eq!(cell.get(), "hello");
    /// assert!(!cell.try_resolve("world"));
    /// ```
    pub fn resolved(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: OnceLock::from(value),
                done: OnceLock::from(Done::new_fired()),
            }),
        }
    }

    /// Resolves the cell with `value`.
    ///
    /// # Panics
    ///
    /// Panics if the cell has already been resolved. Resolving a cell twice is a logic error; use
    /// [`try_resolve`](Self::try_resolve) or [`offer`](Self::offer) if losing a resolution race
    /// is an expected outcome.
    #[track_caller]
    pub fn resolve(&self, value: T) {
        if !self.try_resolve(value) {
            panic!("future cell already resolved");
        }
    }

    /// Attempts to resolve the cell with `value`.
    ///
    /// Returns true if this call resolved the cell, and false if the cell had already been
    /// resolved, in which case `value` is dropped and the cell is left unchanged.
    pub fn try_resolve(&self, value: T) -> bool {
        self.offer(value).is_ok()
    }

    /// Attempts to resolve the cell with `value`, handing the value back if the cell had already
    /// been resolved.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyResolved`] carrying `value` if another resolution won.
    ///
    /// # Examples
    ///
    /// ```
    /// use future_cell::FutureCell;
    ///
    /// let cell = FutureCell::new();
    /// cell.offer(String::from("first")).unwrap();
    ///
    /// let rejected = cell.offer(String::from("second")).unwrap_err();
    /// assert_eq!(rejected.into_inner(), "second");
    /// assert_eq!(cell.get(), "first");
    /// ```
    pub fn offer(&self, value: T) -> Result<(), AlreadyResolved<T>> {
        match self.inner.value.set(value) {
            Ok(()) => {
                // The value is published; only now may the signal fire.
                self.done().fire();
                trace!("future cell resolved");
                Ok(())
            }
            Err(value) => {
                debug!("future cell resolution rejected: already resolved");
                Err(AlreadyResolved(value))
            }
        }
    }

    /// Returns a reference to the value, blocking the current thread until the cell is resolved.
    pub fn get_ref(&self) -> &T {
        loop {
            if let Some(value) = self.inner.value.get() {
                return value;
            }
            self.done().wait();
        }
    }

    /// Returns the value if the cell has been resolved. Never blocks.
    pub fn try_get(&self) -> Option<&T> {
        self.inner.value.get()
    }

    /// Returns true if the cell has been resolved. Never blocks.
    pub fn is_resolved(&self) -> bool {
        self.inner.value.get().is_some()
    }

    /// Blocks the current thread until the cell is resolved.
    pub fn wait(&self) {
        if !self.is_resolved() {
            self.done().wait();
        }
    }

    /// Returns the cell's completion signal.
    ///
    /// Every call returns a handle to the same signal, which fires once the cell is resolved.
    /// The handle is not tied to the value's type, so signals of differently-typed cells can be
    /// waited on together with [`await_all`](crate::await_all).
    pub fn done(&self) -> Done {
        self.inner.done.get_or_init(Done::new).clone()
    }
}

impl<T: Clone> FutureCell<T> {
    /// Returns a clone of the value, blocking the current thread until the cell is resolved.
    pub fn get(&self) -> T {
        self.get_ref().clone()
    }
}

impl<T> Clone for FutureCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for FutureCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for FutureCell<T> {
    fn from(value: T) -> Self {
        Self::resolved(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for FutureCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureCell")
            .field("value", &self.try_get())
            .finish()
    }
}

/// The error returned by [`FutureCell::offer`] when the cell had already been resolved.
///
/// Carries the value that was rejected; [`into_inner`](Self::into_inner) hands it back.
#[derive(Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("future cell already resolved")]
pub struct AlreadyResolved<T>(T);

impl<T> AlreadyResolved<T> {
    /// Returns the value that was rejected.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for AlreadyResolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlreadyResolved").finish_non_exhaustive()
    }
}
