//! Cancellation contexts for bounding blocking waits.
//!
//! A *cancellation context* tells a long wait, such as [`await_all`](crate::await_all), when to
//! give up. Anything that implements [`CancelContext`] can play that role:
//!
//! * [`Context`] is cancelled explicitly through its [`Canceler`], or automatically once a
//!   deadline passes if it was created by [`with_deadline`] or [`with_timeout`].
//! * [`Background`] is never cancelled.
//! * A [`Done`] signal counts as cancelled once it has fired, so the completion of one
//!   [`FutureCell`](crate::FutureCell) can bound a wait on others.
//!
//! # Examples
//!
//! ```
//! use future_cell::{cancel, FutureCell};
//!
//! let (canceler, ctx) = cancel::new_pair();
//! let input: FutureCell<u32> = FutureCell::new();
//!
//! let consumer = {
//!     let input = input.clone();
//!     std::thread::spawn(move || future_cell::await_all!(ctx, input.done()))
//! };
//!
//! // The input never arrives: give up on it.
//! canceler.cancel();
//! assert!(!consumer.join().unwrap());
//! ```
//!
//! # Notes
//!
//! Cancellation is cooperative and applies to waits only. Cancelling a context never affects the
//! signals or cells being waited on.

use crate::{signal::Done, support::block_on_deadline, tracing_compat::debug};
use futures_util::{future::select, pin_mut};
use std::{
    io,
    sync::{Arc, OnceLock},
    thread,
    time::{Duration, Instant},
};

/// A source of cancellation for blocking waits.
///
/// Implementors supply a non-blocking check and a [`Done`] signal that fires on cancellation; the
/// blocking methods are provided in terms of that signal.
pub trait CancelContext {
    /// Returns true if the context has been cancelled. Never blocks.
    fn is_cancelled(&self) -> bool;

    /// Returns a signal that fires when the context is cancelled.
    ///
    /// The signal must never fire while [`is_cancelled`](Self::is_cancelled) reports false.
    fn cancelled(&self) -> Done;

    /// Blocks the current thread until the context is cancelled.
    fn wait(&self) {
        self.cancelled().wait();
    }

    /// Blocks the current thread until the context is cancelled or `deadline` is reached.
    ///
    /// Returns true if the context was cancelled.
    fn wait_deadline(&self, deadline: Instant) -> bool {
        self.cancelled().wait_deadline(deadline)
    }

    /// Blocks the current thread until the context is cancelled or `timeout` elapses.
    ///
    /// Returns true if the context was cancelled.
    fn wait_timeout(&self, timeout: Duration) -> bool {
        self.cancelled().wait_timeout(timeout)
    }
}

impl<C: CancelContext + ?Sized> CancelContext for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn cancelled(&self) -> Done {
        (**self).cancelled()
    }
}

impl CancelContext for Done {
    fn is_cancelled(&self) -> bool {
        self.is_fired()
    }

    fn cancelled(&self) -> Done {
        self.clone()
    }
}

/// Why a [`Context`] was cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Cancelled {
    /// [`Canceler::cancel`] was called.
    #[error("context cancelled")]
    Cancelled,

    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Creates and returns a cancellation pair with no deadline.
///
/// The context stays live until [`Canceler::cancel`] is called.
pub fn new_pair() -> (Canceler, Context) {
    pair(None)
}

/// Creates and returns a cancellation pair whose context is cancelled with
/// [`Cancelled::DeadlineExceeded`] once `deadline` is reached.
///
/// The returned [`Canceler`] can still cancel the context earlier. The deadline is enforced by a
/// background thread, which exits as soon as any of these happens:
///
/// * the deadline passes,
/// * the context is cancelled,
/// * every [`Context`] and [`Canceler`] of the pair has been dropped.
///
/// In the last case nobody can observe the deadline through the pair any more, so signals
/// obtained earlier from [`CancelContext::cancelled`] never fire.
///
/// # Errors
///
/// Returns an error if the background thread could not be spawned.
pub fn with_deadline(deadline: Instant) -> io::Result<(Canceler, Context)> {
    let (canceler, context) = pair(Some(deadline));

    if Instant::now() >= deadline {
        context.state.cancel(Cancelled::DeadlineExceeded);
        return Ok((canceler, context));
    }

    // The watcher must not keep the pair alive: it holds a weak reference and wakes up when the
    // last strong one goes away.
    let state = Arc::downgrade(&context.state);
    let cancelled = context.state.done.clone();
    let abandoned = context.state.abandoned.clone();
    thread::Builder::new()
        .name(DEADLINE_THREAD_NAME.to_owned())
        .spawn(move || {
            let cancelled = cancelled.fired();
            let abandoned = abandoned.fired();
            pin_mut!(cancelled, abandoned);
            if block_on_deadline(select(cancelled, abandoned), deadline).is_none() {
                if let Some(state) = state.upgrade() {
                    state.cancel(Cancelled::DeadlineExceeded);
                }
            }
        })?;

    Ok((canceler, context))
}

/// Creates and returns a cancellation pair whose context is cancelled with
/// [`Cancelled::DeadlineExceeded`] once `timeout` has elapsed.
///
/// See [`with_deadline`].
///
/// # Errors
///
/// Returns an error if the background thread could not be spawned.
pub fn with_timeout(timeout: Duration) -> io::Result<(Canceler, Context)> {
    match Instant::now().checked_add(timeout) {
        Some(deadline) => with_deadline(deadline),
        None => Ok(new_pair()),
    }
}

/// Returns a context that is never cancelled.
pub fn background() -> Background {
    Background { never: Done::new() }
}

/// Name of the thread that enforces a [`with_deadline`] context's deadline.
const DEADLINE_THREAD_NAME: &str = "fcell-deadline";

fn pair(deadline: Option<Instant>) -> (Canceler, Context) {
    let state = Arc::new(State {
        done: Done::new(),
        abandoned: Done::new(),
        reason: OnceLock::new(),
        deadline,
    });
    (
        Canceler {
            state: Arc::clone(&state),
        },
        Context { state },
    )
}

#[derive(Debug)]
struct State {
    done: Done,
    // Fired once every `Context` and `Canceler` sharing this state is gone.
    abandoned: Done,
    reason: OnceLock<Cancelled>,
    deadline: Option<Instant>,
}

impl State {
    fn cancel(&self, reason: Cancelled) -> bool {
        if self.reason.set(reason).is_err() {
            return false;
        }
        // The reason is published before the signal fires, so `Context::err` is never `None` for
        // a context that reports itself cancelled.
        self.done.fire();
        debug!(%reason, "context cancelled");
        true
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.abandoned.fire();
    }
}

/// A cancellable context.
///
/// This is the "receive" side of a cancellation pair. Cloning it is cheap, and all clones observe
/// the same cancellation.
#[derive(Clone, Debug)]
pub struct Context {
    state: Arc<State>,
}

impl Context {
    /// Returns why the context was cancelled, or `None` if it is still live.
    pub fn err(&self) -> Option<Cancelled> {
        if self.state.done.is_fired() {
            self.state.reason.get().copied()
        } else {
            None
        }
    }

    /// Returns the deadline after which the context is cancelled automatically, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline
    }
}

impl CancelContext for Context {
    fn is_cancelled(&self) -> bool {
        self.state.done.is_fired()
    }

    fn cancelled(&self) -> Done {
        self.state.done.clone()
    }
}

/// A cancellation handle.
///
/// This is the "send" side of a cancellation pair. Dropping every `Canceler` does not cancel the
/// context.
#[derive(Clone, Debug)]
pub struct Canceler {
    state: Arc<State>,
}

impl Canceler {
    /// Cancels the context with [`Cancelled::Cancelled`].
    ///
    /// Returns true if this call cancelled the context, and false if it had already been
    /// cancelled, either by another call or because its deadline passed.
    pub fn cancel(&self) -> bool {
        self.state.cancel(Cancelled::Cancelled)
    }

    /// Returns true if the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.state.done.is_fired()
    }
}

/// A context that is never cancelled, returned by [`background`].
#[derive(Clone, Debug)]
pub struct Background {
    never: Done,
}

impl CancelContext for Background {
    fn is_cancelled(&self) -> bool {
        false
    }

    fn cancelled(&self) -> Done {
        self.never.clone()
    }
}
