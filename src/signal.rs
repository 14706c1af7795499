//! One-shot completion signals.
//!
//! A [`Done`] starts out unfired and fires at most once; after that it stays fired forever. Only
//! this crate fires signals: a [`FutureCell`](crate::FutureCell) fires its signal when it is
//! resolved, and a [`Canceler`](crate::cancel::Canceler) fires its context's signal when it
//! cancels. Everyone else can only observe them.

use crate::support::{block_on, block_on_deadline};
use core::{
    fmt,
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicBool, Ordering},
    task::{ready, Context, Poll},
};
use futures_core::FusedFuture;
use pin_project_lite::pin_project;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{futures::Notified, Notify};

struct Latch {
    fired: AtomicBool,
    notify: Notify,
}

/// A handle to a one-shot completion signal.
///
/// `Done` is cheap to clone, and every clone refers to the same underlying signal. Two handles
/// compare equal if and only if they refer to the same signal.
///
/// Observing a signal never changes it: [`is_fired`](Self::is_fired), [`wait`](Self::wait) and
/// friends may be called any number of times from any number of threads.
///
/// # Examples
///
/// ```
/// use future_cell::FutureCell;
/// use std::time::Duration;
///
/// let cell = FutureCell::new();
/// let done = cell.done();
/// assert!(!done.is_fired());
/// assert!(!done.wait_timeout(Duration::from_millis(10)));
///
/// cell.resolve("ready");
/// assert!(done.is_fired());
/// done.wait();
/// ```
#[derive(Clone)]
pub struct Done {
    latch: Arc<Latch>,
}

impl Done {
    pub(crate) fn new() -> Self {
        Self {
            latch: Arc::new(Latch {
                fired: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    pub(crate) fn new_fired() -> Self {
        Self {
            latch: Arc::new(Latch {
                fired: AtomicBool::new(true),
                notify: Notify::new(),
            }),
        }
    }

    /// Fires the signal, waking every waiter. Returns false if it had already fired.
    ///
    /// Anything written before this call is visible to a thread that observes the signal fired.
    pub(crate) fn fire(&self) -> bool {
        if self.latch.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.latch.notify.notify_waiters();
        true
    }

    /// Returns true if the signal has fired. Never blocks.
    #[inline]
    pub fn is_fired(&self) -> bool {
        self.latch.fired.load(Ordering::Acquire)
    }

    /// Blocks the current thread until the signal fires.
    ///
    /// Returns immediately if it has already fired.
    pub fn wait(&self) {
        if !self.is_fired() {
            block_on(self.fired());
        }
    }

    /// Blocks the current thread until the signal fires or `timeout` elapses.
    ///
    /// Returns true if the signal fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_deadline(deadline),
            // Too far out to represent: indistinguishable from waiting forever.
            None => {
                self.wait();
                true
            }
        }
    }

    /// Blocks the current thread until the signal fires or `deadline` is reached.
    ///
    /// Returns true if the signal fired. A signal that has already fired is reported as fired even
    /// if the deadline is in the past.
    pub fn wait_deadline(&self, deadline: Instant) -> bool {
        self.is_fired() || block_on_deadline(self.fired(), deadline).is_some()
    }

    /// Returns a future that completes once the signal fires.
    ///
    /// This is what the blocking methods drive under the hood, and it can be awaited from async
    /// code as well.
    ///
    /// # Cancel safety
    ///
    /// Dropping the future before it completes has no effect on the signal.
    pub fn fired(&self) -> Fired<'_> {
        Fired {
            latch: &self.latch,
            notified: self.latch.notify.notified(),
            terminated: false,
        }
    }
}

impl PartialEq for Done {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.latch, &other.latch)
    }
}

impl Eq for Done {}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("fired", &self.is_fired())
            .finish()
    }
}

pin_project! {
    /// Future for the [`Done::fired`] method.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Fired<'a> {
        latch: &'a Latch,
        // Created before the first check of `fired`, so a `notify_waiters` racing with that check
        // still reaches this future.
        #[pin]
        notified: Notified<'a>,
        terminated: bool,
    }
}

impl Future for Fired<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        loop {
            if this.latch.fired.load(Ordering::Acquire) {
                *this.terminated = true;
                return Poll::Ready(());
            }
            ready!(this.notified.as_mut().poll(cx));
            this.notified.set(this.latch.notify.notified());
        }
    }
}

impl FusedFuture for Fired<'_> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl fmt::Debug for Fired<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fired")
            .field("fired", &self.latch.fired.load(Ordering::Acquire))
            .field("terminated", &self.terminated)
            .finish()
    }
}
