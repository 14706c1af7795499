//! Drives the crate's futures to completion on the calling thread.
//!
//! Every blocking operation in this crate is a thin wrapper around a future: the calling thread
//! polls it with a waker that unparks the thread, and parks between polls.

use core::{
    future::Future,
    task::{Context, Poll},
};
use futures_util::{
    pin_mut,
    task::{waker, ArcWake},
};
use std::{
    sync::Arc,
    thread::{self, Thread},
    time::Instant,
};

struct ThreadWaker(Thread);

impl ArcWake for ThreadWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.0.unpark();
    }
}

/// Blocks the current thread until `future` completes.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    pin_mut!(future);
    let waker = waker(Arc::new(ThreadWaker(thread::current())));
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
        // Spurious wakeups are fine: the future is simply polled again.
        thread::park();
    }
}

/// Blocks the current thread until `future` completes or `deadline` passes, whichever is first.
///
/// Returns `None` if the deadline passed first. The future is always polled at least once, so a
/// future that is already complete wins even against a deadline in the past.
pub(crate) fn block_on_deadline<F: Future>(future: F, deadline: Instant) -> Option<F::Output> {
    pin_mut!(future);
    let waker = waker(Arc::new(ThreadWaker(thread::current())));
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return Some(output);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        thread::park_timeout(deadline - now);
    }
}
