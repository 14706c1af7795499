//! Waiting on several completion signals at once.

use crate::{
    cancel::CancelContext,
    signal::Done,
    support::block_on,
    tracing_compat::{debug, trace},
};
use core::borrow::Borrow;
use futures_util::{
    future::{select, Either},
    pin_mut,
};

/// Blocks the current thread until either `ctx` is cancelled or every signal in `signals` has
/// fired.
///
/// Returns true if all signals fired before cancellation was observed, and false otherwise.
/// Partial progress is not reported: once cancellation is observed the result is false no matter
/// how many signals had already fired.
///
/// For the variadic form, see the [`await_all!`](crate::await_all!) macro.
///
/// # Ordering
///
/// Signals are waited on strictly in the order `signals` yields them: the wait on signal *i + 1*
/// starts only after signal *i* has been observed fired, and cancellation is checked before each
/// signal and once more after the last one. If signal *i* and cancellation are both observable at
/// the same time, cancellation wins.
///
/// A signal that fires out of order is not lost: by the time the wait reaches it, it is seen as
/// fired and the wait moves straight on to the next one.
///
/// With no signals at all, the result is simply whether `ctx` is still live.
///
/// # Examples
///
/// ```
/// use future_cell::{await_all, cancel, FutureCell};
///
/// let a = FutureCell::resolved(1);
/// let b = FutureCell::resolved("two");
///
/// assert!(await_all(&cancel::background(), [a.done(), b.done()]));
///
/// let (canceler, ctx) = cancel::new_pair();
/// canceler.cancel();
/// assert!(!await_all(&ctx, [a.done(), b.done()]));
/// assert!(!await_all(&ctx, Vec::<future_cell::Done>::new()));
/// ```
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn await_all<C, I>(ctx: &C, signals: I) -> bool
where
    C: CancelContext + ?Sized,
    I: IntoIterator,
    I::Item: Borrow<Done>,
{
    let cancelled = ctx.cancelled();

    for (index, signal) in signals.into_iter().enumerate() {
        if ctx.is_cancelled() {
            debug!(index, "await_all: cancelled");
            return false;
        }

        let signal = signal.borrow();
        // `select` polls its first future first, so cancellation takes precedence.
        let cancel = cancelled.fired();
        let fired = signal.fired();
        pin_mut!(cancel, fired);
        match block_on(select(cancel, fired)) {
            Either::Left(_) => {
                debug!(index, "await_all: cancelled");
                return false;
            }
            Either::Right(_) => trace!(index, "await_all: signal fired"),
        }
    }

    !ctx.is_cancelled()
}
