/// Blocks the current thread until either a cancellation context is cancelled or every listed
/// completion signal has fired.
///
/// This is the variadic form of [`await_all`](crate::await_all()): the first argument is the
/// context, and every further argument is a [`Done`](crate::Done) or a `&Done`. The signals are
/// waited on left to right, with the same ordering and cancellation rules as the function.
///
/// # Examples
///
/// ```
/// use future_cell::{cancel, FutureCell};
/// use std::thread;
///
/// let water: FutureCell<&str> = FutureCell::new();
/// let pasta: FutureCell<&str> = FutureCell::new();
///
/// let cook = {
///     let (water, pasta) = (water.clone(), pasta.clone());
///     thread::spawn(move || {
///         let ctx = cancel::background();
///         if future_cell::await_all!(ctx, water.done(), pasta.done()) {
///             Some(format!("{} + {}", water.get(), pasta.get()))
///         } else {
///             None
///         }
///     })
/// };
///
/// pasta.resolve("spaghetti");
/// water.resolve("boiling water");
/// assert_eq!(cook.join().unwrap().as_deref(), Some("boiling water + spaghetti"));
///
/// // No signals: succeeds as long as the context is live.
/// assert!(future_cell::await_all!(cancel::background()));
/// ```
#[macro_export]
macro_rules! await_all {
    ($ctx:expr $(,)?) => {
        $crate::macros::support::await_all(
            &$ctx,
            $crate::macros::support::empty::<$crate::macros::support::Done>(),
        )
    };

    ($ctx:expr, $($signal:expr),+ $(,)?) => {
        $crate::macros::support::await_all(
            &$ctx,
            [$(
                $crate::macros::support::Clone::clone(
                    $crate::macros::support::Borrow::<$crate::macros::support::Done>::borrow(
                        &$signal,
                    ),
                )
            ),+],
        )
    };
}
