use crate::settle;
use future_cell::FutureCell;
use futures_core::FusedFuture;
use futures_util::{pin_mut, task::noop_waker};
use std::{
    future::Future,
    task::Context,
    thread,
    time::{Duration, Instant},
};
use tokio_test::{assert_pending, assert_ready, task};

#[test]
fn fired_future_wakes_on_resolution() {
    let cell = FutureCell::new();
    let done = cell.done();

    let mut fired = task::spawn(done.fired());
    assert_pending!(fired.poll());
    assert_pending!(fired.poll(), "still unresolved");
    assert!(!fired.is_woken());

    cell.resolve(());
    assert!(fired.is_woken());
    assert_ready!(fired.poll());
}

#[test]
fn fired_future_created_before_resolution_is_not_lost() {
    let cell = FutureCell::new();
    let done = cell.done();

    // Created, but never polled, before the signal fires.
    let mut fired = task::spawn(done.fired());
    cell.resolve(1);
    assert_ready!(fired.poll());
}

#[test]
fn fired_future_is_fused() {
    let done = FutureCell::resolved(()).done();
    let fired = done.fired();
    pin_mut!(fired);
    assert!(!fired.is_terminated());

    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert!(fired.as_mut().poll(&mut cx).is_ready());
    assert!(fired.is_terminated());
}

#[tokio::test]
async fn fired_future_can_be_awaited() {
    let cell = FutureCell::new();
    let done = cell.done();

    let resolver = thread::spawn({
        let cell = cell.clone();
        move || {
            settle();
            cell.resolve("async");
        }
    });

    done.fired().await;
    assert_eq!(cell.try_get(), Some(&"async"));
    resolver.join().unwrap();
}

#[test]
fn observation_is_idempotent() {
    let done = FutureCell::resolved(5).done();
    for _ in 0..3 {
        assert!(done.is_fired());
        done.wait();
        assert!(done.wait_timeout(Duration::ZERO));
        let past = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);
        assert!(done.wait_deadline(past));
    }
}

#[test]
fn wait_timeout_expires_on_unfired_signal() {
    let cell: FutureCell<()> = FutureCell::new();
    let done = cell.done();

    let start = Instant::now();
    assert!(!done.wait_timeout(Duration::from_millis(30)));
    assert!(start.elapsed() >= Duration::from_millis(30));
    assert!(!done.is_fired());
}

#[test]
fn wait_timeout_returns_once_fired() {
    let cell = FutureCell::new();
    let done = cell.done();

    let waiter = thread::spawn(move || done.wait_timeout(Duration::from_secs(60)));
    settle();
    cell.resolve(());
    assert!(waiter.join().unwrap());
}

#[test]
fn clones_share_the_signal() {
    let cell = FutureCell::new();
    let done = cell.done();
    let clone = done.clone();
    assert_eq!(done, clone);

    cell.resolve('x');
    assert!(clone.is_fired());
    assert_eq!(format!("{done:?}"), "Done { fired: true }");
}
