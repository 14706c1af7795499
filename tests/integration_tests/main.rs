mod signal;

use std::{thread, time::Duration};

/// Long enough for a spawned thread to reach its blocking call in practice.
///
/// Tests that use this assert that something has *not* happened yet, so a slow scheduler can only
/// make them weaker, never flaky.
pub(crate) const SETTLE: Duration = Duration::from_millis(50);

pub(crate) fn settle() {
    thread::sleep(SETTLE);
}

#[cfg(feature = "tracing")]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn init_tracing() {}
