//! Ticker - the session-owned periodic task handle
//!
//! Exactly one ticker task may be live per engine. Stopping aborts the
//! task outright rather than flagging it, so a cancelled tick can never
//! fire into a paused or replaced session. Dropping the handle aborts too,
//! which keeps teardown from leaking a timer.

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
pub(crate) struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub(crate) fn new() -> Self {
        Self { handle: None }
    }

    /// True while a spawned tick loop has not finished or been stopped
    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn the tick loop; absorbed as a no-op while one is already live
    pub(crate) fn start<F>(&mut self, fut: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            debug!("ticker already running, start absorbed");
            return false;
        }
        self.handle = Some(tokio::spawn(fut));
        true
    }

    /// Abort the tick loop and drop the handle
    pub(crate) fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
