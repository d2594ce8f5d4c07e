//! Cancellable periodic task.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Runs a callback on a dedicated thread once per period until stopped.
///
/// Ticks are not caught up: if a callback runs long, the next tick is simply
/// late.
#[derive(Debug)]
pub struct Ticker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns the ticker thread. The first tick fires one `period` from now.
    ///
    /// A zero period is rejected with [`io::ErrorKind::InvalidInput`].
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "ticker period must be non-zero",
            ));
        }
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("wk-ticker".to_string())
            .spawn(move || {
                tracing::info!(?period, "ticker started");
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => on_tick(),
                        // Stop requested, or the owner is gone.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::info!("ticker stopped");
            })?;
        Ok(Self { stop_tx, handle })
    }

    /// Stops the ticker and waits for its thread to exit.
    ///
    /// A tick already in progress runs to completion first.
    pub fn stop(self) {
        // The thread may already have exited; that is fine.
        let _ = self.stop_tx.send(());
        if self.handle.join().is_err() {
            tracing::warn!("ticker thread panicked");
        }
    }
}
