//! Periodic tick loop
//!
//! Runs the carousel on its own thread: tick, draw when the divider moved,
//! then sleep for the delay the tick asked for. While paused or stopped
//! the loop keeps re-checking at the paused interval so `resume()` and
//! `start()` take effect without restarting the driver.

use std::io;
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use super::{Carousel, Frame, TickOutcome};
use crate::store::ImageStore;

/// Receives every frame the driver produces.
pub trait FrameSink<I>: Send + 'static {
    fn present(&mut self, frame: &Frame<I>);
}

impl<I, F> FrameSink<I> for F
where
    F: FnMut(&Frame<I>) + Send + 'static,
{
    fn present(&mut self, frame: &Frame<I>) {
        self(frame)
    }
}

/// Handle to a running tick loop. Dropping it stops the loop.
pub struct Driver {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Driver {
    /// Start ticking `carousel` on a new thread, handing frames to `sink`.
    pub fn spawn<S, K>(carousel: Arc<Carousel<S>>, mut sink: K) -> io::Result<Self>
    where
        S: ImageStore,
        K: FrameSink<S::Image>,
    {
        let (stop_tx, stop_rx) = channel::<()>();

        let handle = thread::Builder::new()
            .name("scanswitch-driver".to_string())
            .spawn(move || {
                debug!("driver started");
                loop {
                    let outcome = carousel.tick();
                    if let TickOutcome::Advanced(_) = outcome {
                        if let Some(frame) = carousel.frame() {
                            sink.present(&frame);
                        }
                    }
                    let delay = next_delay(outcome, carousel.settings().paused_interval);

                    match stop_rx.recv_timeout(delay) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("driver stopped");
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the loop and wait for the current tick to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("driver thread panicked");
            }
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn next_delay(outcome: TickOutcome, paused_interval: Duration) -> Duration {
    match outcome {
        TickOutcome::Advanced(delay) | TickOutcome::Waiting(delay) => delay,
        TickOutcome::Stopped => paused_interval,
    }
}
