//! Recurring timers.
//!
//! A [`TimerLoop`] fires its callback once immediately on start and then
//! once per interval on a worker thread until stopped. The lifecycle is
//! one-way: idle, running, stopped. `stop` joins the worker before it
//! returns, so a stopped timer's callback can never fire afterwards;
//! restarting requires constructing a new timer.

use std::mem;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::app::AppHandle;
use crate::callback::Callback;
use crate::event::Event;

enum TimerState {
    Idle { callback: Callback },
    Running { stop: Sender<()>, worker: JoinHandle<()> },
    Stopped,
}

/// A repeating timer bound to one callback.
pub struct TimerLoop {
    app: AppHandle,
    interval: Duration,
    state: TimerState,
}

impl TimerLoop {
    /// Creates an idle timer. Nothing fires until [`start`](Self::start).
    pub fn new(app: AppHandle, interval: Duration, callback: Callback) -> Self {
        Self {
            app,
            interval,
            state: TimerState::Idle { callback },
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Starts the timer.
    ///
    /// The callback fires immediately and then once per interval, delivered
    /// on the timer's worker thread. Returns `false` (and logs) if the
    /// timer is already running or was stopped; a stopped timer cannot be
    /// restarted.
    pub fn start(&mut self) -> bool {
        match mem::replace(&mut self.state, TimerState::Stopped) {
            TimerState::Idle { callback } => {
                let (stop_tx, stop_rx) = mpsc::channel();
                let app = self.app.clone();
                let interval = self.interval;
                debug!(?interval, "starting timer");
                let worker = std::thread::spawn(move || {
                    let mut count = 0u64;
                    loop {
                        count += 1;
                        callback.invoke(&app, &Event::Tick { interval, count });
                        match stop_rx.recv_timeout(interval) {
                            Err(RecvTimeoutError::Timeout) => {}
                            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        }
                    }
                });
                self.state = TimerState::Running { stop: stop_tx, worker };
                true
            }
            other => {
                warn!("timer start ignored; timer is not idle");
                self.state = other;
                false
            }
        }
    }

    /// Stops the timer and waits for its worker to exit.
    ///
    /// Once this returns the callback will not fire again. Stopping an
    /// idle or already stopped timer is a no-op, but it still forecloses a
    /// later `start`.
    pub fn stop(&mut self) {
        if let TimerState::Running { stop, worker } =
            mem::replace(&mut self.state, TimerState::Stopped)
        {
            let _ = stop.send(());
            if worker.join().is_err() {
                warn!("timer callback panicked before stop");
            }
            debug!("timer stopped");
        }
    }
}

impl Drop for TimerLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
