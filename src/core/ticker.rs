//! Background ticker thread driving a [`ClockState`].

use crate::core::clock::{ClockState, Snapshot};
use crate::errors::{AppError, AppResult};
use crate::utils::time::now_secs;
use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

pub const TICK: Duration = Duration::from_secs(1);

/// Owns the clock state while it runs; the foreground only sees snapshots.
pub struct Ticker {
    cancel: Sender<()>,
    handle: JoinHandle<ClockState>,
}

impl Ticker {
    pub fn spawn(state: ClockState, period: Duration, events: Sender<Snapshot>) -> AppResult<Self> {
        let (cancel, cancelled) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("ticker".into())
            .spawn(move || run(state, period, cancelled, events))?;
        Ok(Self { cancel, handle })
    }

    /// Cancel, join and hand back the final state.
    pub fn stop(self) -> AppResult<ClockState> {
        let _ = self.cancel.try_send(());
        self.handle
            .join()
            .map_err(|_| AppError::Other("ticker thread panicked".into()))
    }
}

fn run(
    mut state: ClockState,
    period: Duration,
    cancelled: Receiver<()>,
    events: Sender<Snapshot>,
) -> ClockState {
    let ticks = tick(period);
    debug!(?period, "ticker started");
    loop {
        select! {
            recv(cancelled) -> _ => break,
            recv(ticks) -> _ => {
                let now = now_secs();
                let fired = state.tick(now);
                if events.send(state.snapshot(now, fired)).is_err() {
                    break;
                }
            }
        }
    }
    debug!("ticker stopped");
    state
}
