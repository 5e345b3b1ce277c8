//! Display State Management
//!
//! The latched alert level and the sample it was derived from. The classification task is the
//! only writer and, today, also the only reader. The state still sits behind a mutex so another
//! reader can subscribe later without touching the writer.
//!
//! # Lock Discipline
//! - Every lock attempt is bounded by a timeout, a busy lock costs one cycle, never the task
//! - Critical sections copy in or copy out and release, the guard never lives across a
//!   display write
//!
//! ```rust,ignore
//! let transition = display_state.update(sample, timings.state_lock_timeout).await?;
//! let latched = display_state.snapshot(timings.state_lock_timeout).await?;
//! // render from `latched`, the lock is already released
//! ```

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use embassy_time::{with_timeout, Duration};

use crate::system::alert::{AlertLevel, Transition};
use crate::system::error::LockTimeout;
use crate::system::sample::Sample;

/// Latched classification result
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SharedDisplayState {
    pub level: AlertLevel,
    pub last_sample: Sample,
}

impl SharedDisplayState {
    /// Normal level and the sentinel sample, nothing measured yet
    pub const INITIAL: Self = Self {
        level: AlertLevel::Normal,
        last_sample: Sample::SENTINEL,
    };

    /// Classifies `sample`, latches the result and reports a level change
    pub fn apply(&mut self, sample: Sample) -> Option<Transition> {
        let level = AlertLevel::of(&sample);
        let transition = (level != self.level).then_some(Transition {
            from: self.level,
            to: level,
        });
        self.level = level;
        self.last_sample = sample;
        transition
    }
}

impl Default for SharedDisplayState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Mutex guarded [`SharedDisplayState`]
pub struct SharedDisplay {
    pub(crate) state: Mutex<CriticalSectionRawMutex, SharedDisplayState>,
}

impl SharedDisplay {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(SharedDisplayState::INITIAL),
        }
    }

    /// Applies a new sample under the lock.
    ///
    /// Gives up with [`LockTimeout`] when the lock is not free within `timeout`; the state is
    /// left untouched in that case.
    pub async fn update(
        &self,
        sample: Sample,
        timeout: Duration,
    ) -> Result<Option<Transition>, LockTimeout> {
        let lock = self.state.lock();
        let mut state = with_timeout(timeout, lock).await.map_err(|_| LockTimeout)?;
        Ok(state.apply(sample))
    }

    /// Copy of the current state, taken under the lock
    pub async fn snapshot(&self, timeout: Duration) -> Result<SharedDisplayState, LockTimeout> {
        let lock = self.state.lock();
        let state = with_timeout(timeout, lock).await.map_err(|_| LockTimeout)?;
        Ok(*state)
    }

    /// Copy of the current state if the lock is free right now.
    ///
    /// The classification task always goes through [`SharedDisplay::snapshot`]; this is for host
    /// tests and diagnostics that must not wait.
    pub fn try_snapshot(&self) -> Option<SharedDisplayState> {
        self.state.try_lock().ok().map(|state| *state)
    }
}

impl Default for SharedDisplay {
    fn default() -> Self {
        Self::new()
    }
}
