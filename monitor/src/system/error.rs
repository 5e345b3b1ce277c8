//! Recoverable error conditions
//!
//! Nothing in the monitor is fatal. Each error is handled by the task that runs into it and
//! never travels to another task.

use core::fmt;

/// Sensor read failure, the cycle's publication is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer on the bus
    NoDevice,
    /// Sensor answered, but the reading is unusable (busy, checksum, not a number)
    BadReading,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::NoDevice => f.write_str("no device"),
            SensorError::BadReading => f.write_str("bad reading"),
        }
    }
}

/// The sample queue stayed full for the whole enqueue timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sample queue full")
    }
}

/// The display state mutex could not be acquired in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockTimeout;

impl fmt::Display for LockTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("display state lock timed out")
    }
}
