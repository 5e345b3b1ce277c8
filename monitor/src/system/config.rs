//! Monitor configuration
//!
//! All periods, timeouts and limits of the monitor live here. The task loops take their timing
//! from a [`Timings`] value so the same loops can run compressed in host tests; the firmware
//! always uses [`Timings::DEFAULT`].

use embassy_time::Duration;

// ===================================================================
// Acquisition
// ===================================================================

/// Sensor polling period. Fixed period, not fixed delay.
pub const SENSOR_PERIOD: Duration = Duration::from_millis(5_000);

/// How long the producer may wait for a free queue slot before dropping the sample
pub const ENQUEUE_TIMEOUT: Duration = Duration::from_millis(100);

/// Number of samples the classification queue can hold
pub const SAMPLE_QUEUE_CAPACITY: usize = 5;

// ===================================================================
// Consumers
// ===================================================================

/// Bounded wait of the blink task on its event semaphore
pub const EVENT_WAIT_TIMEOUT: Duration = Duration::from_millis(100);

/// Bounded wait of the classification task on the sample queue
pub const QUEUE_RECEIVE_TIMEOUT: Duration = Duration::from_millis(500);

/// Bounded wait for the display state mutex
pub const STATE_LOCK_TIMEOUT: Duration = Duration::from_millis(100);

// ===================================================================
// Rendering
// ===================================================================

pub const NORMAL_REFRESH_INTERVAL: Duration = Duration::from_secs(5);
pub const WARNING_REFRESH_INTERVAL: Duration = Duration::from_secs(2);
pub const CRITICAL_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Visible columns of the character display
pub const LCD_COLUMNS: usize = 16;

/// Lowest brightness of the breathing animation
pub const BRIGHTNESS_FLOOR: u8 = 50;

/// Highest brightness of the breathing animation
pub const BRIGHTNESS_CEILING: u8 = 255;

/// Timing set handed to the task loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings {
    pub sensor_period: Duration,
    pub enqueue_timeout: Duration,
    pub event_wait: Duration,
    pub queue_receive_timeout: Duration,
    pub state_lock_timeout: Duration,
}

impl Timings {
    /// Production timings
    pub const DEFAULT: Self = Self {
        sensor_period: SENSOR_PERIOD,
        enqueue_timeout: ENQUEUE_TIMEOUT,
        event_wait: EVENT_WAIT_TIMEOUT,
        queue_receive_timeout: QUEUE_RECEIVE_TIMEOUT,
        state_lock_timeout: STATE_LOCK_TIMEOUT,
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
