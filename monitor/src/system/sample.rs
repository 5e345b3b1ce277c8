//! Sensor sample
//!
//! One temperature/humidity reading. Samples are `Copy` and move through the channels by value,
//! so no task ever looks at a reading another task could still be changing.

use embassy_time::{Duration, Instant};

use crate::system::error::SensorError;

/// A single sensor reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    temperature: f32,
    humidity: f32,
    captured_at: Duration,
}

impl Sample {
    /// Placeholder held by the display state until the first real sample arrives
    pub const SENTINEL: Sample = Sample {
        temperature: f32::NAN,
        humidity: f32::NAN,
        captured_at: Duration::from_ticks(0),
    };

    /// Temperature in °C, relative humidity in %, capture time since boot
    pub const fn new(temperature: f32, humidity: f32, captured_at: Duration) -> Self {
        Self {
            temperature,
            humidity,
            captured_at,
        }
    }

    /// Builds a sample stamped with the current uptime.
    ///
    /// Readings that are not finite numbers are rejected as [`SensorError::BadReading`].
    pub fn measured(temperature: f32, humidity: f32) -> Result<Self, SensorError> {
        if !temperature.is_finite() || !humidity.is_finite() {
            return Err(SensorError::BadReading);
        }
        let captured_at = Instant::now().duration_since(Instant::MIN);
        Ok(Self::new(temperature, humidity, captured_at))
    }

    /// Temperature in °C
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Relative humidity in %
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    /// Monotonic capture time
    pub fn captured_at(&self) -> Duration {
        self.captured_at
    }

    /// True for [`Sample::SENTINEL`]
    pub fn is_sentinel(&self) -> bool {
        self.temperature.is_nan()
    }
}
