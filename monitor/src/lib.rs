//! Climate monitor core
//!
//! Hardware independent part of the climate monitor firmware. One producer task samples a
//! temperature/humidity sensor and fans the readings out to three independent actuator tasks:
//!
//! - **Blink**: status LED cadence driven by temperature bands
//! - **Color**: RGB pixel color and breathing animation driven by humidity bands
//! - **Classification**: Normal/Warning/Critical alert level shown on a character LCD
//!
//! # Data Flow
//! ```text
//! SensorAcquisition ──► temperature semaphore ──► BlinkActuator
//!                   ──► humidity semaphore    ──► ColorActuator
//!                   ──► sample queue (5)      ──► Classification ──► SharedDisplay (mutex)
//! ```
//!
//! Tasks never share plain variables. Readings travel by value through the channels in
//! [`system::channels`], and the only mutex-guarded value is the
//! [`system::display_state::SharedDisplay`]. Every wait is bounded, so a silent sensor never
//! stalls an actuator, it just keeps its last behavior.
//!
//! The collaborators (sensor, LED, pixel, LCD) are traits in [`system::collaborator`]. The
//! `driver` module carries bus-generic drivers for the DHT20 sensor and a PCF8574 backed
//! LCD1602 display.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod driver;
pub mod system;
pub mod task;

pub use driver::{Dht20, Lcd1602};
pub use system::alert::{AlertLevel, Transition};
pub use system::band::{BlinkProfile, ColorProfile, HumidityBand, Rgb, TemperatureBand};
pub use system::channels::{Channels, EventSemaphore, SampleQueue};
pub use system::collaborator::{BinaryOutput, PixelOutput, SensorDriver, TextDisplay, TextLine};
pub use system::config::Timings;
pub use system::display_state::{SharedDisplay, SharedDisplayState};
pub use system::error::{LockTimeout, QueueFull, SensorError};
pub use system::sample::Sample;
