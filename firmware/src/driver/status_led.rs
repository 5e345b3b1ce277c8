//! Status LED on a plain GPIO

use climate_monitor::BinaryOutput;
use embassy_rp::gpio::{Level, Output};

use crate::resources::StatusLedResources;

pub struct StatusLed {
    pin: Output<'static>,
}

impl StatusLed {
    /// Starts dark
    pub fn new(r: StatusLedResources) -> Self {
        Self {
            pin: Output::new(r.pin, Level::Low),
        }
    }
}

impl BinaryOutput for StatusLed {
    fn set_level(&mut self, on: bool) {
        let level = if on { Level::High } else { Level::Low };
        self.pin.set_level(level);
    }
}
