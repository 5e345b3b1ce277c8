//! Hardware collaborators
//!
//! The tasks only talk to hardware through these traits. The firmware implements them for the
//! RP2350 peripherals, tests implement them with recording fakes.

use heapless::String;

use crate::system::band::Rgb;
use crate::system::config::LCD_COLUMNS;
use crate::system::error::SensorError;
use crate::system::sample::Sample;

/// One line of display text. Fitting it to the panel is up to the display driver.
pub type TextLine = String<LCD_COLUMNS>;

/// Periodically read temperature/humidity sensor
#[allow(async_fn_in_trait)]
pub trait SensorDriver {
    /// Takes one measurement
    async fn read(&mut self) -> Result<Sample, SensorError>;
}

/// On/off output, fire-and-forget
pub trait BinaryOutput {
    fn set_level(&mut self, on: bool);
}

/// Single RGB pixel
#[allow(async_fn_in_trait)]
pub trait PixelOutput {
    type Error;

    async fn set_pixel(&mut self, color: Rgb) -> Result<(), Self::Error>;
}

/// Two line character display
#[allow(async_fn_in_trait)]
pub trait TextDisplay {
    type Error;

    /// Replaces both lines
    async fn write_lines(&mut self, lines: &[TextLine; 2]) -> Result<(), Self::Error>;
}
