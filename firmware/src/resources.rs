//! Hardware resource allocation
//!
//! Splits the RP2350 peripherals into one group per task, so each task owns its pins outright.
//!
//! # Resource Groups
//! - Sensor: DHT20 on I2C0 (GP4 SDA, GP5 SCL)
//! - Display: LCD1602 backpack on I2C1 (GP6 SDA, GP7 SCL)
//! - Status LED: GP25
//! - Pixel: WS2812 data on GP16, driven by PIO0 with one DMA channel

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{self, I2C0, I2C1, PIO0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use embassy_rp::Peri;

/// Both sensor and display are fine at standard mode
const I2C_FREQUENCY: u32 = 100_000;

assign_resources! {
    /// DHT20 temperature/humidity sensor
    sensor: SensorResources {
        i2c: I2C0,
        sda: PIN_4,
        scl: PIN_5,
    },
    /// LCD1602 with PCF8574 I2C backpack
    display: DisplayResources {
        i2c: I2C1,
        sda: PIN_6,
        scl: PIN_7,
    },
    /// Status LED
    status_led: StatusLedResources {
        pin: PIN_25,
    },
    /// WS2812 RGB pixel
    pixel: PixelResources {
        pio: PIO0,
        dma: DMA_CH0,
        pin: PIN_16,
    },
}

bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// I2C configuration shared by both buses
pub fn i2c_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY;
    config
}
