//! Climate monitor firmware entry point
//!
//! Initializes the RP2350, splits the peripherals and spawns the four monitor tasks.

#![no_std]
#![no_main]

use climate_monitor::system::band::{BLINK_BANDS, COLOR_BANDS};
use climate_monitor::system::config::SAMPLE_QUEUE_CAPACITY;
use climate_monitor::{Channels, SharedDisplay, Timings};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use resources::{
    AssignedResources, DisplayResources, PixelResources, SensorResources, StatusLedResources,
};
use {defmt_rtt as _, panic_probe as _};

use crate::task::{
    blink::temperature_blink, classify::classify_alert, color::humidity_color,
    sensor::sensor_acquire,
};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

mod driver;
mod resources;
mod task;

/// Semaphores and queue between the producer and the actuators
static CHANNELS: Channels = Channels::new();

/// Alert level and last sample, owned by the classification task
static DISPLAY_STATE: SharedDisplay = SharedDisplay::new();

fn log_banner() {
    let timings = Timings::DEFAULT;
    info!(
        "Climate monitor: sensor every {} ms, queue depth {}",
        timings.sensor_period.as_millis(),
        SAMPLE_QUEUE_CAPACITY
    );
    for (upper, profile) in BLINK_BANDS.iter() {
        info!(
            "  blink below {} C: {} ({} ms on / {} ms off)",
            upper, profile.band, profile.on_ms, profile.off_ms
        );
    }
    for (upper, profile) in COLOR_BANDS.iter() {
        info!(
            "  color below {} %: {} (step {} every {} ms)",
            upper, profile.band, profile.breath_step, profile.breath_period_ms
        );
    }
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    let r = split_resources!(p);

    log_banner();

    spawner
        .spawn(classify_alert(r.display, &CHANNELS.samples, &DISPLAY_STATE))
        .unwrap();
    spawner
        .spawn(temperature_blink(r.status_led, &CHANNELS.temperature))
        .unwrap();
    spawner
        .spawn(humidity_color(r.pixel, &CHANNELS.humidity))
        .unwrap();
    // producer last, so every consumer is already waiting for the first sample
    spawner.spawn(sensor_acquire(r.sensor, &CHANNELS)).unwrap();
}
