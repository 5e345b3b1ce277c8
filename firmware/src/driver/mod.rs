//! On-chip output drivers

pub mod status_led;
pub mod ws2812;
