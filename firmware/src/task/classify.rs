//! Alert classification on the LCD1602

use climate_monitor::task::classify::Classification;
use climate_monitor::{Lcd1602, SampleQueue, SharedDisplay, Timings};
use embassy_rp::i2c::I2c;

use crate::resources::{i2c_config, DisplayResources, Irqs};

#[embassy_executor::task]
pub async fn classify_alert(
    r: DisplayResources,
    samples: &'static SampleQueue,
    state: &'static SharedDisplay,
) {
    let i2c = I2c::new_async(r.i2c, r.scl, r.sda, Irqs, i2c_config());
    let lcd = Lcd1602::new(i2c);
    let mut classification = Classification::new(samples, state, lcd, Timings::DEFAULT);
    classification.run().await
}
