//! Sensor acquisition on the DHT20

use climate_monitor::task::acquire::SensorAcquisition;
use climate_monitor::{Channels, Dht20, Timings};
use embassy_rp::i2c::I2c;

use crate::resources::{i2c_config, Irqs, SensorResources};

#[embassy_executor::task]
pub async fn sensor_acquire(r: SensorResources, channels: &'static Channels) {
    let i2c = I2c::new_async(r.i2c, r.scl, r.sda, Irqs, i2c_config());
    let mut acquisition = SensorAcquisition::new(Dht20::new(i2c), channels, Timings::DEFAULT);
    acquisition.run().await
}
