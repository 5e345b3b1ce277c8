//! I2C device drivers
//!
//! Both drivers are generic over [`embedded_hal_async::i2c::I2c`], so the firmware hands them
//! an `embassy-rp` bus and the tests a fake one.

pub mod dht20;
pub mod lcd1602;

pub use dht20::Dht20;
pub use lcd1602::Lcd1602;
