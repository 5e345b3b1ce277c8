//! DHT20 temperature and humidity sensor
//!
//! # Measurement
//! 1. Check the status byte once, send the init command if the calibration bits are clear
//! 2. Trigger a measurement with `0xAC 0x33 0x00`
//! 3. Wait 80 ms for the conversion
//! 4. Read 7 bytes: status, 20 bit humidity, 20 bit temperature, CRC
//!
//! ```text
//! RH = raw / 2^20 * 100
//! T  = raw / 2^20 * 200 - 50
//! ```

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::system::collaborator::SensorDriver;
use crate::system::error::SensorError;
use crate::system::sample::Sample;

/// Fixed I2C address
pub const DHT20_ADDR: u8 = 0x38;

const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];
const CMD_TRIGGER: [u8; 3] = [0xAC, 0x33, 0x00];

const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x18;

const CONVERSION_TIME: Duration = Duration::from_millis(80);
const INIT_TIME: Duration = Duration::from_millis(10);

const FULL_SCALE: f32 = 1_048_576.0; // 2^20

/// CRC-8, polynomial 0x31, init 0xFF
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Converts a raw 7 byte frame into (temperature, humidity)
pub fn decode(frame: &[u8; 7]) -> Result<(f32, f32), SensorError> {
    if frame[0] & STATUS_BUSY != 0 {
        return Err(SensorError::BadReading);
    }
    if crc8(&frame[..6]) != frame[6] {
        return Err(SensorError::BadReading);
    }

    let raw_humidity =
        (u32::from(frame[1]) << 12) | (u32::from(frame[2]) << 4) | (u32::from(frame[3]) >> 4);
    let raw_temperature =
        (u32::from(frame[3] & 0x0F) << 16) | (u32::from(frame[4]) << 8) | u32::from(frame[5]);

    let humidity = raw_humidity as f32 / FULL_SCALE * 100.0;
    let temperature = raw_temperature as f32 / FULL_SCALE * 200.0 - 50.0;
    Ok((temperature, humidity))
}

pub struct Dht20<I> {
    i2c: I,
    ready: bool,
}

impl<I: I2c> Dht20<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c, ready: false }
    }

    /// Makes sure the sensor reports itself calibrated
    pub async fn init(&mut self) -> Result<(), SensorError> {
        let mut status = [0u8; 1];
        self.i2c
            .read(DHT20_ADDR, &mut status)
            .await
            .map_err(|_| SensorError::NoDevice)?;

        if status[0] & STATUS_CALIBRATED != STATUS_CALIBRATED {
            debug!("DHT20 not calibrated (status {}), sending init", status[0]);
            self.i2c
                .write(DHT20_ADDR, &CMD_INIT)
                .await
                .map_err(|_| SensorError::NoDevice)?;
            Timer::after(INIT_TIME).await;
        }

        self.ready = true;
        Ok(())
    }

    async fn measure(&mut self) -> Result<(f32, f32), SensorError> {
        self.i2c
            .write(DHT20_ADDR, &CMD_TRIGGER)
            .await
            .map_err(|_| SensorError::NoDevice)?;
        Timer::after(CONVERSION_TIME).await;

        let mut frame = [0u8; 7];
        self.i2c
            .read(DHT20_ADDR, &mut frame)
            .await
            .map_err(|_| SensorError::NoDevice)?;
        decode(&frame)
    }
}

impl<I: I2c> SensorDriver for Dht20<I> {
    async fn read(&mut self) -> Result<Sample, SensorError> {
        if !self.ready {
            self.init().await?;
        }

        let result = self.measure().await;
        if result == Err(SensorError::NoDevice) {
            // check the status again once the device is back
            self.ready = false;
        }
        let (temperature, humidity) = result?;
        Sample::measured(temperature, humidity)
    }
}
