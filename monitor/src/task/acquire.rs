//! Sensor acquisition
//!
//! Polls the sensor on a fixed period and fans every good reading out to the consumers.
//!
//! # Cycle
//! 1. Read the sensor
//! 2. On failure: log, publish nothing, consumers keep their last behavior
//! 3. On success: temperature semaphore, humidity semaphore, sample queue (bounded wait)
//! 4. Sleep for the rest of the period
//!
//! A full queue drops the cycle's sample for the classification task only; the producer is
//! never held up longer than the enqueue timeout.

use embassy_time::Ticker;

use crate::system::channels::Channels;
use crate::system::collaborator::SensorDriver;
use crate::system::config::Timings;
use crate::system::error::SensorError;
use crate::system::sample::Sample;

/// Result of one acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Sample reached all three channels
    Published(Sample),
    /// Semaphores were signalled, the queue rejected the sample
    QueueFull(Sample),
    /// Sensor read failed, nothing was published
    SensorFailed(SensorError),
}

/// Producer task state
pub struct SensorAcquisition<'a, S> {
    sensor: S,
    channels: &'a Channels,
    timings: Timings,
    cycle: u32,
}

impl<'a, S: SensorDriver> SensorAcquisition<'a, S> {
    pub fn new(sensor: S, channels: &'a Channels, timings: Timings) -> Self {
        Self {
            sensor,
            channels,
            timings,
            cycle: 0,
        }
    }

    /// Runs one read-and-publish cycle
    pub async fn cycle(&mut self) -> CycleOutcome {
        self.cycle = self.cycle.wrapping_add(1);

        let sample = match self.sensor.read().await {
            Ok(sample) => sample,
            Err(e) => {
                error!("Cycle {}: sensor read failed: {}", self.cycle, e);
                return CycleOutcome::SensorFailed(e);
            }
        };

        info!(
            "Cycle {}: temperature {} C, humidity {} %",
            self.cycle,
            sample.temperature(),
            sample.humidity()
        );

        let timeout = self.timings.enqueue_timeout;
        match self.channels.publish(sample, timeout).await {
            Ok(()) => {
                debug!("Cycle {}: sample published", self.cycle);
                CycleOutcome::Published(sample)
            }
            Err(e) => {
                warn!("Cycle {}: {}, sample dropped", self.cycle, e);
                CycleOutcome::QueueFull(sample)
            }
        }
    }

    /// Acquisition loop, one cycle per sensor period
    pub async fn run(&mut self) -> ! {
        info!(
            "Sensor acquisition started, period {} ms",
            self.timings.sensor_period.as_millis()
        );

        let mut ticker = Ticker::every(self.timings.sensor_period);
        loop {
            self.cycle().await;
            ticker.next().await;
        }
    }
}
