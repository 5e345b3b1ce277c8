//! Inter-task channels
//!
//! The producer reaches its consumers through two kinds of channel:
//!
//! - [`EventSemaphore`]: binary, single-slot notification that carries the value it announces.
//!   Signalling twice before anyone waits collapses into one pending notification holding the
//!   newest value. The value is delivered together with the signal, so a consumer never reads a
//!   reading that changed between signal and read.
//! - [`SampleQueue`]: bounded FIFO of whole [`Sample`]s. A full queue rejects new samples, it
//!   never overwrites pending ones.
//!
//! [`Channels`] bundles one temperature semaphore, one humidity semaphore and the queue. The
//! firmware keeps a single `static` bundle; tests build their own.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};

use crate::system::config::SAMPLE_QUEUE_CAPACITY;
use crate::system::error::QueueFull;
use crate::system::sample::Sample;

/// Binary semaphore with a one-slot mailbox
pub struct EventSemaphore<T> {
    signal: Signal<CriticalSectionRawMutex, T>,
}

impl<T: Send> EventSemaphore<T> {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Sets the semaphore, replacing a value that was not taken yet. Never blocks.
    pub fn give(&self, value: T) {
        self.signal.signal(value);
    }

    /// Waits for the semaphore. Callers bound this with a timer.
    pub async fn wait(&self) -> T {
        self.signal.wait().await
    }

    /// Waits at most `timeout`; `None` means nothing new was published
    pub async fn take(&self, timeout: Duration) -> Option<T> {
        with_timeout(timeout, self.signal.wait()).await.ok()
    }
}

/// Non-blocking inspection.
///
/// The tasks only ever wait on a semaphore; these let host tests and diagnostics look at one
/// without parking on it.
impl<T: Send> EventSemaphore<T> {
    /// Takes a pending value without waiting
    pub fn try_take(&self) -> Option<T> {
        self.signal.try_take()
    }

    /// True while a value is waiting to be taken
    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl<T: Send> Default for EventSemaphore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded sample FIFO with reject-new overflow
pub struct SampleQueue {
    channel: Channel<CriticalSectionRawMutex, Sample, SAMPLE_QUEUE_CAPACITY>,
}

impl SampleQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueues without waiting
    pub fn try_enqueue(&self, sample: Sample) -> Result<(), QueueFull> {
        self.channel.try_send(sample).map_err(|_| QueueFull)
    }

    /// Enqueues, waiting at most `timeout` for a free slot
    pub async fn enqueue(&self, sample: Sample, timeout: Duration) -> Result<(), QueueFull> {
        if self.try_enqueue(sample).is_ok() {
            return Ok(());
        }
        let send = self.channel.send(sample);
        with_timeout(timeout, send).await.map_err(|_| QueueFull)
    }

    /// Dequeues, waiting at most `timeout`
    pub async fn receive(&self, timeout: Duration) -> Option<Sample> {
        with_timeout(timeout, self.channel.receive()).await.ok()
    }
}

/// Non-blocking inspection.
///
/// The classification task always receives with a timeout; host tests and diagnostics use these
/// to drain or count the queue without waiting.
impl SampleQueue {
    /// Dequeues without waiting
    pub fn try_receive(&self) -> Option<Sample> {
        self.channel.try_receive().ok()
    }

    /// Number of pending samples
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }
}

impl Default for SampleQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// All channels between the acquisition task and its consumers
pub struct Channels {
    /// Temperature in °C, consumed by the blink task
    pub temperature: EventSemaphore<f32>,
    /// Relative humidity in %, consumed by the color task
    pub humidity: EventSemaphore<f32>,
    /// Whole samples, consumed by the classification task
    pub samples: SampleQueue,
}

impl Channels {
    pub const fn new() -> Self {
        Self {
            temperature: EventSemaphore::new(),
            humidity: EventSemaphore::new(),
            samples: SampleQueue::new(),
        }
    }

    /// Fans a sample out: temperature semaphore, humidity semaphore, then the queue.
    ///
    /// The semaphores always take the sample. Only the queue can refuse it, in which case the
    /// sample is lost for the classification task and [`QueueFull`] is returned.
    pub async fn publish(
        &self,
        sample: Sample,
        enqueue_timeout: Duration,
    ) -> Result<(), QueueFull> {
        self.temperature.give(sample.temperature());
        self.humidity.give(sample.humidity());
        self.samples.enqueue(sample, enqueue_timeout).await
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}
