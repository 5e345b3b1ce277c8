//! Temperature blink
//!
//! Blinks the status LED with a cadence chosen by the temperature band: the warmer, the faster.
//! Each pass waits briefly for a new temperature on the semaphore, then runs one full on/off
//! cycle with whatever profile is active. Without new readings the cadence simply holds.

use embassy_time::Timer;

use crate::system::band::BlinkProfile;
use crate::system::channels::EventSemaphore;
use crate::system::collaborator::BinaryOutput;
use crate::system::config::Timings;

/// Blink task state
pub struct BlinkActuator<'a, O> {
    events: &'a EventSemaphore<f32>,
    output: O,
    profile: BlinkProfile,
    timings: Timings,
}

impl<'a, O: BinaryOutput> BlinkActuator<'a, O> {
    pub fn new(events: &'a EventSemaphore<f32>, output: O, timings: Timings) -> Self {
        Self {
            events,
            output,
            profile: BlinkProfile::INITIAL,
            timings,
        }
    }

    /// Active profile
    pub fn profile(&self) -> BlinkProfile {
        self.profile
    }

    /// Applies the outcome of one semaphore wait.
    ///
    /// `None` (timeout) keeps the profile. Returns the new profile when the band changed.
    pub fn apply(&mut self, temperature: Option<f32>) -> Option<BlinkProfile> {
        let temperature = temperature?;
        let profile = BlinkProfile::for_temperature(temperature);
        debug!("Temperature update: {} C", temperature);

        if profile == self.profile {
            return None;
        }
        info!(
            "LED mode {}: {} ms on, {} ms off",
            profile.band, profile.on_ms, profile.off_ms
        );
        self.profile = profile;
        Some(profile)
    }

    /// Blink loop
    pub async fn run(&mut self) -> ! {
        info!("Blink task started");
        loop {
            let temperature = self.events.take(self.timings.event_wait).await;
            self.apply(temperature);

            self.output.set_level(true);
            Timer::after(self.profile.on_time()).await;
            self.output.set_level(false);
            Timer::after(self.profile.off_time()).await;
        }
    }
}
