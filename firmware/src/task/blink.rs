//! Temperature blink on the status LED

use climate_monitor::task::blink::BlinkActuator;
use climate_monitor::{EventSemaphore, Timings};

use crate::driver::status_led::StatusLed;
use crate::resources::StatusLedResources;

#[embassy_executor::task]
pub async fn temperature_blink(r: StatusLedResources, temperature: &'static EventSemaphore<f32>) {
    let mut blink = BlinkActuator::new(temperature, StatusLed::new(r), Timings::DEFAULT);
    blink.run().await
}
