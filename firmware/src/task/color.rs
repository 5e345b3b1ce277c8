//! Humidity color on the WS2812 pixel

use climate_monitor::task::color::ColorActuator;
use climate_monitor::EventSemaphore;

use crate::driver::ws2812::Ws2812Pixel;
use crate::resources::PixelResources;

#[embassy_executor::task]
pub async fn humidity_color(r: PixelResources, humidity: &'static EventSemaphore<f32>) {
    let mut color = ColorActuator::new(humidity, Ws2812Pixel::new(r));
    color.run().await
}
