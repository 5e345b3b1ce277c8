//! Single WS2812 pixel driven through PIO0 state machine 0

use core::convert::Infallible;

use climate_monitor::{PixelOutput, Rgb};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{Common, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use smart_leds::RGB8;

use crate::resources::{Irqs, PixelResources};

pub struct Ws2812Pixel {
    ws: PioWs2812<'static, PIO0, 0, 1>,
    // the program stays loaded for as long as the common block lives
    _common: Common<'static, PIO0>,
}

impl Ws2812Pixel {
    pub fn new(r: PixelResources) -> Self {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(r.pio, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let ws = PioWs2812::new(&mut common, sm0, r.dma, r.pin, &program);
        Self {
            ws,
            _common: common,
        }
    }
}

impl PixelOutput for Ws2812Pixel {
    type Error = Infallible;

    async fn set_pixel(&mut self, color: Rgb) -> Result<(), Infallible> {
        self.ws.write(&[RGB8::new(color.r, color.g, color.b)]).await;
        Ok(())
    }
}
