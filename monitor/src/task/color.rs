//! Humidity color and breathing
//!
//! Shows the humidity band as the color of a single RGB pixel, with a breathing effect: the
//! brightness ramps between a floor and a ceiling and turns around at each bound. Drier and
//! wetter bands breathe faster than the comfortable band.
//!
//! # Breathing
//! ```text
//! brightness = clamp(brightness + direction, 50, 255)
//! brightness <= 50  -> direction = +|direction|
//! brightness >= 255 -> direction = -|direction|
//! pixel      = base_rgb * brightness / 255   (per channel, truncating)
//! ```
//!
//! A band change swaps color, step size and tick period, but keeps the breathing direction, so
//! the ramp never turns around anywhere else than at a bound.

use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use crate::system::band::{ColorProfile, Rgb};
use crate::system::channels::EventSemaphore;
use crate::system::collaborator::PixelOutput;
use crate::system::config::{BRIGHTNESS_CEILING, BRIGHTNESS_FLOOR};

/// Brightness ramp owned by the color task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathingState {
    brightness: u8,
    direction: i8,
}

impl BreathingState {
    /// Full brightness, ramping down by `step`
    pub fn new(step: i8) -> Self {
        Self {
            brightness: BRIGHTNESS_CEILING,
            direction: -step.saturating_abs(),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Takes over a new step size, keeping the current direction
    pub fn retune(&mut self, step: i8) {
        let step = step.saturating_abs();
        self.direction = if self.direction < 0 { -step } else { step };
    }

    /// One animation tick, returns the new brightness
    pub fn advance(&mut self) -> u8 {
        let next = (i16::from(self.brightness) + i16::from(self.direction))
            .clamp(i16::from(BRIGHTNESS_FLOOR), i16::from(BRIGHTNESS_CEILING)) as u8;
        self.brightness = next;

        if next <= BRIGHTNESS_FLOOR {
            self.direction = self.direction.saturating_abs();
        } else if next >= BRIGHTNESS_CEILING {
            self.direction = -self.direction.saturating_abs();
        }
        next
    }
}

/// Color task state
pub struct ColorActuator<'a, P> {
    events: &'a EventSemaphore<f32>,
    pixel: P,
    profile: ColorProfile,
    breathing: BreathingState,
}

impl<'a, P: PixelOutput> ColorActuator<'a, P> {
    pub fn new(events: &'a EventSemaphore<f32>, pixel: P) -> Self {
        let profile = ColorProfile::INITIAL;
        Self {
            events,
            pixel,
            profile,
            breathing: BreathingState::new(profile.breath_step),
        }
    }

    /// Active profile
    pub fn profile(&self) -> ColorProfile {
        self.profile
    }

    pub fn breathing(&self) -> BreathingState {
        self.breathing
    }

    /// Applies a humidity reading, `None` keeps the profile.
    ///
    /// Returns the new profile when the band changed.
    pub fn apply(&mut self, humidity: Option<f32>) -> Option<ColorProfile> {
        let humidity = humidity?;
        let profile = ColorProfile::for_humidity(humidity);
        debug!("Humidity update: {} %", humidity);

        if profile == self.profile {
            return None;
        }
        info!(
            "Pixel mode {}: color {}, step {} every {} ms",
            profile.band, profile.base_rgb, profile.breath_step, profile.breath_period_ms
        );
        self.profile = profile;
        self.breathing.retune(profile.breath_step);
        Some(profile)
    }

    /// Advances the breathing ramp and returns the color to show
    pub fn tick(&mut self) -> Rgb {
        let brightness = self.breathing.advance();
        self.profile.base_rgb.scaled(brightness)
    }

    /// Breathing loop.
    ///
    /// Each pass waits for a humidity update for at most one breathing period. A timeout is the
    /// normal case and runs one animation tick.
    pub async fn run(&mut self) -> ! {
        info!("Color task started");
        loop {
            let tick = Timer::after(self.profile.breath_period());
            match select(tick, self.events.wait()).await {
                Either::First(_) => {
                    let color = self.tick();
                    if self.pixel.set_pixel(color).await.is_err() {
                        warn!("Pixel write failed, retrying next tick");
                    }
                }
                Either::Second(humidity) => {
                    self.apply(Some(humidity));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::band::HumidityBand;
    use embassy_futures::block_on;
    use embassy_time::Duration;

    struct NullPixel;

    impl PixelOutput for NullPixel {
        type Error = ();

        async fn set_pixel(&mut self, _color: Rgb) -> Result<(), ()> {
            Ok(())
        }
    }

    /// Pixel refusing its first writes, recording the ones it accepts
    #[derive(Default)]
    struct FlakyPixel {
        failures_left: usize,
        attempts: usize,
        colors: std::vec::Vec<Rgb>,
    }

    impl PixelOutput for &mut FlakyPixel {
        type Error = ();

        async fn set_pixel(&mut self, color: Rgb) -> Result<(), ()> {
            self.attempts += 1;
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(());
            }
            self.colors.push(color);
            Ok(())
        }
    }

    #[test]
    fn brightness_stays_within_bounds() {
        for step in [1i8, 2, 3, 4, 5, 7, 13, 100, 127, -128] {
            let mut breathing = BreathingState::new(step);
            for _ in 0..2_000 {
                let brightness = breathing.advance();
                assert!(
                    (BRIGHTNESS_FLOOR..=BRIGHTNESS_CEILING).contains(&brightness),
                    "step {step} left the range with {brightness}"
                );
            }
        }
    }

    #[test]
    fn direction_flips_exactly_at_the_bounds() {
        let mut breathing = BreathingState::new(7);
        let mut previous = breathing;
        for _ in 0..500 {
            let brightness = breathing.advance();
            let flipped = previous.direction.signum() != breathing.direction.signum();
            if flipped {
                assert!(
                    brightness == BRIGHTNESS_FLOOR || brightness == BRIGHTNESS_CEILING,
                    "turned around at {brightness}"
                );
            }
            if brightness == BRIGHTNESS_FLOOR {
                assert!(breathing.direction > 0);
            }
            if brightness == BRIGHTNESS_CEILING {
                assert!(breathing.direction < 0);
            }
            previous = breathing;
        }
    }

    #[test]
    fn ramp_reaches_floor_and_comes_back() {
        let mut breathing = BreathingState::new(5);
        // 255 -> 50 takes 41 ticks of 5
        for _ in 0..41 {
            breathing.advance();
        }
        assert_eq!(breathing.brightness(), 50);
        assert_eq!(breathing.direction(), 5);
        assert_eq!(breathing.advance(), 55);
    }

    #[test]
    fn retune_keeps_direction() {
        let mut breathing = BreathingState::new(2);
        breathing.retune(7);
        assert_eq!(breathing.direction(), -7);

        let mut rising = BreathingState {
            brightness: 60,
            direction: 3,
        };
        rising.retune(-5);
        assert_eq!(rising.direction(), 5);
    }

    #[test]
    fn band_change_switches_color_and_speed() {
        let events = EventSemaphore::new();
        let mut color = ColorActuator::new(&events, NullPixel);
        assert_eq!(color.profile().band, HumidityBand::Comfortable);

        let profile = color.apply(Some(75.0)).unwrap();
        assert_eq!(profile.band, HumidityBand::VeryHigh);
        assert_eq!(color.breathing().direction(), -7);
        // first tick after the switch: 255 - 7 = 248, blue only
        assert_eq!(color.tick(), Rgb::new(0, 0, 248));

        assert_eq!(color.apply(Some(72.0)), None);
    }

    #[test]
    fn holds_color_without_new_readings() {
        let events = EventSemaphore::new();
        let mut color = ColorActuator::new(&events, NullPixel);
        color.apply(Some(25.0));
        let held = color.profile();

        for _ in 0..20 {
            assert_eq!(color.apply(None), None);
            color.tick();
            assert_eq!(color.profile(), held);
        }
    }

    #[test]
    fn pixel_failure_is_not_fatal() {
        let events = EventSemaphore::new();
        let mut pixel = FlakyPixel {
            failures_left: 3,
            ..Default::default()
        };
        let mut color = ColorActuator::new(&events, &mut pixel);
        // very high: step 7 every 20 ms, still ramping down for 29 ticks
        color.apply(Some(75.0));

        let deadline = Timer::after(Duration::from_millis(400));
        let outcome = block_on(select(color.run(), deadline));
        assert!(matches!(outcome, Either::Second(())));
        let breathing = color.breathing();
        drop(color);

        assert!(pixel.attempts > 5, "only {} ticks ran", pixel.attempts);
        assert_eq!(pixel.colors.len(), pixel.attempts - 3);

        // the refused ticks still advanced the ramp: 255 - 4 * 7
        assert_eq!(pixel.colors[0], Rgb::new(0, 0, 227));
        assert!(pixel.colors.windows(2).all(|w| w[1].b < w[0].b));
        let last = pixel.colors.last().map(|c| c.b);
        assert_eq!(last, Some(breathing.brightness()));
    }
}
