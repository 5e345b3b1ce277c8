//! Band tables
//!
//! A band is a half-open interval `[previous upper, upper)` mapped to a fixed output profile.
//! The first band of a table reaches down to -∞ and the last one up to +∞, so every reading
//! (values that compare false against every bound included) selects exactly one profile.
//!
//! # Temperature → blink cadence
//! ```text
//! (-∞, 20) COLD         1000 ms on / 1000 ms off
//! [20, 28) COMFORTABLE   500 ms on /  500 ms off
//! [28, 35) WARM          200 ms on /  200 ms off
//! [35, +∞) HOT           100 ms on /  100 ms off
//! ```
//!
//! # Humidity → pixel color and breathing
//! ```text
//! (-∞, 30) DRY          orange (255,165,0)  step 5  every 30 ms
//! [30, 40) LOW          yellow (255,255,0)  step 3  every 40 ms
//! [40, 60) COMFORTABLE  green  (0,255,0)    step 2  every 50 ms
//! [60, 70) HIGH         cyan   (0,255,255)  step 4  every 35 ms
//! [70, +∞) VERY HIGH    blue   (0,0,255)    step 7  every 20 ms
//! ```

use core::fmt;

use embassy_time::Duration;

/// One interval of a band table, closed below by the previous band's `upper`
#[derive(Debug, Clone, Copy)]
pub struct Band<P> {
    upper: f32,
    profile: P,
}

impl<P> Band<P> {
    /// Band ending just below `upper`
    pub const fn below(upper: f32, profile: P) -> Self {
        Self { upper, profile }
    }

    /// Open-ended band taking everything that is left
    pub const fn rest(profile: P) -> Self {
        Self {
            upper: f32::INFINITY,
            profile,
        }
    }
}

/// Ordered, non-overlapping band table
pub struct BandTable<P: 'static, const N: usize> {
    bands: [Band<P>; N],
}

impl<P: Copy, const N: usize> BandTable<P, N> {
    /// Bands must be ordered by ascending `upper`, with [`Band::rest`] last.
    pub const fn new(bands: [Band<P>; N]) -> Self {
        assert!(N > 0, "band table needs at least one band");
        Self { bands }
    }

    /// Profile of the band containing `value`.
    ///
    /// Falls through to the last band for anything that is not below any bound.
    pub fn lookup(&self, value: f32) -> P {
        self.bands
            .iter()
            .find(|band| value < band.upper)
            .unwrap_or(&self.bands[N - 1])
            .profile
    }

    /// Bands in ascending order as `(upper bound, profile)`
    pub fn iter(&self) -> impl Iterator<Item = (f32, P)> + '_ {
        self.bands.iter().map(|band| (band.upper, band.profile))
    }
}

/// RGB color as sent to the pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const ORANGE: Self = Self::new(255, 165, 0);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per channel `channel * brightness / 255`, truncating
    pub fn scaled(self, brightness: u8) -> Self {
        let scale = |channel: u8| (u16::from(channel) * u16::from(brightness) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

// ===================================================================
// Temperature
// ===================================================================

/// Temperature band selecting the blink cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureBand {
    Cold,
    Comfortable,
    Warm,
    Hot,
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureBand::Cold => "COLD",
            TemperatureBand::Comfortable => "COMFORTABLE",
            TemperatureBand::Warm => "WARM",
            TemperatureBand::Hot => "HOT",
        })
    }
}

/// On/off cadence of the status LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkProfile {
    pub band: TemperatureBand,
    pub on_ms: u16,
    pub off_ms: u16,
}

impl BlinkProfile {
    const fn new(band: TemperatureBand, on_ms: u16, off_ms: u16) -> Self {
        Self { band, on_ms, off_ms }
    }

    /// Profile used until the first temperature arrives (slow 1 Hz blink)
    pub const INITIAL: Self = Self::new(TemperatureBand::Cold, 1000, 1000);

    pub fn on_time(&self) -> Duration {
        Duration::from_millis(u64::from(self.on_ms))
    }

    pub fn off_time(&self) -> Duration {
        Duration::from_millis(u64::from(self.off_ms))
    }

    /// Profile for a temperature in °C
    pub fn for_temperature(temperature: f32) -> Self {
        BLINK_BANDS.lookup(temperature)
    }
}

pub static BLINK_BANDS: BandTable<BlinkProfile, 4> = BandTable::new([
    Band::below(20.0, BlinkProfile::new(TemperatureBand::Cold, 1000, 1000)),
    Band::below(
        28.0,
        BlinkProfile::new(TemperatureBand::Comfortable, 500, 500),
    ),
    Band::below(35.0, BlinkProfile::new(TemperatureBand::Warm, 200, 200)),
    Band::rest(BlinkProfile::new(TemperatureBand::Hot, 100, 100)),
]);

// ===================================================================
// Humidity
// ===================================================================

/// Humidity band selecting the pixel color and breathing speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HumidityBand {
    Dry,
    Low,
    Comfortable,
    High,
    VeryHigh,
}

impl fmt::Display for HumidityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HumidityBand::Dry => "DRY",
            HumidityBand::Low => "LOW",
            HumidityBand::Comfortable => "COMFORTABLE",
            HumidityBand::High => "HIGH",
            HumidityBand::VeryHigh => "VERY HIGH",
        })
    }
}

/// Pixel color and breathing animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorProfile {
    pub band: HumidityBand,
    pub base_rgb: Rgb,
    /// Brightness change per animation tick (magnitude, the sign is the breathing direction)
    pub breath_step: i8,
    pub breath_period_ms: u16,
}

impl ColorProfile {
    const fn new(
        band: HumidityBand,
        base_rgb: Rgb,
        breath_step: i8,
        breath_period_ms: u16,
    ) -> Self {
        Self {
            band,
            base_rgb,
            breath_step,
            breath_period_ms,
        }
    }

    /// Profile used until the first humidity arrives (steady green)
    pub const INITIAL: Self = Self::new(HumidityBand::Comfortable, Rgb::GREEN, 2, 50);

    pub fn breath_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.breath_period_ms))
    }

    /// Profile for a relative humidity in %
    pub fn for_humidity(humidity: f32) -> Self {
        COLOR_BANDS.lookup(humidity)
    }
}

pub static COLOR_BANDS: BandTable<ColorProfile, 5> = BandTable::new([
    Band::below(
        30.0,
        ColorProfile::new(HumidityBand::Dry, Rgb::ORANGE, 5, 30),
    ),
    Band::below(
        40.0,
        ColorProfile::new(HumidityBand::Low, Rgb::YELLOW, 3, 40),
    ),
    Band::below(
        60.0,
        ColorProfile::new(HumidityBand::Comfortable, Rgb::GREEN, 2, 50),
    ),
    Band::below(
        70.0,
        ColorProfile::new(HumidityBand::High, Rgb::CYAN, 4, 35),
    ),
    Band::rest(ColorProfile::new(HumidityBand::VeryHigh, Rgb::BLUE, 7, 20)),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_ascending_and_open_ended() {
        let uppers: std::vec::Vec<f32> = COLOR_BANDS.iter().map(|(upper, _)| upper).collect();
        assert!(uppers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(uppers.last().copied(), Some(f32::INFINITY));
        let hottest = BLINK_BANDS.iter().last().map(|(_, p)| p.band);
        assert_eq!(hottest, Some(TemperatureBand::Hot));
    }

    fn temperature_band(t: f32) -> TemperatureBand {
        BlinkProfile::for_temperature(t).band
    }

    fn humidity_band(h: f32) -> HumidityBand {
        ColorProfile::for_humidity(h).band
    }

    #[test]
    fn temperature_boundaries_belong_to_the_upper_band() {
        assert_eq!(temperature_band(19.99), TemperatureBand::Cold);
        assert_eq!(temperature_band(20.0), TemperatureBand::Comfortable);
        assert_eq!(temperature_band(27.99), TemperatureBand::Comfortable);
        assert_eq!(temperature_band(28.0), TemperatureBand::Warm);
        assert_eq!(temperature_band(34.99), TemperatureBand::Warm);
        assert_eq!(temperature_band(35.0), TemperatureBand::Hot);
    }

    #[test]
    fn humidity_boundaries_belong_to_the_upper_band() {
        assert_eq!(humidity_band(29.9), HumidityBand::Dry);
        assert_eq!(humidity_band(30.0), HumidityBand::Low);
        assert_eq!(humidity_band(40.0), HumidityBand::Comfortable);
        assert_eq!(humidity_band(60.0), HumidityBand::High);
        assert_eq!(humidity_band(69.9), HumidityBand::High);
        assert_eq!(humidity_band(70.0), HumidityBand::VeryHigh);
    }

    #[test]
    fn lookup_is_total() {
        assert_eq!(temperature_band(f32::NEG_INFINITY), TemperatureBand::Cold);
        assert_eq!(temperature_band(f32::MIN), TemperatureBand::Cold);
        assert_eq!(temperature_band(f32::MAX), TemperatureBand::Hot);
        assert_eq!(temperature_band(f32::INFINITY), TemperatureBand::Hot);
        assert_eq!(humidity_band(-5.0), HumidityBand::Dry);
        assert_eq!(humidity_band(250.0), HumidityBand::VeryHigh);

        // sweep across the whole table, every value must hit exactly one band
        let mut t = -60.0f32;
        while t < 80.0 {
            let hits = BLINK_BANDS
                .bands
                .iter()
                .enumerate()
                .filter(|(i, band)| {
                    let lower = match i.checked_sub(1) {
                        Some(below) => BLINK_BANDS.bands[below].upper,
                        None => f32::NEG_INFINITY,
                    };
                    t >= lower && t < band.upper
                })
                .count();
            assert_eq!(hits, 1, "temperature {t} matched {hits} bands");
            t += 0.25;
        }
    }

    #[test]
    fn profiles_carry_the_expected_timing() {
        let hot = BlinkProfile::for_temperature(40.0);
        assert_eq!(hot.on_time(), Duration::from_millis(100));
        assert_eq!(hot.off_time(), Duration::from_millis(100));

        let very_high = ColorProfile::for_humidity(85.0);
        assert_eq!(very_high.base_rgb, Rgb::new(0, 0, 255));
        assert_eq!(very_high.breath_step, 7);
        assert_eq!(very_high.breath_period(), Duration::from_millis(20));
    }

    #[test]
    fn scaling_truncates() {
        let orange = Rgb::new(255, 165, 0);
        assert_eq!(orange.scaled(255), orange);
        assert_eq!(orange.scaled(50), Rgb::new(50, 32, 0));
        assert_eq!(orange.scaled(128), Rgb::new(128, 82, 0));
    }
}
