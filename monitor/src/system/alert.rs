//! Alert classification
//!
//! Derives the Normal/Warning/Critical level from temperature and humidity together. Checks run
//! in priority order, Critical first, so readings that satisfy both a Warning and a Critical
//! condition end up Critical.
//!
//! | Level    | Temperature              | Humidity                 |
//! |----------|--------------------------|--------------------------|
//! | Critical | < 15 or > 32             | < 30 or > 70             |
//! | Warning  | [15, 18) or (28, 32]     | [30, 40) or (60, 70]     |
//! | Normal   | everything else (18 ≤ t ≤ 28 and 40 ≤ h ≤ 60)       |
//!
//! The humidity edges are asymmetric: 60 % is still Normal, 70 % is still Warning.

use core::fmt;

use embassy_time::Duration;

use crate::system::config::{
    CRITICAL_REFRESH_INTERVAL, NORMAL_REFRESH_INTERVAL, WARNING_REFRESH_INTERVAL,
};
use crate::system::sample::Sample;

/// Alert level, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    /// Classifies a reading
    pub fn classify(temperature: f32, humidity: f32) -> Self {
        if temperature < 15.0 || temperature > 32.0 || humidity < 30.0 || humidity > 70.0 {
            AlertLevel::Critical
        } else if (15.0..18.0).contains(&temperature)
            || (temperature > 28.0 && temperature <= 32.0)
            || (30.0..40.0).contains(&humidity)
            || (humidity > 60.0 && humidity <= 70.0)
        {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }

    /// Classifies a sample
    pub fn of(sample: &Sample) -> Self {
        Self::classify(sample.temperature(), sample.humidity())
    }

    /// How often the display is redrawn while this level is latched
    pub fn refresh_interval(&self) -> Duration {
        match self {
            AlertLevel::Normal => NORMAL_REFRESH_INTERVAL,
            AlertLevel::Warning => WARNING_REFRESH_INTERVAL,
            AlertLevel::Critical => CRITICAL_REFRESH_INTERVAL,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertLevel::Normal => "NORMAL",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
        })
    }
}

/// Change of the latched alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: AlertLevel,
    pub to: AlertLevel,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_readings() {
        assert_eq!(AlertLevel::classify(18.0, 50.0), AlertLevel::Normal);
        assert_eq!(AlertLevel::classify(17.9, 50.0), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(14.9, 50.0), AlertLevel::Critical);
        assert_eq!(AlertLevel::classify(25.0, 70.0), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(25.0, 70.1), AlertLevel::Critical);
    }

    #[test]
    fn normal_band_edges_stay_normal() {
        assert_eq!(AlertLevel::classify(28.0, 50.0), AlertLevel::Normal);
        assert_eq!(AlertLevel::classify(25.0, 40.0), AlertLevel::Normal);
        assert_eq!(AlertLevel::classify(25.0, 60.0), AlertLevel::Normal);
        assert_eq!(AlertLevel::classify(18.0, 40.0), AlertLevel::Normal);
    }

    #[test]
    fn warning_edges() {
        assert_eq!(AlertLevel::classify(15.0, 50.0), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(28.1, 50.0), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(32.0, 50.0), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(25.0, 30.0), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(25.0, 39.9), AlertLevel::Warning);
        assert_eq!(AlertLevel::classify(25.0, 60.1), AlertLevel::Warning);
    }

    #[test]
    fn critical_wins_over_warning() {
        // warning temperature combined with critical humidity and the other way round
        assert_eq!(AlertLevel::classify(16.0, 75.0), AlertLevel::Critical);
        assert_eq!(AlertLevel::classify(30.0, 20.0), AlertLevel::Critical);
        assert_eq!(AlertLevel::classify(40.0, 35.0), AlertLevel::Critical);
        assert_eq!(AlertLevel::classify(10.0, 65.0), AlertLevel::Critical);
    }

    #[test]
    fn severity_order() {
        assert!(AlertLevel::Normal < AlertLevel::Warning);
        assert!(AlertLevel::Warning < AlertLevel::Critical);
    }

    #[test]
    fn refresh_gets_faster_with_severity() {
        let secs = |level: AlertLevel| level.refresh_interval().as_secs();
        assert_eq!(secs(AlertLevel::Normal), 5);
        assert_eq!(secs(AlertLevel::Warning), 2);
        assert_eq!(secs(AlertLevel::Critical), 1);
    }
}
