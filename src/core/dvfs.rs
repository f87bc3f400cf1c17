use serde::Serialize;
use std::fmt;

/// Coefficient of the cubic power model, `P = k * f^3`.
pub const POWER_COEFF: f64 = 45.0;

// Upper bounds (inclusive) of the LOW and MEDIUM display bands
pub const LOW_BAND_MAX: f64 = 0.55;
pub const MEDIUM_BAND_MAX: f64 = 0.80;

/// A CPU operating frequency, normalized so that `1.0` is full speed.
///
/// The work rate of a running process equals its frequency: at `0.5` one
/// time unit retires half a unit of burst. Values can only be one of the
/// discrete [`Frequency::LEVELS`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Frequency(f64);

impl Frequency {
    pub const LOW: Self = Self(0.50);
    pub const REDUCED: Self = Self(0.65);
    pub const NOMINAL: Self = Self(0.80);
    pub const MAX: Self = Self(1.00);

    pub const LEVELS: [Self; 4] = [Self::LOW, Self::REDUCED, Self::NOMINAL, Self::MAX];

    pub fn value(self) -> f64 {
        self.0
    }

    /// Instantaneous power draw at this frequency.
    pub fn power(self) -> f64 {
        POWER_COEFF * self.0 * self.0 * self.0
    }

    pub fn band(self) -> FreqBand {
        if self.0 <= LOW_BAND_MAX {
            FreqBand::Low
        } else if self.0 <= MEDIUM_BAND_MAX {
            FreqBand::Medium
        } else {
            FreqBand::High
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FreqBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for FreqBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(label)
    }
}
