//! Unit newtypes and small enums shared by the estimator and the map layer.

use serde::{Deserialize, Serialize};
use std::ops::Mul;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(from = "f64", into = "f64")]
pub struct Hours(f64);

impl Hours {
    pub const ZERO: Self = Self(0.0);
    pub(crate) const SECS_IN_H: f64 = 3600.0;

    /// Negative and non-finite values collapse to zero.
    pub const fn new(val: f64) -> Self {
        if val.is_finite() && val > 0.0 {
            Self(val)
        } else {
            Self(0.0)
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

// Deserialization goes through the clamping constructor.
impl From<f64> for Hours {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<Hours> for f64 {
    fn from(val: Hours) -> f64 {
        val.0
    }
}

impl std::fmt::Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}h", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(from = "f64", into = "f64")]
pub struct Km(f64);

impl Km {
    pub const fn new(val: f64) -> Self {
        if val.is_finite() && val > 0.0 {
            Self(val)
        } else {
            Self(0.0)
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.0 * factor)
    }

    /// Caps the distance at `max`.
    pub fn capped(self, max: Km) -> Self {
        Self(self.0.min(max.0))
    }

    pub fn to_meters(self) -> Meters {
        Meters::new(self.0 * 1000.0)
    }
}

impl From<f64> for Km {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<Km> for f64 {
    fn from(val: Km) -> f64 {
        val.0
    }
}

impl std::fmt::Display for Km {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} km", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(from = "f64", into = "f64")]
pub struct Meters(f64);

impl Meters {
    pub const fn new(val: f64) -> Self {
        if val.is_finite() && val > 0.0 {
            Self(val)
        } else {
            Self(0.0)
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Meters {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<Meters> for f64 {
    fn from(val: Meters) -> f64 {
        val.0
    }
}

impl std::fmt::Display for Meters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 >= 1000.0 {
            write!(f, "{:.1} km", self.0 / 1000.0)
        } else {
            write!(f, "{:.0} m", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct KmPerHour(f64);

impl KmPerHour {
    pub const fn new(val: f64) -> Self {
        if val.is_finite() && val > 0.0 {
            Self(val)
        } else {
            Self(0.0)
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Mul<Hours> for KmPerHour {
    type Output = Km;

    fn mul(self, rhs: Hours) -> Km {
        Km::new(self.0 * rhs.value())
    }
}

impl From<f64> for KmPerHour {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<KmPerHour> for f64 {
    fn from(val: KmPerHour) -> f64 {
        val.0
    }
}

impl std::fmt::Display for KmPerHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} km/h", self.0)
    }
}

/// The three fixed search-management bands, innermost first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum ProbabilityTier {
    High,
    Medium,
    Low,
}

/// Display metadata handed to the map renderer alongside each radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneStyle {
    pub color_rgb: (u8, u8, u8),
    pub fill_opacity: f64,
    pub weight: u8,
}

impl ZoneStyle {
    pub fn hex_color(&self) -> String {
        let (r, g, b) = self.color_rgb;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}
