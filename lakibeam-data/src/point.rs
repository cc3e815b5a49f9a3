#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A return placed in the configured 2D coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Raw distance of the return in mm.
    pub distance_mm: u16,
    /// Return strength of the laser pulse.
    pub intensity: u8,
    /// Sensor angle of the return in degree, before rotation.
    pub angle_degree: f64,
}
