#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angle between two consecutive slots of a LakiBeam1L block.
pub const DEFAULT_ANGULAR_STEP_DEGREE: f64 = 0.25;

/// Parameters mapping sensor polar coordinates to the output plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformParams {
    /// Rotation added to every angle, in degree.
    pub rotation_degree: f64,
    /// Multiplier applied to distances (mm to output units).
    pub scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    /// Mirror the x axis before the offset is added.
    pub flip_x: bool,
    /// Mirror the y axis before the offset is added.
    pub flip_y: bool,
    /// Angle between two consecutive slots, fixed per sensor model.
    pub angular_step_degree: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        TransformParams {
            rotation_degree: 0.,
            scale: 1.,
            x_offset: 0.,
            y_offset: 0.,
            flip_x: false,
            flip_y: false,
            angular_step_degree: DEFAULT_ANGULAR_STEP_DEGREE,
        }
    }
}
