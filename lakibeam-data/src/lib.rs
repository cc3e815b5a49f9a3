pub mod block;
pub mod point;
pub mod transform;

pub use block::{MeasurementBlock, ResolvedReturn, SLOTS_PER_BLOCK};
pub use point::Point;
pub use transform::{TransformParams, DEFAULT_ANGULAR_STEP_DEGREE};
