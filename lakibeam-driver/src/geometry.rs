use crate::numeric::degree_to_radian;
use lakibeam_data::TransformParams;

fn flip_sign(flip: bool) -> f64 {
    if flip {
        -1.
    } else {
        1.
    }
}

/// Converts a polar return into the output plane.
///
/// Angle 0 points along +y and angles grow towards +x. The angle is not
/// wrapped; `sin` and `cos` handle values past 360 degree.
/// `distance_mm` must be nonzero, empty slots are filtered by the caller.
pub fn to_cartesian(distance_mm: u16, angle_degree: f64, params: &TransformParams) -> (f64, f64) {
    let radian = degree_to_radian(angle_degree + params.rotation_degree);
    let d = distance_mm as f64 * params.scale;
    let x = d * f64::sin(radian) * flip_sign(params.flip_x) + params.x_offset;
    let y = d * f64::cos(radian) * flip_sign(params.flip_y) + params.y_offset;
    (x, y)
}
