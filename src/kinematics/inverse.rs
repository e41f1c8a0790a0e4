use num_traits::Float;

use super::{MotionRequest, WheelSpeeds, Wheels};
use crate::constants::{rad_per_sec_to_rpm, DriveConstants, SEC_PHI};

/// Mixes a motion request into wheel speeds in RPM.
///
/// `heading` is the absolute robot heading in radians and is only read for
/// field-oriented requests. The result is not desaturated.
pub fn inverse(request: &MotionRequest, heading: f64, constants: &DriveConstants) -> WheelSpeeds {
    let translation_rpm = constants.meters_per_sec_to_rpm(request.translation_speed);
    let rotation_rpm = -rad_per_sec_to_rpm(request.rotation_speed);

    let direction = if request.field_oriented {
        request.direction + heading
    } else {
        request.direction
    };

    // Project the direction vector onto the wheel vectors.
    let coeff_rpm = SEC_PHI * translation_rpm;
    let x_projection = coeff_rpm * direction.sin();
    let y_projection = coeff_rpm * direction.cos();

    Wheels::new(
        rotation_rpm - (x_projection - y_projection),
        rotation_rpm - (x_projection + y_projection),
        rotation_rpm + (x_projection + y_projection),
        rotation_rpm + (x_projection - y_projection),
    )
}
