use nalgebra::Vector2;
use num_traits::Float;

use super::{WheelPositions, WheelSpeeds, Wheels, WHEEL_VECTORS};
use crate::constants::DriveConstants;

/// Sums each wheel's reading along its wheel vector.
///
/// The result is in the readings' units, scaled by the wheel-vector basis:
/// a quarter of its norm is the per-wheel equivalent of the robot's travel.
pub fn wheel_vector_sum(readings: &Wheels<f64>) -> Vector2<f64> {
    readings
        .iter()
        .map(|(corner, reading)| {
            let (x, y) = WHEEL_VECTORS[corner];
            Vector2::new(reading * x, reading * y)
        })
        .fold(Vector2::zeros(), |sum, vector| sum + vector)
}

/// Direction the wheels are carrying the robot, in radians.
///
/// Field-oriented results subtract `heading`, the absolute robot heading.
pub fn direction_of_travel(velocities: &WheelSpeeds, heading: f64, field_oriented: bool) -> f64 {
    let sum = wheel_vector_sum(velocities);
    let direction = sum.y.atan2(sum.x);
    if field_oriented {
        direction - heading
    } else {
        direction
    }
}

/// Translation speed in meters per second.
pub fn translation_speed(velocities: &WheelSpeeds, constants: &DriveConstants) -> f64 {
    constants.rpm_to_meters_per_sec(wheel_vector_sum(velocities).norm() / 4.0)
}

/// Net translation in meters implied by cumulative wheel positions.
pub fn translation_distance(positions: &WheelPositions, constants: &DriveConstants) -> f64 {
    constants.revolutions_to_meters(wheel_vector_sum(positions).norm() / 4.0)
}
