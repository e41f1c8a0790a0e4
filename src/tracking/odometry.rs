use core::f64::consts::PI;

use num_traits::Float;

use super::{Pose, Tracking};
use crate::{constants::DriftModel, signed_mod};

/// How strongly carpet drift applies to a robot-relative travel direction.
///
/// One when travelling along a robot axis, zero at the 45 degree offsets.
pub fn drift_compensation(robot_relative_direction: f64) -> f64 {
    signed_mod!(2.0 * robot_relative_direction, PI).cos().abs()
}

/// Dead-reckons the field position from the drivetrain's net travel and an
/// absolute heading source.
pub struct Odometry {
    pose: Pose,
    prev_translation: f64,
    drift: DriftModel,
}

impl Odometry {
    pub fn new(origin: Pose, drift: DriftModel) -> Self {
        Self {
            pose: origin,
            prev_translation: 0.0,
            drift,
        }
    }

    /// Treats `translation` as the cumulative distance already counted, so
    /// the next update only integrates travel beyond it.
    pub fn set_reference_translation(&mut self, translation: f64) {
        self.prev_translation = translation;
    }

    /// Integrates one tick of travel.
    ///
    /// `field_direction` is the field-oriented travel direction in radians,
    /// `translation` the cumulative distance traveled in meters, and
    /// `heading` the absolute heading in radians. Only the size of the
    /// change in `translation` is used; the direction comes from
    /// `field_direction`, so the samples need not be monotonic.
    pub fn update(&mut self, field_direction: f64, translation: f64, heading: f64) {
        let delta = (translation - self.prev_translation).abs();
        self.prev_translation = translation;

        let compensation = drift_compensation(field_direction + heading);

        let mut x_delta = delta * field_direction.cos();
        let mut y_delta = delta * field_direction.sin();

        x_delta *= if x_delta > 0.0 {
            self.drift.x_positive.powf(compensation)
        } else {
            self.drift.x_negative.powf(compensation)
        };

        // The cross term is x-induced drift on y, so it only applies while the
        // robot is also travelling along y.
        if y_delta > 0.0 {
            y_delta *= self.drift.y_positive.powf(compensation);
            y_delta += x_delta.abs() * self.drift.y_per_positive_x * compensation;
        } else if y_delta < 0.0 {
            y_delta *= (self.drift.y_negative + x_delta * self.drift.y_per_negative_x)
                .powf(compensation);
            y_delta += x_delta * self.drift.y_per_negative_x * compensation;
        }

        self.pose.position.x += x_delta;
        self.pose.position.y += y_delta;
        self.pose.orientation = heading;
    }
}

impl Tracking for Odometry {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}
