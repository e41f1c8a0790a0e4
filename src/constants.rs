//! Calibrated robot constants and unit conversions.

use core::{f64::consts::TAU, time::Duration};

use bon::Builder;

use crate::devices::StoppingBehavior;

pub const INCHES_PER_METER: f64 = 39.3701;

/// Ratio between the x/y axes and the wheel vectors, which always sit at some
/// multiple of pi/4.
pub const SEC_PHI: f64 = 2.0 / core::f64::consts::SQRT_2;

/// Empirical carpet drift of the wheel odometry.
///
/// Each coefficient is a ratio of true distance over the distance the
/// odometry reported while driving along that axis.
#[derive(Clone, Copy, PartialEq, Debug, Builder)]
pub struct DriftModel {
    #[builder(default = 194.0 / 200.0)]
    pub x_positive: f64,

    #[builder(default = 207.0 / 200.0)]
    pub x_negative: f64,

    #[builder(default = 211.0 / 200.0)]
    pub y_positive: f64,

    #[builder(default = 180.0 / 200.0)]
    pub y_negative: f64,

    /// Y drift per unit of x travel while moving towards positive y.
    #[builder(default = -12.0 / 200.0)]
    pub y_per_positive_x: f64,

    /// Y drift per unit of x travel while moving towards negative y.
    #[builder(default = 18.0 / 200.0)]
    pub y_per_negative_x: f64,
}

impl DriftModel {
    /// A model that reports odometry unchanged.
    pub fn identity() -> Self {
        Self {
            x_positive: 1.0,
            x_negative: 1.0,
            y_positive: 1.0,
            y_negative: 1.0,
            y_per_positive_x: 0.0,
            y_per_negative_x: 0.0,
        }
    }
}

impl Default for DriftModel {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Builder)]
pub struct DriveConstants {
    /// Diameter in inches.
    #[builder(default = 4.0)]
    pub wheel_diameter: f64,

    /// Rated speed of the drive motors' gearset.
    #[builder(default = 200.0)]
    pub motor_max_rpm: f64,

    #[builder(default = Duration::from_millis(20))]
    pub loop_period: Duration,

    #[builder(default = StoppingBehavior::Brake)]
    pub idle_mode: StoppingBehavior,

    #[builder(default = 0.04)]
    pub translation_kp: f64,

    #[builder(default = 0.8)]
    pub rotation_kp: f64,

    /// Speed limit of the position hold, in meters per second.
    #[builder(default = 0.2)]
    pub max_speed: f64,

    /// Full stick deflection in driver control, in meters per second.
    #[builder(default = 1.0)]
    pub teleop_max_speed: f64,
}

impl Default for DriveConstants {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DriveConstants {
    /// Wheel circumference in inches.
    pub fn wheel_circumference(&self) -> f64 {
        self.wheel_diameter * core::f64::consts::PI
    }

    pub fn revolutions_to_meters(&self, revolutions: f64) -> f64 {
        revolutions * self.wheel_circumference() / INCHES_PER_METER
    }

    pub fn meters_per_sec_to_rpm(&self, speed: f64) -> f64 {
        speed * INCHES_PER_METER * 60.0 / self.wheel_circumference()
    }

    pub fn rpm_to_meters_per_sec(&self, rpm: f64) -> f64 {
        rpm * self.wheel_circumference() / (INCHES_PER_METER * 60.0)
    }
}

/// Rotation requests map one radian per second of robot turn to one radian
/// per second at each wheel.
pub fn rad_per_sec_to_rpm(speed: f64) -> f64 {
    speed * 60.0 / TAU
}

pub fn revolutions_to_radians(revolutions: f64) -> f64 {
    revolutions * TAU
}

pub fn radians_to_revolutions(radians: f64) -> f64 {
    radians / TAU
}
