use bon::Builder;
use num_traits::Float;

use crate::{
    controllers::{proportional::Proportional, FeedbackController},
    devices::{HeadingSensor, SmartMotor},
    kinematics::MotionRequest,
    mecanum::chassis::Chassis,
    tracking::{Pose, Tracking},
    utils::math::{clamp_magnitude, wrap_angle_error},
};

/// Per-call overrides of the chassis' position-hold constants.
#[derive(Clone, Copy, PartialEq, Debug, Default, Builder)]
pub struct HoldParameters {
    pub translation_kp: Option<f64>,
    pub rotation_kp: Option<f64>,

    /// Meters per second.
    pub max_speed: Option<f64>,
}

#[macro_export]
macro_rules! params_hold {
    (
        $($key:ident : $value:expr),* $(,)?
    ) => {
        $crate::mecanum::motions::hold::HoldParameters::builder()
            $(.$key($value))*
            .build()
    };
}
pub use params_hold;

/// The field-oriented request that moves `current` toward `target`.
///
/// The steering direction comes from the translation controller's effort,
/// while the speed is the raw distance to the target clamped to
/// `max_speed`; the translation gain therefore never changes the speed.
pub fn hold_request(
    current: &Pose,
    target: &Pose,
    translation: &mut impl FeedbackController<f64>,
    rotation: &mut impl FeedbackController<f64>,
    max_speed: f64,
) -> MotionRequest {
    let error = target.position - current.position;
    let x_effort = translation.update(error.x);
    let y_effort = translation.update(error.y);

    let direction = y_effort.atan2(x_effort);
    let magnitude = clamp_magnitude(error.norm(), max_speed);

    let theta_error = wrap_angle_error(target.orientation - current.orientation);
    let theta_effort = rotation.update(theta_error);

    MotionRequest::new(direction, magnitude, theta_effort, true)
}

impl<M: SmartMotor, G: HeadingSensor> Chassis<M, G> {
    /// One tick of proportional position hold toward a field pose.
    ///
    /// Nothing tracks whether the target is reached: call this every tick
    /// and stop calling it once the pose is close enough.
    pub fn drive_to_position(&mut self, x: f64, y: f64, heading: f64) {
        self.drive_to_pose(Pose::new(x, y, heading), HoldParameters::default());
    }

    pub fn drive_to_pose(&mut self, target: Pose, params: HoldParameters) {
        let mut translation = Proportional::new(
            params
                .translation_kp
                .unwrap_or(self.constants.translation_kp),
        );
        let mut rotation =
            Proportional::new(params.rotation_kp.unwrap_or(self.constants.rotation_kp));
        let max_speed = params.max_speed.unwrap_or(self.constants.max_speed);

        let request = hold_request(
            &self.pose(),
            &target,
            &mut translation,
            &mut rotation,
            max_speed,
        );
        self.apply_speeds(&request);
    }
}
