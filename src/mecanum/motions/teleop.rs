use core::f64::consts::TAU;

use num_traits::Float;

use crate::{
    devices::{DriverInput, HeadingSensor, SmartMotor},
    kinematics::MotionRequest,
    mecanum::chassis::Chassis,
};

const STICK_SCALE: f64 = 0.01;

/// Maps the sticks to a field-oriented request.
///
/// Full stick deflection is `max_speed` m/s of translation and one
/// revolution per second of rotation.
pub fn teleop_request(input: &DriverInput, max_speed: f64) -> MotionRequest {
    let x = -input.axis4 * STICK_SCALE;
    let y = -input.axis3 * STICK_SCALE;
    let turn = -input.axis1 * STICK_SCALE;

    MotionRequest::new(y.atan2(x), x.hypot(y) * max_speed, turn * TAU, true)
}

impl<M: SmartMotor, G: HeadingSensor> Chassis<M, G> {
    pub fn driver(&mut self, input: &DriverInput) {
        let request = teleop_request(input, self.constants.teleop_max_speed);
        self.apply_speeds(&request);
    }
}
