use alloc::format;

use log::{debug, info, warn};

use crate::{
    constants::{radians_to_revolutions, revolutions_to_radians, DriftModel, DriveConstants},
    devices::{HeadingSensor, SmartMotor, VelocityUnit},
    error::DriveError,
    kinematics::{
        direction_of_travel, inverse, translation_distance, translation_speed, Corner,
        MotionRequest, WheelPositions, WheelSpeeds, Wheels,
    },
    tracking::{Odometry, Pose, Tracking},
    utils::math::round_to,
};

/// A four-wheel mecanum drivetrain with an absolute heading source.
///
/// The chassis owns its devices. Readings that fail are logged and replaced
/// by the last good value, so one flaky port does not stall the loop.
pub struct Chassis<M: SmartMotor, G: HeadingSensor> {
    pub(super) motors: Wheels<M>,
    pub(super) gyro: G,
    pub(super) odometry: Odometry,
    pub(super) constants: DriveConstants,

    last_velocities: WheelSpeeds,
    last_positions: WheelPositions,
    last_heading: f64,
}

impl<M: SmartMotor, G: HeadingSensor> Chassis<M, G> {
    pub fn new(
        mut motors: Wheels<M>,
        gyro: G,
        constants: DriveConstants,
        drift: DriftModel,
        origin: Pose,
    ) -> Self {
        for corner in Corner::ALL {
            if let Err(error) = motors[corner].set_stopping_behavior(constants.idle_mode) {
                warn!("{corner:?} drive motor rejected stopping behavior: {error:?}");
            }
        }
        info!(
            "Mecanum chassis at ({:.3}, {:.3}, {:.3})",
            origin.x(),
            origin.y(),
            origin.theta()
        );
        let mut chassis = Self {
            motors,
            gyro,
            odometry: Odometry::new(origin, drift),
            constants,
            last_velocities: WheelSpeeds::default(),
            last_positions: WheelPositions::default(),
            last_heading: origin.theta(),
        };
        // Encoders keep counting across program restarts.
        let start = chassis.distance_traveled();
        chassis.odometry.set_reference_translation(start);
        chassis
    }

    pub fn constants(&self) -> &DriveConstants {
        &self.constants
    }

    /// Calibrates the heading source, then sets it to `heading` radians.
    ///
    /// Blocks until the sensor stops reporting that it is calibrating, so it
    /// must run before the control loop is scheduled.
    pub async fn calibrate(&mut self, heading: f64) -> Result<(), DriveError> {
        self.gyro
            .calibrate()
            .await
            .map_err(|error| DriveError::Calibration(format!("{error:?}")))?;
        loop {
            match self.gyro.is_calibrating() {
                Ok(true) => core::hint::spin_loop(),
                Ok(false) => break,
                Err(error) => {
                    warn!("Could not poll heading calibration: {error:?}");
                    break;
                }
            }
        }
        self.gyro
            .set_heading(radians_to_revolutions(heading))
            .map_err(|error| DriveError::InitialHeading(format!("{error:?}")))?;
        self.last_heading = heading;
        let pose = self.pose();
        self.set_pose(Pose {
            orientation: heading,
            ..pose
        });
        info!("Gyro calibrated");
        Ok(())
    }

    /// Absolute heading in radians.
    pub fn heading(&mut self) -> f64 {
        match self.gyro.heading() {
            Ok(heading) => self.last_heading = revolutions_to_radians(heading),
            Err(error) => warn!("Heading read failed: {error:?}"),
        }
        self.last_heading
    }

    /// Wheel velocities in RPM.
    pub fn velocities(&mut self) -> WheelSpeeds {
        for corner in Corner::ALL {
            match self.motors[corner].velocity() {
                Ok(velocity) => self.last_velocities[corner] = velocity,
                Err(error) => warn!("{corner:?} velocity read failed: {error:?}"),
            }
        }
        self.last_velocities
    }

    /// Cumulative wheel positions in revolutions.
    pub fn positions(&mut self) -> WheelPositions {
        for corner in Corner::ALL {
            match self.motors[corner].position() {
                Ok(position) => self.last_positions[corner] = position,
                Err(error) => warn!("{corner:?} position read failed: {error:?}"),
            }
        }
        self.last_positions
    }

    pub fn actual_direction_of_travel(&mut self, field_oriented: bool) -> f64 {
        let velocities = self.velocities();
        let heading = self.heading();
        direction_of_travel(&velocities, heading, field_oriented)
    }

    /// Net distance the wheels have carried the robot, in meters.
    pub fn distance_traveled(&mut self) -> f64 {
        let positions = self.positions();
        translation_distance(&positions, &self.constants)
    }

    /// Meters per second.
    pub fn actual_speed(&mut self) -> f64 {
        let velocities = self.velocities();
        translation_speed(&velocities, &self.constants)
    }

    /// Feeds one tick of telemetry to the odometry.
    pub fn periodic(&mut self) {
        let direction = self.actual_direction_of_travel(true);
        let distance = self.distance_traveled();
        let heading = self.last_heading;
        self.odometry.update(direction, distance, heading);

        let pose = self.odometry.pose();
        debug!(
            "x: {:.3} m, y: {:.3} m, theta: {:.3} rad",
            pose.x(),
            pose.y(),
            pose.theta()
        );
    }

    pub fn apply_speeds(&mut self, request: &MotionRequest) {
        let heading = if request.field_oriented {
            self.heading()
        } else {
            0.0
        };
        let speeds = inverse(request, heading, &self.constants);
        self.apply_desaturated(speeds);
    }

    /// Writes wheel speeds in RPM, scaled down together if any wheel is
    /// beyond the motors' rated speed.
    pub fn apply_desaturated(&mut self, speeds: WheelSpeeds) {
        let speeds = speeds.desaturate(self.constants.motor_max_rpm);
        for corner in Corner::ALL {
            let rpm = round_to(speeds[corner], 4);
            if let Err(error) = self.motors[corner].spin(rpm, VelocityUnit::Rpm) {
                warn!("{corner:?} drive motor rejected {rpm} rpm: {error:?}");
            }
        }
    }

    pub fn stop(&mut self) {
        for corner in Corner::ALL {
            if let Err(error) = self.motors[corner].stop() {
                warn!("{corner:?} drive motor failed to stop: {error:?}");
            }
        }
    }
}

impl<M: SmartMotor, G: HeadingSensor> Tracking for Chassis<M, G> {
    fn pose(&self) -> Pose {
        self.odometry.pose()
    }

    fn set_pose(&mut self, pose: Pose) {
        self.odometry.set_pose(pose);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use core::f64::consts::{FRAC_PI_2, SQRT_2};

    use approx::assert_relative_eq;
    use num_traits::Float;

    use super::*;
    use crate::devices::{
        mock::{MockGyro, MockMotor},
        StoppingBehavior,
    };

    pub(crate) struct Rig {
        pub motors: Wheels<MockMotor>,
        pub gyro: MockGyro,
        pub chassis: Chassis<MockMotor, MockGyro>,
    }

    pub(crate) fn rig(drift: DriftModel) -> Rig {
        let motors = Wheels::from_fn(|_| MockMotor::new());
        let gyro = MockGyro::new();
        let chassis = Chassis::new(
            motors.clone(),
            gyro.clone(),
            DriveConstants::default(),
            drift,
            Pose::default(),
        );
        Rig {
            motors,
            gyro,
            chassis,
        }
    }

    #[test]
    fn motors_brake_when_idle() {
        let rig = rig(DriftModel::default());
        for (_, motor) in rig.motors.iter() {
            assert_eq!(
                motor.state.borrow().stopping_behavior,
                Some(StoppingBehavior::Brake)
            );
        }
    }

    #[test]
    fn calibrate_polls_until_done_then_sets_heading() {
        let mut rig = rig(DriftModel::default());
        rig.gyro.state.borrow_mut().calibrating_polls = 3;

        embassy_futures::block_on(rig.chassis.calibrate(FRAC_PI_2)).unwrap();

        let state = rig.gyro.state.borrow();
        assert_eq!(state.calibrate_calls, 1);
        assert_eq!(state.polls, 4);
        assert_relative_eq!(state.heading, 0.25);
        assert_relative_eq!(rig.chassis.pose().theta(), FRAC_PI_2);
    }

    #[test]
    fn encoder_history_is_not_counted_as_travel() {
        let motors = Wheels::from_fn(|_| MockMotor::new());
        motors.front_left.set_telemetry(0.0, 5.0);
        motors.front_right.set_telemetry(0.0, -5.0);
        motors.back_left.set_telemetry(0.0, 5.0);
        motors.back_right.set_telemetry(0.0, -5.0);

        let mut chassis = Chassis::new(
            motors.clone(),
            MockGyro::new(),
            DriveConstants::default(),
            DriftModel::identity(),
            Pose::default(),
        );
        chassis.periodic();
        assert_relative_eq!(chassis.pose().x(), 0.0);
        assert_relative_eq!(chassis.pose().y(), 0.0);
    }

    #[test]
    fn calibrate_reports_sensor_failure() {
        let mut rig = rig(DriftModel::default());
        rig.gyro.state.borrow_mut().faulted = true;
        let result = embassy_futures::block_on(rig.chassis.calibrate(0.0));
        assert!(matches!(result, Err(DriveError::Calibration(_))));
    }

    #[test]
    fn heading_falls_back_to_last_reading() {
        let mut rig = rig(DriftModel::default());
        rig.gyro.set_heading_radians(1.0);
        assert_relative_eq!(rig.chassis.heading(), 1.0, epsilon = 1e-12);

        rig.gyro.state.borrow_mut().faulted = true;
        assert_relative_eq!(rig.chassis.heading(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn stationary_request_spins_nothing() {
        let mut rig = rig(DriftModel::default());
        rig.chassis.apply_speeds(&MotionRequest::stationary());
        for (_, motor) in rig.motors.iter() {
            assert_relative_eq!(motor.commanded_rpm().unwrap(), 0.0);
        }
    }

    #[test]
    fn saturated_request_is_scaled_to_max_rpm() {
        let mut rig = rig(DriftModel::default());
        rig.chassis
            .apply_speeds(&MotionRequest::new(0.0, 5.0, 0.0, false));
        for (_, motor) in rig.motors.iter() {
            assert_relative_eq!(motor.commanded_rpm().unwrap().abs(), 200.0);
        }
        assert!(rig.motors.front_left.commanded_rpm().unwrap() > 0.0);
        assert!(rig.motors.front_right.commanded_rpm().unwrap() < 0.0);
    }

    #[test]
    fn commands_are_rounded() {
        let mut rig = rig(DriftModel::default());
        rig.chassis
            .apply_desaturated(Wheels::new(12.345678, -1.0, 0.00001, 3.0));
        assert_relative_eq!(rig.motors.front_left.commanded_rpm().unwrap(), 12.3457);
        assert_relative_eq!(rig.motors.back_left.commanded_rpm().unwrap(), 0.0);
    }

    #[test]
    fn field_oriented_request_reads_heading() {
        let mut rig = rig(DriftModel::default());
        rig.gyro.set_heading_radians(FRAC_PI_2);
        rig.chassis
            .apply_speeds(&MotionRequest::new(-FRAC_PI_2, 0.3, 0.0, true));

        let mut reference = self::rig(DriftModel::default());
        reference
            .chassis
            .apply_speeds(&MotionRequest::new(0.0, 0.3, 0.0, false));

        for (corner, motor) in rig.motors.iter() {
            assert_relative_eq!(
                motor.commanded_rpm().unwrap(),
                reference.motors[corner].commanded_rpm().unwrap(),
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn stop_stops_every_wheel() {
        let mut rig = rig(DriftModel::default());
        rig.chassis
            .apply_speeds(&MotionRequest::new(0.0, 0.3, 0.0, false));
        rig.chassis.stop();
        for (_, motor) in rig.motors.iter() {
            assert!(motor.state.borrow().stopped);
        }
    }

    #[test]
    fn periodic_integrates_forward_travel() {
        let mut rig = rig(DriftModel::identity());
        let constants = DriveConstants::default();
        let revolutions = SQRT_2;
        for (corner, motor) in rig.motors.iter() {
            let sign = match corner {
                Corner::FrontLeft | Corner::BackLeft => 1.0,
                Corner::FrontRight | Corner::BackRight => -1.0,
            };
            motor.set_telemetry(sign * 100.0, sign * revolutions);
        }

        rig.chassis.periodic();

        let pose = rig.chassis.pose();
        assert_relative_eq!(pose.x(), constants.revolutions_to_meters(1.0), epsilon = 1e-9);
        assert_relative_eq!(pose.y(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(pose.theta(), 0.0);
    }

    #[test]
    fn periodic_takes_heading_from_gyro() {
        let mut rig = rig(DriftModel::default());
        rig.gyro.set_heading_radians(0.75);
        rig.chassis.periodic();
        assert_relative_eq!(rig.chassis.pose().theta(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn faulted_motor_keeps_last_telemetry() {
        let mut rig = rig(DriftModel::default());
        rig.motors.back_right.set_telemetry(50.0, 1.5);
        assert_relative_eq!(rig.chassis.velocities().back_right, 50.0);
        assert_relative_eq!(rig.chassis.positions().back_right, 1.5);

        rig.motors.back_right.state.borrow_mut().faulted = true;
        assert_relative_eq!(rig.chassis.velocities().back_right, 50.0);
        assert_relative_eq!(rig.chassis.positions().back_right, 1.5);
    }

    #[test]
    fn actual_speed_reads_velocities() {
        let mut rig = rig(DriftModel::default());
        let constants = DriveConstants::default();
        let speeds = inverse(&MotionRequest::new(0.4, 0.5, 0.0, false), 0.0, &constants);
        for (corner, motor) in rig.motors.iter() {
            motor.set_telemetry(speeds[corner], 0.0);
        }
        assert_relative_eq!(rig.chassis.actual_speed(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(
            rig.chassis.actual_direction_of_travel(false),
            0.4,
            epsilon = 1e-9
        );
    }
}
