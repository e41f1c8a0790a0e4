//! One control tick for the whole robot.

use log::info;

use crate::{
    devices::{DriverInput, HeadingSensor, SmartMotor},
    mecanum::chassis::Chassis,
    subsystems::Lift,
    tracking::Pose,
};

/// What the drivetrain does with each tick.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum DriveMode {
    /// Field-oriented stick control.
    #[default]
    Driver,
    /// Proportional hold on a field pose.
    Hold(Pose),
    /// Drive motors left stopped.
    Idle,
}

pub struct Robot<M: SmartMotor, G: HeadingSensor> {
    pub chassis: Chassis<M, G>,
    pub lift: Lift<M>,
    mode: DriveMode,
}

impl<M: SmartMotor, G: HeadingSensor> Robot<M, G> {
    pub fn new(chassis: Chassis<M, G>, lift: Lift<M>) -> Self {
        Self {
            chassis,
            lift,
            mode: DriveMode::default(),
        }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DriveMode) {
        if mode != self.mode {
            info!("Drive mode {:?} -> {:?}", self.mode, mode);
            if mode == DriveMode::Idle {
                self.chassis.stop();
            }
            self.mode = mode;
        }
    }

    /// Runs once per loop period: lift buttons, odometry, the drive command
    /// for the current mode, then the lift follower.
    pub fn periodic(&mut self, input: &DriverInput) {
        self.lift.driver(input);
        self.chassis.periodic();

        match self.mode {
            DriveMode::Driver => self.chassis.driver(input),
            DriveMode::Hold(target) => {
                self.chassis
                    .drive_to_position(target.x(), target.y(), target.theta())
            }
            DriveMode::Idle => {}
        }

        self.lift.periodic();
    }
}
