//! Hardware seams of the control core.
//!
//! The chassis and subsystems only talk to devices through these traits, so
//! they can be built around mock devices in tests and around vexide devices
//! on the brain.

use alloc::boxed::Box;
use core::fmt::Debug;

use num_traits::Float;

#[cfg(test)]
pub mod mock;
#[cfg(target_os = "vexos")]
pub mod v5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VelocityUnit {
    Rpm,
    Percent,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StoppingBehavior {
    Coast,
    Brake,
    Hold,
}

/// The whole-RPM target closest to `velocity`, for motors whose velocity
/// control only takes integers.
pub fn nearest_rpm(velocity: f64) -> i32 {
    velocity.round() as i32
}

pub trait SmartMotor {
    type Error: Debug;

    /// Spins at a signed velocity. The sign carries the direction.
    fn spin(&mut self, velocity: f64, unit: VelocityUnit) -> Result<(), Self::Error>;
    fn stop(&mut self) -> Result<(), Self::Error>;
    fn set_stopping_behavior(&mut self, mode: StoppingBehavior) -> Result<(), Self::Error>;

    /// Measured velocity in RPM.
    fn velocity(&self) -> Result<f64, Self::Error>;

    /// Cumulative position in revolutions.
    fn position(&self) -> Result<f64, Self::Error>;

    /// The last commanded effort, used to mirror a leader onto a follower.
    fn command(&self, unit: VelocityUnit) -> Result<f64, Self::Error>;
}

/// An absolute heading source such as an inertial sensor.
///
/// Headings are in revolutions.
#[async_trait::async_trait(?Send)]
pub trait HeadingSensor {
    type Error: Debug;

    fn heading(&self) -> Result<f64, Self::Error>;
    fn set_heading(&mut self, heading: f64) -> Result<(), Self::Error>;
    fn is_calibrating(&self) -> Result<bool, Self::Error>;

    /// Starts calibration. Completion is observed through [`is_calibrating`].
    ///
    /// [`is_calibrating`]: HeadingSensor::is_calibrating
    async fn calibrate(&mut self) -> Result<(), Self::Error>;
}

/// A snapshot of the operator controller.
///
/// Axis positions are in the range [-100, 100].
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct DriverInput {
    /// Left stick, horizontal.
    pub axis4: f64,
    /// Left stick, vertical.
    pub axis3: f64,
    /// Right stick, horizontal.
    pub axis1: f64,
    pub button_up: bool,
    pub button_down: bool,
}
