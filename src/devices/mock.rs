//! In-memory devices for exercising the control core off the robot.

use alloc::{boxed::Box, rc::Rc};
use core::cell::RefCell;

use super::{HeadingSensor, SmartMotor, StoppingBehavior, VelocityUnit};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MockFault;

#[derive(Clone, Debug, Default)]
pub struct MotorState {
    pub commanded: Option<(f64, VelocityUnit)>,
    pub stopped: bool,
    pub stopping_behavior: Option<StoppingBehavior>,
    pub velocity: f64,
    pub position: f64,
    pub faulted: bool,
}

/// A motor whose state stays observable after it is moved into a chassis.
#[derive(Clone, Default)]
pub struct MockMotor {
    pub state: Rc<RefCell<MotorState>>,
}

impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_telemetry(&self, velocity: f64, position: f64) {
        let mut state = self.state.borrow_mut();
        state.velocity = velocity;
        state.position = position;
    }

    pub fn commanded_rpm(&self) -> Option<f64> {
        match self.state.borrow().commanded {
            Some((velocity, VelocityUnit::Rpm)) => Some(velocity),
            _ => None,
        }
    }

    fn check(&self) -> Result<(), MockFault> {
        if self.state.borrow().faulted {
            Err(MockFault)
        } else {
            Ok(())
        }
    }
}

impl SmartMotor for MockMotor {
    type Error = MockFault;

    fn spin(&mut self, velocity: f64, unit: VelocityUnit) -> Result<(), Self::Error> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        state.commanded = Some((velocity, unit));
        state.stopped = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        state.commanded = None;
        state.stopped = true;
        Ok(())
    }

    fn set_stopping_behavior(&mut self, mode: StoppingBehavior) -> Result<(), Self::Error> {
        self.check()?;
        self.state.borrow_mut().stopping_behavior = Some(mode);
        Ok(())
    }

    fn velocity(&self) -> Result<f64, Self::Error> {
        self.check()?;
        Ok(self.state.borrow().velocity)
    }

    fn position(&self) -> Result<f64, Self::Error> {
        self.check()?;
        Ok(self.state.borrow().position)
    }

    fn command(&self, unit: VelocityUnit) -> Result<f64, Self::Error> {
        self.check()?;
        Ok(match self.state.borrow().commanded {
            Some((velocity, commanded_unit)) if commanded_unit == unit => velocity,
            _ => 0.0,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct GyroState {
    /// Heading in revolutions.
    pub heading: f64,
    pub calibrate_calls: usize,
    /// Number of `is_calibrating` polls that still report true.
    pub calibrating_polls: usize,
    pub polls: usize,
    pub faulted: bool,
}

#[derive(Clone, Default)]
pub struct MockGyro {
    pub state: Rc<RefCell<GyroState>>,
}

impl MockGyro {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_heading_radians(&self, heading: f64) {
        self.state.borrow_mut().heading = crate::constants::radians_to_revolutions(heading);
    }
}

#[async_trait::async_trait(?Send)]
impl HeadingSensor for MockGyro {
    type Error = MockFault;

    fn heading(&self) -> Result<f64, Self::Error> {
        let state = self.state.borrow();
        if state.faulted {
            return Err(MockFault);
        }
        Ok(state.heading)
    }

    fn set_heading(&mut self, heading: f64) -> Result<(), Self::Error> {
        self.state.borrow_mut().heading = heading;
        Ok(())
    }

    fn is_calibrating(&self) -> Result<bool, Self::Error> {
        let mut state = self.state.borrow_mut();
        state.polls += 1;
        if state.calibrating_polls > 0 {
            state.calibrating_polls -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn calibrate(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.faulted {
            return Err(MockFault);
        }
        state.calibrate_calls += 1;
        Ok(())
    }
}
