use alloc::boxed::Box;

use vexide::{
    devices::smart::{imu::InertialError, motor::MotorError},
    prelude::{BrakeMode, InertialSensor, Motor, MotorControl},
};

use super::{nearest_rpm, HeadingSensor, SmartMotor, StoppingBehavior, VelocityUnit};

impl From<StoppingBehavior> for BrakeMode {
    fn from(mode: StoppingBehavior) -> Self {
        match mode {
            StoppingBehavior::Coast => BrakeMode::Coast,
            StoppingBehavior::Brake => BrakeMode::Brake,
            StoppingBehavior::Hold => BrakeMode::Hold,
        }
    }
}

/// Pairs a motor with the stopping behavior `stop` should apply.
pub struct V5Motor {
    motor: Motor,
    stopping_behavior: StoppingBehavior,
}

impl V5Motor {
    pub fn new(motor: Motor) -> Self {
        Self {
            motor,
            stopping_behavior: StoppingBehavior::Coast,
        }
    }

    fn max_rpm(&self) -> Result<f64, MotorError> {
        Ok(self.motor.gearset()?.max_rpm() as f64)
    }
}

impl SmartMotor for V5Motor {
    type Error = MotorError;

    fn spin(&mut self, velocity: f64, unit: VelocityUnit) -> Result<(), Self::Error> {
        match unit {
            VelocityUnit::Rpm => self.motor.set_velocity(nearest_rpm(velocity)),
            VelocityUnit::Percent => self
                .motor
                .set_voltage(velocity / 100.0 * Motor::V5_MAX_VOLTAGE),
        }
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.motor.brake(self.stopping_behavior.into())
    }

    fn set_stopping_behavior(&mut self, mode: StoppingBehavior) -> Result<(), Self::Error> {
        self.stopping_behavior = mode;
        Ok(())
    }

    fn velocity(&self) -> Result<f64, Self::Error> {
        self.motor.velocity()
    }

    fn position(&self) -> Result<f64, Self::Error> {
        Ok(self.motor.position()?.as_revolutions())
    }

    fn command(&self, unit: VelocityUnit) -> Result<f64, Self::Error> {
        let (rpm, voltage) = match self.motor.target() {
            MotorControl::Velocity(rpm) => (Some(rpm as f64), None),
            MotorControl::Voltage(voltage) => (None, Some(voltage)),
            _ => (Some(0.0), None),
        };
        Ok(match (unit, rpm, voltage) {
            (VelocityUnit::Rpm, Some(rpm), _) => rpm,
            (VelocityUnit::Rpm, None, Some(voltage)) => {
                voltage / Motor::V5_MAX_VOLTAGE * self.max_rpm()?
            }
            (VelocityUnit::Percent, Some(rpm), _) => rpm / self.max_rpm()? * 100.0,
            (VelocityUnit::Percent, None, Some(voltage)) => voltage / Motor::V5_MAX_VOLTAGE * 100.0,
            _ => 0.0,
        })
    }
}

#[async_trait::async_trait(?Send)]
impl HeadingSensor for InertialSensor {
    type Error = InertialError;

    fn heading(&self) -> Result<f64, Self::Error> {
        Ok(InertialSensor::heading(self)? / 360.0)
    }

    fn set_heading(&mut self, heading: f64) -> Result<(), Self::Error> {
        InertialSensor::set_heading(self, heading * 360.0)
    }

    fn is_calibrating(&self) -> Result<bool, Self::Error> {
        InertialSensor::is_calibrating(self)
    }

    async fn calibrate(&mut self) -> Result<(), Self::Error> {
        InertialSensor::calibrate(self).await
    }
}
