use log::warn;

use crate::devices::{DriverInput, SmartMotor, VelocityUnit};

/// A two-motor lift. The follower copies whatever the leader was last told,
/// so only the leader is ever commanded directly.
pub struct Lift<M: SmartMotor> {
    leader: M,
    follower: M,
}

impl<M: SmartMotor> Lift<M> {
    pub fn new(leader: M, follower: M) -> Self {
        Self { leader, follower }
    }

    /// Spins the leader at `power` in [-1, 1] of full speed.
    pub fn set_power(&mut self, power: f64) {
        if let Err(error) = self.leader.spin(power * 100.0, VelocityUnit::Percent) {
            warn!("Lift leader rejected power {power}: {error:?}");
        }
    }

    pub fn stop(&mut self) {
        if let Err(error) = self.leader.stop() {
            warn!("Lift leader failed to stop: {error:?}");
        }
    }

    /// Down takes priority over up; neither stops the lift.
    pub fn driver(&mut self, input: &DriverInput) {
        if input.button_down {
            self.set_power(-1.0);
        } else if input.button_up {
            self.set_power(1.0);
        } else {
            self.stop();
        }
    }

    /// Mirrors the leader's command onto the follower.
    pub fn periodic(&mut self) {
        let command = match self.leader.command(VelocityUnit::Percent) {
            Ok(command) => command,
            Err(error) => {
                warn!("Lift leader command read failed: {error:?}");
                return;
            }
        };
        if let Err(error) = self.follower.spin(command, VelocityUnit::Percent) {
            warn!("Lift follower rejected {command}%: {error:?}");
        }
    }
}
