#![cfg_attr(target_os = "vexos", no_main, no_std)]

#[cfg(target_os = "vexos")]
mod brain {
    use log::{error, info, LevelFilter};
    use mecanum_core::{
        constants::{DriftModel, DriveConstants},
        devices::{v5::V5Motor, DriverInput},
        kinematics::Wheels,
        logger::LOGGER,
        mecanum::chassis::Chassis,
        robot::Robot,
        subsystems::Lift,
        tracking::Pose,
        utils::period::remaining,
    };
    use vexide::{
        io::println,
        prelude::*,
        time::{sleep, Instant},
    };

    pub struct Competition {
        controller: Controller,
        robot: Robot<V5Motor, InertialSensor>,
    }

    impl Competition {
        pub async fn new(peripherals: Peripherals) -> Self {
            if let Err(error) = LOGGER.init(LevelFilter::Info) {
                println!("Logger already installed: {error}");
            }

            let drive_motor =
                |port| V5Motor::new(Motor::new(port, Gearset::Green, Direction::Forward));
            let motors = Wheels::new(
                drive_motor(peripherals.port_19),
                drive_motor(peripherals.port_20),
                drive_motor(peripherals.port_10),
                drive_motor(peripherals.port_9),
            );
            let gyro = InertialSensor::new(peripherals.port_5);

            let mut chassis = Chassis::new(
                motors,
                gyro,
                DriveConstants::default(),
                DriftModel::default(),
                Pose::default(),
            );
            if let Err(error) = chassis.calibrate(0.0).await {
                error!("{error}");
            }

            let lift = Lift::new(
                V5Motor::new(Motor::new(
                    peripherals.port_11,
                    Gearset::Green,
                    Direction::Reverse,
                )),
                V5Motor::new(Motor::new(
                    peripherals.port_12,
                    Gearset::Green,
                    Direction::Reverse,
                )),
            );

            Self {
                controller: peripherals.primary_controller,
                robot: Robot::new(chassis, lift),
            }
        }

        fn input(&self) -> DriverInput {
            let state = self.controller.state().unwrap_or_default();
            DriverInput {
                axis4: state.left_stick.x() * 100.0,
                axis3: state.left_stick.y() * 100.0,
                axis1: state.right_stick.x() * 100.0,
                button_up: state.button_up.is_pressed(),
                button_down: state.button_down.is_pressed(),
            }
        }
    }

    impl Compete for Competition {
        async fn driver(&mut self) {
            info!("Driver control");
            let period = self.robot.chassis.constants().loop_period;
            loop {
                let start = Instant::now();
                let input = self.input();
                self.robot.periodic(&input);
                sleep(remaining(period, start.elapsed())).await;
            }
        }
    }
}

#[cfg(target_os = "vexos")]
#[vexide::main]
async fn main(peripherals: vexide::prelude::Peripherals) {
    use vexide::prelude::*;

    let competition = brain::Competition::new(peripherals).await;
    competition.compete().await;
}

#[cfg(not(target_os = "vexos"))]
fn main() {}
