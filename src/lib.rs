#![no_std]
extern crate alloc;

pub mod constants;
pub mod controllers;
pub mod devices;
pub mod error;
pub mod kinematics;

#[macro_use]
pub mod mecanum;
pub mod robot;
pub mod subsystems;
pub mod tracking;

#[macro_use]
pub mod utils;

#[cfg(target_os = "vexos")]
pub mod logger;
