#[macro_use]
pub mod hold;
pub mod teleop;
