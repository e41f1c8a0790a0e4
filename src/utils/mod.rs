#[macro_use]
pub mod math;
pub mod period;
