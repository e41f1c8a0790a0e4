pub mod chassis;
#[macro_use]
pub mod motions;
