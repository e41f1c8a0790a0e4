use core::f64::consts::{PI, TAU};

use num_traits::Float;

#[macro_export]
macro_rules! signed_mod {
    ($dividend:expr, $divisor:expr) => {
        (($dividend % $divisor) + $divisor) % $divisor
    };
}

pub use signed_mod;

/// Brings an angle difference back into (-pi, pi] with a single 2pi step.
///
/// Inputs more than one turn away stay out of range.
pub fn wrap_angle_error(error: f64) -> f64 {
    if error > PI {
        error - TAU
    } else if error <= -PI {
        error + TAU
    } else {
        error
    }
}

/// Clamps the magnitude of `value` to `limit`, keeping its sign.
pub fn clamp_magnitude(value: f64, limit: f64) -> f64 {
    if value.abs() > limit {
        limit.copysign(value)
    } else {
        value
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10.0_f64.powi(decimals);
    (value * scale).round() / scale
}
