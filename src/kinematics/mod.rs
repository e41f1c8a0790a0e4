//! Mecanum kinematics.
//!
//! Pure maps between the four wheel readings and a robot-relative
//! translation vector plus rotation rate. Nothing here holds state.

use core::{
    f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4},
    ops::{Index, IndexMut},
};

use num_traits::Float;

pub mod forward;
pub mod inverse;

pub use forward::*;
pub use inverse::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Corner {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::BackLeft,
        Corner::BackRight,
    ];

    /// Direction of the vector a wheel pushes along for a positive reading.
    ///
    /// The right-front and left-back readings sit on the opposite diagonals
    /// from their names; this is the pairing that agrees with the mixing in
    /// [`inverse`], so commanding a direction reads the same direction back.
    pub fn angle(self) -> f64 {
        match self {
            Corner::FrontLeft => 7.0 * FRAC_PI_4,
            Corner::FrontRight => 5.0 * FRAC_PI_4,
            Corner::BackLeft => FRAC_PI_4,
            Corner::BackRight => 3.0 * FRAC_PI_4,
        }
    }
}

/// Unit vectors along [`Corner::angle`].
pub const WHEEL_VECTORS: Wheels<(f64, f64)> = Wheels {
    front_left: (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    front_right: (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    back_left: (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    back_right: (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
};

/// One value per wheel. Speeds are in RPM, positions in revolutions.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Wheels<T> {
    pub front_left: T,
    pub front_right: T,
    pub back_left: T,
    pub back_right: T,
}

pub type WheelSpeeds = Wheels<f64>;
pub type WheelPositions = Wheels<f64>;

impl<T> Wheels<T> {
    pub fn new(front_left: T, front_right: T, back_left: T, back_right: T) -> Self {
        Self {
            front_left,
            front_right,
            back_left,
            back_right,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Corner) -> T) -> Self {
        Self::new(
            f(Corner::FrontLeft),
            f(Corner::FrontRight),
            f(Corner::BackLeft),
            f(Corner::BackRight),
        )
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Wheels<U> {
        Wheels::new(
            f(self.front_left),
            f(self.front_right),
            f(self.back_left),
            f(self.back_right),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (Corner, &T)> + '_ {
        Corner::ALL.into_iter().map(move |corner| (corner, &self[corner]))
    }
}

impl<T> Index<Corner> for Wheels<T> {
    type Output = T;

    fn index(&self, corner: Corner) -> &T {
        match corner {
            Corner::FrontLeft => &self.front_left,
            Corner::FrontRight => &self.front_right,
            Corner::BackLeft => &self.back_left,
            Corner::BackRight => &self.back_right,
        }
    }
}

impl<T> IndexMut<Corner> for Wheels<T> {
    fn index_mut(&mut self, corner: Corner) -> &mut T {
        match corner {
            Corner::FrontLeft => &mut self.front_left,
            Corner::FrontRight => &mut self.front_right,
            Corner::BackLeft => &mut self.back_left,
            Corner::BackRight => &mut self.back_right,
        }
    }
}

impl WheelSpeeds {
    /// Largest absolute speed of the four.
    pub fn fastest(&self) -> f64 {
        self.iter()
            .map(|(_, speed)| speed.abs())
            .fold(0.0, |fastest, speed| fastest.max(speed))
    }

    /// Scales every wheel down together when any exceeds `max_rpm`.
    ///
    /// The ratios between wheels are unchanged, so the commanded direction
    /// and curvature survive the limit.
    pub fn desaturate(self, max_rpm: f64) -> Self {
        let fastest = self.fastest();
        if fastest > max_rpm {
            let ratio = max_rpm / fastest;
            self.map(|speed| speed * ratio)
        } else {
            self
        }
    }
}

/// A motion command for one tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MotionRequest {
    /// Travel direction. Zero is the robot's forward axis, or the field's
    /// when `field_oriented` is set.
    pub direction: f64,

    /// Meters per second.
    pub translation_speed: f64,

    /// Radians per second.
    pub rotation_speed: f64,

    pub field_oriented: bool,
}

impl MotionRequest {
    pub fn new(
        direction: f64,
        translation_speed: f64,
        rotation_speed: f64,
        field_oriented: bool,
    ) -> Self {
        Self {
            direction,
            translation_speed,
            rotation_speed,
            field_oriented,
        }
    }

    pub fn stationary() -> Self {
        Self::new(0.0, 0.0, 0.0, false)
    }
}
