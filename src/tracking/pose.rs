use nalgebra::Vector2;
use num_traits::{AsPrimitive, Num};

/// Robot pose on the field. Position in meters, orientation in radians.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pose {
    pub position: Vector2<f64>,
    pub orientation: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Pose {
    pub fn new<T: Num + AsPrimitive<f64>, U: Num + AsPrimitive<f64>, V: Num + AsPrimitive<f64>>(
        x: T,
        y: U,
        orientation: V,
    ) -> Self {
        Self {
            position: Vector2::<f64>::new(x.as_(), y.as_()),
            orientation: orientation.as_(),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn theta(&self) -> f64 {
        self.orientation
    }
}
