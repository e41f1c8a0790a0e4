use core::ops::Mul;

use super::FeedbackController;

/// A controller whose output is the error times a constant gain.
///
/// It keeps no history, so it has to be updated every tick and settles only
/// as the error itself shrinks.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Proportional<T> {
    kp: T,
}

impl<T> Proportional<T> {
    pub fn new(kp: T) -> Self {
        Self { kp }
    }
}

impl<T: Copy + Mul<Output = T>> FeedbackController<T> for Proportional<T> {
    fn update(&mut self, error: T) -> T {
        error * self.kp
    }
}
