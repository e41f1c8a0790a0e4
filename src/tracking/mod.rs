pub mod odometry;
pub mod pose;

pub use odometry::Odometry;
pub use pose::Pose;

pub trait Tracking {
    fn pose(&self) -> Pose;

    /// Overrides the tracked pose, e.g. to place the robot at a known origin.
    fn set_pose(&mut self, pose: Pose);
}
