use alloc::string::String;

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("Heading sensor calibration failed: {0}")]
    Calibration(String),

    #[error("Heading sensor rejected the initial heading: {0}")]
    InitialHeading(String),
}
