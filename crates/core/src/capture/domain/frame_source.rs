use opencv::core::Mat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not open camera device {index}")]
    Open { index: i32 },
    #[error("no frame available from the camera")]
    FrameUnavailable,
    #[error("camera backend error: {0}")]
    Backend(#[from] opencv::Error),
}

/// One color frame per call from an open capture session.
///
/// A grab failure means the device is gone, not a transient hiccup;
/// callers stop rather than retry.
pub trait FrameSource: Send {
    fn grab(&mut self) -> Result<Mat, CaptureError>;
}
