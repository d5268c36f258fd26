use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::frame_source::{CaptureError, FrameSource};

/// Webcam adapter over `videoio::VideoCapture`.
///
/// The device is opened exclusively on construction and released when the
/// value is dropped.
pub struct Camera {
    capture: VideoCapture,
}

impl Camera {
    pub fn open(index: i32) -> Result<Self, CaptureError> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CaptureError::Open { index });
        }
        log::info!("camera {index} opened");
        Ok(Self { capture })
    }
}

impl FrameSource for Camera {
    fn grab(&mut self) -> Result<Mat, CaptureError> {
        let mut frame = Mat::default();
        let grabbed = self.capture.read(&mut frame)?;
        if !grabbed || frame.empty() {
            return Err(CaptureError::FrameUnavailable);
        }
        Ok(frame)
    }
}
