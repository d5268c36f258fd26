use opencv::core::Mat;

use crate::shared::detection_box::DetectionBox;

/// Domain interface over the external multi-scale detection search.
///
/// When `within` is given, detection runs over that sub-region of `gray`
/// and the returned boxes are in the sub-region's local coordinate space.
pub trait ObjectDetector: Send {
    fn detect(
        &mut self,
        gray: &Mat,
        within: Option<&DetectionBox>,
    ) -> Result<Vec<DetectionBox>, Box<dyn std::error::Error>>;
}
