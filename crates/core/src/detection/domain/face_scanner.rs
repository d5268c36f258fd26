use opencv::core::Mat;

use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::detection_box::DetectionBox;

/// One detected face and the eye boxes found inside it, all in full-frame
/// coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceObservation {
    pub face: DetectionBox,
    pub eyes: Vec<DetectionBox>,
}

/// Runs face detection over a grayscale frame and, when an eye detector is
/// present, nests eye detection inside each face box.
///
/// Eye detectors see the face's crop and answer in face-local coordinates;
/// the offset into full-frame coordinates happens here, exactly once, so
/// every reported eye box lies inside its parent face.
pub struct FaceScanner {
    faces: Box<dyn ObjectDetector>,
    eyes: Option<Box<dyn ObjectDetector>>,
}

impl FaceScanner {
    pub fn new(faces: Box<dyn ObjectDetector>) -> Self {
        Self { faces, eyes: None }
    }

    pub fn with_eyes(faces: Box<dyn ObjectDetector>, eyes: Box<dyn ObjectDetector>) -> Self {
        Self {
            faces,
            eyes: Some(eyes),
        }
    }

    pub fn scan(&mut self, gray: &Mat) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>> {
        let mut observations = Vec::new();
        for face in self.faces.detect(gray, None)? {
            if !face.is_valid() {
                continue;
            }
            let eyes = match self.eyes.as_mut() {
                Some(detector) => detector
                    .detect(gray, Some(&face))?
                    .into_iter()
                    .map(|eye| eye.offset_by(face.x, face.y))
                    .filter(|eye| eye.is_valid() && eye.fits_within(&face))
                    .collect(),
                None => Vec::new(),
            };
            observations.push(FaceObservation { face, eyes });
        }
        Ok(observations)
    }
}
