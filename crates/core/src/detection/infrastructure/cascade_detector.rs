use std::path::Path;

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use thiserror::Error;

use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::detection_box::DetectionBox;

#[derive(Error, Debug)]
pub enum DetectorLoadError {
    #[error("failed to load cascade {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: opencv::Error,
    },
    #[error("cascade {path} is empty or not a cascade file")]
    Empty { path: String },
}

/// Haar cascade adapter over `objdetect::CascadeClassifier`.
///
/// `scale_factor` and `min_neighbors` tune the external multi-scale
/// search's precision/recall trade-off and pass through unchanged.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
}

impl CascadeDetector {
    pub fn new(
        path: &Path,
        scale_factor: f64,
        min_neighbors: i32,
    ) -> Result<Self, DetectorLoadError> {
        let path_str = path.to_string_lossy().into_owned();
        let load_err = |source| DetectorLoadError::Load {
            path: path_str.clone(),
            source,
        };
        let classifier = CascadeClassifier::new(&path_str).map_err(load_err)?;
        if classifier.empty().map_err(load_err)? {
            return Err(DetectorLoadError::Empty { path: path_str });
        }
        Ok(Self {
            classifier,
            scale_factor,
            min_neighbors,
        })
    }
}

impl ObjectDetector for CascadeDetector {
    fn detect(
        &mut self,
        gray: &Mat,
        within: Option<&DetectionBox>,
    ) -> Result<Vec<DetectionBox>, Box<dyn std::error::Error>> {
        let mut hits = Vector::<Rect>::new();
        match within {
            Some(region) => {
                let crop = Mat::roi(gray, (*region).into())?.clone_pointee();
                self.classifier.detect_multi_scale(
                    &crop,
                    &mut hits,
                    self.scale_factor,
                    self.min_neighbors,
                    0,
                    Size::default(),
                    Size::default(),
                )?;
            }
            None => {
                self.classifier.detect_multi_scale(
                    gray,
                    &mut hits,
                    self.scale_factor,
                    self.min_neighbors,
                    0,
                    Size::default(),
                    Size::default(),
                )?;
            }
        }
        Ok(hits.iter().map(DetectionBox::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_fails_to_load() {
        let result = CascadeDetector::new(Path::new("no/such/cascade.xml"), 1.1, 4);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_file_fails_to_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cascade.xml");
        fs::write(&path, b"not a cascade at all").unwrap();

        let result = CascadeDetector::new(&path, 1.1, 4);
        assert!(result.is_err());
    }
}
