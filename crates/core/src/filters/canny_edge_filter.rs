use opencv::core::Mat;
use opencv::imgproc;

use crate::shared::constants::{CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};

/// Canny wrapper for the console edge-map window.
pub struct CannyEdgeFilter {
    low: f64,
    high: f64,
}

impl CannyEdgeFilter {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Edge map of a grayscale frame: same dimensions, single channel.
    pub fn apply(&self, gray: &Mat) -> opencv::Result<Mat> {
        let mut edges = Mat::default();
        imgproc::canny(gray, &mut edges, self.low, self.high, 3, false)?;
        Ok(edges)
    }
}

impl Default for CannyEdgeFilter {
    fn default() -> Self {
        Self::new(CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD)
    }
}
