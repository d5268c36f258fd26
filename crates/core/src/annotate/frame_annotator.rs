use opencv::core::{Mat, Scalar};
use opencv::imgproc;

use crate::detection::domain::face_scanner::FaceObservation;
use crate::shared::constants::BOX_THICKNESS;
use crate::shared::detection_box::DetectionBox;

/// Stroke style for one class of box.
#[derive(Clone, Copy, Debug)]
pub struct BoxStyle {
    pub color: Scalar,
    pub thickness: i32,
}

impl BoxStyle {
    /// Green, for faces.
    pub fn face() -> Self {
        Self {
            color: Scalar::new(0.0, 255.0, 0.0, 0.0),
            thickness: BOX_THICKNESS,
        }
    }

    /// Blue, for eyes.
    pub fn eye() -> Self {
        Self {
            color: Scalar::new(255.0, 0.0, 0.0, 0.0),
            thickness: BOX_THICKNESS,
        }
    }
}

/// Draws detection boxes onto a color frame in place. No labels, no
/// confidence scores.
pub struct FrameAnnotator {
    face_style: BoxStyle,
    eye_style: BoxStyle,
}

impl FrameAnnotator {
    pub fn new(face_style: BoxStyle, eye_style: BoxStyle) -> Self {
        Self {
            face_style,
            eye_style,
        }
    }

    pub fn annotate(
        &self,
        frame: &mut Mat,
        observations: &[FaceObservation],
    ) -> opencv::Result<()> {
        for observation in observations {
            draw_box(frame, &observation.face, self.face_style)?;
            for eye in &observation.eyes {
                draw_box(frame, eye, self.eye_style)?;
            }
        }
        Ok(())
    }
}

impl Default for FrameAnnotator {
    fn default() -> Self {
        Self::new(BoxStyle::face(), BoxStyle::eye())
    }
}

fn draw_box(frame: &mut Mat, boxed: &DetectionBox, style: BoxStyle) -> opencv::Result<()> {
    imgproc::rectangle(
        frame,
        (*boxed).into(),
        style.color,
        style.thickness,
        imgproc::LINE_8,
        0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Vec3b, CV_8UC3};
    use opencv::prelude::*;

    fn black_frame() -> Mat {
        Mat::new_rows_cols_with_default(64, 64, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn pixel(frame: &Mat, row: i32, col: i32) -> Vec3b {
        *frame.at_2d::<Vec3b>(row, col).unwrap()
    }

    #[test]
    fn test_face_box_drawn_in_green() {
        let mut frame = black_frame();
        let observation = FaceObservation {
            face: DetectionBox::new(8, 8, 20, 20),
            eyes: vec![],
        };

        FrameAnnotator::default()
            .annotate(&mut frame, &[observation])
            .unwrap();

        // BGR: green stroke on the box corner, interior untouched.
        assert_eq!(pixel(&frame, 8, 8), Vec3b::from([0, 255, 0]));
        assert_eq!(pixel(&frame, 18, 18), Vec3b::from([0, 0, 0]));
    }

    #[test]
    fn test_eye_box_drawn_in_blue() {
        let mut frame = black_frame();
        let observation = FaceObservation {
            face: DetectionBox::new(4, 4, 40, 40),
            eyes: vec![DetectionBox::new(12, 12, 8, 8)],
        };

        FrameAnnotator::default()
            .annotate(&mut frame, &[observation])
            .unwrap();

        assert_eq!(pixel(&frame, 12, 12), Vec3b::from([255, 0, 0]));
    }

    #[test]
    fn test_no_observations_leaves_frame_untouched() {
        let mut frame = black_frame();
        FrameAnnotator::default().annotate(&mut frame, &[]).unwrap();
        let flat = frame.reshape(1, 0).unwrap().clone_pointee();
        assert_eq!(opencv::core::count_non_zero(&flat).unwrap(), 0);
    }
}
