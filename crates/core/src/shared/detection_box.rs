use opencv::core::Rect;

/// An axis-aligned integer rectangle in image coordinates.
///
/// Boxes are produced fresh on every frame; there is no identity or
/// tracking across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectionBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DetectionBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Both dimensions are positive.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Translate by `(dx, dy)`, e.g. from face-local into full-frame
    /// coordinates.
    pub fn offset_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// True if `self` sits entirely inside `other`.
    pub fn fits_within(&self, other: &DetectionBox) -> bool {
        self.x >= other.x
            && self.y >= other.y
            && self.x + self.width <= other.x + other.width
            && self.y + self.height <= other.y + other.height
    }

    /// True if the box lies entirely inside an image of the given size.
    pub fn lies_inside(&self, image_width: i32, image_height: i32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= image_width
            && self.y + self.height <= image_height
    }
}

impl From<Rect> for DetectionBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl From<DetectionBox> for Rect {
    fn from(boxed: DetectionBox) -> Self {
        Rect::new(boxed.x, boxed.y, boxed.width, boxed.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_offset_into_full_frame_coordinates() {
        // Face at (10,10), eye at face-local (5,5) -> full-frame (15,15).
        let eye = DetectionBox::new(5, 5, 10, 10);
        assert_eq!(eye.offset_by(10, 10), DetectionBox::new(15, 15, 10, 10));
    }

    #[test]
    fn test_offset_preserves_size() {
        let boxed = DetectionBox::new(0, 0, 40, 30);
        let moved = boxed.offset_by(-3, 7);
        assert_eq!(moved.width, 40);
        assert_eq!(moved.height, 30);
    }

    #[rstest]
    #[case::positive(DetectionBox::new(0, 0, 10, 10), true)]
    #[case::zero_width(DetectionBox::new(0, 0, 0, 10), false)]
    #[case::zero_height(DetectionBox::new(0, 0, 10, 0), false)]
    #[case::negative_width(DetectionBox::new(0, 0, -5, 10), false)]
    fn test_is_valid(#[case] boxed: DetectionBox, #[case] expected: bool) {
        assert_eq!(boxed.is_valid(), expected);
    }

    #[test]
    fn test_fits_within_contained() {
        let face = DetectionBox::new(10, 10, 50, 50);
        let eye = DetectionBox::new(15, 15, 10, 10);
        assert!(eye.fits_within(&face));
    }

    #[test]
    fn test_fits_within_touching_edges() {
        let face = DetectionBox::new(10, 10, 50, 50);
        let eye = DetectionBox::new(10, 10, 50, 50);
        assert!(eye.fits_within(&face));
    }

    #[rstest]
    #[case::past_right(DetectionBox::new(55, 15, 10, 10))]
    #[case::past_bottom(DetectionBox::new(15, 55, 10, 10))]
    #[case::left_of(DetectionBox::new(5, 15, 10, 10))]
    #[case::above(DetectionBox::new(15, 5, 10, 10))]
    fn test_fits_within_escaping_boxes(#[case] eye: DetectionBox) {
        let face = DetectionBox::new(10, 10, 50, 50);
        assert!(!eye.fits_within(&face));
    }

    #[test]
    fn test_lies_inside_image_bounds() {
        let boxed = DetectionBox::new(0, 0, 640, 480);
        assert!(boxed.lies_inside(640, 480));
        assert!(!boxed.lies_inside(640, 479));
        assert!(!boxed.offset_by(1, 0).lies_inside(640, 480));
        assert!(!boxed.offset_by(-1, 0).lies_inside(640, 480));
    }

    #[test]
    fn test_rect_conversion() {
        let boxed = DetectionBox::new(3, 4, 20, 10);
        let rect = Rect::from(boxed);
        assert_eq!(rect, Rect::new(3, 4, 20, 10));
        assert_eq!(DetectionBox::from(rect), boxed);
    }
}
