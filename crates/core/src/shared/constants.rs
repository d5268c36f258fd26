pub const FACE_MODEL_NAME: &str = "haarcascade_frontalface_default.xml";
pub const FACE_MODEL_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/master/data/haarcascades/haarcascade_frontalface_default.xml";

pub const EYE_MODEL_NAME: &str = "haarcascade_eye.xml";
pub const EYE_MODEL_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/master/data/haarcascades/haarcascade_eye.xml";

/// Pyramid step of the multi-scale search; passed through unchanged.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;

/// Neighbor votes a candidate window needs to survive; passed through unchanged.
pub const DEFAULT_MIN_NEIGHBORS: i32 = 4;

pub const CANNY_LOW_THRESHOLD: f64 = 100.0;
pub const CANNY_HIGH_THRESHOLD: f64 = 200.0;

pub const BOX_THICKNESS: i32 = 2;

pub const DEFAULT_CAMERA_INDEX: i32 = 0;

/// Frame pump period for the desktop timer subscription.
pub const TICK_INTERVAL_MS: u64 = 10;
