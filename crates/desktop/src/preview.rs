use iced::widget::image;
use opencv::core::{AlgorithmHint, Mat};
use opencv::imgproc;
use opencv::prelude::*;

/// Convert an annotated BGR frame into an RGBA handle for the image
/// widget. The only place pixel data leaves OpenCV.
pub fn to_handle(frame: &Mat) -> opencv::Result<image::Handle> {
    let mut rgba = Mat::default();
    imgproc::cvt_color(
        frame,
        &mut rgba,
        imgproc::COLOR_BGR2RGBA,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;

    let width = rgba.cols() as u32;
    let height = rgba.rows() as u32;
    let pixels = rgba.data_bytes()?.to_vec();
    Ok(image::Handle::from_rgba(width, height, pixels))
}
