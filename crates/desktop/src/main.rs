mod app;
mod preview;

use std::process;

use app::App;

use facewatch_core::annotate::frame_annotator::FrameAnnotator;
use facewatch_core::detection::domain::face_scanner::FaceScanner;
use facewatch_core::detection::infrastructure::cascade_detector::CascadeDetector;
use facewatch_core::pipeline::capture_loop::CaptureLoop;
use facewatch_core::shared::constants::{
    DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR, FACE_MODEL_NAME, FACE_MODEL_URL,
};
use facewatch_core::shared::model_provisioner;

fn main() -> iced::Result {
    env_logger::init();

    // Model download and classifier load happen before the window opens;
    // either failure is fatal.
    let capture_loop = match build_loop() {
        Ok(capture_loop) => capture_loop,
        Err(e) => {
            log::error!("startup failed: {e}");
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Facewatch")
                .set_description(format!("Startup failed: {e}"))
                .show();
            process::exit(1);
        }
    };

    iced::application(move || App::new(capture_loop), App::update, App::view)
        .title("Facewatch")
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(720.0, 600.0),
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()
}

fn build_loop() -> Result<CaptureLoop, Box<dyn std::error::Error>> {
    let models_dir = model_provisioner::default_models_dir()?;
    log::info!("resolving model: {FACE_MODEL_NAME}");
    let face_path = model_provisioner::ensure(FACE_MODEL_NAME, FACE_MODEL_URL, &models_dir, None)?;

    let detector = CascadeDetector::new(&face_path, DEFAULT_SCALE_FACTOR, DEFAULT_MIN_NEIGHBORS)?;
    let scanner = FaceScanner::new(Box::new(detector));
    Ok(CaptureLoop::new(scanner, FrameAnnotator::default()))
}
