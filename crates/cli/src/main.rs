use std::path::PathBuf;
use std::process;

use clap::Parser;
use opencv::highgui;

use facewatch_core::annotate::frame_annotator::FrameAnnotator;
use facewatch_core::capture::domain::frame_source::{CaptureError, FrameSource};
use facewatch_core::capture::infrastructure::camera::Camera;
use facewatch_core::detection::domain::face_scanner::FaceScanner;
use facewatch_core::detection::domain::object_detector::ObjectDetector;
use facewatch_core::detection::infrastructure::cascade_detector::CascadeDetector;
use facewatch_core::filters::canny_edge_filter::CannyEdgeFilter;
use facewatch_core::pipeline::capture_loop::{CaptureLoop, Tick};
use facewatch_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR, EYE_MODEL_NAME,
    EYE_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL,
};
use facewatch_core::shared::model_provisioner;

const MAIN_WINDOW: &str = "Webcam - Original";
const EDGE_WINDOW: &str = "Webcam - Edges";
const QUIT_KEY: char = 'q';

/// Webcam face detection in a console window.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    device: i32,

    /// Also detect eyes inside each face (replaces the edge-map window).
    #[arg(long)]
    eyes: bool,

    /// Pyramid step of the cascade search.
    #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
    scale_factor: f64,

    /// Neighbor votes a detection needs to survive.
    #[arg(long, default_value_t = DEFAULT_MIN_NEIGHBORS)]
    min_neighbors: i32,

    /// Directory holding the cascade files (defaults to the user cache).
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let scanner = build_scanner(&cli)?;
    let mut capture_loop = CaptureLoop::new(scanner, FrameAnnotator::default());
    if !cli.eyes {
        capture_loop = capture_loop.with_edge_filter(CannyEdgeFilter::default());
    }

    let device = cli.device;
    capture_loop.start(move || -> Result<Box<dyn FrameSource>, CaptureError> {
        Ok(Box::new(Camera::open(device)?))
    })?;
    println!("Starting video capture... Press '{QUIT_KEY}' to quit.");

    loop {
        match capture_loop.tick()? {
            Tick::Stopped => break,
            Tick::Frame(output) => {
                highgui::imshow(MAIN_WINDOW, &output.frame)?;
                if let Some(edges) = &output.edges {
                    highgui::imshow(EDGE_WINDOW, edges)?;
                }
            }
        }
        if highgui::wait_key(1)? == QUIT_KEY as i32 {
            break;
        }
    }

    capture_loop.stop();
    highgui::destroy_all_windows()?;
    Ok(())
}

fn build_scanner(cli: &Cli) -> Result<FaceScanner, Box<dyn std::error::Error>> {
    let models_dir = match &cli.models_dir {
        Some(dir) => dir.clone(),
        None => model_provisioner::default_models_dir()?,
    };

    log::info!("resolving model: {FACE_MODEL_NAME}");
    let face_path = model_provisioner::ensure(
        FACE_MODEL_NAME,
        FACE_MODEL_URL,
        &models_dir,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();
    let faces: Box<dyn ObjectDetector> = Box::new(CascadeDetector::new(
        &face_path,
        cli.scale_factor,
        cli.min_neighbors,
    )?);

    if !cli.eyes {
        return Ok(FaceScanner::new(faces));
    }

    log::info!("resolving model: {EYE_MODEL_NAME}");
    let eye_path = model_provisioner::ensure(
        EYE_MODEL_NAME,
        EYE_MODEL_URL,
        &models_dir,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();
    let eyes: Box<dyn ObjectDetector> = Box::new(CascadeDetector::new(
        &eye_path,
        cli.scale_factor,
        cli.min_neighbors,
    )?);
    Ok(FaceScanner::with_eyes(faces, eyes))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.scale_factor <= 1.0 {
        return Err(format!(
            "Scale factor must be greater than 1.0, got {}",
            cli.scale_factor
        )
        .into());
    }
    if cli.min_neighbors < 0 {
        return Err(format!(
            "Min neighbors must be non-negative, got {}",
            cli.min_neighbors
        )
        .into());
    }
    if cli.device < 0 {
        return Err(format!("Device index must be non-negative, got {}", cli.device).into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading cascade model... {pct}%");
    } else {
        eprint!("\rDownloading cascade model... {downloaded} bytes");
    }
}
