use opencv::core::{AlgorithmHint, Mat};
use opencv::imgproc;

use crate::annotate::frame_annotator::FrameAnnotator;
use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::detection::domain::face_scanner::{FaceObservation, FaceScanner};
use crate::filters::canny_edge_filter::CannyEdgeFilter;

/// Lifecycle of the frame pump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopping,
}

/// What one tick produced.
pub enum Tick {
    /// An annotated frame ready for presentation.
    Frame(TickOutput),
    /// The loop is not running; nothing was produced.
    Stopped,
}

pub struct TickOutput {
    pub frame: Mat,
    pub edges: Option<Mat>,
    pub observations: Vec<FaceObservation>,
}

/// The per-frame use case plus its run/stop lifecycle.
///
/// Camera handle and state flag live here as fields so both front ends
/// share one controller instead of process globals. `stop` is idempotent:
/// the capture session is released exactly once no matter how many paths
/// reach it (stop button, window close, read failure).
pub struct CaptureLoop {
    scanner: FaceScanner,
    annotator: FrameAnnotator,
    edge_filter: Option<CannyEdgeFilter>,
    source: Option<Box<dyn FrameSource>>,
    state: LoopState,
}

impl CaptureLoop {
    pub fn new(scanner: FaceScanner, annotator: FrameAnnotator) -> Self {
        Self {
            scanner,
            annotator,
            edge_filter: None,
            source: None,
            state: LoopState::Idle,
        }
    }

    /// Adds an edge-map output to every tick.
    pub fn with_edge_filter(mut self, filter: CannyEdgeFilter) -> Self {
        self.edge_filter = Some(filter);
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Open a capture session and enter `Running`. A no-op when already
    /// running. On open failure the loop stays `Idle` and the error is
    /// returned.
    pub fn start<F>(&mut self, open: F) -> Result<(), CaptureError>
    where
        F: FnOnce() -> Result<Box<dyn FrameSource>, CaptureError>,
    {
        if self.state == LoopState::Running {
            return Ok(());
        }
        self.source = Some(open()?);
        self.state = LoopState::Running;
        log::info!("capture loop running");
        Ok(())
    }

    /// One read-detect-annotate cycle.
    ///
    /// A failed read means the device is gone: it is reported once, the
    /// session is released, and the loop moves to `Stopping` (no retry).
    /// Outside `Running` this reports `Stopped` without side effects.
    pub fn tick(&mut self) -> Result<Tick, Box<dyn std::error::Error>> {
        if self.state != LoopState::Running {
            return Ok(Tick::Stopped);
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(Tick::Stopped);
        };

        let mut frame = match source.grab() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("frame read failed, stopping capture: {e}");
                self.source = None;
                self.state = LoopState::Stopping;
                return Ok(Tick::Stopped);
            }
        };

        let mut gray = Mat::default();
        imgproc::cvt_color(
            &frame,
            &mut gray,
            imgproc::COLOR_BGR2GRAY,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;

        let observations = self.scanner.scan(&gray)?;
        let edges = match &self.edge_filter {
            Some(filter) => Some(filter.apply(&gray)?),
            None => None,
        };
        self.annotator.annotate(&mut frame, &observations)?;

        Ok(Tick::Frame(TickOutput {
            frame,
            edges,
            observations,
        }))
    }

    /// Release the capture session and return to `Idle`. Safe to call any
    /// number of times, from any state.
    pub fn stop(&mut self) {
        if self.source.take().is_some() {
            log::info!("capture session released");
        }
        self.state = LoopState::Idle;
    }
}
