use std::time::Duration;

use iced::widget::{button, column, container, row, text};
use iced::{window, Element, Length, Subscription, Task};

use facewatch_core::capture::domain::frame_source::{CaptureError, FrameSource};
use facewatch_core::capture::infrastructure::camera::Camera;
use facewatch_core::pipeline::capture_loop::{CaptureLoop, Tick};
use facewatch_core::shared::constants::{DEFAULT_CAMERA_INDEX, TICK_INTERVAL_MS};

use crate::preview;

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    Start,
    Stop,
    Tick,
    CloseRequested(window::Id),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    capture_loop: CaptureLoop,
    frame: Option<iced::widget::image::Handle>,
    status: String,
}

impl App {
    pub fn new(capture_loop: CaptureLoop) -> (Self, Task<Message>) {
        (
            Self {
                capture_loop,
                frame: None,
                status: String::from("Camera stopped."),
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Start => {
                let open = || -> Result<Box<dyn FrameSource>, CaptureError> {
                    Ok(Box::new(Camera::open(DEFAULT_CAMERA_INDEX)?))
                };
                match self.capture_loop.start(open) {
                    Ok(()) => self.status = String::from("Capturing."),
                    Err(e) => {
                        log::error!("camera open failed: {e}");
                        self.status = format!("Could not start: {e}");
                    }
                }
            }
            Message::Stop => self.halt("Camera stopped."),
            Message::Tick => match self.capture_loop.tick() {
                Ok(Tick::Frame(output)) => match preview::to_handle(&output.frame) {
                    Ok(handle) => self.frame = Some(handle),
                    Err(e) => {
                        log::error!("frame conversion failed: {e}");
                        self.halt("Capture stopped: frame conversion failed.");
                    }
                },
                Ok(Tick::Stopped) => {
                    // The loop already released the camera on a failed read.
                    self.halt("Camera unavailable, capture stopped.");
                }
                Err(e) => {
                    log::error!("tick failed: {e}");
                    self.halt("Capture stopped: detection failed.");
                }
            },
            Message::CloseRequested(id) => {
                let confirmed = rfd::MessageDialog::new()
                    .set_title("Facewatch")
                    .set_description("Quit and release the camera?")
                    .set_buttons(rfd::MessageButtons::OkCancel)
                    .show();
                if matches!(confirmed, rfd::MessageDialogResult::Ok) {
                    // Same release path as the Stop button; stop is
                    // idempotent so a stopped loop is fine here.
                    self.capture_loop.stop();
                    return window::close(id);
                }
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let running = self.capture_loop.is_running();
        let controls = row![
            button("Start").on_press_maybe((!running).then_some(Message::Start)),
            button("Stop").on_press_maybe(running.then_some(Message::Stop)),
        ]
        .spacing(8);

        let feed: Element<'_, Message> = match &self.frame {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("No camera feed"))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        column![controls, feed, text(&self.status).size(13)]
            .spacing(12)
            .padding(16)
            .height(Length::Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        // The frame pump only exists while the loop runs; dropping the
        // timer is what cancels pending ticks.
        let close = window::close_requests().map(Message::CloseRequested);
        if self.capture_loop.is_running() {
            Subscription::batch([
                iced::time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(|_| Message::Tick),
                close,
            ])
        } else {
            close
        }
    }

    fn halt(&mut self, status: &str) {
        self.capture_loop.stop();
        self.frame = None;
        self.status = String::from(status);
    }
}
