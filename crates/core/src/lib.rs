//! Webcam face/eye detection building blocks.
//!
//! The detection work itself is OpenCV's: Haar cascades, grayscale
//! conversion, Canny, capture. This crate wires those pieces into a
//! provision-load-capture-detect-annotate pipeline with an explicit
//! run/stop lifecycle, shared by the console and desktop front ends.

pub mod annotate;
pub mod capture;
pub mod detection;
pub mod filters;
pub mod pipeline;
pub mod shared;
