//! Integration module for connecting object detection backends with the
//! tracker and line counter.
//!
//! This module provides traits and utilities for plugging any detector into
//! a per-stream counting pipeline.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{CountingPipeline, FrameReport, SessionSummary};
