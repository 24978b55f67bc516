//! CountingPipeline for combining detection, tracking and line counting.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::counter::{CounterStats, CrossingEvent, LineCounter};
use crate::tracker::{CentroidTracker, Detection, TrackedObjects, TrackerConfig};

use super::DetectionSource;

/// Everything produced for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Zero-based index of the frame within the session
    pub frame_index: u64,
    pub tracked: TrackedObjects,
    pub events: Vec<CrossingEvent>,
}

/// Final numbers for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub stats: CounterStats,
    /// Wall-clock time since the pipeline was created
    pub elapsed: Duration,
}

/// Single owner of a detector, a tracker and a line counter for one video
/// stream.
///
/// Every frame goes through `&mut self`, so frames are tracked and counted
/// strictly in the order they are submitted.
pub struct CountingPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker,
    counter: LineCounter,
    frames_processed: u64,
    started: Instant,
}

impl<D: DetectionSource> CountingPipeline<D> {
    /// Create a new pipeline counting crossings of `detection_line_y`.
    pub fn new(detector: D, config: TrackerConfig, detection_line_y: f32) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::new(config),
            counter: LineCounter::new(detection_line_y),
            frames_processed: 0,
            started: Instant::now(),
        }
    }

    /// Create a pipeline with the default tracker configuration and the
    /// line across the middle of the frame.
    pub fn for_frame_height(detector: D, frame_height: u32) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::default(),
            counter: LineCounter::from_frame_height(frame_height),
            frames_processed: 0,
            started: Instant::now(),
        }
    }

    /// Run detection on one frame, then track and count the result.
    ///
    /// Only detector failures are returned as errors; the frame is not
    /// counted in that case.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.process_detections(detections))
    }

    /// Track and count detections that were produced elsewhere.
    ///
    /// Detections that break the input contract are dropped with a warning.
    pub fn process_detections(&mut self, detections: Vec<Detection>) -> FrameReport {
        let frame_index = self.frames_processed;

        let detections: Vec<Detection> = detections
            .into_iter()
            .filter(|det| match det.validate() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("frame {}: dropping detection: {}", frame_index, e);
                    false
                }
            })
            .collect();

        let tracked = self.tracker.update(&detections);
        let events = self.counter.update(&tracked);
        self.counter.prune(self.tracker.active_ids());

        for event in &events {
            log::info!(
                "frame {}: {} track {}",
                frame_index,
                event.event_type,
                event.track_id
            );
        }

        self.frames_processed += 1;

        FrameReport {
            frame_index,
            tracked,
            events,
        }
    }

    pub fn stats(&self) -> CounterStats {
        self.counter.stats()
    }

    /// Clear counts and crossing state. Track identities are kept.
    pub fn reset_counter(&mut self) {
        self.counter.reset();
        log::info!("counters reset");
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Time since the pipeline was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// End the session and report the final numbers.
    pub fn finish(self) -> SessionSummary {
        let summary = SessionSummary {
            frames_processed: self.frames_processed,
            stats: self.counter.stats(),
            elapsed: self.elapsed(),
        };
        log::info!(
            "session complete: {} frames in {:.2?}, {}",
            summary.frames_processed,
            summary.elapsed,
            summary.stats
        );
        summary
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Get a reference to the underlying counter.
    pub fn counter(&self) -> &LineCounter {
        &self.counter
    }
}
