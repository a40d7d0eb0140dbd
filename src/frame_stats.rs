use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// The rating of a frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsRating {
    /// At least 60 FPS.
    Good,
    /// At least 30 FPS.
    Fair,
    /// Below 30 FPS.
    Poor,
}

impl FpsRating {
    /// Rate a frame rate.
    pub fn new(fps: u32) -> Self {
        match fps {
            60.. => Self::Good,
            30.. => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// The frame rate counter.
///
/// Frame timestamps are kept over a sliding window, the frame rate is the number of frame
/// intervals over the time they span.
#[derive(Debug, Clone)]
pub struct FrameStats {
    frames: VecDeque<Instant>,
    window: Duration,
    frame_count: u64,
    visible: bool,
}

impl FrameStats {
    /// The default sliding window.
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

    /// The minimum span for the frame rate to be displayed.
    pub const MIN_SPAN: Duration = Duration::from_millis(100);

    /// The maximum displayed frame rate.
    pub const MAX_DISPLAY_FPS: u32 = 999;

    /// Create a new visible counter.
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Create a new visible counter with a sliding window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            frames: VecDeque::new(),
            window,
            frame_count: 0,
            visible: true,
        }
    }

    /// Record a frame now.
    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    /// Record a frame at a given time.
    pub fn record_frame_at(&mut self, now: Instant) {
        self.frames.push_back(now);
        self.frame_count += 1;

        while self
            .frames
            .front()
            .is_some_and(|frame| now.saturating_duration_since(*frame) > self.window)
        {
            self.frames.pop_front();
        }
    }

    /// Get the total number of recorded frames.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the time spanned by the frames in the window.
    pub fn span(&self) -> Duration {
        match (self.frames.front(), self.frames.back()) {
            (Some(first), Some(last)) => last.saturating_duration_since(*first),
            _ => Duration::ZERO,
        }
    }

    /// Get the frame rate.
    ///
    /// Returns [`None`] if there are less than two frames in the window.
    pub fn fps(&self) -> Option<f32> {
        let span = self.span();
        if self.frames.len() < 2 || span.is_zero() {
            return None;
        }

        Some((self.frames.len() - 1) as f32 / span.as_secs_f32())
    }

    /// Get the displayed frame rate.
    ///
    /// Returns [`None`] if the window spans too little time for a stable reading.
    pub fn display_fps(&self) -> Option<u32> {
        if self.span() < Self::MIN_SPAN {
            return None;
        }

        self.fps()
            .map(|fps| (fps.round().max(0.0) as u32).min(Self::MAX_DISPLAY_FPS))
    }

    /// Get the rating of the displayed frame rate.
    pub fn rating(&self) -> Option<FpsRating> {
        self.display_fps().map(FpsRating::new)
    }

    /// Get the label.
    pub fn label(&self) -> String {
        match self.display_fps() {
            Some(fps) => format!("FPS: {fps}"),
            None => "FPS: --".to_owned(),
        }
    }

    /// Get the label followed by the upscaler status.
    #[cfg(feature = "upscale")]
    pub fn label_with_upscaler(&self, metrics: &crate::UpscaleMetrics) -> String {
        match (self.display_fps(), metrics.status()) {
            (Some(fps), Some(status)) => format!("FPS: {fps} | {status}"),
            _ => self.label(),
        }
    }

    /// Check if the counter is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Toggle the visibility.
    ///
    /// Returns the new visibility.
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        log::debug!("Frame stats visible: {}", self.visible);
        self.visible
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
