use std::{fmt, str::FromStr, time::Instant};

use glam::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Popup;

/// The quality mode of [`Upscaler`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    /// Scale factor 2.0.
    Performance,
    /// Scale factor 1.7.
    Balanced,
    /// Scale factor 1.5.
    #[default]
    Quality,
    /// Scale factor 2.3.
    Ultra,
}

impl QualityMode {
    /// All quality modes.
    pub const ALL: [Self; 4] = [Self::Performance, Self::Balanced, Self::Quality, Self::Ultra];

    /// Get the factor the native resolution is divided by.
    pub fn scale_factor(&self) -> f32 {
        match self {
            Self::Performance => 2.0,
            Self::Balanced => 1.7,
            Self::Quality => 1.5,
            Self::Ultra => 2.3,
        }
    }

    /// Get the name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Balanced => "balanced",
            Self::Quality => "quality",
            Self::Ultra => "ultra",
        }
    }

    /// Get the expected performance gain in percent.
    pub fn expected_gain(&self) -> u32 {
        ((self.scale_factor() - 1.0) * 100.0).round() as u32
    }
}

impl fmt::Display for QualityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown quality mode \"{s}\""))
    }
}

/// The settings of [`Upscaler`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpscaleSettings {
    /// Whether to render below the native resolution.
    pub enabled: bool,
    /// The quality mode.
    pub quality_mode: QualityMode,
    /// Whether to accumulate samples across frames.
    pub temporal_accumulation: bool,
    #[serde(deserialize_with = "UpscaleSettings::deserialize_sharpening")]
    sharpening: f32,
}

impl UpscaleSettings {
    /// The default sharpening.
    pub const DEFAULT_SHARPENING: f32 = 0.3;

    /// Get the sharpening.
    pub fn sharpening(&self) -> f32 {
        self.sharpening
    }

    /// Set the sharpening, clamped to `0.0..=1.0`.
    pub fn set_sharpening(&mut self, sharpening: f32) {
        self.sharpening = sharpening.clamp(0.0, 1.0);
    }

    /// Set the sharpening, clamped to `0.0..=1.0`.
    pub fn with_sharpening(mut self, sharpening: f32) -> Self {
        self.set_sharpening(sharpening);
        self
    }

    fn deserialize_sharpening<'de, D>(deserializer: D) -> Result<f32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(f32::deserialize(deserializer)?.clamp(0.0, 1.0))
    }
}

impl Default for UpscaleSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            quality_mode: QualityMode::default(),
            temporal_accumulation: true,
            sharpening: Self::DEFAULT_SHARPENING,
        }
    }
}

/// A snapshot of [`Upscaler`] performance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpscaleMetrics {
    /// Whether upscaling is enabled.
    pub enabled: bool,
    /// The quality mode.
    pub quality_mode: QualityMode,
    /// The render to native resolution ratio.
    pub scale_factor: f32,
    /// The number of recorded frames.
    pub frame_count: u64,
    /// The exponential moving average of the frame rate, rounded.
    pub average_fps: u32,
    /// The resolution rendered at.
    pub render_resolution: UVec2,
    /// The resolution displayed at.
    pub native_resolution: UVec2,
}

impl UpscaleMetrics {
    /// Get the status suffix shown next to the frame rate.
    ///
    /// Returns [`None`] if disabled.
    pub fn status(&self) -> Option<String> {
        self.enabled.then(|| {
            format!(
                "DLSS: {} | {}x{}",
                self.quality_mode.as_str().to_uppercase(),
                self.render_resolution.x,
                self.render_resolution.y,
            )
        })
    }
}

/// The resolution scaling upscaler.
///
/// This only decides the resolution to render at, the host presents the result scaled up to the
/// native resolution.
#[derive(Debug, Clone)]
pub struct Upscaler {
    settings: UpscaleSettings,
    native_resolution: UVec2,
    frame_count: u64,
    last_frame: Option<Instant>,
    average_fps: f32,
}

impl Upscaler {
    /// The weight of the previous average in the moving average.
    const AVERAGE_DECAY: f32 = 0.9;

    /// Create a new upscaler.
    pub fn new(settings: UpscaleSettings, native_resolution: UVec2) -> Self {
        Self {
            settings,
            native_resolution,
            frame_count: 0,
            last_frame: None,
            average_fps: 0.0,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &UpscaleSettings {
        &self.settings
    }

    /// Get the native resolution.
    pub fn native_resolution(&self) -> UVec2 {
        self.native_resolution
    }

    /// Set the native resolution, e.g. when the window is resized.
    pub fn set_native_resolution(&mut self, native_resolution: UVec2) {
        self.native_resolution = native_resolution;
    }

    /// Enable or disable upscaling.
    ///
    /// Returns a popup describing the new state.
    pub fn set_enabled(&mut self, enabled: bool) -> Popup {
        self.settings.enabled = enabled;
        self.log_status();

        match enabled {
            true => Popup::info(
                "Upscaling Enabled",
                format!(
                    "DLSS {} enabled, expected performance gain {}%",
                    self.settings.quality_mode.as_str().to_uppercase(),
                    self.settings.quality_mode.expected_gain(),
                ),
            ),
            false => Popup::info("Upscaling Disabled", "Rendering at native resolution"),
        }
    }

    /// Set the quality mode.
    pub fn set_quality_mode(&mut self, quality_mode: QualityMode) {
        self.settings.quality_mode = quality_mode;
        self.log_status();
    }

    /// Get the scale factor of the current quality mode.
    pub fn scale_factor(&self) -> f32 {
        self.settings.quality_mode.scale_factor()
    }

    /// Get the resolution to render at.
    ///
    /// Each dimension is at least 1.
    pub fn render_resolution(&self) -> UVec2 {
        if !self.settings.enabled {
            return self.native_resolution;
        }

        (self.native_resolution.as_vec2() / self.scale_factor())
            .floor()
            .as_uvec2()
            .max(UVec2::ONE)
    }

    /// Record a rendered frame now.
    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    /// Record a rendered frame at a given time.
    pub fn record_frame_at(&mut self, now: Instant) {
        if let Some(last_frame) = self.last_frame {
            let delta = now.saturating_duration_since(last_frame).as_secs_f32();
            if delta > 0.0 {
                self.average_fps = self.average_fps * Self::AVERAGE_DECAY
                    + (1.0 / delta) * (1.0 - Self::AVERAGE_DECAY);
            }
        }

        self.last_frame = Some(now);
        self.frame_count += 1;
    }

    /// Get the metrics.
    pub fn metrics(&self) -> UpscaleMetrics {
        UpscaleMetrics {
            enabled: self.settings.enabled,
            quality_mode: self.settings.quality_mode,
            scale_factor: self.scale_factor(),
            frame_count: self.frame_count,
            average_fps: self.average_fps.round() as u32,
            render_resolution: self.render_resolution(),
            native_resolution: self.native_resolution,
        }
    }

    fn log_status(&self) {
        match self.settings.enabled {
            true => log::info!(
                "Upscaling enabled in {} mode ({:.1}x), rendering at {}",
                self.settings.quality_mode,
                self.scale_factor(),
                self.render_resolution(),
            ),
            false => log::info!(
                "Upscaling disabled, rendering at native {}",
                self.native_resolution
            ),
        }
    }
}
