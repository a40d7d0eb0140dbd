/// The configuration of the hotspot subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotConfig {
    /// The pointer distance in pixels within which a hotspot is hit.
    pub hit_radius: f32,
    /// The padding in pixels around the viewport within which labels are still shown.
    pub bounds_margin: f32,
    /// The marker sphere radius per unit of [`Hotspot::size`](crate::Hotspot::size).
    pub marker_radius_scale: f32,
    /// The collider radius per unit of [`Hotspot::size`](crate::Hotspot::size).
    pub collider_radius_scale: f32,
    /// The version written to exported hotspot files.
    pub export_version: u32,
}

impl HotspotConfig {
    /// The default hit radius.
    pub const DEFAULT_HIT_RADIUS: f32 = 10.0;

    /// The default bounds margin.
    pub const DEFAULT_BOUNDS_MARGIN: f32 = 50.0;

    /// The default marker radius scale.
    pub const DEFAULT_MARKER_RADIUS_SCALE: f32 = 0.1;

    /// The default collider radius scale.
    pub const DEFAULT_COLLIDER_RADIUS_SCALE: f32 = 0.2;

    /// The default export version.
    pub const DEFAULT_EXPORT_VERSION: u32 = 1;

    /// Create a new configuration with default values.
    pub const fn new() -> Self {
        Self {
            hit_radius: Self::DEFAULT_HIT_RADIUS,
            bounds_margin: Self::DEFAULT_BOUNDS_MARGIN,
            marker_radius_scale: Self::DEFAULT_MARKER_RADIUS_SCALE,
            collider_radius_scale: Self::DEFAULT_COLLIDER_RADIUS_SCALE,
            export_version: Self::DEFAULT_EXPORT_VERSION,
        }
    }

    /// Set the hit radius.
    pub fn with_hit_radius(mut self, hit_radius: f32) -> Self {
        self.hit_radius = hit_radius;
        self
    }

    /// Set the bounds margin.
    pub fn with_bounds_margin(mut self, bounds_margin: f32) -> Self {
        self.bounds_margin = bounds_margin;
        self
    }
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self::new()
    }
}
