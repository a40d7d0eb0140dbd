use glam::*;

use crate::CameraTrait;

/// A world position projected onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// The position in viewport pixels, origin at the top left.
    pub pos: Vec2,
    /// The depth along the camera forward, positive in front of the camera.
    pub depth: f32,
    /// Whether the point is in front of the camera.
    pub is_visible: bool,
}

impl ScreenPoint {
    /// A point that is not visible.
    pub const HIDDEN: Self = Self {
        pos: Vec2::ZERO,
        depth: 0.0,
        is_visible: false,
    };

    /// Get the pixel distance to a position.
    pub fn distance_to(&self, pos: Vec2) -> f32 {
        self.pos.distance(pos)
    }

    /// Check if the point lies within the viewport expanded by a margin on every side.
    pub fn is_within(&self, viewport_size: Vec2, margin: f32) -> bool {
        let min = Vec2::splat(-margin);
        let max = viewport_size + Vec2::splat(margin);
        self.pos.cmpge(min).all() && self.pos.cmple(max).all()
    }
}

/// Something anchored in the world that can be hit on screen.
pub trait ScreenAnchor {
    /// Get the world position of the anchor.
    fn world_pos(&self) -> Vec3;

    /// Check if the anchor is allowed to be hit at all.
    fn is_hittable(&self) -> bool {
        true
    }
}

/// The projector from world to viewport coordinates.
#[derive(Debug, Clone, Copy)]
pub struct ScreenProjector<'a, C: CameraTrait + ?Sized> {
    camera: &'a C,
    viewport_size: Vec2,
    view_proj: Mat4,
}

impl<'a, C: CameraTrait + ?Sized> ScreenProjector<'a, C> {
    /// Create a new projector.
    pub fn new(camera: &'a C, viewport_size: Vec2) -> Self {
        let aspect_ratio = viewport_size.x / viewport_size.y.max(f32::EPSILON);
        let view_proj = camera.projection(aspect_ratio) * camera.view();

        Self {
            camera,
            viewport_size,
            view_proj,
        }
    }

    /// Get the viewport size.
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Project a world position.
    ///
    /// The point is visible iff it is in front of the camera and its projected depth is
    /// positive.
    pub fn project(&self, world_pos: Vec3) -> ScreenPoint {
        let clip = self.view_proj * world_pos.extend(1.0);
        let depth = clip.w;

        if depth.abs() <= f32::EPSILON {
            return ScreenPoint::HIDDEN;
        }

        let ndc = clip.truncate() / depth;
        let pos = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport_size.x,
            (1.0 - ndc.y) * 0.5 * self.viewport_size.y,
        );

        let is_in_front = (world_pos - self.camera.pos()).dot(self.camera.forward()) > 0.0;

        ScreenPoint {
            pos,
            depth,
            is_visible: is_in_front && depth > 0.0,
        }
    }

    /// Project the translation of a world transform.
    pub fn project_transform(&self, world_transform: &Mat4) -> ScreenPoint {
        self.project(world_transform.w_axis.truncate())
    }

    /// Find the anchor nearest to the pointer within `radius` pixels.
    ///
    /// Anchors which are not hittable or not visible are skipped. On equal distance the
    /// earliest anchor wins.
    pub fn hit_test<'b, T: ScreenAnchor>(
        &self,
        pointer: Vec2,
        anchors: impl IntoIterator<Item = &'b T>,
        radius: f32,
    ) -> Option<(&'b T, f32)> {
        let mut nearest: Option<(&'b T, f32)> = None;

        for anchor in anchors {
            if !anchor.is_hittable() {
                continue;
            }

            let point = self.project(anchor.world_pos());
            if !point.is_visible {
                continue;
            }

            let distance = point.distance_to(pointer);
            log::trace!("Anchor at {:?} is {distance:.1}px from pointer", point.pos);

            if distance <= radius && nearest.is_none_or(|(_, min)| distance < min) {
                nearest = Some((anchor, distance));
            }
        }

        nearest
    }

    /// Check if any anchor is within `radius` pixels of the pointer.
    pub fn is_near_any<'b, T: ScreenAnchor + 'b>(
        &self,
        pointer: Vec2,
        anchors: impl IntoIterator<Item = &'b T>,
        radius: f32,
    ) -> bool {
        self.hit_test(pointer, anchors, radius).is_some()
    }
}

impl ScreenAnchor for Vec3 {
    fn world_pos(&self) -> Vec3 {
        *self
    }
}
