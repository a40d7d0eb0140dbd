use glam::*;

use crate::{
    AssetId, Event, EventSink, Hotspot, HotspotConfig, HotspotId, HotspotStore, PointerButton,
    PointerEvent, SceneQuery, ScreenAnchor, ScreenProjector,
};

bitflags::bitflags! {
    /// The conditions for a hotspot marker to be shown.
    ///
    /// A marker is shown only if all flags are set.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
    pub struct MarkerVisibility: u32 {
        /// The owning asset is selected and visible.
        const ASSET = 1 << 0;
        /// The hotspot itself is visible.
        const HOTSPOT = 1 << 1;
        /// The marker is in front of the camera.
        const IN_FRONT = 1 << 2;
        /// The marker is within the expanded viewport bounds.
        const IN_BOUNDS = 1 << 3;

        /// The flags controlling whether the marker is enabled in the scene.
        const ENABLED = Self::ASSET.bits() | Self::HOTSPOT.bits();
    }
}

/// The screen space label of a hotspot marker.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotLabel {
    /// The text, which is the hotspot name.
    pub text: String,
    /// The center of the label in viewport pixels.
    pub pos: Vec2,
    /// Whether the label is shown.
    pub shown: bool,
}

/// The visual of a hotspot of the selected asset.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotMarker {
    /// The hotspot.
    pub hotspot: Hotspot,
    /// The world transform of the marker geometry.
    pub world_transform: Mat4,
    /// The radius of the marker sphere.
    pub radius: f32,
    /// The radius of the marker collider.
    pub collider_radius: f32,
    /// The label.
    pub label: HotspotLabel,
    /// The visibility flags.
    pub visibility: MarkerVisibility,
}

impl HotspotMarker {
    /// Create a new hidden marker.
    pub fn new(hotspot: Hotspot, parent_transform: Mat4, config: &HotspotConfig) -> Self {
        let mut visibility = MarkerVisibility::empty();
        visibility.set(MarkerVisibility::HOTSPOT, hotspot.visible);

        Self {
            world_transform: parent_transform * Mat4::from_translation(hotspot.position),
            radius: hotspot.size * config.marker_radius_scale,
            collider_radius: hotspot.size * config.collider_radius_scale,
            label: HotspotLabel {
                text: hotspot.name.clone(),
                pos: Vec2::ZERO,
                shown: false,
            },
            visibility,
            hotspot,
        }
    }

    /// Replace the hotspot, keeping the label position.
    pub fn set_hotspot(&mut self, hotspot: Hotspot, parent_transform: Mat4, config: &HotspotConfig) {
        self.world_transform = parent_transform * Mat4::from_translation(hotspot.position);
        self.radius = hotspot.size * config.marker_radius_scale;
        self.collider_radius = hotspot.size * config.collider_radius_scale;
        self.label.text.clone_from(&hotspot.name);
        self.visibility
            .set(MarkerVisibility::HOTSPOT, hotspot.visible);
        self.hotspot = hotspot;
    }

    /// Check if the marker is enabled in the scene.
    pub fn is_enabled(&self) -> bool {
        self.visibility.contains(MarkerVisibility::ENABLED)
    }

    /// Check if the marker is shown on screen.
    pub fn is_shown(&self) -> bool {
        self.visibility.is_all()
    }

    /// Get the POD representation.
    pub fn to_pod(&self) -> HotspotMarkerPod {
        HotspotMarkerPod {
            pos: self.world_pos(),
            radius: self.radius,
            visibility: self.visibility,
            _padding: [0; 3],
        }
    }
}

impl ScreenAnchor for HotspotMarker {
    fn world_pos(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }

    fn is_hittable(&self) -> bool {
        self.is_enabled()
    }
}

/// The POD representation of a hotspot marker instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HotspotMarkerPod {
    /// The world position.
    pub pos: Vec3,
    /// The marker radius.
    pub radius: f32,
    /// The visibility flags.
    pub visibility: MarkerVisibility,
    pub _padding: [u32; 3],
}

/// The synchronizer of hotspot markers.
///
/// It keeps one marker per hotspot of the selected asset. The markers are rebuilt when the
/// selection or the collection changes and updated in place on every frame.
#[derive(Debug)]
pub struct HotspotVisualSync {
    /// The configuration.
    config: HotspotConfig,
    /// The asset the markers belong to.
    current_asset: Option<AssetId>,
    /// The markers in collection order.
    markers: Vec<HotspotMarker>,
}

impl HotspotVisualSync {
    /// Create a new visual sync.
    pub fn new(config: HotspotConfig) -> Self {
        Self {
            config,
            current_asset: None,
            markers: Vec::new(),
        }
    }

    /// Get the markers.
    pub fn markers(&self) -> &[HotspotMarker] {
        &self.markers
    }

    /// Get the marker of a hotspot.
    pub fn marker(&self, id: &HotspotId) -> Option<&HotspotMarker> {
        self.markers.iter().find(|m| &m.hotspot.id == id)
    }

    /// Get the asset the markers belong to.
    pub fn current_asset(&self) -> Option<AssetId> {
        self.current_asset
    }

    /// Get the POD instances of the enabled markers.
    pub fn marker_pods(&self) -> Vec<HotspotMarkerPod> {
        self.markers
            .iter()
            .filter(|m| m.is_enabled())
            .map(HotspotMarker::to_pod)
            .collect()
    }

    /// Rebuild all markers from the collection of the selected asset.
    pub fn rebuild(&mut self, scene: &impl SceneQuery, store: &HotspotStore) {
        self.current_asset = scene.selection();

        let parent_transform = self.parent_transform(scene);
        self.markers = store
            .list(scene)
            .iter()
            .map(|hotspot| HotspotMarker::new(hotspot.clone(), parent_transform, &self.config))
            .collect();

        log::debug!(
            "Rebuilt {} hotspot markers for asset {:?}",
            self.markers.len(),
            self.current_asset
        );

        self.sync(scene);
    }

    /// Handle a selection change, rebuilding only if the selected asset differs.
    pub fn on_selection_changed(&mut self, scene: &impl SceneQuery, store: &HotspotStore) {
        if scene.selection() != self.current_asset {
            self.rebuild(scene, store);
        } else {
            self.sync(scene);
        }
    }

    /// Handle a visibility change of an asset.
    pub fn on_asset_visibility_changed(&mut self, scene: &impl SceneQuery, asset: AssetId) {
        if self.current_asset == Some(asset) {
            self.sync(scene);
        }
    }

    /// Update the marker of a hotspot in place.
    pub fn update_marker(&mut self, scene: &impl SceneQuery, hotspot: &Hotspot) {
        let parent_transform = self.parent_transform(scene);
        let Some(marker) = self.markers.iter_mut().find(|m| m.hotspot.id == hotspot.id) else {
            return;
        };

        marker.set_hotspot(hotspot.clone(), parent_transform, &self.config);
        self.sync(scene);
    }

    /// Remove the marker of a hotspot.
    pub fn remove_marker(&mut self, id: &HotspotId) {
        self.markers.retain(|m| &m.hotspot.id != id);
    }

    /// Recompute the visibility and label position of every marker.
    ///
    /// This is to be called on every frame after the camera is updated.
    pub fn sync(&mut self, scene: &impl SceneQuery) {
        let asset_visible = self
            .current_asset
            .filter(|id| scene.selection() == Some(*id))
            .and_then(|id| scene.asset(id))
            .map(|asset| (asset.visible, asset.transform));

        let projector = scene
            .camera()
            .map(|camera| ScreenProjector::new(camera, scene.viewport_size()));

        for marker in self.markers.iter_mut() {
            if let Some((_, parent_transform)) = asset_visible {
                marker.world_transform =
                    parent_transform * Mat4::from_translation(marker.hotspot.position);
            }

            marker.visibility.set(
                MarkerVisibility::ASSET,
                asset_visible.is_some_and(|(visible, _)| visible),
            );
            marker
                .visibility
                .set(MarkerVisibility::HOTSPOT, marker.hotspot.visible);

            match &projector {
                Some(projector) => {
                    let point = projector.project_transform(&marker.world_transform);
                    let in_bounds =
                        point.is_within(projector.viewport_size(), self.config.bounds_margin);

                    marker
                        .visibility
                        .set(MarkerVisibility::IN_FRONT, point.is_visible);
                    marker
                        .visibility
                        .set(MarkerVisibility::IN_BOUNDS, point.is_visible && in_bounds);
                    marker.label.pos = point.pos;
                }
                None => {
                    marker
                        .visibility
                        .remove(MarkerVisibility::IN_FRONT | MarkerVisibility::IN_BOUNDS);
                }
            }

            marker.label.shown = marker.is_shown();
        }
    }

    /// Find the shown marker nearest to the pointer within the hit radius.
    pub fn hit_test(&self, scene: &impl SceneQuery, pointer: Vec2) -> Option<&HotspotMarker> {
        let camera = scene.camera()?;
        let projector = ScreenProjector::new(camera, scene.viewport_size());

        projector
            .hit_test(pointer, &self.markers, self.config.hit_radius)
            .map(|(marker, distance)| {
                log::debug!(
                    "Hit hotspot \"{}\" at {distance:.1}px",
                    marker.hotspot.name
                );
                marker
            })
    }

    /// Handle a pointer press on the viewport.
    ///
    /// A primary press on a hotspot emits [`Event::HotspotClicked`], a secondary press emits
    /// [`Event::HotspotRightClicked`].
    ///
    /// Returns the ID of the hit hotspot.
    pub fn on_pointer_down(
        &self,
        scene: &impl SceneQuery,
        sink: &mut impl EventSink,
        pointer: PointerEvent,
    ) -> Option<HotspotId> {
        let event: fn(Hotspot) -> Event = match pointer.button {
            PointerButton::Primary => Event::HotspotClicked,
            PointerButton::Secondary => Event::HotspotRightClicked,
            PointerButton::Middle => return None,
        };

        let hotspot = self.hit_test(scene, pointer.pos)?.hotspot.clone();
        let id = hotspot.id.clone();
        sink.emit(event(hotspot));

        Some(id)
    }

    /// Handle a context menu request on the viewport.
    ///
    /// Returns whether the default context menu should be suppressed.
    pub fn on_context_menu(&self, scene: &impl SceneQuery, pointer: PointerEvent) -> bool {
        self.hit_test(scene, pointer.pos).is_some()
    }

    fn parent_transform(&self, scene: &impl SceneQuery) -> Mat4 {
        self.current_asset
            .and_then(|id| scene.asset(id))
            .map(|asset| asset.transform)
            .unwrap_or(Mat4::IDENTITY)
    }
}

impl Default for HotspotVisualSync {
    fn default() -> Self {
        Self::new(HotspotConfig::default())
    }
}
