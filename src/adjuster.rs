use crate::{Hotspot, HotspotId, HotspotIntent, HotspotPatch, SceneQuery, panel::parse_number};

/// An axis of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Get the index of the axis.
    pub fn index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// An option of the navigation target selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOption {
    /// The value, empty for no target.
    pub value: String,
    /// The displayed text.
    pub label: String,
    /// Whether this is the current target.
    pub selected: bool,
}

/// The adjust mode of a hotspot, entered by right clicking it.
///
/// Every edit yields a [`HotspotIntent`] to be applied by the caller, and the adjusted copy is
/// patched along so that consecutive edits build on each other.
#[derive(Debug, Default)]
pub struct HotspotAdjuster {
    current: Option<Hotspot>,
}

impl HotspotAdjuster {
    /// The label of the "no target" option.
    pub const NO_TARGET_LABEL: &'static str = "No Navigation";

    /// Create a new closed adjuster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the adjuster for a hotspot, replacing any open one.
    pub fn open(&mut self, hotspot: Hotspot) {
        log::debug!("Adjusting hotspot \"{}\"", hotspot.name);
        self.current = Some(hotspot);
    }

    /// Close the adjuster.
    pub fn close(&mut self) {
        self.current = None;
    }

    /// Check if the adjuster is open.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Get the hotspot being adjusted.
    pub fn current(&self) -> Option<&Hotspot> {
        self.current.as_ref()
    }

    /// Get the title.
    pub fn title(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|hotspot| format!("Adjust Hotspot: {}", hotspot.name))
    }

    /// Edit the name.
    pub fn set_name(&mut self, name: &str) -> Option<HotspotIntent> {
        self.patch(HotspotPatch::new().name(name))
    }

    /// Edit one axis of the position.
    ///
    /// Ignored unless the input is a number.
    pub fn set_position_axis(&mut self, axis: Axis, input: &str) -> Option<HotspotIntent> {
        let value = parse_number(input)?;
        let mut position = self.current.as_ref()?.position;
        position[axis.index()] = value;
        self.patch(HotspotPatch::new().position(position))
    }

    /// Edit the size.
    ///
    /// Ignored unless the input is a positive number.
    pub fn set_size(&mut self, input: &str) -> Option<HotspotIntent> {
        let size = parse_number(input).filter(|size| *size > 0.0)?;
        self.patch(HotspotPatch::new().size(size))
    }

    /// Edit the navigation target, an empty value clears it.
    pub fn set_target(&mut self, value: &str) -> Option<HotspotIntent> {
        let target = (!value.is_empty()).then(|| value.to_owned());
        self.patch(HotspotPatch::new().target_splat_name(target))
    }

    /// Toggle the visibility.
    pub fn toggle_visible(&mut self) -> Option<HotspotIntent> {
        let visible = !self.current.as_ref()?.visible;
        self.patch(HotspotPatch::new().visible(visible))
    }

    /// Delete the hotspot, closing the adjuster.
    pub fn delete(&mut self) -> Option<HotspotIntent> {
        let hotspot = self.current.take()?;
        Some(HotspotIntent::Remove(hotspot.id))
    }

    /// Get the navigation target options listing every asset.
    pub fn target_options(&self, scene: &impl SceneQuery) -> Vec<TargetOption> {
        let current = self
            .current
            .as_ref()
            .and_then(|hotspot| hotspot.target_splat_name.as_deref());

        std::iter::once(TargetOption {
            value: String::new(),
            label: Self::NO_TARGET_LABEL.to_owned(),
            selected: current.is_none(),
        })
        .chain(scene.assets().into_iter().map(|asset| TargetOption {
            selected: current == Some(asset.name.as_str()),
            label: asset.name.clone(),
            value: asset.name,
        }))
        .collect()
    }

    /// Keep the adjusted copy in sync with the store.
    pub fn on_hotspot_updated(&mut self, hotspot: &Hotspot) {
        if let Some(current) = self.current.as_mut().filter(|h| h.id == hotspot.id) {
            current.clone_from(hotspot);
        }
    }

    /// Close the adjuster if its hotspot was removed.
    pub fn on_hotspot_removed(&mut self, id: &HotspotId) {
        if self.current.as_ref().is_some_and(|h| &h.id == id) {
            self.close();
        }
    }

    fn patch(&mut self, patch: HotspotPatch) -> Option<HotspotIntent> {
        let current = self.current.as_mut()?;
        current.apply(patch.clone());
        Some(HotspotIntent::Update(current.id.clone(), patch))
    }
}
