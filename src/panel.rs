use glam::*;

use crate::{Hotspot, HotspotDraft, HotspotId, HotspotPatch};

/// An action requested by the hotspot UI.
#[derive(Debug, Clone, PartialEq)]
pub enum HotspotIntent {
    /// Add a hotspot to the selected asset.
    Add(HotspotDraft),
    /// Update a hotspot of the selected asset.
    Update(HotspotId, HotspotPatch),
    /// Remove a hotspot of the selected asset.
    Remove(HotspotId),
    /// Export the hotspots of the selected asset to a file.
    Export,
    /// Import a hotspot file into the selected asset.
    Import(String),
}

/// The inputs of the add hotspot dialog.
///
/// Inputs are kept as entered and only parsed by [`HotspotForm::to_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotspotForm {
    /// The name input, blank means [`HotspotForm::UNNAMED`].
    pub name: String,
    /// The X coordinate input.
    pub x: String,
    /// The Y coordinate input.
    pub y: String,
    /// The Z coordinate input.
    pub z: String,
    /// The size input.
    pub size: String,
    /// The description input.
    pub description: String,
}

impl HotspotForm {
    /// The name used when the name input is blank.
    pub const UNNAMED: &'static str = "Unnamed Hotspot";

    /// The size used when the size input is invalid or zero.
    pub const DEFAULT_SIZE: f32 = 1.0;

    /// The minimum size suggested to the user, not enforced.
    pub const SIZE_HINT_MIN: f32 = 0.1;

    /// Create a new form with default inputs.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            x: "0".to_owned(),
            y: "0".to_owned(),
            z: "0".to_owned(),
            size: "1.0".to_owned(),
            description: String::new(),
        }
    }

    /// Convert the inputs to a visible [`HotspotDraft`].
    ///
    /// Invalid coordinates become zero.
    pub fn to_draft(&self) -> HotspotDraft {
        let name = match self.name.trim() {
            "" => Self::UNNAMED.to_owned(),
            name => name.to_owned(),
        };

        let coord = |input: &str| parse_number(input).unwrap_or(0.0);
        let size = parse_number(&self.size)
            .filter(|size| *size != 0.0)
            .unwrap_or(Self::DEFAULT_SIZE);

        HotspotDraft::new(
            name,
            Vec3::new(coord(&self.x), coord(&self.y), coord(&self.z)),
            size,
        )
        .with_description(self.description.trim())
    }

    /// Submit the form.
    pub fn submit(&self) -> HotspotIntent {
        HotspotIntent::Add(self.to_draft())
    }
}

impl Default for HotspotForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A row of the hotspot list.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotListEntry {
    /// The ID of the listed hotspot.
    pub id: HotspotId,
    /// The display name.
    pub name: String,
    /// The position formatted with one decimal, e.g. `(1.0, 2.5, -3.0)`.
    pub position_label: String,
    /// The navigation target, if any.
    pub target: Option<String>,
}

impl HotspotListEntry {
    /// Create a new entry.
    pub fn new(hotspot: &Hotspot) -> Self {
        let Vec3 { x, y, z } = hotspot.position;
        Self {
            id: hotspot.id.clone(),
            name: hotspot.name.clone(),
            position_label: format!("({x:.1}, {y:.1}, {z:.1})"),
            target: hotspot.target_splat_name.clone(),
        }
    }

    /// Request removal of this entry.
    pub fn remove(&self) -> HotspotIntent {
        HotspotIntent::Remove(self.id.clone())
    }
}

/// The content of the hotspot panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// The selected asset has no hotspots.
    Empty,
    /// The hotspots of the selected asset.
    Entries(Vec<HotspotListEntry>),
}

impl PanelView {
    /// The message shown when there are no hotspots.
    pub const EMPTY_MESSAGE: &'static str = "No hotspots\nClick \"+ Add Hotspot\" to create one";

    /// Create the view of a collection.
    pub fn new(hotspots: &[Hotspot]) -> Self {
        match hotspots {
            [] => Self::Empty,
            hotspots => Self::Entries(hotspots.iter().map(HotspotListEntry::new).collect()),
        }
    }
}

/// Parse a number input, accepting surrounding whitespace.
pub(crate) fn parse_number(input: &str) -> Option<f32> {
    input.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
