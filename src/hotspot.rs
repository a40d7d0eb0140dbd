use std::fmt;

use glam::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The identifier of a hotspot.
///
/// This is unique across the whole [`HotspotStore`](crate::HotspotStore), not only within the
/// collection of one splat. The content is opaque and carries no ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotspotId(String);

impl HotspotId {
    /// The prefix of generated IDs.
    pub const PREFIX: &'static str = "hotspot";

    /// The length of the random suffix of generated IDs.
    pub const SUFFIX_LEN: usize = 9;

    /// Generate a new ID from the current time and a random suffix.
    pub fn generate() -> Self {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix = (0..Self::SUFFIX_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect::<String>();

        Self(format!("{}_{millis}_{suffix}", Self::PREFIX))
    }

    /// Get the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for HotspotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for HotspotId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for HotspotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A hotspot.
///
/// An interactive marker anchored in the space of the splat owning it. Clicking it navigates to
/// [`Hotspot::target_splat_name`] if set.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    /// The ID, immutable after creation.
    pub id: HotspotId,
    /// The display name.
    pub name: String,
    /// The position in the splat's space.
    pub position: Vec3,
    /// The size, scaling the marker radius.
    ///
    /// No bound is enforced.
    pub size: f32,
    /// The description.
    pub description: String,
    /// The name of the splat to navigate to on click.
    ///
    /// This is resolved by name at click time.
    pub target_splat_name: Option<String>,
    /// Whether the hotspot itself is visible.
    ///
    /// It is only shown when its splat is also visible.
    pub visible: bool,
}

impl Hotspot {
    /// Create a hotspot from a draft with a newly generated ID.
    pub fn from_draft(draft: HotspotDraft) -> Self {
        Self::from_draft_with_id(HotspotId::generate(), draft)
    }

    /// Create a hotspot from a draft with the given ID.
    pub fn from_draft_with_id(id: HotspotId, draft: HotspotDraft) -> Self {
        let HotspotDraft {
            name,
            position,
            size,
            description,
            target_splat_name,
            visible,
        } = draft;

        Self {
            id,
            name,
            position,
            size,
            description,
            target_splat_name,
            visible,
        }
    }

    /// Apply a patch in place.
    pub fn apply(&mut self, patch: HotspotPatch) {
        let HotspotPatch {
            name,
            position,
            size,
            description,
            target_splat_name,
            visible,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(position) = position {
            self.position = position;
        }
        if let Some(size) = size {
            self.size = size;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(target_splat_name) = target_splat_name {
            self.target_splat_name = target_splat_name;
        }
        if let Some(visible) = visible {
            self.visible = visible;
        }
    }
}

/// A hotspot without ID, used for adding.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotDraft {
    /// The display name.
    pub name: String,
    /// The position in the splat's space.
    pub position: Vec3,
    /// The size.
    pub size: f32,
    /// The description.
    pub description: String,
    /// The name of the splat to navigate to on click.
    pub target_splat_name: Option<String>,
    /// Whether the hotspot is visible.
    pub visible: bool,
}

impl HotspotDraft {
    /// Create a new visible draft without description and target.
    pub fn new(name: impl Into<String>, position: Vec3, size: f32) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            description: String::new(),
            target_splat_name: None,
            visible: true,
        }
    }

    /// Set the navigation target.
    pub fn with_target(mut self, target_splat_name: impl Into<String>) -> Self {
        self.target_splat_name = Some(target_splat_name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A partial update of a [`Hotspot`].
///
/// [`HotspotPatch::target_splat_name`] is doubly optional, `Some(None)` clears the target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotspotPatch {
    /// The new name.
    pub name: Option<String>,
    /// The new position.
    pub position: Option<Vec3>,
    /// The new size.
    pub size: Option<f32>,
    /// The new description.
    pub description: Option<String>,
    /// The new navigation target.
    pub target_splat_name: Option<Option<String>>,
    /// The new visibility.
    pub visible: Option<bool>,
}

impl HotspotPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Patch the position.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Patch the size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Patch the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Patch the navigation target, [`None`] clears it.
    pub fn target_splat_name(mut self, target_splat_name: Option<String>) -> Self {
        self.target_splat_name = Some(target_splat_name);
        self
    }

    /// Patch the visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
