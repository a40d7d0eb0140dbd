use std::collections::VecDeque;

use glam::*;

use crate::{CameraTrait, Hotspot};

/// The identity of a scene asset, i.e. a loaded splat.
///
/// This is assigned by the host scene and is opaque to the hotspot subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

/// A snapshot of a scene asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInfo {
    /// The identity.
    pub id: AssetId,
    /// The name, not guaranteed to be stable or unique.
    pub name: String,
    /// Whether the asset is visible.
    pub visible: bool,
    /// The world transform of the asset, parenting its hotspot markers.
    pub transform: Mat4,
}

impl AssetInfo {
    /// Create a new visible asset with identity transform.
    pub fn new(id: AssetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            transform: Mat4::IDENTITY,
        }
    }
}

/// The synchronous queries against the host scene.
pub trait SceneQuery {
    /// Get the currently selected asset.
    fn selection(&self) -> Option<AssetId>;

    /// Get all assets in scene order.
    fn assets(&self) -> Vec<AssetInfo>;

    /// Get an asset by identity.
    fn asset(&self, id: AssetId) -> Option<AssetInfo> {
        self.assets().into_iter().find(|asset| asset.id == id)
    }

    /// Get the first asset with exactly the given name.
    fn asset_by_name(&self, name: &str) -> Option<AssetInfo> {
        self.assets().into_iter().find(|asset| asset.name == name)
    }

    /// Get the active camera.
    fn camera(&self) -> Option<&dyn CameraTrait>;

    /// Get the viewport size in pixels.
    fn viewport_size(&self) -> Vec2;
}

/// The mutations of the host scene needed by navigation.
pub trait SceneControl: SceneQuery {
    /// Set the visibility of an asset.
    fn set_asset_visible(&mut self, id: AssetId, visible: bool);

    /// Set the selected asset.
    fn set_selection(&mut self, id: Option<AssetId>);
}

/// The kind of [`Popup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    /// A failure.
    Error,
    /// A success or notice.
    Info,
}

/// A user facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    /// The kind.
    pub kind: PopupKind,
    /// The title line.
    pub header: String,
    /// The body, may span multiple lines.
    pub message: String,
}

impl Popup {
    /// Create an error popup.
    pub fn error(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: PopupKind::Error,
            header: header.into(),
            message: message.into(),
        }
    }

    /// Create an info popup.
    pub fn info(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: PopupKind::Info,
            header: header.into(),
            message: message.into(),
        }
    }
}

/// The pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the wheel button.
    Middle,
    /// Usually the right button.
    Secondary,
}

/// A pointer event in viewport pixel coordinates, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The position in viewport pixels.
    pub pos: Vec2,
    /// The button pressed.
    pub button: PointerButton,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(pos: Vec2, button: PointerButton) -> Self {
        Self { pos, button }
    }
}

/// A signal exchanged between the hotspot components and the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A hotspot collection was modified or replaced.
    CollectionChanged,
    /// A hotspot was added.
    HotspotAdded(Hotspot),
    /// A hotspot was updated, carrying the merged value.
    HotspotUpdated(Hotspot),
    /// A hotspot was removed, carrying the removed value.
    HotspotRemoved(Hotspot),
    /// A hotspot was clicked with the primary button.
    HotspotClicked(Hotspot),
    /// A hotspot was clicked with the secondary button, entering adjust mode.
    HotspotRightClicked(Hotspot),
    /// The selected asset changed.
    SelectionChanged(Option<AssetId>),
    /// The visibility of an asset changed, or should be re-evaluated.
    AssetVisibilityChanged(AssetId),
    /// An asset was removed from the scene.
    AssetRemoved(AssetId),
    /// A frame is about to be rendered.
    PreRender,
    /// The pointer was pressed on the viewport.
    PointerDown(PointerEvent),
    /// The context menu was requested on the viewport.
    ContextMenu(PointerEvent),
    /// All notifications of a navigation switch were delivered.
    NavigationSettled { ticket: u64 },
    /// The timeline should start playing.
    StartPlayback,
    /// A message should be shown to the user.
    Popup(Popup),
}

/// The emitting side of the event bus.
pub trait EventSink {
    /// Emit an event.
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// A FIFO queue of events.
///
/// Events emitted while handling another event are delivered after it, so every listener of an
/// event has run before any later event is delivered.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Get the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if there are no pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: Event) {
        log::trace!("Emitting {event:?}");
        self.events.push_back(event);
    }
}
