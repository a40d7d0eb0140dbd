use crate::{
    AssetHotspotsDoc, Error, Event, EventQueue, EventSink, ExportedFile, Hotspot, HotspotAdjuster,
    HotspotConfig, HotspotDraft, HotspotId, HotspotIntent, HotspotMarkerPod, HotspotPatch,
    HotspotStore, HotspotVisualSync, NavigationCoordinator, NavigationTicket, PanelView,
    SceneControl, SceneQuery, serializer,
};

/// A callback observing every delivered event.
pub type EventSubscriber = Box<dyn FnMut(&Event)>;

/// The outcome of [`HotspotEditor::apply`].
#[derive(Debug)]
pub enum IntentOutcome {
    /// The ID of the added hotspot, [`None`] if no asset is selected.
    Added(Option<HotspotId>),
    /// Whether the hotspot was updated.
    Updated(bool),
    /// Whether the hotspot was removed.
    Removed(bool),
    /// The exported file.
    Exported(Result<ExportedFile, Error>),
    /// The number of imported hotspots.
    Imported(Result<usize, Error>),
}

/// The hotspot editor.
///
/// This owns every hotspot component and routes events between them. Events are delivered in
/// FIFO order, each one to the interested components first and then to the subscribers, before
/// the next event is taken.
pub struct HotspotEditor {
    config: HotspotConfig,
    store: HotspotStore,
    visual_sync: HotspotVisualSync,
    navigation: NavigationCoordinator,
    adjuster: HotspotAdjuster,
    queue: EventQueue,
    subscribers: Vec<EventSubscriber>,
    navigation_ticket: Option<NavigationTicket>,
}

impl HotspotEditor {
    /// Create a new editor.
    pub fn new(config: HotspotConfig) -> Self {
        log::debug!("Creating hotspot editor with {config:?}");

        Self {
            visual_sync: HotspotVisualSync::new(config),
            config,
            store: HotspotStore::new(),
            navigation: NavigationCoordinator::new(),
            adjuster: HotspotAdjuster::new(),
            queue: EventQueue::new(),
            subscribers: Vec::new(),
            navigation_ticket: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &HotspotConfig {
        &self.config
    }

    /// Get the store.
    pub fn store(&self) -> &HotspotStore {
        &self.store
    }

    /// Get the visual sync.
    pub fn visual_sync(&self) -> &HotspotVisualSync {
        &self.visual_sync
    }

    /// Get the navigation coordinator.
    pub fn navigation(&self) -> &NavigationCoordinator {
        &self.navigation
    }

    /// Get the adjuster.
    pub fn adjuster(&self) -> &HotspotAdjuster {
        &self.adjuster
    }

    /// Get the POD instances of the enabled markers.
    pub fn marker_pods(&self) -> Vec<HotspotMarkerPod> {
        self.visual_sync.marker_pods()
    }

    /// Observe every delivered event.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Event) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Take the ticket of the latest navigation.
    pub fn take_navigation_ticket(&mut self) -> Option<NavigationTicket> {
        self.navigation_ticket.take()
    }

    /// Dispatch an event from the host and deliver everything it triggers.
    ///
    /// Returns whether a hotspot consumed the event, i.e. the pointer hit a hotspot or the
    /// context menu should be suppressed.
    pub fn dispatch(&mut self, scene: &mut impl SceneControl, event: Event) -> bool {
        self.queue.emit(event);
        self.drain(scene)
    }

    /// Add a hotspot to the selected asset.
    pub fn add(&mut self, scene: &mut impl SceneControl, draft: HotspotDraft) -> Option<HotspotId> {
        let id = self.store.add(&*scene, &mut self.queue, draft);
        self.drain(scene);
        id
    }

    /// Remove a hotspot of the selected asset.
    pub fn remove(&mut self, scene: &mut impl SceneControl, id: &HotspotId) -> bool {
        let removed = self.store.remove(&*scene, &mut self.queue, id);
        self.drain(scene);
        removed
    }

    /// Update a hotspot of the selected asset.
    pub fn update(
        &mut self,
        scene: &mut impl SceneControl,
        id: &HotspotId,
        patch: HotspotPatch,
    ) -> bool {
        let updated = self.store.update(&*scene, &mut self.queue, id, patch);
        self.drain(scene);
        updated
    }

    /// Get the hotspots of the selected asset.
    pub fn list(&self, scene: &impl SceneQuery) -> &[Hotspot] {
        self.store.list(scene)
    }

    /// Get a snapshot of all collections keyed by asset name.
    pub fn list_all(&self, scene: &impl SceneQuery) -> Vec<(String, Vec<Hotspot>)> {
        self.store.list_all(scene)
    }

    /// Serialize all non-empty collections.
    pub fn serialize_all(&self, scene: &impl SceneQuery) -> Vec<AssetHotspotsDoc> {
        serializer::serialize_all(&self.store, scene)
    }

    /// Restore serialized collections.
    pub fn deserialize_all(
        &mut self,
        scene: &mut impl SceneControl,
        docs: Vec<AssetHotspotsDoc>,
    ) -> usize {
        let restored = serializer::deserialize_all(&mut self.store, &*scene, &mut self.queue, docs);
        self.drain(scene);
        restored
    }

    /// Export the hotspots of the selected asset.
    pub fn export_to_file(&mut self, scene: &mut impl SceneControl) -> Result<ExportedFile, Error> {
        let file =
            serializer::export_to_file(&self.store, &*scene, &mut self.queue, &self.config);
        self.drain(scene);
        file
    }

    /// Import a hotspot file into the selected asset.
    pub fn import_from_file(
        &mut self,
        scene: &mut impl SceneControl,
        contents: &str,
    ) -> Result<usize, Error> {
        let count =
            serializer::import_from_file(&mut self.store, &*scene, &mut self.queue, contents);
        self.drain(scene);
        count
    }

    /// Apply an intent of the hotspot UI.
    pub fn apply(&mut self, scene: &mut impl SceneControl, intent: HotspotIntent) -> IntentOutcome {
        match intent {
            HotspotIntent::Add(draft) => IntentOutcome::Added(self.add(scene, draft)),
            HotspotIntent::Update(id, patch) => {
                IntentOutcome::Updated(self.update(scene, &id, patch))
            }
            HotspotIntent::Remove(id) => IntentOutcome::Removed(self.remove(scene, &id)),
            HotspotIntent::Export => IntentOutcome::Exported(self.export_to_file(scene)),
            HotspotIntent::Import(contents) => {
                IntentOutcome::Imported(self.import_from_file(scene, &contents))
            }
        }
    }

    /// Edit the adjusted hotspot and apply the resulting intent.
    ///
    /// Returns [`None`] if the edit was ignored.
    pub fn adjust(
        &mut self,
        scene: &mut impl SceneControl,
        edit: impl FnOnce(&mut HotspotAdjuster) -> Option<HotspotIntent>,
    ) -> Option<IntentOutcome> {
        let intent = edit(&mut self.adjuster)?;
        Some(self.apply(scene, intent))
    }

    /// Get the hotspot panel content of the selected asset.
    pub fn panel_view(&self, scene: &impl SceneQuery) -> PanelView {
        PanelView::new(self.store.list(scene))
    }

    fn drain(&mut self, scene: &mut impl SceneControl) -> bool {
        let mut consumed = false;

        while let Some(event) = self.queue.pop() {
            consumed |= self.handle(scene, &event);

            for subscriber in self.subscribers.iter_mut() {
                subscriber(&event);
            }
        }

        consumed
    }

    fn handle(&mut self, scene: &mut impl SceneControl, event: &Event) -> bool {
        match event {
            Event::CollectionChanged => {
                self.visual_sync.rebuild(&*scene, &self.store);
            }
            Event::HotspotUpdated(hotspot) => {
                self.visual_sync.update_marker(&*scene, hotspot);
                self.adjuster.on_hotspot_updated(hotspot);
            }
            Event::HotspotRemoved(hotspot) => {
                self.visual_sync.remove_marker(&hotspot.id);
                self.adjuster.on_hotspot_removed(&hotspot.id);
            }
            Event::HotspotClicked(hotspot) => {
                if let Ok(ticket) =
                    self.navigation
                        .on_hotspot_clicked(scene, &mut self.queue, hotspot)
                {
                    self.navigation_ticket = Some(ticket);
                }
            }
            Event::HotspotRightClicked(hotspot) => {
                self.adjuster.open(hotspot.clone());
            }
            Event::SelectionChanged(_) => {
                self.visual_sync.on_selection_changed(&*scene, &self.store);
            }
            Event::AssetVisibilityChanged(asset) => {
                self.visual_sync
                    .on_asset_visibility_changed(&*scene, *asset);
            }
            Event::AssetRemoved(asset) => {
                if let Some(hotspots) = self.store.remove_asset(*asset) {
                    log::debug!("Dropped {} hotspots of asset {asset:?}", hotspots.len());
                }

                if self
                    .adjuster
                    .current()
                    .is_some_and(|hotspot| self.store.find(&hotspot.id).is_none())
                {
                    self.adjuster.close();
                }

                if self.visual_sync.current_asset() == Some(*asset) {
                    self.visual_sync.rebuild(&*scene, &self.store);
                }
            }
            Event::PreRender => {
                self.visual_sync.sync(&*scene);
            }
            Event::PointerDown(pointer) => {
                return self
                    .visual_sync
                    .on_pointer_down(&*scene, &mut self.queue, *pointer)
                    .is_some();
            }
            Event::ContextMenu(pointer) => {
                return self.visual_sync.on_context_menu(&*scene, *pointer);
            }
            Event::NavigationSettled { ticket } => {
                self.navigation.on_settled(&mut self.queue, *ticket);
            }
            Event::HotspotAdded(_) | Event::StartPlayback | Event::Popup(_) => {}
        }

        false
    }
}

impl Default for HotspotEditor {
    fn default() -> Self {
        Self::new(HotspotConfig::default())
    }
}

impl std::fmt::Debug for HotspotEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotspotEditor")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("visual_sync", &self.visual_sync)
            .field("navigation", &self.navigation)
            .field("adjuster", &self.adjuster)
            .field("queue", &self.queue)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
