use crate::{AssetId, Event, EventSink, Hotspot, HotspotDraft, HotspotId, HotspotPatch, SceneQuery};

/// The hotspot store.
///
/// Each asset owns an ordered collection of hotspots, created lazily on the first addition and
/// dropped with the asset.
///
/// [`HotspotStore::remove`] and [`HotspotStore::update`] only look into the collection of the
/// currently selected asset, the caller must select the owning asset first. They return `false`
/// rather than failing loudly.
#[derive(Debug, Default)]
pub struct HotspotStore {
    /// The collections in order of creation.
    collections: Vec<(AssetId, Vec<Hotspot>)>,
}

impl HotspotStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hotspot to the selected asset.
    ///
    /// Returns [`None`] if no asset is selected.
    pub fn add(
        &mut self,
        scene: &impl SceneQuery,
        sink: &mut impl EventSink,
        draft: HotspotDraft,
    ) -> Option<HotspotId> {
        let Some(asset) = scene.selection() else {
            log::warn!("Cannot add hotspot \"{}\" without a selection", draft.name);
            return None;
        };

        let hotspot = Hotspot::from_draft_with_id(self.unique_id(), draft);
        let id = hotspot.id.clone();

        log::debug!("Adding hotspot {id} to asset {asset:?}");
        self.collection_mut_or_insert(asset).push(hotspot.clone());

        sink.emit(Event::CollectionChanged);
        sink.emit(Event::HotspotAdded(hotspot));

        Some(id)
    }

    /// Remove a hotspot from the selected asset.
    ///
    /// Returns `false` if no asset is selected or the hotspot is not in its collection.
    pub fn remove(
        &mut self,
        scene: &impl SceneQuery,
        sink: &mut impl EventSink,
        id: &HotspotId,
    ) -> bool {
        let Some(hotspots) = scene
            .selection()
            .and_then(|asset| self.collection_mut(asset))
        else {
            return false;
        };

        let Some(index) = hotspots.iter().position(|h| &h.id == id) else {
            return false;
        };

        log::debug!("Removing hotspot {id}");
        let removed = hotspots.remove(index);

        sink.emit(Event::CollectionChanged);
        sink.emit(Event::HotspotRemoved(removed));

        true
    }

    /// Update a hotspot of the selected asset in place.
    ///
    /// Returns `false` if no asset is selected or the hotspot is not in its collection.
    pub fn update(
        &mut self,
        scene: &impl SceneQuery,
        sink: &mut impl EventSink,
        id: &HotspotId,
        patch: HotspotPatch,
    ) -> bool {
        let Some(hotspot) = scene
            .selection()
            .and_then(|asset| self.collection_mut(asset))
            .and_then(|hotspots| hotspots.iter_mut().find(|h| &h.id == id))
        else {
            return false;
        };

        log::debug!("Updating hotspot {id} with {patch:?}");
        hotspot.apply(patch);
        let updated = hotspot.clone();

        sink.emit(Event::CollectionChanged);
        sink.emit(Event::HotspotUpdated(updated));

        true
    }

    /// Get the hotspots of the selected asset.
    ///
    /// Returns an empty slice if no asset is selected.
    pub fn list(&self, scene: &impl SceneQuery) -> &[Hotspot] {
        scene
            .selection()
            .map(|asset| self.collection(asset))
            .unwrap_or_default()
    }

    /// Get a snapshot of all collections keyed by the current asset name.
    ///
    /// Collections of assets no longer known to the scene are skipped.
    pub fn list_all(&self, scene: &impl SceneQuery) -> Vec<(String, Vec<Hotspot>)> {
        let assets = scene.assets();
        self.collections
            .iter()
            .filter_map(|(id, hotspots)| {
                assets
                    .iter()
                    .find(|asset| asset.id == *id)
                    .map(|asset| (asset.name.clone(), hotspots.clone()))
            })
            .collect()
    }

    /// Get the hotspots of an asset.
    pub fn collection(&self, asset: AssetId) -> &[Hotspot] {
        self.collections
            .iter()
            .find(|(id, _)| *id == asset)
            .map(|(_, hotspots)| hotspots.as_slice())
            .unwrap_or_default()
    }

    /// Iterate over all collections in order of creation.
    pub fn collections(&self) -> impl Iterator<Item = (AssetId, &[Hotspot])> {
        self.collections
            .iter()
            .map(|(id, hotspots)| (*id, hotspots.as_slice()))
    }

    /// Find a hotspot in any collection.
    pub fn find(&self, id: &HotspotId) -> Option<(AssetId, &Hotspot)> {
        self.collections.iter().find_map(|(asset, hotspots)| {
            hotspots
                .iter()
                .find(|h| &h.id == id)
                .map(|hotspot| (*asset, hotspot))
        })
    }

    /// Replace the collection of an asset wholesale.
    ///
    /// The collection keeps its position among the others. IDs clashing with hotspots of other
    /// assets are regenerated so that IDs stay unique across the store. This does not emit any
    /// event.
    pub fn replace(&mut self, asset: AssetId, hotspots: Vec<Hotspot>) {
        let mut accepted = Vec::<Hotspot>::with_capacity(hotspots.len());
        for mut hotspot in hotspots {
            let used_elsewhere = self
                .find(&hotspot.id)
                .is_some_and(|(owner, _)| owner != asset);
            if used_elsewhere || accepted.iter().any(|h| h.id == hotspot.id) {
                let id = loop {
                    let id = self.unique_id();
                    if accepted.iter().all(|h| h.id != id) {
                        break id;
                    }
                };
                log::warn!("Hotspot ID {} already in use, replaced by {id}", hotspot.id);
                hotspot.id = id;
            }
            accepted.push(hotspot);
        }

        *self.collection_mut_or_insert(asset) = accepted;
    }

    /// Remove the collection of an asset.
    ///
    /// Returns the removed hotspots.
    pub fn remove_asset(&mut self, asset: AssetId) -> Option<Vec<Hotspot>> {
        let index = self.collections.iter().position(|(id, _)| *id == asset)?;
        Some(self.collections.remove(index).1)
    }

    /// Get the total number of hotspots.
    pub fn len(&self) -> usize {
        self.collections.iter().map(|(_, hotspots)| hotspots.len()).sum()
    }

    /// Check if there are no hotspots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collection_mut(&mut self, asset: AssetId) -> Option<&mut Vec<Hotspot>> {
        self.collections
            .iter_mut()
            .find(|(id, _)| *id == asset)
            .map(|(_, hotspots)| hotspots)
    }

    fn collection_mut_or_insert(&mut self, asset: AssetId) -> &mut Vec<Hotspot> {
        let index = match self.collections.iter().position(|(id, _)| *id == asset) {
            Some(index) => index,
            None => {
                self.collections.push((asset, Vec::new()));
                self.collections.len() - 1
            }
        };

        &mut self.collections[index].1
    }

    fn unique_id(&self) -> HotspotId {
        loop {
            let id = HotspotId::generate();
            if self.find(&id).is_none() {
                break id;
            }
        }
    }
}
