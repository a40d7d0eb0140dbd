use std::path::{Path, PathBuf};

use glam::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    AssetInfo, Error, Event, EventSink, Hotspot, HotspotConfig, HotspotId, HotspotStore, Popup,
    SceneQuery,
};

/// The serialized form of a [`Hotspot`].
///
/// When reading, a missing or empty `id` is regenerated, a missing `visible` means visible, and a
/// missing or `null` `size` is [`HotspotDoc::DEFAULT_SIZE`]. Non-finite sizes are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotDoc {
    /// The ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HotspotId>,
    /// The display name.
    #[serde(default)]
    pub name: String,
    /// The position in the splat's space.
    pub position: [f32; 3],
    /// The size.
    #[serde(
        default = "HotspotDoc::default_size",
        deserialize_with = "HotspotDoc::deserialize_size"
    )]
    pub size: f32,
    /// The description.
    #[serde(default)]
    pub description: String,
    /// The name of the splat to navigate to on click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_splat_name: Option<String>,
    /// The visibility, only `false` hides.
    #[serde(default)]
    pub visible: Option<bool>,
}

impl HotspotDoc {
    /// The size used when absent.
    pub const DEFAULT_SIZE: f32 = 1.0;

    fn default_size() -> f32 {
        Self::DEFAULT_SIZE
    }

    fn deserialize_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(Self::DEFAULT_SIZE))
    }

    /// Convert into a [`Hotspot`], generating an ID if absent or empty.
    pub fn into_hotspot(self) -> Hotspot {
        Hotspot {
            id: self
                .id
                .filter(|id| !id.as_str().is_empty())
                .unwrap_or_else(HotspotId::generate),
            name: self.name,
            position: Vec3::from_array(self.position),
            size: self.size,
            description: self.description,
            target_splat_name: self.target_splat_name,
            visible: self.visible != Some(false),
        }
    }
}

impl From<&Hotspot> for HotspotDoc {
    fn from(hotspot: &Hotspot) -> Self {
        Self {
            id: Some(hotspot.id.clone()),
            name: hotspot.name.clone(),
            position: hotspot.position.to_array(),
            size: hotspot.size,
            description: hotspot.description.clone(),
            target_splat_name: hotspot.target_splat_name.clone(),
            visible: Some(hotspot.visible),
        }
    }
}

/// The hotspots of one asset embedded in a project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHotspotsDoc {
    /// The name of the owning splat.
    pub splat_name: String,
    /// The hotspots in collection order.
    #[serde(default)]
    pub hotspots: Vec<HotspotDoc>,
}

/// A standalone hotspot file of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotFileDoc {
    /// The format version.
    pub version: u32,
    /// The name of the exported splat.
    pub splat_name: String,
    /// The RFC 3339 export time.
    pub timestamp: String,
    /// The hotspots in collection order.
    pub hotspots: Vec<HotspotDoc>,
}

impl HotspotFileDoc {
    /// Create a new file document stamped with the current time.
    pub fn new(version: u32, splat_name: impl Into<String>, hotspots: &[Hotspot]) -> Self {
        Self {
            version,
            splat_name: splat_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            hotspots: hotspots.iter().map(HotspotDoc::from).collect(),
        }
    }
}

/// An exported hotspot file, ready to be offered for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    /// The suggested file name.
    pub file_name: String,
    /// The pretty printed JSON.
    pub contents: String,
    /// The number of exported hotspots.
    pub count: usize,
}

impl ExportedFile {
    /// Get the suggested file name for an asset.
    pub fn file_name_for(splat_name: &str) -> String {
        format!("{splat_name}_hotspots.json")
    }

    /// Write the file into a directory.
    ///
    /// Returns the path written.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        log::info!("Hotspot file saved to {}", path.display());
        Ok(path)
    }
}

/// Serialize the hotspots of every asset with a non-empty collection.
///
/// Collections of assets unknown to the scene are skipped.
pub fn serialize_all(store: &HotspotStore, scene: &impl SceneQuery) -> Vec<AssetHotspotsDoc> {
    store
        .list_all(scene)
        .into_iter()
        .filter(|(_, hotspots)| !hotspots.is_empty())
        .map(|(splat_name, hotspots)| AssetHotspotsDoc {
            splat_name,
            hotspots: hotspots.iter().map(HotspotDoc::from).collect(),
        })
        .collect()
}

/// Restore the hotspots serialized by [`serialize_all`].
///
/// Each entry replaces the collection of the first asset with the same name, entries naming
/// unknown assets are dropped. The caller must wait for all assets to be loaded first.
///
/// Returns the number of restored collections.
pub fn deserialize_all(
    store: &mut HotspotStore,
    scene: &impl SceneQuery,
    sink: &mut impl EventSink,
    docs: Vec<AssetHotspotsDoc>,
) -> usize {
    if docs.is_empty() {
        return 0;
    }

    let assets = scene.assets();
    let mut restored = 0;

    for doc in docs {
        let Some(asset) = assets.iter().find(|asset| asset.name == doc.splat_name) else {
            log::warn!("Dropping hotspots of unknown splat \"{}\"", doc.splat_name);
            continue;
        };

        log::debug!(
            "Restoring {} hotspots of splat \"{}\"",
            doc.hotspots.len(),
            asset.name
        );
        store.replace(
            asset.id,
            doc.hotspots.into_iter().map(HotspotDoc::into_hotspot).collect(),
        );
        restored += 1;
    }

    sink.emit(Event::CollectionChanged);

    restored
}

/// Parse a project document section produced by [`serialize_all`].
pub fn parse_document(json: &str) -> Result<Vec<AssetHotspotsDoc>, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Parse the hotspots of a standalone hotspot file.
///
/// Only the `hotspots` array is required, other fields are ignored.
pub fn parse_hotspot_file(contents: &str) -> Result<Vec<Hotspot>, Error> {
    let value = serde_json::from_str::<serde_json::Value>(contents)?;
    let Some(entries) = value.get("hotspots").and_then(|h| h.as_array()) else {
        return Err(Error::InvalidHotspotFile);
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            HotspotDoc::deserialize(entry)
                .map(HotspotDoc::into_hotspot)
                .map_err(|e| Error::InvalidHotspot {
                    index,
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// Export the hotspots of the selected asset as a standalone file.
///
/// A popup reports the outcome.
pub fn export_to_file(
    store: &HotspotStore,
    scene: &impl SceneQuery,
    sink: &mut impl EventSink,
    config: &HotspotConfig,
) -> Result<ExportedFile, Error> {
    const HEADER_FAILED: &str = "Save Failed";

    let Some(asset) = selected_asset(scene) else {
        sink.emit(Event::Popup(Popup::error(
            HEADER_FAILED,
            "Please select a splat first",
        )));
        return Err(Error::NoSelection);
    };

    let hotspots = store.collection(asset.id);
    if hotspots.is_empty() {
        sink.emit(Event::Popup(Popup::error(
            HEADER_FAILED,
            "The selected splat has no hotspots",
        )));
        return Err(Error::EmptyCollection(asset.name));
    }

    let doc = HotspotFileDoc::new(config.export_version, &asset.name, hotspots);
    let contents = serde_json::to_string_pretty(&doc)?;
    let file = ExportedFile {
        file_name: ExportedFile::file_name_for(&asset.name),
        contents,
        count: hotspots.len(),
    };

    log::info!("Exported {} hotspots of splat \"{}\"", file.count, asset.name);
    sink.emit(Event::Popup(Popup::info(
        "Save Succeeded",
        format!(
            "Saved {} hotspots of {}\nFile name: {}",
            file.count, asset.name, file.file_name
        ),
    )));

    Ok(file)
}

/// Import a standalone hotspot file into the selected asset, replacing its collection.
///
/// The store is untouched on failure. A popup reports the outcome.
///
/// Returns the number of imported hotspots.
pub fn import_from_file(
    store: &mut HotspotStore,
    scene: &impl SceneQuery,
    sink: &mut impl EventSink,
    contents: &str,
) -> Result<usize, Error> {
    const HEADER_FAILED: &str = "Load Failed";

    let Some(asset) = selected_asset(scene) else {
        sink.emit(Event::Popup(Popup::error(
            HEADER_FAILED,
            "Please select a splat first",
        )));
        return Err(Error::NoSelection);
    };

    let hotspots = match parse_hotspot_file(contents) {
        Ok(hotspots) => hotspots,
        Err(e @ Error::InvalidHotspotFile) => {
            sink.emit(Event::Popup(Popup::error(
                HEADER_FAILED,
                "Invalid hotspot file format",
            )));
            return Err(e);
        }
        Err(e) => {
            log::error!("Failed to parse hotspot file: {e}");
            sink.emit(Event::Popup(Popup::error(
                HEADER_FAILED,
                format!("Failed to parse file: {e}"),
            )));
            return Err(e);
        }
    };

    let count = hotspots.len();
    store.replace(asset.id, hotspots);
    sink.emit(Event::CollectionChanged);

    log::info!("Imported {count} hotspots into splat \"{}\"", asset.name);
    sink.emit(Event::Popup(Popup::info(
        "Load Succeeded",
        format!("Loaded {count} hotspots for {}", asset.name),
    )));

    Ok(count)
}

fn selected_asset(scene: &impl SceneQuery) -> Option<AssetInfo> {
    scene.selection().and_then(|id| scene.asset(id))
}
