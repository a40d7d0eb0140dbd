mod adjuster;
mod camera;
mod config;
mod editor;
mod error;
mod events;
mod hotspot;
mod navigation;
mod panel;
mod projector;
mod store;
mod visual_sync;

pub mod serializer;

#[cfg(feature = "frame-stats")]
mod frame_stats;
#[cfg(feature = "upscale")]
mod upscale;

pub use adjuster::*;
pub use camera::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use events::*;
pub use hotspot::*;
pub use navigation::*;
pub use panel::*;
pub use projector::*;
pub use serializer::{AssetHotspotsDoc, ExportedFile, HotspotDoc, HotspotFileDoc};
pub use store::*;
pub use visual_sync::*;

#[cfg(feature = "frame-stats")]
pub use frame_stats::*;
#[cfg(feature = "upscale")]
pub use upscale::*;

pub use glam;
