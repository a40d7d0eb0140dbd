use wgpu_3dgs_hotspots::{AssetId, AssetInfo, Camera, HotspotDraft, glam::*};

use crate::common::TestScene;

pub const VIEWPORT_SIZE: Vec2 = Vec2::new(800.0, 600.0);

pub const HOTSPOT_FILE: &str = r#"{
    "version": 1,
    "splatName": "A",
    "timestamp": "2024-01-01T00:00:00.000Z",
    "hotspots": [
        {
            "id": "hotspot_1704067200000_abcdefghi",
            "name": "Door",
            "position": [1.0, 2.0, 3.0],
            "size": 1.5,
            "description": "Front door",
            "targetSplatName": "B",
            "visible": true
        },
        {
            "name": "Window",
            "position": [-1.0, 0.5, 4.0]
        }
    ]
}"#;

/// A camera at the origin looking along +Z.
pub fn camera() -> Camera {
    Camera::new(0.1..1e4, std::f32::consts::FRAC_PI_2)
}

/// Asset "A" visible and asset "B" hidden, nothing selected.
pub fn scene() -> TestScene {
    TestScene {
        assets: vec![
            AssetInfo::new(AssetId(1), "A"),
            AssetInfo {
                visible: false,
                ..AssetInfo::new(AssetId(2), "B")
            },
        ],
        selection: None,
        camera: camera(),
        viewport_size: VIEWPORT_SIZE,
    }
}

pub fn door() -> HotspotDraft {
    HotspotDraft::new("Door", Vec3::new(1.0, 2.0, 3.0), 1.0)
}

/// A draft in front of the default camera.
pub fn draft_at(name: &str, position: Vec3) -> HotspotDraft {
    HotspotDraft::new(name, position, 1.0)
}
