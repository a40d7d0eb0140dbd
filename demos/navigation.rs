use std::time::{Duration, Instant};

use clap::Parser;
use glam::*;

use wgpu_3dgs_hotspots as hs;

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "\
    A headless walkthrough of the hotspot editor.\n\
    \n\
    Two splats are loaded, a hotspot on the first one navigates to the second one when clicked. \
    The hotspots of the first splat are exported afterwards.\
    "
)]
struct Args {
    /// Names of the splats to load, the first one is selected.
    #[arg(short, long, num_args = 2.., default_values_t = ["lobby".to_string(), "garden".to_string()])]
    splats: Vec<String>,

    /// Directory to save the exported hotspot file in.
    #[arg(short, long)]
    out_dir: Option<String>,

    /// Upscaling quality mode.
    #[arg(short, long, default_value = "quality")]
    quality: hs::QualityMode,

    /// Viewport width.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// The host scene.
struct DemoScene {
    assets: Vec<hs::AssetInfo>,
    selection: Option<hs::AssetId>,
    camera: hs::Camera,
    viewport_size: Vec2,
}

impl hs::SceneQuery for DemoScene {
    fn selection(&self) -> Option<hs::AssetId> {
        self.selection
    }

    fn assets(&self) -> Vec<hs::AssetInfo> {
        self.assets.clone()
    }

    fn camera(&self) -> Option<&dyn hs::CameraTrait> {
        Some(&self.camera)
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }
}

impl hs::SceneControl for DemoScene {
    fn set_asset_visible(&mut self, id: hs::AssetId, visible: bool) {
        if let Some(asset) = self.assets.iter_mut().find(|asset| asset.id == id) {
            asset.visible = visible;
        }
    }

    fn set_selection(&mut self, id: Option<hs::AssetId>) {
        self.selection = id;
    }
}

fn main() -> Result<(), hs::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let native_resolution = UVec2::new(args.width, args.height);

    let mut scene = DemoScene {
        assets: args
            .splats
            .iter()
            .enumerate()
            .map(|(i, name)| hs::AssetInfo {
                visible: i == 0,
                ..hs::AssetInfo::new(hs::AssetId(i as u64), name.clone())
            })
            .collect(),
        selection: None,
        camera: hs::Camera::new(0.1..1e4, 60f32.to_radians()),
        viewport_size: native_resolution.as_vec2(),
    };

    let mut editor = hs::HotspotEditor::default();
    editor.subscribe(|event| log::info!("Event: {event:?}"));

    let first = scene.assets[0].id;
    scene.selection = Some(first);
    editor.dispatch(&mut scene, hs::Event::SelectionChanged(Some(first)));

    let portal_pos = Vec3::new(0.5, 0.0, 4.0);
    scene.camera.look_at(portal_pos);

    editor.add(
        &mut scene,
        hs::HotspotDraft::new("Portal", portal_pos, 1.0)
            .with_target(args.splats[1].clone())
            .with_description("Walk to the next splat"),
    );
    editor.apply(&mut scene, hs::HotspotForm::new().submit());

    let mut settings = hs::UpscaleSettings::default();
    settings.quality_mode = args.quality;

    let mut upscaler = hs::Upscaler::new(settings, native_resolution);
    let popup = upscaler.set_enabled(true);
    editor.dispatch(&mut scene, hs::Event::Popup(popup));

    let mut frame_stats = hs::FrameStats::new();
    let start = Instant::now();
    for frame in 0..30 {
        let now = start + Duration::from_millis(frame * 16);
        frame_stats.record_frame_at(now);
        upscaler.record_frame_at(now);
        editor.dispatch(&mut scene, hs::Event::PreRender);
    }
    log::info!(
        "{} ({:?})",
        frame_stats.label_with_upscaler(&upscaler.metrics()),
        frame_stats.rating()
    );

    let file = editor.export_to_file(&mut scene)?;
    match args.out_dir {
        Some(dir) => {
            file.save_in(dir)?;
        }
        None => println!("{}", file.contents),
    }

    let Some(marker) = editor
        .visual_sync()
        .markers()
        .iter()
        .find(|marker| marker.is_shown())
    else {
        log::warn!("No hotspot is shown");
        return Ok(());
    };

    let click = hs::PointerEvent::new(marker.label.pos, hs::PointerButton::Primary);
    editor.dispatch(&mut scene, hs::Event::PointerDown(click));

    if let Some(ticket) = editor.take_navigation_ticket() {
        let target = pollster::block_on(ticket.into_future())?;
        log::info!(
            "Navigated to {:?}, hotspots: {:?}",
            target,
            editor.panel_view(&scene)
        );
    }

    Ok(())
}
