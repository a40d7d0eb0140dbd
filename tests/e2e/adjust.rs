use wgpu_3dgs_hotspots::{
    Axis, Event, HotspotAdjuster, HotspotId, IntentOutcome, PointerButton, PointerEvent,
    SceneControl, glam::*,
};

use crate::common::{TestContext, given};

const IN_VIEW: Vec3 = Vec3::new(0.0, 0.0, 5.0);

fn right_click_hotspot(ctx: &mut TestContext) -> HotspotId {
    ctx.select("A");
    let id = ctx
        .editor
        .add(&mut ctx.scene, given::draft_at("Door", IN_VIEW))
        .expect("id");

    let pos = ctx.scene.screen_pos(IN_VIEW);
    assert!(ctx.dispatch(Event::PointerDown(PointerEvent::new(
        pos,
        PointerButton::Secondary,
    ))));

    id
}

#[test]
fn test_adjust_when_right_clicked_should_open_adjuster() {
    let mut ctx = TestContext::new();
    let id = right_click_hotspot(&mut ctx);

    let adjuster = ctx.editor.adjuster();
    assert!(adjuster.is_open());
    assert_eq!(adjuster.current().map(|h| &h.id), Some(&id));
    assert_eq!(adjuster.title().as_deref(), Some("Adjust Hotspot: Door"));
    assert!(ctx.editor.take_navigation_ticket().is_none());
}

#[test]
fn test_adjust_when_edited_should_update_store_and_marker() {
    let mut ctx = TestContext::new();
    let id = right_click_hotspot(&mut ctx);

    let outcome = ctx
        .editor
        .adjust(&mut ctx.scene, |adjuster| adjuster.set_name("Gate"));
    assert!(matches!(outcome, Some(IntentOutcome::Updated(true))));

    ctx.editor.adjust(&mut ctx.scene, |adjuster| {
        adjuster.set_position_axis(Axis::Y, "1.5")
    });
    assert!(
        ctx.editor
            .adjust(&mut ctx.scene, |adjuster| adjuster.set_size("-2"))
            .is_none()
    );

    let hotspot = &ctx.editor.list(&ctx.scene)[0];
    assert_eq!(hotspot.name, "Gate");
    assert_eq!(hotspot.position, Vec3::new(0.0, 1.5, 5.0));
    assert_eq!(hotspot.size, 1.0);

    let marker = ctx.editor.visual_sync().marker(&id).expect("marker");
    assert_eq!(marker.label.text, "Gate");
    assert_eq!(ctx.editor.adjuster().current(), Some(hotspot));
}

#[test]
fn test_adjust_target_options_should_list_assets() {
    let mut ctx = TestContext::new();
    right_click_hotspot(&mut ctx);
    ctx.editor
        .adjust(&mut ctx.scene, |adjuster| adjuster.set_target("B"));

    let options = ctx.editor.adjuster().target_options(&ctx.scene);

    assert_eq!(
        options
            .iter()
            .map(|option| (option.label.as_str(), option.selected))
            .collect::<Vec<_>>(),
        [
            (HotspotAdjuster::NO_TARGET_LABEL, false),
            ("A", false),
            ("B", true)
        ]
    );
    assert_eq!(
        ctx.editor.list(&ctx.scene)[0].target_splat_name.as_deref(),
        Some("B")
    );
}

#[test]
fn test_adjust_when_deleted_should_remove_and_close() {
    let mut ctx = TestContext::new();
    let id = right_click_hotspot(&mut ctx);

    let outcome = ctx.editor.adjust(&mut ctx.scene, HotspotAdjuster::delete);

    assert!(matches!(outcome, Some(IntentOutcome::Removed(true))));
    assert!(!ctx.editor.adjuster().is_open());
    assert!(ctx.editor.visual_sync().marker(&id).is_none());
    assert!(ctx.editor.list(&ctx.scene).is_empty());
}

#[test]
fn test_adjust_when_asset_removed_should_close() {
    let mut ctx = TestContext::new();
    right_click_hotspot(&mut ctx);
    let a = ctx.scene.asset_id("A");

    ctx.scene.assets.retain(|asset| asset.id != a);
    ctx.scene.set_selection(None);
    ctx.dispatch(Event::AssetRemoved(a));

    assert!(!ctx.editor.adjuster().is_open());
}
