use wgpu_3dgs_hotspots::{
    Error, Event, Hotspot, NavigationCoordinator, NavigationState, PointerButton, PointerEvent,
    SceneQuery, glam::*,
};

use crate::common::{TestContext, given};

const IN_VIEW: Vec3 = Vec3::new(0.0, 0.0, 5.0);

fn click_hotspot_with_target(ctx: &mut TestContext, target: Option<&str>) -> bool {
    ctx.select("A");

    let mut draft = given::draft_at("Portal", IN_VIEW);
    draft.target_splat_name = target.map(str::to_owned);
    ctx.editor.add(&mut ctx.scene, draft).expect("id");
    ctx.take_events();

    let pos = ctx.scene.screen_pos(IN_VIEW);
    ctx.dispatch(Event::PointerDown(PointerEvent::new(
        pos,
        PointerButton::Primary,
    )))
}

#[test]
fn test_navigation_when_target_exists_should_switch_then_start_playback() {
    let mut ctx = TestContext::new();
    let a = ctx.scene.asset_id("A");
    let b = ctx.scene.asset_id("B");
    assert!(ctx.scene.is_visible("A"));
    assert!(!ctx.scene.is_visible("B"));

    assert!(click_hotspot_with_target(&mut ctx, Some("B")));

    assert!(!ctx.scene.is_visible("A"));
    assert!(ctx.scene.is_visible("B"));
    assert_eq!(ctx.scene.selection(), Some(b));
    assert_eq!(ctx.editor.navigation().state(), NavigationState::Idle);

    let events = ctx.take_events();
    let position = |expected: &Event| {
        events
            .iter()
            .position(|event| event == expected)
            .expect("event")
    };

    let playback = position(&Event::StartPlayback);
    assert!(position(&Event::AssetVisibilityChanged(a)) < playback);
    assert!(position(&Event::AssetVisibilityChanged(b)) < playback);
    assert!(position(&Event::SelectionChanged(Some(b))) < playback);
    assert_eq!(playback, events.len() - 1);

    let ticket = ctx.editor.take_navigation_ticket().expect("ticket");
    assert_eq!(ticket.target(), b);
    assert_eq!(pollster::block_on(ticket.into_future()).expect("navigated"), b);

    assert_eq!(ctx.editor.visual_sync().current_asset(), Some(b));
    assert!(ctx.editor.visual_sync().markers().is_empty());
}

#[test]
fn test_navigation_when_target_missing_should_leave_scene_unchanged() {
    let mut ctx = TestContext::new();
    let a = ctx.scene.asset_id("A");

    assert!(click_hotspot_with_target(&mut ctx, Some("C")));

    assert!(ctx.scene.is_visible("A"));
    assert!(!ctx.scene.is_visible("B"));
    assert_eq!(ctx.scene.selection(), Some(a));
    assert_eq!(ctx.editor.navigation().state(), NavigationState::Idle);
    assert!(ctx.editor.take_navigation_ticket().is_none());

    let events = ctx.take_events();
    assert!(!events.contains(&Event::StartPlayback));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::AssetVisibilityChanged(_)))
    );
}

#[test]
fn test_navigation_when_target_unset_should_do_nothing() {
    let mut ctx = TestContext::new();

    assert!(click_hotspot_with_target(&mut ctx, None));

    assert!(ctx.scene.is_visible("A"));
    assert!(ctx.editor.take_navigation_ticket().is_none());
    assert!(!ctx.take_events().contains(&Event::StartPlayback));
}

#[test]
fn test_navigation_when_superseded_should_only_settle_latest() {
    let mut scene = given::scene();
    let mut events = Vec::new();
    let mut coordinator = NavigationCoordinator::new();
    let to_a = Hotspot::from_draft(given::door().with_target("A"));
    let to_b = Hotspot::from_draft(given::door().with_target("B"));

    let first = coordinator
        .on_hotspot_clicked(&mut scene, &mut events, &to_b)
        .expect("first");
    let second = coordinator
        .on_hotspot_clicked(&mut scene, &mut events, &to_a)
        .expect("second");

    assert!(matches!(
        first.try_wait(),
        Some(Err(Error::NavigationOneShotReceive(_)))
    ));
    assert!(second.try_wait().is_none());

    assert!(!coordinator.on_settled(&mut events, first.id()));
    assert!(coordinator.on_settled(&mut events, second.id()));
    assert!(!coordinator.on_settled(&mut events, second.id()));

    assert_eq!(second.wait().expect("navigated"), scene.asset_id("A"));
    assert_eq!(
        events
            .iter()
            .filter(|event| **event == Event::StartPlayback)
            .count(),
        1
    );
}
