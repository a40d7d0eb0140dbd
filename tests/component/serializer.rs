use wgpu_3dgs_hotspots::{
    AssetHotspotsDoc, Error, Event, HotspotDoc, HotspotFileDoc, HotspotId, HotspotPatch,
    PopupKind, glam::*,
    serializer::{self, parse_hotspot_file},
};

use crate::common::{TestContext, given};

fn popups(events: &[Event]) -> Vec<(PopupKind, String, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Popup(popup) => Some((popup.kind, popup.header.clone(), popup.message.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_serialize_all_then_deserialize_all_should_restore_collections() {
    let mut ctx = TestContext::new();
    ctx.select("A");
    ctx.editor.add(
        &mut ctx.scene,
        given::door().with_target("B").with_description("Front"),
    );
    ctx.editor.add(
        &mut ctx.scene,
        given::draft_at("Window", Vec3::Z).with_visible(false),
    );
    ctx.select("B");
    ctx.editor
        .add(&mut ctx.scene, given::draft_at("Gate", Vec3::X));

    let docs = ctx.editor.serialize_all(&ctx.scene);
    let json = serde_json::to_string(&docs).expect("json");

    let mut restored = TestContext::new();
    let count = restored
        .editor
        .deserialize_all(&mut restored.scene, serializer::parse_document(&json).expect("docs"));

    assert_eq!(count, 2);
    assert_eq!(
        restored.editor.list_all(&restored.scene),
        ctx.editor.list_all(&ctx.scene)
    );
    assert_eq!(
        restored.take_events(),
        vec![Event::CollectionChanged],
        "restoring emits a single collection change"
    );
}

#[test]
fn test_serialize_all_should_use_camel_case_and_skip_empty_collections() {
    let mut ctx = TestContext::new();
    ctx.select("A");
    ctx.editor
        .add(&mut ctx.scene, given::door().with_target("B"));
    ctx.select("B");
    let id = ctx
        .editor
        .add(&mut ctx.scene, given::draft_at("Gate", Vec3::X))
        .expect("id");
    ctx.editor.remove(&mut ctx.scene, &id);

    let value = serde_json::to_value(ctx.editor.serialize_all(&ctx.scene)).expect("json");

    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["splatName"], "A");
    assert_eq!(value[0]["hotspots"][0]["targetSplatName"], "B");
    assert_eq!(value[0]["hotspots"][0]["position"], serde_json::json!([1.0, 2.0, 3.0]));
}

#[test]
fn test_deserialize_all_when_splat_unknown_should_drop_entry() {
    let mut ctx = TestContext::new();
    let docs = vec![
        AssetHotspotsDoc {
            splat_name: "Missing".to_owned(),
            hotspots: vec![HotspotDoc::from(&wgpu_3dgs_hotspots::Hotspot::from_draft(
                given::door(),
            ))],
        },
        AssetHotspotsDoc {
            splat_name: "B".to_owned(),
            hotspots: Vec::new(),
        },
    ];

    let count = ctx.editor.deserialize_all(&mut ctx.scene, docs);

    assert_eq!(count, 1);
    assert!(ctx.editor.store().is_empty());
}

#[test]
fn test_deserialize_all_when_empty_should_not_emit() {
    let mut ctx = TestContext::new();

    assert_eq!(ctx.editor.deserialize_all(&mut ctx.scene, Vec::new()), 0);
    assert!(ctx.take_events().is_empty());
}

#[test]
fn test_parse_hotspot_file_should_apply_defaults() {
    let hotspots = parse_hotspot_file(given::HOTSPOT_FILE).expect("hotspots");

    assert_eq!(hotspots.len(), 2);
    assert_eq!(hotspots[0].id.as_str(), "hotspot_1704067200000_abcdefghi");
    assert_eq!(hotspots[0].target_splat_name.as_deref(), Some("B"));
    assert_eq!(hotspots[1].size, HotspotDoc::DEFAULT_SIZE);
    assert_eq!(hotspots[1].description, "");
    assert!(hotspots[1].visible);
    assert_ne!(hotspots[1].id, hotspots[0].id);
}

#[test]
fn test_parse_hotspot_file_when_visible_is_not_false_should_be_visible() {
    let contents = r#"{ "hotspots": [
        { "position": [0, 0, 0], "visible": false },
        { "position": [0, 0, 0], "visible": null },
        { "position": [0, 0, 0] }
    ] }"#;

    let visible = parse_hotspot_file(contents)
        .expect("hotspots")
        .iter()
        .map(|hotspot| hotspot.visible)
        .collect::<Vec<_>>();

    assert_eq!(visible, [false, true, true]);
}

#[test]
fn test_parse_hotspot_file_when_entry_invalid_should_report_index() {
    let contents = r#"{ "hotspots": [ { "position": [0, 0, 0] }, { "name": "No position" } ] }"#;

    assert!(matches!(
        parse_hotspot_file(contents),
        Err(Error::InvalidHotspot { index: 1, .. })
    ));
}

#[test]
fn test_import_then_export_should_keep_hotspots_except_generated_ids() {
    let mut ctx = TestContext::new();
    ctx.select("A");
    ctx.editor.add(&mut ctx.scene, given::door());
    ctx.take_events();

    let count = ctx
        .editor
        .import_from_file(&mut ctx.scene, given::HOTSPOT_FILE)
        .expect("import");

    assert_eq!(count, 2);
    assert_eq!(ctx.editor.list(&ctx.scene).len(), 2);
    assert_eq!(
        popups(&ctx.take_events()),
        [(
            PopupKind::Info,
            "Load Succeeded".to_owned(),
            "Loaded 2 hotspots for A".to_owned()
        )]
    );

    let file = ctx.editor.export_to_file(&mut ctx.scene).expect("export");
    assert_eq!(file.file_name, "A_hotspots.json");
    assert_eq!(file.count, 2);

    let exported = serde_json::from_str::<HotspotFileDoc>(&file.contents).expect("file");
    assert_eq!(exported.version, 1);
    assert_eq!(exported.splat_name, "A");

    let imported = serde_json::from_str::<serde_json::Value>(given::HOTSPOT_FILE).expect("json")
        ["hotspots"]
        .as_array()
        .expect("hotspots")
        .iter()
        .map(|entry| serde_json::from_value::<HotspotDoc>(entry.clone()).expect("doc"))
        .collect::<Vec<_>>();

    assert_eq!(exported.hotspots.len(), imported.len());
    for (exported, imported) in exported.hotspots.iter().zip(imported) {
        if imported.id.is_some() {
            assert_eq!(exported.id, imported.id);
        }

        let exported = exported.clone().into_hotspot();
        let imported = imported.into_hotspot();
        assert_eq!(
            wgpu_3dgs_hotspots::Hotspot {
                id: imported.id.clone(),
                ..exported
            },
            imported
        );
    }
}

#[test]
fn test_export_to_file_when_no_selection_or_empty_should_fail_with_popup() {
    let mut ctx = TestContext::new();

    assert!(matches!(
        ctx.editor.export_to_file(&mut ctx.scene),
        Err(Error::NoSelection)
    ));

    ctx.select("A");
    assert!(matches!(
        ctx.editor.export_to_file(&mut ctx.scene),
        Err(Error::EmptyCollection(name)) if name == "A"
    ));

    let popups = popups(&ctx.take_events());
    assert_eq!(popups.len(), 2);
    assert!(
        popups
            .iter()
            .all(|(kind, header, _)| *kind == PopupKind::Error && header == "Save Failed")
    );
}

#[test]
fn test_import_from_file_when_malformed_should_keep_collection() {
    let mut ctx = TestContext::new();
    ctx.select("A");
    let id = ctx.editor.add(&mut ctx.scene, given::door()).expect("id");
    ctx.editor
        .update(&mut ctx.scene, &id, HotspotPatch::new().name("Kept"));
    ctx.take_events();

    assert!(matches!(
        ctx.editor
            .import_from_file(&mut ctx.scene, r#"{ "version": 1 }"#),
        Err(Error::InvalidHotspotFile)
    ));
    assert!(matches!(
        ctx.editor.import_from_file(&mut ctx.scene, "not json"),
        Err(Error::Json(_))
    ));

    let popups = popups(&ctx.take_events());
    assert_eq!(popups[0].2, "Invalid hotspot file format");
    assert!(popups[1].2.starts_with("Failed to parse file: "));
    assert_eq!(ctx.editor.list(&ctx.scene)[0].name, "Kept");
}

#[test]
fn test_parse_hotspot_file_when_id_empty_should_generate_id() {
    let contents = r#"{ "hotspots": [ { "id": "", "position": [0, 0, 0] } ] }"#;

    let hotspots = parse_hotspot_file(contents).expect("hotspots");

    assert_eq!(hotspots.len(), 1);
    assert!(hotspots[0].id.as_str().starts_with(HotspotId::PREFIX));
}

#[test]
fn test_export_then_import_when_size_not_finite_should_use_default_size() {
    let mut ctx = TestContext::new();
    ctx.select("A");
    let id = ctx.editor.add(&mut ctx.scene, given::door()).expect("id");
    ctx.editor
        .update(&mut ctx.scene, &id, HotspotPatch::new().size(f32::NAN));

    let file = ctx.editor.export_to_file(&mut ctx.scene).expect("export");
    let count = ctx
        .editor
        .import_from_file(&mut ctx.scene, &file.contents)
        .expect("import");

    assert_eq!(count, 1);
    let hotspot = &ctx.editor.list(&ctx.scene)[0];
    assert_eq!(hotspot.id, id);
    assert_eq!(hotspot.size, HotspotDoc::DEFAULT_SIZE);
}

#[test]
fn test_deserialize_all_when_one_asset_reloaded_should_keep_collection_order() {
    let mut ctx = TestContext::new();
    ctx.select("A");
    ctx.editor.add(&mut ctx.scene, given::door());
    ctx.select("B");
    ctx.editor
        .add(&mut ctx.scene, given::draft_at("Gate", Vec3::X));

    let docs = ctx.editor.serialize_all(&ctx.scene);
    let reloaded = docs
        .iter()
        .filter(|doc| doc.splat_name == "A")
        .cloned()
        .collect::<Vec<_>>();

    assert_eq!(ctx.editor.deserialize_all(&mut ctx.scene, reloaded), 1);

    let names = ctx
        .editor
        .serialize_all(&ctx.scene)
        .into_iter()
        .map(|doc| doc.splat_name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(ctx.editor.serialize_all(&ctx.scene), docs);
}
