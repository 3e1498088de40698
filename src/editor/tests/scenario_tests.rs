//! End-to-end editing sessions.

use super::*;
use crate::editor::DrawingState;
use crate::model::{HotspotKind, HotspotStyle, UnitStatus};
use crate::store::{ProjectStore, StoreError};

#[test]
fn test_draw_polygon_then_delete() {
    let mut store = store();
    let mut editor = editor_on(&store, "overview");
    assert!(editor.hotspots().is_empty());

    editor.start_drawing(HotspotKind::Polygon).unwrap();
    editor.end_turn();
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        click(&mut editor, x, y);
    }
    key(&mut editor, KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(editor.hotspots().len(), 1);
    let hotspot = editor.hotspots()[0].clone();
    assert_eq!(hotspot.label, "Area 1");
    assert_eq!(
        hotspot.coordinates(),
        &[c(10.0, 10.0), c(50.0, 10.0), c(50.0, 50.0)]
    );
    assert_eq!(hotspot.style, HotspotStyle::default_for(HotspotKind::Polygon));
    assert_eq!(hotspot.status(), Some(UnitStatus::ForSale));
    assert_eq!(hotspot.view_id, "overview");
    assert_eq!(editor.selected_id(), Some(hotspot.id.as_str()));
    assert_eq!(*editor.drawing_state(), DrawingState::Idle);
    assert!(editor.has_unsaved_changes());

    let request = key(&mut editor, KeyCode::Delete, KeyModifiers::NONE).unwrap();
    assert_eq!(request, Some(EditorRequest::ConfirmDelete(hotspot.id.clone())));
    editor.confirm_delete().unwrap();

    assert!(editor.hotspots().is_empty());
    assert_eq!(editor.selected_id(), None);
    // Back to exactly what was loaded
    assert!(!editor.has_unsaved_changes());

    // Save a polygon, then delete it: unsaved until saved again
    editor.start_drawing(HotspotKind::Polygon).unwrap();
    editor.end_turn();
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        click(&mut editor, x, y);
    }
    editor.finish_drawing().unwrap();
    editor.save(&mut store).unwrap();
    assert!(!editor.has_unsaved_changes());

    key(&mut editor, KeyCode::Backspace, KeyModifiers::NONE).unwrap();
    editor.confirm_delete().unwrap();
    assert!(editor.has_unsaved_changes());
    assert_eq!(store.load_hotspots("overview").unwrap().len(), 1);

    editor.save(&mut store).unwrap();
    assert!(!editor.has_unsaved_changes());
    assert!(store.load_hotspots("overview").unwrap().is_empty());
}

#[test]
fn test_finish_with_two_points_creates_nothing() {
    let store = store();
    let mut editor = editor_on(&store, "overview");

    editor.start_drawing(HotspotKind::Polygon).unwrap();
    editor.end_turn();
    click(&mut editor, 10.0, 10.0);
    click(&mut editor, 50.0, 10.0);

    let result = key(&mut editor, KeyCode::Enter, KeyModifiers::NONE);
    assert!(matches!(result, Err(EditorError::TooFewPoints { count: 2 })));
    assert_eq!(*editor.drawing_state(), DrawingState::Idle);
    assert!(editor.hotspots().is_empty());
    assert!(!editor.can_undo());

    // A fresh attempt with three points succeeds
    editor.start_drawing(HotspotKind::Polygon).unwrap();
    editor.end_turn();
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        click(&mut editor, x, y);
    }
    let id = editor.finish_drawing().unwrap();
    assert_eq!(editor.hotspots().len(), 1);
    assert_eq!(editor.selected_id(), Some(id.as_str()));
}

#[test]
fn test_markers_complete_on_first_click() {
    let store = store();
    let mut editor = editor_on(&store, "overview");

    editor.start_drawing(HotspotKind::Info).unwrap();
    editor.end_turn();
    click(&mut editor, 20.0, 20.0);

    let info = editor.selected().unwrap().clone();
    assert_eq!(info.label, "Info Point 1");
    assert_eq!(info.coordinates(), &[c(20.0, 20.0)]);
    assert_eq!(*editor.drawing_state(), DrawingState::Idle);

    editor.start_drawing(HotspotKind::Camera).unwrap();
    editor.end_turn();
    click(&mut editor, 80.0, 80.0);

    let camera = editor.selected().unwrap().clone();
    assert_eq!(camera.label, "Camera Point 2");
    assert_eq!(camera.style, HotspotStyle::default_for(HotspotKind::Camera));
    assert!(camera.linked_hotspots().unwrap().is_empty());
    assert_ne!(camera.id, info.id);
}

#[test]
fn test_labels_count_existing_hotspots() {
    let store = store();
    let mut editor = editor_on(&store, "facade");

    editor.start_drawing(HotspotKind::Info).unwrap();
    editor.end_turn();
    click(&mut editor, 95.0, 5.0);
    assert_eq!(editor.selected().unwrap().label, "Info Point 4");
}

#[test]
fn test_guard_swallows_opening_click() {
    let mut config = EditorConfig::default();
    config.preferences.drawing_guard_ms = 60_000;
    let store = store();
    let mut editor = editor_with(&config, &store, "overview");

    editor.start_drawing(HotspotKind::Info).unwrap();
    // Same turn as the toolbar click that started drawing
    click(&mut editor, 30.0, 30.0);
    assert!(editor.hotspots().is_empty());
    assert!(matches!(
        editor.drawing_state(),
        DrawingState::Drawing { points, .. } if points.is_empty()
    ));

    click(&mut editor, 30.0, 30.0);
    assert_eq!(editor.hotspots().len(), 1);
}

#[test]
fn test_history_reset_on_view_switch() {
    let store = store();
    let mut editor = editor_on(&store, "facade");

    editor.set_label("p1", "Block A").unwrap();
    editor.set_label("p1", "Block B").unwrap();
    assert!(editor.can_undo());

    editor.start_drawing(HotspotKind::Polygon).unwrap();
    editor.end_turn();
    click(&mut editor, 5.0, 5.0);

    editor.open_view("overview", &store).unwrap();
    assert!(editor.hotspots().is_empty());
    assert!(!editor.can_undo());
    assert_eq!(*editor.drawing_state(), DrawingState::Idle);

    editor.open_view("facade", &store).unwrap();
    assert_eq!(editor.hotspot("p1").unwrap().label, "Area 1");
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(!editor.has_unsaved_changes());
    assert_eq!(editor.selected_id(), None);
}

#[test]
fn test_open_unknown_view_keeps_session() {
    let store = store();
    let mut editor = editor_on(&store, "facade");
    editor.set_label("p1", "Block A").unwrap();

    let result = editor.open_view("missing", &store);
    assert!(matches!(
        result,
        Err(EditorError::Persistence(StoreError::UnknownView { .. }))
    ));
    assert_eq!(editor.view_id(), Some("facade"));
    assert_eq!(editor.hotspot("p1").unwrap().label, "Block A");
}

#[test]
fn test_failed_save_keeps_local_edits() {
    let mut store = store();
    let mut editor = editor_on(&store, "facade");
    editor.set_label("p2", "Penthouse").unwrap();

    store.set_reject_saves(true);
    let err = editor.save(&mut store).unwrap_err();
    assert!(matches!(err, EditorError::Persistence(StoreError::Rejected(_))));
    assert!(!err.is_validation());
    assert!(editor.has_unsaved_changes());
    assert_eq!(editor.hotspot("p2").unwrap().label, "Penthouse");
    assert!(editor.can_undo());

    store.set_reject_saves(false);
    editor.save(&mut store).unwrap();
    assert!(!editor.has_unsaved_changes());
    let saved = store.load_hotspots("facade").unwrap();
    assert_eq!(saved.iter().find(|h| h.id == "p2").unwrap().label, "Penthouse");
}

#[test]
fn test_drawing_requires_open_view() {
    let mut editor = Editor::default();
    assert!(matches!(
        editor.start_drawing(HotspotKind::Polygon),
        Err(EditorError::NoView)
    ));
    let mut store = store();
    assert!(matches!(editor.save(&mut store), Err(EditorError::NoView)));
}

#[test]
fn test_drawing_click_needs_image() {
    let store = store();
    let mut editor = Editor::default();
    editor.open_view("overview", &store).unwrap();
    editor.start_drawing(HotspotKind::Info).unwrap();
    editor.end_turn();

    editor.handle_event(&Event::press(10.0, 10.0)).unwrap();
    let result = editor.handle_event(&Event::release(10.0, 10.0));
    assert!(matches!(result, Err(EditorError::NoImage)));
    assert!(editor.hotspots().is_empty());
}
