//! Editing session tests.
//!
//! Every editor here runs on a 100x100 image fitted into a 100x100 canvas,
//! so screen pixels and percentage coordinates coincide until the view is
//! panned or zoomed.

mod scenario_tests;

use std::collections::BTreeSet;

use hotmap_ui::{Event, KeyCode, KeyModifiers, Size};

use super::{Editor, EditorError, EditorRequest};
use crate::config::EditorConfig;
use crate::model::{
    Coordinate, Hotspot, HotspotLink, HotspotShape, ImageSize, Unit, View, ViewType,
};
use crate::store::{MemoryStore, ProjectData};

fn c(x: f32, y: f32) -> Coordinate {
    Coordinate::new(x, y)
}

/// Overview (empty) with a facade child holding two polygons and a camera.
fn project() -> ProjectData {
    let mut data = ProjectData::new("harbour", "Harbour Front");
    data.views = vec![
        View::new("overview", "harbour", ViewType::Overview, "Overview"),
        View::new("facade", "harbour", ViewType::Facade, "East facade").with_parent("overview"),
    ];
    data.units = vec![
        Unit::new("u1", "harbour", "A 1.01"),
        Unit::new("u2", "harbour", "A 1.02"),
    ];
    data.hotspots = vec![
        Hotspot::polygon(
            "p1",
            "facade",
            "Area 1",
            vec![c(10.0, 10.0), c(50.0, 10.0), c(50.0, 50.0), c(10.0, 50.0)],
        )
        .with_link(HotspotLink::Unit("u1".to_string())),
        Hotspot::polygon(
            "p2",
            "facade",
            "Area 2",
            vec![c(60.0, 60.0), c(90.0, 60.0), c(90.0, 90.0)],
        ),
        Hotspot::new(
            "c1",
            "facade",
            "Camera Point 3",
            HotspotShape::Camera {
                position: c(70.0, 20.0),
                linked_hotspots: BTreeSet::from(["p1".to_string()]),
            },
        ),
    ];
    data
}

fn store() -> MemoryStore {
    MemoryStore::new(project())
}

fn editor_with(config: &EditorConfig, store: &MemoryStore, view_id: &str) -> Editor {
    let mut editor = Editor::new(config);
    editor.set_container(Size::new(100.0, 100.0));
    editor.open_view(view_id, store).unwrap();
    editor.set_image_size(ImageSize::new(100, 100));
    editor
}

fn editor_on(store: &MemoryStore, view_id: &str) -> Editor {
    editor_with(&EditorConfig::default(), store, view_id)
}

/// Press and release at the same spot, then end the event turn.
fn click(editor: &mut Editor, x: f32, y: f32) {
    editor.handle_event(&Event::press(x, y)).unwrap();
    editor.handle_event(&Event::release(x, y)).unwrap();
    editor.end_turn();
}

fn key(
    editor: &mut Editor,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Result<Option<EditorRequest>, EditorError> {
    editor.handle_event(&Event::KeyPressed { key, modifiers })
}

fn coords(editor: &Editor, id: &str) -> Vec<Coordinate> {
    editor.hotspot(id).unwrap().coordinates().to_vec()
}
