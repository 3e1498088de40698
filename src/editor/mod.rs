//! Hotspot editor session for a single view.
//!
//! The editor owns the undo history of the open view, the drawing state
//! machine, the pointer gesture and the pan/zoom transform. Hosts feed it
//! [`Event`]s and render [`Editor::hotspots_for_render`] plus the handle
//! positions. Persistence and the delete confirmation dialog are host
//! concerns, requested through [`EditorRequest`].
//!
//! Every committed change is one history entry. Drags keep a preview in the
//! pointer state and commit once on release.

mod drawing;
mod error;
mod interaction;

#[cfg(test)]
mod tests;

use std::time::Duration;

use hotmap_ui::constants::MIN_DRAG_DISTANCE;
use hotmap_ui::{EditHistory, Event, KeyCode, KeyModifiers, MouseButton, PanDragState, Point, Size};

pub use drawing::{ClickOutcome, DrawingGuard, DrawingMachine, DrawingState};
pub use error::EditorError;
pub use interaction::{hit_handle, HandleHit, PointerState};

use crate::config::{EditorConfig, Preferences, StyleDefaults};
use crate::geometry;
use crate::keybindings::{EditorAction, KeyBindings};
use crate::model::{
    Coordinate, Hotspot, HotspotId, HotspotKind, HotspotLink, HotspotShape, HotspotStyle,
    ImageSize, UnitStatus, ViewId,
};
use crate::store::ProjectStore;
use crate::transform::Transform;

/// Something the host has to do on the editor's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRequest {
    /// Save shortcut pressed; call [`Editor::save`]
    Save,
    /// Ask the user to confirm deleting this hotspot, then call
    /// [`Editor::confirm_delete`] or [`Editor::cancel_delete`]
    ConfirmDelete(HotspotId),
}

#[derive(Debug)]
pub struct Editor {
    preferences: Preferences,
    keybindings: KeyBindings,
    styles: StyleDefaults,

    view_id: Option<ViewId>,
    history: EditHistory<Vec<Hotspot>>,
    /// Snapshot of the last successful load or save
    saved: Vec<Hotspot>,
    selected: Option<HotspotId>,
    drawing: DrawingMachine,
    pointer: PointerState,
    pending_delete: Option<HotspotId>,
    text_focus: bool,
    next_id: u64,

    transform: Transform,
    image_size: Option<ImageSize>,
    container: Option<Size>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        let preferences = config.preferences.clone();
        Self {
            history: EditHistory::with_limit(Vec::new(), preferences.history_limit),
            drawing: DrawingMachine::new(Duration::from_millis(preferences.drawing_guard_ms)),
            keybindings: config.keybindings.clone(),
            styles: config.styles,
            preferences,
            view_id: None,
            saved: Vec::new(),
            selected: None,
            pointer: PointerState::Idle,
            pending_delete: None,
            text_focus: false,
            next_id: 1,
            transform: Transform::identity(),
            image_size: None,
            container: None,
        }
    }

    // --- Session ---

    /// Open a view for editing, replacing everything about the previous one.
    ///
    /// History, drawing, drag, selection and any pending deletion are reset.
    /// On error the editor is left untouched.
    pub fn open_view(&mut self, view_id: &str, store: &dyn ProjectStore) -> Result<(), EditorError> {
        let hotspots = store.load_hotspots(view_id)?;
        log::info!("Editing view {} ({} hotspots)", view_id, hotspots.len());

        self.view_id = Some(view_id.to_string());
        self.history.reset(hotspots.clone());
        self.saved = hotspots;
        self.selected = None;
        self.drawing.cancel();
        self.pointer = PointerState::Idle;
        self.pending_delete = None;
        self.next_id = 1;
        self.image_size = None;
        self.transform = Transform::identity();
        Ok(())
    }

    pub fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }

    /// Persist the current hotspot set.
    ///
    /// The saved baseline only moves on success; on failure the local edits
    /// and history stay as they are so the save can be retried.
    pub fn save(&mut self, store: &mut dyn ProjectStore) -> Result<(), EditorError> {
        let view_id = self.view_id.as_deref().ok_or(EditorError::NoView)?;
        let current = self.history.current();

        if let Err(e) = store.save_hotspots(view_id, current) {
            log::error!("Saving view {} failed: {}", view_id, e);
            return Err(e.into());
        }
        log::info!("Saved {} hotspots for view {}", current.len(), view_id);
        self.saved = current.clone();
        Ok(())
    }

    /// True when the current snapshot differs from the last saved one.
    pub fn has_unsaved_changes(&self) -> bool {
        *self.history.current() != self.saved
    }

    /// Committed hotspots of the open view.
    pub fn hotspots(&self) -> &[Hotspot] {
        self.history.current()
    }

    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.history.current().iter().find(|h| h.id == id)
    }

    /// Hotspots as they should be drawn, with an in-progress drag applied.
    pub fn hotspots_for_render(&self) -> Vec<Hotspot> {
        self.history
            .current()
            .iter()
            .map(|h| {
                let mut hotspot = h.clone();
                if let Some(preview) = self.pointer.preview_for(&h.id) {
                    hotspot.shape.set_coordinates(preview.to_vec());
                }
                hotspot
            })
            .collect()
    }

    // --- Viewport ---

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn image_size(&self) -> Option<ImageSize> {
        self.image_size
    }

    /// Record the loaded image's size and fit it to the container.
    pub fn set_image_size(&mut self, size: ImageSize) {
        if size.is_empty() {
            log::warn!("Ignoring empty image size {:?}", size);
            return;
        }
        self.image_size = Some(size);
        self.fit_to_container();
    }

    /// Record the canvas size and fit the image to it.
    pub fn set_container(&mut self, size: Size) {
        self.container = Some(size);
        self.fit_to_container();
    }

    /// Reset pan and zoom so the whole image is visible.
    pub fn fit_to_container(&mut self) {
        if let (Some(container), Some(image)) = (self.container, self.image_size) {
            if let Some(transform) = Transform::fit_to_container(container, image) {
                self.transform = transform;
            }
        }
    }

    fn to_percentage(&self, screen: Point) -> Option<Coordinate> {
        let image = self.image_size?;
        self.transform.screen_to_percentage(screen, image)
    }

    fn to_screen(&self, coord: Coordinate) -> Option<Point> {
        let image = self.image_size?;
        Some(self.transform.percentage_to_screen(coord, image))
    }

    // --- Selection ---

    pub fn selected(&self) -> Option<&Hotspot> {
        let id = self.selected.as_deref()?;
        self.hotspot(id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: &str) -> Result<(), EditorError> {
        if self.hotspot(id).is_none() {
            return Err(EditorError::UnknownHotspot(id.to_string()));
        }
        log::debug!("Selected hotspot {}", id);
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if its hotspot is gone from the current snapshot.
    fn sync_selection(&mut self) {
        if let Some(id) = &self.selected {
            if !self.history.current().iter().any(|h| &h.id == id) {
                self.selected = None;
            }
        }
    }

    /// Screen positions of the selected hotspot's vertices, or of its marker.
    pub fn vertex_handles(&self) -> Vec<(usize, Point)> {
        let Some(id) = self.selected.as_deref() else {
            return Vec::new();
        };
        let Some(hotspot) = self.hotspot(id) else {
            return Vec::new();
        };
        let coordinates = self
            .pointer
            .preview_for(id)
            .unwrap_or_else(|| hotspot.coordinates());

        coordinates
            .iter()
            .enumerate()
            .filter_map(|(i, c)| self.to_screen(*c).map(|p| (i, p)))
            .collect()
    }

    /// Screen positions of the edge midpoints of the selected polygon.
    pub fn midpoint_handles(&self) -> Vec<(usize, Point)> {
        let Some(hotspot) = self.selected() else {
            return Vec::new();
        };
        if !hotspot.is_polygon() {
            return Vec::new();
        }
        let coordinates = self
            .pointer
            .preview_for(&hotspot.id)
            .unwrap_or_else(|| hotspot.coordinates());

        geometry::edge_midpoints(coordinates)
            .into_iter()
            .filter_map(|(after, c)| self.to_screen(c).map(|p| (after, p)))
            .collect()
    }

    /// Top-most hotspot under a screen point.
    ///
    /// Markers sit above polygons, later hotspots above earlier ones.
    pub fn hotspot_at(&self, screen: Point) -> Option<&Hotspot> {
        let hotspots = self.history.current();
        let radius = self.preferences.marker_hit_radius;

        let marker = hotspots.iter().rev().filter(|h| h.kind().is_point()).find(|h| {
            h.coordinates()
                .first()
                .and_then(|c| self.to_screen(*c))
                .is_some_and(|p| p.distance_to(screen) <= radius)
        });

        marker.or_else(|| {
            let point = self.to_percentage(screen)?;
            hotspots
                .iter()
                .rev()
                .filter(|h| h.is_polygon())
                .find(|h| geometry::point_in_polygon(point, h.coordinates()))
        })
    }

    // --- Drawing ---

    pub fn drawing_state(&self) -> &DrawingState {
        self.drawing.state()
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    /// Enter drawing mode for a new hotspot; clears the selection.
    pub fn start_drawing(&mut self, kind: HotspotKind) -> Result<(), EditorError> {
        if self.view_id.is_none() {
            return Err(EditorError::NoView);
        }
        self.selected = None;
        self.pointer = PointerState::Idle;
        self.drawing.start(kind);
        Ok(())
    }

    /// Finish the polygon being drawn and select it.
    pub fn finish_drawing(&mut self) -> Result<HotspotId, EditorError> {
        let (kind, coordinates) = self.drawing.finish()?;
        self.create_hotspot(kind, coordinates)
    }

    pub fn cancel_drawing(&mut self) -> bool {
        self.drawing.cancel()
    }

    /// Mark the end of an event-processing turn.
    pub fn end_turn(&mut self) {
        self.drawing.end_turn();
    }

    fn create_hotspot(
        &mut self,
        kind: HotspotKind,
        coordinates: Vec<Coordinate>,
    ) -> Result<HotspotId, EditorError> {
        let view_id = self.view_id.clone().ok_or(EditorError::NoView)?;
        let shape = HotspotShape::from_drawing(kind, coordinates)
            .ok_or(EditorError::TooFewPoints { count: 0 })?;

        let id = self.generate_id(&view_id);
        let label = kind.default_label(self.history.current().len() + 1);
        let hotspot =
            Hotspot::new(id.clone(), view_id, label, shape).with_style(self.styles.for_kind(kind));

        log::info!("Created {} {} ({})", kind.name(), hotspot.label, id);
        self.history.push_with(|current| {
            let mut next = current.clone();
            next.push(hotspot);
            next
        });
        self.selected = Some(id.clone());
        Ok(id)
    }

    fn generate_id(&mut self, view_id: &str) -> HotspotId {
        loop {
            let candidate = format!("{}-hs-{}", view_id, self.next_id);
            self.next_id += 1;
            if self.hotspot(&candidate).is_none() {
                return candidate;
            }
        }
    }

    // --- Property edits ---

    /// Apply an edit to one hotspot as a single history entry.
    fn apply_edit<F>(&mut self, id: &str, description: &str, edit: F) -> Result<(), EditorError>
    where
        F: FnOnce(&mut Hotspot, &[Hotspot]) -> Result<(), EditorError>,
    {
        let current = self.history.current();
        let index = current
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| EditorError::UnknownHotspot(id.to_string()))?;

        let mut hotspot = current[index].clone();
        edit(&mut hotspot, current)?;
        if hotspot == current[index] {
            log::trace!("{} on {} changed nothing", description, id);
            return Ok(());
        }

        let mut next = current.clone();
        next[index] = hotspot;
        self.history.push(next);
        log::debug!("📝 {}: {}", description, id);
        Ok(())
    }

    pub fn set_label(&mut self, id: &str, label: impl Into<String>) -> Result<(), EditorError> {
        let label = label.into();
        self.apply_edit(id, "Rename", |hotspot, _| {
            hotspot.label = label;
            Ok(())
        })
    }

    /// Set the sale status of a polygon.
    pub fn set_status(&mut self, id: &str, status: UnitStatus) -> Result<(), EditorError> {
        self.apply_edit(id, "Set status", |hotspot, _| match &mut hotspot.shape {
            HotspotShape::Polygon { status: s, .. } => {
                *s = status;
                Ok(())
            }
            _ => Err(EditorError::WrongKind {
                id: hotspot.id.clone(),
                expected: HotspotKind::Polygon,
            }),
        })
    }

    /// Set color and opacity; opacity is clamped to `[0, 1]`.
    pub fn set_style(&mut self, id: &str, color: [u8; 3], opacity: f32) -> Result<(), EditorError> {
        self.apply_edit(id, "Restyle", |hotspot, _| {
            hotspot.style = HotspotStyle::new(color, opacity);
            Ok(())
        })
    }

    /// Set the link target, replacing any previous one.
    ///
    /// A unit can only be linked from one hotspot per view.
    pub fn set_link(&mut self, id: &str, link: HotspotLink) -> Result<(), EditorError> {
        self.apply_edit(id, "Link", |hotspot, all| {
            if let Some(unit_id) = link.unit_id() {
                if let Some(other) = all
                    .iter()
                    .find(|h| h.id != hotspot.id && h.link.unit_id() == Some(unit_id))
                {
                    return Err(EditorError::UnitAlreadyLinked {
                        unit_id: unit_id.clone(),
                        hotspot_id: other.id.clone(),
                    });
                }
            }
            hotspot.link = link;
            Ok(())
        })
    }

    /// Add or remove a polygon from a camera's highlight set.
    pub fn toggle_camera_link(&mut self, camera_id: &str, target_id: &str) -> Result<(), EditorError> {
        self.apply_edit(camera_id, "Toggle camera link", |camera, all| {
            let target_is_polygon = all
                .iter()
                .any(|h| h.id == target_id && h.is_polygon());
            if target_id == camera.id || !target_is_polygon {
                return Err(EditorError::InvalidCameraLink {
                    camera_id: camera.id.clone(),
                    target_id: target_id.to_string(),
                });
            }

            match &mut camera.shape {
                HotspotShape::Camera {
                    linked_hotspots, ..
                } => {
                    if !linked_hotspots.remove(target_id) {
                        linked_hotspots.insert(target_id.to_string());
                    }
                    Ok(())
                }
                _ => Err(EditorError::WrongKind {
                    id: camera.id.clone(),
                    expected: HotspotKind::Camera,
                }),
            }
        })
    }

    /// Move an info or camera marker.
    pub fn move_point(&mut self, id: &str, position: Coordinate) -> Result<(), EditorError> {
        self.apply_edit(id, "Move marker", |hotspot, _| match &mut hotspot.shape {
            HotspotShape::Info { position: p } | HotspotShape::Camera { position: p, .. } => {
                *p = position.clamped();
                Ok(())
            }
            HotspotShape::Polygon { .. } => Err(EditorError::WrongKind {
                id: hotspot.id.clone(),
                expected: HotspotKind::Info,
            }),
        })
    }

    /// Delete a vertex of a polygon. Refused at three vertices.
    pub fn remove_vertex(&mut self, id: &str, index: usize) -> Result<(), EditorError> {
        self.apply_edit(id, "Remove vertex", |hotspot, _| {
            if !hotspot.is_polygon() {
                return Err(EditorError::WrongKind {
                    id: hotspot.id.clone(),
                    expected: HotspotKind::Polygon,
                });
            }
            let vertices = geometry::remove_vertex(hotspot.coordinates(), index)?;
            hotspot.shape.set_coordinates(vertices);
            Ok(())
        })
    }

    /// Delete a hotspot and drop it from every camera highlight set.
    pub fn delete_hotspot(&mut self, id: &str) -> Result<(), EditorError> {
        if self.hotspot(id).is_none() {
            return Err(EditorError::UnknownHotspot(id.to_string()));
        }

        self.history.push_with(|current| {
            current
                .iter()
                .filter(|h| h.id != id)
                .cloned()
                .map(|mut h| {
                    if let HotspotShape::Camera {
                        linked_hotspots, ..
                    } = &mut h.shape
                    {
                        linked_hotspots.remove(id);
                    }
                    h
                })
                .collect()
        });
        log::info!("Deleted hotspot {}", id);
        self.sync_selection();
        Ok(())
    }

    // --- Delete confirmation ---

    /// Ask for deletion of the selected hotspot.
    pub fn request_delete(&mut self) -> Option<EditorRequest> {
        let id = self.selected.clone()?;
        self.pending_delete = Some(id.clone());
        Some(EditorRequest::ConfirmDelete(id))
    }

    /// The hotspot awaiting delete confirmation, if the dialog is open.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn confirm_delete(&mut self) -> Result<(), EditorError> {
        match self.pending_delete.take() {
            Some(id) => self.delete_hotspot(&id),
            None => Ok(()),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // --- History ---

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Gestures in progress block undo and redo.
    fn gesture_active(&self) -> bool {
        self.drawing.is_drawing() || !self.pointer.is_idle()
    }

    pub fn undo(&mut self) -> bool {
        if self.gesture_active() {
            log::debug!("Undo ignored during an active gesture");
            return false;
        }
        let undone = self.history.undo();
        if undone {
            log::debug!("⏪ Undo ({} left)", self.history.undo_count());
            self.sync_selection();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        if self.gesture_active() {
            log::debug!("Redo ignored during an active gesture");
            return false;
        }
        let redone = self.history.redo();
        if redone {
            log::debug!("⏩ Redo ({} left)", self.history.redo_count());
            self.sync_selection();
        }
        redone
    }

    /// Escape: cancel the drag, else the drawing, else the selection.
    /// A pending press is dropped too, so its release does nothing.
    pub fn cancel(&mut self) {
        let was_dragging = self.pointer.is_dragging();
        if !self.pointer.is_idle() {
            log::debug!("Gesture cancelled");
            self.pointer = PointerState::Idle;
        }
        if was_dragging {
            return;
        }
        if !self.drawing.cancel() {
            self.selected = None;
        }
    }

    // --- Events ---

    /// Keyboard shortcuts are suppressed while a text field has focus.
    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    /// Feed one input event.
    pub fn handle_event(&mut self, event: &Event) -> Result<Option<EditorRequest>, EditorError> {
        match event {
            Event::MouseWheel { delta, position } => {
                let factor = self.preferences.zoom_step.powf(*delta);
                self.transform = self.transform.zoom_at(*position, factor);
                log::trace!("Zoom to {:.2}", self.transform.scale);
                Ok(None)
            }
            _ if self.pending_delete.is_some() => {
                log::trace!("Input ignored while the delete dialog is open");
                Ok(None)
            }
            Event::MousePressed {
                button: MouseButton::Left,
                position,
                modifiers,
            } => self.pointer_pressed(*position, *modifiers).map(|_| None),
            Event::MouseMoved { position } => {
                self.pointer_moved(*position);
                Ok(None)
            }
            Event::MouseReleased {
                button: MouseButton::Left,
                position,
            } => self.pointer_released(*position).map(|_| None),
            Event::KeyPressed { key, modifiers } => self.key_pressed(*key, *modifiers),
            Event::MousePressed { .. } | Event::MouseReleased { .. } => Ok(None),
        }
    }

    fn key_pressed(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<Option<EditorRequest>, EditorError> {
        if self.text_focus {
            return Ok(None);
        }
        let Some(action) = self.keybindings.action_for(key, modifiers) else {
            return Ok(None);
        };
        log::trace!("Key action {}", action.name());

        match action {
            EditorAction::Undo => {
                self.undo();
            }
            EditorAction::Redo => {
                self.redo();
            }
            EditorAction::Save => return Ok(Some(EditorRequest::Save)),
            EditorAction::Delete => {
                if !self.gesture_active() {
                    return Ok(self.request_delete());
                }
            }
            EditorAction::Finish => {
                if self.drawing.kind() == Some(HotspotKind::Polygon) && self.pointer.is_idle() {
                    self.finish_drawing()?;
                }
            }
            EditorAction::Cancel => self.cancel(),
        }
        Ok(None)
    }

    fn pointer_pressed(&mut self, position: Point, modifiers: KeyModifiers) -> Result<(), EditorError> {
        if !self.pointer.is_idle() {
            log::warn!("Pointer pressed during {:?}, resetting gesture", self.pointer);
            self.pointer = PointerState::Idle;
        }

        if self.drawing.is_drawing() {
            self.pointer = if self.drawing.is_armed() {
                log::debug!("Press belongs to the gesture that started drawing");
                PointerState::Suppressed
            } else {
                PointerState::DrawingClick
            };
            return Ok(());
        }

        let hit = hit_handle(
            position,
            &self.vertex_handles(),
            &self.midpoint_handles(),
            self.preferences.handle_hit_radius,
        );
        if let Some(hit) = hit {
            return self.begin_handle_drag(hit, modifiers);
        }

        if let Some(hotspot) = self.hotspot_at(position) {
            self.pointer = PointerState::PressedOnHotspot {
                id: hotspot.id.clone(),
                origin: position,
            };
            return Ok(());
        }

        let mut drag = PanDragState::default();
        drag.start_drag(position);
        self.pointer = PointerState::Panning { drag, moved: false };
        Ok(())
    }

    fn begin_handle_drag(&mut self, hit: HandleHit, modifiers: KeyModifiers) -> Result<(), EditorError> {
        let Some(hotspot) = self.selected() else {
            return Ok(());
        };
        let id = hotspot.id.clone();
        let vertices = hotspot.coordinates().to_vec();

        match hit {
            HandleHit::Vertex(index) if modifiers.alt && hotspot.is_polygon() => {
                self.remove_vertex(&id, index)
            }
            HandleHit::Vertex(index) => {
                self.pointer = PointerState::DraggingVertex {
                    hotspot_id: id,
                    vertex_index: index,
                    preview: vertices,
                    inserted: false,
                    moved: false,
                };
                Ok(())
            }
            HandleHit::Midpoint { after } => {
                let Some((_, position)) = geometry::edge_midpoints(&vertices)
                    .into_iter()
                    .find(|(i, _)| *i == after)
                else {
                    log::warn!("Midpoint {} missing on {}", after, id);
                    return Ok(());
                };
                let preview = geometry::insert_vertex(&vertices, after, position)?;
                log::debug!("Inserted vertex after {} on {}", after, id);
                self.pointer = PointerState::DraggingVertex {
                    hotspot_id: id,
                    vertex_index: after + 1,
                    preview,
                    inserted: true,
                    moved: false,
                };
                Ok(())
            }
        }
    }

    fn pointer_moved(&mut self, position: Point) {
        let target = self.to_percentage(position);

        match &mut self.pointer {
            PointerState::DraggingVertex {
                hotspot_id,
                vertex_index,
                preview,
                moved,
                ..
            } => {
                let Some(coord) = target else {
                    return;
                };
                match preview.get_mut(*vertex_index) {
                    Some(vertex) => {
                        *vertex = coord.clamped();
                        *moved = true;
                    }
                    None => log::warn!(
                        "Vertex {} out of range on {} ({} vertices)",
                        vertex_index,
                        hotspot_id,
                        preview.len()
                    ),
                }
            }
            PointerState::Panning { drag, moved } => {
                if let Some((dx, dy)) = drag.update_drag(position) {
                    self.transform = self.transform.pan_by(dx, dy);
                    *moved = true;
                }
            }
            PointerState::PressedOnHotspot { origin, .. } => {
                if origin.distance_to(position) >= MIN_DRAG_DISTANCE {
                    let mut drag = PanDragState::default();
                    drag.start_drag(*origin);
                    if let Some((dx, dy)) = drag.update_drag(position) {
                        self.transform = self.transform.pan_by(dx, dy);
                    }
                    self.pointer = PointerState::Panning { drag, moved: true };
                }
            }
            PointerState::Idle | PointerState::Suppressed | PointerState::DrawingClick => {}
        }
    }

    fn pointer_released(&mut self, position: Point) -> Result<(), EditorError> {
        match std::mem::take(&mut self.pointer) {
            PointerState::DrawingClick => {
                let coord = self.to_percentage(position).ok_or(EditorError::NoImage)?;
                match self.drawing.click(coord.clamped()) {
                    ClickOutcome::Completed { kind, coordinates } => {
                        self.create_hotspot(kind, coordinates)?;
                    }
                    ClickOutcome::Added(_) | ClickOutcome::Suppressed | ClickOutcome::Ignored => {}
                }
                Ok(())
            }
            PointerState::DraggingVertex {
                hotspot_id,
                preview,
                inserted,
                moved,
                ..
            } => {
                if !(moved || inserted) {
                    return Ok(());
                }
                self.apply_edit(&hotspot_id, "Drag vertex", |hotspot, _| {
                    hotspot.shape.set_coordinates(preview);
                    Ok(())
                })
            }
            PointerState::PressedOnHotspot { id, .. } => self.select(&id),
            PointerState::Panning { moved: false, .. } => {
                self.selected = None;
                Ok(())
            }
            PointerState::Panning { moved: true, .. }
            | PointerState::Suppressed
            | PointerState::Idle => Ok(()),
        }
    }
}
