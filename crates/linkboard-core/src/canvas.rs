//! Canvas document and state management.

use crate::config::CanvasConfig;
use crate::input::{MouseButton, Modifiers, PointerEvent};
use crate::shapes::{Connector, ConnectorGeometry, ConnectorId, ShapeId, TextBox};
use crate::storage::codec;
use kurbo::{Point, Rect};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by canvas operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("no shape with id {0}")]
    InvalidReference(ShapeId),
    #[error("no connector with id {0}")]
    UnknownConnector(ConnectorId),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

/// Shapes and connectors of one canvas.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    shapes: HashMap<ShapeId, TextBox>,
    /// Creation order of shapes (back to front).
    order: Vec<ShapeId>,
    /// Connectors in creation order.
    connectors: Vec<Connector>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the others.
    pub fn insert_shape(&mut self, shape: TextBox) -> ShapeId {
        let id = shape.id();
        self.order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape. Connectors are left alone; see `Canvas::remove_shape`.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<TextBox> {
        self.order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&TextBox> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut TextBox> {
        self.shapes.get_mut(&id)
    }

    /// Shapes in creation order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &TextBox> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn shape_ids(&self) -> &[ShapeId] {
        &self.order
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub(crate) fn push_connector(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    pub fn remove_connector(&mut self, id: ConnectorId) -> Option<Connector> {
        let index = self.connectors.iter().position(|c| c.id() == id)?;
        Some(self.connectors.remove(index))
    }

    /// Drop every connector attached to `shape`. Returns how many went.
    pub fn remove_connectors_for(&mut self, shape: ShapeId) -> usize {
        let before = self.connectors.len();
        self.connectors.retain(|c| !c.references(shape));
        before - self.connectors.len()
    }

    /// Frontmost shape whose body contains `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.contains(point)))
    }

    /// Frontmost shape whose resize handle contains `point`.
    pub fn handle_at(&self, point: Point) -> Option<ShapeId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.handle_contains(point)))
    }

    /// Union of all shape rectangles.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes_ordered()
            .map(TextBox::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Remove all shapes and connectors.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
        self.connectors.clear();
    }
}

/// A document plus the state needed to edit it interactively.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: CanvasDocument,
    config: CanvasConfig,
    /// Scrollable area. Only ever grows, except on `clear`/`deserialize`.
    extent: Rect,
    /// Pointer position of the press that started the current gesture.
    press_origin: Option<Point>,
    /// The single shape allowed to be editing its label.
    editing: Option<ShapeId>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            extent: config.min_extent.abs(),
            config,
            press_origin: None,
            editing: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Add a default box at the configured default position.
    pub fn add_shape(&mut self) -> ShapeId {
        self.add_shape_at(self.config.default_position)
    }

    /// Add a default box with its top-left corner at `position`.
    pub fn add_shape_at(&mut self, position: Point) -> ShapeId {
        let shape = TextBox::new(
            position,
            self.config.initial_size(),
            self.config.default_label.clone(),
        );
        self.insert_shape(shape)
    }

    /// Add an already built box. It arrives idle; editing goes through
    /// `begin_edit`.
    pub fn insert_shape(&mut self, mut shape: TextBox) -> ShapeId {
        shape.reset_mode();
        shape.relayout(&self.config.text);
        let id = self.document.insert_shape(shape);
        log::debug!("added shape {id}");
        self.recompute_extent();
        id
    }

    /// Connect `source` to `target`. Both must exist.
    pub fn add_connector(
        &mut self,
        source: ShapeId,
        target: ShapeId,
    ) -> Result<ConnectorId, CanvasError> {
        for id in [source, target] {
            if self.document.get_shape(id).is_none() {
                log::warn!("rejected connector {source} -> {target}: shape {id} not found");
                return Err(CanvasError::InvalidReference(id));
            }
        }
        let connector = Connector::new(source, target);
        let id = connector.id();
        self.document.push_connector(connector);
        log::debug!("added connector {id} ({source} -> {target})");
        Ok(id)
    }

    /// Remove a shape and every connector attached to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<TextBox> {
        let shape = self.document.remove_shape(id)?;
        let dropped = self.document.remove_connectors_for(id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        log::debug!("removed shape {id} and {dropped} connector(s)");
        Some(shape)
    }

    pub fn remove_connector(&mut self, id: ConnectorId) -> bool {
        let removed = self.document.remove_connector(id).is_some();
        if removed {
            log::debug!("removed connector {id}");
        }
        removed
    }

    /// Remove every selected shape. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let selected = self.selected();
        for &id in &selected {
            self.remove_shape(id);
        }
        selected.len()
    }

    /// Drop connectors whose shapes no longer exist.
    pub fn prune_connectors(&mut self) -> usize {
        let dangling: Vec<ConnectorId> = self
            .document
            .connectors()
            .iter()
            .filter(|c| !c.is_valid(&self.document))
            .map(Connector::id)
            .collect();
        for &id in &dangling {
            log::warn!("pruning dangling connector {id}");
            self.document.remove_connector(id);
        }
        dangling.len()
    }

    /// Grow the extent to cover every shape.
    pub fn recompute_extent(&mut self) {
        let mut extent = self.extent.union(self.config.min_extent.abs());
        if let Some(bounds) = self.document.bounds() {
            extent = extent.union(bounds);
        }
        if extent != self.extent {
            log::trace!("extent grew to {extent:?}");
        }
        self.extent = extent;
    }

    pub fn extent(&self) -> Rect {
        self.extent
    }

    pub fn shape(&self, id: ShapeId) -> Option<&TextBox> {
        self.document.get_shape(id)
    }

    /// Shapes in creation order.
    pub fn shapes(&self) -> impl Iterator<Item = &TextBox> {
        self.document.shapes_ordered()
    }

    pub fn connectors(&self) -> &[Connector] {
        self.document.connectors()
    }

    /// Current drawing geometry of one connector.
    pub fn connector_geometry(&self, id: ConnectorId) -> Result<ConnectorGeometry, CanvasError> {
        let connector = self
            .document
            .connectors()
            .iter()
            .find(|c| c.id() == id)
            .ok_or(CanvasError::UnknownConnector(id))?;
        connector.geometry(&self.document, &self.config.connector)
    }

    /// Geometry of every drawable connector. Dangling ones are skipped.
    pub fn connector_geometries(&self) -> Vec<(ConnectorId, ConnectorGeometry)> {
        self.document
            .connectors()
            .iter()
            .filter_map(|c| match c.geometry(&self.document, &self.config.connector) {
                Ok(geometry) => Some((c.id(), geometry)),
                Err(err) => {
                    log::warn!("skipping connector {}: {err}", c.id());
                    None
                }
            })
            .collect()
    }

    /// Frontmost shape under `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.document.shape_at(point)
    }

    pub fn handle_region_contains(&self, id: ShapeId, point: Point) -> bool {
        self.shape(id).is_some_and(|s| s.handle_contains(point))
    }

    /// Select a shape (clears previous selection).
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.shape(id).is_none() {
            return false;
        }
        self.clear_selection();
        self.add_to_selection(id)
    }

    pub fn add_to_selection(&mut self, id: ShapeId) -> bool {
        match self.document.get_shape_mut(id) {
            Some(shape) => {
                shape.set_selected(true);
                true
            }
            None => false,
        }
    }

    pub fn toggle_selection(&mut self, id: ShapeId) -> bool {
        match self.document.get_shape_mut(id) {
            Some(shape) => {
                shape.toggle_selected();
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        for id in self.document.shape_ids().to_vec() {
            if let Some(shape) = self.document.get_shape_mut(id) {
                shape.set_selected(false);
            }
        }
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.shape(id).is_some_and(TextBox::is_selected)
    }

    /// Selected shape ids in creation order.
    pub fn selected(&self) -> Vec<ShapeId> {
        self.shapes()
            .filter(|s| s.is_selected())
            .map(TextBox::id)
            .collect()
    }

    /// Move a shape's top-left corner. False if missing or mid resize/edit.
    pub fn move_shape(&mut self, id: ShapeId, position: Point) -> bool {
        let moved = self
            .document
            .get_shape_mut(id)
            .is_some_and(|s| s.move_to(position));
        if moved {
            log::debug!("moved shape {id} to {position:?}");
            self.recompute_extent();
        }
        moved
    }

    /// Open a shape's label for editing, closing any other editor first.
    pub fn begin_edit(&mut self, id: ShapeId) -> bool {
        if self.shape(id).is_none() {
            return false;
        }
        if self.editing.is_some_and(|current| current != id) {
            self.cancel_edit();
        }
        let started = self
            .document
            .get_shape_mut(id)
            .is_some_and(TextBox::begin_edit);
        if started {
            self.editing = Some(id);
            log::debug!("editing shape {id}");
        }
        started
    }

    /// Apply `text` to the shape being edited. Empty text cancels.
    pub fn commit_edit(&mut self, text: &str) -> bool {
        let Some(id) = self.editing.take() else {
            return false;
        };
        let changed = match self.document.get_shape_mut(id) {
            Some(shape) => shape.commit_edit(text, &self.config.text),
            None => false,
        };
        if changed {
            log::debug!("committed label for shape {id}");
            self.recompute_extent();
        }
        changed
    }

    pub fn cancel_edit(&mut self) -> bool {
        let Some(id) = self.editing.take() else {
            return false;
        };
        self.document
            .get_shape_mut(id)
            .is_some_and(TextBox::cancel_edit)
    }

    pub fn editing_shape(&self) -> Option<ShapeId> {
        self.editing
    }

    /// Feed one gesture step into the canvas.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press {
                position,
                button,
                modifiers,
            } => self.on_press(position, button, modifiers),
            PointerEvent::Move { position } => self.on_move(position),
            PointerEvent::Release { .. } => self.end_gestures(),
            PointerEvent::DoubleClick { position } => self.on_double_click(position),
            PointerEvent::FocusLost => {
                self.cancel_edit();
            }
        }
    }

    fn on_press(&mut self, position: Point, button: MouseButton, modifiers: Modifiers) {
        if button != MouseButton::Left {
            return;
        }

        // Handles win over bodies, even of shapes drawn above.
        if let Some(id) = self.document.handle_at(position) {
            let started = self
                .document
                .get_shape_mut(id)
                .is_some_and(|s| s.begin_resize(position));
            if started {
                self.press_origin = Some(position);
                log::debug!("resizing shape {id}");
            }
            return;
        }

        let extend = modifiers.extends_selection();
        let Some(hit) = self.shape_at(position) else {
            if !extend {
                self.clear_selection();
            }
            return;
        };

        // A plain press always leaves the hit shape selected; only
        // Ctrl/Shift toggles it.
        if extend {
            self.toggle_selection(hit);
        } else {
            self.select(hit);
        }

        for id in self.selected() {
            if let Some(shape) = self.document.get_shape_mut(id) {
                shape.begin_drag();
            }
        }
        self.press_origin = Some(position);
    }

    fn on_move(&mut self, position: Point) {
        let Some(origin) = self.press_origin else {
            return;
        };
        let delta = position - origin;
        let Self {
            document, config, ..
        } = self;
        for id in document.shape_ids().to_vec() {
            let Some(shape) = document.get_shape_mut(id) else {
                continue;
            };
            if shape.update_resize(delta) {
                shape.relayout(&config.text);
            } else {
                shape.drag_by(delta);
            }
        }
        self.recompute_extent();
    }

    fn end_gestures(&mut self) {
        if self.press_origin.take().is_none() {
            return;
        }
        for id in self.document.shape_ids().to_vec() {
            if let Some(shape) = self.document.get_shape_mut(id) {
                shape.finish_gesture();
            }
        }
        self.recompute_extent();
    }

    fn on_double_click(&mut self, position: Point) {
        // A double-click arrives mid-press; close that gesture first.
        self.end_gestures();
        if self.document.handle_at(position).is_some() {
            return;
        }
        if let Some(id) = self.shape_at(position) {
            self.begin_edit(id);
        }
    }

    /// Encode all shapes as a pretty-printed JSON document.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        codec::encode(self.shapes())
    }

    /// Replace all content with the shapes in `json`.
    ///
    /// The whole document is validated before anything changes, so a
    /// malformed document leaves the canvas untouched.
    pub fn deserialize(&mut self, json: &str) -> Result<usize, CanvasError> {
        let shapes = codec::decode(json)?;
        let count = shapes.len();
        self.clear();
        for shape in shapes {
            self.insert_shape(shape);
        }
        Ok(count)
    }

    /// Remove all content and reset the extent.
    pub fn clear(&mut self) {
        self.document.clear();
        self.press_origin = None;
        self.editing = None;
        self.extent = self.config.min_extent.abs();
        log::debug!("canvas cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::on_boundary;
    use kurbo::{Size, Vec2};

    const EPS: f64 = 1e-6;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }

    fn press_with(position: Point, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::Press {
            position,
            button: MouseButton::Left,
            modifiers,
        }
    }

    fn drag(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.handle_pointer_event(PointerEvent::press(from));
        canvas.handle_pointer_event(PointerEvent::Move { position: to });
        canvas.handle_pointer_event(PointerEvent::Release { position: to });
    }

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.bounds(), None);
    }

    #[test]
    fn test_shape_at_prefers_front() {
        let mut doc = CanvasDocument::new();
        let back = doc.insert_shape(TextBox::new(Point::ZERO, Size::new(100.0, 100.0), "a"));
        let front = doc.insert_shape(TextBox::new(Point::new(50.0, 50.0), Size::new(100.0, 100.0), "b"));

        assert_eq!(doc.shape_at(Point::new(75.0, 75.0)), Some(front));
        assert_eq!(doc.shape_at(Point::new(25.0, 25.0)), Some(back));
        assert_eq!(doc.shape_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_add_shape_defaults() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        let shape = canvas.shape(id).unwrap();

        assert_eq!(shape.position(), Point::ZERO);
        assert_eq!(shape.text(), "Edit me");
        assert!(shape.size().width >= 100.0);
        assert!(shape.size().height >= 50.0);
        assert!(!shape.lines().is_empty());
        assert_eq!(canvas.extent(), Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_add_connector_rejects_unknown_shape() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let ghost = uuid::Uuid::new_v4();

        assert_eq!(
            canvas.add_connector(a, ghost),
            Err(CanvasError::InvalidReference(ghost))
        );
        assert_eq!(
            canvas.add_connector(ghost, a),
            Err(CanvasError::InvalidReference(ghost))
        );
        assert!(canvas.connectors().is_empty());
    }

    #[test]
    fn test_connector_follows_moved_shape() {
        let mut canvas = Canvas::new();
        let s1 = canvas.add_shape();
        let s2 = canvas.add_shape();
        let c = canvas.add_connector(s1, s2).unwrap();

        let target = canvas.shape(s2).unwrap().position() + Vec2::new(50.0, 0.0);
        assert!(canvas.move_shape(s2, target));

        let geometry = canvas.connector_geometry(c).unwrap();
        assert!(on_boundary(geometry.start, canvas.shape(s1).unwrap().bounds(), EPS));
        assert!(on_boundary(geometry.end, canvas.shape(s2).unwrap().bounds(), EPS));
    }

    #[test]
    fn test_connector_geometry_unknown_id() {
        let canvas = Canvas::new();
        let id = uuid::Uuid::new_v4();
        assert_eq!(
            canvas.connector_geometry(id),
            Err(CanvasError::UnknownConnector(id))
        );
    }

    #[test]
    fn test_remove_shape_cascades_connectors() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(300.0, 0.0));
        let c = canvas.add_shape_at(Point::new(0.0, 300.0));
        canvas.add_connector(a, b).unwrap();
        canvas.add_connector(b, c).unwrap();
        let kept = canvas.add_connector(a, c).unwrap();

        assert!(canvas.remove_shape(b).is_some());
        assert_eq!(canvas.shapes().count(), 2);
        assert_eq!(canvas.connectors().len(), 1);
        assert_eq!(canvas.connectors()[0].id(), kept);
        assert!(canvas.remove_shape(b).is_none());
    }

    #[test]
    fn test_delete_shape_with_one_connector() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.add_connector(a, b).unwrap();

        canvas.select(a);
        assert_eq!(canvas.remove_selected(), 1);
        assert_eq!(canvas.shapes().count(), 1);
        assert!(canvas.connectors().is_empty());
    }

    #[test]
    fn test_prune_connectors_drops_dangling() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.add_connector(a, b).unwrap();

        // Bypass the cascading removal.
        canvas.document.remove_shape(b);
        assert!(canvas.connector_geometries().is_empty());
        assert_eq!(canvas.prune_connectors(), 1);
        assert!(canvas.connectors().is_empty());
    }

    #[test]
    fn test_remove_connector() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        let c = canvas.add_connector(a, b).unwrap();

        assert!(canvas.remove_connector(c));
        assert!(!canvas.remove_connector(c));
        assert_eq!(canvas.shapes().count(), 2);
    }

    #[test]
    fn test_extent_contains_shapes_and_never_shrinks() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        let moves = [
            Point::new(900.0, 40.0),
            Point::new(-300.0, -200.0),
            Point::new(10.0, 10.0),
            Point::new(400.0, 1200.0),
        ];
        let mut previous = canvas.extent();
        for position in moves {
            assert!(canvas.move_shape(id, position));
            let extent = canvas.extent();
            assert_eq!(extent.union(canvas.shape(id).unwrap().bounds()), extent);
            assert_eq!(extent.union(previous), extent);
            previous = extent;
        }
        assert_eq!(canvas.extent(), Rect::new(-300.0, -200.0, 1000.0, 1250.0));
    }

    #[test]
    fn test_clear_resets_extent() {
        let mut canvas = Canvas::new();
        canvas.add_shape_at(Point::new(2000.0, 2000.0));
        assert!(canvas.extent().x1 > 640.0);
        canvas.clear();
        assert_eq!(canvas.extent(), Rect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(canvas.shapes().count(), 0);
    }

    #[test]
    fn test_press_selects_and_drags() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();

        drag(&mut canvas, Point::new(20.0, 20.0), Point::new(70.0, 45.0));

        let shape = canvas.shape(id).unwrap();
        assert!(shape.is_selected());
        assert!(shape.mode().is_idle());
        assert_eq!(shape.position(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_second_press_on_selected_shape_drags_it() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        let at = Point::new(20.0, 20.0);

        canvas.handle_pointer_event(PointerEvent::press(at));
        canvas.handle_pointer_event(PointerEvent::Release { position: at });
        assert!(canvas.is_selected(id));

        drag(&mut canvas, at, Point::new(70.0, 45.0));

        let shape = canvas.shape(id).unwrap();
        assert!(shape.is_selected());
        assert!(shape.mode().is_idle());
        assert_eq!(shape.position(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_ctrl_press_toggles_selected_shape_off() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.select(a);
        canvas.add_to_selection(b);

        canvas.handle_pointer_event(press_with(Point::new(20.0, 20.0), ctrl()));
        assert_eq!(canvas.selected(), vec![b]);
        assert!(canvas.shape(a).unwrap().mode().is_idle());
        assert!(canvas.shape(b).unwrap().mode().is_dragging());
    }

    #[test]
    fn test_inserted_shape_starts_idle() {
        let mut canvas = Canvas::new();
        let mut shape = TextBox::new(Point::ZERO, Size::new(100.0, 50.0), "x");
        assert!(shape.begin_edit());

        let id = canvas.insert_shape(shape);
        assert!(canvas.shape(id).unwrap().mode().is_idle());
        assert_eq!(canvas.editing_shape(), None);

        let other = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.begin_edit(other);
        let editing = canvas.shapes().filter(|s| s.mode().is_editing()).count();
        assert_eq!(editing, 1);
    }

    #[test]
    fn test_press_without_modifier_replaces_selection() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.select(a);

        canvas.handle_pointer_event(PointerEvent::press(Point::new(220.0, 20.0)));
        assert_eq!(canvas.selected(), vec![b]);
    }

    #[test]
    fn test_ctrl_press_extends_and_drags_all_selected() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.select(a);

        canvas.handle_pointer_event(press_with(Point::new(220.0, 20.0), ctrl()));
        assert_eq!(canvas.selected(), vec![a, b]);

        canvas.handle_pointer_event(PointerEvent::Move {
            position: Point::new(230.0, 60.0),
        });
        canvas.handle_pointer_event(PointerEvent::Release {
            position: Point::new(230.0, 60.0),
        });
        assert_eq!(canvas.shape(a).unwrap().position(), Point::new(10.0, 40.0));
        assert_eq!(canvas.shape(b).unwrap().position(), Point::new(210.0, 40.0));
    }

    #[test]
    fn test_press_on_empty_space_clears_selection() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        canvas.select(a);

        canvas.handle_pointer_event(press_with(Point::new(500.0, 400.0), ctrl()));
        assert!(canvas.is_selected(a));

        canvas.handle_pointer_event(PointerEvent::press(Point::new(500.0, 400.0)));
        assert!(canvas.selected().is_empty());
    }

    #[test]
    fn test_handle_press_resizes_instead_of_dragging() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        let corner = canvas.shape(id).unwrap().bounds();
        let grip = Point::new(corner.x1 - 2.0, corner.y1 - 2.0);
        assert!(canvas.handle_region_contains(id, grip));

        canvas.handle_pointer_event(PointerEvent::press(grip));
        assert!(canvas.shape(id).unwrap().mode().is_resizing());
        assert!(!canvas.is_selected(id));

        canvas.handle_pointer_event(PointerEvent::Move {
            position: grip + Vec2::new(40.0, 30.0),
        });
        canvas.handle_pointer_event(PointerEvent::Release {
            position: grip + Vec2::new(40.0, 30.0),
        });

        let shape = canvas.shape(id).unwrap();
        assert!(shape.mode().is_idle());
        assert_eq!(shape.position(), corner.origin());
        assert!((shape.size().width - (corner.width() + 40.0)).abs() < EPS);
        assert!((shape.size().height - (corner.height() + 30.0)).abs() < EPS);
    }

    #[test]
    fn test_right_press_is_ignored() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        canvas.handle_pointer_event(PointerEvent::Press {
            position: Point::new(20.0, 20.0),
            button: MouseButton::Right,
            modifiers: Modifiers::NONE,
        });
        assert!(!canvas.is_selected(id));
        assert!(canvas.shape(id).unwrap().mode().is_idle());
    }

    #[test]
    fn test_double_click_edits_one_shape_at_a_time() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));

        canvas.handle_pointer_event(PointerEvent::press(Point::new(20.0, 20.0)));
        canvas.handle_pointer_event(PointerEvent::DoubleClick {
            position: Point::new(20.0, 20.0),
        });
        assert_eq!(canvas.editing_shape(), Some(a));
        assert!(canvas.shape(a).unwrap().mode().is_editing());

        canvas.handle_pointer_event(PointerEvent::DoubleClick {
            position: Point::new(220.0, 20.0),
        });
        assert_eq!(canvas.editing_shape(), Some(b));
        let editing = canvas.shapes().filter(|s| s.mode().is_editing()).count();
        assert_eq!(editing, 1);
    }

    #[test]
    fn test_double_click_on_handle_does_not_edit() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        let bounds = canvas.shape(id).unwrap().bounds();
        canvas.handle_pointer_event(PointerEvent::DoubleClick {
            position: Point::new(bounds.x1 - 1.0, bounds.y1 - 1.0),
        });
        assert_eq!(canvas.editing_shape(), None);
    }

    #[test]
    fn test_focus_lost_cancels_edit() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        assert!(canvas.begin_edit(id));
        canvas.handle_pointer_event(PointerEvent::FocusLost);
        assert_eq!(canvas.editing_shape(), None);
        assert!(canvas.shape(id).unwrap().mode().is_idle());
        assert_eq!(canvas.shape(id).unwrap().text(), "Edit me");
    }

    #[test]
    fn test_commit_edit_grows_shape_and_extent() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape_at(Point::new(600.0, 0.0));
        assert!(canvas.begin_edit(id));
        assert!(canvas.commit_edit("a label long enough to push the box past the extent"));

        let shape = canvas.shape(id).unwrap();
        assert!(shape.size().width > 100.0);
        assert_eq!(canvas.extent().union(shape.bounds()), canvas.extent());
        assert_eq!(canvas.editing_shape(), None);
        assert!(!canvas.commit_edit("again"));
    }

    #[test]
    fn test_moving_editing_shape_is_rejected() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape();
        canvas.begin_edit(id);
        assert!(!canvas.move_shape(id, Point::new(300.0, 300.0)));
        assert_eq!(canvas.shape(id).unwrap().position(), Point::ZERO);
    }

    #[test]
    fn test_round_trip_hello() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape_at(Point::new(15.5, 30.25));
        canvas.begin_edit(id);
        canvas.commit_edit("Hello");
        let json = canvas.serialize().unwrap();

        let mut loaded = Canvas::new();
        assert_eq!(loaded.deserialize(&json), Ok(1));
        let shape = loaded.shapes().next().unwrap();
        assert_eq!(shape.text(), "Hello");
        assert!((shape.size().width - 100.0).abs() < EPS);
        assert!((shape.position().x - 15.5).abs() < EPS);
        assert!((shape.position().y - 30.25).abs() < EPS);
    }

    #[test]
    fn test_round_trip_preserves_creation_order() {
        let mut canvas = Canvas::new();
        for (i, x) in [300.0, 0.0, 150.0].into_iter().enumerate() {
            let id = canvas.add_shape_at(Point::new(x, 0.0));
            canvas.begin_edit(id);
            canvas.commit_edit(&format!("box {i}"));
        }
        let mut loaded = Canvas::new();
        loaded.deserialize(&canvas.serialize().unwrap()).unwrap();
        let labels: Vec<&str> = loaded.shapes().map(TextBox::text).collect();
        assert_eq!(labels, vec!["box 0", "box 1", "box 2"]);
    }

    #[test]
    fn test_failed_load_leaves_canvas_untouched() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.add_connector(a, b).unwrap();

        let json = r#"[
            { "type": "DraggableTextItem", "text": "ok", "x": 0, "y": 0, "width": 50, "height": 20 },
            { "type": "DraggableTextItem", "text": "no height", "x": 0, "y": 0, "width": 50 }
        ]"#;
        assert!(matches!(
            canvas.deserialize(json),
            Err(CanvasError::MalformedDocument(_))
        ));
        assert_eq!(canvas.shapes().count(), 2);
        assert_eq!(canvas.connectors().len(), 1);
    }

    #[test]
    fn test_deserialize_clears_connectors() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape();
        let b = canvas.add_shape_at(Point::new(200.0, 0.0));
        canvas.add_connector(a, b).unwrap();

        let json = canvas.serialize().unwrap();
        assert_eq!(canvas.deserialize(&json), Ok(2));
        assert!(canvas.connectors().is_empty());
        assert!(canvas.shape(a).is_none());
    }
}
