//! Drag session of a single widget.
//!
//! A widget goes `Uninitialized → Loaded → Dragging → Loaded`. It has no
//! paint position until its stored position has been resolved, and a drag can
//! only end through [`DragSession::end_drag`]; releasing without moving is
//! the cancellation path.

use crate::position::{LoadedPosition, PositionStore, WidgetPosition};
use crate::storage::KeyValueStore;
use kurbo::{Point, Size, Vec2};
use thiserror::Error;

/// Invalid drag transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    #[error("Widget {0} has not been mounted")]
    NotMounted(String),
    #[error("Widget {0} is already being dragged")]
    AlreadyDragging(String),
    #[error("Widget {0} is not being dragged")]
    NotDragging(String),
}

/// Pointer movement of an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    /// Widget position when the drag started.
    pub origin: Point,
    /// Pointer position when the drag started.
    pub start_point: Point,
    /// Latest pointer position.
    pub current_point: Point,
}

impl DragMove {
    pub fn new(origin: Point, start_point: Point) -> Self {
        Self {
            origin,
            start_point,
            current_point: start_point,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}

/// Lifecycle state of a draggable widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Stored position not resolved yet; the widget must not paint.
    #[default]
    Uninitialized,
    /// Resting at a position.
    Loaded(Point),
    Dragging(DragMove),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }
}

/// Tracks one widget's position through mount and drags.
#[derive(Debug, Clone)]
pub struct DragSession {
    id: String,
    state: DragState,
    /// Result of the first mount.
    loaded: Option<LoadedPosition>,
}

impl DragSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: DragState::Uninitialized,
            loaded: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Resolve the stored position, falling back to `default`.
    ///
    /// Only the first call reads storage; later calls keep the current state
    /// and return the first call's result.
    pub fn mount<S: KeyValueStore>(&mut self, store: &PositionStore<S>, default: Point) -> LoadedPosition {
        if let Some(loaded) = self.loaded {
            return loaded;
        }
        let loaded = store.load(&self.id);
        if !loaded.is_found() {
            log::debug!("No stored position for {}, using default", self.id);
        }
        self.state = DragState::Loaded(loaded.unwrap_or(default));
        self.loaded = Some(loaded);
        loaded
    }

    /// Where the widget should be painted, or `None` before mount.
    ///
    /// While dragging this follows the pointer without clamping.
    pub fn paint_position(&self) -> Option<Point> {
        match self.state {
            DragState::Uninitialized => None,
            DragState::Loaded(p) => Some(p),
            DragState::Dragging(drag) => Some(drag.origin + drag.delta()),
        }
    }

    /// Start dragging with the pointer at `pointer`.
    pub fn begin_drag(&mut self, pointer: Point) -> Result<(), DragError> {
        match self.state {
            DragState::Uninitialized => Err(DragError::NotMounted(self.id.clone())),
            DragState::Dragging(_) => Err(DragError::AlreadyDragging(self.id.clone())),
            DragState::Loaded(origin) => {
                self.state = DragState::Dragging(DragMove::new(origin, pointer));
                Ok(())
            }
        }
    }

    /// Follow the pointer during a drag.
    pub fn drag_to(&mut self, pointer: Point) -> Result<(), DragError> {
        match &mut self.state {
            DragState::Dragging(drag) => {
                drag.current_point = pointer;
                Ok(())
            }
            _ => Err(DragError::NotDragging(self.id.clone())),
        }
    }

    /// Finish the drag: clamp to the container, persist and come to rest.
    pub fn end_drag<S: KeyValueStore>(
        &mut self,
        store: &PositionStore<S>,
        container: Size,
        widget: Size,
    ) -> Result<WidgetPosition, DragError> {
        let DragState::Dragging(drag) = self.state else {
            return Err(DragError::NotDragging(self.id.clone()));
        };
        let committed = store.commit_drag_end(&self.id, drag.origin, drag.delta(), container, widget);
        self.state = DragState::Loaded(committed.position);
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    const CONTAINER: Size = Size::new(200.0, 200.0);
    const WIDGET: Size = Size::new(100.0, 100.0);

    fn store() -> PositionStore<MemoryStore> {
        PositionStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_no_paint_before_mount() {
        let session = DragSession::new("dial");
        assert_eq!(session.state(), DragState::Uninitialized);
        assert_eq!(session.paint_position(), None);
    }

    #[test]
    fn test_mount_uses_default_then_stored() {
        let store = store();
        let mut session = DragSession::new("dial");
        let loaded = session.mount(&store, Point::new(10.0, 20.0));
        assert_eq!(loaded, LoadedPosition::Absent);
        assert_eq!(session.paint_position(), Some(Point::new(10.0, 20.0)));

        session.begin_drag(Point::new(0.0, 0.0)).unwrap();
        session.drag_to(Point::new(30.0, 30.0)).unwrap();
        session.end_drag(&store, CONTAINER, WIDGET).unwrap();

        let mut remounted = DragSession::new("dial");
        let loaded = remounted.mount(&store, Point::ZERO);
        assert_eq!(loaded, LoadedPosition::Found(Point::new(40.0, 50.0)));
        assert_eq!(remounted.paint_position(), Some(Point::new(40.0, 50.0)));
    }

    #[test]
    fn test_mount_twice_keeps_position() {
        let store = store();
        let mut session = DragSession::new("dial");
        session.mount(&store, Point::new(5.0, 5.0));
        let again = session.mount(&store, Point::new(99.0, 99.0));
        // The default was used, so nothing was found the second time either.
        assert_eq!(again, LoadedPosition::Absent);
        assert_eq!(session.paint_position(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_mount_twice_after_drag_keeps_first_result() {
        let store = PositionStore::new(Arc::new(MemoryStore::with_entries([(
            "widget_pos_dial",
            r#"{"x": 20, "y": 30}"#,
        )])));
        let mut session = DragSession::new("dial");
        assert_eq!(
            session.mount(&store, Point::ZERO),
            LoadedPosition::Found(Point::new(20.0, 30.0))
        );

        session.begin_drag(Point::ZERO).unwrap();
        session.drag_to(Point::new(10.0, 10.0)).unwrap();
        session.end_drag(&store, CONTAINER, WIDGET).unwrap();

        assert_eq!(
            session.mount(&store, Point::ZERO),
            LoadedPosition::Found(Point::new(20.0, 30.0))
        );
        assert_eq!(session.paint_position(), Some(Point::new(30.0, 40.0)));

        let mut fresh = DragSession::new("fresh");
        fresh.mount(&store, Point::ZERO);
        store.commit_drag_end("fresh", Point::ZERO, Vec2::new(1.0, 1.0), CONTAINER, WIDGET);
        assert_eq!(fresh.mount(&store, Point::ZERO), LoadedPosition::Absent);
    }

    #[test]
    fn test_paint_follows_pointer_while_dragging() {
        let store = store();
        let mut session = DragSession::new("dial");
        session.mount(&store, Point::new(50.0, 50.0));
        session.begin_drag(Point::new(100.0, 100.0)).unwrap();
        session.drag_to(Point::new(400.0, 90.0)).unwrap();

        assert!(session.state().is_dragging());
        assert_eq!(session.paint_position(), Some(Point::new(350.0, 40.0)));

        let committed = session.end_drag(&store, CONTAINER, WIDGET).unwrap();
        assert_eq!(committed.position, Point::new(100.0, 40.0));
        assert_eq!(session.state(), DragState::Loaded(Point::new(100.0, 40.0)));
    }

    #[test]
    fn test_release_without_move_keeps_position() {
        let store = store();
        let mut session = DragSession::new("dial");
        session.mount(&store, Point::new(25.0, 75.0));
        session.begin_drag(Point::new(1.0, 1.0)).unwrap();
        let committed = session.end_drag(&store, CONTAINER, WIDGET).unwrap();
        assert_eq!(committed.position, Point::new(25.0, 75.0));
    }

    #[test]
    fn test_invalid_transitions() {
        let store = store();
        let mut session = DragSession::new("dial");
        assert_eq!(
            session.begin_drag(Point::ZERO),
            Err(DragError::NotMounted("dial".to_string()))
        );
        assert_eq!(
            session.drag_to(Point::ZERO),
            Err(DragError::NotDragging("dial".to_string()))
        );

        session.mount(&store, Point::ZERO);
        assert!(session.end_drag(&store, CONTAINER, WIDGET).is_err());

        session.begin_drag(Point::ZERO).unwrap();
        assert_eq!(
            session.begin_drag(Point::ZERO),
            Err(DragError::AlreadyDragging("dial".to_string()))
        );
    }
}
