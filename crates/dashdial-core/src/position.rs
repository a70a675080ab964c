//! Persisted positions of draggable widgets.
//!
//! Each widget's top-left corner is stored as `{"x": .., "y": ..}` JSON under
//! `widget_pos_<id>`. Reads never fail: anything missing or malformed counts
//! as "no stored position" and the caller's default applies.

use crate::storage::KeyValueStore;
use kurbo::{Point, Size, Vec2};
use std::sync::Arc;

/// Prefix of every persisted widget position key.
pub const POSITION_KEY_PREFIX: &str = "widget_pos_";

/// Storage key for a widget id.
pub fn position_key(id: &str) -> String {
    format!("{}{}", POSITION_KEY_PREFIX, id)
}

/// A widget's current placement inside its container.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetPosition {
    pub id: String,
    pub position: Point,
}

impl WidgetPosition {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Outcome of resolving a widget's stored position before first paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadedPosition {
    Found(Point),
    Absent,
}

impl LoadedPosition {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The stored point, or `default` when nothing usable was stored.
    pub fn unwrap_or(self, default: Point) -> Point {
        match self {
            Self::Found(p) => p,
            Self::Absent => default,
        }
    }
}

/// Clamp one axis to `[0, container - widget]`.
///
/// A container smaller than the widget pins the axis to 0, so the widget's
/// leading edge stays visible.
pub fn clamp_axis(value: f64, container: f64, widget: f64) -> f64 {
    let max = (container - widget).max(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

/// Clamp a top-left position so the widget stays inside the container.
pub fn clamp_to_container(position: Point, container: Size, widget: Size) -> Point {
    Point::new(
        clamp_axis(position.x, container.width, widget.width),
        clamp_axis(position.y, container.height, widget.height),
    )
}

/// Loads and commits widget positions through a key-value store.
pub struct PositionStore<S: KeyValueStore> {
    storage: Arc<S>,
}

impl<S: KeyValueStore> Clone for PositionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: KeyValueStore> PositionStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Resolve the stored position for `id`.
    ///
    /// Read errors, non-JSON text, a wrong shape and non-finite coordinates
    /// all resolve to `Absent`.
    pub fn load(&self, id: &str) -> LoadedPosition {
        let key = position_key(id);
        let raw = match self.storage.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadedPosition::Absent,
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return LoadedPosition::Absent;
            }
        };

        match serde_json::from_str::<Point>(&raw) {
            Ok(p) if p.is_finite() => LoadedPosition::Found(p),
            Ok(p) => {
                log::debug!("Ignoring non-finite position under {}: {:?}", key, p);
                LoadedPosition::Absent
            }
            Err(e) => {
                log::debug!("Ignoring malformed position under {}: {}", key, e);
                LoadedPosition::Absent
            }
        }
    }

    /// The stored position for `id`, or `default` if none is usable.
    pub fn load_position(&self, id: &str, default: Point) -> WidgetPosition {
        WidgetPosition::new(id, self.load(id).unwrap_or(default))
    }

    /// Apply a finished drag and persist the result.
    ///
    /// The new position is `current + offset`, clamped per axis to the
    /// container. Persisting is best-effort: a write failure is logged and
    /// the clamped position is still returned.
    pub fn commit_drag_end(
        &self,
        id: &str,
        current: Point,
        offset: Vec2,
        container: Size,
        widget: Size,
    ) -> WidgetPosition {
        let position = clamp_to_container(current + offset, container, widget);
        self.persist(id, position);
        WidgetPosition::new(id, position)
    }

    fn persist(&self, id: &str, position: Point) {
        let key = position_key(id);
        let json = match serde_json::to_string(&position) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode position for {}: {}", id, e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&key, &json) {
            log::warn!("Failed to persist {}: {}", key, e);
        }
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
