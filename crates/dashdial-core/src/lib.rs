//! Dashdial Core Library
//!
//! Platform-agnostic building blocks of the Dashdial dashboard: radial dial
//! geometry and layout, clock ticking, and persisted positions of draggable
//! widgets.

pub mod clock;
pub mod config;
pub mod drag;
pub mod face;
pub mod geometry;
pub mod position;
pub mod storage;
pub mod ticker;
pub mod time;

pub use clock::{ClockReading, DialClock};
pub use config::{ConfigError, DashboardConfig};
pub use drag::{DragError, DragSession, DragState};
pub use face::{BezelSegment, DialLayout, HourLabel, Tick, TickKind, elapsed_segment};
pub use geometry::{PathCommand, RingSegment, describe_arc_segment, normalize_angle, point_on_circle};
pub use position::{LoadedPosition, PositionStore, WidgetPosition, position_key};
pub use storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use ticker::{DEFAULT_TICK_INTERVAL, Scheduler, TickHandle};
pub use time::{ClockMode, LocalTimeSource, TimeOfDay, TimeSource, minutes_to_angle};
