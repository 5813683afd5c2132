//! Toolkit-free model of the Alpha Block dashboard: panel dragging, widget
//! layout, telemetry classification and the simulated grow chamber.

pub mod climate;
pub mod drag;
pub mod layout;
pub mod mock;
pub mod telemetry;

pub use drag::{Bounds, DragPhase, Draggable, HitTarget, PointerEvent, PointerKind, Position, Rect, Size};
pub use layout::{
    DragTransition, LayoutMode, PanelHitAreas, Viewport, VisibilityAnnouncer, WidgetId, WidgetLayout,
    WidgetVisibility,
};
