use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Screen coordinate in points, relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Position,
    pub max: Position,
}

impl Rect {
    pub const fn from_min_max(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Position, size: Size) -> Self {
        Self {
            min,
            max: Position::new(min.x + size.width, min.y + size.height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Maps `p` into 0..=100 on both axes, saturating at the edges.
    /// Degenerate rects map everything to the origin.
    pub fn percent_of(&self, p: Position) -> Position {
        let w = self.width();
        let h = self.height();
        if w <= 0.0 || h <= 0.0 {
            return Position::default();
        }
        Position::new(
            ((p.x - self.min.x) / w * 100.0).clamp(0.0, 100.0),
            ((p.y - self.min.y) / h * 100.0).clamp(0.0, 100.0),
        )
    }
}

/// Optional edges a panel must stay within. `left`/`top` constrain the
/// panel origin, `right`/`bottom` constrain its far edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
}

impl Bounds {
    pub const NONE: Bounds = Bounds {
        top: None,
        right: None,
        bottom: None,
        left: None,
    };

    /// Clamps each axis independently. The min edge is applied first, so a
    /// panel larger than the allowed span ends up pinned to the max edge.
    /// A missing measurement counts as zero extent.
    pub fn clamp(&self, proposed: Position, extent: Option<Size>) -> Position {
        let extent = extent.unwrap_or_default();
        let mut x = proposed.x;
        let mut y = proposed.y;

        if let Some(left) = self.left {
            x = x.max(left);
        }
        if let Some(right) = self.right {
            x = x.min(right - extent.width);
        }
        if let Some(top) = self.top {
            y = y.max(top);
        }
        if let Some(bottom) = self.bottom {
            y = y.min(bottom - extent.height);
        }

        Position::new(x, y)
    }

    pub fn contains(&self, pos: Position, extent: Option<Size>) -> bool {
        let extent = extent.unwrap_or_default();
        self.left.map_or(true, |l| pos.x >= l)
            && self.right.map_or(true, |r| pos.x + extent.width <= r)
            && self.top.map_or(true, |t| pos.y >= t)
            && self.bottom.map_or(true, |b| pos.y + extent.height <= b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Pointer and panel origin captured when a drag starts; moves are applied
/// as deltas from here so the panel never jumps to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_start: Position,
    pub position_start: Position,
}

/// What a pointer-down landed on within one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle,
    Content,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer stream lost (window unfocused, touch cancelled).
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer: Position,
    pub target: HitTarget,
}

impl PointerEvent {
    pub fn down(pointer: Position, target: HitTarget) -> Self {
        Self {
            kind: PointerKind::Down,
            pointer,
            target,
        }
    }

    pub fn moved(pointer: Position) -> Self {
        Self {
            kind: PointerKind::Move,
            pointer,
            target: HitTarget::Outside,
        }
    }

    pub fn up(pointer: Position) -> Self {
        Self {
            kind: PointerKind::Up,
            pointer,
            target: HitTarget::Outside,
        }
    }

    pub fn cancel(pointer: Position) -> Self {
        Self {
            kind: PointerKind::Cancel,
            pointer,
            target: HitTarget::Outside,
        }
    }
}

/// Drag state for a single floating panel.
///
/// Lives exactly as long as the panel is mounted; nothing here is shared
/// between panels.
#[derive(Debug, Clone)]
pub struct Draggable {
    position: Position,
    bounds: Bounds,
    session: Option<DragSession>,
    measured: Option<Size>,
    collapsed: bool,
}

impl Draggable {
    /// `initial` is used verbatim, even when it violates `bounds`.
    pub fn new(initial: Position, bounds: Bounds) -> Self {
        Self {
            position: initial,
            bounds,
            session: None,
            measured: None,
            collapsed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    /// Records the last rendered size; `None` until the panel has been laid out.
    pub fn set_measured_size(&mut self, size: Option<Size>) {
        self.measured = size;
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapse(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    /// Starts a drag only when the press landed on the handle. Returns
    /// whether a session was started.
    pub fn pointer_down(&mut self, pointer: Position, target: HitTarget) -> bool {
        if target != HitTarget::Handle {
            return false;
        }
        self.session = Some(DragSession {
            pointer_start: pointer,
            position_start: self.position,
        });
        true
    }

    /// Returns the committed position when a drag is active.
    pub fn pointer_move(&mut self, pointer: Position) -> Option<Position> {
        let session = self.session?;
        let proposed = session.position_start + (pointer - session.pointer_start);
        self.position = self.bounds.clamp(proposed, self.measured);
        Some(self.position)
    }

    /// Ends the drag wherever the pointer is. Returns whether a drag was active.
    pub fn pointer_up(&mut self) -> bool {
        self.session.take().is_some()
    }

    pub fn cancel(&mut self) -> bool {
        self.pointer_up()
    }

    pub fn handle(&mut self, event: PointerEvent) -> DragPhase {
        match event.kind {
            PointerKind::Down => {
                self.pointer_down(event.pointer, event.target);
            }
            PointerKind::Move => {
                self.pointer_move(event.pointer);
            }
            PointerKind::Up => {
                self.pointer_up();
            }
            PointerKind::Cancel => {
                self.cancel();
            }
        }
        self.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_applied_relative_to_drag_start() {
        let mut d = Draggable::new(Position::new(20.0, 80.0), Bounds::NONE);
        assert!(d.pointer_down(Position::new(100.0, 100.0), HitTarget::Handle));
        d.pointer_move(Position::new(140.0, 130.0));
        assert_eq!(d.position(), Position::new(60.0, 110.0));
    }

    #[test]
    fn content_press_does_not_start_drag() {
        let mut d = Draggable::new(Position::new(20.0, 80.0), Bounds::NONE);
        assert!(!d.pointer_down(Position::new(30.0, 90.0), HitTarget::Content));
        assert_eq!(d.phase(), DragPhase::Idle);
        assert_eq!(d.pointer_move(Position::new(300.0, 300.0)), None);
        assert_eq!(d.position(), Position::new(20.0, 80.0));
    }

    #[test]
    fn initial_position_is_not_clamped() {
        let bounds = Bounds {
            left: Some(10.0),
            ..Bounds::NONE
        };
        let d = Draggable::new(Position::new(-50.0, 0.0), bounds);
        assert_eq!(d.position(), Position::new(-50.0, 0.0));
    }

    #[test]
    fn missing_measurement_clamps_with_zero_extent() {
        let bounds = Bounds {
            right: Some(800.0),
            ..Bounds::NONE
        };
        let mut d = Draggable::new(Position::new(700.0, 100.0), bounds);
        d.pointer_down(Position::new(0.0, 0.0), HitTarget::Handle);
        d.pointer_move(Position::new(500.0, 0.0));
        assert_eq!(d.position().x, 800.0);

        d.set_measured_size(Some(Size::new(320.0, 200.0)));
        d.pointer_move(Position::new(500.0, 0.0));
        assert_eq!(d.position().x, 480.0);
    }

    #[test]
    fn bottom_bound_uses_measured_height() {
        let bounds = Bounds {
            top: Some(70.0),
            bottom: Some(600.0),
            ..Bounds::NONE
        };
        let mut d = Draggable::new(Position::new(0.0, 300.0), bounds);
        d.set_measured_size(Some(Size::new(100.0, 150.0)));
        d.pointer_down(Position::new(0.0, 0.0), HitTarget::Handle);

        d.pointer_move(Position::new(0.0, 1_000.0));
        assert_eq!(d.position().y, 450.0);

        d.pointer_move(Position::new(0.0, -1_000.0));
        assert_eq!(d.position().y, 70.0);
    }

    #[test]
    fn cancel_behaves_like_release() {
        let mut d = Draggable::new(Position::default(), Bounds::NONE);
        d.handle(PointerEvent::down(Position::default(), HitTarget::Handle));
        assert!(d.is_dragging());
        assert_eq!(
            d.handle(PointerEvent::cancel(Position::new(5.0, 5.0))),
            DragPhase::Idle
        );
    }

    #[test]
    fn percent_of_saturates_at_edges() {
        let r = Rect::from_min_size(Position::new(10.0, 10.0), Size::new(200.0, 100.0));
        assert_eq!(r.percent_of(Position::new(110.0, 35.0)), Position::new(50.0, 25.0));
        assert_eq!(r.percent_of(Position::new(-5.0, 500.0)), Position::new(0.0, 100.0));
    }
}
