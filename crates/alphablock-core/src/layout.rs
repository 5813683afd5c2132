use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::drag::{Bounds, Draggable, HitTarget, PointerKind, Position, Rect, Size};

/// Viewports narrower than this get the stacked, non-draggable layout.
pub const DEFAULT_MOBILE_BREAKPOINT: f32 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetId {
    Metrics,
    Tasks,
    Activity,
    Graph,
    Minimap,
}

impl WidgetId {
    /// Render order; later entries draw on top.
    pub const ALL: [WidgetId; 5] = [
        WidgetId::Metrics,
        WidgetId::Tasks,
        WidgetId::Activity,
        WidgetId::Graph,
        WidgetId::Minimap,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WidgetId::Metrics => "metrics",
            WidgetId::Tasks => "tasks",
            WidgetId::Activity => "activity",
            WidgetId::Graph => "graph",
            WidgetId::Minimap => "minimap",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WidgetId::Metrics => "System Metrics",
            WidgetId::Tasks => "Care Plan",
            WidgetId::Activity => "Activity Log",
            WidgetId::Graph => "Monitoring History",
            WidgetId::Minimap => "Camera Position",
        }
    }

    pub fn spec(self) -> &'static WidgetSpec {
        &PLACEMENTS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A coordinate on one axis, measured from the start edge, the far edge, or
/// the midpoint of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Start(f32),
    End(f32),
    Center(f32),
}

impl Anchor {
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Anchor::Start(v) => v,
            Anchor::End(v) => extent - v,
            Anchor::Center(v) => extent / 2.0 + v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsPolicy {
    pub top: Option<Anchor>,
    pub right: Option<Anchor>,
    pub bottom: Option<Anchor>,
    pub left: Option<Anchor>,
}

impl BoundsPolicy {
    pub fn resolve(&self, vp: Viewport) -> Bounds {
        Bounds {
            top: self.top.map(|a| a.resolve(vp.height)),
            right: self.right.map(|a| a.resolve(vp.width)),
            bottom: self.bottom.map(|a| a.resolve(vp.height)),
            left: self.left.map(|a| a.resolve(vp.width)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetSpec {
    pub id: WidgetId,
    pub x: Anchor,
    pub y: Anchor,
    pub bounds: BoundsPolicy,
    pub width: f32,
    pub height: Option<f32>,
}

impl WidgetSpec {
    pub fn initial_position(&self, vp: Viewport) -> Position {
        Position::new(self.x.resolve(vp.width), self.y.resolve(vp.height))
    }
}

const BELOW_HEADER: Option<Anchor> = Some(Anchor::Start(70.0));
const RIGHT_EDGE: Option<Anchor> = Some(Anchor::End(10.0));

/// Initial placement and drag bounds per widget, indexed by `WidgetId`.
pub static PLACEMENTS: [WidgetSpec; 5] = [
    WidgetSpec {
        id: WidgetId::Metrics,
        x: Anchor::End(330.0),
        y: Anchor::Start(80.0),
        bounds: BoundsPolicy {
            top: BELOW_HEADER,
            right: RIGHT_EDGE,
            bottom: None,
            left: None,
        },
        width: 320.0,
        height: None,
    },
    WidgetSpec {
        id: WidgetId::Tasks,
        x: Anchor::Start(20.0),
        y: Anchor::Start(320.0),
        bounds: BoundsPolicy {
            top: BELOW_HEADER,
            right: None,
            bottom: None,
            left: Some(Anchor::Start(10.0)),
        },
        width: 320.0,
        height: None,
    },
    WidgetSpec {
        id: WidgetId::Activity,
        x: Anchor::End(330.0),
        y: Anchor::Start(420.0),
        bounds: BoundsPolicy {
            top: BELOW_HEADER,
            right: RIGHT_EDGE,
            bottom: None,
            left: None,
        },
        width: 320.0,
        height: None,
    },
    WidgetSpec {
        id: WidgetId::Graph,
        x: Anchor::End(520.0),
        y: Anchor::Center(-175.0),
        bounds: BoundsPolicy {
            top: BELOW_HEADER,
            right: RIGHT_EDGE,
            bottom: None,
            left: None,
        },
        width: 500.0,
        height: Some(350.0),
    },
    WidgetSpec {
        id: WidgetId::Minimap,
        x: Anchor::End(280.0),
        y: Anchor::End(220.0),
        bounds: BoundsPolicy {
            top: None,
            right: RIGHT_EDGE,
            bottom: Some(Anchor::End(20.0)),
            left: None,
        },
        width: 272.0,
        height: None,
    },
];

/// Per-widget visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetVisibility {
    pub metrics: bool,
    pub tasks: bool,
    pub activity: bool,
    pub graph: bool,
    pub minimap: bool,
}

impl Default for WidgetVisibility {
    fn default() -> Self {
        Self {
            metrics: true,
            tasks: true,
            activity: false,
            graph: false,
            minimap: true,
        }
    }
}

impl WidgetVisibility {
    pub const fn none() -> Self {
        Self {
            metrics: false,
            tasks: false,
            activity: false,
            graph: false,
            minimap: false,
        }
    }

    pub fn get(&self, id: WidgetId) -> bool {
        match id {
            WidgetId::Metrics => self.metrics,
            WidgetId::Tasks => self.tasks,
            WidgetId::Activity => self.activity,
            WidgetId::Graph => self.graph,
            WidgetId::Minimap => self.minimap,
        }
    }

    pub fn set(&mut self, id: WidgetId, visible: bool) {
        let slot = match id {
            WidgetId::Metrics => &mut self.metrics,
            WidgetId::Tasks => &mut self.tasks,
            WidgetId::Activity => &mut self.activity,
            WidgetId::Graph => &mut self.graph,
            WidgetId::Minimap => &mut self.minimap,
        };
        *slot = visible;
    }

    /// Returns the new value.
    pub fn flip(&mut self, id: WidgetId) -> bool {
        let next = !self.get(id);
        self.set(id, next);
        next
    }
}

/// Fire-and-forget sink for visibility changes (toasts in the viewer).
pub trait VisibilityAnnouncer {
    fn announce(&mut self, widget: WidgetId, visible: bool);
}

impl VisibilityAnnouncer for Vec<(WidgetId, bool)> {
    fn announce(&mut self, widget: WidgetId, visible: bool) {
        self.push((widget, visible));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Absolutely positioned, draggable panels.
    Floating,
    /// Single scrollable column; no dragging.
    Stacked,
}

/// Screen regions a panel occupied on its last render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelHitAreas {
    pub id: WidgetId,
    pub handle: Rect,
    /// Buttons living inside the handle that must not start a drag.
    pub controls: Option<Rect>,
    pub body: Rect,
}

/// Finds the topmost panel under `pointer`. `areas` must be in render order.
pub fn hit_test(areas: &[PanelHitAreas], pointer: Position) -> Option<(WidgetId, HitTarget)> {
    for area in areas.iter().rev() {
        if area.handle.contains(pointer) {
            let on_control = area.controls.is_some_and(|c| c.contains(pointer));
            let target = if on_control {
                HitTarget::Content
            } else {
                HitTarget::Handle
            };
            return Some((area.id, target));
        }
        if area.body.contains(pointer) {
            return Some((area.id, HitTarget::Content));
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTransition {
    Started(WidgetId),
    Moved(WidgetId, Position),
    Released(WidgetId),
}

/// Owns visibility and one `Draggable` per mounted widget, and routes
/// pointer input to whichever panel currently holds the pointer capture.
#[derive(Debug, Clone)]
pub struct WidgetLayout {
    viewport: Viewport,
    breakpoint: f32,
    visibility: WidgetVisibility,
    mounted: BTreeMap<WidgetId, Draggable>,
    capture: Option<WidgetId>,
    awaiting_viewport: bool,
}

impl WidgetLayout {
    pub fn new(viewport: Viewport, visibility: WidgetVisibility, breakpoint: f32) -> Self {
        let mut layout = Self::deferred(visibility, breakpoint);
        layout.resize(viewport);
        layout
    }

    /// Layout whose visible panels mount on the first `resize`, once the
    /// real viewport is known. Until then nothing is positioned.
    pub fn deferred(visibility: WidgetVisibility, breakpoint: f32) -> Self {
        Self {
            viewport: Viewport::new(0.0, 0.0),
            breakpoint,
            visibility,
            mounted: BTreeMap::new(),
            capture: None,
            awaiting_viewport: true,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn visibility(&self) -> WidgetVisibility {
        self.visibility
    }

    pub fn mode(&self) -> LayoutMode {
        if self.viewport.width < self.breakpoint {
            LayoutMode::Stacked
        } else {
            LayoutMode::Floating
        }
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.visibility.get(id)
    }

    pub fn visible_ids(&self) -> Vec<WidgetId> {
        WidgetId::ALL
            .into_iter()
            .filter(|id| self.visibility.get(*id))
            .collect()
    }

    pub fn draggable(&self, id: WidgetId) -> Option<&Draggable> {
        self.mounted.get(&id)
    }

    /// `None` when the widget is hidden or the layout is stacked.
    pub fn position(&self, id: WidgetId) -> Option<Position> {
        if self.mode() == LayoutMode::Stacked {
            return None;
        }
        self.mounted.get(&id).map(Draggable::position)
    }

    pub fn capture(&self) -> Option<WidgetId> {
        self.capture
    }

    /// Flips one widget's visibility, mounting a fresh drag state or dropping
    /// the old one, and announces the new state exactly once.
    pub fn toggle(&mut self, id: WidgetId, announcer: &mut impl VisibilityAnnouncer) -> bool {
        let visible = self.visibility.flip(id);
        if visible {
            self.mount(id);
        } else {
            self.unmount(id);
        }
        announcer.announce(id, visible);
        visible
    }

    pub fn is_collapsed(&self, id: WidgetId) -> bool {
        self.mounted.get(&id).is_some_and(Draggable::collapsed)
    }

    pub fn toggle_collapse(&mut self, id: WidgetId) -> Option<bool> {
        let collapsed = self.mounted.get_mut(&id)?.toggle_collapse();
        if collapsed && self.capture == Some(id) {
            self.release_capture();
        }
        Some(collapsed)
    }

    pub fn set_measured_size(&mut self, id: WidgetId, size: Option<Size>) {
        if let Some(d) = self.mounted.get_mut(&id) {
            d.set_measured_size(size);
        }
    }

    /// Mounted panels keep their bounds; only widgets mounted afterwards see
    /// the new viewport. Switching to the stacked layout drops any drag.
    /// The first call on a deferred layout mounts every visible widget.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.awaiting_viewport {
            self.awaiting_viewport = false;
            for id in WidgetId::ALL {
                if self.visibility.get(id) {
                    self.mount(id);
                }
            }
        }
        if self.mode() == LayoutMode::Stacked {
            self.release_capture();
        }
    }

    /// Feeds one pointer event into the layout. `hit` is the result of
    /// `hit_test` for presses; moves and releases go to the capture holder
    /// wherever the pointer is.
    pub fn dispatch(
        &mut self,
        kind: PointerKind,
        pointer: Position,
        hit: Option<(WidgetId, HitTarget)>,
    ) -> Option<DragTransition> {
        match kind {
            PointerKind::Down => {
                if self.mode() == LayoutMode::Stacked {
                    return None;
                }
                let (id, target) = hit?;
                let draggable = self.mounted.get_mut(&id)?;
                if draggable.collapsed() || !draggable.pointer_down(pointer, target) {
                    return None;
                }
                if let Some(previous) = self.capture.replace(id) {
                    if previous != id {
                        if let Some(d) = self.mounted.get_mut(&previous) {
                            d.cancel();
                        }
                    }
                }
                Some(DragTransition::Started(id))
            }
            PointerKind::Move => {
                let id = self.capture?;
                let pos = self.mounted.get_mut(&id)?.pointer_move(pointer)?;
                Some(DragTransition::Moved(id, pos))
            }
            PointerKind::Up | PointerKind::Cancel => self.release_capture(),
        }
    }

    fn release_capture(&mut self) -> Option<DragTransition> {
        let id = self.capture.take()?;
        if let Some(d) = self.mounted.get_mut(&id) {
            d.cancel();
        }
        Some(DragTransition::Released(id))
    }

    fn mount(&mut self, id: WidgetId) {
        if self.awaiting_viewport {
            return;
        }
        let spec = id.spec();
        let draggable = Draggable::new(
            spec.initial_position(self.viewport),
            spec.bounds.resolve(self.viewport),
        );
        self.mounted.insert(id, draggable);
    }

    fn unmount(&mut self, id: WidgetId) {
        self.mounted.remove(&id);
        if self.capture == Some(id) {
            self.capture = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    #[test]
    fn placement_table_is_indexed_by_id() {
        for id in WidgetId::ALL {
            assert_eq!(id.spec().id, id);
        }
    }

    #[test]
    fn initial_positions_follow_viewport() {
        let vp = desktop();
        assert_eq!(
            WidgetId::Metrics.spec().initial_position(vp),
            Position::new(950.0, 80.0)
        );
        assert_eq!(
            WidgetId::Graph.spec().initial_position(vp),
            Position::new(760.0, 225.0)
        );
        assert_eq!(
            WidgetId::Minimap.spec().bounds.resolve(vp),
            Bounds {
                top: None,
                right: Some(1270.0),
                bottom: Some(780.0),
                left: None,
            }
        );
    }

    #[test]
    fn default_initial_positions_are_distinct() {
        let vp = desktop();
        let positions: Vec<Position> = WidgetId::ALL
            .iter()
            .map(|id| id.spec().initial_position(vp))
            .collect();
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn toggle_announces_post_flip_state_once() {
        let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
        let mut seen = Vec::new();
        assert!(!layout.toggle(WidgetId::Tasks, &mut seen));
        assert_eq!(seen, vec![(WidgetId::Tasks, false)]);
        assert!(layout.draggable(WidgetId::Tasks).is_none());
    }

    #[test]
    fn deferred_layout_places_panels_against_first_real_viewport() {
        let mut layout = WidgetLayout::deferred(WidgetVisibility::default(), 768.0);
        assert!(layout.draggable(WidgetId::Metrics).is_none());

        let real = Viewport::new(1000.0, 700.0);
        layout.resize(real);
        for id in layout.visible_ids() {
            let d = layout.draggable(id).expect("mounted after first resize");
            assert_eq!(d.position(), id.spec().initial_position(real), "{id:?}");
            assert_eq!(d.bounds(), id.spec().bounds.resolve(real), "{id:?}");
        }
        assert_eq!(layout.position(WidgetId::Metrics), Some(Position::new(670.0, 80.0)));
        assert_eq!(layout.position(WidgetId::Minimap), Some(Position::new(720.0, 480.0)));

        // Later resizes leave mounted panels where they are.
        layout.resize(Viewport::new(1400.0, 900.0));
        assert_eq!(layout.position(WidgetId::Metrics), Some(Position::new(670.0, 80.0)));
    }

    #[test]
    fn toggle_before_first_viewport_only_records_visibility() {
        let mut layout = WidgetLayout::deferred(WidgetVisibility::default(), 768.0);
        let mut seen = Vec::new();
        assert!(layout.toggle(WidgetId::Graph, &mut seen));
        assert!(layout.draggable(WidgetId::Graph).is_none());

        layout.resize(desktop());
        assert_eq!(
            layout.position(WidgetId::Graph),
            Some(WidgetId::Graph.spec().initial_position(desktop()))
        );
    }

    #[test]
    fn narrow_viewport_is_stacked_and_ignores_presses() {
        let mut layout =
            WidgetLayout::new(Viewport::new(600.0, 900.0), WidgetVisibility::default(), 768.0);
        assert_eq!(layout.mode(), LayoutMode::Stacked);
        assert_eq!(layout.position(WidgetId::Metrics), None);
        let hit = Some((WidgetId::Metrics, HitTarget::Handle));
        assert_eq!(
            layout.dispatch(PointerKind::Down, Position::new(10.0, 10.0), hit),
            None
        );
        assert_eq!(layout.capture(), None);
    }

    #[test]
    fn shrinking_below_breakpoint_releases_drag() {
        let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
        let hit = Some((WidgetId::Metrics, HitTarget::Handle));
        layout.dispatch(PointerKind::Down, Position::new(960.0, 90.0), hit);
        assert_eq!(layout.capture(), Some(WidgetId::Metrics));

        layout.resize(Viewport::new(500.0, 800.0));
        assert_eq!(layout.capture(), None);
        assert!(!layout.draggable(WidgetId::Metrics).unwrap().is_dragging());
    }

    #[test]
    fn collapsed_panel_cannot_be_dragged() {
        let mut layout = WidgetLayout::new(desktop(), WidgetVisibility::default(), 768.0);
        assert_eq!(layout.toggle_collapse(WidgetId::Tasks), Some(true));
        let hit = Some((WidgetId::Tasks, HitTarget::Handle));
        assert_eq!(
            layout.dispatch(PointerKind::Down, Position::new(30.0, 330.0), hit),
            None
        );
        assert!(layout.is_collapsed(WidgetId::Tasks));
    }

    #[test]
    fn hit_test_prefers_topmost_and_skips_controls() {
        let header = Rect::from_min_size(Position::new(0.0, 0.0), Size::new(100.0, 20.0));
        let body = Rect::from_min_size(Position::new(0.0, 20.0), Size::new(100.0, 80.0));
        let controls = Rect::from_min_size(Position::new(80.0, 0.0), Size::new(20.0, 20.0));
        let areas = [
            PanelHitAreas {
                id: WidgetId::Metrics,
                handle: header,
                controls: None,
                body,
            },
            PanelHitAreas {
                id: WidgetId::Tasks,
                handle: header,
                controls: Some(controls),
                body,
            },
        ];

        assert_eq!(
            hit_test(&areas, Position::new(10.0, 10.0)),
            Some((WidgetId::Tasks, HitTarget::Handle))
        );
        assert_eq!(
            hit_test(&areas, Position::new(90.0, 10.0)),
            Some((WidgetId::Tasks, HitTarget::Content))
        );
        assert_eq!(
            hit_test(&areas, Position::new(50.0, 50.0)),
            Some((WidgetId::Tasks, HitTarget::Content))
        );
        assert_eq!(hit_test(&areas, Position::new(500.0, 500.0)), None);
    }
}
