use alphablock_core::layout::hit_test;
use alphablock_core::{DragTransition, HitTarget, PanelHitAreas, PointerKind, Position, Viewport, WidgetId};
use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::dashboard::DashboardState;
use crate::ui::panel::panel_layer;

/// Raw pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerFrame {
    pub focused: bool,
    pub pos: Option<Position>,
    pub pressed: bool,
    pub released: bool,
}

pub type RoutedEvent = (PointerKind, Position, Option<(WidgetId, HitTarget)>);

/// Turns one frame of pointer state into ordered drag events. `topmost`
/// holds the hit areas of whichever panel owns the layer under the pointer.
pub fn route_pointer(
    frame: PointerFrame,
    topmost: &[PanelHitAreas],
    capturing: bool,
) -> Vec<RoutedEvent> {
    let mut out = Vec::new();
    let Some(p) = frame.pos else {
        if capturing && (frame.released || !frame.focused) {
            out.push((PointerKind::Cancel, Position::default(), None));
        }
        return out;
    };

    if !frame.focused {
        if capturing {
            out.push((PointerKind::Cancel, p, None));
        }
        return out;
    }

    if frame.pressed {
        out.push((PointerKind::Down, p, hit_test(topmost, p)));
    }
    out.push((PointerKind::Move, p, None));
    if frame.released {
        out.push((PointerKind::Up, p, None));
    }
    out
}

pub fn drag_input(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    let viewport = Viewport::new(screen.width(), screen.height());
    if st.layout.viewport() != viewport {
        let before = st.layout.mode();
        st.layout.resize(viewport);
        if st.layout.mode() != before {
            tracing::info!(width = viewport.width, mode = ?st.layout.mode(), "layout mode changed");
        }
    }

    let frame = ctx.input(|i| PointerFrame {
        focused: i.focused,
        pos: i.pointer.latest_pos().map(|p| Position::new(p.x, p.y)),
        pressed: i.pointer.primary_pressed(),
        released: i.pointer.primary_released(),
    });

    let topmost: Vec<PanelHitAreas> = match frame.pos {
        Some(p) => {
            let layer = ctx.layer_id_at(egui::pos2(p.x, p.y));
            st.hit_areas
                .iter()
                .filter(|a| Some(panel_layer(a.id)) == layer)
                .copied()
                .collect()
        }
        None => Vec::new(),
    };

    let capturing = st.layout.capture().is_some();
    for (kind, pointer, hit) in route_pointer(frame, &topmost, capturing) {
        match st.layout.dispatch(kind, pointer, hit) {
            Some(DragTransition::Started(id)) => {
                tracing::debug!(widget = id.key(), x = pointer.x, y = pointer.y, "drag started");
            }
            Some(DragTransition::Released(id)) => {
                let pos = st.layout.position(id);
                tracing::debug!(widget = id.key(), ?pos, ?kind, "drag ended");
            }
            Some(DragTransition::Moved(..)) | None => {}
        }
    }

    if st.layout.capture().is_some() {
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphablock_core::{Rect, Size};

    fn areas() -> Vec<PanelHitAreas> {
        vec![PanelHitAreas {
            id: WidgetId::Graph,
            handle: Rect::from_min_size(Position::new(100.0, 100.0), Size::new(500.0, 30.0)),
            controls: None,
            body: Rect::from_min_size(Position::new(100.0, 100.0), Size::new(500.0, 350.0)),
        }]
    }

    #[test]
    fn press_on_header_routes_down_then_move() {
        let frame = PointerFrame {
            focused: true,
            pos: Some(Position::new(120.0, 110.0)),
            pressed: true,
            released: false,
        };
        let events = route_pointer(frame, &areas(), false);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, PointerKind::Down);
        assert_eq!(events[0].2, Some((WidgetId::Graph, HitTarget::Handle)));
        assert_eq!(events[1].0, PointerKind::Move);
    }

    #[test]
    fn quick_click_ends_in_same_frame() {
        let frame = PointerFrame {
            focused: true,
            pos: Some(Position::new(120.0, 110.0)),
            pressed: true,
            released: true,
        };
        let kinds: Vec<_> = route_pointer(frame, &areas(), false)
            .into_iter()
            .map(|e| e.0)
            .collect();
        assert_eq!(kinds, vec![PointerKind::Down, PointerKind::Move, PointerKind::Up]);
    }

    #[test]
    fn focus_loss_cancels_active_drag() {
        let frame = PointerFrame {
            focused: false,
            pos: Some(Position::new(10.0, 10.0)),
            ..Default::default()
        };
        let events = route_pointer(frame, &areas(), true);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, PointerKind::Cancel);

        assert!(route_pointer(frame, &areas(), false).is_empty());
    }

    #[test]
    fn pointer_leaving_window_cancels_on_release() {
        let frame = PointerFrame {
            focused: true,
            pos: None,
            pressed: false,
            released: true,
        };
        let events = route_pointer(frame, &areas(), true);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, PointerKind::Cancel);
    }
}
