use alphablock_core::{LayoutMode, WidgetId};
use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::dashboard::DashboardState;
use crate::ui::panel::{PanelOutput, WidgetPanel};
use crate::ui::widgets;

const STACK_W: f32 = 320.0;

fn widget_contents(ui: &mut egui::Ui, st: &DashboardState, id: WidgetId) {
    let palette = &st.palette;
    match id {
        WidgetId::Metrics => widgets::metrics_content(
            ui,
            palette,
            &st.metrics,
            st.cfg.cycle_start,
            st.now.date_naive(),
        ),
        WidgetId::Tasks => widgets::care_plan_content(ui, palette, st.cfg.cycle_start),
        WidgetId::Activity => widgets::activity_content(ui, palette, &st.activity, st.now),
        WidgetId::Graph => widgets::history_chart(ui, palette, &st.history, 240.0),
        WidgetId::Minimap => {
            widgets::minimap_content(ui, palette, st.camera_pos, st.overhead_camera)
        }
    }
}

/// Panels that only show title/icon variations of the toolbar defaults.
fn panel_chrome(id: WidgetId) -> Option<(&'static str, &'static str)> {
    match id {
        WidgetId::Tasks => Some(("Pink Oyster Care Plan", "🍄")),
        _ => None,
    }
}

fn chrome(panel: WidgetPanel<'static>, id: WidgetId) -> WidgetPanel<'static> {
    match panel_chrome(id) {
        Some((title, icon)) => panel.title(title).icon(icon),
        None => panel,
    }
}

/// The single-column layout leaves out the camera minimap.
fn stacked_ids(st: &DashboardState) -> Vec<WidgetId> {
    st.layout
        .visible_ids()
        .into_iter()
        .filter(|id| *id != WidgetId::Minimap)
        .collect()
}

/// Stores this frame's panel geometry for the next frame's hit-testing and
/// applies minimize clicks. Panels not drawn this frame lose their size.
pub fn record_frame(st: &mut DashboardState, outputs: Vec<PanelOutput>) {
    st.hit_areas.clear();
    for id in WidgetId::ALL {
        let measured = outputs.iter().find(|o| o.hit.id == id).map(|o| o.size);
        st.layout.set_measured_size(id, measured);
    }
    let mut minimized = Vec::new();
    for out in outputs {
        if out.minimize_clicked {
            minimized.push(out.hit.id);
        }
        st.hit_areas.push(out.hit);
    }
    for id in minimized {
        st.collapse_widget(id);
    }
}

/// Draws every visible widget and records where each one landed so the next
/// frame's pointer routing can hit-test against it.
pub fn ui_widgets(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    let ctx = contexts.ctx_mut();
    let mut outputs = Vec::new();

    match st.layout.mode() {
        LayoutMode::Floating => {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    for id in st.layout.visible_ids() {
                        let out = chrome(WidgetPanel::new(id), id)
                            .position(st.layout.position(id))
                            .collapsed(st.layout.is_collapsed(id))
                            .show(ui, &st.palette, |ui| widget_contents(ui, &st, id));
                        outputs.extend(out);
                    }
                });
        }
        LayoutMode::Stacked => {
            egui::CentralPanel::default()
                .frame(egui::Frame::none().inner_margin(egui::Margin::same(12.0)))
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_source("stacked-widgets")
                        .show(ui, |ui| {
                            let width = ui.available_width().min(STACK_W * 1.5);
                            for id in stacked_ids(&st) {
                                chrome(WidgetPanel::new(id), id)
                                    .width(width - 24.0)
                                    .height(None)
                                    .minimizable(false)
                                    .show(ui, &st.palette, |ui| widget_contents(ui, &st, id));
                                ui.add_space(12.0);
                            }
                        });
                });
        }
    }

    record_frame(&mut st, outputs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::ViewerConfig;
    use crate::util::store::NameStore;
    use alphablock_core::{PanelHitAreas, Position, Rect, Size, Viewport};

    fn state(width: f32) -> DashboardState {
        let mut st = DashboardState::new(ViewerConfig::default(), NameStore::default());
        st.layout.resize(Viewport::new(width, 800.0));
        st
    }

    fn output(id: WidgetId, size: Size, minimize_clicked: bool) -> PanelOutput {
        let body = Rect::from_min_size(Position::new(10.0, 10.0), size);
        PanelOutput {
            hit: PanelHitAreas {
                id,
                handle: Rect::from_min_size(body.min, Size::new(size.width, 28.0)),
                controls: None,
                body,
            },
            size,
            minimize_clicked,
        }
    }

    #[test]
    fn measured_sizes_follow_each_frame() {
        let mut st = state(1280.0);
        let size = Size::new(320.0, 180.0);
        record_frame(&mut st, vec![output(WidgetId::Metrics, size, false)]);

        let measured = |st: &DashboardState| {
            st.layout
                .draggable(WidgetId::Metrics)
                .and_then(|d| d.measured_size())
        };
        assert_eq!(measured(&st), Some(size));
        assert_eq!(st.hit_areas.len(), 1);

        record_frame(&mut st, Vec::new());
        assert_eq!(measured(&st), None);
        assert!(st.hit_areas.is_empty());
    }

    #[test]
    fn minimize_click_collapses_panel() {
        let mut st = state(1280.0);
        record_frame(
            &mut st,
            vec![output(WidgetId::Tasks, Size::new(320.0, 200.0), true)],
        );
        assert!(st.layout.is_collapsed(WidgetId::Tasks));
    }

    #[test]
    fn stacked_column_leaves_out_minimap() {
        let st = state(600.0);
        assert!(st.layout.is_visible(WidgetId::Minimap));
        let ids = stacked_ids(&st);
        assert!(!ids.contains(&WidgetId::Minimap));
        assert!(ids.contains(&WidgetId::Metrics));
    }
}
