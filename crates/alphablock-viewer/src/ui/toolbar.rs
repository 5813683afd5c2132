use alphablock_core::WidgetId;
use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::dashboard::DashboardState;
use crate::ui::panel::icon_for;

/// Left-edge column of widget toggles plus the camera switch.
pub fn ui_toolbar(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    let ctx = contexts.ctx_mut();
    let palette = st.palette;
    let mut toggled = None;
    let mut switch_camera = false;

    egui::Area::new(egui::Id::new("vertical-toolbar"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::LEFT_CENTER, egui::vec2(8.0, 0.0))
        .show(ctx, |ui| {
            palette
                .panel_frame()
                .inner_margin(egui::Margin::same(6.0))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        for id in WidgetId::ALL {
                            let visible = st.layout.is_visible(id);
                            let collapsed = st.layout.is_collapsed(id);
                            let text = egui::RichText::new(icon_for(id)).size(18.0).color(
                                if collapsed {
                                    palette.caution
                                } else if visible {
                                    palette.accent
                                } else {
                                    palette.text_dim
                                },
                            );
                            let hint = match (visible, collapsed) {
                                (true, true) => format!("Restore {}", id.name()),
                                (true, false) => format!("Hide {}", id.name()),
                                (false, _) => format!("Show {}", id.name()),
                            };
                            if ui
                                .selectable_label(visible && !collapsed, text)
                                .on_hover_text(hint)
                                .clicked()
                            {
                                toggled = Some(id);
                            }
                        }
                        ui.separator();
                        let cam = if st.overhead_camera { "🎥" } else { "👁" };
                        if ui
                            .button(egui::RichText::new(cam).size(18.0))
                            .on_hover_text("Switch camera view")
                            .clicked()
                        {
                            switch_camera = true;
                        }
                    });
                });
        });

    if let Some(id) = toggled {
        st.toggle_widget(id);
    }
    if switch_camera {
        st.switch_camera();
    }
}
