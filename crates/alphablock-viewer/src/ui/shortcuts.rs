use alphablock_core::WidgetId;
use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::dashboard::DashboardState;

const WIDGET_KEYS: [(egui::Key, WidgetId); 5] = [
    (egui::Key::Num1, WidgetId::Metrics),
    (egui::Key::Num2, WidgetId::Tasks),
    (egui::Key::Num3, WidgetId::Activity),
    (egui::Key::Num4, WidgetId::Graph),
    (egui::Key::Num5, WidgetId::Minimap),
];

pub fn handle_shortcuts(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    let ctx = contexts.ctx_mut();
    let esc_pressed = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    let wants_keyboard = ctx.wants_keyboard_input();

    if esc_pressed {
        st.ui.help_open = false;
        st.ui.control_open = false;
        st.ui.camera_dialog_open = false;
        st.ui.support_open = false;
    }

    if wants_keyboard {
        return;
    }

    for (key, id) in WIDGET_KEYS {
        if ctx.input(|i| i.key_pressed(key)) {
            st.toggle_widget(id);
        }
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Questionmark)) {
        st.ui.help_open = !st.ui.help_open;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::H)) {
        let on = !st.actuators.humidifier;
        st.set_humidifier(on);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::G)) {
        let on = !st.actuators.grow_light;
        st.set_grow_light(on);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::C)) {
        st.switch_camera();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::T)) {
        let next = st.cfg.theme.toggled();
        st.set_theme(next);
    }
}
