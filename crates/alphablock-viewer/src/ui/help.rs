use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::dashboard::DashboardState;

pub fn help_overlay(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    if !st.ui.help_open {
        return;
    }

    let mut open = true;
    egui::Window::new("Help / Shortcuts")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("1–5 — Toggle Metrics / Care Plan / Activity / History / Camera");
            ui.label("Drag a panel by its header; – minimizes it");
            ui.label("H — Toggle humidifier");
            ui.label("G — Toggle grow light");
            ui.label("C — Switch camera view");
            ui.label("T — Toggle theme");
            ui.label("Esc — Close dialogs");
            ui.label("? — Toggle help");
        });
    st.ui.help_open = open;
}
