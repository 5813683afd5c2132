use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::dashboard::DashboardState;
use crate::ui::theme::Theme;

pub fn setup_scene(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Keeps the window clear colour and egui visuals in step with the theme.
pub fn sync_clear_color(
    mut contexts: EguiContexts,
    st: Res<DashboardState>,
    mut clear: ResMut<ClearColor>,
    mut applied: Local<Option<Theme>>,
) {
    let theme = st.cfg.theme;
    if *applied == Some(theme) {
        return;
    }
    let [r, g, b] = st.palette.clear_color();
    clear.0 = Color::srgb(r, g, b);
    contexts.ctx_mut().set_visuals(st.palette.visuals());
    *applied = Some(theme);
    tracing::debug!(theme = theme.label(), "theme applied");
}
