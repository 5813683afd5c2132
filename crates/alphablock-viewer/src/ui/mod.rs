pub mod dialogs;
pub mod help;
pub mod hud;
pub mod layout;
pub mod panel;
pub mod shortcuts;
pub mod theme;
pub mod toasts;
pub mod toolbar;
pub mod widgets;

use bevy::prelude::Res;
use bevy_egui::EguiContexts;

use crate::dashboard::DashboardState;

pub use dialogs::ui_dialogs;
pub use help::help_overlay;
pub use hud::{ui_header, ui_overlay};
pub use layout::ui_widgets;
pub use shortcuts::handle_shortcuts;
pub use toolbar::ui_toolbar;

pub const HEADER_H: f32 = 56.0;
pub const HUD_EDGE_PADDING: f32 = 12.0;
pub const SPARK_POINTS: usize = 12;

pub fn ui_toasts(mut contexts: EguiContexts, st: Res<DashboardState>) {
    toasts::show_toasts(contexts.ctx_mut(), &st.toasts, &st.palette);
}
