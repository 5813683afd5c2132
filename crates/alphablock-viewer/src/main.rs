mod app;
mod dashboard;
mod feed;
mod render;
mod ui;
mod util;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::AlphaBlockPlugin;
use crate::util::config;

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn main() {
    init_tracing();

    let cfg = config::load_or_default();
    tracing::info!(
        unit = %cfg.unit_id,
        crop = %cfg.crop,
        theme = cfg.theme.label(),
        "starting dashboard"
    );

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: format!("Alpha Block {}", cfg.unit_id),
                        resolution: (cfg.window_width, cfg.window_height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::log::LogPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(AlphaBlockPlugin::new(cfg))
        .run();
}
