use alphablock_core::telemetry::Metrics;
use bevy::prelude::*;
use chrono::Utc;
use std::time::Duration;

use crate::app::resources::{FeedRx, FeedTx};
use crate::dashboard::{DashboardState, FeedStatus};
use crate::feed::{spawn_feed, FeedSettings};
use crate::util::config::{self, ViewerConfig};
use crate::util::store::NameStore;

pub mod resources;

pub struct AlphaBlockPlugin {
    cfg: ViewerConfig,
}

impl AlphaBlockPlugin {
    pub fn new(cfg: ViewerConfig) -> Self {
        Self { cfg }
    }
}

impl Plugin for AlphaBlockPlugin {
    fn build(&self, app: &mut App) {
        let cfg = self.cfg.clone();
        let mut st = DashboardState::new(cfg.clone(), NameStore::open_default());

        let (tx, rx) = crossbeam_channel::unbounded();
        let settings = FeedSettings {
            interval: Duration::from_millis(cfg.feed_interval_ms),
            seed: cfg.feed_seed,
            initial: Metrics::sample(Utc::now()),
        };
        match spawn_feed(settings, tx) {
            Ok(handle) => {
                app.insert_resource(FeedTx(handle));
            }
            Err(e) => {
                tracing::warn!(error = %e, "telemetry feed not started");
                st.feed = FeedStatus::Failed(e.to_string());
            }
        }

        app.insert_resource(st)
            .insert_resource(FeedRx(rx))
            .add_systems(Startup, crate::render::setup_scene)
            .add_systems(
                Update,
                (
                    pump_feed,
                    crate::dashboard::tick_housekeeping,
                    crate::ui::handle_shortcuts,
                    crate::dashboard::drag_input,
                    crate::ui::ui_header,
                    crate::ui::ui_toolbar,
                    crate::ui::ui_widgets,
                    crate::ui::ui_overlay,
                    crate::ui::ui_dialogs,
                    crate::ui::help_overlay,
                    crate::ui::ui_toasts,
                    flush_commands,
                    crate::render::sync_clear_color,
                )
                    .chain(),
            );
    }
}

fn pump_feed(mut st: ResMut<DashboardState>, rx: Res<FeedRx>) {
    for msg in rx.0.try_iter().take(1_000) {
        st.apply(msg);
    }
}

/// Forwards queued actuator changes to the feed and persists config edits.
fn flush_commands(mut st: ResMut<DashboardState>, feed: Option<Res<FeedTx>>) {
    let pending = std::mem::take(&mut st.pending);
    if let Some(feed) = feed {
        for cmd in pending {
            feed.0.send(cmd);
        }
    }

    if st.config_dirty {
        st.config_dirty = false;
        if let Err(e) = config::save(&st.cfg) {
            tracing::warn!(error = %e, "failed to save viewer config");
        }
    }
}
