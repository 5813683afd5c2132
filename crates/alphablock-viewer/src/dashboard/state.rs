use alphablock_core::climate::Actuators;
use alphablock_core::mock::{self, ActivityKind, ActivityLog, HistoryPoint, TicketDraft};
use alphablock_core::telemetry::Metrics;
use alphablock_core::{PanelHitAreas, Position, WidgetId, WidgetLayout};
use bevy::prelude::Resource;
use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::feed::{FeedCommand, Incoming};
use crate::ui::theme::{Theme, ThemePalette};
use crate::ui::toasts::Toasts;
use crate::util::config::ViewerConfig;
use crate::util::store::NameStore;

pub const CAMERA_HOME: Position = Position::new(50.0, 50.0);

#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    Connecting,
    Live { interval_ms: u64 },
    Stopped,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupportTab {
    #[default]
    KnowledgeBase,
    Ticket,
}

#[derive(Debug, Default)]
pub struct UiState {
    pub help_open: bool,
    pub control_open: bool,
    pub camera_dialog_open: bool,
    pub support_open: bool,
    pub support_tab: SupportTab,
    pub kb_query: String,
    pub name_prompt_open: bool,
    pub name_input: String,
    pub notifications: bool,
}

#[derive(Resource)]
pub struct DashboardState {
    pub cfg: ViewerConfig,
    pub layout: WidgetLayout,
    /// Panel rects from the last rendered frame, in render order.
    pub hit_areas: Vec<PanelHitAreas>,

    pub metrics: Metrics,
    pub history: Vec<HistoryPoint>,
    pub activity: ActivityLog,
    pub feed: FeedStatus,
    pub now: DateTime<Utc>,

    pub actuators: Actuators,
    pub overhead_camera: bool,
    pub camera_pos: Position,

    pub ui: UiState,
    pub ticket: TicketDraft,
    pub toasts: Toasts,
    pub palette: ThemePalette,
    pub store: NameStore,

    pub pending: Vec<FeedCommand>,
    pub config_dirty: bool,
}

impl DashboardState {
    pub fn new(cfg: ViewerConfig, store: NameStore) -> Self {
        let now = Utc::now();
        let mut rng = match cfg.feed_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut history = mock::generate_history(Local::now().naive_local(), &mut rng);
        if let Some(last) = history.last_mut() {
            last.label = "Now".to_string();
        }

        // Panels mount on the first frame, against the real screen rect.
        let layout = WidgetLayout::deferred(cfg.widgets, cfg.mobile_breakpoint);
        let name_prompt_open = store.user_name().is_none();

        Self {
            layout,
            hit_areas: Vec::new(),
            metrics: Metrics::sample(now),
            history,
            activity: ActivityLog::seeded(cfg.activity_capacity, mock::activity_log(now)),
            feed: FeedStatus::Connecting,
            now,
            actuators: Actuators::default(),
            overhead_camera: true,
            camera_pos: CAMERA_HOME,
            ui: UiState {
                name_prompt_open,
                notifications: true,
                ..Default::default()
            },
            ticket: TicketDraft::default(),
            toasts: Toasts::new(cfg.toast_secs),
            palette: ThemePalette::for_theme(cfg.theme),
            store,
            pending: Vec::new(),
            config_dirty: false,
            cfg,
        }
    }

    pub fn apply(&mut self, msg: Incoming) {
        match msg {
            Incoming::Started { interval_ms } => {
                tracing::info!(interval_ms, "telemetry feed started");
                self.feed = FeedStatus::Live { interval_ms };
            }
            Incoming::Reading(metrics) => {
                if let Some(last) = self.history.last_mut() {
                    last.temperature = metrics.temperature;
                    last.humidity = metrics.humidity;
                }
                self.metrics = metrics;
            }
            Incoming::Activity(entry) => {
                if self.ui.notifications && entry.kind == ActivityKind::Warning {
                    self.toasts.warning(entry.message.clone());
                }
                self.activity.push(entry);
            }
            Incoming::Error(e) => {
                tracing::warn!(error = %e, "telemetry feed error");
                self.feed = FeedStatus::Failed(e);
            }
            Incoming::Stopped => {
                if !matches!(self.feed, FeedStatus::Failed(_)) {
                    self.feed = FeedStatus::Stopped;
                }
            }
        }
    }

    pub fn user_name(&self) -> &str {
        self.store.user_name().unwrap_or("Guest")
    }

    /// Toolbar action: a collapsed panel is restored, anything else flips
    /// visibility.
    pub fn toggle_widget(&mut self, id: WidgetId) {
        if self.layout.is_collapsed(id) {
            self.layout.toggle_collapse(id);
            tracing::debug!(widget = id.key(), "panel restored");
            return;
        }
        let visible = self.layout.toggle(id, &mut self.toasts);
        tracing::debug!(widget = id.key(), visible, "widget toggled");
    }

    pub fn collapse_widget(&mut self, id: WidgetId) {
        if let Some(collapsed) = self.layout.toggle_collapse(id) {
            tracing::debug!(widget = id.key(), collapsed, "panel collapse toggled");
        }
    }

    pub fn set_humidifier(&mut self, on: bool) {
        if self.actuators.humidifier == on {
            return;
        }
        self.actuators.humidifier = on;
        self.toasts.success(if on { "Humidifier on" } else { "Humidifier off" });
        self.pending.push(FeedCommand::SetActuators(self.actuators));
    }

    pub fn set_grow_light(&mut self, on: bool) {
        if self.actuators.grow_light == on {
            return;
        }
        self.actuators.grow_light = on;
        self.toasts.success(if on { "Grow light on" } else { "Grow light off" });
        self.pending.push(FeedCommand::SetActuators(self.actuators));
    }

    pub fn switch_camera(&mut self) {
        self.overhead_camera = !self.overhead_camera;
        if self.overhead_camera {
            self.toasts
                .info("Switched to overhead camera", "Viewing from top down perspective");
        } else {
            self.toasts
                .info("Switched to headmounted camera", "Viewing from camera perspective");
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.cfg.theme == theme {
            return;
        }
        self.cfg.theme = theme;
        self.palette = ThemePalette::for_theme(theme);
        self.config_dirty = true;
    }

    pub fn set_camera_pos(&mut self, pos: Position) {
        self.camera_pos = Position::new(pos.x.clamp(0.0, 100.0), pos.y.clamp(0.0, 100.0));
    }

    /// Returns whether the ticket was accepted.
    pub fn submit_ticket(&mut self) -> bool {
        if let Some(field) = self.ticket.missing_field() {
            self.toasts.warning(format!("{field} is required"));
            return false;
        }
        tracing::info!(
            subject = %self.ticket.subject,
            category = ?self.ticket.category,
            "support ticket submitted"
        );
        self.toasts
            .info("Support ticket submitted", "Our team will get back to you shortly");
        self.ticket.clear();
        self.ui.support_open = false;
        true
    }

    pub fn save_user_name(&mut self) {
        let name = self.ui.name_input.trim().to_string();
        if name.is_empty() {
            return;
        }
        if let Err(e) = self.store.set_user_name(&name) {
            tracing::warn!(error = %e, "failed to persist operator name");
        }
        self.ui.name_prompt_open = false;
        self.toasts.success("Welcome to Alpha Block!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphablock_core::mock::{ActivityEntry, TicketCategory};
    use alphablock_core::Viewport;

    fn state() -> DashboardState {
        let cfg = ViewerConfig {
            feed_seed: Some(5),
            ..ViewerConfig::default()
        };
        let mut st = DashboardState::new(cfg, NameStore::default());
        st.layout.resize(Viewport::new(1280.0, 800.0));
        st
    }

    #[test]
    fn reading_updates_latest_history_point() {
        let mut st = state();
        let mut m = st.metrics.clone();
        m.temperature = 31.0;
        m.humidity = 77.0;
        st.apply(Incoming::Reading(m));

        let last = st.history.last().expect("history");
        assert_eq!(last.label, "Now");
        assert_eq!(last.temperature, 31.0);
        assert_eq!(st.metrics.humidity, 77.0);
    }

    #[test]
    fn warnings_surface_as_toasts() {
        let mut st = state();
        let before = st.toasts.len();
        st.apply(Incoming::Activity(ActivityEntry::new(
            ActivityKind::Warning,
            "Humidity dropped below 70%",
            Utc::now(),
        )));
        assert_eq!(st.toasts.len(), before + 1);
        assert_eq!(
            st.activity.iter().next().map(|e| e.message.as_str()),
            Some("Humidity dropped below 70%")
        );
    }

    #[test]
    fn toolbar_restores_collapsed_panel_instead_of_hiding() {
        let mut st = state();
        st.collapse_widget(WidgetId::Metrics);
        assert!(st.layout.is_collapsed(WidgetId::Metrics));

        st.toggle_widget(WidgetId::Metrics);
        assert!(st.layout.is_visible(WidgetId::Metrics));
        assert!(!st.layout.is_collapsed(WidgetId::Metrics));
    }

    #[test]
    fn actuator_changes_are_queued_once() {
        let mut st = state();
        st.set_humidifier(true);
        st.set_humidifier(true);
        assert_eq!(
            st.pending,
            vec![FeedCommand::SetActuators(Actuators {
                humidifier: true,
                grow_light: false,
            })]
        );
    }

    #[test]
    fn incomplete_ticket_is_rejected() {
        let mut st = state();
        st.ui.support_open = true;
        st.ticket.subject = "Sensor offline".into();
        assert!(!st.submit_ticket());
        assert!(st.ui.support_open);

        st.ticket.description = "No readings since noon".into();
        st.ticket.category = Some(TicketCategory::Technical);
        assert!(st.submit_ticket());
        assert!(!st.ui.support_open);
        assert_eq!(st.ticket, TicketDraft::default());
    }

    #[test]
    fn panels_wait_for_the_first_screen_rect() {
        let cfg = ViewerConfig {
            feed_seed: Some(5),
            window_width: 1280.0,
            window_height: 800.0,
            ..ViewerConfig::default()
        };
        let mut st = DashboardState::new(cfg, NameStore::default());
        assert_eq!(st.layout.position(WidgetId::Metrics), None);

        st.layout.resize(Viewport::new(1000.0, 700.0));
        assert_eq!(
            st.layout.position(WidgetId::Metrics),
            Some(Position::new(670.0, 80.0))
        );
    }

    #[test]
    fn failure_status_survives_stop() {
        let mut st = state();
        st.apply(Incoming::Error("boom".into()));
        st.apply(Incoming::Stopped);
        assert_eq!(st.feed, FeedStatus::Failed("boom".into()));
    }
}
