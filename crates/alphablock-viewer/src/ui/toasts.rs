use alphablock_core::{VisibilityAnnouncer, WidgetId};
use bevy_egui::egui;
use std::collections::VecDeque;

use crate::ui::theme::ThemePalette;

const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub shown_at: f64,
}

/// Short-lived notifications stacked in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    ttl: f64,
    now: f64,
}

impl Toasts {
    pub fn new(ttl_secs: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl: f64::from(ttl_secs.max(0.5)),
            now: 0.0,
        }
    }

    pub fn success(&mut self, title: impl Into<String>) {
        self.push(ToastKind::Success, title.into(), None);
    }

    pub fn info(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(ToastKind::Info, title.into(), Some(description.into()));
    }

    pub fn warning(&mut self, title: impl Into<String>) {
        self.push(ToastKind::Warning, title.into(), None);
    }

    pub fn push(&mut self, kind: ToastKind, title: String, description: Option<String>) {
        tracing::debug!(%title, "toast");
        self.queue.push_back(Toast {
            kind,
            title,
            description,
            shown_at: self.now,
        });
        while self.queue.len() > MAX_TOASTS {
            self.queue.pop_front();
        }
    }

    /// Advances the clock and drops expired toasts.
    pub fn tick(&mut self, now: f64) {
        self.now = now;
        let ttl = self.ttl;
        self.queue.retain(|t| now - t.shown_at < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl VisibilityAnnouncer for Toasts {
    fn announce(&mut self, widget: WidgetId, visible: bool) {
        let name = widget.name();
        let (state, detail) = if visible {
            ("shown", "visible")
        } else {
            ("hidden", "hidden")
        };
        self.push(
            ToastKind::Success,
            format!("{name} {state}"),
            Some(format!("{name} is now {detail}")),
        );
    }
}

pub fn show_toasts(ctx: &egui::Context, toasts: &Toasts, palette: &ThemePalette) {
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("toasts"))
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.set_max_width((screen.width() - 32.0).clamp(160.0, 320.0));
            for toast in toasts.iter() {
                let color = match toast.kind {
                    ToastKind::Success => palette.good,
                    ToastKind::Info => palette.info,
                    ToastKind::Warning => palette.caution,
                };
                palette
                    .panel_frame()
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(color, "●");
                            ui.vertical(|ui| {
                                ui.strong(&toast.title);
                                if let Some(d) = &toast.description {
                                    ui.label(egui::RichText::new(d).small().color(palette.text_dim));
                                }
                            });
                        });
                    });
                ui.add_space(6.0);
            }
        });
}
