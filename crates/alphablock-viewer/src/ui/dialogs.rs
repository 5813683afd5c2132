use alphablock_core::mock::{search_articles, TicketCategory};
use alphablock_core::Position;
use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::dashboard::state::CAMERA_HOME;
use crate::dashboard::{DashboardState, SupportTab};
use crate::ui::panel::to_core_rect;
use crate::ui::theme::Theme;

pub fn ui_dialogs(mut contexts: EguiContexts, mut st: ResMut<DashboardState>) {
    let ctx = contexts.ctx_mut();
    control_panel(ctx, &mut st);
    camera_controls(ctx, &mut st);
    support_dialog(ctx, &mut st);
    name_prompt(ctx, &mut st);
}

fn control_panel(ctx: &egui::Context, st: &mut DashboardState) {
    let mut open = st.ui.control_open;
    egui::Window::new("Control Panel")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 72.0))
        .show(ctx, |ui| {
            ui.heading("Appearance");
            let mut dark = st.cfg.theme == Theme::Dark;
            if ui.checkbox(&mut dark, "Dark mode").changed() {
                st.set_theme(if dark { Theme::Dark } else { Theme::Light });
            }

            ui.separator();
            ui.heading("Environment");
            let mut humidifier = st.actuators.humidifier;
            if ui.checkbox(&mut humidifier, "Humidifier").changed() {
                st.set_humidifier(humidifier);
            }
            let mut light = st.actuators.grow_light;
            if ui.checkbox(&mut light, "Grow light").changed() {
                st.set_grow_light(light);
            }

            ui.separator();
            ui.heading("Camera");
            if ui.button("Camera position…").clicked() {
                st.ui.camera_dialog_open = true;
            }

            ui.separator();
            ui.checkbox(&mut st.ui.notifications, "Alert notifications");
        });
    st.ui.control_open = open;
}

fn camera_controls(ctx: &egui::Context, st: &mut DashboardState) {
    let mut open = st.ui.camera_dialog_open;
    egui::Window::new("Camera Position")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.label("Drag the marker to move the camera.");
            let side = 260.0;
            let (resp, painter) =
                ui.allocate_painter(egui::vec2(side, side), egui::Sense::click_and_drag());
            let rect = resp.rect;
            let palette = st.palette;

            if resp.is_pointer_button_down_on() || resp.clicked() {
                if let Some(p) = resp.interact_pointer_pos() {
                    let pct = to_core_rect(rect).percent_of(Position::new(p.x, p.y));
                    st.set_camera_pos(pct);
                }
            }

            painter.rect_filled(rect, 6.0, palette.header_fill);
            for i in 1..4 {
                let f = i as f32 / 4.0;
                let x = rect.left() + rect.width() * f;
                let y = rect.top() + rect.height() * f;
                let grid = egui::Stroke::new(1.0, palette.grid);
                painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], grid);
                painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], grid);
            }
            let marker = egui::pos2(
                rect.left() + rect.width() * st.camera_pos.x / 100.0,
                rect.top() + rect.height() * st.camera_pos.y / 100.0,
            );
            painter.circle_filled(marker, 10.0, palette.accent);

            ui.horizontal(|ui| {
                ui.monospace(format!("X: {:.0}%  Y: {:.0}%", st.camera_pos.x, st.camera_pos.y));
                if ui.button("Reset").clicked() {
                    st.set_camera_pos(CAMERA_HOME);
                }
            });
        });
    st.ui.camera_dialog_open = open;
}

fn support_dialog(ctx: &egui::Context, st: &mut DashboardState) {
    let mut open = st.ui.support_open;
    let mut submitted = false;
    egui::Window::new("Support Center")
        .open(&mut open)
        .collapsible(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut st.ui.support_tab, SupportTab::KnowledgeBase, "📖 Knowledge Base");
                ui.selectable_value(&mut st.ui.support_tab, SupportTab::Ticket, "🎫 Submit Ticket");
            });
            ui.separator();

            match st.ui.support_tab {
                SupportTab::KnowledgeBase => {
                    ui.add(
                        egui::TextEdit::singleline(&mut st.ui.kb_query)
                            .hint_text("Search knowledge base..."),
                    );
                    ui.add_space(6.0);
                    let hits = search_articles(&st.ui.kb_query);
                    if hits.is_empty() {
                        ui.label("No matching articles.");
                    }
                    egui::ScrollArea::vertical()
                        .id_source("kb-articles")
                        .max_height(320.0)
                        .show(ui, |ui| {
                            for article in hits {
                                ui.group(|ui| {
                                    ui.strong(format!("❔ {}", article.title));
                                    ui.label(article.body);
                                });
                            }
                        });
                }
                SupportTab::Ticket => {
                    ui.label("Subject");
                    ui.add(
                        egui::TextEdit::singleline(&mut st.ticket.subject)
                            .hint_text("Brief description of your issue"),
                    );
                    ui.label("Description");
                    ui.add(
                        egui::TextEdit::multiline(&mut st.ticket.description)
                            .hint_text("Please provide details about your issue...")
                            .desired_rows(5),
                    );
                    ui.label("Category");
                    let selected = st
                        .ticket
                        .category
                        .map(TicketCategory::label)
                        .unwrap_or("Select a category");
                    egui::ComboBox::from_id_source("ticket-category")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for c in TicketCategory::ALL {
                                ui.selectable_value(&mut st.ticket.category, Some(c), c.label());
                            }
                        });
                    ui.add_space(8.0);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.button("➤ Submit Ticket").clicked() {
                            submitted = true;
                        }
                    });
                }
            }
        });

    st.ui.support_open = open;
    if submitted {
        st.submit_ticket();
    }
}

fn name_prompt(ctx: &egui::Context, st: &mut DashboardState) {
    if !st.ui.name_prompt_open {
        return;
    }
    let mut save = false;
    egui::Window::new("Welcome to Alpha Block")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Please enter your name to personalize your experience.");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut st.ui.name_input).hint_text("Your name"),
            );
            let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.horizontal(|ui| {
                let ready = !st.ui.name_input.trim().is_empty();
                if ui.add_enabled(ready, egui::Button::new("Continue")).clicked() || (enter && ready) {
                    save = true;
                }
                if ui.button("Later").clicked() {
                    st.ui.name_prompt_open = false;
                }
            });
        });
    if save {
        st.save_user_name();
    }
}
