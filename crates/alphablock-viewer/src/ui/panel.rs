use alphablock_core::{PanelHitAreas, Position, Rect, Size, WidgetId};
use bevy_egui::egui;

use crate::ui::theme::ThemePalette;

const HEADER_H: f32 = 28.0;

pub fn panel_area_id(id: WidgetId) -> egui::Id {
    egui::Id::new(("alphablock-widget", id.key()))
}

pub fn panel_layer(id: WidgetId) -> egui::LayerId {
    egui::LayerId::new(egui::Order::Middle, panel_area_id(id))
}

pub fn to_core_rect(r: egui::Rect) -> Rect {
    Rect::from_min_max(Position::new(r.min.x, r.min.y), Position::new(r.max.x, r.max.y))
}

pub fn icon_for(id: WidgetId) -> &'static str {
    match id {
        WidgetId::Metrics => "⚙",
        WidgetId::Tasks => "📅",
        WidgetId::Activity => "☰",
        WidgetId::Graph => "📈",
        WidgetId::Minimap => "⌖",
    }
}

pub struct PanelOutput {
    pub hit: PanelHitAreas,
    pub size: Size,
    pub minimize_clicked: bool,
}

/// Floating container with a header that doubles as the drag handle.
pub struct WidgetPanel<'a> {
    id: WidgetId,
    title: &'a str,
    icon: &'a str,
    position: Option<Position>,
    width: f32,
    min_height: Option<f32>,
    minimizable: bool,
    collapsed: bool,
}

impl<'a> WidgetPanel<'a> {
    pub fn new(id: WidgetId) -> Self {
        let spec = id.spec();
        Self {
            id,
            title: id.name(),
            icon: icon_for(id),
            position: None,
            width: spec.width,
            min_height: spec.height,
            minimizable: true,
            collapsed: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// `None` renders the panel in the surrounding flow instead of floating.
    pub fn position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = icon;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Overrides the table height; `None` lets the panel shrink to its
    /// content.
    pub fn height(mut self, height: Option<f32>) -> Self {
        self.min_height = height;
        self
    }

    pub fn minimizable(mut self, on: bool) -> Self {
        self.minimizable = on;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Collapsed panels render nothing, so their content is not run either.
    pub fn show(
        self,
        ui: &mut egui::Ui,
        palette: &ThemePalette,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) -> Option<PanelOutput> {
        if self.collapsed {
            return None;
        }
        match self.position {
            Some(pos) => {
                let area = egui::Area::new(panel_area_id(self.id))
                    .order(egui::Order::Middle)
                    .fixed_pos(egui::pos2(pos.x, pos.y))
                    .constrain(false);
                let ctx = ui.ctx().clone();
                Some(area.show(&ctx, |ui| self.frame(ui, palette, add_contents)).inner)
            }
            None => Some(self.frame(ui, palette, add_contents)),
        }
    }

    fn frame(
        &self,
        ui: &mut egui::Ui,
        palette: &ThemePalette,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) -> PanelOutput {
        let mut minimize_clicked = false;
        let mut controls = None;
        let mut header = egui::Rect::NOTHING;

        let frame = palette.panel_frame().show(ui, |ui| {
            ui.set_width(self.width);

            let header_resp = egui::Frame::none()
                .fill(palette.header_fill)
                .inner_margin(egui::Margin::symmetric(10.0, 4.0))
                .show(ui, |ui| {
                    ui.set_min_height(HEADER_H - 8.0);
                    ui.set_min_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(self.icon).color(palette.accent));
                        ui.strong(self.title);
                        if self.minimizable {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let btn = ui
                                    .small_button("–")
                                    .on_hover_text("Minimize");
                                controls = Some(to_core_rect(btn.rect));
                                minimize_clicked = btn.clicked();
                            });
                        }
                    });
                })
                .response;
            header = header_resp.rect;
            let handle = ui.interact(header, self.handle_id(), egui::Sense::hover());
            if handle.hovered() && !minimize_clicked {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }

            egui::Frame::none()
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    if let Some(h) = self.min_height {
                        ui.set_min_height((h - HEADER_H - 20.0).max(0.0));
                    }
                    add_contents(ui);
                });
        });

        let rect = frame.response.rect;
        PanelOutput {
            hit: PanelHitAreas {
                id: self.id,
                handle: to_core_rect(header),
                controls,
                body: to_core_rect(rect),
            },
            size: Size::new(rect.width(), rect.height()),
            minimize_clicked,
        }
    }

    fn handle_id(&self) -> egui::Id {
        panel_area_id(self.id).with("handle")
    }
}
