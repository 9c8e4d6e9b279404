use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

/// Light, classroom-friendly palette. Category tints live in the catalog next
/// to the questions they style; everything app-wide is here.
#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub accent_primary: Color32,
    pub accent_muted: Color32,
    pub success: Color32,
    pub success_soft: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub radius_12: u8,
    pub radius_16: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            surface_1: Color32::WHITE,
            surface_2: Color32::from_rgb(0xEE, 0xF2, 0xFF),
            accent_primary: Color32::from_rgb(0x4F, 0x46, 0xE5),
            accent_muted: Color32::from_rgb(0x43, 0x38, 0xCA),
            success: Color32::from_rgb(0x10, 0xB9, 0x81),
            success_soft: Color32::from_rgb(0xD1, 0xFA, 0xE5),
            danger: Color32::from_rgb(0xEF, 0x44, 0x44),
            text_primary: Color32::from_rgb(0x1F, 0x29, 0x37),
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            text_on_accent: Color32::WHITE,
            border_subtle: Color32::from_rgba_premultiplied(0, 0, 0, 13),
            spacing_8: 8.0,
            spacing_12: 12.0,
            spacing_16: 16.0,
            spacing_24: 24.0,
            radius_12: 12,
            radius_16: 16,
        }
    }
}

impl Theme {
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_0;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface_1;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.bg_stroke = Stroke::NONE;
        visuals.widgets.hovered.bg_fill = self.surface_2;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent_primary);
        visuals.widgets.active.bg_fill = self.accent_muted;
        visuals.widgets.active.fg_stroke.color = self.text_on_accent;
        visuals.selection.bg_fill = self.accent_primary;
        visuals.selection.stroke = Stroke::new(1.0, self.text_on_accent);
        visuals.hyperlink_color = self.accent_primary;
        visuals.window_fill = self.surface_1;
        visuals.window_stroke = Stroke::NONE;
        visuals.window_corner_radius = CornerRadius::same(self.radius_16);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_rgba_premultiplied(0, 0, 0, 48),
        };

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(14.0, 9.0);
        style
            .text_styles
            .insert(TextStyle::Heading, FontId::proportional(26.0));
        style
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(15.0));
        style
            .text_styles
            .insert(TextStyle::Button, FontId::proportional(15.0));
        style
            .text_styles
            .insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    /// Rounded card used for the welcome box and each question screen.
    pub fn card_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(self.spacing_24 as i8))
            .corner_radius(CornerRadius::same(self.radius_16))
            .stroke(Stroke::NONE)
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 18,
                spread: 0,
                color: Color32::from_rgba_premultiplied(0, 0, 0, 30),
            })
    }

    /// Flat inset used for text answers and table cells.
    pub fn inset_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_0)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }
}
