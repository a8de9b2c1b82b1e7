//! Application theme

use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Showdesk Dark".to_string(),
            dark_mode: true,
        }
    }
}

/// Apply the application theme. The palette below assumes dark mode;
/// a light theme falls back to egui's stock light visuals.
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    if !theme.dark_mode {
        ctx.set_style(Style::default());
        ctx.set_visuals(Visuals::light());
        return;
    }

    let mut style = Style::default();
    let mut visuals = Visuals::dark();

    let bg_color = Color32::from_rgb(20, 21, 24);
    let panel_bg = Color32::from_rgb(28, 29, 33);
    let widget_bg = Color32::from_rgb(38, 39, 44);
    let hover_color = Color32::from_rgb(48, 49, 55);
    let active_color = Color32::from_rgb(58, 59, 66);
    let accent = accent_color();
    let text_color = Color32::from_rgb(222, 222, 224);

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = bg_color;
    visuals.faint_bg_color = widget_bg;

    visuals.widgets.noninteractive.bg_fill = widget_bg;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(58, 59, 66));
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(66, 67, 74));
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = hover_color;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Color32::from_rgb(78, 79, 86));
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = active_color;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    visuals.window_shadow.extrusion = 8.0;
    visuals.popup_shadow.extrusion = 4.0;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);
    style.spacing.indent = 20.0;

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Accent color for the theme.
pub fn accent_color() -> Color32 {
    Color32::from_rgb(120, 160, 245)
}

/// Error color for the theme.
pub fn error_color() -> Color32 {
    Color32::from_rgb(228, 86, 86)
}

/// Warning color for the theme.
pub fn warning_color() -> Color32 {
    Color32::from_rgb(228, 178, 86)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_flag_selects_the_visuals() {
        let ctx = Context::default();

        apply_theme(&ctx, &Theme::default());
        assert!(ctx.style().visuals.dark_mode);

        let light = Theme {
            name: "Showdesk Light".to_string(),
            dark_mode: false,
        };
        apply_theme(&ctx, &light);
        assert!(!ctx.style().visuals.dark_mode);
    }
}
