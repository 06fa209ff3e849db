//! Small reusable widgets for earthquake entries.

use client_core::{Badge, Placeholder, Rgb};
use eframe::egui;

pub fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Magnitude badge. Clickable so the whole row can act as a locate target.
pub fn badge(ui: &mut egui::Ui, badge: &Badge) -> egui::Response {
    let text = egui::RichText::new(format!(" {} ", badge.text))
        .strong()
        .monospace()
        .color(color32(badge.text_color))
        .background_color(color32(badge.fill));
    ui.add(egui::Label::new(text).sense(egui::Sense::click()))
}

pub fn clickable_text(ui: &mut egui::Ui, text: impl Into<egui::WidgetText>) -> egui::Response {
    ui.add(
        egui::Label::new(text)
            .sense(egui::Sense::click())
            .truncate(),
    )
    .on_hover_cursor(egui::CursorIcon::PointingHand)
}

pub fn placeholder(ui: &mut egui::Ui, placeholder: Placeholder) {
    let text = egui::RichText::new(placeholder.message()).italics();
    match placeholder {
        Placeholder::NoResults => ui.weak(text),
        Placeholder::FetchFailed => ui.colored_label(ui.visuals().error_fg_color, text),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_maps_channel_for_channel() {
        assert_eq!(
            color32(Rgb(0x4C, 0xAF, 0x50)),
            egui::Color32::from_rgb(0x4C, 0xAF, 0x50)
        );
    }
}
