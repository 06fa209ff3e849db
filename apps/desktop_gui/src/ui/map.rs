//! World map canvas: plate carree projection, magnitude markers, popups and legend.

use client_core::{MagnitudeBand, MapSurface, Marker};
use eframe::egui;
use shared::{EventId, GeoPoint};

use crate::ui::widgets::color32;

pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    latitude: 20.0,
    longitude: 0.0,
};
pub const DEFAULT_ZOOM: f64 = 2.0;
const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 12.0;
/// Width in pixels of the full longitude range at zoom 0.
const WORLD_WIDTH_AT_ZOOM_ZERO: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.0;
const GRATICULE_STEP: f64 = 30.0;
const MIN_MARKER_PX: f32 = 2.0;

pub struct MapCanvas {
    center: GeoPoint,
    zoom: f64,
    viewport: egui::Vec2,
    layout_stale: bool,
    open_popup: Option<EventId>,
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            viewport: egui::Vec2::ZERO,
            layout_stale: true,
            open_popup: None,
        }
    }
}

impl MapSurface for MapCanvas {
    fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_center();
    }

    fn invalidate_size(&mut self) {
        self.layout_stale = true;
    }
}

impl MapCanvas {
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn layout_stale(&self) -> bool {
        self.layout_stale
    }

    /// Markers are replaced wholesale on refresh, so any open popup goes with them.
    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    fn pixels_per_degree(&self) -> f64 {
        WORLD_WIDTH_AT_ZOOM_ZERO * 2f64.powf(self.zoom) / 360.0
    }

    pub fn project(&self, rect: egui::Rect, point: GeoPoint) -> egui::Pos2 {
        let scale = self.pixels_per_degree();
        let origin = rect.center();
        egui::pos2(
            origin.x + ((point.longitude - self.center.longitude) * scale) as f32,
            origin.y - ((point.latitude - self.center.latitude) * scale) as f32,
        )
    }

    pub fn pan(&mut self, delta: egui::Vec2) {
        let scale = self.pixels_per_degree();
        self.center.longitude -= f64::from(delta.x) / scale;
        self.center.latitude += f64::from(delta.y) / scale;
        self.clamp_center();
    }

    pub fn zoom_by(&mut self, steps: f64) {
        self.zoom = (self.zoom + steps).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn clamp_center(&mut self) {
        self.center.latitude = self.center.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        self.center.longitude = self.center.longitude.clamp(-180.0, 180.0);
    }

    /// Adopts a new viewport size. Returns true when a pending layout pass was consumed.
    pub fn fit_viewport(&mut self, size: egui::Vec2) -> bool {
        let resized = size != self.viewport;
        self.viewport = size;
        if !self.layout_stale {
            return false;
        }
        self.layout_stale = false;
        self.clamp_center();
        tracing::debug!(width = size.x, height = size.y, resized, "map layout recomputed");
        true
    }

    fn marker_at(
        &self,
        rect: egui::Rect,
        markers: &[Marker],
        pointer: egui::Pos2,
    ) -> Option<usize> {
        markers.iter().rposition(|marker| {
            let pos = self.project(rect, marker.location);
            pos.distance(pointer) <= marker_px(marker)
        })
    }

    pub fn show(&mut self, ui: &mut egui::Ui, markers: &[Marker]) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.fit_viewport(rect.size());

        if response.dragged() {
            self.pan(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom_by(f64::from(scroll) / 200.0);
            }
        }
        if response.clicked() {
            self.open_popup = response
                .interact_pointer_pos()
                .and_then(|pointer| self.marker_at(rect, markers, pointer))
                .map(|idx| markers[idx].id.clone());
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0xA8, 0xC8, 0xE0));
        self.paint_graticule(&painter, rect);

        for marker in markers {
            let color = marker.band.color();
            painter.circle(
                self.project(rect, marker.location),
                marker_px(marker),
                egui::Color32::from_rgba_unmultiplied(color.0, color.1, color.2, 180),
                egui::Stroke::new(1.0, color32(color)),
            );
        }

        if let Some(pointer) = response.hover_pos() {
            if self.marker_at(rect, markers, pointer).is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
        }
        self.show_popup(ui, rect, markers);
        paint_legend(&painter, rect);
    }

    fn paint_graticule(&self, painter: &egui::Painter, rect: egui::Rect) {
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(90));
        let mut lon = -180.0;
        while lon <= 180.0 {
            let top = self.project(rect, GeoPoint::new(90.0, lon));
            let bottom = self.project(rect, GeoPoint::new(-90.0, lon));
            painter.line_segment([top, bottom], stroke);
            lon += GRATICULE_STEP;
        }
        let mut lat = -90.0;
        while lat <= 90.0 {
            let west = self.project(rect, GeoPoint::new(lat, -180.0));
            let east = self.project(rect, GeoPoint::new(lat, 180.0));
            painter.line_segment([west, east], stroke);
            lat += GRATICULE_STEP;
        }
    }

    fn show_popup(&mut self, ui: &mut egui::Ui, rect: egui::Rect, markers: &[Marker]) {
        let Some(id) = &self.open_popup else {
            return;
        };
        let Some(marker) = markers.iter().find(|marker| &marker.id == id) else {
            self.open_popup = None;
            return;
        };
        let anchor = self.project(rect, marker.location) + egui::vec2(marker_px(marker), 0.0);
        if !rect.contains(anchor) {
            return;
        }
        egui::Area::new(egui::Id::new("quake_popup"))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let [title, magnitude, depth, time] = marker.popup.lines();
                    ui.strong(title);
                    ui.label(magnitude);
                    ui.label(depth);
                    ui.label(time);
                });
            });
    }
}

fn marker_px(marker: &Marker) -> f32 {
    (marker.radius as f32).max(MIN_MARKER_PX)
}

fn paint_legend(painter: &egui::Painter, rect: egui::Rect) {
    let row_h = 18.0;
    let size = egui::vec2(170.0, row_h * (MagnitudeBand::ALL.len() as f32 + 1.0) + 8.0);
    let legend =
        egui::Rect::from_min_size(rect.right_bottom() - size - egui::vec2(10.0, 10.0), size);
    painter.rect_filled(legend, 4.0, egui::Color32::from_black_alpha(170));
    painter.text(
        legend.left_top() + egui::vec2(8.0, 4.0),
        egui::Align2::LEFT_TOP,
        "Magnitude",
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    for (row, band) in MagnitudeBand::ALL.iter().enumerate() {
        let y = legend.top() + 4.0 + row_h * (row as f32 + 1.5);
        painter.circle_filled(egui::pos2(legend.left() + 14.0, y), 6.0, color32(band.color()));
        painter.text(
            egui::pos2(legend.left() + 28.0, y),
            egui::Align2::LEFT_CENTER,
            format!("{} ({})", band.label(), band.range_caption()),
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }
}
