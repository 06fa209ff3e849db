use std::time::{Duration, Instant};

use client_core::{NavigationHandler, SelectEvent, Settings, ViewModeController, ViewModel};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{DisplayMode, FilterParams, SortKey};
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::map::MapCanvas;
use crate::ui::widgets;

const MAX_DEPTH_SLIDER_KM: f64 = 700.0;
const MAX_MAGNITUDE_SLIDER: f64 = 9.0;

pub struct QuakeWatchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    views: watch::Receiver<ViewModel>,
    view: ViewModel,
    modes: ViewModeController,
    navigator: NavigationHandler,
    map: MapCanvas,
    filter: FilterParams,
    sort: SortKey,
    status: String,
}

impl QuakeWatchApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        views: watch::Receiver<ViewModel>,
        settings: &Settings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            views,
            view: ViewModel::default(),
            modes: ViewModeController::new(settings.layout_delay),
            navigator: NavigationHandler::new(settings.locate_zoom),
            map: MapCanvas::default(),
            filter: FilterParams {
                min_magnitude: settings.min_magnitude,
                max_depth_km: settings.max_depth_km,
                query: String::new(),
            },
            sort: SortKey::default(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::BackendFailed(reason) => {
                    tracing::error!(%reason, "backend unavailable");
                    self.status = format!("Backend unavailable: {reason}");
                }
            }
        }
    }

    /// Adopts the newest complete refresh, if one arrived since the last frame.
    fn sync_view(&mut self) {
        if !self.views.has_changed().unwrap_or(false) {
            return;
        }
        self.view = self.views.borrow_and_update().clone();
        self.map.close_popup();
        self.status.clear();
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn filters_changed(&mut self) {
        self.send(BackendCommand::SetFilter(self.filter.clone()));
    }

    fn show_sidebar(&mut self, ui: &mut egui::Ui, selected: &mut Option<SelectEvent>) {
        ui.heading("Earthquake Tracker");
        ui.separator();

        ui.label("Minimum magnitude");
        let min_mag = ui.add(
            egui::Slider::new(&mut self.filter.min_magnitude, 0.0..=MAX_MAGNITUDE_SLIDER)
                .step_by(0.1)
                .fixed_decimals(1),
        );
        ui.label("Maximum depth (km)");
        let max_depth = ui.add(
            egui::Slider::new(&mut self.filter.max_depth_km, 0.0..=MAX_DEPTH_SLIDER_KM)
                .step_by(10.0),
        );
        let search = ui.add(
            egui::TextEdit::singleline(&mut self.filter.query).hint_text("Search location..."),
        );
        if min_mag.changed() || max_depth.changed() || search.changed() {
            self.filters_changed();
        }
        if ui.button("Refresh now").clicked() {
            self.send(BackendCommand::RefreshNow);
        }

        ui.separator();
        self.show_stats(ui);

        ui.separator();
        ui.strong("Recent earthquakes");
        egui::ScrollArea::vertical()
            .id_salt("recent_panel")
            .show(ui, |ui| match &self.view.panel {
                None => {
                    ui.weak("Loading...");
                }
                Some(panel) => {
                    if let Some(placeholder) = panel.placeholder() {
                        widgets::placeholder(ui, placeholder);
                    }
                    for entry in panel.entries() {
                        ui.horizontal(|ui| {
                            let badge = widgets::badge(ui, &entry.badge);
                            let place = widgets::clickable_text(ui, &entry.place);
                            if badge.clicked() || place.clicked() {
                                *selected = Some(SelectEvent {
                                    id: entry.id.clone(),
                                });
                            }
                        });
                        ui.weak(format!("Depth: {}", entry.depth));
                    }
                }
            });
    }

    fn show_stats(&self, ui: &mut egui::Ui) {
        let Some(stats) = &self.view.stats else {
            ui.weak("Waiting for first update");
            return;
        };
        egui::Grid::new("stats_grid").num_columns(2).show(ui, |ui| {
            ui.label("Total earthquakes");
            ui.strong(stats.total_count.to_string());
            ui.end_row();
            ui.label("Matching filters");
            ui.strong(stats.matched_count.to_string());
            ui.end_row();
            ui.label("Max magnitude");
            ui.strong(stats.max_magnitude_label());
            ui.end_row();
            ui.label("Last updated");
            ui.strong(stats.refreshed_at_label());
            ui.end_row();
        });
    }

    fn show_mode_toggle(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            let mut mode = self.modes.mode();
            let map = ui.selectable_value(&mut mode, DisplayMode::Map, "Map");
            let list = ui.selectable_value(&mut mode, DisplayMode::List, "List");
            if map.clicked() || list.clicked() {
                self.modes.select(mode, now);
            }
            if !self.status.is_empty() {
                ui.separator();
                ui.weak(&self.status);
            }
        });
    }

    fn show_list(&mut self, ui: &mut egui::Ui, selected: &mut Option<SelectEvent>) {
        ui.horizontal(|ui| {
            if let Some(stats) = &self.view.stats {
                ui.strong(stats.matched_caption());
            }
            ui.separator();
            ui.label("Sort by");
            let mut sort = self.sort;
            for key in SortKey::ALL {
                ui.selectable_value(&mut sort, key, key.label());
            }
            if sort != self.sort {
                self.sort = sort;
                self.send(BackendCommand::SetSort(sort));
            }
        });
        ui.separator();

        let Some(list) = &self.view.list else {
            ui.weak("Loading...");
            return;
        };
        if let Some(placeholder) = list.placeholder() {
            widgets::placeholder(ui, placeholder);
            return;
        }
        egui::ScrollArea::vertical()
            .id_salt("event_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in list.entries() {
                    ui.horizontal(|ui| {
                        let badge = widgets::badge(ui, &entry.badge);
                        ui.vertical(|ui| {
                            let place = widgets::clickable_text(
                                ui,
                                egui::RichText::new(&entry.place).strong(),
                            );
                            ui.weak(format!("Depth: {} | {}", entry.depth, entry.time));
                            if badge.clicked() || place.clicked() {
                                *selected = Some(SelectEvent {
                                    id: entry.id.clone(),
                                });
                            }
                        });
                    });
                    ui.separator();
                }
            });
    }
}

impl eframe::App for QuakeWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_view();

        let now = Instant::now();
        self.modes.poll_layout(now, &mut self.map);

        let mut selected = None;
        egui::SidePanel::left("filters")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.show_sidebar(ui, &mut selected));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_mode_toggle(ui, now);
            ui.separator();
            match self.modes.mode() {
                DisplayMode::Map => self.map.show(ui, &self.view.markers),
                DisplayMode::List => self.show_list(ui, &mut selected),
            }
        });

        if let Some(event) = selected {
            self.navigator
                .on_select(&event, &self.view, &mut self.map, &mut self.modes, now);
        }

        if self.modes.layout_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
