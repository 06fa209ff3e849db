//! Runtime bridge between the UI command queue and the refresh scheduler.

use std::{sync::Arc, thread};

use client_core::{
    scheduler, AppState, HttpFeedClient, ListContent, Marker, PanelContent, RefreshScheduler,
    Settings, Stats, ViewModel, ViewRenderer,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{FilterParams, SortKey};
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Stages sink calls into a private view model and publishes it whole on `finish`.
/// The slot keeps only the newest refresh, so a UI that stops reading never sees a
/// half-applied one and never falls behind.
pub struct ChannelRenderer {
    staged: ViewModel,
    published: watch::Sender<ViewModel>,
}

impl ChannelRenderer {
    pub fn new(published: watch::Sender<ViewModel>) -> Self {
        let staged = published.borrow().clone();
        Self { staged, published }
    }
}

impl ViewRenderer for ChannelRenderer {
    fn render_markers(&mut self, markers: Vec<Marker>) {
        self.staged.render_markers(markers);
    }

    fn render_panel(&mut self, panel: PanelContent) {
        self.staged.render_panel(panel);
    }

    fn render_list(&mut self, list: ListContent) {
        self.staged.render_list(list);
    }

    fn render_stats(&mut self, stats: Stats) {
        self.staged.render_stats(stats);
    }

    fn finish(&mut self) {
        self.published.send_replace(self.staged.clone());
    }
}

pub fn initial_state(settings: &Settings) -> AppState {
    AppState {
        filter: FilterParams {
            min_magnitude: settings.min_magnitude,
            max_depth_km: settings.max_depth_km,
            query: String::new(),
        },
        sort: SortKey::default(),
    }
}

/// Starts the backend worker thread. It exits once the UI drops its command sender.
pub fn launch(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    views: watch::Sender<ViewModel>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Loading earthquake data...".to_string()));
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let feed = match HttpFeedClient::new(&settings.feed_url) {
                Ok(feed) => Arc::new(feed),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::BackendFailed(format!("{err:#}")));
                    tracing::error!(error = %format!("{err:#}"), "invalid feed url");
                    return;
                }
            };
            tracing::info!(url = %feed.url(), "backend worker started");

            let refresher = RefreshScheduler::new(
                feed,
                ChannelRenderer::new(views),
                initial_state(&settings),
                settings.refresh_interval,
            );
            let (handle, task) = scheduler::spawn(refresher);

            let forward_handle = handle.clone();
            let forwarder = tokio::task::spawn_blocking(move || {
                while let Ok(cmd) = cmd_rx.recv() {
                    tracing::debug!(command = cmd.name(), "forwarding ui command");
                    if !forward_handle.send(cmd.into()) {
                        break;
                    }
                }
            });

            if let Err(err) = forwarder.await {
                tracing::error!("command forwarder failed: {err}");
            }
            handle.shutdown();
            if let Err(err) = task.await {
                tracing::error!("refresh scheduler failed: {err}");
            }
            tracing::info!("backend worker stopped");
        });
    });
}
