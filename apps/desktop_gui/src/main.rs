use clap::Parser;
use client_core::{load_settings, ViewModel};
use crossbeam_channel::bounded;
use eframe::egui;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::QuakeWatchApp;

/// Live earthquake map and list.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    feed_url: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=86_400))]
    interval_secs: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.feed_url {
        settings.feed_url = url;
    }
    if let Some(secs) = args.interval_secs {
        settings.refresh_interval = std::time::Duration::from_secs(secs);
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let (view_tx, view_rx) = watch::channel(ViewModel::default());
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx, view_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Earthquake Tracker")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Earthquake Tracker",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(QuakeWatchApp::new(cmd_tx, ui_rx, view_rx, &settings)))
        }),
    )
}
