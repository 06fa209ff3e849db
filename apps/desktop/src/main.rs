use std::{io, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use client_core::{
    load_settings, scheduler, AppState, HttpFeedClient, RefreshScheduler, Settings, Trigger,
};
use shared::{FilterParams, SortKey};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalRenderer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Time,
    Magnitude,
    Depth,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Time => SortKey::Time,
            SortArg::Magnitude => SortKey::Magnitude,
            SortArg::Depth => SortKey::Depth,
        }
    }
}

/// Print recent earthquakes from the USGS feed.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    feed_url: Option<String>,
    #[arg(long)]
    min_magnitude: Option<f64>,
    #[arg(long)]
    max_depth: Option<f64>,
    /// Only show events whose location contains this text.
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, value_enum, default_value_t = SortArg::Time)]
    sort: SortArg,
    /// Keep running and reprint on every scheduled refresh.
    #[arg(long)]
    watch: bool,
    /// Seconds between scheduled refreshes in watch mode.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=86_400))]
    interval_secs: Option<u64>,
}

impl Args {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(url) = &self.feed_url {
            settings.feed_url = url.clone();
        }
        if let Some(v) = self.min_magnitude {
            settings.min_magnitude = v;
        }
        if let Some(v) = self.max_depth {
            settings.max_depth_km = v;
        }
        if let Some(secs) = self.interval_secs {
            settings.refresh_interval = Duration::from_secs(secs);
        }
        settings
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();
    let settings = args.apply(load_settings());

    let feed = Arc::new(HttpFeedClient::new(&settings.feed_url)?);
    let sort = SortKey::from(args.sort);
    let state = AppState {
        filter: FilterParams {
            min_magnitude: settings.min_magnitude,
            max_depth_km: settings.max_depth_km,
            query: args.query.clone(),
        },
        sort,
    };
    let renderer = TerminalRenderer::new(io::stdout(), sort);
    let mut refresher = RefreshScheduler::new(feed, renderer, state, settings.refresh_interval);

    if !args.watch {
        refresher
            .refresh(Trigger::Initial)
            .await
            .context("earthquake feed unavailable")?;
        return Ok(());
    }

    let (handle, task) = scheduler::spawn(refresher);
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    handle.shutdown();
    task.await.context("refresh scheduler panicked")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected_at_parse_time() {
        assert!(Args::try_parse_from(["quakewatch", "--interval-secs", "0"]).is_err());
    }

    #[test]
    fn interval_flag_overrides_settings() {
        let args = Args::try_parse_from(["quakewatch", "--watch", "--interval-secs", "60"])
            .expect("valid args");

        let settings = args.apply(Settings::default());

        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
    }
}
