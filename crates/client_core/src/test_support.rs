//! Shared fixtures and doubles for unit tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{EventId, EventRecord, FetchFailure, GeoPoint, Snapshot};
use tokio::sync::mpsc;

use crate::{
    feed::FeedSource,
    render::{ListContent, Marker, PanelContent, RenderCall, Stats, ViewRenderer},
    view_mode::MapSurface,
};

pub fn record(id: &str, magnitude: f64, depth_km: f64, timestamp_ms: i64) -> EventRecord {
    EventRecord {
        id: EventId::from(id),
        magnitude,
        depth_km,
        location_label: format!("Near {id}"),
        timestamp_ms,
        longitude: -120.0,
        latitude: 35.0,
    }
}

pub fn labelled(id: &str, label: &str) -> EventRecord {
    EventRecord {
        location_label: label.to_string(),
        ..record(id, 4.5, 10.0, 1_000)
    }
}

pub fn ids(records: &[EventRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

/// Feed that hands out scripted responses in call order, each after its delay.
pub struct ScriptedFeed {
    script: Mutex<VecDeque<(Duration, Result<Snapshot, FetchFailure>)>>,
    calls: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn then(self, result: Result<Snapshot, FetchFailure>) -> Self {
        self.then_after(Duration::ZERO, result)
    }

    pub fn then_after(self, delay: Duration, result: Result<Snapshot, FetchFailure>) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .push_back((delay, result));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("script lock").pop_front();
        let (delay, result) = next.unwrap_or_else(|| {
            (
                Duration::ZERO,
                Err(FetchFailure::Transport("script exhausted".into())),
            )
        });
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

/// Forwards every sink call over a channel.
pub struct RecordingRenderer {
    tx: mpsc::UnboundedSender<RenderCall>,
}

pub fn recording_renderer() -> (RecordingRenderer, mpsc::UnboundedReceiver<RenderCall>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RecordingRenderer { tx }, rx)
}

impl RecordingRenderer {
    fn record(&self, call: RenderCall) {
        let _ = self.tx.send(call);
    }
}

impl ViewRenderer for RecordingRenderer {
    fn render_markers(&mut self, markers: Vec<Marker>) {
        self.record(RenderCall::Markers(markers));
    }

    fn render_panel(&mut self, panel: PanelContent) {
        self.record(RenderCall::Panel(panel));
    }

    fn render_list(&mut self, list: ListContent) {
        self.record(RenderCall::List(list));
    }

    fn render_stats(&mut self, stats: Stats) {
        self.record(RenderCall::Stats(stats));
    }
}

#[derive(Debug, Default)]
pub struct FakeMap {
    pub views: Vec<(GeoPoint, f64)>,
    pub invalidations: usize,
}

impl MapSurface for FakeMap {
    fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        self.views.push((center, zoom));
    }

    fn invalidate_size(&mut self) {
        self.invalidations += 1;
    }
}
