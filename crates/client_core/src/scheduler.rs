//! Refresh scheduler: the only driver of the fetch -> render pipeline.
//!
//! Runs on a single task. Fetches started by different triggers may overlap; they are
//! never cancelled or queued. Each carries a sequence number and a response older than
//! the most recently rendered one is dropped.

use std::{sync::Arc, time::Duration};

use chrono::Local;
use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use shared::{FetchFailure, FilterParams, Snapshot, SortKey};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    feed::FeedSource,
    pipeline::{render_failure, render_snapshot, AppState, RenderSummary},
    render::ViewRenderer,
};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Initial,
    Timer,
    FilterChanged,
    SortChanged,
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    SetFilter(FilterParams),
    SetSort(SortKey),
    RefreshNow,
    Shutdown,
}

type InFlight = BoxFuture<'static, (u64, Result<Snapshot, FetchFailure>)>;

#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    tx: mpsc::UnboundedSender<Control>,
}

impl SchedulerHandle {
    /// Returns false once the scheduler has stopped.
    pub fn send(&self, control: Control) -> bool {
        self.tx.send(control).is_ok()
    }

    pub fn set_filter(&self, filter: FilterParams) -> bool {
        self.send(Control::SetFilter(filter))
    }

    pub fn set_sort(&self, sort: SortKey) -> bool {
        self.send(Control::SetSort(sort))
    }

    pub fn refresh_now(&self) -> bool {
        self.send(Control::RefreshNow)
    }

    pub fn shutdown(&self) -> bool {
        self.send(Control::Shutdown)
    }
}

pub struct RefreshScheduler<F, R> {
    feed: Arc<F>,
    renderer: R,
    state: AppState,
    interval: Duration,
    next_seq: u64,
    latest_rendered: u64,
}

impl<F, R> RefreshScheduler<F, R>
where
    F: FeedSource + 'static,
    R: ViewRenderer,
{
    /// `interval` is clamped to `MIN_REFRESH_INTERVAL..=MAX_REFRESH_INTERVAL`.
    pub fn new(feed: Arc<F>, renderer: R, state: AppState, interval: Duration) -> Self {
        let clamped = interval.clamp(MIN_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL);
        if clamped != interval {
            warn!(
                requested_secs = interval.as_secs_f64(),
                interval_secs = clamped.as_secs(),
                "refresh interval out of range; clamped"
            );
        }
        Self {
            feed,
            renderer,
            state,
            interval: clamped,
            next_seq: 0,
            latest_rendered: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Fetches and renders inline, without the timer or control channel.
    pub async fn refresh(&mut self, trigger: Trigger) -> Result<RenderSummary, FetchFailure> {
        let seq = self.issue(trigger);
        let result = self.feed.fetch_snapshot().await;
        self.latest_rendered = seq;
        self.apply(result)
    }

    /// Drives the pipeline until `Shutdown` arrives or every handle is dropped.
    /// Hands the renderer back on exit.
    pub async fn run(mut self, mut controls: mpsc::UnboundedReceiver<Control>) -> R {
        info!(interval_secs = self.interval.as_secs(), "refresh scheduler started");

        let mut in_flight: FuturesUnordered<InFlight> = FuturesUnordered::new();
        in_flight.push(self.start_fetch(Trigger::Initial));

        let mut timer = interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                Some((seq, result)) = in_flight.next(), if !in_flight.is_empty() => {
                    self.complete(seq, result);
                }
                control = controls.recv() => match control {
                    Some(Control::SetFilter(filter)) => {
                        self.state.filter = filter;
                        in_flight.push(self.start_fetch(Trigger::FilterChanged));
                    }
                    Some(Control::SetSort(sort)) => {
                        self.state.sort = sort;
                        in_flight.push(self.start_fetch(Trigger::SortChanged));
                    }
                    Some(Control::RefreshNow) => {
                        in_flight.push(self.start_fetch(Trigger::Manual));
                    }
                    Some(Control::Shutdown) | None => break,
                },
                _ = timer.tick() => {
                    in_flight.push(self.start_fetch(Trigger::Timer));
                }
            }
        }

        info!(abandoned = in_flight.len(), "refresh scheduler stopped");
        self.renderer
    }

    fn issue(&mut self, trigger: Trigger) -> u64 {
        self.next_seq += 1;
        debug!(seq = self.next_seq, ?trigger, "starting feed fetch");
        self.next_seq
    }

    fn start_fetch(&mut self, trigger: Trigger) -> InFlight {
        let seq = self.issue(trigger);
        let feed = Arc::clone(&self.feed);
        async move { (seq, feed.fetch_snapshot().await) }.boxed()
    }

    fn complete(&mut self, seq: u64, result: Result<Snapshot, FetchFailure>) {
        if seq < self.latest_rendered {
            debug!(seq, latest = self.latest_rendered, "discarding stale feed response");
            return;
        }
        self.latest_rendered = seq;
        let _ = self.apply(result);
    }

    fn apply(
        &mut self,
        result: Result<Snapshot, FetchFailure>,
    ) -> Result<RenderSummary, FetchFailure> {
        match result {
            Ok(snapshot) => Ok(render_snapshot(
                &mut self.renderer,
                &snapshot,
                &self.state,
                Local::now(),
            )),
            Err(failure) => {
                render_failure(&mut self.renderer);
                Err(failure)
            }
        }
    }
}

/// Spawns `scheduler.run` on the current runtime.
pub fn spawn<F, R>(scheduler: RefreshScheduler<F, R>) -> (SchedulerHandle, JoinHandle<R>)
where
    F: FeedSource + 'static,
    R: ViewRenderer + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(scheduler.run(rx));
    (SchedulerHandle { tx }, task)
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
