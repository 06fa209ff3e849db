//! Snapshot -> filter -> selection -> sinks.

use chrono::{DateTime, Local};
use shared::{FilterParams, Snapshot, SortKey};
use tracing::debug;

use crate::{
    filter::filter,
    render::{ListEntry, Marker, PanelEntry, Placeholder, Section, Stats, ViewRenderer},
    select::present,
};

/// User-controlled inputs the pipeline reads. Views are always derived fresh from
/// these plus the latest snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub filter: FilterParams,
    pub sort: SortKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub total_count: usize,
    pub matched_count: usize,
}

pub fn render_snapshot<R: ViewRenderer + ?Sized>(
    renderer: &mut R,
    snapshot: &Snapshot,
    state: &AppState,
    refreshed_at: DateTime<Local>,
) -> RenderSummary {
    let outcome = filter(&snapshot.records, &state.filter);
    let presentation = present(&outcome.records, state.sort);
    debug!(
        total = outcome.total_count,
        matched = outcome.matched_count(),
        sort = ?state.sort,
        "rendering snapshot"
    );

    renderer.render_markers(outcome.records.iter().map(Marker::from_record).collect());
    renderer.render_panel(Section::from_entries(
        presentation
            .recent
            .iter()
            .map(PanelEntry::from_record)
            .collect(),
    ));
    renderer.render_list(Section::from_entries(
        presentation
            .ordered
            .iter()
            .map(ListEntry::from_record)
            .collect(),
    ));
    renderer.render_stats(Stats {
        total_count: outcome.total_count,
        matched_count: outcome.matched_count(),
        max_magnitude: outcome.max_magnitude,
        refreshed_at,
    });
    renderer.finish();

    RenderSummary {
        total_count: outcome.total_count,
        matched_count: outcome.matched_count(),
    }
}

/// Markers and stats keep their last rendered state.
pub fn render_failure<R: ViewRenderer + ?Sized>(renderer: &mut R) {
    renderer.render_panel(Section::Placeholder(Placeholder::FetchFailed));
    renderer.render_list(Section::Placeholder(Placeholder::FetchFailed));
    renderer.finish();
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
