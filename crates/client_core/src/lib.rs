//! Earthquake feed pipeline: fetch a snapshot, filter it, order it for display and
//! hand the result to a renderer, on a timer and on every user change.

pub mod config;
pub mod feed;
pub mod filter;
pub mod navigation;
pub mod pipeline;
pub mod render;
pub mod scheduler;
pub mod select;
pub mod view_mode;

pub use config::{load_settings, load_settings_from, Settings};
pub use feed::{FeedSource, HttpFeedClient, DEFAULT_FEED_URL};
pub use filter::{filter, FilterOutcome};
pub use navigation::{NavigationHandler, SelectEvent};
pub use pipeline::{render_failure, render_snapshot, AppState, RenderSummary};
pub use render::{
    Badge, ListContent, ListEntry, MagnitudeBand, Marker, PanelContent, PanelEntry, Placeholder,
    Popup, RenderCall, Rgb, Section, Stats, ViewModel, ViewRenderer,
};
pub use scheduler::{Control, RefreshScheduler, SchedulerHandle, Trigger};
pub use select::{present, Presentation, RECENT_LIMIT};
pub use view_mode::{MapSurface, ViewModeController};

#[cfg(test)]
mod test_support;
