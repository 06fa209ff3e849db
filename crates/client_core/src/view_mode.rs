use std::time::{Duration, Instant};

use shared::{DisplayMode, GeoPoint};
use tracing::debug;

pub const DEFAULT_LAYOUT_DELAY: Duration = Duration::from_millis(300);

/// The map widget as seen from the controller and navigation handler.
pub trait MapSurface {
    fn set_view(&mut self, center: GeoPoint, zoom: f64);
    /// Recompute layout after the widget may have been hidden or resized.
    fn invalidate_size(&mut self);
}

/// Map/List visibility. Showing the map schedules a layout notification that fires
/// once `layout_delay` has elapsed, on the first `poll_layout` past the deadline.
#[derive(Debug, Clone)]
pub struct ViewModeController {
    mode: DisplayMode,
    layout_delay: Duration,
    layout_due: Option<Instant>,
}

impl Default for ViewModeController {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_DELAY)
    }
}

impl ViewModeController {
    pub fn new(layout_delay: Duration) -> Self {
        Self {
            mode: DisplayMode::Map,
            layout_delay,
            layout_due: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn layout_pending(&self) -> bool {
        self.layout_due.is_some()
    }

    pub fn show_map(&mut self, now: Instant) {
        if self.mode != DisplayMode::Map {
            debug!("switching display to map");
        }
        self.mode = DisplayMode::Map;
        self.layout_due = Some(now + self.layout_delay);
    }

    pub fn show_list(&mut self) {
        if self.mode != DisplayMode::List {
            debug!("switching display to list");
        }
        self.mode = DisplayMode::List;
        self.layout_due = None;
    }

    pub fn select(&mut self, mode: DisplayMode, now: Instant) {
        match mode {
            DisplayMode::Map => self.show_map(now),
            DisplayMode::List => self.show_list(),
        }
    }

    /// Delivers the pending layout notification if it is due. Returns whether it fired.
    pub fn poll_layout<M: MapSurface + ?Sized>(&mut self, now: Instant, map: &mut M) -> bool {
        match self.layout_due {
            Some(due) if now >= due => {
                self.layout_due = None;
                map.invalidate_size();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/view_mode_tests.rs"]
mod tests;
