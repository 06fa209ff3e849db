use std::time::Instant;

use shared::{EventId, GeoPoint};
use tracing::debug;

use crate::{
    render::ViewModel,
    view_mode::{MapSurface, ViewModeController},
};

pub const DEFAULT_LOCATE_ZOOM: f64 = 5.0;

/// Emitted by the recent panel and the list view when an entry is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectEvent {
    pub id: EventId,
}

/// Single consumer of `SelectEvent`: re-centres the map on the record and shows the map.
#[derive(Debug, Clone, Copy)]
pub struct NavigationHandler {
    zoom: f64,
}

impl Default for NavigationHandler {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATE_ZOOM)
    }
}

impl NavigationHandler {
    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the point navigated to, or `None` if the id is no longer displayed.
    pub fn on_select<M: MapSurface + ?Sized>(
        &self,
        event: &SelectEvent,
        view: &ViewModel,
        map: &mut M,
        modes: &mut ViewModeController,
        now: Instant,
    ) -> Option<GeoPoint> {
        let Some(center) = view.locate(&event.id) else {
            debug!(id = %event.id, "selected event no longer displayed");
            return None;
        };
        map.set_view(center, self.zoom);
        modes.show_map(now);
        Some(center)
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
