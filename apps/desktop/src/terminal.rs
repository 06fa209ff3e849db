//! Plain-text renderer for the command-line front end.

use std::io::Write;

use client_core::{ListContent, Marker, PanelContent, Section, Stats, ViewRenderer};
use shared::SortKey;

pub struct TerminalRenderer<W: Write> {
    out: W,
    sort: SortKey,
    marker_count: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, sort: SortKey) -> Self {
        Self {
            out,
            sort,
            marker_count: 0,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if let Err(err) = writeln!(self.out, "{}", text.as_ref()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<W: Write> ViewRenderer for TerminalRenderer<W> {
    fn render_markers(&mut self, markers: Vec<Marker>) {
        self.marker_count = markers.len();
    }

    fn render_panel(&mut self, panel: PanelContent) {
        self.line("== Recent ==");
        match panel {
            Section::Entries(entries) => {
                for entry in entries {
                    self.line(format!(
                        "  [{}] {} ({})",
                        entry.badge.text, entry.place, entry.depth
                    ));
                }
            }
            Section::Placeholder(placeholder) => self.line(format!("  {}", placeholder.message())),
        }
    }

    fn render_list(&mut self, list: ListContent) {
        match list {
            Section::Entries(entries) => {
                self.line(format!(
                    "== {} earthquakes by {} ==",
                    entries.len(),
                    self.sort.label().to_lowercase()
                ));
                for entry in entries {
                    self.line(format!(
                        "  [{}] {} | Depth: {} | {}",
                        entry.badge.text, entry.place, entry.depth, entry.time
                    ));
                }
            }
            Section::Placeholder(placeholder) => {
                self.line("== 0 earthquakes ==");
                self.line(format!("  {}", placeholder.message()));
            }
        }
    }

    fn render_stats(&mut self, stats: Stats) {
        self.line(format!(
            "Total: {} | Shown: {} | On map: {} | Max magnitude: {} | Updated: {}",
            stats.total_count,
            stats.matched_count,
            self.marker_count,
            stats.max_magnitude_label(),
            stats.refreshed_at_label()
        ));
        self.line("");
        if let Err(err) = self.out.flush() {
            tracing::warn!(error = %err, "failed to flush terminal");
        }
    }
}
