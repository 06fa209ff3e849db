//! View renderer capability and the display-ready values it is fed.
//!
//! Every sink method replaces whatever the sink showed before, so calling one twice
//! with the same input leaves the same output.

use chrono::{DateTime, Local, TimeZone};
use shared::{EventId, EventRecord, GeoPoint};

pub const RADIUS_PER_MAGNITUDE: f64 = 3.0;
/// Badge text turns light strictly above this magnitude.
pub const LIGHT_TEXT_ABOVE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
}

/// Colour step over magnitude. Each band includes its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeBand {
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
}

impl MagnitudeBand {
    pub const ALL: [MagnitudeBand; 5] = [
        MagnitudeBand::Minor,
        MagnitudeBand::Light,
        MagnitudeBand::Moderate,
        MagnitudeBand::Strong,
        MagnitudeBand::Major,
    ];

    pub fn of(magnitude: f64) -> Self {
        if magnitude >= 7.0 {
            MagnitudeBand::Major
        } else if magnitude >= 6.0 {
            MagnitudeBand::Strong
        } else if magnitude >= 5.0 {
            MagnitudeBand::Moderate
        } else if magnitude >= 4.0 {
            MagnitudeBand::Light
        } else {
            MagnitudeBand::Minor
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            MagnitudeBand::Minor => Rgb(0x4C, 0xAF, 0x50),
            MagnitudeBand::Light => Rgb(0xFF, 0xEB, 0x3B),
            MagnitudeBand::Moderate => Rgb(0xFF, 0x98, 0x00),
            MagnitudeBand::Strong => Rgb(0xF4, 0x43, 0x36),
            MagnitudeBand::Major => Rgb(0x9C, 0x27, 0xB0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeBand::Minor => "Minor",
            MagnitudeBand::Light => "Light",
            MagnitudeBand::Moderate => "Moderate",
            MagnitudeBand::Strong => "Strong",
            MagnitudeBand::Major => "Major",
        }
    }

    pub fn range_caption(self) -> &'static str {
        match self {
            MagnitudeBand::Minor => "< 4.0",
            MagnitudeBand::Light => "4.0 - 5.0",
            MagnitudeBand::Moderate => "5.0 - 6.0",
            MagnitudeBand::Strong => "6.0 - 7.0",
            MagnitudeBand::Major => ">= 7.0",
        }
    }
}

pub fn marker_radius(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

pub fn badge_text_color(magnitude: f64) -> Rgb {
    if magnitude > LIGHT_TEXT_ABOVE {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

pub fn format_depth(depth_km: f64) -> String {
    format!("{depth_km} km")
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(local) => local.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp_ms.to_string(),
    }
}

pub fn format_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub fill: Rgb,
    pub text_color: Rgb,
}

impl Badge {
    pub fn for_magnitude(magnitude: f64) -> Self {
        Self {
            text: format_magnitude(magnitude),
            fill: MagnitudeBand::of(magnitude).color(),
            text_color: badge_text_color(magnitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub magnitude: String,
    pub depth: String,
    pub time: String,
}

impl Popup {
    pub fn lines(&self) -> [String; 4] {
        [
            self.title.clone(),
            format!("Magnitude: {}", self.magnitude),
            format!("Depth: {}", self.depth),
            format!("Time: {}", self.time),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: EventId,
    pub location: GeoPoint,
    pub band: MagnitudeBand,
    pub radius: f64,
    pub popup: Popup,
}

impl Marker {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id.clone(),
            location: record.location(),
            band: MagnitudeBand::of(record.magnitude),
            radius: marker_radius(record.magnitude),
            popup: Popup {
                title: record.location_label.clone(),
                magnitude: format_magnitude(record.magnitude),
                depth: format_depth(record.depth_km),
                time: format_timestamp(record.timestamp_ms),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    pub id: EventId,
    pub location: GeoPoint,
    pub badge: Badge,
    pub place: String,
    pub depth: String,
}

impl PanelEntry {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id.clone(),
            location: record.location(),
            badge: Badge::for_magnitude(record.magnitude),
            place: record.location_label.clone(),
            depth: format_depth(record.depth_km),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: EventId,
    pub location: GeoPoint,
    pub badge: Badge,
    pub place: String,
    pub depth: String,
    pub time: String,
}

impl ListEntry {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id.clone(),
            location: record.location(),
            badge: Badge::for_magnitude(record.magnitude),
            place: record.location_label.clone(),
            depth: format_depth(record.depth_km),
            time: format_timestamp(record.timestamp_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NoResults,
    FetchFailed,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::NoResults => "No earthquakes match the current filters",
            Placeholder::FetchFailed => "Failed to load earthquake data",
        }
    }
}

/// Content of a list surface: entries, or an explicit placeholder instead of an
/// empty container.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Entries(Vec<T>),
    Placeholder(Placeholder),
}

impl<T> Section<T> {
    pub fn from_entries(entries: Vec<T>) -> Self {
        if entries.is_empty() {
            Section::Placeholder(Placeholder::NoResults)
        } else {
            Section::Entries(entries)
        }
    }

    pub fn entries(&self) -> &[T] {
        match self {
            Section::Entries(entries) => entries,
            Section::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Section::Entries(_) => None,
            Section::Placeholder(placeholder) => Some(*placeholder),
        }
    }
}

pub type PanelContent = Section<PanelEntry>;
pub type ListContent = Section<ListEntry>;

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_count: usize,
    pub matched_count: usize,
    pub max_magnitude: f64,
    /// Wall-clock time of the render, not of the data.
    pub refreshed_at: DateTime<Local>,
}

impl Stats {
    pub fn max_magnitude_label(&self) -> String {
        format_magnitude(self.max_magnitude)
    }

    pub fn refreshed_at_label(&self) -> String {
        format_clock(self.refreshed_at)
    }

    pub fn matched_caption(&self) -> String {
        format!("{} earthquakes", self.matched_count)
    }
}

pub trait ViewRenderer {
    fn render_markers(&mut self, markers: Vec<Marker>);
    fn render_panel(&mut self, panel: PanelContent);
    fn render_list(&mut self, list: ListContent);
    fn render_stats(&mut self, stats: Stats);
    /// Called once after the last sink call of a refresh. Renderers that publish to
    /// another thread hand over the whole refresh here.
    fn finish(&mut self) {}
}

/// One sink invocation, as a value. Lets a renderer be split across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Markers(Vec<Marker>),
    Panel(PanelContent),
    List(ListContent),
    Stats(Stats),
}

impl RenderCall {
    pub fn apply<R: ViewRenderer + ?Sized>(self, renderer: &mut R) {
        match self {
            RenderCall::Markers(markers) => renderer.render_markers(markers),
            RenderCall::Panel(panel) => renderer.render_panel(panel),
            RenderCall::List(list) => renderer.render_list(list),
            RenderCall::Stats(stats) => renderer.render_stats(stats),
        }
    }
}

/// In-memory sink holding whatever was rendered last. Front ends draw from it.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub markers: Vec<Marker>,
    pub panel: Option<PanelContent>,
    pub list: Option<ListContent>,
    pub stats: Option<Stats>,
}

impl ViewModel {
    /// Coordinates of a record currently shown in either list surface.
    pub fn locate(&self, id: &EventId) -> Option<GeoPoint> {
        let from_list = self
            .list
            .iter()
            .flat_map(|list| list.entries())
            .find(|entry| &entry.id == id)
            .map(|entry| entry.location);
        from_list.or_else(|| {
            self.panel
                .iter()
                .flat_map(|panel| panel.entries())
                .find(|entry| &entry.id == id)
                .map(|entry| entry.location)
        })
    }
}

impl ViewRenderer for ViewModel {
    fn render_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn render_panel(&mut self, panel: PanelContent) {
        self.panel = Some(panel);
    }

    fn render_list(&mut self, list: ListContent) {
        self.list = Some(list);
    }

    fn render_stats(&mut self, stats: Stats) {
        self.stats = Some(stats);
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
