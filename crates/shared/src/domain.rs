use serde::{Deserialize, Serialize};

/// Feed-assigned event identifier. Unique within one snapshot; never checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One earthquake observation as reported by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub magnitude: f64,
    pub depth_km: f64,
    pub location_label: String,
    pub timestamp_ms: i64,
    pub longitude: f64,
    pub latitude: f64,
}

impl EventRecord {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// The full result of one fetch. A new snapshot replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<EventRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub min_magnitude: f64,
    pub max_depth_km: f64,
    /// Case-insensitive substring matched against the location label. Empty matches all.
    pub query: String,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_magnitude: 0.0,
            max_depth_km: 700.0,
            query: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Time,
    Magnitude,
    Depth,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Time, SortKey::Magnitude, SortKey::Depth];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Time => "Time",
            SortKey::Magnitude => "Magnitude",
            SortKey::Depth => "Depth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Map,
    List,
}
