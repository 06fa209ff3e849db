//! GeoJSON feed document as published by the USGS summary feeds.

use serde::{Deserialize, Serialize};

use crate::domain::{EventId, EventRecord, Snapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    pub features: Vec<FeedFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedFeature {
    pub id: String,
    pub properties: FeedProperties,
    pub geometry: FeedGeometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedProperties {
    /// Null for some automatic solutions; read as 0.0.
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    pub time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedGeometry {
    /// `[longitude, latitude, depth_km]`
    pub coordinates: [f64; 3],
}

impl From<FeedFeature> for EventRecord {
    fn from(feature: FeedFeature) -> Self {
        let [longitude, latitude, depth_km] = feature.geometry.coordinates;
        Self {
            id: EventId(feature.id),
            magnitude: feature.properties.mag.unwrap_or(0.0),
            depth_km,
            location_label: feature.properties.place.unwrap_or_default(),
            timestamp_ms: feature.properties.time,
            longitude,
            latitude,
        }
    }
}

impl From<FeedDocument> for Snapshot {
    fn from(document: FeedDocument) -> Self {
        Snapshot::new(document.features.into_iter().map(EventRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": { "generated": 1700000000000, "count": 2 },
        "features": [
            {
                "type": "Feature",
                "id": "us7000abcd",
                "properties": { "mag": 4.6, "place": "10 km SSW of Somewhere", "time": 1699999000000 },
                "geometry": { "type": "Point", "coordinates": [142.5, 38.1, 35.2] }
            },
            {
                "type": "Feature",
                "id": "ak0231xyz",
                "properties": { "mag": null, "place": null, "time": 1699998000000 },
                "geometry": { "type": "Point", "coordinates": [-150.1, 61.2, 0.0] }
            }
        ]
    }"#;

    #[test]
    fn decodes_usgs_feature_collection_into_snapshot() {
        let document: FeedDocument = serde_json::from_str(SAMPLE).expect("decode");
        let snapshot = Snapshot::from(document);

        assert_eq!(snapshot.len(), 2);
        let first = &snapshot.records[0];
        assert_eq!(first.id, EventId::from("us7000abcd"));
        assert_eq!(first.magnitude, 4.6);
        assert_eq!(first.depth_km, 35.2);
        assert_eq!(first.longitude, 142.5);
        assert_eq!(first.latitude, 38.1);
        assert_eq!(first.location_label, "10 km SSW of Somewhere");
        assert_eq!(first.timestamp_ms, 1_699_999_000_000);
    }

    #[test]
    fn null_magnitude_and_place_decode_as_defaults() {
        let document: FeedDocument = serde_json::from_str(SAMPLE).expect("decode");
        let snapshot = Snapshot::from(document);

        let second = &snapshot.records[1];
        assert_eq!(second.magnitude, 0.0);
        assert_eq!(second.location_label, "");
    }

    #[test]
    fn missing_coordinates_are_a_decode_error() {
        let raw = r#"{ "features": [ { "id": "x", "properties": { "mag": 1.0, "place": "p", "time": 1 }, "geometry": { "coordinates": [1.0, 2.0] } } ] }"#;
        assert!(serde_json::from_str::<FeedDocument>(raw).is_err());
    }
}
