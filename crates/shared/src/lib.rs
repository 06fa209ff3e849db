pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{DisplayMode, EventId, EventRecord, FilterParams, GeoPoint, Snapshot, SortKey};
pub use error::FetchFailure;
