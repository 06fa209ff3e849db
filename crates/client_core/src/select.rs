//! Presentation selector. Each derivation sorts its own copy; the input slice is
//! never reordered. All sorts are stable so ties keep input order.

use std::cmp::Ordering;

use shared::{EventRecord, SortKey};

pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub recent: Vec<EventRecord>,
    pub ordered: Vec<EventRecord>,
}

pub fn present(filtered: &[EventRecord], sort: SortKey) -> Presentation {
    Presentation {
        recent: recent(filtered, RECENT_LIMIT),
        ordered: ordered(filtered, sort),
    }
}

/// Newest `limit` records, newest first.
pub fn recent(filtered: &[EventRecord], limit: usize) -> Vec<EventRecord> {
    let mut working = ordered(filtered, SortKey::Time);
    working.truncate(limit);
    working
}

pub fn ordered(filtered: &[EventRecord], sort: SortKey) -> Vec<EventRecord> {
    let mut working = filtered.to_vec();
    working.sort_by(|a, b| compare(a, b, sort));
    working
}

fn compare(a: &EventRecord, b: &EventRecord, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Time => b.timestamp_ms.cmp(&a.timestamp_ms),
        SortKey::Magnitude => b.magnitude.total_cmp(&a.magnitude),
        SortKey::Depth => a.depth_km.total_cmp(&b.depth_km),
    }
}

#[cfg(test)]
#[path = "tests/select_tests.rs"]
mod tests;
