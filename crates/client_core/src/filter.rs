use shared::{EventRecord, FilterParams};

/// Records that passed the filter, plus figures taken over the unfiltered input.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub records: Vec<EventRecord>,
    pub total_count: usize,
    /// Starts at 0.0, so an empty or all-negative input reports 0.0.
    pub max_magnitude: f64,
}

impl FilterOutcome {
    pub fn matched_count(&self) -> usize {
        self.records.len()
    }
}

pub fn matches(record: &EventRecord, params: &FilterParams) -> bool {
    record.magnitude >= params.min_magnitude
        && record.depth_km <= params.max_depth_km
        && matches_query(&record.location_label, &params.query)
}

fn matches_query(label: &str, query: &str) -> bool {
    let needle = query.trim();
    needle.is_empty() || label.to_lowercase().contains(&needle.to_lowercase())
}

/// Order-preserving filter over one snapshot's records.
pub fn filter(records: &[EventRecord], params: &FilterParams) -> FilterOutcome {
    let max_magnitude = records
        .iter()
        .map(|record| record.magnitude)
        .fold(0.0_f64, |max, magnitude| if magnitude > max { magnitude } else { max });

    FilterOutcome {
        records: records
            .iter()
            .filter(|record| matches(record, params))
            .cloned()
            .collect(),
        total_count: records.len(),
        max_magnitude,
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
