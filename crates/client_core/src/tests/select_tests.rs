use super::*;
use crate::test_support::{ids, record};

fn sample() -> Vec<EventRecord> {
    vec![
        record("a", 2.1, 12.0, 100),
        record("b", 5.4, 3.0, 700),
        record("c", 4.0, 40.0, 300),
        record("d", 6.8, 8.0, 700),
        record("e", 3.3, 3.0, 200),
        record("f", 4.0, 1.5, 900),
        record("g", 1.0, 60.0, 50),
    ]
}

#[test]
fn recent_takes_newest_five_with_stable_ties() {
    let recent = recent(&sample(), RECENT_LIMIT);

    assert_eq!(ids(&recent), vec!["f", "b", "d", "c", "e"]);
}

#[test]
fn recent_returns_everything_when_fewer_than_limit() {
    let records = vec![record("x", 1.0, 1.0, 1), record("y", 1.0, 1.0, 2)];

    assert_eq!(ids(&recent(&records, RECENT_LIMIT)), vec!["y", "x"]);
    assert!(recent(&[], RECENT_LIMIT).is_empty());
}

#[test]
fn time_ordering_is_descending() {
    let ordered = ordered(&sample(), SortKey::Time);

    assert!(ordered
        .windows(2)
        .all(|pair| pair[0].timestamp_ms >= pair[1].timestamp_ms));
}

#[test]
fn magnitude_ordering_is_descending_with_stable_ties() {
    let ordered = ordered(&sample(), SortKey::Magnitude);

    assert_eq!(ids(&ordered), vec!["d", "b", "c", "f", "e", "a", "g"]);
}

#[test]
fn depth_ordering_is_ascending_with_stable_ties() {
    let ordered = ordered(&sample(), SortKey::Depth);

    assert_eq!(ids(&ordered), vec!["f", "b", "e", "d", "a", "c", "g"]);
}

#[test]
fn derivations_do_not_reorder_the_input() {
    let filtered = sample();
    let before = filtered.clone();

    let presentation = present(&filtered, SortKey::Magnitude);

    assert_eq!(filtered, before);
    assert_eq!(presentation.recent.len(), RECENT_LIMIT);
    assert_eq!(presentation.ordered.len(), filtered.len());
}

#[test]
fn presenting_twice_is_identical() {
    let filtered = sample();

    for key in SortKey::ALL {
        assert_eq!(present(&filtered, key), present(&filtered, key));
    }
}
