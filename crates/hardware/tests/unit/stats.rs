//! # Request Statistics Tests

use coproc_core::stats::RequestStats;
use coproc_core::units::UnitKind;

#[test]
fn test_counts_per_kind() {
    let mut stats = RequestStats::default();
    stats.record(UnitKind::Add);
    stats.record(UnitKind::Add);
    stats.record(UnitKind::Sqrt);

    assert_eq!(stats.get(UnitKind::Add), 2);
    assert_eq!(stats.get(UnitKind::Sqrt), 1);
    assert_eq!(stats.get(UnitKind::Random), 0);
    assert_eq!(stats.total(), 3);
}

#[test]
fn test_reset_clears_counters() {
    let mut stats = RequestStats::default();
    for kind in UnitKind::ALL {
        stats.record(kind);
    }
    assert_eq!(stats.total(), 5);
    stats.reset();
    assert_eq!(stats.total(), 0);
}

#[test]
fn test_print_does_not_panic_when_empty() {
    RequestStats::default().print();
}
