//! Test utilities for building competitor fixtures
//!
//! This module provides builders for competitor records and snapshots that are
//! used across the crate's unit tests, integration tests and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use crate::types::{
    CompetitorRecord, CompetitorStatus, Seconds, Snapshot, SnapshotScope, SplitRecord,
};

/// A finished competitor with an approved time.
pub fn finisher(id: &str, organisation: &str, time: Seconds) -> CompetitorRecord {
    CompetitorRecord {
        id: id.into(),
        name: format!("Competitor {id}"),
        organisation: organisation.to_string(),
        status: CompetitorStatus::Ok,
        start_time: None,
        finish_time: None,
        time: Some(time),
        splits: vec![],
        class_id: None,
        class_name: None,
    }
}

/// A competitor without a result, carrying the given status.
pub fn runner(id: &str, organisation: &str, status: CompetitorStatus) -> CompetitorRecord {
    CompetitorRecord { status, time: None, ..finisher(id, organisation, 0) }
}

/// Attach cumulative split times, controls numbered from 101.
pub fn with_splits(mut record: CompetitorRecord, cumulatives: &[Seconds]) -> CompetitorRecord {
    record.splits = cumulatives
        .iter()
        .enumerate()
        .map(|(i, &cumulative)| SplitRecord { control: format!("{}", 101 + i), cumulative })
        .collect();
    record
}

/// Attach a class name.
pub fn in_class(mut record: CompetitorRecord, class: &str) -> CompetitorRecord {
    record.class_name = Some(class.to_string());
    record
}

/// A class-scoped snapshot around the given records.
pub fn class_snapshot(competitors: Vec<CompetitorRecord>) -> Snapshot {
    Snapshot::new(SnapshotScope::Class("Elite".to_string()), competitors)
}

/// Deterministic field of `count` finishers with splits over `controls`
/// controls, for benchmarks and larger tests. Times vary by a fixed
/// linear-congruential sequence so runs are reproducible.
pub fn sample_field(count: usize, controls: usize) -> Vec<CompetitorRecord> {
    let mut seed: u64 = 0x5DEECE66D;
    let mut jitter = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) % 120
    };

    (0..count)
        .map(|i| {
            let mut cumulative = 0u32;
            let cumulatives: Vec<Seconds> = (0..controls)
                .map(|_| {
                    cumulative += 180 + jitter() as u32;
                    cumulative
                })
                .collect();
            let time = cumulative + 60 + jitter() as u32;
            let record = finisher(&format!("c{i}"), &format!("Club {}", i % 7), time);
            in_class(with_splits(record, &cumulatives), "Elite")
        })
        .collect()
}
