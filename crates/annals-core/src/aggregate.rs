//! Merging per-repository records into one timeline.

use annals_record::ReleaseRecord;

/// Sorts records newest first.
///
/// The sort is stable: records with equal dates keep their input order,
/// which is repository order, then source order.
pub fn sort_records(records: &mut [ReleaseRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Concatenates per-repository lists in order and sorts the result.
#[must_use]
pub fn aggregate(lists: impl IntoIterator<Item = Vec<ReleaseRecord>>) -> Vec<ReleaseRecord> {
    let mut records: Vec<ReleaseRecord> = lists.into_iter().flatten().collect();
    sort_records(&mut records);
    records
}
