//! Aggregate statistics over a record's findings.
//!
//! Everything here is derived on demand from the findings and metrics; no
//! counts are cached anywhere. Count maps are keyed by the vocabulary enums,
//! whose `Ord` is code order, so iteration is deterministic and ascending.

use std::collections::BTreeMap;

use inspeq_types::{Category, ErrorType, InspectionRecord, Severity};

pub fn counts_by_type(record: &InspectionRecord) -> BTreeMap<ErrorType, u32> {
    let mut counts = BTreeMap::new();
    for f in &record.findings {
        *counts.entry(f.error_type).or_insert(0) += 1;
    }
    counts
}

pub fn counts_by_category(record: &InspectionRecord) -> BTreeMap<Category, u32> {
    let mut counts = BTreeMap::new();
    for f in &record.findings {
        *counts.entry(f.category).or_insert(0) += 1;
    }
    counts
}

pub fn counts_by_severity(record: &InspectionRecord) -> BTreeMap<Severity, u32> {
    let mut counts = BTreeMap::new();
    for f in &record.findings {
        *counts.entry(f.severity).or_insert(0) += 1;
    }
    counts
}

pub fn major_count(record: &InspectionRecord) -> usize {
    record
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Major)
        .count()
}

pub fn minor_count(record: &InspectionRecord) -> usize {
    record
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Minor)
        .count()
}

/// Findings per thousand size units, against the pre-inspection estimate.
///
/// `None` when there is no pre-inspection estimate; "not computable" is
/// deliberately distinct from a computed zero.
pub fn errors_per_ksize(record: &InspectionRecord) -> Option<f64> {
    if record.metrics.size_estimate_pre == 0 {
        return None;
    }
    Some(record.findings.len() as f64 / record.metrics.size_estimate_pre as f64 * 1000.0)
}

/// Size units inspected per meeting hour. `None` when no meeting time was
/// recorded.
pub fn inspection_rate(record: &InspectionRecord) -> Option<f64> {
    if record.metrics.meeting_hours <= 0.0 {
        return None;
    }
    Some(record.metrics.size_estimate_pre as f64 / record.metrics.meeting_hours)
}
