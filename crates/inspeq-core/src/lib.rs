//! Core engine: derived statistics + reinspection decision + report rendering.

mod export;
mod reinspect;
mod render;
mod stats;

pub use export::{
    FindingDoc, RecordDoc, RecordImportError, record_from_doc, record_from_json, record_to_doc,
    render_record_json,
};
pub use reinspect::{
    MAJOR_FINDING_THRESHOLD, REWORK_PERCENT_THRESHOLD, ReinspectionBasis, ReinspectionDecision,
    evaluate_reinspection,
};
pub use render::{render_error_list, render_module_detail, render_summary};
pub use stats::{
    counts_by_category, counts_by_severity, counts_by_type, errors_per_ksize, inspection_rate,
    major_count, minor_count,
};
