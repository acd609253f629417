//! Plain-text report renderers.
//!
//! Three pure functions over an `InspectionRecord`: the error list, the
//! module detail report, and the inspection summary. Output preserves
//! insertion order for findings and participants; count sections iterate in
//! code order. A valid record always renders, including the empty one.

use inspeq_types::InspectionRecord;

use crate::reinspect::evaluate_reinspection;
use crate::stats::{
    counts_by_category, counts_by_type, errors_per_ksize, inspection_rate, major_count,
    minor_count,
};

fn line(out: &mut String, s: &str) {
    out.push_str(s);
    out.push('\n');
}

fn banner(out: &mut String, title: &str, record: &InspectionRecord, extra: Option<&str>) {
    let bar = "=".repeat(80);
    line(out, &bar);
    line(out, &format!("{title} - {}", record.inspection_id));
    line(out, &bar);
    line(out, &format!("Module: {}", record.module_name));
    line(out, &format!("Inspection Type: {}", record.inspection_type));
    line(out, &format!("Date: {}", record.inspection_date));
    if let Some(extra) = extra {
        line(out, extra);
    }
    line(out, &bar);
    line(out, "");
}

fn section(out: &mut String, title: &str) {
    line(out, title);
    line(out, &"-".repeat(40));
}

/// Detailed error list: every finding in insertion order.
pub fn render_error_list(record: &InspectionRecord) -> String {
    let mut out = String::new();
    let total = format!("Total Errors: {}", record.findings.len());
    banner(&mut out, "INSPECTION ERROR LIST", record, Some(&total));

    let separator = "-".repeat(80);
    for f in &record.findings {
        line(&mut out, &format!("Error #{:03}", f.sequence_number));
        line(&mut out, &format!("Location: {}", f.location));
        line(&mut out, &format!("Classification: {}", f.classification()));
        line(&mut out, "Description:");
        line(&mut out, &format!("  {}", f.description));
        if !f.resolution_note.is_empty() {
            line(&mut out, "Possible Solution:");
            line(&mut out, &format!("  {}", f.resolution_note));
        }
        line(&mut out, &separator);
        line(&mut out, "");
    }

    out
}

/// Module detail report: counts by severity, type, and category, plus the
/// reinspection decision.
pub fn render_module_detail(record: &InspectionRecord) -> String {
    let mut out = String::new();
    banner(&mut out, "MODULE DETAIL REPORT", record, None);

    section(&mut out, "ERROR SUMMARY");
    line(&mut out, &format!("Total Errors: {}", record.findings.len()));
    line(&mut out, &format!("Major: {}", major_count(record)));
    line(&mut out, &format!("Minor: {}", minor_count(record)));
    line(&mut out, "");

    section(&mut out, "ERRORS BY TYPE");
    for (error_type, count) in counts_by_type(record) {
        line(&mut out, &format!("{:4}: {count:3}", error_type.code()));
    }
    line(&mut out, "");

    section(&mut out, "ERRORS BY CATEGORY");
    for (category, count) in counts_by_category(record) {
        line(
            &mut out,
            &format!("{} ({:8}): {count:3}", category.code(), category.label()),
        );
    }
    line(&mut out, "");

    let decision = evaluate_reinspection(record);
    section(&mut out, "REINSPECTION DECISION");
    line(
        &mut out,
        &format!(
            "Reinspection Required: {}",
            if decision.required { "YES" } else { "NO" }
        ),
    );
    line(&mut out, &format!("Basis: {}", decision.reason_text()));
    if decision.is_fallback() {
        line(
            &mut out,
            "Note: major-error count is a heuristic approximation of the rework-percentage rule.",
        );
    }
    line(&mut out, "");

    out
}

/// Inspection summary: participants, size and effort metrics, error totals,
/// quality metrics when computable, and the sign-off block.
pub fn render_summary(record: &InspectionRecord) -> String {
    let mut out = String::new();
    banner(&mut out, "INSPECTION SUMMARY REPORT", record, None);

    section(&mut out, "PARTICIPANTS");
    for p in &record.participants {
        line(&mut out, &format!("  {}", p.combined()));
    }
    line(&mut out, "");

    let metrics = &record.metrics;
    section(&mut out, "SIZE ESTIMATES (ELOC)");
    line(
        &mut out,
        &format!("Pre-inspection:  {:6}", metrics.size_estimate_pre),
    );
    line(
        &mut out,
        &format!("Post-inspection: {:6}", metrics.size_estimate_post),
    );
    line(
        &mut out,
        &format!("Rework estimate: {:6}", metrics.rework_estimate()),
    );
    line(&mut out, "");

    section(&mut out, "EFFORT (PERSON-HOURS)");
    line(
        &mut out,
        &format!("Preparation: {:6.1}", metrics.preparation_hours),
    );
    line(&mut out, &format!("Meeting:     {:6.1}", metrics.meeting_hours));
    line(&mut out, &format!("Rework:      {:6.1}", metrics.rework_hours));
    line(
        &mut out,
        &format!("Follow-up:   {:6.1}", metrics.followup_hours),
    );
    line(
        &mut out,
        &format!("Total:       {:6.1}", metrics.total_effort_hours()),
    );
    line(&mut out, "");

    section(&mut out, "ERROR SUMMARY");
    line(&mut out, &format!("Major errors:  {:3}", major_count(record)));
    line(&mut out, &format!("Minor errors:  {:3}", minor_count(record)));
    line(
        &mut out,
        &format!("Total errors:  {:3}", record.findings.len()),
    );
    line(&mut out, "");

    // Omitted entirely rather than rendered as zero when not computable.
    let per_ksize = errors_per_ksize(record);
    let rate = inspection_rate(record);
    if per_ksize.is_some() || rate.is_some() {
        section(&mut out, "QUALITY METRICS");
        if let Some(per_ksize) = per_ksize {
            line(&mut out, &format!("Errors per K.LOC: {per_ksize:6.2}"));
        }
        if let Some(rate) = rate {
            line(&mut out, &format!("Inspection rate:  {rate:6.0} LOC/hour"));
        }
        line(&mut out, "");
    }

    section(&mut out, "SIGN-OFF");
    line(
        &mut out,
        "Designer:    _________________________  Date: __________",
    );
    line(
        &mut out,
        "Programmer:  _________________________  Date: __________",
    );
    line(
        &mut out,
        "Team Leader: _________________________  Date: __________",
    );
    line(
        &mut out,
        "Moderator:   _________________________  Date: __________",
    );
    line(&mut out, "");

    out
}
