//! The reinspection decision.
//!
//! When a pre-inspection size estimate exists the decision follows the
//! rework-percentage rule. Without one it falls back to counting Major
//! findings, a deliberately weaker heuristic; the basis records which rule
//! fired so report output can say so.

use inspeq_types::InspectionRecord;

use crate::stats::major_count;

/// Rework percentage above which a reinspection is required (strict `>`).
pub const REWORK_PERCENT_THRESHOLD: f64 = 5.0;

/// Major-finding count above which the fallback requires reinspection
/// (strict `>`).
pub const MAJOR_FINDING_THRESHOLD: usize = 5;

/// Which rule produced the decision, with the inputs it saw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReinspectionBasis {
    /// Percentage of material reworked against the pre-inspection estimate.
    ReworkPercentage { reworked: u64, percentage: f64 },
    /// Heuristic fallback used when no pre-inspection estimate exists.
    MajorFindingFallback { major_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReinspectionDecision {
    pub required: bool,
    pub basis: ReinspectionBasis,
}

impl ReinspectionDecision {
    /// One-line explanation of the rule that fired, for report output.
    pub fn reason_text(&self) -> String {
        match self.basis {
            ReinspectionBasis::ReworkPercentage {
                reworked,
                percentage,
            } => format!(
                "{percentage:.1}% of material reworked ({reworked} units; threshold {REWORK_PERCENT_THRESHOLD}%)"
            ),
            ReinspectionBasis::MajorFindingFallback { major_count } => format!(
                "{major_count} major errors (threshold {MAJOR_FINDING_THRESHOLD}; \
                 heuristic fallback, no pre-inspection size estimate)"
            ),
        }
    }

    /// True when the decision came from the major-finding heuristic rather
    /// than the percentage rule.
    pub fn is_fallback(&self) -> bool {
        matches!(self.basis, ReinspectionBasis::MajorFindingFallback { .. })
    }
}

pub fn evaluate_reinspection(record: &InspectionRecord) -> ReinspectionDecision {
    let metrics = &record.metrics;
    if metrics.size_estimate_pre > 0 {
        let reworked = metrics.rework_estimate();
        let percentage = reworked as f64 / metrics.size_estimate_pre as f64 * 100.0;
        ReinspectionDecision {
            required: percentage > REWORK_PERCENT_THRESHOLD,
            basis: ReinspectionBasis::ReworkPercentage {
                reworked,
                percentage,
            },
        }
    } else {
        let majors = major_count(record);
        ReinspectionDecision {
            required: majors > MAJOR_FINDING_THRESHOLD,
            basis: ReinspectionBasis::MajorFindingFallback {
                major_count: majors,
            },
        }
    }
}
