//! Data types (vocabulary + record) for inspeq.
//!
//! This crate is intentionally "dumb": the closed inspection vocabularies,
//! the validated `Finding`, and the `InspectionRecord` aggregate. All
//! derivation (statistics, reinspection, rendering) lives in `inspeq-core`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const RECORD_SCHEMA_V1: &str = "inspeq.record.v1";

/// Delimiter joining type/category/severity in a classification string.
pub const CLASSIFICATION_DELIMITER: &str = "/";

/// Defect type codes from the classic Fagan inspection taxonomy.
///
/// Variants are declared in ascending code order; the derived `Ord` therefore
/// sorts by code, which keeps per-type report sections deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorType {
    /// CC: code comments
    CodeComments,
    /// CU: control-block usage
    CbUsage,
    /// DA: data area usage
    DataArea,
    /// DE: design error
    DesignError,
    /// IC: interconnect calls
    InterconnectCalls,
    /// IR: interconnect requirements
    InterconnectReqts,
    /// LO: logic
    Logic,
    /// MA: module attributes
    ModuleAttributes,
    /// MD: more detail needed
    MoreDetail,
    /// MN: maintainability
    Maintainability,
    /// OT: other
    Other,
    /// PE: performance
    Performance,
    /// PR: prologue/prose
    Prologue,
    /// PU: program language usage
    LanguageUsage,
    /// RU: register usage
    RegisterUsage,
    /// ST: standards
    Standards,
    /// SU: storage usage
    StorageUsage,
    /// TB: test and branch
    TestBranch,
}

impl ErrorType {
    /// Every defect type, in ascending code order.
    pub const ALL: [ErrorType; 18] = [
        ErrorType::CodeComments,
        ErrorType::CbUsage,
        ErrorType::DataArea,
        ErrorType::DesignError,
        ErrorType::InterconnectCalls,
        ErrorType::InterconnectReqts,
        ErrorType::Logic,
        ErrorType::ModuleAttributes,
        ErrorType::MoreDetail,
        ErrorType::Maintainability,
        ErrorType::Other,
        ErrorType::Performance,
        ErrorType::Prologue,
        ErrorType::LanguageUsage,
        ErrorType::RegisterUsage,
        ErrorType::Standards,
        ErrorType::StorageUsage,
        ErrorType::TestBranch,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ErrorType::CodeComments => "CC",
            ErrorType::CbUsage => "CU",
            ErrorType::DataArea => "DA",
            ErrorType::DesignError => "DE",
            ErrorType::InterconnectCalls => "IC",
            ErrorType::InterconnectReqts => "IR",
            ErrorType::Logic => "LO",
            ErrorType::ModuleAttributes => "MA",
            ErrorType::MoreDetail => "MD",
            ErrorType::Maintainability => "MN",
            ErrorType::Other => "OT",
            ErrorType::Performance => "PE",
            ErrorType::Prologue => "PR",
            ErrorType::LanguageUsage => "PU",
            ErrorType::RegisterUsage => "RU",
            ErrorType::Standards => "ST",
            ErrorType::StorageUsage => "SU",
            ErrorType::TestBranch => "TB",
        }
    }

    /// The legal codes as a comma-separated list, ascending.
    pub fn codes() -> String {
        let codes: Vec<&str> = Self::ALL.iter().map(|t| t.code()).collect();
        codes.join(", ")
    }

    /// Case-insensitive parse of a defect type code.
    pub fn parse(input: &str) -> Result<Self, FindingError> {
        let code = input.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| FindingError::ErrorType {
                value: input.to_string(),
                expected: Self::codes(),
            })
    }
}

/// Defect category: what the inspected material got wrong.
///
/// Declared in ascending code order (E, M, W) so derived `Ord` sorts by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// E: something present that should not be
    Extra,
    /// M: something required that is absent
    Missing,
    /// W: something present but incorrect
    Wrong,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Extra, Category::Missing, Category::Wrong];

    pub fn code(self) -> &'static str {
        match self {
            Category::Extra => "E",
            Category::Missing => "M",
            Category::Wrong => "W",
        }
    }

    /// Fixed human label used in report output.
    pub fn label(self) -> &'static str {
        match self {
            Category::Extra => "Extra",
            Category::Missing => "Missing",
            Category::Wrong => "Wrong",
        }
    }

    pub fn codes() -> String {
        let codes: Vec<&str> = Self::ALL.iter().map(|c| c.code()).collect();
        codes.join(", ")
    }

    pub fn parse(input: &str) -> Result<Self, FindingError> {
        let code = input.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| FindingError::Category {
                value: input.to_string(),
                expected: Self::codes(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Major,
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 2] = [Severity::Major, Severity::Minor];

    pub fn code(self) -> &'static str {
        match self {
            Severity::Major => "MAJ",
            Severity::Minor => "MIN",
        }
    }

    pub fn codes() -> String {
        let codes: Vec<&str> = Self::ALL.iter().map(|s| s.code()).collect();
        codes.join(", ")
    }

    pub fn parse(input: &str) -> Result<Self, FindingError> {
        let code = input.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.code() == code)
            .ok_or_else(|| FindingError::Severity {
                value: input.to_string(),
                expected: Self::codes(),
            })
    }
}

/// Rejected input at `Finding` construction. Each variant names the offending
/// field and carries the value plus the full legal set, so a caller can show
/// a human exactly what to correct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FindingError {
    #[error("invalid error type '{value}'; must be one of: {expected}")]
    ErrorType { value: String, expected: String },

    #[error("invalid category '{value}'; must be one of: {expected}")]
    Category { value: String, expected: String },

    #[error("invalid severity '{value}'; must be one of: {expected}")]
    Severity { value: String, expected: String },
}

/// A single defect found during an inspection session.
///
/// Constructed once via [`Finding::new`], which validates the three
/// vocabulary fields; immutable thereafter by convention (the owning record
/// only appends). `sequence_number` uniqueness is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub sequence_number: u32,
    /// Free-text locator, e.g. `file:line` or `module:function:line`.
    pub location: String,
    pub error_type: ErrorType,
    pub category: Category,
    pub severity: Severity,
    pub description: String,
    /// Optional; empty when no resolution has been proposed.
    pub resolution_note: String,
}

impl Finding {
    /// Validating constructor. The vocabulary fields accept any case and are
    /// stored in canonical uppercase-code form.
    pub fn new(
        sequence_number: u32,
        location: impl Into<String>,
        error_type: &str,
        category: &str,
        severity: &str,
        description: impl Into<String>,
        resolution_note: impl Into<String>,
    ) -> Result<Self, FindingError> {
        Ok(Finding {
            sequence_number,
            location: location.into(),
            error_type: ErrorType::parse(error_type)?,
            category: Category::parse(category)?,
            severity: Severity::parse(severity)?,
            description: description.into(),
            resolution_note: resolution_note.into(),
        })
    }

    /// Composite classification string, `TYPE/CATEGORY/SEVERITY`.
    ///
    /// Always derived from the three source fields; never stored.
    pub fn classification(&self) -> String {
        [
            self.error_type.code(),
            self.category.code(),
            self.severity.code(),
        ]
        .join(CLASSIFICATION_DELIMITER)
    }
}

/// An inspection participant. Rendered and exported as `"name (role)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub role: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Participant {
            name: name.into(),
            role: role.into(),
        }
    }

    /// The combined wire/display form.
    pub fn combined(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }

    /// Inverse of [`Participant::combined`]. Splits on the last `" ("` so
    /// names containing parentheses survive a round-trip; input without the
    /// suffix becomes a participant with an empty role.
    pub fn from_combined(s: &str) -> Self {
        if let Some(idx) = s.rfind(" (") {
            if s.ends_with(')') {
                return Participant {
                    name: s[..idx].to_string(),
                    role: s[idx + 2..s.len() - 1].to_string(),
                };
            }
        }
        Participant {
            name: s.to_string(),
            role: String::new(),
        }
    }
}

/// Effort and size metrics for one inspection. Sizes are ELOC-style units;
/// hours are person-hours. Everything defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metrics {
    #[serde(default)]
    pub size_estimate_pre: u64,
    #[serde(default)]
    pub size_estimate_post: u64,
    #[serde(default)]
    pub preparation_hours: f64,
    #[serde(default)]
    pub meeting_hours: f64,
    #[serde(default)]
    pub rework_hours: f64,
    #[serde(default)]
    pub followup_hours: f64,
}

impl Metrics {
    pub fn total_effort_hours(&self) -> f64 {
        self.preparation_hours + self.meeting_hours + self.rework_hours + self.followup_hours
    }

    /// `|post - pre|`, the size of the material changed by rework.
    pub fn rework_estimate(&self) -> u64 {
        self.size_estimate_post.abs_diff(self.size_estimate_pre)
    }

    /// Merge a partial update; absent keys are left unchanged.
    pub fn apply(&mut self, update: MetricsUpdate) {
        if let Some(v) = update.size_estimate_pre {
            self.size_estimate_pre = v;
        }
        if let Some(v) = update.size_estimate_post {
            self.size_estimate_post = v;
        }
        if let Some(v) = update.preparation_hours {
            self.preparation_hours = v;
        }
        if let Some(v) = update.meeting_hours {
            self.meeting_hours = v;
        }
        if let Some(v) = update.rework_hours {
            self.rework_hours = v;
        }
        if let Some(v) = update.followup_hours {
            self.followup_hours = v;
        }
    }
}

/// Partial metrics update; `None` leaves the corresponding field unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsUpdate {
    pub size_estimate_pre: Option<u64>,
    pub size_estimate_post: Option<u64>,
    pub preparation_hours: Option<f64>,
    pub meeting_hours: Option<f64>,
    pub rework_hours: Option<f64>,
    pub followup_hours: Option<f64>,
}

/// The aggregate for one inspection session: identity, participants,
/// findings, and metrics.
///
/// Participants and findings are append-only and keep insertion order; there
/// is no deletion. The record lives for a single report-generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRecord {
    pub inspection_id: String,
    /// Review-depth tier, e.g. I0/I1/I2/I3.
    pub inspection_type: String,
    pub module_name: String,
    /// YYYY-MM-DD.
    pub inspection_date: String,
    pub participants: Vec<Participant>,
    pub findings: Vec<Finding>,
    pub metrics: Metrics,
}

impl InspectionRecord {
    /// New record dated today (local time).
    pub fn new(
        inspection_id: impl Into<String>,
        inspection_type: impl Into<String>,
        module_name: impl Into<String>,
    ) -> Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self::with_date(inspection_id, inspection_type, module_name, today)
    }

    pub fn with_date(
        inspection_id: impl Into<String>,
        inspection_type: impl Into<String>,
        module_name: impl Into<String>,
        inspection_date: impl Into<String>,
    ) -> Self {
        InspectionRecord {
            inspection_id: inspection_id.into(),
            inspection_type: inspection_type.into(),
            module_name: module_name.into(),
            inspection_date: inspection_date.into(),
            participants: Vec::new(),
            findings: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    pub fn add_participant(&mut self, name: impl Into<String>, role: impl Into<String>) {
        self.participants.push(Participant::new(name, role));
    }

    pub fn add_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn update_metrics(&mut self, update: MetricsUpdate) {
        self.metrics.apply(update);
    }
}
