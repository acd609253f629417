//! Structured export and reload.
//!
//! `RecordDoc` is the wire form of an `InspectionRecord`: identity fields,
//! participants as combined `"name (role)"` strings, the six metrics, and
//! every finding including its derived classification. Reload re-validates
//! each finding and re-derives classification rather than trusting the
//! stored copy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use inspeq_types::{
    Finding, FindingError, InspectionRecord, Metrics, Participant, RECORD_SCHEMA_V1,
};

/// Wire document for one inspection record, schema `inspeq.record.v1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecordDoc {
    #[serde(default = "default_schema")]
    pub schema: String,
    pub inspection_id: String,
    pub inspection_type: String,
    pub module_name: String,
    pub inspection_date: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub findings: Vec<FindingDoc>,
}

fn default_schema() -> String {
    RECORD_SCHEMA_V1.to_string()
}

/// Wire form of one finding. The vocabulary fields are carried as strings so
/// reload can run them back through validation; `classification` is emitted
/// for consumers but ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FindingDoc {
    pub sequence_number: u32,
    pub location: String,
    pub error_type: String,
    pub category: String,
    pub severity: String,
    #[serde(default)]
    pub classification: String,
    pub description: String,
    #[serde(default)]
    pub resolution_note: String,
}

impl FindingDoc {
    fn from_finding(f: &Finding) -> Self {
        FindingDoc {
            sequence_number: f.sequence_number,
            location: f.location.clone(),
            error_type: f.error_type.code().to_string(),
            category: f.category.code().to_string(),
            severity: f.severity.code().to_string(),
            classification: f.classification(),
            description: f.description.clone(),
            resolution_note: f.resolution_note.clone(),
        }
    }

    fn into_finding(self) -> Result<Finding, FindingError> {
        Finding::new(
            self.sequence_number,
            self.location,
            &self.error_type,
            &self.category,
            &self.severity,
            self.description,
            self.resolution_note,
        )
    }
}

/// Failure to reconstruct a record from its wire form.
#[derive(Debug, thiserror::Error)]
pub enum RecordImportError {
    /// Malformed or incomplete JSON; serde names the missing/offending key.
    #[error("malformed record document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Finding(#[from] FindingError),
}

pub fn record_to_doc(record: &InspectionRecord) -> RecordDoc {
    RecordDoc {
        schema: RECORD_SCHEMA_V1.to_string(),
        inspection_id: record.inspection_id.clone(),
        inspection_type: record.inspection_type.clone(),
        module_name: record.module_name.clone(),
        inspection_date: record.inspection_date.clone(),
        participants: record.participants.iter().map(Participant::combined).collect(),
        metrics: record.metrics,
        findings: record.findings.iter().map(FindingDoc::from_finding).collect(),
    }
}

/// Renders the record's wire document as pretty JSON.
pub fn render_record_json(record: &InspectionRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&record_to_doc(record))
}

/// Rebuilds a record from its wire form, re-validating every finding.
pub fn record_from_doc(doc: RecordDoc) -> Result<InspectionRecord, FindingError> {
    let mut record = InspectionRecord::with_date(
        doc.inspection_id,
        doc.inspection_type,
        doc.module_name,
        doc.inspection_date,
    );
    record.participants = doc
        .participants
        .iter()
        .map(|s| Participant::from_combined(s))
        .collect();
    record.metrics = doc.metrics;
    for finding in doc.findings {
        record.add_finding(finding.into_finding()?);
    }
    Ok(record)
}

/// Parses and rebuilds a record from exported JSON.
pub fn record_from_json(text: &str) -> Result<InspectionRecord, RecordImportError> {
    let doc: RecordDoc = serde_json::from_str(text)?;
    Ok(record_from_doc(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspeq_types::MetricsUpdate;

    fn sample_record() -> InspectionRecord {
        let mut r = InspectionRecord::with_date("I2-MOD123-2024-01", "I2", "parser", "2024-01-15");
        r.add_participant("Bea", "Moderator");
        r.add_participant("Ann", "Coder");
        r.update_metrics(MetricsUpdate {
            size_estimate_pre: Some(1000),
            size_estimate_post: Some(1049),
            preparation_hours: Some(2.0),
            meeting_hours: Some(1.5),
            rework_hours: Some(3.0),
            followup_hours: Some(0.5),
        });
        r.add_finding(
            Finding::new(1, "src/mod.rs:10", "LO", "M", "MAJ", "missing bounds check", "").unwrap(),
        );
        r.add_finding(
            Finding::new(2, "src/mod.rs:55", "TB", "W", "MIN", "branch never taken", "drop it")
                .unwrap(),
        );
        r
    }

    #[test]
    fn export_carries_schema_and_derived_classification() {
        let doc = record_to_doc(&sample_record());
        assert_eq!(doc.schema, RECORD_SCHEMA_V1);
        assert_eq!(doc.findings[0].classification, "LO/M/MAJ");
        assert_eq!(doc.findings[1].classification, "TB/W/MIN");
        assert_eq!(doc.participants, ["Bea (Moderator)", "Ann (Coder)"]);
    }

    #[test]
    fn round_trip_preserves_record() {
        let original = sample_record();
        let json = render_record_json(&original).unwrap();
        let reloaded = record_from_json(&json).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn round_trip_json_is_byte_identical() {
        let original = sample_record();
        let first = render_record_json(&original).unwrap();
        let reloaded = record_from_json(&first).unwrap();
        let second = render_record_json(&reloaded).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reload_rederives_classification_instead_of_trusting_it() {
        let mut doc = record_to_doc(&sample_record());
        doc.findings[0].classification = "BOGUS/X/Y".to_string();
        let record = record_from_doc(doc).unwrap();
        assert_eq!(record.findings[0].classification(), "LO/M/MAJ");
    }

    #[test]
    fn reload_revalidates_vocabulary_fields() {
        let mut doc = record_to_doc(&sample_record());
        doc.findings[1].error_type = "XX".to_string();
        let err = record_from_doc(doc).unwrap_err();
        assert!(matches!(err, FindingError::ErrorType { .. }));
    }

    #[test]
    fn reload_accepts_lowercase_codes() {
        let mut doc = record_to_doc(&sample_record());
        doc.findings[0].error_type = "lo".to_string();
        doc.findings[0].severity = "maj".to_string();
        let record = record_from_doc(doc).unwrap();
        assert_eq!(record.findings[0].classification(), "LO/M/MAJ");
    }

    #[test]
    fn missing_identity_field_fails_with_the_key() {
        let err = record_from_json(r#"{"inspection_id": "I2-01"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing field"));
        assert!(msg.contains("inspection_type"));
    }

    #[test]
    fn missing_finding_field_fails_with_the_key() {
        let json = r#"{
            "inspection_id": "I2-01",
            "inspection_type": "I2",
            "module_name": "parser",
            "inspection_date": "2024-01-15",
            "findings": [{"sequence_number": 1, "error_type": "LO",
                          "category": "M", "severity": "MAJ",
                          "description": "d"}]
        }"#;
        let err = record_from_json(json).unwrap_err();
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn absent_optional_sections_default_to_empty() {
        let json = r#"{
            "inspection_id": "I2-01",
            "inspection_type": "I2",
            "module_name": "parser",
            "inspection_date": "2024-01-15"
        }"#;
        let record = record_from_json(json).unwrap();
        assert!(record.participants.is_empty());
        assert!(record.findings.is_empty());
        assert_eq!(record.metrics, Metrics::default());
    }

    #[test]
    fn export_json_field_shape() {
        let json = render_record_json(&sample_record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema"], "inspeq.record.v1");
        assert_eq!(value["metrics"]["size_estimate_pre"], 1000);
        assert_eq!(value["findings"][0]["sequence_number"], 1);
        assert_eq!(value["findings"][0]["classification"], "LO/M/MAJ");
        // resolution_note is always present, empty or not.
        assert_eq!(value["findings"][0]["resolution_note"], "");
        assert_eq!(value["findings"][1]["resolution_note"], "drop it");
    }
}
