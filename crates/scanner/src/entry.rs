//! Construction of a single report entry from a feed record

use crate::normalize::{current_iso8601, float_to_double_round, to_sentence_case};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;
use vds_errors::ScanError;
use vds_types::{
    CvssMetrics, CvssScore, CvssVector, MatchCondition, ReportEntry, ScannerType, Score,
    VulnerabilityDescription, ENUMERATION_CVE,
};

/// Inputs for one candidate, borrowed from the scan context
pub(crate) struct Candidate<'a> {
    pub cve_id: &'a str,
    pub scanner: ScannerType,
    pub item_id: Option<&'a str>,
    pub annotation: &'a Value,
    pub condition: Option<&'a MatchCondition>,
}

/// Build the report entry for `candidate` from its feed record
pub(crate) fn build_entry(
    candidate: &Candidate<'_>,
    record: VulnerabilityDescription,
) -> Result<ReportEntry, ScanError> {
    let cve_id = candidate.cve_id;

    let classification = required(cve_id, "classification", record.classification)?;
    let description = required(cve_id, "description", record.description)?;
    let reference = required(cve_id, "reference", record.reference)?;
    let published_at = required(cve_id, "date_published", record.date_published)?;
    let score_version = required(cve_id, "score_version", record.score_version)?;
    let severity = required(cve_id, "severity", record.severity)?;
    if !record.score_base.is_finite() {
        return Err(ScanError::MalformedRecord {
            cve_id: cve_id.to_string(),
            field: "score_base".to_string(),
        });
    }

    let condition = describe_condition(cve_id, candidate.condition)?;
    let cvss = cvss_block(cve_id, &score_version, record.cvss);

    Ok(ReportEntry {
        category: candidate.scanner.report_category().to_string(),
        classification,
        description,
        detected_at: current_iso8601(),
        enumeration: ENUMERATION_CVE.to_string(),
        id: cve_id.to_string(),
        item_id: candidate.item_id.map(str::to_string),
        published_at,
        reference,
        score: Score {
            base: float_to_double_round(record.score_base, 2),
            version: score_version,
        },
        severity: to_sentence_case(&severity),
        assigner: record.assigner_short_name,
        cwe_reference: record.cwe_id,
        updated: record.date_updated,
        condition,
        cvss,
        annotations: passthrough_annotations(cve_id, candidate.annotation),
    })
}

fn required(cve_id: &str, field: &str, value: Option<String>) -> Result<String, ScanError> {
    value.ok_or_else(|| ScanError::MalformedRecord {
        cve_id: cve_id.to_string(),
        field: field.to_string(),
    })
}

fn describe_condition(
    cve_id: &str,
    condition: Option<&MatchCondition>,
) -> Result<Option<String>, ScanError> {
    let Some(condition) = condition else {
        debug!(cve_id, "no match condition recorded");
        return Ok(None);
    };

    condition
        .describe()
        .map(Some)
        .ok_or_else(|| ScanError::InvalidMatchCondition {
            cve_id: cve_id.to_string(),
            condition: condition.condition.to_string(),
        })
}

/// Vector block keyed by "cvss" plus the major digit of the score version
fn cvss_block(
    cve_id: &str,
    score_version: &str,
    metrics: CvssMetrics,
) -> BTreeMap<String, CvssScore> {
    let mut block = BTreeMap::new();

    let Some(major) = score_version.chars().next() else {
        debug!(cve_id, "CVSS version not found");
        return block;
    };

    let mut vector = CvssVector {
        availability: metrics.availability_impact,
        confidentiality_impact: metrics.confidentiality_impact,
        integrity_impact: metrics.integrity_impact,
        ..CvssVector::default()
    };

    match major {
        '2' => {
            vector.access_complexity = metrics.access_complexity;
            vector.authentication = metrics.authentication;
        }
        '3' => {
            vector.attack_vector = metrics.attack_vector;
            vector.privileges_required = metrics.privileges_required;
            vector.scope = metrics.scope;
            vector.user_interaction = metrics.user_interaction;
        }
        _ => debug!(cve_id, score_version, "CVSS version not supported"),
    }

    block.insert(format!("cvss{major}"), CvssScore { vector });
    block
}

fn passthrough_annotations(cve_id: &str, annotation: &Value) -> Map<String, Value> {
    match annotation {
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| !ReportEntry::FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        Value::Null => Map::new(),
        _ => {
            debug!(cve_id, "ignoring non-object matcher annotation");
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vds_types::MatchRuleCondition;

    fn record(version: &str) -> VulnerabilityDescription {
        VulnerabilityDescription {
            assigner_short_name: Some("assigner_short_name_test_string".into()),
            classification: Some("classification_test_string".into()),
            cwe_id: Some("cwe_id_test_string".into()),
            date_published: Some("date_published_test_string".into()),
            date_updated: Some("date_updated_test_string".into()),
            description: Some("description_test_string".into()),
            reference: Some("reference_test_string".into()),
            score_base: 8.3,
            score_version: Some(version.into()),
            severity: Some("severity_test_string".into()),
            cvss: CvssMetrics {
                access_complexity: Some("LOW".into()),
                attack_vector: Some("NETWORK".into()),
                authentication: Some("NONE".into()),
                availability_impact: Some("HIGH".into()),
                confidentiality_impact: Some("HIGH".into()),
                integrity_impact: Some("LOW".into()),
                privileges_required: Some("NONE".into()),
                scope: Some("UNCHANGED".into()),
                user_interaction: Some("REQUIRED".into()),
            },
        }
    }

    fn candidate<'a>(annotation: &'a Value, condition: Option<&'a MatchCondition>) -> Candidate<'a> {
        Candidate {
            cve_id: "CVE-2024-1234",
            scanner: ScannerType::Package,
            item_id: Some("ec465b7eb5fa011a336e95614072e4c7f1a65a53"),
            annotation,
            condition,
        }
    }

    #[test]
    fn cvss3_vector_fields() {
        let annotation = json!({});
        let entry = build_entry(&candidate(&annotation, None), record("3")).unwrap();
        let vector = &entry.cvss["cvss3"].vector;

        assert_eq!(entry.cvss.len(), 1);
        assert_eq!(vector.attack_vector.as_deref(), Some("NETWORK"));
        assert_eq!(vector.scope.as_deref(), Some("UNCHANGED"));
        assert_eq!(vector.availability.as_deref(), Some("HIGH"));
        assert_eq!(vector.access_complexity, None);
        assert_eq!(vector.authentication, None);
    }

    #[test]
    fn cvss2_vector_fields() {
        let annotation = json!({});
        let entry = build_entry(&candidate(&annotation, None), record("2.0")).unwrap();
        let vector = &entry.cvss["cvss2"].vector;

        assert_eq!(vector.access_complexity.as_deref(), Some("LOW"));
        assert_eq!(vector.authentication.as_deref(), Some("NONE"));
        assert_eq!(vector.integrity_impact.as_deref(), Some("LOW"));
        assert_eq!(vector.attack_vector, None);
        assert_eq!(vector.user_interaction, None);
    }

    #[test]
    fn unsupported_version_keeps_shared_impacts() {
        let annotation = json!({});
        let entry = build_entry(&candidate(&annotation, None), record("4")).unwrap();
        let vector = &entry.cvss["cvss4"].vector;

        assert_eq!(vector.confidentiality_impact.as_deref(), Some("HIGH"));
        assert_eq!(vector.attack_vector, None);
        assert_eq!(vector.access_complexity, None);
    }

    #[test]
    fn empty_version_omits_vector_block() {
        let annotation = json!({});
        let entry = build_entry(&candidate(&annotation, None), record("")).unwrap();
        assert!(entry.cvss.is_empty());
        assert_eq!(entry.score.version, "");
    }

    #[test]
    fn missing_field_names_the_field() {
        let annotation = json!({});
        let mut incomplete = record("3");
        incomplete.reference = None;

        let err = build_entry(&candidate(&annotation, None), incomplete).unwrap_err();
        assert!(matches!(
            err,
            ScanError::MalformedRecord { ref field, .. } if field == "reference"
        ));
    }

    #[test]
    fn non_finite_score_is_rejected() {
        let annotation = json!({});
        for score in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut broken = record("3");
            broken.score_base = score;

            let err = build_entry(&candidate(&annotation, None), broken).unwrap_err();
            assert!(matches!(
                err,
                ScanError::MalformedRecord { ref field, .. } if field == "score_base"
            ));
        }
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let annotation = json!({});
        let mut sparse = record("3");
        sparse.assigner_short_name = None;
        sparse.cwe_id = None;
        sparse.date_updated = None;

        let entry = build_entry(&candidate(&annotation, None), sparse).unwrap();
        assert_eq!(entry.assigner, None);
        assert_eq!(entry.cwe_reference, None);
        assert_eq!(entry.updated, None);
    }

    #[test]
    fn condition_sentence() {
        let annotation = json!({});
        let condition = MatchCondition::new("1.2.3", MatchRuleCondition::LessThan);
        let entry = build_entry(&candidate(&annotation, Some(&condition)), record("3")).unwrap();
        assert_eq!(entry.condition.as_deref(), Some("Package less than 1.2.3"));
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let annotation = json!({});
        let condition = MatchCondition::new("1.2.3", MatchRuleCondition::Unknown);
        let err = build_entry(&candidate(&annotation, Some(&condition)), record("3")).unwrap_err();
        assert!(matches!(err, ScanError::InvalidMatchCondition { .. }));
    }

    #[test]
    fn annotations_never_override_synthesized_fields() {
        let annotation = json!({
            "severity": "bogus",
            "id": "CVE-0000-0000",
            "feed_source": "nvd"
        });
        let entry = build_entry(&candidate(&annotation, None), record("3")).unwrap();

        assert_eq!(entry.severity, "Severity_test_string");
        assert_eq!(entry.id, "CVE-2024-1234");
        assert_eq!(entry.annotations.len(), 1);
        assert_eq!(entry.annotations["feed_source"], "nvd");
    }
}
