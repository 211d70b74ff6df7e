// src/audit/types.rs
// Audit report types: untrusted tool payload and the canonical result

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::error::{AuditError, Result};

// ═══════════════════════════════════════
// METRIC NAMES
// ═══════════════════════════════════════

/// The six audit dimensions every report carries, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricName {
    Security,
    Performance,
    #[serde(rename = "Gas Efficiency")]
    GasEfficiency,
    #[serde(rename = "Code Quality")]
    CodeQuality,
    Documentation,
    #[serde(rename = "Other Key Areas")]
    OtherKeyAreas,
}

impl MetricName {
    /// Canonical output order
    pub const ALL: [MetricName; 6] = [
        MetricName::Security,
        MetricName::Performance,
        MetricName::GasEfficiency,
        MetricName::CodeQuality,
        MetricName::Documentation,
        MetricName::OtherKeyAreas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::GasEfficiency => "Gas Efficiency",
            Self::CodeQuality => "Code Quality",
            Self::Documentation => "Documentation",
            Self::OtherKeyAreas => "Other Key Areas",
        }
    }

    /// Exact, case-sensitive match against the canonical spelling
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════
// SUGGESTIONS
// ═══════════════════════════════════════

/// Suggestion priority. Values outside the four levels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Unrecognized(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(s) => s,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Critical" => Self::Critical,
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Unrecognized(s),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Improvement suggestion, passed through from the model as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub suggestion: String,
    pub priority: Priority,
}

impl Suggestion {
    /// Lenient read of one suggestion object; missing or non-string fields become empty
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            category: string_field(obj, "category").unwrap_or_default(),
            suggestion: string_field(obj, "suggestion").unwrap_or_default(),
            priority: Priority::from(string_field(obj, "priority").unwrap_or_default()),
        }
    }
}

// ═══════════════════════════════════════
// RAW PAYLOAD (untrusted)
// ═══════════════════════════════════════

/// One metric entry as the model sent it. Wrongly-typed fields read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetric {
    pub metric: Option<String>,
    pub score: Option<Number>,
    pub explanation: Option<String>,
}

impl RawMetric {
    pub fn new(metric: &str, score: impl Into<Number>, explanation: Option<&str>) -> Self {
        Self {
            metric: Some(metric.to_string()),
            score: Some(score.into()),
            explanation: explanation.map(str::to_string),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self {
                metric: string_field(obj, "metric"),
                score: obj.get("score").and_then(|s| s.as_number()).cloned(),
                explanation: string_field(obj, "explanation"),
            },
            None => Self::default(),
        }
    }
}

/// Decoded tool-call arguments, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAuditPayload {
    pub audit_report: Option<String>,
    pub metric_scores: Vec<RawMetric>,
    pub suggestions: Vec<Suggestion>,
}

impl RawAuditPayload {
    /// Read a payload from decoded JSON. Only a non-object top level is rejected.
    ///
    /// Suggestions come from `suggestionForImprovement`, falling back to
    /// `suggestions` so a serialized `AuditResult` reads back unchanged.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            AuditError::Parse(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            ))
        })?;

        let metric_scores = obj
            .get("metricScores")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(RawMetric::from_value).collect())
            .unwrap_or_default();

        let suggestions = obj
            .get("suggestionForImprovement")
            .and_then(|v| v.as_array())
            .or_else(|| obj.get("suggestions").and_then(|v| v.as_array()))
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_object())
                    .map(Suggestion::from_object)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            audit_report: string_field(obj, "auditReport"),
            metric_scores,
            suggestions,
        })
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ═══════════════════════════════════════
// CANONICAL RESULT
// ═══════════════════════════════════════

/// One canonical metric. `score` is the model's number, unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetric {
    pub metric: MetricName,
    pub score: Number,
    pub explanation: String,
}

/// Complete audit report: always exactly six metrics in canonical order.
///
/// Serialized as `{auditReport, metricScores, suggestions}`. The model's
/// `suggestionForImprovement` key is accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub audit_report: String,
    pub metric_scores: [NormalizedMetric; 6],
    #[serde(alias = "suggestionForImprovement")]
    pub suggestions: Vec<Suggestion>,
}

impl AuditResult {
    pub fn metric(&self, name: MetricName) -> &NormalizedMetric {
        // metric_scores is built from MetricName::ALL, so the index lines up
        let idx = MetricName::ALL
            .iter()
            .position(|m| *m == name)
            .unwrap_or_default();
        &self.metric_scores[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ============================================================================
    // MetricName
    // ============================================================================

    #[test]
    fn test_metric_names_round_trip() {
        for name in MetricName::ALL {
            assert_eq!(MetricName::from_name(name.as_str()), Some(name));
            let encoded = serde_json::to_value(name).unwrap();
            assert_eq!(encoded, json!(name.as_str()));
        }
    }

    #[test]
    fn test_metric_name_match_is_exact() {
        assert_eq!(MetricName::from_name("Gas Efficiency"), Some(MetricName::GasEfficiency));
        assert_eq!(MetricName::from_name("gas efficiency"), None);
        assert_eq!(MetricName::from_name("Other key areas"), None);
        assert_eq!(MetricName::from_name(" Security"), None);
    }

    // ============================================================================
    // Priority
    // ============================================================================

    #[test]
    fn test_priority_known_levels() {
        assert_eq!(Priority::from("Critical".to_string()), Priority::Critical);
        assert_eq!(Priority::from("Low".to_string()), Priority::Low);
        assert!(Priority::High.is_recognized());
    }

    #[test]
    fn test_priority_unrecognized_kept_verbatim() {
        let p: Priority = serde_json::from_value(json!("urgent")).unwrap();
        assert_eq!(p, Priority::Unrecognized("urgent".to_string()));
        assert!(!p.is_recognized());
        assert_eq!(serde_json::to_value(&p).unwrap(), json!("urgent"));
    }

    // ============================================================================
    // RawAuditPayload
    // ============================================================================

    #[test]
    fn test_payload_rejects_non_object() {
        let err = RawAuditPayload::from_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, AuditError::Parse(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_payload_reads_fields() {
        let value = json!({
            "auditReport": "Looks fine",
            "metricScores": [
                {"metric": "Security", "score": 7, "explanation": "ok"},
                {"metric": "Performance", "score": "high"},
                "garbage"
            ],
            "suggestionForImprovement": [
                {"category": "Security", "suggestion": "Add guard", "priority": "High"},
                42
            ]
        });
        let payload = RawAuditPayload::from_value(&value).unwrap();
        assert_eq!(payload.audit_report.as_deref(), Some("Looks fine"));
        assert_eq!(payload.metric_scores.len(), 3);
        assert_eq!(payload.metric_scores[0], RawMetric::new("Security", 7, Some("ok")));
        assert_eq!(payload.metric_scores[1].score, None);
        assert_eq!(payload.metric_scores[2], RawMetric::default());
        assert_eq!(payload.suggestions.len(), 1);
        assert_eq!(payload.suggestions[0].priority, Priority::High);
    }

    #[test]
    fn test_payload_falls_back_to_suggestions_key() {
        let value = json!({
            "suggestions": [{"category": "Docs", "suggestion": "Add NatSpec", "priority": "Low"}]
        });
        let payload = RawAuditPayload::from_value(&value).unwrap();
        assert_eq!(payload.suggestions.len(), 1);
        assert!(payload.audit_report.is_none());
        assert!(payload.metric_scores.is_empty());
    }

    #[test]
    fn test_suggestion_missing_fields_are_empty() {
        let value = json!({"suggestionForImprovement": [{"category": "Gas"}]});
        let payload = RawAuditPayload::from_value(&value).unwrap();
        let s = &payload.suggestions[0];
        assert_eq!(s.category, "Gas");
        assert_eq!(s.suggestion, "");
        assert_eq!(s.priority, Priority::Unrecognized(String::new()));
    }

    #[test]
    fn test_suggestions_fallback_when_primary_key_unusable() {
        for primary in [json!(null), json!("none"), json!({"category": "Gas"})] {
            let value = json!({
                "suggestionForImprovement": primary,
                "suggestions": [{"category": "Gas", "suggestion": "Pack storage", "priority": "Medium"}]
            });
            let payload = RawAuditPayload::from_value(&value).unwrap();
            assert_eq!(payload.suggestions.len(), 1);
            assert_eq!(payload.suggestions[0].suggestion, "Pack storage");
        }
    }

    #[test]
    fn test_primary_suggestion_key_wins_when_array() {
        let value = json!({
            "suggestionForImprovement": [],
            "suggestions": [{"category": "Gas", "suggestion": "Pack storage", "priority": "Medium"}]
        });
        assert!(RawAuditPayload::from_value(&value).unwrap().suggestions.is_empty());
    }

    // ============================================================================
    // AuditResult
    // ============================================================================

    #[test]
    fn test_audit_result_reads_model_suggestion_key() {
        let metrics: Vec<_> = MetricName::ALL
            .iter()
            .map(|m| json!({"metric": m.as_str(), "score": 5, "explanation": "ok"}))
            .collect();
        let value = json!({
            "auditReport": "r",
            "metricScores": metrics,
            "suggestionForImprovement": [{"category": "Security", "suggestion": "Use checks-effects-interactions", "priority": "High"}]
        });
        let result: AuditResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.suggestions[0].priority, Priority::High);

        let encoded = serde_json::to_value(&result).unwrap();
        assert!(encoded.get("suggestions").is_some());
        assert!(encoded.get("suggestionForImprovement").is_none());
    }
}
