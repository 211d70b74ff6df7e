// src/audit/normalize.rs
// Turns an untrusted tool-call payload into a complete, ordered AuditResult

use serde_json::{Number, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::types::{AuditResult, MetricName, NormalizedMetric, RawAuditPayload, RawMetric};
use crate::error::{AuditError, Result};
use crate::llm::ChatResult;

/// Explanation used when the model gave none (or an empty one)
pub const NO_EXPLANATION: &str = "No explanation provided";

/// Normalize a raw payload into the canonical six-metric report.
///
/// Entries are keyed by name in input order, so the last duplicate wins.
/// Names outside the canonical set are never looked up. A canonical metric
/// that is missing, has no score, or has a score of zero all yield `0`:
/// the output cannot tell a real zero from an absent metric.
pub fn normalize(raw: RawAuditPayload) -> AuditResult {
    let mut by_name: HashMap<&str, &RawMetric> = HashMap::new();
    for entry in &raw.metric_scores {
        if let Some(name) = entry.metric.as_deref() {
            by_name.insert(name, entry);
        }
    }

    let metric_scores = MetricName::ALL.map(|metric| {
        let found = by_name.get(metric.as_str());
        NormalizedMetric {
            metric,
            score: found
                .and_then(|e| e.score.clone())
                .filter(|s| !is_zero(s))
                .unwrap_or_else(|| Number::from(0u8)),
            explanation: found
                .and_then(|e| e.explanation.clone())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_EXPLANATION.to_string()),
        }
    });

    AuditResult {
        audit_report: raw.audit_report.unwrap_or_default(),
        metric_scores,
        suggestions: raw.suggestions,
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64() == Some(0.0)
}

/// Decode a tool call's JSON argument string
pub fn parse_tool_arguments(arguments: &str) -> Result<RawAuditPayload> {
    let value: Value =
        serde_json::from_str(arguments).map_err(|e| AuditError::Parse(e.to_string()))?;
    RawAuditPayload::from_value(&value)
}

/// Pull the raw payload out of the response's tool call
pub fn extract_payload(response: &ChatResult) -> Result<RawAuditPayload> {
    let call = response
        .tool_call
        .as_ref()
        .ok_or(AuditError::NoToolCallReturned)?;
    parse_tool_arguments(&call.function.arguments)
}

/// Extract and normalize in one step; no partial result on failure
pub fn extract_audit(response: &ChatResult) -> Result<AuditResult> {
    extract_payload(response).map(normalize)
}

// ═══════════════════════════════════════
// DIAGNOSTICS
// ═══════════════════════════════════════

/// Something in a raw payload that normalization silently papers over
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadIssue {
    UnnamedMetric,
    UnrecognizedMetric(String),
    DuplicateMetric(MetricName),
    MissingMetric(MetricName),
    NonIntegralScore { metric: MetricName, score: Number },
    ScoreOutOfRange { metric: MetricName, score: Number },
    UnrecognizedPriority(String),
}

impl fmt::Display for PayloadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedMetric => write!(f, "metric entry without a name was dropped"),
            Self::UnrecognizedMetric(name) => write!(f, "unrecognized metric '{}' was dropped", name),
            Self::DuplicateMetric(m) => write!(f, "metric '{}' appeared more than once; last entry kept", m),
            Self::MissingMetric(m) => write!(f, "metric '{}' was missing; defaulted to 0", m),
            Self::NonIntegralScore { metric, score } => {
                write!(f, "metric '{}' has non-integral score {}", metric, score)
            }
            Self::ScoreOutOfRange { metric, score } => {
                write!(f, "metric '{}' has score {} outside 0-10", metric, score)
            }
            Self::UnrecognizedPriority(p) => write!(f, "suggestion has unrecognized priority '{}'", p),
        }
    }
}

/// Report the gaps normalization does not fix. Never changes the result.
pub fn inspect(raw: &RawAuditPayload) -> Vec<PayloadIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<MetricName> = HashSet::new();
    let mut duplicated: HashSet<MetricName> = HashSet::new();
    let mut unrecognized: HashSet<&str> = HashSet::new();
    let mut winners: HashMap<MetricName, &RawMetric> = HashMap::new();

    for entry in &raw.metric_scores {
        let Some(name) = entry.metric.as_deref() else {
            issues.push(PayloadIssue::UnnamedMetric);
            continue;
        };
        match MetricName::from_name(name) {
            Some(metric) => {
                if !seen.insert(metric) && duplicated.insert(metric) {
                    issues.push(PayloadIssue::DuplicateMetric(metric));
                }
                winners.insert(metric, entry);
            }
            None => {
                if unrecognized.insert(name) {
                    issues.push(PayloadIssue::UnrecognizedMetric(name.to_string()));
                }
            }
        }
    }

    for metric in MetricName::ALL {
        let Some(entry) = winners.get(&metric) else {
            issues.push(PayloadIssue::MissingMetric(metric));
            continue;
        };
        let Some(score) = entry.score.as_ref() else {
            continue;
        };
        let integral = score.is_i64() || score.is_u64();
        if !integral {
            issues.push(PayloadIssue::NonIntegralScore { metric, score: score.clone() });
        }
        let in_range = score.as_f64().is_some_and(|v| (0.0..=10.0).contains(&v));
        if !in_range {
            issues.push(PayloadIssue::ScoreOutOfRange { metric, score: score.clone() });
        }
    }

    for suggestion in &raw.suggestions {
        if !suggestion.priority.is_recognized() {
            issues.push(PayloadIssue::UnrecognizedPriority(
                suggestion.priority.as_str().to_string(),
            ));
        }
    }

    issues
}
