// src/audit/mod.rs
// Contract audit: prompt/schema, normalization, orchestration

mod auditor;
mod normalize;
mod schema;
mod types;

pub use auditor::Auditor;
pub use normalize::{
    extract_audit, extract_payload, inspect, normalize, parse_tool_arguments, PayloadIssue,
    NO_EXPLANATION,
};
pub use schema::{audit_tool, audit_tool_choice, build_messages, AUDIT_TOOL_NAME};
pub use types::{
    AuditResult, MetricName, NormalizedMetric, Priority, RawAuditPayload, RawMetric, Suggestion,
};
