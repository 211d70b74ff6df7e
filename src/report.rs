// src/report.rs
// Plain-text rendering of an audit result for the terminal

use std::fmt::Write;

use crate::audit::AuditResult;

const RULE: &str = "==================================";

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n {}", RULE);
    let _ = writeln!(out, "           {}", title);
    let _ = writeln!(out, " {}\n", RULE);
}

/// Render the three report sections: prose, metric scores, suggestions
pub fn render_report(result: &AuditResult) -> String {
    let mut out = String::new();

    section(&mut out, "AUDIT REPORT");
    let _ = writeln!(out, "{}", result.audit_report);

    section(&mut out, "METRIC SCORES");
    for metric in &result.metric_scores {
        let _ = writeln!(out, "{}: {}/10", metric.metric, metric.score);
        let _ = writeln!(out, "Explanation: {}", metric.explanation);
        out.push('\n');
    }

    section(&mut out, "SUGGESTIONS FOR IMPROVEMENTS");
    if result.suggestions.is_empty() {
        out.push_str("No suggestions provided\n");
    }
    for suggestion in &result.suggestions {
        let _ = writeln!(out, "Category: {}", suggestion.category);
        let _ = writeln!(out, "Priority: {}", suggestion.priority);
        let _ = writeln!(out, "Suggestion: {}", suggestion.suggestion);
        out.push('\n');
    }

    out
}
