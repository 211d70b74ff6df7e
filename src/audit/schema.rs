// src/audit/schema.rs
// Prompt and tool schema for the audit function call

use serde_json::{json, Value};

use super::types::MetricName;
use crate::llm::{force_function, Message, Tool};

/// Name of the function the model is asked to call
pub const AUDIT_TOOL_NAME: &str = "generate_audit_report";

const PRIORITIES: [&str; 4] = ["Critical", "High", "Medium", "Low"];

/// The single user message carrying the contract verbatim
pub fn build_messages(contract: &str) -> Vec<Message> {
    vec![Message::user(format!("Analyze this smart contract: {}", contract))]
}

/// Tool definition constraining the model's answer
pub fn audit_tool() -> Tool {
    Tool::function(
        AUDIT_TOOL_NAME,
        "Generate a detailed audit report for a smart contract",
        audit_parameters_schema(),
    )
}

/// `tool_choice` forcing the audit tool
pub fn audit_tool_choice() -> Value {
    force_function(AUDIT_TOOL_NAME)
}

fn audit_parameters_schema() -> Value {
    let metric_names: Vec<&str> = MetricName::ALL.iter().map(|m| m.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "auditReport": {
                "type": "string",
                "description": "A detailed audit report of the smart contract"
            },
            "metricScores": {
                "type": "array",
                "description": "An array containing exactly 6 specific metrics with scores from 0-10",
                "items": {
                    "type": "object",
                    "properties": {
                        "metric": {
                            "type": "string",
                            "enum": metric_names
                        },
                        "score": {
                            "type": "integer",
                            "minimum": 0,
                            "maximum": 10,
                            "description": "Score from 0-10, where 10 is the best"
                        },
                        "explanation": {
                            "type": "string",
                            "description": "Brief Explanation for the score provided"
                        }
                    },
                    "required": ["metric", "score"]
                },
                "minItems": 6,
                "maxItems": 6
            },
            "suggestionForImprovement": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category of the suggestion (e.g. Security, Performance, Code Quality)"
                        },
                        "suggestion": {
                            "type": "string",
                            "description": "Detailed suggestion for improvement"
                        },
                        "priority": {
                            "type": "string",
                            "enum": PRIORITIES,
                            "description": "Priority of the suggestion"
                        }
                    },
                    "required": ["category", "suggestion", "priority"]
                },
                "description": "A list of suggestions for improving the smart contract in terms of security, performance, and any other identified weakness"
            }
        },
        "required": ["auditReport", "metricScores", "suggestionForImprovement"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_embeds_contract_verbatim() {
        let contract = "pragma solidity ^0.8.0;\ncontract A { }";
        let messages = build_messages(contract);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        let content = messages[0].content.as_deref().unwrap();
        assert!(content.starts_with("Analyze this smart contract: "));
        assert!(content.ends_with(contract));
    }

    #[test]
    fn test_tool_lists_canonical_metrics_in_order() {
        let tool = audit_tool();
        assert_eq!(tool.function.name, AUDIT_TOOL_NAME);
        let names = &tool.function.parameters["properties"]["metricScores"]["items"]["properties"]
            ["metric"]["enum"];
        assert_eq!(
            names,
            &json!(["Security", "Performance", "Gas Efficiency", "Code Quality", "Documentation", "Other Key Areas"])
        );
    }

    #[test]
    fn test_tool_constrains_counts_and_priorities() {
        let params = audit_tool().function.parameters;
        let metrics = &params["properties"]["metricScores"];
        assert_eq!(metrics["minItems"], 6);
        assert_eq!(metrics["maxItems"], 6);
        assert_eq!(
            params["properties"]["suggestionForImprovement"]["items"]["properties"]["priority"]["enum"],
            json!(["Critical", "High", "Medium", "Low"])
        );
        assert_eq!(
            params["required"],
            json!(["auditReport", "metricScores", "suggestionForImprovement"])
        );
    }

    #[test]
    fn test_tool_choice_names_audit_tool() {
        let choice = audit_tool_choice();
        assert_eq!(choice["type"], "function");
        assert_eq!(choice["function"]["name"], AUDIT_TOOL_NAME);
    }
}
