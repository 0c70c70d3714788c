//! Prompt construction and LLM response cleanup

use crate::graph::{Record, SchemaSummary};

/// Prompt asking the model to translate a question into a plan document
pub fn translation_prompt(question: &str, schema: &SchemaSummary) -> String {
    format!(
        "You are an expert at converting natural language questions into structured \
graph retrieval plans for a luxury fashion supply chain system.\n\n{}\n\
Given the question below, produce a JSON object with these fields:\n\
- \"target_label\": the record type to start from (one of the record types above)\n\
- \"filters\": an object of property constraints, e.g. {{\"location\": \"Florence\"}}\n\
- \"hops\": an ordered list of relationship types to traverse, e.g. [\"PROVIDES\"]\n\n\
Question: {}\n\nRespond with the JSON object only, no markdown, no explanations.",
        schema.describe(),
        question
    )
}

/// Prompt asking the model to answer the question from retrieved records
pub fn synthesis_prompt(question: &str, records: &[Record]) -> String {
    let results = serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a supply chain expert for luxury fashion brands.\n\n\
Question: {}\n\nQuery Results:\n{}\n\n\
Based on the query results above, provide a clear, professional answer to the \
question. If the results are empty or insufficient, explain what information is \
missing. Include specific details like names, locations, certifications, and \
dates when available.\n\nAnswer:",
        question, results
    )
}

/// Strip markdown fences and surrounding prose from an LLM reply, keeping
/// the first JSON object found
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // Fenced code block: take the contents of the first fence
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // Skip language tag (e.g. "json\n")
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = after_fence[body_start..].find("```") {
            return after_fence[body_start..body_start + end].trim();
        }
    }

    // No fences: slice from the first '{' to the last '}'
    if let (Some(open), Some(close)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if open < close {
            return trimmed[open..=close].trim();
        }
    }

    trimmed
}
