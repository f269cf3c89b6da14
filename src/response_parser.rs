//! Response parsing for structured JSON test-case payloads.
//!
//! Provides robust parsing with a tiered fallback strategy to handle the
//! different shapes LLMs actually return while still failing loudly when
//! no JSON array can be recovered.

use crate::error::{GenError, GenResult};
use crate::logging::{log_debug, log_warn};

use serde_json::Value;

/// Response parser with fallback strategies.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse LLM output into a JSON array of test-case candidates.
    ///
    /// 1. Try direct JSON parse
    /// 2. Clean code-fence artifacts and retry
    /// 3. Extract balanced JSON (array or object) from mixed content
    ///
    /// A top-level object with a single array value is unwrapped: the
    /// `json_object` response mode cannot emit a top-level array, so that
    /// path wraps the list in an object like `{"test_cases": [...]}`.
    ///
    /// Fails with a clear error if no JSON array can be recovered.
    pub fn parse_llm_output(raw: &str) -> GenResult<Vec<Value>> {
        log_debug!(
            content_length = raw.len(),
            content_preview = raw.chars().take(200).collect::<String>(),
            "Parsing LLM output for test case array"
        );

        // 1. Try direct JSON parse
        if let Ok(value) = serde_json::from_str::<Value>(raw) {
            log_debug!("Successfully parsed JSON directly");
            return Self::into_array(value);
        }

        // 2. Clean known artifacts and retry
        let cleaned = Self::clean_artifacts(raw);
        if cleaned != raw {
            if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
                log_debug!("Successfully parsed JSON after artifact cleaning");
                return Self::into_array(value);
            }
        }

        // 3. Extract JSON from mixed content
        if let Some(json_str) = Self::extract_json(&cleaned) {
            log_debug!(
                extracted_length = json_str.len(),
                "Extracted JSON from mixed content"
            );

            if let Ok(value) = serde_json::from_str::<Value>(&json_str) {
                log_debug!("Successfully parsed JSON after extraction");
                return Self::into_array(value);
            }
        }

        // No fallback - must return error if parsing fails
        let preview = raw.chars().take(200).collect::<String>();
        log_warn!(
            content_preview = preview,
            "Failed to parse test case payload from LLM output"
        );

        Err(GenError::response_parsing_error(format!(
            "Could not parse JSON test case list from: {}{}",
            preview,
            if raw.len() > 200 { "..." } else { "" }
        )))
    }

    /// Reduce a parsed value to the test-case array.
    fn into_array(value: Value) -> GenResult<Vec<Value>> {
        match value {
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(GenError::response_parsing_error(
                        "Model returned an empty test case list",
                    ));
                }
                Ok(items)
            }
            Value::Object(map) => {
                // Unwrap single-key object wrappers produced by json_object mode
                let mut arrays: Vec<Vec<Value>> = map
                    .into_iter()
                    .filter_map(|(_, v)| match v {
                        Value::Array(items) => Some(items),
                        _ => None,
                    })
                    .collect();

                match (arrays.len(), arrays.pop()) {
                    (1, Some(items)) if !items.is_empty() => {
                        log_debug!(
                            item_count = items.len(),
                            "Unwrapped test case array from object wrapper"
                        );
                        Ok(items)
                    }
                    _ => Err(GenError::response_parsing_error(
                        "Response object does not wrap a single test case array",
                    )),
                }
            }
            other => Err(GenError::response_parsing_error(format!(
                "Expected a JSON array of test cases, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Clean known artifacts from LLM responses.
    fn clean_artifacts(content: &str) -> String {
        let cleaned: String = content
            .replace("```json", "")
            .replace("```JSON", "")
            .replace("```", "")
            .trim()
            .chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect();

        log_debug!(
            original_length = content.len(),
            cleaned_length = cleaned.len(),
            "Cleaned LLM response artifacts"
        );

        cleaned
    }

    /// Extract the first balanced JSON array or object from mixed content.
    fn extract_json(content: &str) -> Option<String> {
        let array_start = content.find('[');
        let object_start = content.find('{');

        let (start_idx, open, close) = match (array_start, object_start) {
            (Some(a), Some(o)) if a < o => (a, '[', ']'),
            (Some(a), None) => (a, '[', ']'),
            (_, Some(o)) => (o, '{', '}'),
            (None, None) => return None,
        };

        Self::extract_balanced(&content[start_idx..], open, close)
    }

    /// Extract balanced JSON from text, respecting string contexts.
    fn extract_balanced(text: &str, open: char, close: char) -> Option<String> {
        let mut depth = 0;
        let mut in_string = false;
        let mut escaped = false;

        for (byte_idx, ch) in text.char_indices() {
            match ch {
                '"' if !escaped => in_string = !in_string,
                '\\' if in_string => {
                    escaped = !escaped;
                    continue;
                }
                c if c == open && !in_string => depth += 1,
                c if c == close && !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(text[..=byte_idx].to_string());
                    }
                }
                _ => {}
            }
            escaped = false;
        }

        None // Unbalanced delimiters
    }
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
