//! Prompt construction for test-case generation.
//!
//! The system instruction is fixed; only the user requirement varies per
//! call. Providers without server-enforced structured output additionally
//! get a key-by-key format instruction appended to the user prompt.

/// Fixed system instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You are an experienced QA Test Engineer specializing in digital health applications. \
     Your task is to analyze the provided user requirement and generate a comprehensive \
     list of functional and negative test cases. The output MUST be a valid JSON list \
     of objects, and should include at least one negative test case.";

/// Shape instruction for the advisory path.
///
/// Providers that cannot enforce the array-of-objects shape server-side
/// get the shape spelled out in the prompt instead.
pub const JSON_FORMAT_INSTRUCTION: &str = "Output the result as a single JSON list of objects. Each test case object \
     must have the following keys: 'id', 'type' (e.g., 'Functional' or 'Negative'), \
     'description', 'steps' (a list of strings), and 'expected_result'.";

/// Build the user prompt embedding the requirement.
///
/// `include_format_instruction` is true for providers that convey the
/// output shape via prompt text only.
pub fn user_prompt(requirement: &str, include_format_instruction: bool) -> String {
    if include_format_instruction {
        format!("User Requirement: '{requirement}'\n\n{JSON_FORMAT_INSTRUCTION}")
    } else {
        format!("Generate test cases for the following user requirement: {requirement}")
    }
}
