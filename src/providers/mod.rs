//! Provider implementations for test-case generation.
//!
//! Two backends, differing in how the output shape is enforced:
//! - `openai` conveys the shape via prompt instruction plus the generic
//!   `json_object` response-format flag (advisory).
//! - `gemini` attaches a declarative response schema the API enforces
//!   server-side.

pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
