pub mod types;
pub mod keywords;
pub mod confidence;
pub mod rules;
pub mod prompt;
pub mod sanitize;
pub mod parser;
pub mod openai;
pub mod llm;
pub mod orchestrator;

pub use types::*;
pub use keywords::*;
pub use confidence::*;
pub use rules::*;
pub use prompt::*;
pub use sanitize::*;
pub use parser::*;
pub use openai::*;
pub use llm::*;
pub use orchestrator::*;

use thiserror::Error;

/// Failures of the LLM extraction path. Always recovered by the rule engine
/// before they reach a caller of [`extract_risk_facts`].
#[derive(Error, Debug)]
pub enum StructuringError {
    #[error("LLM backend is not reachable at {0}")]
    LlmConnection(String),

    #[error("LLM backend returned error (status {status}): {body}")]
    LlmError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Unexpected value for {field}: {reason}")]
    UnexpectedShape { field: String, reason: String },
}
