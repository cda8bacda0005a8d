use std::iter::Sum;
use std::ops::{Add, AddAssign};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String
}

impl Message {

    pub fn system(content: impl Into<String>) -> Self {

        Message { role: Role::System, content: content.into() }

    }

    pub fn user(content: impl Into<String>) -> Self {

        Message { role: Role::User, content: content.into() }

    }

}

// body sent to the OpenAI-compatible chat completions endpoint
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ReplyMessage
}

// providers may send `content: null` (e.g. when the budget runs out)
#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub content: Option<String>
}

/// Token counters reported by the provider. Missing fields count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64
}

impl Usage {

    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {

        Usage { prompt_tokens, completion_tokens, total_tokens }

    }

}

impl Add for Usage {

    type Output = Usage;

    // counters come from the provider, so clamp instead of overflowing
    fn add(self, other: Usage) -> Usage {

        Usage {
            prompt_tokens: self.prompt_tokens.saturating_add(other.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(other.completion_tokens),
            total_tokens: self.total_tokens.saturating_add(other.total_tokens)
        }

    }

}

impl AddAssign for Usage {

    fn add_assign(&mut self, other: Usage) {

        *self = *self + other;

    }

}

impl Sum for Usage {

    fn sum<I: Iterator<Item = Usage>>(iter: I) -> Usage {

        iter.fold(Usage::default(), Add::add)

    }

}

// inbound body for all three task endpoints, a missing prompt is
// handled the same as an empty one
#[derive(Debug, Default, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>
}

/// Outcome of the analyze task. The parsed variant carries whatever JSON
/// object the model produced; no schema is enforced on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Parsed(Value),
    Unparsed {
        error: String,
        raw: String
    }
}

impl AnalysisResult {

    pub fn is_parsed(&self) -> bool {

        matches!(self, AnalysisResult::Parsed(_))

    }

}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteResult {
    pub depth_oriented: String,
    pub breadth_oriented: String
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
    pub usage: Usage
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub result: RewriteResult,
    pub usage: Usage
}

#[derive(Debug, Serialize)]
pub struct RefineResponse {
    pub final_prompt: String,
    pub usage: Usage
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String
}
