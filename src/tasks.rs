use tracing::{info, warn};
use crate::client::{CompletionProvider, CompletionRequest};
use crate::error::TaskError;
use crate::extract::extract_last_json_object;
use crate::models::{AnalysisResult, RewriteResult, Usage};
use crate::prompts;

const ANALYZE_MAX_TOKENS: u32 = 500;
const REWRITE_MAX_TOKENS: u32 = 400;
const REFINE_MAX_TOKENS: u32 = 500;

const REWRITE_TEMPERATURE: f32 = 0.7;
const REFINE_TEMPERATURE: f32 = 0.3;

pub const UNPARSED_ANALYSIS: &str = "model did not return a valid JSON object";

/// Trims the inbound prompt and rejects it when nothing is left.
pub fn validate_prompt(prompt: Option<String>) -> Result<String, TaskError> {

    let prompt = prompt.unwrap_or_default();
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return Err(TaskError::EmptyPrompt);
    }

    Ok(trimmed.to_string())

}

/// Scores the prompt. A reply without a parseable JSON object is not an
/// error: it comes back as [`AnalysisResult::Unparsed`] so the usage is kept.
pub async fn analyze(
    provider: &dyn CompletionProvider,
    prompt: &str
) -> Result<(AnalysisResult, Usage), TaskError> {

    let request = CompletionRequest::new(
        prompts::ANALYZE_SYSTEM,
        prompts::analyze_user(prompt),
        ANALYZE_MAX_TOKENS
    );

    let completion = provider.complete(request).await?;

    let result = match extract_last_json_object(&completion.text) {
        Some(value) => AnalysisResult::Parsed(value),
        None => {
            warn!(chars = completion.text.len(), "analysis reply had no JSON object");
            AnalysisResult::Unparsed {
                error: UNPARSED_ANALYSIS.to_string(),
                raw: completion.text
            }
        }
    };

    Ok((result, completion.usage))

}

/// Two independent rewrites, depth-biased then breadth-biased.
pub async fn rewrite(
    provider: &dyn CompletionProvider,
    prompt: &str
) -> Result<(RewriteResult, Usage), TaskError> {

    let depth = provider.complete(
        CompletionRequest::new(prompts::REWRITE_DEPTH_SYSTEM, prompts::rewrite_user(prompt), REWRITE_MAX_TOKENS)
            .with_temperature(REWRITE_TEMPERATURE)
    ).await?;

    let breadth = provider.complete(
        CompletionRequest::new(prompts::REWRITE_BREADTH_SYSTEM, prompts::rewrite_user(prompt), REWRITE_MAX_TOKENS)
            .with_temperature(REWRITE_TEMPERATURE)
    ).await?;

    let usage: Usage = [depth.usage, breadth.usage].into_iter().sum();
    info!(total_tokens = usage.total_tokens, "rewrite done");

    let result = RewriteResult {
        depth_oriented: depth.text.trim().to_string(),
        breadth_oriented: breadth.text.trim().to_string()
    };

    Ok((result, usage))

}

/// Single improved prompt, returned as free text.
pub async fn refine(
    provider: &dyn CompletionProvider,
    prompt: &str
) -> Result<(String, Usage), TaskError> {

    let request = CompletionRequest::new(
        prompts::REFINE_SYSTEM,
        prompts::refine_user(prompt),
        REFINE_MAX_TOKENS
    ).with_temperature(REFINE_TEMPERATURE);

    let completion = provider.complete(request).await?;

    Ok((completion.text.trim().to_string(), completion.usage))

}
