use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use crate::config::Config;
use crate::error::ClientError;
use crate::models::{ChatRequest, ChatResponse, Message, Usage};

/// One system + user exchange with the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32
}

impl CompletionRequest {

    // temperature starts at 0.0 (deterministic)
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {

        CompletionRequest {
            system: system.into(),
            user: user.into(),
            max_tokens,
            temperature: 0.0
        }

    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {

        self.temperature = temperature;
        self

    }

}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage
}

/// Something that can turn a chat request into generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {

    fn model(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ClientError>;

}

/// OpenAI-compatible chat completions over HTTPS. One attempt per call.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    url: String,
    api_key: String,
    model: String
}

impl HttpProvider {

    pub fn new(config: &Config) -> Result<Self, ClientError> {

        // the client is reused by every request
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(HttpProvider {
            client,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone()
        })

    }

}

#[async_trait]
impl CompletionProvider for HttpProvider {

    fn model(&self) -> &str {

        &self.model

    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ClientError> {

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(request.system),
                Message::user(request.user)
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature
        };

        let response = self.client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), body: text });
        }

        let completion = parse_completion(&text)?;
        debug!(model = %self.model, total_tokens = completion.usage.total_tokens, "completion received");

        Ok(completion)

    }

}

// first choice's content, or empty text when the provider sent none
pub fn parse_completion(body: &str) -> Result<Completion, ClientError> {

    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;

    let text = response.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    Ok(Completion {
        text,
        usage: response.usage.unwrap_or_default()
    })

}

#[cfg(test)]
mod tests {

    use super::*;
    use axum::{Json, Router, routing::post};
    use axum::http::{HeaderMap, StatusCode, header};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    // stands in for the provider: checks the bearer key, then echoes the
    // request body back as the completion text
    async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {

        let authorized = headers.get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()) == Some("Bearer sk-test");

        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid api key"})));
        }

        (StatusCode::OK, Json(json!({
            "choices": [{"message": {"role": "assistant", "content": body.to_string()}}],
            "usage": {"prompt_tokens": 21, "completion_tokens": 9, "total_tokens": 30}
        })))

    }

    async fn spawn_provider() -> String {

        let app = Router::new()
            .route("/ok/chat/completions", post(echo_completion))
            .route("/down/chat/completions", post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }))
            .route("/garbage/chat/completions", post(|| async { "<html>bad gateway</html>" }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)

    }

    fn provider_for(base_url: String, api_key: &str) -> HttpProvider {

        let config = Config::from_lookup(|name: &str| match name {
            "OPENAI_API_KEY" => Some(api_key.to_string()),
            "LLM_BASE_URL" => Some(base_url.clone()),
            "LLM_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None
        }).expect("config should load");

        HttpProvider::new(&config).expect("client should build")

    }

    #[tokio::test]
    async fn test_http_provider_sends_chat_request() {

        let base = spawn_provider().await;
        let provider = provider_for(format!("{}/ok", base), "sk-test");

        let request = CompletionRequest::new("be strict", "Evaluate this prompt", 500)
            .with_temperature(0.3);
        let completion = provider.complete(request).await.expect("completion should succeed");

        assert_eq!(completion.usage, Usage::new(21, 9, 30));

        let sent: Value = serde_json::from_str(&completion.text).expect("echoed body should be JSON");
        assert_eq!(sent["model"], "gpt-4o-mini");
        assert_eq!(sent["max_tokens"], 500);
        assert_eq!(sent["messages"], json!([
            {"role": "system", "content": "be strict"},
            {"role": "user", "content": "Evaluate this prompt"}
        ]));
        assert!((sent["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);

    }

    #[tokio::test]
    async fn test_http_provider_maps_rejected_key_to_status() {

        let base = spawn_provider().await;
        let provider = provider_for(format!("{}/ok", base), "sk-wrong");

        let result = provider.complete(CompletionRequest::new("s", "u", 10)).await;

        match result {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid api key"));
            }
            other => panic!("expected status error, got {:?}", other)
        }

    }

    #[tokio::test]
    async fn test_http_provider_maps_server_error_to_status() {

        let base = spawn_provider().await;
        let provider = provider_for(format!("{}/down", base), "sk-test");

        let result = provider.complete(CompletionRequest::new("s", "u", 10)).await;

        assert!(matches!(
            result,
            Err(ClientError::Status { status: 503, ref body }) if body == "overloaded"
        ));

    }

    #[tokio::test]
    async fn test_http_provider_rejects_garbage_body() {

        let base = spawn_provider().await;
        let provider = provider_for(format!("{}/garbage", base), "sk-test");

        let result = provider.complete(CompletionRequest::new("s", "u", 10)).await;

        assert!(matches!(result, Err(ClientError::Decode(_))));

    }

    #[test]
    fn test_parse_completion() {

        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let completion = parse_completion(body).expect("should parse");
        assert_eq!(completion.text, "hello");
        assert_eq!(completion.usage, Usage::new(10, 5, 15));

    }

    #[test]
    fn test_parse_completion_without_choices() {

        let completion = parse_completion(r#"{"choices": []}"#).expect("should parse");
        assert_eq!(completion.text, "");
        assert_eq!(completion.usage, Usage::default());

    }

    #[test]
    fn test_parse_completion_rejects_garbage() {

        let result = parse_completion("<html>bad gateway</html>");
        assert!(matches!(result, Err(ClientError::Decode(_))));

    }

    #[test]
    fn test_request_defaults_to_zero_temperature() {

        let request = CompletionRequest::new("sys", "user", 100);
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.with_temperature(0.7).temperature, 0.7);

    }

}
