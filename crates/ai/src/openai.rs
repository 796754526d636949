//! OpenAI-compatible `chat/completions` client with tool calling.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AiError;
use crate::types::{ChatCompletion, ChatMessage, ChatRequest, LlmClient, ToolCall, ToolDefinition};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest slice of an error body kept in logs and errors.
const MAX_ERROR_BODY: usize = 500;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Requests fail with [`AiError::NotConfigured`] while this is unset.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl AiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                     |
    /// |-------------------|-----------------------------|
    /// | `OPENAI_API_KEY`  | unset                       |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
    /// | `OPENAI_MODEL`    | `gpt-4o-mini`               |
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Self {
            api_key,
            base_url,
            model,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        let tool_calls = (!msg.tool_calls.is_empty()).then(|| {
            msg.tool_calls
                .iter()
                .map(|call| OpenAiToolCall {
                    id: call.id.clone(),
                    call_type: "function".to_string(),
                    function: OpenAiFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect()
        });
        Self {
            role: msg.role.as_str(),
            content: msg.content.clone(),
            tool_calls,
            tool_call_id: msg.tool_call_id.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: OpenAiFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

fn convert_tools(tools: &[ToolDefinition]) -> Vec<OpenAiTool> {
    tools
        .iter()
        .map(|tool| OpenAiTool {
            tool_type: "function",
            function: OpenAiFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        })
        .collect()
}

fn build_request(request: &ChatRequest, default_model: &str) -> OpenAiRequest {
    let has_tools = !request.tools.is_empty();
    OpenAiRequest {
        model: request
            .model
            .clone()
            .unwrap_or_else(|| default_model.to_string()),
        messages: request.messages.iter().map(OpenAiMessage::from).collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        tools: has_tools.then(|| convert_tools(&request.tools)),
        tool_choice: has_tools.then(|| "auto".to_string()),
    }
}

fn convert_tool_calls(calls: Vec<OpenAiToolCall>) -> Vec<ToolCall> {
    calls
        .into_iter()
        .map(|call| {
            let arguments = serde_json::from_str(&call.function.arguments).unwrap_or_else(|e| {
                tracing::warn!(tool = %call.function.name, error = %e, "Undecodable tool arguments");
                Value::Null
            });
            ToolCall {
                id: call.id,
                name: call.function.name,
                arguments,
            }
        })
        .collect()
}

fn parse_completion(body: &str) -> Result<ChatCompletion, AiError> {
    let response: OpenAiResponse =
        serde_json::from_str(body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiError::InvalidResponse("response has no choices".into()))?;

    Ok(ChatCompletion {
        content: choice.message.content,
        tool_calls: convert_tool_calls(choice.message.tool_calls.unwrap_or_default()),
        model: response.model,
        finish_reason: choice.finish_reason,
    })
}

fn parse_error(status: u16, body: &str) -> AiError {
    let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
        Ok(err) => err.error.message,
        Err(_) => body.chars().take(MAX_ERROR_BODY).collect(),
    };
    AiError::HttpStatus { status, message }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OpenAiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl OpenAiClient {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, AiError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(AiError::NotConfigured);
        };

        let body = build_request(request, &self.config.model);
        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            tools = request.tools.len(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let err = parse_error(status.as_u16(), &text);
            tracing::error!(status = status.as_u16(), error = %err, "Chat completion failed");
            return Err(err);
        }

        let completion = parse_completion(&text)?;
        tracing::debug!(
            model = %completion.model,
            tool_calls = completion.tool_calls.len(),
            finish_reason = ?completion.finish_reason,
            "Chat completion received"
        );
        Ok(completion)
    }
}
