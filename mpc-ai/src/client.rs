//! OpenAI chat-completions client (JSON mode)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::AiError;
use crate::prompts::SYSTEM_PROMPT;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub struct ChatClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ChatClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let api_key = api_key.into();
        if !mpc_common::config::is_valid_key(&api_key) {
            return Err(AiError::NotConfigured);
        }
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send one prompt and return the model's JSON object
    pub async fn complete_json(&self, prompt: &str) -> Result<Value, AiError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.7,
        };

        debug!(url = %url, model = %self.model, "Calling chat completions");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::InvalidResponse("No message content".to_string()))?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| AiError::InvalidResponse(format!("Content is not JSON: {}", e)))?;
        if !value.is_object() {
            return Err(AiError::InvalidResponse("Content is not a JSON object".to_string()));
        }
        Ok(value)
    }
}
