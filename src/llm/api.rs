use std::time::Duration;

use async_stream::try_stream;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{ExplainError, Result};
use crate::response::{GenerationChunk, GenerationMessage, GenerationStream};

/// Client for an OpenAI-compatible chat completions endpoint.
///
/// Hand-rolled rather than SDK-backed because the backend's
/// `reasoning_content` field (message and delta level) is not part of the
/// standard response shape.
#[derive(Clone, Debug)]
pub struct ChatApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: MessageBody,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    content: Option<String>,
    reasoning_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Deserialize, Default)]
struct StreamDelta {
    content: Option<String>,
    reasoning_content: Option<String>,
}

impl ChatApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ExplainError::Generation(format!("Failed to create LLM HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// One blocking completion call. Content is captured eagerly; a
    /// choice-less or empty response is a generation failure.
    pub async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<GenerationMessage> {
        let response = self.send(model, prompt, temperature, false).await?;

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ExplainError::Generation(format!("Failed to parse LLM response: {e}"))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            ExplainError::Generation("LLM response contained no choices".to_string())
        })?;

        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ExplainError::Generation(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(GenerationMessage {
            content,
            reasoning_content: choice
                .message
                .reasoning_content
                .filter(|r| !r.is_empty()),
        })
    }

    /// Streaming completion. Returns the lazy SSE-parsed chunk sequence;
    /// deltas carrying neither content nor reasoning are dropped, and a
    /// `data: [DONE]` line ends the stream.
    pub async fn complete_stream(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<GenerationStream> {
        let response = self.send(model, prompt, temperature, true).await?;
        let mut body = response.bytes_stream();

        let stream = try_stream! {
            let mut buf = String::new();

            'transport: while let Some(chunk) = body.next().await {
                let bytes = chunk.map_err(|e| {
                    ExplainError::Generation(format!("Stream transport failed: {e}"))
                })?;
                buf.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(pos) = buf.find('\n') {
                    let line: String = buf.drain(..=pos).collect();
                    let Some(data) = line.trim().strip_prefix("data:") else {
                        continue;
                    };
                    let data = data.trim();
                    if data == "[DONE]" {
                        break 'transport;
                    }

                    let parsed: StreamResponse = serde_json::from_str(data).map_err(|e| {
                        ExplainError::Generation(format!("Malformed stream payload: {e}"))
                    })?;
                    let Some(choice) = parsed.choices.into_iter().next() else {
                        continue;
                    };

                    let delta = GenerationChunk {
                        content: choice.delta.content.filter(|s| !s.is_empty()),
                        reasoning_content: choice
                            .delta
                            .reasoning_content
                            .filter(|s| !s.is_empty()),
                    };
                    if delta.content.is_some() || delta.reasoning_content.is_some() {
                        yield delta;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn send(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f32>,
        stream: bool,
    ) -> Result<reqwest::Response> {
        let request = ChatRequest {
            model,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
            stream,
            temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(ref api_key) = self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExplainError::Generation(format!("LLM request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExplainError::Generation(format!(
                "LLM authentication failed: {status}"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Generation(format!(
                "LLM backend returned {status}: {body}"
            )));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing_with_reasoning() {
        let body = serde_json::json!({
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "你好",
                    "reasoning_content": "> because"
                }
            }]
        });

        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        let message = &parsed.choices[0].message;
        assert_eq!(message.content.as_deref(), Some("你好"));
        assert_eq!(message.reasoning_content.as_deref(), Some("> because"));
    }

    #[test]
    fn test_response_parsing_without_reasoning() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "好"}}]
        });

        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.choices[0].message.reasoning_content.is_none());
    }

    #[test]
    fn test_stream_delta_parsing() {
        let body = serde_json::json!({
            "choices": [{"delta": {"reasoning_content": "> step"}}]
        });

        let parsed: StreamResponse = serde_json::from_value(body).unwrap();
        let delta = &parsed.choices[0].delta;
        assert!(delta.content.is_none());
        assert_eq!(delta.reasoning_content.as_deref(), Some("> step"));
    }

    #[test]
    fn test_request_serialization_omits_absent_temperature() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![RequestMessage {
                role: "user",
                content: "explain 好",
            }],
            stream: false,
            temperature: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
