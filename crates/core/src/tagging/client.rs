//! Typed HTTP client for an OpenAI-compatible chat completions API.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::AiSettings;

const SYSTEM_PROMPT: &str = "You label markdown documents with short topical tags. \
Reply only with JSON matching the provided schema. Tags are lowercase, one to three words, \
hyphenated instead of spaced.";

/// Produces tags for a prompt.
pub trait TagGenerator {
    fn generate(&self, prompt: &str) -> Result<Vec<String>, ClientError>;
}

impl<T: TagGenerator + ?Sized> TagGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<Vec<String>, ClientError> {
        (**self).generate(prompt)
    }
}

impl<T: TagGenerator + ?Sized> TagGenerator for Box<T> {
    fn generate(&self, prompt: &str) -> Result<Vec<String>, ClientError> {
        (**self).generate(prompt)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("AI endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI response contained no message content")]
    EmptyResponse,

    #[error("AI response did not match the tag schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

// ── API types ───────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    response_format: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Shape the model is asked to produce.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagPayload {
    tags: Vec<String>,
}

// ── Client impl ─────────────────────────────────────

pub struct OpenAiClient {
    settings: AiSettings,
    http: reqwest::blocking::Client,
}

impl OpenAiClient {
    pub fn new(settings: AiSettings) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder().build().map_err(ClientError::Build)?;
        Ok(Self { settings, http })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            response_format: tag_response_format(),
        }
    }
}

impl TagGenerator for OpenAiClient {
    fn generate(&self, prompt: &str) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint();
        debug!(%url, model = %self.settings.model, "requesting tags");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|source| ClientError::Request { url, source })?;
        parse_response(status, &body)
    }
}

/// Map a chat completions HTTP response to the tags it carries.
fn parse_response(status: u16, body: &str) -> Result<Vec<String>, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Status { status, body: body.to_string() });
    }

    let response: ChatResponse = serde_json::from_str(body).map_err(ClientError::Schema)?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(ClientError::EmptyResponse)?;

    parse_tags(&content)
}

/// `response_format` requesting strict `{ "tags": [string] }` output.
fn tag_response_format() -> serde_json::Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "document_tags",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "required": ["tags"],
                "additionalProperties": false
            }
        }
    })
}

/// Validate model output against the tag schema.
pub fn parse_tags(content: &str) -> Result<Vec<String>, ClientError> {
    let payload: TagPayload = serde_json::from_str(content.trim()).map_err(ClientError::Schema)?;
    Ok(payload.tags)
}
