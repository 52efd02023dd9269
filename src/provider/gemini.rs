//! Gemini client against the Generative Language API.
//!
//! The core call uses `generateContent` with a JSON response schema so the
//! provider returns the file-record array directly. Supplementary tasks use
//! `streamGenerateContent?alt=sse`; each SSE `data:` line carries one
//! response delta whose text becomes one fragment.

use crate::aggregate::FragmentStream;
use crate::error::{GenerationError, StreamError};
use crate::provider::profile::ProviderConfig;
use crate::provider::prompt;
use crate::provider::ModelProviderClient;
use crate::types::{FileRecord, TaskKind};
use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, GenerationError> {
        let api_key = config.resolved_api_key()?;
        let base_url = config
            .normalized_endpoint()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            http: reqwest::Client::new(),
            model: config.model.clone(),
            api_key,
            base_url,
        })
    }

    fn model_url(&self, verb: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, verb)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated text of the first candidate's parts.
fn response_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ModelProviderClient for GeminiClient {
    async fn generate_project_files(
        &self,
        prompt_text: &str,
        framework: &str,
        include_backend: bool,
    ) -> Result<Vec<FileRecord>, GenerationError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt_text }] }],
            "systemInstruction": {
                "parts": [{ "text": prompt::core_system_instruction(framework, include_backend) }]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "filePath": { "type": "STRING" },
                            "content": { "type": "STRING" }
                        },
                        "required": ["filePath", "content"]
                    }
                }
            }
        });

        let response = self
            .http
            .post(self.model_url("generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;
        let text = response_text(&parsed);

        let records: Vec<FileRecord> = serde_json::from_str(&text).map_err(|e| {
            GenerationError::MalformedPayload(format!("expected file-record array: {}", e))
        })?;
        debug!(files = records.len(), "Core generation returned file set");
        Ok(records)
    }

    fn generate_text_stream(&self, task: TaskKind, context: &str) -> FragmentStream {
        let http = self.http.clone();
        let url = format!("{}?alt=sse", self.model_url("streamGenerateContent"));
        let api_key = self.api_key.clone();
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt::task_prompt(task, context) }] }]
        });

        let (sender, receiver) = mpsc::unbounded_channel::<Result<String, StreamError>>();
        tokio::spawn(async move {
            if let Err(err) = stream_fragments(http, url, api_key, body, task, &sender).await {
                let _ = sender.send(Err(err));
            }
        });

        Box::pin(futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|item| (item, receiver))
        }))
    }
}

async fn stream_fragments(
    http: reqwest::Client,
    url: String,
    api_key: String,
    body: serde_json::Value,
    task: TaskKind,
    sender: &mpsc::UnboundedSender<Result<String, StreamError>>,
) -> Result<(), StreamError> {
    let response = http
        .post(&url)
        .header("x-goog-api-key", &api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| StreamError::OpenFailed {
            task,
            message: e.to_string(),
        })?
        .error_for_status()
        .map_err(|e| StreamError::OpenFailed {
            task,
            message: e.to_string(),
        })?;

    let mut bytes = response.bytes_stream();
    let mut buffer = String::new();
    while let Some(chunk) = bytes.next().await {
        let chunk = chunk.map_err(|e| StreamError::Interrupted {
            task,
            message: e.to_string(),
        })?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline) = buffer.find('\n') {
            let line = buffer[..newline].trim_end_matches('\r').to_string();
            buffer.drain(..=newline);
            if let Some(payload) = line.strip_prefix("data: ") {
                if let Ok(parsed) = serde_json::from_str::<GenerateContentResponse>(payload) {
                    let text = response_text(&parsed);
                    if !text.is_empty() {
                        let _ = sender.send(Ok(text));
                    }
                }
            }
        }
    }
    debug!(task = %task, "SSE stream closed");
    Ok(())
}
