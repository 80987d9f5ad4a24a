use std::collections::VecDeque;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::stream::{self, StreamExt};
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeminiConfig;
use crate::error::{RecipeError, Result};
use crate::providers::{GenerationRequest, LlmProvider};
use crate::stream::{Fragment, FragmentStream};

/// Streaming client for the Google Gemini `streamGenerateContent` endpoint.
///
/// Holds one `reqwest::Client`, so every call reuses the same connection pool.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiProvider {
    /// Create a new Gemini provider from configuration
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.api_key()?;

        Ok(GeminiProvider {
            client: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        let defaults = GeminiConfig::default();
        GeminiProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }

    fn request_body<'a>(&self, request: &'a GenerationRequest) -> GenerateContentRequest<'a> {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = &request.image {
            parts.push(RequestPart::InlineData {
                inline_data: Blob {
                    mime_type: &image.media_type,
                    data: STANDARD.encode(&image.data),
                },
            });
        }
        parts.push(RequestPart::Text {
            text: &request.prompt,
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                response_modalities: ["TEXT"],
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn stream_generate(&self, request: &GenerationRequest) -> Result<FragmentStream> {
        info!(
            "Requesting recipe from {} (image: {})",
            self.model,
            request.image.is_some()
        );
        debug!("POST {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(RecipeError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(fragment_stream(response))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 1],
    temperature: f32,
    max_output_tokens: u32,
}

/// One `data:` payload of the SSE response
#[derive(Debug, Deserialize)]
struct StreamChunk {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<u16>,
    message: Option<String>,
}

/// Pull `error.message` out of an error body, or return the body as-is
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Decode one SSE payload into fragments, one per part of the first candidate
fn parse_chunk(payload: &str) -> Result<Vec<Fragment>> {
    let chunk: StreamChunk = serde_json::from_str(payload)
        .map_err(|e| RecipeError::Stream(format!("{}: {}", e, payload)))?;

    if let Some(error) = chunk.error {
        return Err(RecipeError::Api {
            status: error.code.unwrap_or(0),
            message: error.message.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let parts = chunk
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .unwrap_or_default();

    if parts.is_empty() {
        return Ok(vec![Fragment::empty()]);
    }
    Ok(parts
        .into_iter()
        .map(|part| Fragment { text: part.text })
        .collect())
}

/// Splits a byte stream into SSE `data:` payloads.
///
/// Bytes are buffered until a full line arrives so multi-byte characters
/// split across network chunks decode correctly.
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            payloads.extend(data_payload(&line));
        }
        payloads
    }

    fn finish(self) -> Option<String> {
        data_payload(&self.buffer)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let data = line.trim().strip_prefix("data:")?.trim_start();
    if data.is_empty() || data == "[DONE]" {
        None
    } else {
        Some(data.to_string())
    }
}

struct DecodeState<S> {
    bytes: S,
    decoder: SseDecoder,
    pending: VecDeque<Result<Fragment>>,
    done: bool,
}

impl<S> DecodeState<S> {
    fn queue(&mut self, payloads: impl IntoIterator<Item = String>) {
        for payload in payloads {
            match parse_chunk(&payload) {
                Ok(fragments) => self.pending.extend(fragments.into_iter().map(Ok)),
                Err(e) => {
                    self.pending.push_back(Err(e));
                    self.done = true;
                    return;
                }
            }
        }
    }
}

/// Turn a streaming response into fragments, ending after the first error
fn fragment_stream(response: reqwest::Response) -> FragmentStream {
    let state = DecodeState {
        bytes: response.bytes_stream().boxed(),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.done {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    let payloads = state.decoder.push(&bytes);
                    state.queue(payloads);
                }
                Some(Err(e)) => {
                    state.pending.push_back(Err(RecipeError::Request(e)));
                    state.done = true;
                }
                None => {
                    let tail = std::mem::take(&mut state.decoder).finish();
                    state.done = true;
                    state.queue(tail);
                }
            }
        }
    })
    .boxed()
}
