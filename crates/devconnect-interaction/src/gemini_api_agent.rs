//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Sends single-turn `generateContent` requests and lists the models a key
//! can use. The API key is only ever placed in the request URL; it is never
//! logged.

use std::time::Duration;

use async_trait::async_trait;
use devconnect_core::agent::{GenerationError, TextGenerator};
use devconnect_core::config::{DEFAULT_BASE_URL, ModelSettings};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};

const GENERATE_CONTENT_METHOD: &str = "generateContent";
const MODEL_PREFIX: &str = "models/";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builds an agent from `[model]` settings: default model, endpoint and request timeout.
    pub fn from_settings(
        api_key: impl Into<String>,
        settings: &ModelSettings,
    ) -> Result<Self, GenerationError> {
        Self::new(api_key, settings.default_model.clone())
            .with_base_url(settings.base_url.clone())
            .with_timeout(settings.request_timeout())
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the models endpoint (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Rebuilds the HTTP client with a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, GenerationError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GenerationError::Other(format!("Failed to build HTTP client: {err}")))?;
        Ok(self)
    }

    /// Model identifier without the `models/` resource prefix.
    fn model_path(&self) -> &str {
        self.model.strip_prefix(MODEL_PREFIX).unwrap_or(&self.model)
    }

    /// Lists models that support `generateContent`, as `models/...` names.
    pub async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let url = format!(
            "{}?key={api_key}&pageSize=1000",
            self.base_url,
            api_key = self.api_key
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ListModelsResponse = response.json().await.map_err(|err| {
            GenerationError::Other(format!("Failed to parse Gemini model list: {err}"))
        })?;

        Ok(parsed
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == GENERATE_CONTENT_METHOD)
            })
            .map(|m| m.name)
            .collect())
    }

    /// Lists models and switches to the preferred one (or the first available).
    ///
    /// Returns the selected model identifier.
    pub async fn discover_model(&mut self, preferred: &str) -> Result<String, GenerationError> {
        let models = self.list_models().await?;
        let selected = select_model(&models, preferred)?;
        tracing::info!("[Gemini] Selected model {} of {}", selected, models.len());
        self.model = selected.clone();
        Ok(selected)
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, GenerationError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model_path(),
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GenerationError::Other(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::Other(
                "Gemini payload must include text".into(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            "[Gemini] generateContent model={} prompt_chars={}",
            self.model,
            prompt.len()
        );
        self.send_request(&request).await
    }
}

/// Picks `preferred` if listed, otherwise the first model.
pub fn select_model(models: &[String], preferred: &str) -> Result<String, GenerationError> {
    if models.iter().any(|m| m == preferred) {
        return Ok(preferred.to_string());
    }
    models
        .first()
        .cloned()
        .ok_or(GenerationError::NoModelAvailable)
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Joins every text part of the first candidate; Gemini may split one answer across parts.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, GenerationError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

fn map_transport_error(err: reqwest::Error) -> GenerationError {
    let is_retryable = err.is_connect() || err.is_timeout();
    GenerationError::Request {
        status_code: None,
        // Strip the URL so the key in the query string never reaches a log.
        message: format!("Gemini API request failed: {}", err.without_url()),
        is_retryable,
        retry_after: None,
    }
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GenerationError::Request {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}
