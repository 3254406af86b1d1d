use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use super::prompt::build_prompt;
use super::schema::alignment_schema;
use crate::domain::RawClassification;
use crate::port::AlignmentClassifier;
use crate::util::retry::{RetryConfig, send_with_retry};

#[derive(Debug, Clone)]
pub struct GeminiClassifier {
    client: Client,
    base_url: Url,
    api_key: String,
    model: String,
    retry: RetryConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
    }
}

impl GeminiClassifier {
    /// # Errors
    /// Fails when the HTTP client cannot be built or `base_url` is invalid.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build gemini client")?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url).context("invalid gemini base URL")?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            model: model.into(),
            retry,
        })
    }

    fn request_body(bio: &str, casts: &[String]) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(bio, casts)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.9,
                max_output_tokens: 3072,
                response_mime_type: "application/json",
                response_schema: alignment_schema(),
            },
        }
    }
}

#[async_trait]
impl AlignmentClassifier for GeminiClassifier {
    async fn classify(&self, bio: &str, casts: &[String]) -> Result<RawClassification> {
        let url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .context("failed to build gemini generateContent URL")?;

        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(bio, casts));

        debug!(model = %self.model, casts = casts.len(), "requesting classification");
        let response = send_with_retry(&self.retry, request, "gemini generateContent").await?;
        let body: GenerateResponse = response
            .json()
            .await
            .context("failed to deserialize gemini response")?;

        let text = body
            .first_text()
            .ok_or_else(|| anyhow!("gemini response contained no candidate text"))?;

        serde_json::from_str::<RawClassification>(&text).map_err(|err| {
            error!(error = %err, response = %text, "classifier returned unparseable output");
            anyhow!(err).context(format!("failed to parse classifier output: {text}"))
        })
    }
}
