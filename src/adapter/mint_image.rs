use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::MintImageRequest;
use crate::port::MintImageSource;
use crate::util::retry::{RetryConfig, send_with_retry};

/// Client for the external service that renders and uploads token cards.
#[derive(Debug, Clone)]
pub struct HttpMintImageSource {
    client: Client,
    base_url: Url,
    retry: RetryConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedImage {
    #[serde(default)]
    image_url: Option<String>,
}

impl HttpMintImageSource {
    /// # Errors
    /// Fails when the HTTP client cannot be built or `base_url` is invalid.
    pub fn new(base_url: impl Into<String>, retry: RetryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build mint image client")?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url).context("invalid mint image service URL")?;

        Ok(Self {
            client,
            base_url,
            retry,
        })
    }
}

#[async_trait]
impl MintImageSource for HttpMintImageSource {
    async fn render(&self, request: &MintImageRequest) -> Result<String> {
        let url = self
            .base_url
            .join("api/generate-mint-image")
            .context("failed to build mint image URL")?;

        let response = send_with_retry(
            &self.retry,
            self.client.post(url).json(request),
            "mint image",
        )
        .await?;
        let body: GeneratedImage = response
            .json()
            .await
            .context("failed to deserialize mint image response")?;

        body.image_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!("mint image service returned no imageUrl"))
    }
}
