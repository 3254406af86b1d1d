use anyhow::Result;
use async_trait::async_trait;

use crate::domain::MintImageRequest;

/// Renders and stores a token card, returning its public URL.
#[async_trait]
pub trait MintImageSource: Send + Sync {
    async fn render(&self, request: &MintImageRequest) -> Result<String>;
}
