use anyhow::Result;
use async_trait::async_trait;

use crate::domain::RawClassification;

/// Places a user on the chart from their bio and posts.
#[async_trait]
pub trait AlignmentClassifier: Send + Sync {
    async fn classify(&self, bio: &str, casts: &[String]) -> Result<RawClassification>;
}
