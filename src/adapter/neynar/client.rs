use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::models::{BulkUsersResponse, CastsResponse, FollowingResponse, UserResponse};
use crate::domain::{Cast, Fid, FollowedUser, Page, UserProfile};
use crate::port::SocialGraph;
use crate::port::social_graph::BULK_LOOKUP_LIMIT;
use crate::util::retry::{RetryConfig, send_with_retry};

#[derive(Debug, Clone)]
pub struct NeynarClient {
    client: Client,
    base_url: Url,
    api_key: String,
    retry: RetryConfig,
}

impl NeynarClient {
    /// # Errors
    /// Fails when the HTTP client cannot be built or `base_url` is invalid.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        retry: RetryConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("failed to build neynar client")?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url).context("invalid neynar base URL")?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            retry,
        })
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to build neynar URL for {path}"))?;
        Ok(self
            .client
            .get(url)
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key))
    }
}

#[async_trait]
impl SocialGraph for NeynarClient {
    async fn user_casts(
        &self,
        fid: Fid,
        limit: u32,
        cursor: Option<&str>,
        include_replies: bool,
    ) -> Result<Page<Cast>> {
        let mut request = self.get("v2/farcaster/feed/user/casts")?.query(&[
            ("fid", fid.to_string()),
            ("limit", limit.to_string()),
            ("include_replies", include_replies.to_string()),
        ]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        debug!(fid, limit, has_cursor = cursor.is_some(), "fetching casts");
        let response = send_with_retry(&self.retry, request, "neynar casts").await?;
        let body: CastsResponse = response
            .json()
            .await
            .context("failed to deserialize neynar casts response")?;
        Ok(body.into())
    }

    async fn user(&self, fid: Fid) -> Result<Option<UserProfile>> {
        let request = self
            .get("v2/farcaster/user")?
            .query(&[("fid", fid.to_string())]);

        let response = match send_with_retry(&self.retry, request, "neynar user").await {
            Ok(response) => response,
            Err(error)
                if error
                    .downcast_ref::<reqwest::Error>()
                    .and_then(reqwest::Error::status)
                    == Some(StatusCode::NOT_FOUND) =>
            {
                return Ok(None);
            }
            Err(error) => return Err(error),
        };

        let body: UserResponse = response
            .json()
            .await
            .context("failed to deserialize neynar user response")?;
        Ok(body.user)
    }

    async fn following_page(
        &self,
        fid: Fid,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Page<FollowedUser>> {
        let mut request = self.get("v2/farcaster/following")?.query(&[
            ("fid", fid.to_string()),
            ("limit", limit.to_string()),
            ("sort_type", "desc_chron".to_string()),
        ]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = send_with_retry(&self.retry, request, "neynar following").await?;
        let body: FollowingResponse = response
            .json()
            .await
            .context("failed to deserialize neynar following response")?;
        Ok(body.into())
    }

    async fn bulk_users(&self, fids: &[Fid]) -> Result<Vec<UserProfile>> {
        if fids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = fids
            .iter()
            .take(BULK_LOOKUP_LIMIT)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let request = self
            .get("v2/farcaster/user/bulk")?
            .query(&[("fids", joined)]);

        let response = send_with_retry(&self.retry, request, "neynar bulk users").await?;
        let body: BulkUsersResponse = response
            .json()
            .await
            .context("failed to deserialize neynar bulk users response")?;
        Ok(body.users)
    }
}
