use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Cast, Fid, FollowedUser, Page, UserProfile};

/// Upper bound on fids per bulk profile lookup.
pub const BULK_LOOKUP_LIMIT: usize = 100;

/// Read access to the social graph.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// One page of a user's own posts, newest first.
    async fn user_casts(
        &self,
        fid: Fid,
        limit: u32,
        cursor: Option<&str>,
        include_replies: bool,
    ) -> Result<Page<Cast>>;

    /// Profile of a single user; `None` when the API knows no such user.
    async fn user(&self, fid: Fid) -> Result<Option<UserProfile>>;

    /// One page of the accounts `fid` follows.
    async fn following_page(
        &self,
        fid: Fid,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Page<FollowedUser>>;

    /// Profiles for up to [`BULK_LOOKUP_LIMIT`] fids.
    async fn bulk_users(&self, fids: &[Fid]) -> Result<Vec<UserProfile>>;
}
