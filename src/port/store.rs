use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Fid, FollowingSnapshot, MintRecord, NewMint};

/// Persistence for minted tokens.
#[async_trait]
pub trait MintStore: Send + Sync {
    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<()>;

    /// Inserts or replaces the row for `mint.token_id`; returns the row id.
    async fn upsert_mint(&self, mint: &NewMint) -> Result<i64>;

    /// Highest recorded token id, 0 when nothing has been minted.
    async fn latest_token_id(&self) -> Result<i64>;

    async fn find_by_token_id(&self, token_id: i64) -> Result<Option<MintRecord>>;

    /// Most recent mint per username among `usernames`.
    async fn latest_by_usernames(&self, usernames: &[String]) -> Result<Vec<MintRecord>>;
}

/// Cache of who a user follows.
#[async_trait]
pub trait FollowingStore: Send + Sync {
    async fn find(&self, fid: Fid) -> Result<Option<FollowingSnapshot>>;

    /// Inserts or replaces the snapshot for `snapshot.fid`.
    async fn upsert(&self, snapshot: &FollowingSnapshot) -> Result<()>;
}
