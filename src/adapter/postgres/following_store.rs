use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::debug;

use super::instrument::instrumented;
use super::mint_store::fid_to_db;
use crate::domain::{Fid, FollowedUser, FollowingSnapshot};
use crate::port::FollowingStore;

/// A row without `following_details` counts as not cached. Entries that do
/// not decode as a followed user are dropped.
fn snapshot_from_row(
    fid: Fid,
    username: Option<String>,
    details: Option<Vec<Value>>,
) -> Option<FollowingSnapshot> {
    let entries = details?;
    let total = entries.len();
    let following: Vec<FollowedUser> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if following.len() < total {
        debug!(
            fid,
            skipped = total - following.len(),
            "dropped malformed following entries"
        );
    }

    Some(FollowingSnapshot {
        fid,
        username,
        following,
    })
}

#[derive(Debug, Clone)]
pub struct PgFollowingStore {
    pool: PgPool,
}

impl PgFollowingStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowingStore for PgFollowingStore {
    async fn find(&self, fid: Fid) -> Result<Option<FollowingSnapshot>> {
        let Some(db_fid) = fid_to_db(Some(fid)) else {
            return Ok(None);
        };

        let row = instrumented(
            "find_following",
            sqlx::query(
                r"
                SELECT username, following_details
                FROM farcaster_following
                WHERE fid = $1
                ",
            )
            .bind(db_fid)
            .fetch_optional(&self.pool),
        )
        .await
        .context("failed to fetch farcaster_following record")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let username: Option<String> = row.try_get("username")?;
        let details: Option<Json<Vec<Value>>> = row.try_get("following_details")?;

        Ok(snapshot_from_row(fid, username, details.map(|Json(entries)| entries)))
    }

    async fn upsert(&self, snapshot: &FollowingSnapshot) -> Result<()> {
        let db_fid = fid_to_db(Some(snapshot.fid)).context("fid does not fit in bigint")?;
        let count = i32::try_from(snapshot.following.len()).unwrap_or(i32::MAX);

        instrumented(
            "upsert_following",
            sqlx::query(
                r"
                INSERT INTO farcaster_following
                    (fid, username, following, following_details, following_count)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (fid) DO UPDATE SET
                    username = EXCLUDED.username,
                    following = EXCLUDED.following,
                    following_details = EXCLUDED.following_details,
                    following_count = EXCLUDED.following_count,
                    created_at = NOW()
                ",
            )
            .bind(db_fid)
            .bind(snapshot.stored_username())
            .bind(Json(snapshot.following_fids()))
            .bind(Json(&snapshot.following))
            .bind(count)
            .execute(&self.pool),
        )
        .await
        .context("failed to upsert farcaster_following record")?;

        Ok(())
    }
}
