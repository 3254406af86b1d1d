use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::instrument::instrumented;
use crate::domain::{Category, Coordinate, Fid, MintRecord, NewMint, Point};
use crate::port::MintStore;

const MINT_COLUMNS: &str = r"
    id, token_id, tx_hash, wallet_address, fid, username,
    x_position::text AS x_position, y_position::text AS y_position,
    category, image_url, created_at
";

#[derive(Debug, Clone)]
pub struct PgMintStore {
    pool: PgPool,
}

impl PgMintStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) fn fid_to_db(fid: Option<Fid>) -> Option<i64> {
    fid.and_then(|fid| i64::try_from(fid).ok())
}

pub(super) fn fid_from_db(fid: Option<i64>) -> Option<Fid> {
    fid.and_then(|fid| Fid::try_from(fid).ok())
}

/// Stored coordinates go through the same parsing as client input, so a
/// malformed row yields a record without a point instead of an error.
fn stored_point(x: Option<String>, y: Option<String>) -> Option<Point> {
    let parse = |raw: Option<String>| raw.and_then(|s| Coordinate::Text(s).value());
    Point::from_parts(parse(x), parse(y))
}

fn mint_from_row(row: &PgRow) -> Result<MintRecord> {
    let x: Option<String> = row.try_get("x_position")?;
    let y: Option<String> = row.try_get("y_position")?;
    let category: Option<String> = row.try_get("category")?;
    let image_url: Option<String> = row.try_get("image_url")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(MintRecord {
        id: row.try_get("id")?,
        token_id: row.try_get("token_id")?,
        tx_hash: row.try_get("tx_hash")?,
        wallet_address: row.try_get("wallet_address")?,
        fid: fid_from_db(row.try_get("fid")?),
        username: row.try_get("username")?,
        point: stored_point(x, y),
        category: Category::new(category.unwrap_or_default()),
        image_url: image_url.unwrap_or_default(),
        created_at,
    })
}

#[async_trait]
impl MintStore for PgMintStore {
    async fn ping(&self) -> Result<()> {
        instrumented("ping", sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .context("database ping failed")?;
        Ok(())
    }

    async fn upsert_mint(&self, mint: &NewMint) -> Result<i64> {
        let row = instrumented(
            "upsert_mint",
            sqlx::query(
                r"
                INSERT INTO onchain_analysis_nfts
                    (token_id, tx_hash, wallet_address, fid, username,
                     x_position, y_position, category, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (token_id) DO UPDATE SET
                    tx_hash = EXCLUDED.tx_hash,
                    wallet_address = EXCLUDED.wallet_address,
                    fid = EXCLUDED.fid,
                    username = EXCLUDED.username,
                    x_position = EXCLUDED.x_position,
                    y_position = EXCLUDED.y_position,
                    category = EXCLUDED.category,
                    image_url = EXCLUDED.image_url
                RETURNING id
                ",
            )
            .bind(mint.token_id)
            .bind(&mint.tx_hash)
            .bind(&mint.wallet_address)
            .bind(fid_to_db(mint.fid))
            .bind(&mint.username)
            .bind(mint.point.x)
            .bind(mint.point.y)
            .bind(mint.category.as_str())
            .bind(&mint.image_url)
            .fetch_one(&self.pool),
        )
        .await
        .context("failed to upsert onchain_analysis_nfts record")?;

        row.try_get("id").context("upsert returned no id")
    }

    async fn latest_token_id(&self) -> Result<i64> {
        let row = instrumented(
            "latest_token_id",
            sqlx::query(
                "SELECT COALESCE(MAX(token_id), 0)::bigint AS latest FROM onchain_analysis_nfts",
            )
            .fetch_one(&self.pool),
        )
        .await
        .context("failed to query latest token id")?;

        row.try_get("latest").context("latest token id column missing")
    }

    async fn find_by_token_id(&self, token_id: i64) -> Result<Option<MintRecord>> {
        let row = instrumented(
            "find_by_token_id",
            sqlx::query(&format!(
                "SELECT {MINT_COLUMNS} FROM onchain_analysis_nfts WHERE token_id = $1"
            ))
            .bind(token_id)
            .fetch_optional(&self.pool),
        )
        .await
        .context("failed to fetch mint by token id")?;

        row.as_ref().map(mint_from_row).transpose()
    }

    async fn latest_by_usernames(&self, usernames: &[String]) -> Result<Vec<MintRecord>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let rows = instrumented(
            "latest_by_usernames",
            sqlx::query(&format!(
                r"
                SELECT DISTINCT ON (username) {MINT_COLUMNS}
                FROM onchain_analysis_nfts
                WHERE username = ANY($1)
                ORDER BY username, created_at DESC
                "
            ))
            .bind(usernames)
            .fetch_all(&self.pool),
        )
        .await
        .context("failed to fetch latest mints by username")?;

        rows.iter().map(mint_from_row).collect()
    }
}
