use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{Category, Coordinate, Fid, MintImageRequest, NewMint, Point, TokenMetadata};
use crate::error::ApiError;
use crate::port::{MintImageSource, MintStore};

#[derive(Debug, Error)]
pub enum MintError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Invalid token ID")]
    InvalidTokenId,

    #[error("Token not found")]
    TokenNotFound,

    #[error("Mint image service is not configured")]
    ImagesUnavailable,

    #[error("Failed to save mint data")]
    Save(#[source] anyhow::Error),

    #[error("Failed to fetch latest token ID")]
    Latest(#[source] anyhow::Error),

    #[error("Failed to fetch token metadata")]
    Metadata(#[source] anyhow::Error),
}

impl From<MintError> for ApiError {
    fn from(error: MintError) -> Self {
        match error {
            MintError::MissingParameters | MintError::InvalidTokenId => {
                Self::BadRequest(error.to_string())
            }
            MintError::TokenNotFound => Self::NotFound(error.to_string()),
            MintError::ImagesUnavailable => Self::Unavailable(error.to_string()),
            MintError::Save(source) => Self::upstream("Failed to save mint data", source),
            MintError::Latest(source) => Self::upstream("Failed to fetch latest token ID", source),
            MintError::Metadata(source) => Self::upstream("Failed to fetch token metadata", source),
        }
    }
}

/// Body of a save-mint call. Numeric fields may arrive as numbers or strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMintRequest {
    #[serde(default)]
    pub token_id: Option<Coordinate>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub x: Option<Coordinate>,
    #[serde(default)]
    pub y: Option<Coordinate>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub fid: Option<Coordinate>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMint {
    pub success: bool,
    pub id: i64,
    pub token_id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestToken {
    pub latest_token_id: i64,
    pub next_token_id: i64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whole, non-negative numbers only.
#[allow(clippy::cast_possible_truncation)]
fn whole_number(value: Option<&Coordinate>) -> Option<i64> {
    value
        .and_then(Coordinate::value)
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= i64::MAX as f64)
        .map(|v| v as i64)
}

pub struct MintService {
    store: Arc<dyn MintStore>,
    images: Option<Arc<dyn MintImageSource>>,
}

impl MintService {
    #[must_use]
    pub fn new(store: Arc<dyn MintStore>, images: Option<Arc<dyn MintImageSource>>) -> Self {
        Self { store, images }
    }

    /// Validates and records a mint, rendering its card when the caller did
    /// not supply an image URL. Saving the same token id twice replaces the
    /// row.
    ///
    /// # Errors
    /// See [`MintError`].
    pub async fn save_mint(&self, request: SaveMintRequest) -> Result<SavedMint, MintError> {
        let token_id = whole_number(request.token_id.as_ref()).ok_or(MintError::MissingParameters)?;
        let tx_hash = non_blank(request.tx_hash).ok_or(MintError::MissingParameters)?;
        let wallet_address = non_blank(request.wallet_address).ok_or(MintError::MissingParameters)?;
        let category = non_blank(request.category)
            .map(Category::new)
            .ok_or(MintError::MissingParameters)?;
        let point = Point::from_parts(
            request.x.as_ref().and_then(Coordinate::value),
            request.y.as_ref().and_then(Coordinate::value),
        )
        .ok_or(MintError::MissingParameters)?;
        let fid = whole_number(request.fid.as_ref()).and_then(|fid| Fid::try_from(fid).ok());
        let username = non_blank(request.username);

        let image_url = match non_blank(request.image_url) {
            Some(url) => url,
            None => {
                let images = self.images.as_ref().ok_or(MintError::ImagesUnavailable)?;
                images
                    .render(&MintImageRequest {
                        x: point.x,
                        y: point.y,
                        category: category.clone(),
                        profile_picture: non_blank(request.profile_picture),
                        username: username.clone().unwrap_or_else(|| "Anonymous".to_string()),
                    })
                    .await
                    .map_err(MintError::Save)?
            }
        };

        let mint = NewMint {
            token_id,
            tx_hash,
            wallet_address,
            fid,
            username,
            point,
            category,
            image_url,
        };
        let id = self.store.upsert_mint(&mint).await.map_err(MintError::Save)?;
        info!(token_id, id, "recorded mint");

        Ok(SavedMint {
            success: true,
            id,
            token_id,
            image_url: mint.image_url,
        })
    }

    /// # Errors
    /// [`MintError::Latest`] when the store fails.
    pub async fn latest_token_id(&self) -> Result<LatestToken, MintError> {
        let latest = self.store.latest_token_id().await.map_err(MintError::Latest)?;
        Ok(LatestToken {
            latest_token_id: latest,
            next_token_id: latest.saturating_add(1),
        })
    }

    /// # Errors
    /// [`MintError::InvalidTokenId`] for non-numeric ids,
    /// [`MintError::TokenNotFound`] for unknown ones.
    pub async fn token_metadata(&self, raw_token_id: &str) -> Result<TokenMetadata, MintError> {
        let token_id: i64 = raw_token_id
            .trim()
            .parse()
            .map_err(|_| MintError::InvalidTokenId)?;
        let record = self
            .store
            .find_by_token_id(token_id)
            .await
            .map_err(MintError::Metadata)?
            .ok_or(MintError::TokenNotFound)?;
        Ok(TokenMetadata::from_record(&record))
    }
}
