use anyhow::{Context, Result};
use reqwest::Url;
use serde::Serialize;

use crate::domain::{Category, Point};

const COMPOSE_URL: &str = "https://warpcast.com/~/compose";

/// Prefilled post announcing a chart position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareIntent {
    pub text: String,
    pub intent_url: String,
}

#[must_use]
pub fn share_text(category: &Category, point: Point) -> String {
    format!(
        "I'm a {} ({:.1}, {:.1}) on the Onchain Alignment Chart! Check out your position:",
        category.name(),
        point.x,
        point.y
    )
}

/// Builds the compose link embedding `image_url`.
///
/// # Errors
/// Fails only if the compose URL cannot be assembled.
pub fn share_intent(category: &Category, point: Point, image_url: &str) -> Result<ShareIntent> {
    let text = share_text(category, point);
    let url = Url::parse_with_params(
        COMPOSE_URL,
        &[("text", text.as_str()), ("embeds[]", image_url)],
    )
    .context("failed to build share intent URL")?;

    Ok(ShareIntent {
        text,
        intent_url: url.into(),
    })
}
