use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::chart::calibrate;
use crate::domain::{Cast, ClassificationResult, Fid, UserInfo};
use crate::port::{AlignmentClassifier, SocialGraph};

/// Casts requested per page when the caller gives no limit.
pub const DEFAULT_CAST_LIMIT: u32 = 150;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub fid: Option<Fid>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub include_replies: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NextPage {
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub casts: Vec<Cast>,
    pub cast_count: usize,
    pub user_info: UserInfo,
    pub analysis: ClassificationResult,
    pub next: NextPage,
}

pub struct AnalysisService {
    social: Arc<dyn SocialGraph>,
    classifier: Arc<dyn AlignmentClassifier>,
    default_fid: Fid,
}

impl AnalysisService {
    #[must_use]
    pub fn new(
        social: Arc<dyn SocialGraph>,
        classifier: Arc<dyn AlignmentClassifier>,
        default_fid: Fid,
    ) -> Self {
        Self {
            social,
            classifier,
            default_fid,
        }
    }

    /// Fetches up to two pages of the user's casts, classifies them and
    /// calibrates the result onto the chart.
    ///
    /// # Errors
    /// Any social graph or classifier failure.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<ProfileAnalysis> {
        let fid = request.fid.unwrap_or(self.default_fid);
        let limit = request.limit.unwrap_or(DEFAULT_CAST_LIMIT);

        let first = self
            .social
            .user_casts(fid, limit, request.cursor.as_deref(), request.include_replies)
            .await
            .context("failed to fetch casts")?;
        let mut casts = first.items;
        let mut next_cursor = first.next_cursor;

        if let Some(cursor) = next_cursor.take() {
            let second = self
                .social
                .user_casts(fid, limit, Some(&cursor), request.include_replies)
                .await
                .context("failed to fetch second page of casts")?;
            casts.extend(second.items);
            next_cursor = second.next_cursor;
        }

        let user_info = UserInfo::from_author(fid, casts.first().and_then(|c| c.author.as_ref()));
        let texts: Vec<String> = casts
            .iter()
            .filter_map(|cast| cast.text.as_deref())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_owned)
            .collect();

        info!(fid, casts = casts.len(), texts = texts.len(), "classifying profile");
        let raw = self
            .classifier
            .classify(&user_info.bio, &texts)
            .await
            .context("classification failed")?;

        Ok(ProfileAnalysis {
            cast_count: texts.len(),
            casts,
            user_info,
            analysis: calibrate(raw),
            next: NextPage {
                cursor: next_cursor,
            },
        })
    }
}
