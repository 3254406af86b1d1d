use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chart::{ChartLayout, compose};
use crate::domain::{
    Category, DisplayMeta, EntityRole, Fid, FollowedUser, FollowingSnapshot, MintRecord, Point,
    PositionedEntity, UserProfile,
};
use crate::port::social_graph::BULK_LOOKUP_LIMIT;
use crate::port::{FollowingStore, MintStore, SocialGraph};

/// Accounts requested per following page.
const FOLLOWING_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum FriendsError {
    /// The following list was not cached and could not be fetched or stored.
    #[error("Could not fetch following data from Neynar API")]
    Following(#[source] anyhow::Error),

    #[error("Failed to find friends")]
    Lookup(#[source] anyhow::Error),
}

/// A followed account's most recent mint, decorated for the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendMint {
    pub id: i64,
    pub token_id: i64,
    pub tx_hash: String,
    pub wallet_address: String,
    pub username: Option<String>,
    pub fid: Option<Fid>,
    pub position: Option<Point>,
    pub category: Category,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl FriendMint {
    fn from_record(record: MintRecord, fid: Option<Fid>) -> Self {
        Self {
            id: record.id,
            token_id: record.token_id,
            tx_hash: record.tx_hash,
            wallet_address: record.wallet_address,
            username: record.username,
            fid,
            position: record.point,
            category: record.category,
            image_url: record.image_url,
            created_at: record.created_at,
            profile_picture: None,
            display_name: None,
        }
    }

    fn entity(&self) -> PositionedEntity {
        let id = self
            .username
            .clone()
            .unwrap_or_else(|| format!("token:{}", self.token_id));
        PositionedEntity::new(
            id,
            self.position,
            DisplayMeta {
                role: EntityRole::Friend,
                username: self.username.clone(),
                display_name: self.display_name.clone(),
                profile_picture: self.profile_picture.clone(),
                category: Some(self.category.as_str().to_string()),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendsReport {
    pub fid: Fid,
    pub username: Option<String>,
    pub friends_count: usize,
    pub friends: Vec<FriendMint>,
    pub chart: ChartLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FriendsOutcome {
    /// The user follows nobody with a username.
    NoFriends,
    Found(FriendsReport),
}

pub struct FriendsService {
    social: Arc<dyn SocialGraph>,
    mints: Arc<dyn MintStore>,
    following: Arc<dyn FollowingStore>,
    following_max: usize,
    pacing: Duration,
}

impl FriendsService {
    #[must_use]
    pub fn new(
        social: Arc<dyn SocialGraph>,
        mints: Arc<dyn MintStore>,
        following: Arc<dyn FollowingStore>,
        following_max: usize,
        pacing: Duration,
    ) -> Self {
        Self {
            social,
            mints,
            following,
            following_max,
            pacing,
        }
    }

    /// Charts the latest mints of the accounts `fid` follows, with the
    /// caller's own marker first when `self_point` is given.
    ///
    /// # Errors
    /// [`FriendsError::Following`] when the following list cannot be fetched
    /// or stored,
    /// [`FriendsError::Lookup`] for store failures.
    pub async fn find_friends(
        &self,
        fid: Fid,
        self_point: Option<Point>,
    ) -> Result<FriendsOutcome, FriendsError> {
        let snapshot = self.load_following(fid).await?;
        let usernames: Vec<String> = snapshot
            .following
            .iter()
            .map(|user| user.username.clone())
            .collect();
        info!(fid, following = usernames.len(), "resolved following list");

        if usernames.is_empty() {
            return Ok(FriendsOutcome::NoFriends);
        }

        let records = self
            .mints
            .latest_by_usernames(&usernames)
            .await
            .map_err(FriendsError::Lookup)?;

        let mut fids_by_username: HashMap<&str, Fid> = HashMap::new();
        for user in &snapshot.following {
            fids_by_username
                .entry(user.username.as_str())
                .or_insert(user.fid);
        }
        let mut friends: Vec<FriendMint> = records
            .into_iter()
            .map(|record| {
                let fid = record
                    .username
                    .as_deref()
                    .and_then(|name| fids_by_username.get(name).copied());
                FriendMint::from_record(record, fid)
            })
            .collect();

        let lookup: Vec<Fid> = friends.iter().filter_map(|f| f.fid).collect();
        let profiles = self.profiles_for(&lookup).await;
        for friend in &mut friends {
            let Some(profile) = friend.fid.and_then(|fid| profiles.get(&fid)) else {
                continue;
            };
            if let Some(pfp) = profile.pfp_url.clone().filter(|url| !url.is_empty()) {
                friend.profile_picture = Some(pfp);
                friend.display_name.clone_from(&profile.display_name);
            }
        }
        debug!(
            fid,
            friends = friends.len(),
            with_pictures = friends.iter().filter(|f| f.profile_picture.is_some()).count(),
            "decorated friend mints"
        );

        let username = snapshot.username.clone();
        let mut entities = Vec::with_capacity(friends.len() + 1);
        if let Some(point) = self_point {
            entities.push(PositionedEntity::new(
                "self",
                Some(point),
                DisplayMeta {
                    role: EntityRole::SelfUser,
                    username: username.clone(),
                    ..DisplayMeta::default()
                },
            ));
        }
        entities.extend(friends.iter().map(FriendMint::entity));

        Ok(FriendsOutcome::Found(FriendsReport {
            fid,
            username,
            friends_count: friends.len(),
            friends,
            chart: compose(entities),
        }))
    }

    async fn load_following(&self, fid: Fid) -> Result<FollowingSnapshot, FriendsError> {
        if let Some(snapshot) = self.following.find(fid).await.map_err(FriendsError::Lookup)? {
            debug!(fid, "using stored following list");
            return Ok(snapshot);
        }

        let username = match self.social.user(fid).await {
            Ok(user) => user.and_then(|u| u.username),
            Err(error) => {
                warn!(fid, error = %format!("{error:#}"), "user lookup failed");
                None
            }
        };

        let following = self
            .fetch_following(fid)
            .await
            .map_err(FriendsError::Following)?;
        let snapshot = FollowingSnapshot {
            fid,
            username,
            following,
        };

        if !snapshot.following.is_empty() {
            self.following
                .upsert(&snapshot)
                .await
                .map_err(FriendsError::Following)?;
            info!(fid, count = snapshot.following.len(), "stored following list");
        }
        Ok(snapshot)
    }

    async fn fetch_following(&self, fid: Fid) -> anyhow::Result<Vec<FollowedUser>> {
        let mut following = Vec::new();
        let mut cursor: Option<String> = None;

        while following.len() < self.following_max {
            let page = self
                .social
                .following_page(fid, FOLLOWING_PAGE_SIZE, cursor.as_deref())
                .await?;
            if page.items.is_empty() {
                break;
            }
            following.extend(page.items);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
            tokio::time::sleep(self.pacing).await;
        }

        following.truncate(self.following_max);
        Ok(following)
    }

    /// Best-effort bulk profile lookup; failed batches are skipped.
    async fn profiles_for(&self, fids: &[Fid]) -> HashMap<Fid, UserProfile> {
        let mut profiles = HashMap::new();
        let batches: Vec<&[Fid]> = fids.chunks(BULK_LOOKUP_LIMIT).collect();

        for (index, batch) in batches.iter().enumerate() {
            match self.social.bulk_users(batch).await {
                Ok(users) => profiles.extend(users.into_iter().map(|u| (u.fid, u))),
                Err(error) => {
                    warn!(
                        batch = index + 1,
                        size = batch.len(),
                        error = %format!("{error:#}"),
                        "profile batch failed"
                    );
                }
            }
            if index + 1 < batches.len() {
                tokio::time::sleep(self.pacing).await;
            }
        }
        profiles
    }
}
