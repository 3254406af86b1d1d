//! In-memory port implementations shared by unit and integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Cast, Fid, FollowedUser, FollowingSnapshot, MintImageRequest, MintRecord, NewMint, Page,
    RawClassification, UserProfile,
};
use crate::port::{AlignmentClassifier, FollowingStore, MintImageSource, MintStore, SocialGraph};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Social graph serving queued pages. Exhausted queues yield empty pages.
#[derive(Default)]
pub struct MockSocialGraph {
    cast_pages: Mutex<VecDeque<Page<Cast>>>,
    cast_requests: Mutex<Vec<(Fid, Option<String>)>>,
    users: HashMap<Fid, UserProfile>,
    following_pages: Mutex<VecDeque<Page<FollowedUser>>>,
    fail_following: bool,
    profiles: HashMap<Fid, UserProfile>,
}

impl MockSocialGraph {
    #[must_use]
    pub fn with_casts_page(self, casts: Vec<Cast>, next: Option<&str>) -> Self {
        lock(&self.cast_pages).push_back(Page {
            items: casts,
            next_cursor: next.map(str::to_owned),
        });
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.users.insert(user.fid, user);
        self
    }

    #[must_use]
    pub fn with_following_page(self, users: Vec<FollowedUser>, next: Option<&str>) -> Self {
        lock(&self.following_pages).push_back(Page {
            items: users,
            next_cursor: next.map(str::to_owned),
        });
        self
    }

    #[must_use]
    pub fn failing_following(mut self) -> Self {
        self.fail_following = true;
        self
    }

    /// Profiles returned by bulk lookups.
    #[must_use]
    pub fn with_profiles(mut self, profiles: Vec<UserProfile>) -> Self {
        self.profiles
            .extend(profiles.into_iter().map(|profile| (profile.fid, profile)));
        self
    }

    /// `(fid, cursor)` of every casts request, in order.
    pub fn cast_requests(&self) -> Vec<(Fid, Option<String>)> {
        lock(&self.cast_requests).clone()
    }
}

#[async_trait]
impl SocialGraph for MockSocialGraph {
    async fn user_casts(
        &self,
        fid: Fid,
        _limit: u32,
        cursor: Option<&str>,
        _include_replies: bool,
    ) -> Result<Page<Cast>> {
        lock(&self.cast_requests).push((fid, cursor.map(str::to_owned)));
        Ok(lock(&self.cast_pages).pop_front().unwrap_or_default())
    }

    async fn user(&self, fid: Fid) -> Result<Option<UserProfile>> {
        Ok(self.users.get(&fid).cloned())
    }

    async fn following_page(
        &self,
        _fid: Fid,
        _limit: u32,
        _cursor: Option<&str>,
    ) -> Result<Page<FollowedUser>> {
        if self.fail_following {
            bail!("social graph unavailable");
        }
        Ok(lock(&self.following_pages).pop_front().unwrap_or_default())
    }

    async fn bulk_users(&self, fids: &[Fid]) -> Result<Vec<UserProfile>> {
        Ok(fids
            .iter()
            .filter_map(|fid| self.profiles.get(fid).cloned())
            .collect())
    }
}

/// Classifier returning a canned answer and recording what it was shown.
pub struct MockClassifier {
    answer: Result<RawClassification, String>,
    seen: Mutex<Vec<String>>,
}

impl MockClassifier {
    #[must_use]
    pub fn returning(raw: RawClassification) -> Self {
        Self {
            answer: Ok(raw),
            seen: Mutex::default(),
        }
    }

    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            seen: Mutex::default(),
        }
    }

    pub fn seen_casts(&self) -> Vec<String> {
        lock(&self.seen).clone()
    }
}

#[async_trait]
impl AlignmentClassifier for MockClassifier {
    async fn classify(&self, _bio: &str, casts: &[String]) -> Result<RawClassification> {
        lock(&self.seen).extend_from_slice(casts);
        self.answer.clone().map_err(|message| anyhow!(message))
    }
}

/// Mint store keyed by token id.
#[derive(Default)]
pub struct InMemoryMintStore {
    records: Mutex<Vec<MintRecord>>,
    next_id: AtomicI64,
    should_fail: AtomicBool,
}

impl InMemoryMintStore {
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn insert(&self, record: MintRecord) {
        lock(&self.records).push(record);
    }

    pub fn get(&self, token_id: i64) -> Option<MintRecord> {
        lock(&self.records)
            .iter()
            .find(|r| r.token_id == token_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            bail!("mint store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl MintStore for InMemoryMintStore {
    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn upsert_mint(&self, mint: &NewMint) -> Result<i64> {
        self.check()?;
        let mut records = lock(&self.records);
        let existing = records.iter_mut().find(|r| r.token_id == mint.token_id);
        let id = existing
            .as_ref()
            .map_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst) + 1, |r| r.id);
        let created_at = existing.as_ref().map_or_else(Utc::now, |r| r.created_at);
        let record = MintRecord {
            id,
            token_id: mint.token_id,
            tx_hash: mint.tx_hash.clone(),
            wallet_address: mint.wallet_address.clone(),
            fid: mint.fid,
            username: mint.username.clone(),
            point: Some(mint.point),
            category: mint.category.clone(),
            image_url: mint.image_url.clone(),
            created_at,
        };
        match existing {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        Ok(id)
    }

    async fn latest_token_id(&self) -> Result<i64> {
        self.check()?;
        Ok(lock(&self.records)
            .iter()
            .map(|r| r.token_id)
            .max()
            .unwrap_or(0))
    }

    async fn find_by_token_id(&self, token_id: i64) -> Result<Option<MintRecord>> {
        self.check()?;
        Ok(self.get(token_id))
    }

    async fn latest_by_usernames(&self, usernames: &[String]) -> Result<Vec<MintRecord>> {
        self.check()?;
        let mut latest: HashMap<String, MintRecord> = HashMap::new();
        for record in lock(&self.records).iter() {
            let Some(name) = record.username.as_ref().filter(|n| usernames.contains(n)) else {
                continue;
            };
            match latest.get(name) {
                Some(current) if current.created_at >= record.created_at => {}
                _ => {
                    latest.insert(name.clone(), record.clone());
                }
            }
        }
        let mut records: Vec<MintRecord> = latest.into_values().collect();
        records.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(records)
    }
}

#[derive(Default)]
pub struct InMemoryFollowingStore {
    snapshots: Mutex<HashMap<Fid, FollowingSnapshot>>,
    fail_writes: AtomicBool,
}

impl InMemoryFollowingStore {
    /// Makes every `upsert` fail; reads keep working.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn put(&self, snapshot: FollowingSnapshot) {
        lock(&self.snapshots).insert(snapshot.fid, snapshot);
    }

    pub fn snapshot(&self, fid: Fid) -> Option<FollowingSnapshot> {
        lock(&self.snapshots).get(&fid).cloned()
    }
}

#[async_trait]
impl FollowingStore for InMemoryFollowingStore {
    async fn find(&self, fid: Fid) -> Result<Option<FollowingSnapshot>> {
        Ok(self.snapshot(fid))
    }

    async fn upsert(&self, snapshot: &FollowingSnapshot) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("following store unavailable");
        }
        self.put(snapshot.clone());
        Ok(())
    }
}

/// Image source that always answers with the same URL.
pub struct StaticMintImages {
    url: String,
    requests: Mutex<Vec<MintImageRequest>>,
}

impl StaticMintImages {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<MintImageRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl MintImageSource for StaticMintImages {
    async fn render(&self, request: &MintImageRequest) -> Result<String> {
        lock(&self.requests).push(request.clone());
        Ok(self.url.clone())
    }
}
