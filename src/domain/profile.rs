use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A social-graph account id.
pub type Fid = u64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    #[serde(default)]
    pub bio: Option<BioText>,
}

/// Account fields the service reads; anything else the API sends is kept in
/// `extra` so casts can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub fid: Fid,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
    #[serde(default)]
    pub profile: Option<AuthorProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.bio.as_ref())
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

/// A followed account as kept in the following snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowedUser {
    pub fid: Fid,
    pub username: String,
}

/// Who `fid` follows, cached in the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowingSnapshot {
    pub fid: Fid,
    pub username: Option<String>,
    pub following: Vec<FollowedUser>,
}

impl FollowingSnapshot {
    /// Username stored with the snapshot; falls back to `fid:<n>`.
    #[must_use]
    pub fn stored_username(&self) -> String {
        self.username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("fid:{}", self.fid))
    }

    #[must_use]
    pub fn following_fids(&self) -> Vec<Fid> {
        self.following.iter().map(|f| f.fid).collect()
    }
}

/// Profile summary returned alongside an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub fid: Fid,
    pub profile_picture: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
}

impl UserInfo {
    #[must_use]
    pub fn from_author(fid: Fid, author: Option<&UserProfile>) -> Self {
        let Some(author) = author else {
            return Self {
                fid,
                ..Self::default()
            };
        };
        Self {
            fid,
            profile_picture: author.pfp_url.clone().unwrap_or_default(),
            username: author.username.clone().unwrap_or_default(),
            display_name: author.display_name.clone().unwrap_or_default(),
            bio: author.bio().unwrap_or_default().to_string(),
        }
    }
}
