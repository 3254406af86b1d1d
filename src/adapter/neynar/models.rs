use serde::Deserialize;

use crate::domain::{Cast, Fid, FollowedUser, Page, UserProfile};

#[derive(Debug, Default, Deserialize)]
pub(super) struct NextCursor {
    #[serde(default)]
    pub(super) cursor: Option<String>,
}

fn next_cursor(next: Option<NextCursor>) -> Option<String> {
    next.and_then(|n| n.cursor).filter(|c| !c.is_empty())
}

#[derive(Debug, Deserialize)]
pub(super) struct CastsResponse {
    #[serde(default)]
    casts: Vec<Cast>,
    #[serde(default)]
    next: Option<NextCursor>,
}

impl From<CastsResponse> for Page<Cast> {
    fn from(response: CastsResponse) -> Self {
        Self {
            items: response.casts,
            next_cursor: next_cursor(response.next),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FollowedAccount {
    fid: Fid,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FollowEntry {
    #[serde(default)]
    user: Option<FollowedAccount>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FollowingResponse {
    #[serde(default)]
    users: Vec<FollowEntry>,
    #[serde(default)]
    next: Option<NextCursor>,
}

impl From<FollowingResponse> for Page<FollowedUser> {
    /// Entries without a user or username cannot be matched to mints and are
    /// dropped.
    fn from(response: FollowingResponse) -> Self {
        let items = response
            .users
            .into_iter()
            .filter_map(|entry| entry.user)
            .filter_map(|user| {
                user.username
                    .filter(|name| !name.is_empty())
                    .map(|username| FollowedUser {
                        fid: user.fid,
                        username,
                    })
            })
            .collect();
        Self {
            items,
            next_cursor: next_cursor(response.next),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BulkUsersResponse {
    #[serde(default)]
    pub(super) users: Vec<UserProfile>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserResponse {
    #[serde(default)]
    pub(super) user: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn following_page_drops_entries_without_username() {
        let response: FollowingResponse = serde_json::from_value(serde_json::json!({
            "users": [
                {"object": "follow", "user": {"fid": 1, "username": "alice"}},
                {"object": "follow"},
                {"object": "follow", "user": {"fid": 3}},
            ],
            "next": {"cursor": "abc"}
        }))
        .expect("following payload");

        let page = Page::<FollowedUser>::from(response);
        assert_eq!(
            page.items,
            vec![FollowedUser {
                fid: 1,
                username: "alice".into()
            }]
        );
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn empty_or_null_cursor_means_last_page() {
        let response: CastsResponse =
            serde_json::from_value(serde_json::json!({"casts": [], "next": {"cursor": null}}))
                .expect("casts payload");
        assert_eq!(Page::<Cast>::from(response).next_cursor, None);

        let response: CastsResponse =
            serde_json::from_value(serde_json::json!({"casts": [], "next": {"cursor": ""}}))
                .expect("casts payload");
        assert_eq!(Page::<Cast>::from(response).next_cursor, None);
    }
}
