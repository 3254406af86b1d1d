use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{Value, json};

use alignment_chart::app::{AppState, Ports, ServiceSettings, router};
use alignment_chart::domain::{
    Cast, Category, FollowedUser, FollowingSnapshot, MintRecord, Narrative, Point,
    RawClassification, UserProfile,
};
use alignment_chart::test_support::{
    InMemoryFollowingStore, InMemoryMintStore, MockClassifier, MockSocialGraph, StaticMintImages,
};

struct Fixture {
    social: MockSocialGraph,
    classifier: MockClassifier,
    mints: Arc<InMemoryMintStore>,
    following: Arc<InMemoryFollowingStore>,
    images: Option<Arc<StaticMintImages>>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            social: MockSocialGraph::default(),
            classifier: MockClassifier::returning(RawClassification {
                category: Category::new(
                    "Speculator-Decentralist: The principle-driven investor in decentralized projects",
                ),
                x_position: -2.0,
                y_position: 6.0,
                narrative: Narrative {
                    alignment_overview: "You are positioned at (2,-6)".into(),
                    ..Narrative::default()
                },
            }),
            mints: Arc::new(InMemoryMintStore::default()),
            following: Arc::new(InMemoryFollowingStore::default()),
            images: Some(Arc::new(StaticMintImages::new("https://cdn/card.png"))),
        }
    }
}

impl Fixture {
    fn server(self) -> TestServer {
        let ports = Ports {
            social: Arc::new(self.social),
            classifier: Arc::new(self.classifier),
            mint_store: self.mints,
            following_store: self.following,
            mint_images: self
                .images
                .map(|images| images as Arc<dyn alignment_chart::port::MintImageSource>),
        };
        let state = AppState::from_ports(ports, ServiceSettings::default());
        TestServer::new(router(state)).unwrap()
    }
}

fn mint(token_id: i64, username: &str, x: f64, y: f64) -> MintRecord {
    MintRecord {
        id: token_id,
        token_id,
        tx_hash: format!("0x{token_id}"),
        wallet_address: "0xwallet".into(),
        fid: None,
        username: Some(username.into()),
        point: Some(Point::new(x, y)),
        category: Category::new("Builder-Pragmatist: The practical developer"),
        image_url: format!("https://cdn/{token_id}.png"),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn liveness_is_always_ok() {
    let server = Fixture::default().server();
    let response = server.get("/health/live").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "live");
}

#[tokio::test]
async fn readiness_reflects_database() {
    let fixture = Fixture::default();
    let mints = fixture.mints.clone();
    let server = fixture.server();

    server.get("/health/ready").await.assert_status_ok();

    mints.set_should_fail(true);
    let response = server.get("/health/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["status"], "degraded");
}

#[tokio::test]
async fn analyze_profile_returns_calibrated_analysis() {
    let author = UserProfile {
        fid: 42,
        username: Some("carol".into()),
        display_name: Some("Carol".into()),
        ..UserProfile::default()
    };
    let fixture = Fixture {
        social: MockSocialGraph::default().with_casts_page(
            vec![Cast {
                text: Some("buying the dip".into()),
                author: Some(author),
                extra: serde_json::Map::new(),
            }],
            None,
        ),
        ..Fixture::default()
    };
    let server = fixture.server();

    let response = server
        .get("/api/analyze-profile")
        .add_query_param("fid", "42")
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["castCount"], 1);
    assert_eq!(body["userInfo"]["username"], "carol");
    assert_eq!(body["userInfo"]["displayName"], "Carol");
    assert_eq!(body["analysis"]["xPosition"], 3.0);
    assert_eq!(body["analysis"]["yPosition"], -8.9);
    assert_eq!(
        body["analysis"]["alignmentOverview"],
        "You are positioned at (2,-6)"
    );
    assert!(body["next"]["cursor"].is_null());
}

#[tokio::test]
async fn analyze_profile_reports_classifier_failure() {
    let fixture = Fixture {
        social: MockSocialGraph::default().with_casts_page(vec![], None),
        classifier: MockClassifier::failing("quota exceeded"),
        ..Fixture::default()
    };
    let server = fixture.server();

    let response = server.get("/api/analyze-profile").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Failed to analyze profile");
    assert!(
        body["details"]
            .as_str()
            .is_some_and(|d| d.contains("quota exceeded"))
    );
}

#[tokio::test]
async fn find_friends_requires_fid() {
    let server = Fixture::default().server();
    let response = server.get("/api/find-friends").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "FID parameter is required");
}

#[tokio::test]
async fn find_friends_without_following_reports_no_friends() {
    let server = Fixture::default().server();
    let response = server
        .get("/api/find-friends")
        .add_query_param("fid", "1")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "No friends found for this user");
    assert_eq!(body["friends"], json!([]));
}

#[tokio::test]
async fn find_friends_social_failure_keeps_empty_friends() {
    let fixture = Fixture {
        social: MockSocialGraph::default().failing_following(),
        ..Fixture::default()
    };
    let server = fixture.server();

    let response = server
        .get("/api/find-friends")
        .add_query_param("fid", "1")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Could not fetch following data from Neynar API");
    assert_eq!(body["friends"], json!([]));
}

#[tokio::test]
async fn find_friends_charts_stored_following() {
    let fixture = Fixture::default();
    fixture.following.put(FollowingSnapshot {
        fid: 1,
        username: Some("me".into()),
        following: vec![
            FollowedUser {
                fid: 2,
                username: "alice".into(),
            },
            FollowedUser {
                fid: 3,
                username: "bob".into(),
            },
        ],
    });
    fixture.mints.insert(mint(1, "alice", 1.0, 1.0));
    fixture.mints.insert(mint(2, "bob", 1.2, 1.1));
    let server = fixture.server();

    let response = server
        .get("/api/find-friends")
        .add_query_param("fid", "1")
        .add_query_param("x", "-4")
        .add_query_param("y", "-4")
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["username"], "me");
    assert_eq!(body["friends_count"], 2);
    let entities = body["chart"]["entities"].as_array().expect("entities");
    assert_eq!(entities.len(), 3);
    assert_eq!(entities[0]["id"], "self");
    assert_eq!(entities[0]["role"], "self");
    assert_eq!(
        body["chart"]["quadrants"]["builderDecentralist"],
        json!(["self"])
    );
    assert_eq!(
        body["chart"]["quadrants"]["speculatorPragmatist"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn layout_endpoint_resolves_overlaps() {
    let server = Fixture::default().server();
    let response = server
        .post("/api/layout")
        .json(&json!({
            "entities": [
                {"id": "a", "x": 1, "y": 1},
                {"id": "b", "x": "1.2", "y": "1.1"},
                {"id": "c", "x": "n/a", "y": 2}
            ]
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let placed = body["entities"].as_array().expect("entities");
    assert_eq!(placed.len(), 3);

    let push = 0.3 * 0.2 / 0.05f64.sqrt();
    let ax = placed[0]["point"]["x"].as_f64().expect("a.x");
    let bx = placed[1]["point"]["x"].as_f64().expect("b.x");
    assert!((ax - (1.0 - push)).abs() < 1e-9);
    assert!((bx - (1.2 + push)).abs() < 1e-9);
    assert!(placed[0]["screen"]["left"].as_f64().is_some());
    assert!(placed[2]["point"].is_null());
    assert!(placed[2]["screen"].is_null());
}

#[tokio::test]
async fn save_mint_then_read_metadata() {
    let fixture = Fixture::default();
    let server = fixture.server();

    let response = server
        .post("/api/save-mint")
        .json(&json!({
            "tokenId": 7,
            "txHash": "0xabc",
            "walletAddress": "0xwallet",
            "x": -8.9,
            "y": 3,
            "category": "Builder-Pragmatist: The practical developer",
            "username": "alice"
        }))
        .await;
    response.assert_status_ok();
    let saved = response.json::<Value>();
    assert_eq!(saved["success"], true);
    assert_eq!(saved["tokenId"], 7);
    assert_eq!(saved["imageUrl"], "https://cdn/card.png");

    let latest = server.get("/api/get-latest-token-id").await;
    latest.assert_status_ok();
    assert_eq!(
        latest.json::<Value>(),
        json!({"latestTokenId": 7, "nextTokenId": 8})
    );

    let metadata = server.get("/tokens/7").await;
    metadata.assert_status_ok();
    assert_eq!(
        metadata.header("cache-control").to_str().expect("ascii"),
        "public, max-age=86400"
    );
    let body = metadata.json::<Value>();
    assert_eq!(body["name"], "Onchain Alignment #7");
    assert_eq!(body["attributes"][0]["value"], "Builder-Pragmatist");
}

#[tokio::test]
async fn save_mint_rejects_missing_parameters() {
    let server = Fixture::default().server();
    let response = server
        .post("/api/save-mint")
        .json(&json!({"tokenId": 1, "txHash": "0x"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Missing required parameters");
}

#[tokio::test]
async fn save_mint_without_image_source_is_unavailable() {
    let fixture = Fixture {
        images: None,
        ..Fixture::default()
    };
    let server = fixture.server();
    let response = server
        .post("/api/save-mint")
        .json(&json!({
            "tokenId": 1, "txHash": "0x", "walletAddress": "0xw",
            "x": 1, "y": 1, "category": "Speculator-Pragmatist"
        }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn save_mint_store_failure_is_reported() {
    let fixture = Fixture::default();
    fixture.mints.set_should_fail(true);
    let server = fixture.server();
    let response = server
        .post("/api/save-mint")
        .json(&json!({
            "tokenId": 1, "txHash": "0x", "walletAddress": "0xw",
            "x": 1, "y": 1, "category": "Speculator-Pragmatist",
            "imageUrl": "https://cdn/own.png"
        }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Failed to save mint data");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn token_metadata_validates_and_404s() {
    let server = Fixture::default().server();

    let invalid = server.get("/tokens/abc").await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(invalid.json::<Value>()["error"], "Invalid token ID");

    let missing = server.get("/tokens/999").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"], "Token not found");
}

#[tokio::test]
async fn share_intent_builds_compose_link() {
    let server = Fixture::default().server();
    let response = server
        .get("/api/share-intent")
        .add_query_param("x", "-8.94")
        .add_query_param("y", "3")
        .add_query_param("category", "Builder-Pragmatist: The practical developer")
        .add_query_param("imageUrl", "https://cdn/7.png")
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(
        body["text"],
        "I'm a Builder-Pragmatist (-8.9, 3.0) on the Onchain Alignment Chart! Check out your position:"
    );
    let url = body["intentUrl"].as_str().expect("url");
    assert!(url.starts_with("https://warpcast.com/~/compose?text="));
    assert!(url.contains("https%3A%2F%2Fcdn%2F7.png"));
}

#[tokio::test]
async fn share_intent_requires_parameters() {
    let server = Fixture::default().server();
    let response = server
        .get("/api/share-intent")
        .add_query_param("x", "1")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
