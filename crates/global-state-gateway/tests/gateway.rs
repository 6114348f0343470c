// Path: crates/global-state-gateway/tests/gateway.rs

use agora_api::global::{FeedIndex, GlobalState};
use agora_api::state::{StateSnapshot, StateSnapshotProvider};
use agora_state::{CommittedState, MemoryLedger, PendingMutation};
use agora_types::app::{ContentHash, ContentItem, Engagement, Identifier, PostBody};
use agora_types::codec::{Network, PublicKeyCodec};
use agora_types::config::{GatewayConfig, SnapshotFailureStatus};
use agora_types::error::StateError;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use global_state_gateway::{
    router, GlobalStateService, BLACKLIST_ROUTE, GLOBAL_FEED_ROUTE, GRAYLIST_ROUTE,
    VERIFIED_USERNAMES_ROUTE,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

fn hash(b: u8) -> ContentHash {
    ContentHash([b; 32])
}

fn post(b: u8, media: bool) -> ContentItem {
    ContentItem {
        hash: hash(b),
        poster: Identifier([7; 33]),
        body: PostBody {
            body: format!("post {b}"),
            image_urls: if media {
                vec![format!("https://images.example/{b}.jpg")]
            } else {
                Vec::new()
            },
            video_urls: Vec::new(),
        }
        .to_bytes(),
        parent_hash: None,
        reposted_hash: None,
        is_quoted_repost: false,
        timestamp_nanos: u64::from(b),
        is_hidden: false,
        is_pinned: false,
        confirmation_block_height: Some(1),
        engagement: Engagement::default(),
        extra_data: BTreeMap::new(),
    }
}

struct Harness {
    app: Router,
    globals: Arc<GlobalState>,
    ledger: Arc<MemoryLedger>,
}

impl Harness {
    fn with_config(config: GatewayConfig, posts: Vec<ContentItem>) -> Self {
        let globals = Arc::new(GlobalState::new());
        // Walk order is the order given.
        let n = posts.len() as u64;
        globals.feed_whitelist.publish(
            posts
                .iter()
                .enumerate()
                .map(|(i, p)| (p.hash, 1_000 + n - i as u64))
                .collect::<FeedIndex>(),
        );
        let ledger = Arc::new(MemoryLedger::new(CommittedState {
            posts: posts.into_iter().map(|p| (p.hash, p)).collect(),
            profiles: BTreeMap::new(),
            block_height: 1,
        }));
        let service = GlobalStateService::new(&config, globals.clone(), ledger.clone());
        Self {
            app: router(&config, service),
            globals,
            ledger,
        }
    }

    fn exposed(posts: Vec<ContentItem>) -> Self {
        Self::with_config(
            GatewayConfig {
                expose_global_state: true,
                ..Default::default()
            },
            posts,
        )
    }

    async fn call(&self, method: &str, route: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let resp = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(route)
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn feed(&self, request: Value) -> (StatusCode, Value) {
        self.call("POST", GLOBAL_FEED_ROUTE, request.to_string()).await
    }
}

fn page_hashes(page: &Value) -> Vec<String> {
    page.as_array()
        .unwrap()
        .iter()
        .map(|p| p["PostHashHex"].as_str().unwrap().to_string())
        .collect()
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap()
}

#[tokio::test]
async fn disabled_gate_answers_not_found_before_reading_the_body() {
    let h = Harness::with_config(
        GatewayConfig {
            expose_global_state: false,
            body_limit_kb: 1,
            ..Default::default()
        },
        vec![post(1, false)],
    );
    let garbage = "{{{ not json";
    let huge = "x".repeat(64 * 1024);
    for route in [
        VERIFIED_USERNAMES_ROUTE,
        BLACKLIST_ROUTE,
        GRAYLIST_ROUTE,
        GLOBAL_FEED_ROUTE,
    ] {
        for body in [garbage.to_string(), huge.clone()] {
            let (status, resp) = h.call("POST", route, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{route}");
            assert_eq!(error_code(&resp), "NOT_FOUND");
            assert_eq!(resp["error"]["message"], "Global state not exposed");
        }
    }
}

#[tokio::test]
async fn moderation_lists_are_keyed_by_public_key_string() {
    let h = Harness::exposed(Vec::new());
    let codec = PublicKeyCodec::new(Network::Mainnet);
    let k1 = Identifier([1; 33]);
    let k2 = Identifier([2; 33]);
    h.globals.blacklist.update(|m| {
        m.insert(k1, vec![1]);
        m.insert(k2, Vec::new());
    });

    let (status, resp) = h.call("GET", BLACKLIST_ROUTE, Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = serde_json::Map::new();
    expected.insert(codec.encode(&k1), json!("AQ=="));
    expected.insert(codec.encode(&k2), json!(""));
    assert_eq!(resp, Value::Object(expected));

    let (status, resp) = h.call("POST", GRAYLIST_ROUTE, "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({}));
}

#[tokio::test]
async fn verified_username_map_is_returned_as_published() {
    let h = Harness::exposed(Vec::new());
    let (_, resp) = h.call("GET", VERIFIED_USERNAMES_ROUTE, Body::empty()).await;
    assert_eq!(resp, json!({}));

    h.globals
        .verified_usernames
        .update(|m| m.insert("alice".into(), Identifier([3; 33])));
    let (status, resp) = h.call("GET", VERIFIED_USERNAMES_ROUTE, Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["alice"], json!(vec![3u8; 33]));
}

#[tokio::test]
async fn pages_resume_strictly_after_the_cursor() {
    let (a, b, c, d) = (post(1, false), post(2, false), post(3, false), post(4, false));
    let h = Harness::exposed(vec![a, b, c, d]);

    let (status, first) = h.feed(json!({ "NumToFetch": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page_hashes(&first), vec![hash(1).to_hex(), hash(2).to_hex()]);

    let (_, second) = h
        .feed(json!({ "PostHashHex": hash(2).to_hex(), "NumToFetch": 2 }))
        .await;
    assert_eq!(page_hashes(&second), vec![hash(3).to_hex(), hash(4).to_hex()]);

    let (status, third) = h
        .feed(json!({ "PostHashHex": hash(4).to_hex(), "NumToFetch": 2 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(third, json!([]));
}

#[tokio::test]
async fn zero_or_absent_page_size_returns_fifty() {
    let h = Harness::exposed((1..=60).map(|b| post(b, false)).collect());
    let (_, page) = h.feed(json!({ "NumToFetch": 0 })).await;
    assert_eq!(page.as_array().unwrap().len(), 50);
    let (_, page) = h.feed(json!({})).await;
    assert_eq!(page.as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn unknown_cursor_starts_from_the_top() {
    let h = Harness::exposed(vec![post(1, false), post(2, false)]);
    let (status, page) = h
        .feed(json!({ "PostHashHex": hash(200).to_hex(), "NumToFetch": 5 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page_hashes(&page), vec![hash(1).to_hex(), hash(2).to_hex()]);
}

#[tokio::test]
async fn media_filter_returns_only_items_with_media() {
    let h = Harness::exposed(vec![post(1, false), post(2, true), post(3, false), post(4, true)]);
    let (_, page) = h
        .feed(json!({ "NumToFetch": 2, "MediaRequired": true }))
        .await;
    assert_eq!(page_hashes(&page), vec![hash(2).to_hex(), hash(4).to_hex()]);
    assert!(page
        .as_array()
        .unwrap()
        .iter()
        .all(|p| !p["ImageURLs"].as_array().unwrap().is_empty()));
}

#[tokio::test]
async fn empty_whitelist_yields_an_empty_array() {
    let h = Harness::exposed(Vec::new());
    let (status, page) = h.feed(json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page, json!([]));
}

#[tokio::test]
async fn bad_requests_are_rejected() {
    let h = Harness::exposed(vec![post(1, false)]);

    let (status, resp) = h.feed(json!({ "PostHashHex": "zz" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "INVALID_CURSOR");

    let (status, resp) = h.feed(json!({ "PostHashHex": "abcd" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "INVALID_CURSOR");

    let (status, resp) = h.feed(json!({ "NumToFetch": -5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "INVALID_PAGE_SIZE");

    let (status, resp) = h.call("POST", GLOBAL_FEED_ROUTE, "{ nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "MALFORMED_REQUEST");
    assert!(resp["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("GetGlobalFeed: "));
}

#[tokio::test]
async fn oversized_body_is_rejected_once_exposed() {
    let h = Harness::with_config(
        GatewayConfig {
            expose_global_state: true,
            body_limit_kb: 1,
            ..Default::default()
        },
        vec![post(1, false)],
    );
    let padded = format!(r#"{{"NumToFetch":1,"Pad":"{}"}}"#, "x".repeat(4096));
    let (status, resp) = h.call("POST", GLOBAL_FEED_ROUTE, padded).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "MALFORMED_REQUEST");
}

#[tokio::test]
async fn snapshot_failure_status_is_configurable() {
    let h = Harness::exposed(vec![post(1, false)]);
    h.ledger.close();
    let (status, resp) = h.feed(json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "SNAPSHOT_UNAVAILABLE");

    let h = Harness::with_config(
        GatewayConfig {
            expose_global_state: true,
            snapshot_failure_status: SnapshotFailureStatus::Internal,
            ..Default::default()
        },
        vec![post(1, false)],
    );
    h.ledger.close();
    let (status, _) = h.feed(json!({})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

struct FailingProvider;

#[async_trait]
impl StateSnapshotProvider for FailingProvider {
    async fn current_view(&self) -> Result<Arc<dyn StateSnapshot>, StateError> {
        Err(StateError::Unavailable("node is syncing".into()))
    }
}

#[tokio::test]
async fn provider_errors_surface_as_snapshot_unavailable() {
    let config = GatewayConfig {
        expose_global_state: true,
        ..Default::default()
    };
    let globals = Arc::new(GlobalState::new());
    let service = GlobalStateService::new(&config, globals, Arc::new(FailingProvider));
    let resp = router(&config, service)
        .oneshot(
            Request::post(GLOBAL_FEED_ROUTE)
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn one_unprojectable_item_aborts_the_page() {
    let mut broken = post(2, false);
    broken.body = b"not json at all".to_vec();
    let h = Harness::exposed(vec![post(1, false), broken, post(3, false)]);

    let (status, resp) = h.feed(json!({ "NumToFetch": 3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&resp), "PROJECTION_FAILED");

    // Pages that do not reach the broken item are unaffected.
    let (status, page) = h.feed(json!({ "NumToFetch": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page_hashes(&page), vec![hash(1).to_hex()]);
}

#[tokio::test]
async fn pending_state_is_merged_into_the_feed() {
    let h = Harness::exposed(vec![post(1, false), post(2, false)]);
    h.ledger
        .submit(PendingMutation::HidePost(hash(1)))
        .unwrap();
    let mut fresh = post(9, true);
    fresh.confirmation_block_height = None;
    h.ledger.submit(PendingMutation::PutPost(fresh)).unwrap();
    h.globals.feed_whitelist.update(|w| w.insert(hash(9), 5_000));

    let (status, page) = h.feed(json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page_hashes(&page), vec![hash(9).to_hex(), hash(2).to_hex()]);
    assert_eq!(page[0]["InMempool"], true);
    assert_eq!(page[1]["InMempool"], false);
}

#[tokio::test]
async fn telemetry_routes_are_mounted() {
    let h = Harness::exposed(Vec::new());
    let resp = h
        .app
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn null_body_selects_the_defaults() {
    let h = Harness::exposed((1..=55).map(|b| post(b, false)).collect());
    let (status, page) = h.call("POST", GLOBAL_FEED_ROUTE, "null").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.as_array().unwrap().len(), 50);
    assert_eq!(page[0]["PostHashHex"], hash(1).to_hex());
}
