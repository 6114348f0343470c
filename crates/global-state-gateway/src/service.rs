// Path: crates/global-state-gateway/src/service.rs

//! The four global-state operations, independent of the HTTP transport.

use crate::feed::{assemble, GetGlobalFeedRequest, PageRequest};
use crate::projection::{PostEntryResponse, Projector};
use agora_api::global::{ExposureGate, GlobalState, ModerationRecord, VerifiedUsernameMap};
use agora_api::state::StateSnapshotProvider;
use agora_types::codec::PublicKeyCodec;
use agora_types::config::{GatewayConfig, SnapshotFailureStatus};
use agora_types::error::GlobalStateError;
use axum::body::Body;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Moderation payloads keyed by public-key string, payloads base64 encoded.
pub type ModerationResponse = BTreeMap<String, String>;

/// Read-only projection of global state.
///
/// Every operation consults the exposure gate first and touches nothing else
/// (not even the request body) when it is closed.
#[derive(Clone)]
pub struct GlobalStateService {
    gate: ExposureGate,
    codec: PublicKeyCodec,
    globals: Arc<GlobalState>,
    provider: Arc<dyn StateSnapshotProvider>,
    default_page_size: usize,
    body_limit: usize,
    snapshot_status: SnapshotFailureStatus,
}

impl GlobalStateService {
    pub fn new(
        config: &GatewayConfig,
        globals: Arc<GlobalState>,
        provider: Arc<dyn StateSnapshotProvider>,
    ) -> Self {
        Self {
            gate: ExposureGate::new(config.expose_global_state),
            codec: PublicKeyCodec::new(config.network),
            globals,
            provider,
            default_page_size: config.default_page_size.max(1),
            body_limit: config.body_limit_kb.saturating_mul(1024),
            snapshot_status: config.snapshot_failure_status,
        }
    }

    pub fn gate(&self) -> ExposureGate {
        self.gate
    }

    pub fn snapshot_status(&self) -> SnapshotFailureStatus {
        self.snapshot_status
    }

    /// The verified-username registry as currently published.
    pub fn verified_username_map(&self) -> Result<Arc<VerifiedUsernameMap>, GlobalStateError> {
        self.gate.check()?;
        Ok(self.globals.verified_usernames.load())
    }

    /// The blacklist, rekeyed by public-key string.
    pub fn blacklisted_public_keys(&self) -> Result<ModerationResponse, GlobalStateError> {
        self.gate.check()?;
        Ok(self.moderation(&self.globals.blacklist.load()))
    }

    /// The graylist, rekeyed by public-key string.
    pub fn graylisted_public_keys(&self) -> Result<ModerationResponse, GlobalStateError> {
        self.gate.check()?;
        Ok(self.moderation(&self.globals.graylist.load()))
    }

    fn moderation(&self, record: &ModerationRecord) -> ModerationResponse {
        self.codec
            .project(record)
            .into_iter()
            .map(|(key, payload)| (key, BASE64.encode(payload)))
            .collect()
    }

    /// One page of the global feed.
    ///
    /// The body is read (up to the configured limit) only after the gate
    /// passes. The page is projected against a single snapshot; if any item
    /// fails to project the whole page is discarded.
    pub async fn global_feed(&self, body: Body) -> Result<Vec<PostEntryResponse>, GlobalStateError> {
        self.gate.check()?;

        let bytes = axum::body::to_bytes(body, self.body_limit)
            .await
            .map_err(|e| GlobalStateError::MalformedRequest(e.to_string()))?;
        // A literal `null` body selects every default.
        let request = serde_json::from_slice::<Option<GetGlobalFeedRequest>>(&bytes)
            .map_err(|e| GlobalStateError::MalformedRequest(e.to_string()))?
            .unwrap_or_default();
        let page = PageRequest::from_wire(request, self.default_page_size)?;

        let snapshot = self.provider.current_view().await?;
        let whitelist = self.globals.feed_whitelist.load();
        let registry = self.globals.verified_usernames.load();

        let items = assemble(&whitelist, snapshot.as_ref(), &page);
        tracing::debug!(
            target: "gateway",
            cursor = ?page.cursor,
            page_size = page.page_size,
            media_required = page.media_required,
            returned = items.len(),
            height = snapshot.block_height(),
            "assembled global feed page"
        );

        let projector = Projector::new(snapshot.as_ref(), self.codec, &registry);
        items
            .into_iter()
            .map(|item| projector.project(item).map_err(GlobalStateError::from))
            .collect()
    }
}
