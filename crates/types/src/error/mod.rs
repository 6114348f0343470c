// Path: crates/types/src/error/mod.rs
//! Core error types for the Agora global-state gateway.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors decoding identifiers and content hashes from their string forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input was not valid Base58Check.
    #[error("Invalid base58check string: {0}")]
    InvalidBase58(String),
    /// The input was not valid hex.
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
    /// The decoded value had the wrong length.
    #[error("Invalid length. Expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The required length in bytes.
        expected: usize,
        /// The decoded length in bytes.
        got: usize,
    },
    /// The address prefix belongs to a different network.
    #[error("Public key prefix does not match the configured network")]
    WrongNetwork,
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidBase58(_) => "CODEC_INVALID_BASE58",
            Self::InvalidHex(_) => "CODEC_INVALID_HEX",
            Self::InvalidLength { .. } => "CODEC_INVALID_LENGTH",
            Self::WrongNetwork => "CODEC_WRONG_NETWORK",
        }
    }
}

/// Errors raised while building a merged view of committed and pending state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A pending mutation could not be applied on top of committed state.
    #[error("Apply failed: {0}")]
    Apply(String),
    /// The provider cannot produce views at all (e.g., the pool is shut down).
    #[error("State unavailable: {0}")]
    Unavailable(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Apply(_) => "STATE_APPLY_FAILED",
            Self::Unavailable(_) => "STATE_UNAVAILABLE",
        }
    }
}

/// Errors turning a content item into its client-facing response shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The stored body is not valid post JSON.
    #[error("Problem decoding body of post {hash}: {reason}")]
    InvalidBody {
        /// Hex hash of the offending post.
        hash: String,
        /// The decoder diagnostic.
        reason: String,
    },
    /// A repost points at a post that the snapshot cannot resolve.
    #[error("Reposted post {reposted} of post {hash} not found")]
    MissingRepost {
        /// Hex hash of the reposting post.
        hash: String,
        /// Hex hash of the post it references.
        reposted: String,
    },
}

impl ErrorCode for ProjectionError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidBody { .. } => "PROJECTION_INVALID_BODY",
            Self::MissingRepost { .. } => "PROJECTION_MISSING_REPOST",
        }
    }
}

/// The failure taxonomy of the global-state operations.
///
/// Every variant is terminal for the current request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobalStateError {
    /// The exposure flag is off.
    #[error("Global state not exposed")]
    FeatureDisabled,
    /// The request body could not be decoded.
    #[error("Problem parsing request body: {0}")]
    MalformedRequest(String),
    /// The resume cursor is not a valid content hash.
    #[error("Invalid post hash: {0}")]
    InvalidCursor(String),
    /// The page size is negative.
    #[error("NumToFetch must not be negative, got {0}")]
    InvalidPageSize(i64),
    /// The merged committed + pending view could not be constructed.
    #[error("Error fetching mempool view: {0}")]
    SnapshotUnavailable(String),
    /// A single item of the page could not be projected; the page is aborted.
    #[error("Error converting post entry to response: {0}")]
    ProjectionFailed(String),
    /// The final response could not be serialized.
    #[error("Problem encoding response as JSON: {0}")]
    EncodingFailed(String),
}

impl ErrorCode for GlobalStateError {
    fn code(&self) -> &'static str {
        match self {
            Self::FeatureDisabled => "NOT_FOUND",
            Self::MalformedRequest(_) => "MALFORMED_REQUEST",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::InvalidPageSize(_) => "INVALID_PAGE_SIZE",
            Self::SnapshotUnavailable(_) => "SNAPSHOT_UNAVAILABLE",
            Self::ProjectionFailed(_) => "PROJECTION_FAILED",
            Self::EncodingFailed(_) => "ENCODING_FAILED",
        }
    }
}

impl From<StateError> for GlobalStateError {
    fn from(e: StateError) -> Self {
        Self::SnapshotUnavailable(e.to_string())
    }
}

impl From<ProjectionError> for GlobalStateError {
    fn from(e: ProjectionError) -> Self {
        Self::ProjectionFailed(e.to_string())
    }
}
