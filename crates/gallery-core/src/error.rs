use crate::hotspot::RoomId;
use thiserror::Error;

/// Everything the scene engine can refuse or fail at.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to load {uri}: {reason}")]
    AssetLoadFailure { uri: String, reason: String },

    #[error("unknown room `{0}`")]
    InvalidNavigationTarget(RoomId),

    #[error("transition to `{in_flight}` in progress, rejected `{requested}`")]
    ConcurrentTransitionRequest { in_flight: RoomId, requested: RoomId },

    #[error("invalid gallery manifest: {0}")]
    InvalidManifest(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
