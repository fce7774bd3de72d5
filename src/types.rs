//! Core types for media-flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use url::Url;
use uuid::Uuid;

/// Kind of a picked asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// A user-selected asset awaiting upload, referenced by local handle only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedMediaItem {
    /// Identifier assigned when the item was picked
    pub id: Uuid,
    /// Image or video
    pub kind: MediaKind,
    /// Local resource reference
    pub location: PathBuf,
    /// When the item was picked
    pub picked_at: DateTime<Utc>,
}

impl PickedMediaItem {
    /// Create a new item with a fresh identifier
    pub fn new(kind: MediaKind, location: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            location: location.into(),
            picked_at: Utc::now(),
        }
    }
}

/// Authenticated session a reservation is made for
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    /// Account the uploads belong to
    pub account: String,
    /// Bearer token
    pub token: String,
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("account", &self.account)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A request for upload slots, one per picked item
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    /// Correlation id, handed to the posting stage alongside the items
    pub id: Uuid,
    /// Session the slots are reserved for
    pub connection: ConnectionHandle,
    /// Number of slots to reserve
    pub item_count: NonZeroUsize,
}

impl ReservationRequest {
    /// Create a request with a fresh correlation id
    pub fn new(connection: ConnectionHandle, item_count: NonZeroUsize) -> Self {
        Self {
            id: Uuid::new_v4(),
            connection,
            item_count,
        }
    }
}

/// One reserved upload destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSlot {
    /// Where to PUT the file
    pub put_url: Url,
    /// Where the uploaded file will be served from
    pub get_url: Url,
    /// Extra headers to send with the PUT
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// How the posting stage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingOutcome {
    /// The items were posted
    Posted,
    /// The user dismissed the posting screen
    Dismissed,
}

/// Why the flow hands control back to the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnReason {
    /// User backed out while picking
    Cancelled,
    /// Posting finished
    Posted,
    /// Posting screen was dismissed
    Dismissed,
}

impl From<PostingOutcome> for ReturnReason {
    fn from(outcome: PostingOutcome) -> Self {
        match outcome {
            PostingOutcome::Posted => Self::Posted,
            PostingOutcome::Dismissed => Self::Dismissed,
        }
    }
}
