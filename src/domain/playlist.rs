// src/domain/playlist.rs
use serde::{Deserialize, Serialize};

use crate::domain::ids::{PlaylistId, VideoId};

/// An ordered list of videos. Order is meaningful; playlists are never
/// re-sorted by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub title: String,
    #[serde(default)]
    pub videos: Vec<VideoId>,
}
