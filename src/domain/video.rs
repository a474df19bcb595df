// src/domain/video.rs
//
// Videos are the leaf entities of the catalog and the unit of playback
// and download tracking. A video is either a movie or an episode,
// discriminated by which detail variant its raw document matched —
// never by a separate type tag.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{LibraryId, SeasonId, VideoId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub air_date: NaiveDate,
    pub thumbnail: ThumbnailState,
    /// Server-side media identifier, opaque to the client.
    pub media_id: String,
    #[serde(default)]
    pub parts: Vec<VideoPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcode_profile: Option<String>,
    pub playback: PlaybackState,
    pub updated_at: DateTime<Utc>,
    pub detail: VideoDetail,
}

/// Which kind of video this is. Serialized untagged: a movie detail is the
/// object `{library, year}`, an episode detail is `{season, index}`. The
/// decoder probes the two shapes in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VideoDetail {
    Movie(MovieDetail),
    Episode(EpisodeDetail),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Owning library; must be a movie-library.
    pub library: LibraryId,
    pub year: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetail {
    /// Owning season. The episode's library is derived transitively
    /// through season -> show -> library.
    pub season: SeasonId,
    /// Ordinal within the season.
    pub index: u32,
}

/// One playable part of a video. Multi-part videos exist (split files);
/// all parts must be locally available before the video is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPart {
    pub id: String,
    /// Server-side source key for this part.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// Duration in milliseconds.
    pub duration: u64,
    pub download: DownloadState,
}

/// On-device download lifecycle of one video part. Paths are relative to
/// the chosen storage root; `Store::path` maps them to loadable URIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DownloadState {
    None,
    Downloading { path: String },
    Transcoding { path: String },
    Downloaded { path: String },
    Transcoded { path: String },
}

impl DownloadState {
    /// Only fully downloaded or transcoded parts count as available for
    /// local playback.
    pub fn is_available(&self) -> bool {
        matches!(
            self,
            DownloadState::Downloaded { .. } | DownloadState::Transcoded { .. }
        )
    }

    /// Relative path of the on-device file, if any exists yet.
    pub fn local_path(&self) -> Option<&str> {
        match self {
            DownloadState::None => None,
            DownloadState::Downloading { path }
            | DownloadState::Transcoding { path }
            | DownloadState::Downloaded { path }
            | DownloadState::Transcoded { path } => Some(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ThumbnailState {
    None,
    Downloaded { path: String },
}

/// Viewing state of a video. `position` is a millisecond offset into the
/// video's total duration (sum of its parts' durations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
    Unplayed,
    InProgress { position: u64 },
    Played,
}

impl PlaybackState {
    pub fn position(&self) -> u64 {
        match self {
            PlaybackState::InProgress { position } => *position,
            PlaybackState::Unplayed | PlaybackState::Played => 0,
        }
    }
}

impl Video {
    /// Total duration in milliseconds, summed over all parts.
    pub fn duration_ms(&self) -> u64 {
        self.parts.iter().map(|part| part.duration).sum()
    }

    /// True iff every part of the video is available for local playback.
    /// A partially-downloaded multi-part video is not available.
    pub fn is_downloaded(&self) -> bool {
        self.parts.iter().all(|part| part.download.is_available())
    }

    pub fn as_movie(&self) -> Option<&MovieDetail> {
        match &self.detail {
            VideoDetail::Movie(detail) => Some(detail),
            VideoDetail::Episode(_) => None,
        }
    }

    pub fn as_episode(&self) -> Option<&EpisodeDetail> {
        match &self.detail {
            VideoDetail::Episode(detail) => Some(detail),
            VideoDetail::Movie(_) => None,
        }
    }
}
