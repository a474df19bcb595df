// src/domain/state.rs
//
// The top-level immutable state container.
//
// A `State` snapshot is created once at load and replaced wholesale on
// every local mutation; old snapshots stay valid for concurrent readers.
// Each entity mapping lives behind an `Arc` so a copy-on-write mutation
// clones only the one mapping that changed and reuses every sibling.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::collection::Collection;
use crate::domain::ids::{
    CollectionId, LibraryId, PlaylistId, SeasonId, ServerId, ShowId, VideoId,
};
use crate::domain::library::Library;
use crate::domain::playlist::Playlist;
use crate::domain::season::Season;
use crate::domain::show::Show;
use crate::domain::video::{DownloadState, PlaybackState, Video};
use crate::error::{AppError, AppResult};

/// Version of the persisted document schema this build reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Shared, immutable entity mapping. Cloning is a pointer copy.
pub type EntityMap<K, V> = Arc<HashMap<K, V>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    pub version: u32,
    /// Identifies this client installation to the sync layer.
    pub client_id: String,
    #[serde(default)]
    pub settings: ClientSettings,
    #[serde(default)]
    pub servers: HashMap<ServerId, ServerState>,
}

/// Local, user-adjustable preferences carried in the same snapshot as the
/// catalog so they persist and mutate through the same machinery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_transcode_profile: Option<String>,
    /// When set, browsing surfaces default to the availability-filtered
    /// view instead of the full catalog.
    #[serde(default)]
    pub show_only_downloaded: bool,
}

/// One remote catalog: five independent entity mappings plus playlists,
/// all keyed by entity id. Every cross-reference held by a contained
/// entity resolves within this same server (enforced at decode time).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerState {
    pub id: ServerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub libraries: EntityMap<LibraryId, Library>,
    #[serde(default)]
    pub collections: EntityMap<CollectionId, Collection>,
    #[serde(default)]
    pub shows: EntityMap<ShowId, Show>,
    #[serde(default)]
    pub seasons: EntityMap<SeasonId, Season>,
    #[serde(default)]
    pub videos: EntityMap<VideoId, Video>,
    #[serde(default)]
    pub playlists: EntityMap<PlaylistId, Playlist>,
}

impl State {
    /// Empty state with a fresh client identifier, used when no persisted
    /// document exists yet in the chosen store.
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION,
            client_id: Uuid::new_v4().to_string(),
            settings: ClientSettings::default(),
            servers: HashMap::new(),
        }
    }

    pub fn server(&self, id: &ServerId) -> Option<&ServerState> {
        self.servers.get(id)
    }

    /// New state with `server` inserted or replaced under its own id.
    pub fn with_server(&self, server: ServerState) -> State {
        let mut servers = self.servers.clone();
        servers.insert(server.id.clone(), server);
        State {
            version: self.version,
            client_id: self.client_id.clone(),
            settings: self.settings.clone(),
            servers,
        }
    }

    pub fn with_settings(&self, settings: ClientSettings) -> State {
        State {
            version: self.version,
            client_id: self.client_id.clone(),
            settings,
            servers: self.servers.clone(),
        }
    }

    /// New state with one video replaced. The video must already exist on
    /// the named server; a miss is a snapshot-construction bug surfaced as
    /// `AppError::Reference`.
    pub fn with_video(&self, server_id: &ServerId, video: Video) -> AppResult<State> {
        let server = self.servers.get(server_id).ok_or_else(|| AppError::Reference {
            server: server_id.to_string(),
            kind: "server",
            id: server_id.to_string(),
        })?;
        Ok(self.with_server(server.with_video(video)?))
    }

    /// Record a playback position, in milliseconds from the start of the
    /// video. The position becomes an `InProgress` playback state.
    pub fn with_play_position(
        &self,
        server_id: &ServerId,
        video_id: &VideoId,
        position_ms: u64,
    ) -> AppResult<State> {
        self.with_playback_state(
            server_id,
            video_id,
            PlaybackState::InProgress {
                position: position_ms,
            },
        )
    }

    pub fn with_playback_state(
        &self,
        server_id: &ServerId,
        video_id: &VideoId,
        playback: PlaybackState,
    ) -> AppResult<State> {
        let mut video = self.video(server_id, video_id)?.clone();
        video.playback = playback;
        video.updated_at = Utc::now();
        self.with_video(server_id, video)
    }

    /// Record a download-state transition for one part of a video.
    pub fn with_part_download_state(
        &self,
        server_id: &ServerId,
        video_id: &VideoId,
        part_id: &str,
        download: DownloadState,
    ) -> AppResult<State> {
        let mut video = self.video(server_id, video_id)?.clone();
        let part = video
            .parts
            .iter_mut()
            .find(|part| part.id == part_id)
            .ok_or_else(|| AppError::Reference {
                server: server_id.to_string(),
                kind: "video part",
                id: part_id.to_string(),
            })?;
        part.download = download;
        video.updated_at = Utc::now();
        self.with_video(server_id, video)
    }

    fn video(&self, server_id: &ServerId, video_id: &VideoId) -> AppResult<&Video> {
        let server = self.servers.get(server_id).ok_or_else(|| AppError::Reference {
            server: server_id.to_string(),
            kind: "server",
            id: server_id.to_string(),
        })?;
        server.videos.get(video_id).ok_or_else(|| AppError::Reference {
            server: server_id.to_string(),
            kind: "video",
            id: video_id.to_string(),
        })
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// New server record with one video replaced. Only the videos mapping
    /// is copied; every sibling mapping is reused by reference.
    pub fn with_video(&self, video: Video) -> AppResult<ServerState> {
        if !self.videos.contains_key(&video.id) {
            return Err(AppError::Reference {
                server: self.id.to_string(),
                kind: "video",
                id: video.id.to_string(),
            });
        }
        let mut videos = HashMap::clone(&self.videos);
        videos.insert(video.id.clone(), video);
        Ok(ServerState {
            videos: Arc::new(videos),
            id: self.id.clone(),
            name: self.name.clone(),
            token: self.token.clone(),
            libraries: self.libraries.clone(),
            collections: self.collections.clone(),
            shows: self.shows.clone(),
            seasons: self.seasons.clone(),
            playlists: self.playlists.clone(),
        })
    }
}
