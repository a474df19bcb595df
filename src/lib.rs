// src/lib.rs
// MediaHub - Local-first media library state core
//
// Architecture:
// - Domain-centric: the catalog schema and the immutable `State` live in
//   `domain`; every local mutation produces a new snapshot
// - Validated at the boundary: `decode` rejects malformed or
//   referentially-inconsistent documents before any state exists
// - Derived, never stored: relationships and the offline-availability
//   filter are views computed per snapshot in `views`
// - Local-first: durable storage is a user-chosen root behind the
//   `Store` trait; writes coalesce, latest snapshot wins

pub mod decode;
pub mod domain;
pub mod error;
pub mod ordering;
pub mod persistence;
pub mod session;
pub mod views;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    ClientSettings,
    Collection,
    CollectionId,
    DownloadState,
    EpisodeDetail,
    Library,
    LibraryId,
    LibraryKind,
    MovieDetail,
    PlaybackState,
    Playlist,
    PlaylistId,
    Season,
    SeasonId,
    ServerId,
    ServerState,
    Show,
    ShowId,
    State,
    ThumbnailState,
    Video,
    VideoDetail,
    VideoId,
    VideoPart,
    SCHEMA_VERSION,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, DecodeError};

// ============================================================================
// PUBLIC API - Decoder
// ============================================================================

pub use decode::{decode, decode_value, serialize};

// ============================================================================
// PUBLIC API - Snapshot Views
// ============================================================================

pub use views::{
    CollectionItemView, CollectionView, LibraryView, PlaylistView, SeasonView, ServerView,
    ShowView, Snapshot, VideoView,
};

// ============================================================================
// PUBLIC API - Ordering Utilities
// ============================================================================

pub use ordering::{
    by_air_date, by_index, by_title, movies_by_year, shows_by_year, title_sort_key, Titled,
};

// ============================================================================
// PUBLIC API - Persistence & Session
// ============================================================================

pub use persistence::{FsStore, MemoryStore, Persister, Store, StoreInfo, STATE_FILE};
pub use session::LibrarySession;
