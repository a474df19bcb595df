// src/domain/mod.rs
//
// Domain Root - catalog entity schema and the immutable state container.
//
// Entities reference each other by id, never by embedded object; the
// views layer rebuilds the object graph by lookup against one snapshot.

pub mod collection;
pub mod ids;
pub mod library;
pub mod playlist;
pub mod season;
pub mod show;
pub mod state;
pub mod video;

#[cfg(test)]
pub mod test_fixtures;

pub use collection::Collection;
pub use ids::{CollectionId, LibraryId, PlaylistId, SeasonId, ServerId, ShowId, VideoId};
pub use library::{Library, LibraryKind};
pub use playlist::Playlist;
pub use season::Season;
pub use show::Show;
pub use state::{ClientSettings, EntityMap, ServerState, State, SCHEMA_VERSION};
pub use video::{
    DownloadState, EpisodeDetail, MovieDetail, PlaybackState, ThumbnailState, Video, VideoDetail,
    VideoPart,
};
